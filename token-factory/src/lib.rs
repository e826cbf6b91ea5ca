#![no_std]

use access_control::AccessControlClient;
use property_token::PropertyTokenClient;
use referral_system::ReferralSystemClient;
use shared::constants::{
    BASIS_POINTS, DEFAULT_MAX_REFERRALS, DEFAULT_MAX_REF_REVENUE, MAX_PLATFORM_FEE_BPS,
    MIN_RAISE_WINDOW, MIN_REVENUE_AMOUNT,
};
use shared::errors::Error;
use shared::events::{
    FUNDS_RECOVERED, NEW_INVESTMENT, NEW_ISSUANCE_CTR, NEW_MAX_REFERRALS, NEW_MAX_REF_REVENUE,
    NEW_MIN_INVESTMENT, NEW_OWNERS_FEE, NEW_PLATFORM_FEE, NEW_REFERRAL_CTR, NEW_TREASURY,
    OWNER_PAYOUT, PROPERTY_APPROVED, PROPERTY_CANCELLED, PROPERTY_CREATED, RAISE_EXTENDED,
    TOKEN_UNWHITELISTED, TOKEN_WHITELISTED,
};
use shared::types::{Property, Role};
use soroban_sdk::{contract, contractimpl, contractmeta, token, Address, Env, String};

mod storage;

#[cfg(test)]
mod tests;

use storage::*;

contractmeta!(key = "name", val = "Token Factory");

/// Orchestrates the property lifecycle: creation, approval, the funding
/// window, purchases with fee and commission splitting, revenue
/// distribution, investor principal recovery and the owner payout.
///
/// The full payment of every purchase stays in factory custody while the
/// raise is live; accrued platform/owner fees and referral commissions are
/// pushed out only when the raise concludes fully subscribed. A failed
/// raise can therefore always refund every investor in full.
#[contract]
pub struct TokenFactory;

#[contractimpl]
impl TokenFactory {
    pub fn initialize(
        env: Env,
        platform_fee_bps: u32,
        owner_fee_ceiling_bps: u32,
        referral_fee_bps: u32,
        treasury: Address,
        min_inv_amount: i128,
        access_control: Address,
    ) -> Result<(), Error> {
        if is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        if platform_fee_bps > MAX_PLATFORM_FEE_BPS {
            return Err(Error::FeeMustBeValid);
        }
        if i128::from(owner_fee_ceiling_bps) >= BASIS_POINTS
            || i128::from(referral_fee_bps) >= BASIS_POINTS
        {
            return Err(Error::FeeMustBeValid);
        }
        if min_inv_amount <= 0 {
            return Err(Error::AmountTooLow);
        }

        write_platform_fee_bps(&env, platform_fee_bps);
        write_owner_fee_ceiling_bps(&env, owner_fee_ceiling_bps);
        write_referral_fee_bps(&env, referral_fee_bps);
        write_treasury(&env, &treasury);
        write_min_inv_amount(&env, min_inv_amount);
        write_access_control(&env, &access_control);
        write_max_referrals(&env, DEFAULT_MAX_REFERRALS);
        write_max_ref_rev(&env, DEFAULT_MAX_REF_REVENUE);
        set_initialized(&env);
        Ok(())
    }

    /// Allow `asset` as a raise payment asset. Admin only.
    pub fn add_whitelisted_token(env: Env, caller: Address, asset: Address) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;

        if is_whitelisted(&env, &asset) {
            return Err(Error::AlreadyApproved);
        }
        set_whitelisted(&env, &asset, true);

        env.events().publish((TOKEN_WHITELISTED,), asset);
        Ok(())
    }

    pub fn remove_whitelisted_token(env: Env, caller: Address, asset: Address) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;

        if !is_whitelisted(&env, &asset) {
            return Err(Error::TokenNotWhitelisted);
        }
        set_whitelisted(&env, &asset, false);

        env.events().publish((TOKEN_UNWHITELISTED,), asset);
        Ok(())
    }

    /// Register a new property in `Created` state and take ownership of its
    /// share token. `share_token` must be a freshly deployed, uninitialized
    /// instance; initializing it here mints the full supply to the factory
    /// and makes a pre-claimed token unlinkable.
    pub fn create_property(
        env: Env,
        owner: Address,
        supply: i128,
        price: i128,
        owner_fee_bps: u32,
        payment_asset: Address,
        reward_asset: Address,
        share_token: Address,
        name: String,
        symbol: String,
    ) -> Result<u64, Error> {
        owner.require_auth();
        Self::require_initialized(&env)?;

        let access = Self::access(&env);
        if access.is_paused() {
            return Err(Error::ContractPaused);
        }
        if access.is_blacklisted(&owner) {
            return Err(Error::Blacklisted);
        }
        if !access.is_kyc_approved(&owner) {
            return Err(Error::NotKycApproved);
        }
        if !is_whitelisted(&env, &payment_asset) {
            return Err(Error::TokenNotWhitelisted);
        }
        if owner_fee_bps > read_owner_fee_ceiling_bps(&env) {
            return Err(Error::FeeMustBeValid);
        }
        if supply <= 0 {
            return Err(Error::SupplyZero);
        }
        if price <= 0 {
            return Err(Error::AmountTooLow);
        }

        let id = next_property_id(&env);
        PropertyTokenClient::new(&env, &share_token).initialize(
            &env.current_contract_address(),
            &supply,
            &reward_asset,
            &read_access_control(&env),
            &name,
            &symbol,
        );

        let property = Property {
            id,
            owner: owner.clone(),
            supply,
            price,
            owner_fee_bps,
            payment_asset,
            share_token,
            deadline: 0,
            approved: false,
            cancelled: false,
            funds_raised: 0,
            shares_sold: 0,
            treasury_fees: 0,
            referral_fees: 0,
            owner_paid: false,
        };
        set_property(&env, &property);

        env.events().publish((PROPERTY_CREATED,), (id, owner, supply, price));
        Ok(id)
    }

    /// Open the funding window. Admin only; the deadline must leave at
    /// least the minimum raise window and is immutable except through
    /// `extend_raise_for_property`.
    pub fn approve_property(env: Env, caller: Address, id: u64, deadline: u64) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;

        let mut property = get_property(&env, id)?;
        if property.approved {
            return Err(Error::AlreadyApproved);
        }
        if deadline < env.ledger().timestamp() + MIN_RAISE_WINDOW {
            return Err(Error::InvalidDeadline);
        }

        property.approved = true;
        property.deadline = deadline;
        set_property(&env, &property);

        env.events().publish((PROPERTY_APPROVED,), (id, deadline));
        Ok(())
    }

    /// Push the raise deadline forward. Admin only, forward only.
    pub fn extend_raise_for_property(
        env: Env,
        caller: Address,
        id: u64,
        new_deadline: u64,
    ) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;

        let mut property = get_property(&env, id)?;
        if !property.approved {
            return Err(Error::TimeNotValid);
        }
        if new_deadline <= property.deadline {
            return Err(Error::InvalidDeadline);
        }

        property.deadline = new_deadline;
        set_property(&env, &property);

        env.events().publish((RAISE_EXTENDED,), (id, new_deadline));
        Ok(())
    }

    /// Abort the raise. Purchases and distributions stop immediately and
    /// investors may recover their principal.
    pub fn cancel_property(env: Env, caller: Address, id: u64) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;

        let mut property = get_property(&env, id)?;
        if property.cancelled || property.owner_paid {
            return Err(Error::TimeNotValid);
        }

        property.cancelled = true;
        set_property(&env, &property);

        env.events().publish((PROPERTY_CANCELLED,), id);
        Ok(())
    }

    /// Purchase `share_count` shares. The full payment is pulled into
    /// factory custody; fee and commission splits are accrued against the
    /// property and settled when the raise concludes.
    pub fn buy_tokens(
        env: Env,
        buyer: Address,
        id: u64,
        share_count: i128,
        referrer: Option<Address>,
    ) -> Result<(), Error> {
        buyer.require_auth();
        Self::require_initialized(&env)?;
        let referral_ctr = read_referral_ctr(&env).ok_or(Error::NotInitialized)?;

        let mut property = get_property(&env, id)?;
        let access = Self::access(&env);
        if access.is_paused() {
            return Err(Error::ContractPaused);
        }
        Self::require_window_open(&env, &property)?;
        if access.is_blacklisted(&buyer) {
            return Err(Error::Blacklisted);
        }
        if !access.is_kyc_approved(&buyer) {
            return Err(Error::NotKycApproved);
        }
        if share_count <= 0 {
            return Err(Error::AmountTooLow);
        }

        let paid = share_count.checked_mul(property.price).ok_or(Error::Overflow)?;
        if paid < read_min_inv_amount(&env) {
            return Err(Error::AmountTooLow);
        }
        let sold = property.shares_sold.checked_add(share_count).ok_or(Error::Overflow)?;
        if sold > property.supply {
            return Err(Error::NotEnoughShares);
        }

        let treasury_cut = paid
            .checked_mul(i128::from(read_platform_fee_bps(&env)))
            .ok_or(Error::Overflow)?
            / BASIS_POINTS;
        let referral_cut = Self::referral_cut(&env, &referral_ctr, &property, &buyer, &referrer, paid)?;

        // Pull the payment, then settle every ledger mutation before any
        // further external call.
        token::Client::new(&env, &property.payment_asset).transfer(
            &buyer,
            &env.current_contract_address(),
            &paid,
        );

        property.shares_sold = sold;
        property.funds_raised = property.funds_raised.checked_add(paid).ok_or(Error::Overflow)?;
        property.treasury_fees += treasury_cut;
        if let Some((_, cut)) = &referral_cut {
            property.referral_fees += cut;
        }
        set_property(&env, &property);
        write_invested(&env, id, &buyer, read_invested(&env, id, &buyer) + paid);

        PropertyTokenClient::new(&env, &property.share_token).transfer(
            &env.current_contract_address(),
            &buyer,
            &share_count,
        );
        if let Some((referrer, cut)) = referral_cut {
            ReferralSystemClient::new(&env, &referral_ctr).add_rewards(
                &env.current_contract_address(),
                &referrer,
                &buyer,
                &id,
                &cut,
            );
        }

        env.events().publish(
            (NEW_INVESTMENT,),
            (id, buyer, paid, env.ledger().timestamp()),
        );
        Ok(())
    }

    /// Privileged purchase on behalf of a user whose payment settled
    /// off-ledger. FundsManager only; no payment pull, no fees, no
    /// commission.
    pub fn admin_buy_tokens(
        env: Env,
        caller: Address,
        id: u64,
        on_behalf_of: Address,
        share_count: i128,
    ) -> Result<(), Error> {
        caller.require_auth();
        Self::require_initialized(&env)?;
        let access = Self::access(&env);
        if !access.has_role(&caller, &Role::FundsManager) {
            return Err(Error::NotFundsManager);
        }

        let mut property = get_property(&env, id)?;
        if access.is_paused() {
            return Err(Error::ContractPaused);
        }
        Self::require_window_open(&env, &property)?;
        if access.is_blacklisted(&on_behalf_of) {
            return Err(Error::Blacklisted);
        }
        if !access.is_kyc_approved(&on_behalf_of) {
            return Err(Error::NotKycApproved);
        }
        if share_count <= 0 {
            return Err(Error::AmountTooLow);
        }

        let consideration = share_count.checked_mul(property.price).ok_or(Error::Overflow)?;
        let sold = property.shares_sold.checked_add(share_count).ok_or(Error::Overflow)?;
        if sold > property.supply {
            return Err(Error::NotEnoughShares);
        }

        property.shares_sold = sold;
        set_property(&env, &property);

        PropertyTokenClient::new(&env, &property.share_token).transfer(
            &env.current_contract_address(),
            &on_behalf_of,
            &share_count,
        );

        env.events().publish(
            (NEW_INVESTMENT,),
            (id, on_behalf_of, consideration, env.ledger().timestamp()),
        );
        Ok(())
    }

    /// Forward `amount` of revenue to the property's share token. Allowed
    /// once the raise concluded (deadline elapsed or fully subscribed).
    pub fn distribute_revenue(env: Env, caller: Address, id: u64, amount: i128) -> Result<(), Error> {
        caller.require_auth();

        let property = get_property(&env, id)?;
        if property.cancelled || !property.concluded(env.ledger().timestamp()) {
            return Err(Error::TimeNotValid);
        }
        if amount <= MIN_REVENUE_AMOUNT {
            return Err(Error::AmountTooLow);
        }

        PropertyTokenClient::new(&env, &property.share_token).distribute_rewards(&caller, &amount);
        Ok(())
    }

    /// Settle a successfully concluded raise: accrued platform and owner
    /// fees go to the treasury, accrued commissions to the referral ledger
    /// custody, the remainder to the property owner. Single-shot.
    pub fn claim_investment_returns(env: Env, id: u64) -> Result<i128, Error> {
        let mut property = get_property(&env, id)?;
        if !property.successful() {
            return Err(Error::TimeNotValid);
        }
        if property.owner_paid {
            return Err(Error::NothingToClaim);
        }

        let owner_fee = property
            .funds_raised
            .checked_mul(i128::from(property.owner_fee_bps))
            .ok_or(Error::Overflow)?
            / BASIS_POINTS;
        let payout = property.funds_raised - property.treasury_fees - property.referral_fees - owner_fee;
        if payout < 0 {
            return Err(Error::FeeMustBeValid);
        }

        property.owner_paid = true;
        set_property(&env, &property);

        let payment = token::Client::new(&env, &property.payment_asset);
        let this = env.current_contract_address();
        let to_treasury = property.treasury_fees + owner_fee;
        if to_treasury > 0 {
            payment.transfer(&this, &read_treasury(&env), &to_treasury);
        }
        if property.referral_fees > 0 {
            let referral_ctr = read_referral_ctr(&env).ok_or(Error::NotInitialized)?;
            payment.transfer(&this, &referral_ctr, &property.referral_fees);
        }
        if payout > 0 {
            payment.transfer(&this, &property.owner, &payout);
        }

        env.events().publish((OWNER_PAYOUT,), (id, property.owner, payout));
        Ok(payout)
    }

    /// Refund the caller's recorded principal after a failed or cancelled
    /// raise. Hard-fails when nothing is recorded, including on a second
    /// call.
    pub fn recover_funds_invested(env: Env, caller: Address, id: u64) -> Result<i128, Error> {
        caller.require_auth();

        let mut property = get_property(&env, id)?;
        if !property.recoverable(env.ledger().timestamp()) {
            return Err(Error::TimeNotValid);
        }

        let principal = read_invested(&env, id, &caller);
        if principal == 0 {
            return Err(Error::NothingToClaim);
        }

        write_invested(&env, id, &caller, 0);
        property.funds_raised -= principal;
        set_property(&env, &property);

        token::Client::new(&env, &property.payment_asset).transfer(
            &env.current_contract_address(),
            &caller,
            &principal,
        );

        env.events().publish((FUNDS_RECOVERED,), (id, caller, principal));
        Ok(principal)
    }

    pub fn set_owners_fee(env: Env, caller: Address, id: u64, fee_bps: u32) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;

        let mut property = get_property(&env, id)?;
        if fee_bps > read_owner_fee_ceiling_bps(&env) {
            return Err(Error::FeeMustBeValid);
        }
        property.owner_fee_bps = fee_bps;
        set_property(&env, &property);

        env.events().publish((NEW_OWNERS_FEE,), (id, fee_bps));
        Ok(())
    }

    pub fn set_platform_fee(env: Env, caller: Address, fee_bps: u32) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;

        if fee_bps > MAX_PLATFORM_FEE_BPS {
            return Err(Error::FeeMustBeValid);
        }
        write_platform_fee_bps(&env, fee_bps);

        env.events().publish((NEW_PLATFORM_FEE,), fee_bps);
        Ok(())
    }

    pub fn set_treasury(env: Env, caller: Address, treasury: Address) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;
        write_treasury(&env, &treasury);
        env.events().publish((NEW_TREASURY,), treasury);
        Ok(())
    }

    pub fn set_min_inv_amount(env: Env, caller: Address, amount: i128) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;
        if amount <= 0 {
            return Err(Error::AmountTooLow);
        }
        write_min_inv_amount(&env, amount);
        env.events().publish((NEW_MIN_INVESTMENT,), amount);
        Ok(())
    }

    pub fn set_max_number_of_referrals(env: Env, caller: Address, max: u32) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;
        write_max_referrals(&env, max);
        env.events().publish((NEW_MAX_REFERRALS,), max);
        Ok(())
    }

    pub fn set_max_amount_of_ref_rev(env: Env, caller: Address, max: i128) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;
        if max <= 0 {
            return Err(Error::AmountTooLow);
        }
        write_max_ref_rev(&env, max);
        env.events().publish((NEW_MAX_REF_REVENUE,), max);
        Ok(())
    }

    pub fn set_referral_contract(env: Env, caller: Address, referral: Address) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;
        write_referral_ctr(&env, &referral);
        env.events().publish((NEW_REFERRAL_CTR,), referral);
        Ok(())
    }

    pub fn set_issuance_contract(env: Env, caller: Address, issuance: Address) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;
        write_issuance_ctr(&env, &issuance);
        env.events().publish((NEW_ISSUANCE_CTR,), issuance);
        Ok(())
    }

    pub fn property_counter(env: Env) -> u64 {
        read_property_counter(&env)
    }

    pub fn get_property(env: Env, id: u64) -> Result<Property, Error> {
        get_property(&env, id)
    }

    pub fn invested(env: Env, user: Address, id: u64) -> i128 {
        read_invested(&env, id, &user)
    }

    pub fn min_inv_amount(env: Env) -> i128 {
        read_min_inv_amount(&env)
    }

    pub fn treasury(env: Env) -> Address {
        read_treasury(&env)
    }

    pub fn platform_fee(env: Env) -> u32 {
        read_platform_fee_bps(&env)
    }

    pub fn max_number_of_referrals(env: Env) -> u32 {
        read_max_referrals(&env)
    }

    pub fn max_amount_of_ref_rev(env: Env) -> i128 {
        read_max_ref_rev(&env)
    }

    pub fn referral_system_ctr(env: Env) -> Option<Address> {
        read_referral_ctr(&env)
    }

    pub fn issuance_ctr(env: Env) -> Option<Address> {
        read_issuance_ctr(&env)
    }

    pub fn access_control_ctr(env: Env) -> Address {
        read_access_control(&env)
    }

    pub fn is_token_whitelisted(env: Env, asset: Address) -> bool {
        is_whitelisted(&env, &asset)
    }

    /// Referral commissions for `id` become claimable once its raise ended
    /// fully subscribed and uncancelled.
    pub fn is_ref_claimable(env: Env, id: u64) -> bool {
        match get_property(&env, id) {
            Ok(property) => property.successful(),
            Err(_) => false,
        }
    }

    fn access(env: &Env) -> AccessControlClient {
        AccessControlClient::new(env, &read_access_control(env))
    }

    fn require_initialized(env: &Env) -> Result<(), Error> {
        if !is_initialized(env) {
            return Err(Error::NotInitialized);
        }
        Ok(())
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
        caller.require_auth();
        Self::require_initialized(env)?;
        if !Self::access(env).has_role(caller, &Role::Admin) {
            return Err(Error::NotAdminManager);
        }
        Ok(())
    }

    fn require_window_open(env: &Env, property: &Property) -> Result<(), Error> {
        if !property.approved || property.cancelled {
            return Err(Error::TimeNotValid);
        }
        if env.ledger().timestamp() >= property.deadline {
            return Err(Error::TimeNotValid);
        }
        Ok(())
    }

    /// Commission owed for this purchase, clamped so a capped referrer can
    /// never abort a buy: zero when the referrer is the buyer, when the
    /// raise runs in a different asset than the ledger pays in, when the
    /// entry cap would be exceeded, and clipped to the remaining lifetime
    /// allowance otherwise.
    fn referral_cut(
        env: &Env,
        referral_ctr: &Address,
        property: &Property,
        buyer: &Address,
        referrer: &Option<Address>,
        paid: i128,
    ) -> Result<Option<(Address, i128)>, Error> {
        let referrer = match referrer {
            Some(referrer) if referrer != buyer => referrer,
            _ => return Ok(None),
        };

        let referral = ReferralSystemClient::new(env, referral_ctr);
        if referral.reward_token() != property.payment_asset {
            return Ok(None);
        }
        if referral.rewards(referrer, &property.id) == 0
            && referral.entry_count(referrer) >= read_max_referrals(env)
        {
            return Ok(None);
        }

        let mut cut = paid
            .checked_mul(i128::from(read_referral_fee_bps(env)))
            .ok_or(Error::Overflow)?
            / BASIS_POINTS;
        let remaining = read_max_ref_rev(env) - referral.total_credited(referrer);
        if remaining <= 0 {
            return Ok(None);
        }
        if cut > remaining {
            cut = remaining;
        }
        if cut <= 0 {
            return Ok(None);
        }
        Ok(Some((referrer.clone(), cut)))
    }
}
