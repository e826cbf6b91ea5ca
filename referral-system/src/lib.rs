#![no_std]

use access_control::AccessControlClient;
use shared::constants::{DEFAULT_MAX_REFERRALS, DEFAULT_MAX_REF_REVENUE};
use shared::errors::Error;
use shared::events::{
    CALLER_APPROVED, CALLER_REMOVED, GLOBAL_REWARDS_ADDED, GLOBAL_REWARDS_CLAIMED,
    NEW_ACCESS_CONTROL, NEW_MAX_REFERRALS, NEW_MAX_REF_REVENUE, NEW_REWARD_TOKEN,
    NEW_TOKEN_FACTORY, REWARDS_ADDED, REWARDS_CLAIMED,
};
use shared::types::Role;
use soroban_sdk::{
    contract, contractclient, contractimpl, contractmeta, token, Address, Env,
};

mod storage;


use storage::*;

contractmeta!(key = "name", val = "Referral System");

/// Minimal view of the issuance factory used to time-lock property claims.
/// A trait client keeps the dependency one-directional: the factory already
/// links against this crate.
#[contractclient(name = "IssuanceFactoryClient")]
pub trait IssuanceFactory {
    fn is_ref_claimable(env: Env, id: u64) -> bool;
}

/// Commission ledger. Credits are recorded by approved callers (the
/// issuance factory, the router); funds backing per-property credits arrive
/// in custody before the originating raise can conclude successfully, which
/// is also the moment those credits become claimable.
#[contract]
pub struct ReferralSystem;

#[contractimpl]
impl ReferralSystem {
    pub fn initialize(
        env: Env,
        reward_token: Address,
        access_control: Address,
        token_factory: Address,
    ) -> Result<(), Error> {
        if is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        write_reward_token(&env, &reward_token);
        write_access_control(&env, &access_control);
        write_token_factory(&env, &token_factory);
        write_max_referrals(&env, DEFAULT_MAX_REFERRALS);
        write_max_ref_rev(&env, DEFAULT_MAX_REF_REVENUE);
        Ok(())
    }

    /// Permit `ctr` to credit rewards. Admin only; fails on a duplicate add.
    pub fn add_approved_ctr(env: Env, caller: Address, ctr: Address) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;

        if is_approved_ctr(&env, &ctr) {
            return Err(Error::AlreadyApproved);
        }
        set_approved_ctr(&env, &ctr, true);

        env.events().publish((CALLER_APPROVED,), ctr);
        Ok(())
    }

    /// Withdraw `ctr`'s permission. Fails if it was never approved.
    pub fn remove_approved_ctr(env: Env, caller: Address, ctr: Address) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;

        if !is_approved_ctr(&env, &ctr) {
            return Err(Error::NotApprovedCaller);
        }
        set_approved_ctr(&env, &ctr, false);

        env.events().publish((CALLER_REMOVED,), ctr);
        Ok(())
    }

    /// Credit a per-property commission. Moves no funds; the caller is
    /// responsible for having routed them into this contract's custody.
    pub fn add_rewards(
        env: Env,
        caller: Address,
        referrer: Address,
        buyer: Address,
        id: u64,
        amount: i128,
    ) -> Result<(), Error> {
        caller.require_auth();
        if !is_approved_ctr(&env, &caller) {
            return Err(Error::NotApprovedCaller);
        }
        if amount <= 0 {
            return Err(Error::AmountTooLow);
        }

        Self::credit_lifetime(&env, &referrer, amount)?;

        let pending = read_rewards(&env, &referrer, id);
        if pending == 0 {
            let count = read_entry_count(&env, &referrer);
            if count >= read_max_referrals(&env) {
                return Err(Error::TooManyReferrals);
            }
            write_entry_count(&env, &referrer, count + 1);
        }
        write_rewards(&env, &referrer, id, pending + amount);

        env.events()
            .publish((REWARDS_ADDED,), (referrer, buyer, id, amount));
        Ok(())
    }

    /// Credit a cross-property commission under the same lifetime cap.
    pub fn add_global_rewards(
        env: Env,
        caller: Address,
        referrer: Address,
        amount: i128,
    ) -> Result<(), Error> {
        caller.require_auth();
        if !is_approved_ctr(&env, &caller) {
            return Err(Error::NotApprovedCaller);
        }
        if amount <= 0 {
            return Err(Error::AmountTooLow);
        }

        Self::credit_lifetime(&env, &referrer, amount)?;
        write_global(&env, &referrer, read_global(&env, &referrer) + amount);

        env.events().publish((GLOBAL_REWARDS_ADDED,), (referrer, amount));
        Ok(())
    }

    /// Pay out a per-property commission. The referrer must have completed
    /// KYC and the originating raise must have concluded successfully.
    pub fn claim_property_rewards(env: Env, referrer: Address, id: u64) -> Result<i128, Error> {
        let access = AccessControlClient::new(&env, &read_access_control(&env));
        if !access.is_kyc_approved(&referrer) {
            return Err(Error::NotKycApproved);
        }

        let factory = IssuanceFactoryClient::new(&env, &read_token_factory(&env));
        if !factory.is_ref_claimable(&id) {
            return Err(Error::NotYetClaimable);
        }

        let amount = read_rewards(&env, &referrer, id);
        if amount == 0 {
            return Err(Error::NothingToClaim);
        }

        // Zero the entry before the payout transfer.
        write_rewards(&env, &referrer, id, 0);
        let count = read_entry_count(&env, &referrer);
        write_entry_count(&env, &referrer, count.saturating_sub(1));

        token::Client::new(&env, &read_reward_token(&env)).transfer(
            &env.current_contract_address(),
            &referrer,
            &amount,
        );

        env.events().publish((REWARDS_CLAIMED,), (referrer, id, amount));
        Ok(amount)
    }

    /// Pay out the cross-property balance. KYC-gated, no time lock.
    pub fn claim_global_rewards(env: Env, referrer: Address) -> Result<i128, Error> {
        let access = AccessControlClient::new(&env, &read_access_control(&env));
        if !access.is_kyc_approved(&referrer) {
            return Err(Error::NotKycApproved);
        }

        let amount = read_global(&env, &referrer);
        if amount == 0 {
            return Err(Error::NothingToClaim);
        }

        write_global(&env, &referrer, 0);
        token::Client::new(&env, &read_reward_token(&env)).transfer(
            &env.current_contract_address(),
            &referrer,
            &amount,
        );

        env.events().publish((GLOBAL_REWARDS_CLAIMED,), (referrer, amount));
        Ok(amount)
    }

    pub fn set_reward_token(env: Env, caller: Address, token: Address) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;
        write_reward_token(&env, &token);
        env.events().publish((NEW_REWARD_TOKEN,), token);
        Ok(())
    }

    pub fn set_access_control(env: Env, caller: Address, access: Address) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;
        write_access_control(&env, &access);
        env.events().publish((NEW_ACCESS_CONTROL,), access);
        Ok(())
    }

    pub fn set_token_factory(env: Env, caller: Address, factory: Address) -> Result<(), Error> {
        Self::require_admin(&env, &caller)?;
        write_token_factory(&env, &factory);
        env.events().publish((NEW_TOKEN_FACTORY,), factory);
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

    pub fn rewards(env: Env, referrer: Address, id: u64) -> i128 {
        read_rewards(&env, &referrer, id)
    }

    pub fn global_rewards(env: Env, referrer: Address) -> i128 {
        read_global(&env, &referrer)
    }

    pub fn total_credited(env: Env, referrer: Address) -> i128 {
        read_total_credited(&env, &referrer)
    }

    pub fn entry_count(env: Env, referrer: Address) -> u32 {
        read_entry_count(&env, &referrer)
    }

    pub fn is_approved_ctr(env: Env, ctr: Address) -> bool {
        is_approved_ctr(&env, &ctr)
    }

    pub fn reward_token(env: Env) -> Address {
        read_reward_token(&env)
    }

    pub fn token_factory_addr(env: Env) -> Address {
        read_token_factory(&env)
    }

    pub fn access_control_addr(env: Env) -> Address {
        read_access_control(&env)
    }

    pub fn max_number_of_referrals(env: Env) -> u32 {
        read_max_referrals(&env)
    }

    pub fn max_amount_of_ref_rev(env: Env) -> i128 {
        read_max_ref_rev(&env)
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
        caller.require_auth();
        let access = AccessControlClient::new(env, &read_access_control(env));
        if !access.has_role(caller, &Role::Admin) {
            return Err(Error::NotAdminManager);
        }
        Ok(())
    }

    /// Bump the referrer's lifetime total, rejecting credits past the cap.
    fn credit_lifetime(env: &Env, referrer: &Address, amount: i128) -> Result<(), Error> {
        let total = read_total_credited(env, referrer)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        if total > read_max_ref_rev(env) {
            return Err(Error::RefRevenueCapExceeded);
        }
        write_total_credited(env, referrer, total);
        Ok(())
    }
}
