#![no_std]

use access_control::AccessControlClient;
use shared::constants::SCALE;
use shared::errors::Error;
use shared::events::{DIVIDENDS_CLAIMED, REVENUE_DISTRIBUTED};
use soroban_sdk::{
    contract, contractimpl, contractmeta, panic_with_error, token, token::TokenInterface, Address,
    Env, String,
};
use soroban_token_sdk::metadata::TokenMetadata;
use soroban_token_sdk::TokenUtils;

mod allowance;
mod balance;
mod dividends;
mod storage;


use storage::*;

contractmeta!(key = "name", val = "Property Share Token");

fn check_nonnegative_amount(amount: i128) {
    if amount < 0 {
        panic!("negative amount is not allowed: {}", amount)
    }
}

/// Gate applied before every balance mutation, in fixed precedence:
/// blacklist (either party), then receiver KYC, then the global pause.
fn require_transfer_allowed(env: &Env, from: &Address, to: &Address) -> Result<(), Error> {
    let access = AccessControlClient::new(env, &read_access_control(env));
    if access.is_blacklisted(from) || access.is_blacklisted(to) {
        return Err(Error::Blacklisted);
    }
    if !access.is_kyc_approved(to) {
        return Err(Error::NotKycApproved);
    }
    if access.is_paused() {
        return Err(Error::ContractPaused);
    }
    Ok(())
}

/// One instance per property: a transfer-gated share ledger that carries a
/// fixed-point dividend accumulator. Shares are whole units (`decimals = 0`);
/// the accumulator is scaled by `SCALE` so per-share accrual survives large
/// supplies without truncating to zero.
#[contract]
pub struct PropertyToken;

#[contractimpl]
impl PropertyToken {
    /// Link this instance to its issuance factory. Callable exactly once;
    /// mints the full share supply to `factory`.
    pub fn initialize(
        env: Env,
        factory: Address,
        supply: i128,
        reward_asset: Address,
        access_control: Address,
        name: String,
        symbol: String,
    ) -> Result<(), Error> {
        if has_factory(&env) {
            return Err(Error::AlreadyInitialized);
        }
        if supply <= 0 {
            return Err(Error::SupplyZero);
        }

        write_factory(&env, &factory);
        write_access_control(&env, &access_control);
        write_reward_asset(&env, &reward_asset);
        write_total_supply(&env, supply);
        balance::receive_balance(&env, factory.clone(), supply);

        TokenUtils::new(&env).metadata().set_metadata(&TokenMetadata {
            decimal: 0,
            name,
            symbol,
        });
        TokenUtils::new(&env)
            .events()
            .mint(factory.clone(), factory, supply);
        Ok(())
    }

    /// Pull `amount` of the reward asset from `from` and fold it into the
    /// per-share accumulator.
    pub fn distribute_rewards(env: Env, from: Address, amount: i128) -> Result<(), Error> {
        from.require_auth();
        extend_instance(&env);

        if amount <= 0 {
            return Err(Error::AmountTooLow);
        }
        let supply = read_total_supply(&env);
        if supply <= 0 {
            return Err(Error::SupplyZero);
        }

        // Pull first: the accumulator must only ever reflect funds already
        // in custody.
        token::Client::new(&env, &read_reward_asset(&env)).transfer(
            &from,
            &env.current_contract_address(),
            &amount,
        );

        let delta = amount.checked_mul(SCALE).ok_or(Error::Overflow)? / supply;
        write_dividend_per_share(&env, read_dividend_per_share(&env) + delta);

        env.events().publish((REVENUE_DISTRIBUTED,), (from, amount));
        Ok(())
    }

    /// Settle and pay out `holder`'s pending dividends. Callable by anyone
    /// on behalf of `holder`; a second immediate call pays zero.
    pub fn claim_dividends(env: Env, holder: Address) -> Result<i128, Error> {
        extend_instance(&env);

        dividends::settle(&env, &holder);
        let credit = dividends::read_credit(&env, &holder);
        if credit == 0 {
            return Ok(0);
        }

        // Zero before the external push.
        dividends::write_credit(&env, &holder, 0);
        token::Client::new(&env, &read_reward_asset(&env)).transfer(
            &env.current_contract_address(),
            &holder,
            &credit,
        );

        env.events().publish((DIVIDENDS_CLAIMED,), (holder, credit));
        Ok(credit)
    }

    pub fn dividend_per_share(env: Env) -> i128 {
        read_dividend_per_share(&env)
    }

    /// Accumulator value at `holder`'s last settlement.
    pub fn holder_snapshot(env: Env, holder: Address) -> i128 {
        dividends::read_snapshot(&env, &holder)
    }

    pub fn pending_dividends(env: Env, holder: Address) -> i128 {
        dividends::pending(&env, &holder)
    }

    pub fn total_supply(env: Env) -> i128 {
        read_total_supply(&env)
    }

    pub fn reward_asset(env: Env) -> Address {
        read_reward_asset(&env)
    }

    pub fn access_control(env: Env) -> Address {
        read_access_control(&env)
    }

    pub fn factory(env: Env) -> Address {
        read_factory(&env)
    }
}

#[contractimpl]
impl token::Interface for PropertyToken {
    fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        extend_instance(&env);
        allowance::read_allowance(&env, from, spender).amount
    }

    fn approve(env: Env, from: Address, spender: Address, amount: i128, expiration_ledger: u32) {
        from.require_auth();
        extend_instance(&env);
        check_nonnegative_amount(amount);

        allowance::write_allowance(&env, from.clone(), spender.clone(), amount, expiration_ledger);
        TokenUtils::new(&env)
            .events()
            .approve(from, spender, amount, expiration_ledger);
    }

    fn balance(env: Env, id: Address) -> i128 {
        extend_instance(&env);
        balance::read_balance(&env, &id)
    }

    fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        extend_instance(&env);
        check_nonnegative_amount(amount);

        if let Err(e) = require_transfer_allowed(&env, &from, &to) {
            panic_with_error!(&env, e);
        }

        dividends::settle(&env, &from);
        dividends::settle(&env, &to);
        balance::spend_balance(&env, from.clone(), amount);
        balance::receive_balance(&env, to.clone(), amount);
        TokenUtils::new(&env).events().transfer(from, to, amount);
    }

    fn transfer_from(env: Env, spender: Address, from: Address, to: Address, amount: i128) {
        spender.require_auth();
        extend_instance(&env);
        check_nonnegative_amount(amount);

        if let Err(e) = require_transfer_allowed(&env, &from, &to) {
            panic_with_error!(&env, e);
        }

        allowance::spend_allowance(&env, from.clone(), spender, amount);
        dividends::settle(&env, &from);
        dividends::settle(&env, &to);
        balance::spend_balance(&env, from.clone(), amount);
        balance::receive_balance(&env, to.clone(), amount);
        TokenUtils::new(&env).events().transfer(from, to, amount);
    }

    fn burn(env: Env, from: Address, amount: i128) {
        from.require_auth();
        extend_instance(&env);
        check_nonnegative_amount(amount);

        dividends::settle(&env, &from);
        balance::spend_balance(&env, from.clone(), amount);
        write_total_supply(&env, read_total_supply(&env) - amount);
        TokenUtils::new(&env).events().burn(from, amount);
    }

    fn burn_from(env: Env, spender: Address, from: Address, amount: i128) {
        spender.require_auth();
        extend_instance(&env);
        check_nonnegative_amount(amount);

        allowance::spend_allowance(&env, from.clone(), spender, amount);
        dividends::settle(&env, &from);
        balance::spend_balance(&env, from.clone(), amount);
        write_total_supply(&env, read_total_supply(&env) - amount);
        TokenUtils::new(&env).events().burn(from, amount);
    }

    fn decimals(env: Env) -> u32 {
        TokenUtils::new(&env).metadata().get_metadata().decimal
    }

    fn name(env: Env) -> String {
        TokenUtils::new(&env).metadata().get_metadata().name
    }

    fn symbol(env: Env) -> String {
        TokenUtils::new(&env).metadata().get_metadata().symbol
    }
}
