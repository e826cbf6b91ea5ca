use crate::balance::read_balance;
use crate::storage::{
    read_dividend_per_share, DataKey, PERSISTENT_BUMP_AMOUNT, PERSISTENT_LIFETIME_THRESHOLD,
};
use shared::constants::SCALE;
use shared::errors::Error;
use soroban_sdk::{panic_with_error, Address, Env};

pub fn read_snapshot(env: &Env, addr: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Snapshot(addr.clone()))
        .unwrap_or(0)
}

fn write_snapshot(env: &Env, addr: &Address, snapshot: i128) {
    let key = DataKey::Snapshot(addr.clone());
    env.storage().persistent().set(&key, &snapshot);
    env.storage().persistent().extend_ttl(
        &key,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn read_credit(env: &Env, addr: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Credit(addr.clone()))
        .unwrap_or(0)
}

pub fn write_credit(env: &Env, addr: &Address, credit: i128) {
    let key = DataKey::Credit(addr.clone());
    env.storage().persistent().set(&key, &credit);
    env.storage().persistent().extend_ttl(
        &key,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

/// Flush `addr`'s accrued dividends into its claimable credit and re-anchor
/// the snapshot at the current accumulator. Must run for both parties before
/// any balance mutation, otherwise accrual earned on the old balance would
/// follow the shares to the new holder.
pub fn settle(env: &Env, addr: &Address) {
    let dps = read_dividend_per_share(env);
    let snapshot = read_snapshot(env, addr);
    if snapshot == dps {
        return;
    }
    let balance = read_balance(env, addr);
    if balance > 0 {
        let owed = balance
            .checked_mul(dps - snapshot)
            .map(|v| v / SCALE)
            .unwrap_or_else(|| panic_with_error!(env, Error::Overflow));
        if owed > 0 {
            write_credit(env, addr, read_credit(env, addr) + owed);
        }
    }
    write_snapshot(env, addr, dps);
}

/// Claimable amount as of now: settled credit plus unsettled accrual.
pub fn pending(env: &Env, addr: &Address) -> i128 {
    let dps = read_dividend_per_share(env);
    let accrued = read_balance(env, addr) * (dps - read_snapshot(env, addr)) / SCALE;
    read_credit(env, addr) + accrued
}
