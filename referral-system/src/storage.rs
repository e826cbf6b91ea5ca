use soroban_sdk::{contracttype, Address, Env};

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Asset commissions are paid in (Instance).
    RewardToken,
    /// Access-control contract (Instance).
    AccessControl,
    /// Issuance factory consulted for claim eligibility (Instance).
    TokenFactory,
    /// Cap on distinct per-property entries per referrer (Instance).
    MaxReferrals,
    /// Lifetime cap on credited commissions per referrer (Instance).
    MaxRefRev,
    /// Addresses permitted to credit rewards (Persistent).
    Approved(Address),
    /// Pending commission per (referrer, property) (Persistent).
    Rewards(Address, u64),
    /// Pending cross-property commission per referrer (Persistent).
    Global(Address),
    /// Lifetime commissions ever credited per referrer (Persistent).
    TotalCredited(Address),
    /// Live distinct per-property entries per referrer (Persistent).
    EntryCount(Address),
}

fn bump(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::RewardToken)
}

pub fn read_reward_token(env: &Env) -> Address {
    env.storage().instance().get(&DataKey::RewardToken).unwrap()
}

pub fn write_reward_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::RewardToken, token);
}

pub fn read_access_control(env: &Env) -> Address {
    env.storage().instance().get(&DataKey::AccessControl).unwrap()
}

pub fn write_access_control(env: &Env, access: &Address) {
    env.storage().instance().set(&DataKey::AccessControl, access);
}

pub fn read_token_factory(env: &Env) -> Address {
    env.storage().instance().get(&DataKey::TokenFactory).unwrap()
}

pub fn write_token_factory(env: &Env, factory: &Address) {
    env.storage().instance().set(&DataKey::TokenFactory, factory);
}

pub fn read_max_referrals(env: &Env) -> u32 {
    env.storage().instance().get(&DataKey::MaxReferrals).unwrap()
}

pub fn write_max_referrals(env: &Env, max: u32) {
    env.storage().instance().set(&DataKey::MaxReferrals, &max);
}

pub fn read_max_ref_rev(env: &Env) -> i128 {
    env.storage().instance().get(&DataKey::MaxRefRev).unwrap()
}

pub fn write_max_ref_rev(env: &Env, max: i128) {
    env.storage().instance().set(&DataKey::MaxRefRev, &max);
}

pub fn is_approved_ctr(env: &Env, ctr: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Approved(ctr.clone()))
        .unwrap_or(false)
}

pub fn set_approved_ctr(env: &Env, ctr: &Address, approved: bool) {
    let key = DataKey::Approved(ctr.clone());
    env.storage().persistent().set(&key, &approved);
    bump(env, &key);
}

pub fn read_rewards(env: &Env, referrer: &Address, id: u64) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Rewards(referrer.clone(), id))
        .unwrap_or(0)
}

pub fn write_rewards(env: &Env, referrer: &Address, id: u64, amount: i128) {
    let key = DataKey::Rewards(referrer.clone(), id);
    env.storage().persistent().set(&key, &amount);
    bump(env, &key);
}

pub fn read_global(env: &Env, referrer: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Global(referrer.clone()))
        .unwrap_or(0)
}

pub fn write_global(env: &Env, referrer: &Address, amount: i128) {
    let key = DataKey::Global(referrer.clone());
    env.storage().persistent().set(&key, &amount);
    bump(env, &key);
}

pub fn read_total_credited(env: &Env, referrer: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::TotalCredited(referrer.clone()))
        .unwrap_or(0)
}

pub fn write_total_credited(env: &Env, referrer: &Address, amount: i128) {
    let key = DataKey::TotalCredited(referrer.clone());
    env.storage().persistent().set(&key, &amount);
    bump(env, &key);
}

pub fn read_entry_count(env: &Env, referrer: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::EntryCount(referrer.clone()))
        .unwrap_or(0)
}

pub fn write_entry_count(env: &Env, referrer: &Address, count: u32) {
    let key = DataKey::EntryCount(referrer.clone());
    env.storage().persistent().set(&key, &count);
    bump(env, &key);
}
