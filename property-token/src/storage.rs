use soroban_sdk::{contracttype, Address, Env};

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

pub const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;
pub const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone)]
pub struct AllowanceDataKey {
    pub from: Address,
    pub spender: Address,
}

#[contracttype]
#[derive(Clone)]
pub struct AllowanceValue {
    pub amount: i128,
    pub expiration_ledger: u32,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Issuance factory that owns this token instance (Instance).
    Factory,
    /// Access-control contract consulted on every transfer (Instance).
    AccessControl,
    /// Asset that dividends are paid in (Instance).
    RewardAsset,
    /// Total share supply (Instance).
    TotalSupply,
    /// Global fixed-point dividend accumulator (Instance).
    DividendPerShare,
    /// Share balance per holder (Persistent).
    Balance(Address),
    /// Accumulator value at the holder's last settlement (Persistent).
    Snapshot(Address),
    /// Settled, claimable dividend amount per holder (Persistent).
    Credit(Address),
    /// Spender allowances (Temporary).
    Allowance(AllowanceDataKey),
}

pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn has_factory(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Factory)
}

pub fn read_factory(env: &Env) -> Address {
    env.storage().instance().get(&DataKey::Factory).unwrap()
}

pub fn write_factory(env: &Env, factory: &Address) {
    env.storage().instance().set(&DataKey::Factory, factory);
}

pub fn read_access_control(env: &Env) -> Address {
    env.storage().instance().get(&DataKey::AccessControl).unwrap()
}

pub fn write_access_control(env: &Env, access: &Address) {
    env.storage().instance().set(&DataKey::AccessControl, access);
}

pub fn read_reward_asset(env: &Env) -> Address {
    env.storage().instance().get(&DataKey::RewardAsset).unwrap()
}

pub fn write_reward_asset(env: &Env, asset: &Address) {
    env.storage().instance().set(&DataKey::RewardAsset, asset);
}

pub fn read_total_supply(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

pub fn write_total_supply(env: &Env, supply: i128) {
    env.storage().instance().set(&DataKey::TotalSupply, &supply);
}

pub fn read_dividend_per_share(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::DividendPerShare)
        .unwrap_or(0)
}

pub fn write_dividend_per_share(env: &Env, dps: i128) {
    env.storage().instance().set(&DataKey::DividendPerShare, &dps);
}
