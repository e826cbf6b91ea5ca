use shared::types::Role;
use soroban_sdk::{contracttype, Address, Env};

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Contract initialization flag (Instance).
    Initialized,
    /// Global pause switch (Instance).
    Paused,
    /// Role membership (Persistent).
    Role(Role, Address),
    /// KYC approval flag (Persistent).
    Kyc(Address),
    /// Blacklist flag (Persistent).
    Blacklisted(Address),
}

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Initialized)
}

pub fn set_initialized(env: &Env) {
    env.storage().instance().set(&DataKey::Initialized, &true);
}

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Paused)
        .unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&DataKey::Paused, &paused);
}

pub fn has_role(env: &Env, account: &Address, role: Role) -> bool {
    let key = DataKey::Role(role, account.clone());
    env.storage().persistent().get(&key).unwrap_or(false)
}

pub fn set_role(env: &Env, account: &Address, role: Role) {
    let key = DataKey::Role(role, account.clone());
    env.storage().persistent().set(&key, &true);
    bump_persistent(env, &key);
}

pub fn remove_role(env: &Env, account: &Address, role: Role) {
    env.storage()
        .persistent()
        .remove(&DataKey::Role(role, account.clone()));
}

pub fn is_kyc_approved(env: &Env, user: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Kyc(user.clone()))
        .unwrap_or(false)
}

pub fn set_kyc(env: &Env, user: &Address, approved: bool) {
    let key = DataKey::Kyc(user.clone());
    env.storage().persistent().set(&key, &approved);
    bump_persistent(env, &key);
}

pub fn is_blacklisted(env: &Env, user: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Blacklisted(user.clone()))
        .unwrap_or(false)
}

pub fn set_blacklisted(env: &Env, user: &Address, blacklisted: bool) {
    let key = DataKey::Blacklisted(user.clone());
    env.storage().persistent().set(&key, &blacklisted);
    bump_persistent(env, &key);
}
