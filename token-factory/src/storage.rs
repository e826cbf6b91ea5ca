use shared::errors::Error;
use shared::types::Property;
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
    /// Access-control contract (Instance).
    AccessControl,
    /// Platform fee sink (Instance).
    Treasury,
    /// Fee charged on every purchase, in bps (Instance).
    PlatformFeeBps,
    /// Upper bound for per-property owner fees, in bps (Instance).
    OwnerFeeCeilingBps,
    /// Referral commission share of every purchase, in bps (Instance).
    ReferralFeeBps,
    /// Minimum payment per purchase (Instance).
    MinInvAmount,
    /// Cap on distinct per-property referral entries (Instance).
    MaxReferrals,
    /// Lifetime referral revenue cap per referrer (Instance).
    MaxRefRev,
    /// Referral ledger address, set post-deployment (Instance).
    ReferralCtr,
    /// Issuance helper address, set post-deployment (Instance).
    IssuanceCtr,
    /// Sequential property id counter (Instance).
    PropertyCounter,
    /// Property record keyed by id (Persistent).
    Property(u64),
    /// Principal pulled from an investor for a property (Persistent).
    Invested(u64, Address),
    /// Payment-asset whitelist (Persistent).
    Whitelisted(Address),
}

fn bump(env: &Env, key: &DataKey) {
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

pub fn read_access_control(env: &Env) -> Address {
    env.storage().instance().get(&DataKey::AccessControl).unwrap()
}

pub fn write_access_control(env: &Env, access: &Address) {
    env.storage().instance().set(&DataKey::AccessControl, access);
}

pub fn read_treasury(env: &Env) -> Address {
    env.storage().instance().get(&DataKey::Treasury).unwrap()
}

pub fn write_treasury(env: &Env, treasury: &Address) {
    env.storage().instance().set(&DataKey::Treasury, treasury);
}

pub fn read_platform_fee_bps(env: &Env) -> u32 {
    env.storage().instance().get(&DataKey::PlatformFeeBps).unwrap()
}

pub fn write_platform_fee_bps(env: &Env, fee: u32) {
    env.storage().instance().set(&DataKey::PlatformFeeBps, &fee);
}

pub fn read_owner_fee_ceiling_bps(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::OwnerFeeCeilingBps)
        .unwrap()
}

pub fn write_owner_fee_ceiling_bps(env: &Env, fee: u32) {
    env.storage().instance().set(&DataKey::OwnerFeeCeilingBps, &fee);
}

pub fn read_referral_fee_bps(env: &Env) -> u32 {
    env.storage().instance().get(&DataKey::ReferralFeeBps).unwrap()
}

pub fn write_referral_fee_bps(env: &Env, fee: u32) {
    env.storage().instance().set(&DataKey::ReferralFeeBps, &fee);
}

pub fn read_min_inv_amount(env: &Env) -> i128 {
    env.storage().instance().get(&DataKey::MinInvAmount).unwrap()
}

pub fn write_min_inv_amount(env: &Env, amount: i128) {
    env.storage().instance().set(&DataKey::MinInvAmount, &amount);
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

pub fn read_referral_ctr(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::ReferralCtr)
}

pub fn write_referral_ctr(env: &Env, referral: &Address) {
    env.storage().instance().set(&DataKey::ReferralCtr, referral);
}

pub fn read_issuance_ctr(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::IssuanceCtr)
}

pub fn write_issuance_ctr(env: &Env, issuance: &Address) {
    env.storage().instance().set(&DataKey::IssuanceCtr, issuance);
}

pub fn read_property_counter(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::PropertyCounter)
        .unwrap_or(0)
}

/// Allocate the next property id (pre-increment value).
pub fn next_property_id(env: &Env) -> u64 {
    let id = read_property_counter(env);
    env.storage()
        .instance()
        .set(&DataKey::PropertyCounter, &(id + 1));
    id
}

pub fn get_property(env: &Env, id: u64) -> Result<Property, Error> {
    let key = DataKey::Property(id);
    env.storage()
        .persistent()
        .get::<DataKey, Property>(&key)
        .ok_or(Error::IdMustBeValid)
}

pub fn set_property(env: &Env, property: &Property) {
    let key = DataKey::Property(property.id);
    env.storage().persistent().set(&key, property);
    bump(env, &key);
}

pub fn read_invested(env: &Env, id: u64, user: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Invested(id, user.clone()))
        .unwrap_or(0)
}

pub fn write_invested(env: &Env, id: u64, user: &Address, amount: i128) {
    let key = DataKey::Invested(id, user.clone());
    env.storage().persistent().set(&key, &amount);
    bump(env, &key);
}

pub fn is_whitelisted(env: &Env, asset: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Whitelisted(asset.clone()))
        .unwrap_or(false)
}

pub fn set_whitelisted(env: &Env, asset: &Address, whitelisted: bool) {
    let key = DataKey::Whitelisted(asset.clone());
    env.storage().persistent().set(&key, &whitelisted);
    bump(env, &key);
}
