use soroban_sdk::{symbol_short, Symbol};

// Access control
pub const ROLE_GRANTED: Symbol = symbol_short!("role_gnt");
pub const ROLE_REVOKED: Symbol = symbol_short!("role_rvk");
pub const KYC_APPROVED: Symbol = symbol_short!("kyc_ok");
pub const KYC_REVERTED: Symbol = symbol_short!("kyc_rvt");
pub const USER_BLACKLISTED: Symbol = symbol_short!("blacklist");
pub const USER_UNBLACKLISTED: Symbol = symbol_short!("unblist");
pub const PAUSED: Symbol = symbol_short!("paused");
pub const UNPAUSED: Symbol = symbol_short!("unpaused");

// Share token
pub const REVENUE_DISTRIBUTED: Symbol = symbol_short!("rev_dist");
pub const DIVIDENDS_CLAIMED: Symbol = symbol_short!("div_clm");

// Issuance factory
pub const PROPERTY_CREATED: Symbol = symbol_short!("prop_new");
pub const PROPERTY_APPROVED: Symbol = symbol_short!("prop_apr");
pub const PROPERTY_CANCELLED: Symbol = symbol_short!("prop_cxl");
pub const RAISE_EXTENDED: Symbol = symbol_short!("raise_ext");
pub const NEW_INVESTMENT: Symbol = symbol_short!("invest");
pub const FUNDS_RECOVERED: Symbol = symbol_short!("recover");
pub const OWNER_PAYOUT: Symbol = symbol_short!("own_pay");
pub const TOKEN_WHITELISTED: Symbol = symbol_short!("tok_wl");
pub const TOKEN_UNWHITELISTED: Symbol = symbol_short!("tok_unwl");
pub const NEW_OWNERS_FEE: Symbol = symbol_short!("own_fee");
pub const NEW_PLATFORM_FEE: Symbol = symbol_short!("plat_fee");
pub const NEW_TREASURY: Symbol = symbol_short!("treasury");
pub const NEW_MIN_INVESTMENT: Symbol = symbol_short!("min_inv");
pub const NEW_MAX_REFERRALS: Symbol = symbol_short!("max_refs");
pub const NEW_MAX_REF_REVENUE: Symbol = symbol_short!("max_rrev");
pub const NEW_REFERRAL_CTR: Symbol = symbol_short!("ref_ctr");
pub const NEW_ISSUANCE_CTR: Symbol = symbol_short!("iss_ctr");

// Referral ledger
pub const REWARDS_ADDED: Symbol = symbol_short!("ref_add");
pub const GLOBAL_REWARDS_ADDED: Symbol = symbol_short!("gref_add");
pub const REWARDS_CLAIMED: Symbol = symbol_short!("ref_clm");
pub const GLOBAL_REWARDS_CLAIMED: Symbol = symbol_short!("gref_clm");
pub const CALLER_APPROVED: Symbol = symbol_short!("ctr_add");
pub const CALLER_REMOVED: Symbol = symbol_short!("ctr_rm");
pub const NEW_REWARD_TOKEN: Symbol = symbol_short!("rwd_tok");
pub const NEW_ACCESS_CONTROL: Symbol = symbol_short!("acc_ctr");
pub const NEW_TOKEN_FACTORY: Symbol = symbol_short!("tok_fac");
