use soroban_sdk::{contracttype, Address};

/// Platform roles. A closed set: the registry never stores anything outside
/// this enum, so role checks are exhaustive at compile time.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    Admin,
    BlacklistManager,
    KycManager,
    PauserManager,
    FundsManager,
}

/// A tokenized property and the state of its fundraising round.
///
/// `deadline` is zero until the property is approved; approval fixes it and
/// only `extend_raise_for_property` may move it, forward only. `funds_raised`
/// counts payment-asset units pulled from buyers and still in factory
/// custody (accrued fees are pushed out only on a successful conclusion, so
/// a failed raise can always refund every investor in full).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Property {
    pub id: u64,
    pub owner: Address,
    pub supply: i128,
    pub price: i128,
    pub owner_fee_bps: u32,
    pub payment_asset: Address,
    pub share_token: Address,
    pub deadline: u64,
    pub approved: bool,
    pub cancelled: bool,
    pub funds_raised: i128,
    pub shares_sold: i128,
    pub treasury_fees: i128,
    pub referral_fees: i128,
    pub owner_paid: bool,
}

impl Property {
    /// The raise has concluded: its deadline elapsed or every share sold.
    pub fn concluded(&self, now: u64) -> bool {
        self.approved && (now > self.deadline || self.fully_subscribed())
    }

    pub fn fully_subscribed(&self) -> bool {
        self.shares_sold == self.supply
    }

    /// Investors may pull their principal back: the property was cancelled,
    /// or its deadline passed without a full subscription.
    pub fn recoverable(&self, now: u64) -> bool {
        self.cancelled || (self.approved && now > self.deadline && !self.fully_subscribed())
    }

    /// The raise ended fully subscribed and was not cancelled.
    pub fn successful(&self) -> bool {
        self.approved && !self.cancelled && self.fully_subscribed()
    }
}
