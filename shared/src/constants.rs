/// Fee denominator: 10_000 basis points = 100%.
pub const BASIS_POINTS: i128 = 10_000;

/// Fixed-point scale of the dividend-per-share accumulator. Chosen so the
/// accumulator stays non-zero for distributions as small as the configured
/// revenue minimum against share supplies up to 10^9.
pub const SCALE: i128 = 100_000_000_000_000;

/// Minimum distance between approval time and the raise deadline, in seconds.
pub const MIN_RAISE_WINDOW: u64 = 86_400;

/// Revenue distributions must exceed this amount of the payment asset.
pub const MIN_REVENUE_AMOUNT: i128 = 10_000;

/// Ceiling for the platform fee taken on every purchase.
pub const MAX_PLATFORM_FEE_BPS: u32 = 5_000;

/// Default cap on distinct per-property referral entries per referrer.
pub const DEFAULT_MAX_REFERRALS: u32 = 20;

/// Default lifetime cap on commissions credited to a single referrer.
pub const DEFAULT_MAX_REF_REVENUE: i128 = 10_000_000_000;
