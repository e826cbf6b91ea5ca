use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Error {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Overflow = 3,

    // Authorization
    NotAdminManager = 10,
    NotKycManager = 11,
    NotBlacklistManager = 12,
    NotPauserManager = 13,
    NotFundsManager = 14,
    NotApprovedCaller = 15,

    // Identity / registry state
    AlreadyKycApproved = 20,
    NotKycApproved = 21,
    AlreadyBlacklisted = 22,
    NotBlacklisted = 23,
    AlreadyPaused = 24,
    NotPaused = 25,
    Blacklisted = 26,
    RoleAlreadyGranted = 27,
    RoleNotGranted = 28,
    ContractPaused = 29,

    // Temporal
    TimeNotValid = 30,
    InvalidDeadline = 31,
    NotYetClaimable = 32,

    // Bounds
    FeeMustBeValid = 40,
    AmountTooLow = 41,
    NotEnoughShares = 42,
    RefRevenueCapExceeded = 43,
    TooManyReferrals = 44,
    SupplyZero = 45,

    // Reference validity
    IdMustBeValid = 50,
    TokenNotWhitelisted = 51,
    AlreadyApproved = 52,
    NothingToClaim = 53,
    InsufficientBalance = 54,
    InsufficientAllowance = 55,
}
