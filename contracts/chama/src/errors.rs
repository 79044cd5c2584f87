use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    NotAuthorized = 1,
    GroupNotFound = 2,
    GroupNotActive = 3,
    GroupPaused = 4,
    GroupNotPaused = 5,
    AlreadyMember = 6,
    NotAMember = 7,
    GroupFull = 8,
    KycRequired = 9,
    InvalidRole = 10,
    TooFewMembers = 11,
    NoEligibleRecipient = 12,
    CycleNotCompleted = 13,
    NoActiveCycle = 14,
    AlreadyContributed = 15,
    AlreadyPaidOut = 16,
    InsufficientAmount = 17,
    InsufficientFee = 18,
    SizeOutOfRange = 19,
    EmptyName = 20,
    InvalidLimit = 21,
    NotApprovedCreator = 22,
    AlreadyApproved = 23,
    NotApproved = 24,
    InvalidAmount = 25,
    InvalidPolicy = 26,
}
