use soroban_sdk::{contracttype, Address, Map, String, Vec};

/// Roles a member may hold inside a group. Roles are additive; one account
/// can hold several at once.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub enum Role {
    Admin,     // Membership, roles, configuration, emergency actions
    Treasurer, // Cycle lifecycle and payout execution
    Secretary, // Record-keeping; no enforced capability beyond the tag
    Member,    // May contribute; granted by membership itself
}

/// How a late contribution's fee is computed.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub enum LateFeeModel {
    Flat,          // Full late fee once past due, independent of how late
    DailyProrated, // Fee scales with days late over a 30-day baseline
}

/// Platform-wide policy, owned by the registry owner. Groups snapshot the
/// platform fee rate at creation time rather than reading this live.
#[contracttype]
#[derive(Clone, Debug)]
pub struct PlatformPolicy {
    pub creation_fee: i128,
    pub min_members: u32,
    pub max_members: u32,
    pub platform_fee_bps: u32,
    pub treasury: Address,
    pub token: Address,
    pub require_approval: bool,
}

/// Aggregate registry counters.
#[contracttype]
#[derive(Clone, Debug)]
pub struct PlatformStats {
    pub total_groups: u64,
    pub active_groups: u64,
}

/// Registry-owned record of a created group. Never deleted; `active` is
/// soft-cleared by `deactivate_group`.
#[contracttype]
#[derive(Clone, Debug)]
pub struct GroupRecord {
    pub id: u64,
    pub creator: Address,
    pub created_at: u64,
    pub member_count: u32,
    pub active: bool,
    pub approved: bool,
}

/// Per-group configuration. `platform_fee_bps` is stamped from the platform
/// policy at creation and is immutable afterward.
#[contracttype]
#[derive(Clone, Debug)]
pub struct GroupConfig {
    pub name: String,
    pub description: String,
    pub contribution_amount: i128,
    pub contribution_period: u64,
    pub max_members: u32,
    pub late_fee_bps: u32,
    pub late_fee_model: LateFeeModel,
    pub grace_period: u64,
    pub platform_fee_bps: u32,
    pub is_active: bool,
    pub requires_kyc: bool,
}

/// One member record. Removal flips `active` but keeps the record and its
/// rotation slot, so rotation order and history never shift.
#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct Member {
    pub account: Address,
    pub name: String,
    pub joined_at: u64,
    pub rotation_order: u32,
    pub active: bool,
    pub kyc_verified: bool,
    pub roles: Vec<Role>,
    pub contributions_made: u32,
    pub missed_payments: u32,
    pub total_contributed: i128,
    pub performance_score: u32,
}

/// A single member's contribution within one cycle.
#[contracttype]
#[derive(Clone, Debug)]
pub struct ContributionRecord {
    pub amount: i128,
    pub timestamp: u64,
}

/// One rotation cycle. The recipient is fixed at cycle start; `completed`
/// flips once every active member has contributed, `paid_out` once the
/// payout and platform fee transfers have both settled.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Cycle {
    pub number: u32,
    pub recipient: Address,
    pub start: u64,
    pub end: u64,
    pub total_amount: i128,
    pub payout_amount: i128,
    pub platform_fee: i128,
    pub completed: bool,
    pub paid_out: bool,
    pub contributions: Map<Address, ContributionRecord>,
}

/// Per-group running state. `balance` tracks the tokens the contract holds
/// on this group's behalf and is debited before any outbound transfer.
#[contracttype]
#[derive(Clone, Debug)]
pub struct GroupState {
    pub current_cycle: u32,
    pub members_ever: u32,
    pub active_members: u32,
    pub total_contributions: i128,
    pub total_payouts: i128,
    pub balance: i128,
    pub paused: bool,
}

/// Storage keys for all contract data.
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Owner,                    // Platform owner address
    Policy,                   // PlatformPolicy
    GroupCounter,             // Total groups ever created
    ActiveGroups,             // Count of records still flagged active
    ApprovedCreator(Address), // Creator allow-list flag
    Group(u64),               // Group ID -> GroupRecord
    Config(u64),              // Group ID -> GroupConfig
    State(u64),               // Group ID -> GroupState
    MemberList(u64),          // Group ID -> Vec<Address> in rotation order
    Member(u64, Address),     // (Group ID, account) -> Member
    Cycle(u64, u32),          // (Group ID, cycle number) -> Cycle
}
