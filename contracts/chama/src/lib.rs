#![no_std]

use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, String, Vec};

mod admin;
mod cycle;
mod errors;
mod membership;
mod policy;
mod registry;
mod storage;
mod types;

pub use errors::ContractError;
pub use types::*;

#[contract]
pub struct ChamaContract;

#[contractimpl]
impl ChamaContract {
    /// Initialize the platform with an owner and the platform policy.
    pub fn __constructor(env: Env, owner: Address, policy: PlatformPolicy) {
        registry::init(&env, &owner, &policy);
    }

    // ─── Registry / Factory ─────────────────────────────────────────

    /// Create a new chama group. The creator pays the platform creation fee
    /// and becomes the group's first member, holding the Admin and
    /// Treasurer roles.
    pub fn create_group(
        env: Env,
        creator: Address,
        creator_name: String,
        config: GroupConfig,
        paid_fee: i128,
    ) -> Result<u64, ContractError> {
        registry::create_group(&env, creator, creator_name, config, paid_fee)
    }

    /// Allow an account to create groups. Platform owner only.
    pub fn approve_creator(
        env: Env,
        caller: Address,
        account: Address,
    ) -> Result<(), ContractError> {
        registry::approve_creator(&env, caller, account)
    }

    /// Remove an account from the creator allow-list. Platform owner only.
    pub fn revoke_creator(
        env: Env,
        caller: Address,
        account: Address,
    ) -> Result<(), ContractError> {
        registry::revoke_creator(&env, caller, account)
    }

    /// Approve a group created under a require-approval policy.
    pub fn approve_group(env: Env, caller: Address, group_id: u64) -> Result<(), ContractError> {
        registry::approve_group(&env, caller, group_id)
    }

    /// Soft-deactivate a group at the registry level.
    pub fn deactivate_group(env: Env, caller: Address, group_id: u64) -> Result<(), ContractError> {
        registry::deactivate_group(&env, caller, group_id)
    }

    /// Page through active and approved groups in ascending creation order.
    pub fn get_active_groups(
        env: Env,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<GroupRecord>, ContractError> {
        registry::get_active_groups(&env, offset, limit)
    }

    /// Replace the platform policy. Platform owner only; existing groups
    /// keep the fee rate stamped at their creation.
    pub fn update_platform_policy(
        env: Env,
        caller: Address,
        policy: PlatformPolicy,
    ) -> Result<(), ContractError> {
        registry::update_platform_policy(&env, caller, policy)
    }

    /// Get the current platform policy.
    pub fn get_platform_policy(env: Env) -> PlatformPolicy {
        storage::get_policy(&env)
    }

    /// Get aggregate group counters.
    pub fn get_platform_stats(env: Env) -> PlatformStats {
        registry::get_platform_stats(&env)
    }

    // ─── Membership & Roles ─────────────────────────────────────────

    /// Add a member to a group. Group admin only. A removed member can
    /// never be re-added; rotation slots are issued once.
    pub fn add_member(
        env: Env,
        caller: Address,
        group_id: u64,
        account: Address,
        name: String,
        kyc_verified: bool,
    ) -> Result<(), ContractError> {
        membership::add_member(&env, caller, group_id, account, name, kyc_verified)
    }

    /// Soft-remove a member. Their rotation slot remains as a hole.
    pub fn remove_member(
        env: Env,
        caller: Address,
        group_id: u64,
        account: Address,
    ) -> Result<(), ContractError> {
        membership::remove_member(&env, caller, group_id, account)
    }

    /// Grant Admin, Treasurer or Secretary to a member. Group admin only.
    pub fn assign_role(
        env: Env,
        caller: Address,
        group_id: u64,
        account: Address,
        role: Role,
    ) -> Result<(), ContractError> {
        membership::assign_role(&env, caller, group_id, account, role)
    }

    /// Take a role back from a member. Group admin only.
    pub fn revoke_role(
        env: Env,
        caller: Address,
        group_id: u64,
        account: Address,
        role: Role,
    ) -> Result<(), ContractError> {
        membership::revoke_role(&env, caller, group_id, account, role)
    }

    // ─── Rotation Cycles ────────────────────────────────────────────

    /// Open the next cycle. Treasurer or admin; the previous cycle must be
    /// completed first.
    pub fn start_new_cycle(env: Env, caller: Address, group_id: u64) -> Result<u32, ContractError> {
        cycle::start_new_cycle(&env, caller, group_id)
    }

    /// Contribute to the group's open cycle. Past the deadline plus grace
    /// period the required amount grows by the late fee.
    pub fn contribute(
        env: Env,
        caller: Address,
        group_id: u64,
        amount: i128,
    ) -> Result<(), ContractError> {
        cycle::contribute(&env, caller, group_id, amount)
    }

    /// Settle a completed cycle: payout to the recipient, platform fee to
    /// the treasury. Treasurer or admin.
    pub fn process_payout(
        env: Env,
        caller: Address,
        group_id: u64,
        cycle_number: u32,
    ) -> Result<(), ContractError> {
        cycle::process_payout(&env, caller, group_id, cycle_number)
    }

    // ─── Group Admin / Emergency ────────────────────────────────────

    /// Pause a group; member and cycle operations reject until unpaused.
    pub fn pause_group(env: Env, caller: Address, group_id: u64) -> Result<(), ContractError> {
        admin::pause_group(&env, caller, group_id)
    }

    /// Resume a paused group.
    pub fn unpause_group(env: Env, caller: Address, group_id: u64) -> Result<(), ContractError> {
        admin::unpause_group(&env, caller, group_id)
    }

    /// Update a group's configuration. Group admin only.
    pub fn update_group_config(
        env: Env,
        caller: Address,
        group_id: u64,
        new_config: GroupConfig,
    ) -> Result<(), ContractError> {
        admin::update_group_config(&env, caller, group_id, new_config)
    }

    /// Drain the group's held balance to the calling admin. Bypasses cycle
    /// accounting; see the group statistics afterward with that in mind.
    pub fn emergency_withdraw(
        env: Env,
        caller: Address,
        group_id: u64,
    ) -> Result<i128, ContractError> {
        admin::emergency_withdraw(&env, caller, group_id)
    }

    // ─── Reads ──────────────────────────────────────────────────────

    /// Get a group's registry record.
    pub fn get_group(env: Env, group_id: u64) -> Result<GroupRecord, ContractError> {
        storage::get_group(&env, group_id).ok_or(ContractError::GroupNotFound)
    }

    /// Get a group's configuration.
    pub fn get_group_config(env: Env, group_id: u64) -> Result<GroupConfig, ContractError> {
        storage::get_config(&env, group_id).ok_or(ContractError::GroupNotFound)
    }

    /// Get a group's running state and lifetime totals.
    pub fn get_group_stats(env: Env, group_id: u64) -> Result<GroupState, ContractError> {
        storage::get_state(&env, group_id).ok_or(ContractError::GroupNotFound)
    }

    /// Get one member's record, removed members included.
    pub fn get_member(
        env: Env,
        group_id: u64,
        account: Address,
    ) -> Result<Member, ContractError> {
        storage::get_group(&env, group_id).ok_or(ContractError::GroupNotFound)?;
        storage::get_member(&env, group_id, &account).ok_or(ContractError::NotAMember)
    }

    /// Full member roster in rotation order, holes included.
    pub fn get_members(env: Env, group_id: u64) -> Result<Vec<Member>, ContractError> {
        membership::get_members(&env, group_id)
    }

    /// Get one cycle's record.
    pub fn get_cycle(env: Env, group_id: u64, number: u32) -> Result<Cycle, ContractError> {
        cycle::get_cycle(&env, group_id, number)
    }

    /// Whether an account has a recorded contribution for a cycle.
    pub fn has_contributed(
        env: Env,
        group_id: u64,
        number: u32,
        account: Address,
    ) -> Result<bool, ContractError> {
        cycle::has_contributed(&env, group_id, number, account)
    }

    /// Recipient of the group's current cycle.
    pub fn get_current_recipient(env: Env, group_id: u64) -> Result<Address, ContractError> {
        cycle::get_current_recipient(&env, group_id)
    }
}
