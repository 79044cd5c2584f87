use soroban_sdk::{Address, Env, String, Vec};

use crate::errors::ContractError;
use crate::policy;
use crate::storage;
use crate::types::{GroupConfig, GroupRecord, GroupState, Member, Role};

pub fn has_role(member: &Member, role: &Role) -> bool {
    member.roles.iter().any(|r| r == *role)
}

/// Look up an active member or fail with `NotAMember`.
pub fn require_member(
    env: &Env,
    group_id: u64,
    account: &Address,
) -> Result<Member, ContractError> {
    let member = storage::get_member(env, group_id, account).ok_or(ContractError::NotAMember)?;
    if !member.active {
        return Err(ContractError::NotAMember);
    }
    Ok(member)
}

/// Look up an active member and check a role before any state is touched.
pub fn require_role(
    env: &Env,
    group_id: u64,
    account: &Address,
    role: &Role,
) -> Result<Member, ContractError> {
    let member = require_member(env, group_id, account)?;
    if !has_role(&member, role) {
        return Err(ContractError::NotAuthorized);
    }
    Ok(member)
}

/// Cycle lifecycle operations accept either the Treasurer or an Admin.
pub fn require_admin_or_treasurer(
    env: &Env,
    group_id: u64,
    account: &Address,
) -> Result<Member, ContractError> {
    let member = require_member(env, group_id, account)?;
    if !has_role(&member, &Role::Admin) && !has_role(&member, &Role::Treasurer) {
        return Err(ContractError::NotAuthorized);
    }
    Ok(member)
}

/// Fetch a group's record, config and state, rejecting deactivated or
/// paused groups. Every mutating member/cycle operation goes through this.
pub fn live_group(
    env: &Env,
    group_id: u64,
) -> Result<(GroupRecord, GroupConfig, GroupState), ContractError> {
    let record = storage::get_group(env, group_id).ok_or(ContractError::GroupNotFound)?;
    let config = storage::get_config(env, group_id).ok_or(ContractError::GroupNotFound)?;
    let state = storage::get_state(env, group_id).ok_or(ContractError::GroupNotFound)?;

    if !record.active || !config.is_active {
        return Err(ContractError::GroupNotActive);
    }
    if state.paused {
        return Err(ContractError::GroupPaused);
    }
    Ok((record, config, state))
}

/// Build the founding member record: rotation slot 1, full score, every
/// operating role so a lone founder can run the group.
pub fn seed_creator(env: &Env, group_id: u64, creator: &Address, name: String) {
    let mut roles = Vec::new(env);
    roles.push_back(Role::Admin);
    roles.push_back(Role::Treasurer);
    roles.push_back(Role::Member);

    let member = Member {
        account: creator.clone(),
        name,
        joined_at: env.ledger().timestamp(),
        rotation_order: 1,
        active: true,
        kyc_verified: true,
        roles,
        contributions_made: 0,
        missed_payments: 0,
        total_contributed: 0,
        performance_score: policy::SCORE_MAX,
    };
    storage::set_member(env, group_id, &member);
    storage::push_member(env, group_id, creator);
}

/// Full roster in rotation order, removed members included.
pub fn get_members(env: &Env, group_id: u64) -> Result<Vec<Member>, ContractError> {
    storage::get_group(env, group_id).ok_or(ContractError::GroupNotFound)?;

    let mut members = Vec::new(env);
    for account in storage::get_member_list(env, group_id).iter() {
        if let Some(member) = storage::get_member(env, group_id, &account) {
            members.push_back(member);
        }
    }
    Ok(members)
}

pub fn add_member(
    env: &Env,
    caller: Address,
    group_id: u64,
    account: Address,
    name: String,
    kyc_verified: bool,
) -> Result<(), ContractError> {
    caller.require_auth();

    let (mut record, config, mut state) = live_group(env, group_id)?;
    require_role(env, group_id, &caller, &Role::Admin)?;

    // Ever-added accounts stay in the arena, so re-adding a removed member
    // is rejected here too; rotation slots are never reissued.
    if storage::get_member(env, group_id, &account).is_some() {
        return Err(ContractError::AlreadyMember);
    }
    if state.members_ever >= config.max_members {
        return Err(ContractError::GroupFull);
    }
    if config.requires_kyc && !kyc_verified {
        return Err(ContractError::KycRequired);
    }

    let mut roles = Vec::new(env);
    roles.push_back(Role::Member);

    let member = Member {
        account: account.clone(),
        name,
        joined_at: env.ledger().timestamp(),
        rotation_order: state.members_ever + 1,
        active: true,
        kyc_verified,
        roles,
        contributions_made: 0,
        missed_payments: 0,
        total_contributed: 0,
        performance_score: policy::SCORE_MAX,
    };
    storage::set_member(env, group_id, &member);
    storage::push_member(env, group_id, &account);

    state.members_ever += 1;
    state.active_members += 1;
    storage::set_state(env, group_id, &state);

    record.member_count += 1;
    storage::set_group(env, &record);

    env.events().publish(
        (crate::symbol_short!("mem_add"),),
        (group_id, account, member.rotation_order),
    );

    Ok(())
}

pub fn remove_member(
    env: &Env,
    caller: Address,
    group_id: u64,
    account: Address,
) -> Result<(), ContractError> {
    caller.require_auth();

    let (mut record, _config, mut state) = live_group(env, group_id)?;
    require_role(env, group_id, &caller, &Role::Admin)?;

    let mut member = require_member(env, group_id, &account)?;

    // Soft removal: the rotation slot stays as a hole that cycle recipient
    // scans skip over.
    member.active = false;
    member.roles = Vec::new(env);
    storage::set_member(env, group_id, &member);

    state.active_members -= 1;
    storage::set_state(env, group_id, &state);

    record.member_count -= 1;
    storage::set_group(env, &record);

    // The removed member may have been the only one still owing this
    // cycle; the completion count must be re-taken against the smaller
    // active set or the cycle can never close.
    crate::cycle::reevaluate_completion(env, group_id, &state);

    env.events()
        .publish((crate::symbol_short!("mem_rem"),), (group_id, account));

    Ok(())
}

pub fn assign_role(
    env: &Env,
    caller: Address,
    group_id: u64,
    account: Address,
    role: Role,
) -> Result<(), ContractError> {
    caller.require_auth();

    live_group(env, group_id)?;
    require_role(env, group_id, &caller, &Role::Admin)?;

    // Member is granted by membership itself, never assigned.
    if role == Role::Member {
        return Err(ContractError::InvalidRole);
    }

    let mut member = require_member(env, group_id, &account)?;
    if !has_role(&member, &role) {
        member.roles.push_back(role.clone());
        storage::set_member(env, group_id, &member);
    }

    env.events()
        .publish((crate::symbol_short!("role_add"),), (group_id, account, role));

    Ok(())
}

pub fn revoke_role(
    env: &Env,
    caller: Address,
    group_id: u64,
    account: Address,
    role: Role,
) -> Result<(), ContractError> {
    caller.require_auth();

    live_group(env, group_id)?;
    require_role(env, group_id, &caller, &Role::Admin)?;

    if role == Role::Member {
        return Err(ContractError::InvalidRole);
    }

    let mut member = require_member(env, group_id, &account)?;
    let mut kept = Vec::new(env);
    for r in member.roles.iter() {
        if r != role {
            kept.push_back(r);
        }
    }
    member.roles = kept;
    storage::set_member(env, group_id, &member);

    env.events()
        .publish((crate::symbol_short!("role_rem"),), (group_id, account, role));

    Ok(())
}
