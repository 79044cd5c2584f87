use soroban_sdk::{Address, Env, String, Vec};

use crate::errors::ContractError;
use crate::membership;
use crate::storage;
use crate::types::{GroupConfig, GroupRecord, GroupState, PlatformPolicy, PlatformStats};

pub const MAX_PAGE_LIMIT: u32 = 100;
const BPS_MAX: u32 = 10_000;
const MAX_NAME_CHECK_LEN: usize = 256;

/// Empty or whitespace-only. Names longer than the check buffer cannot be
/// all-whitespace in any reasonable sense and pass.
pub fn is_blank_name(name: &String) -> bool {
    let len = name.len() as usize;
    if len == 0 {
        return true;
    }
    if len > MAX_NAME_CHECK_LEN {
        return false;
    }
    let mut buf = [0u8; MAX_NAME_CHECK_LEN];
    name.copy_into_slice(&mut buf[..len]);
    buf[..len]
        .iter()
        .all(|&b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
}

fn validate_policy(policy: &PlatformPolicy) -> Result<(), ContractError> {
    if policy.min_members < 2
        || policy.min_members > policy.max_members
        || policy.platform_fee_bps > BPS_MAX
        || policy.creation_fee < 0
    {
        return Err(ContractError::InvalidPolicy);
    }
    Ok(())
}

pub fn init(env: &Env, owner: &Address, policy: &PlatformPolicy) {
    if storage::has_owner(env) {
        panic!("already initialized");
    }
    if validate_policy(policy).is_err() {
        panic!("invalid platform policy");
    }
    storage::set_owner(env, owner);
    storage::set_policy(env, policy);
}

fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
    caller.require_auth();
    if *caller != storage::get_owner(env) {
        return Err(ContractError::NotAuthorized);
    }
    Ok(())
}

pub fn create_group(
    env: &Env,
    creator: Address,
    creator_name: String,
    config: GroupConfig,
    paid_fee: i128,
) -> Result<u64, ContractError> {
    creator.require_auth();

    let policy = storage::get_policy(env);

    if paid_fee < policy.creation_fee {
        return Err(ContractError::InsufficientFee);
    }
    if config.max_members < policy.min_members || config.max_members > policy.max_members {
        return Err(ContractError::SizeOutOfRange);
    }
    if is_blank_name(&config.name) {
        return Err(ContractError::EmptyName);
    }
    if creator != storage::get_owner(env) && !storage::is_approved_creator(env, &creator) {
        return Err(ContractError::NotApprovedCreator);
    }
    if config.contribution_amount <= 0
        || config.contribution_period == 0
        || config.late_fee_bps > BPS_MAX
    {
        return Err(ContractError::InvalidAmount);
    }

    let group_id = storage::get_group_counter(env) + 1;
    storage::set_group_counter(env, group_id);

    // The group keeps the fee rate in force at creation; later policy
    // updates do not reach into existing groups.
    let mut config = config;
    config.platform_fee_bps = policy.platform_fee_bps;
    config.is_active = true;
    storage::set_config(env, group_id, &config);

    let record = GroupRecord {
        id: group_id,
        creator: creator.clone(),
        created_at: env.ledger().timestamp(),
        member_count: 1,
        active: true,
        approved: !policy.require_approval,
    };
    storage::set_group(env, &record);

    let state = GroupState {
        current_cycle: 0,
        members_ever: 1,
        active_members: 1,
        total_contributions: 0,
        total_payouts: 0,
        balance: 0,
        paused: false,
    };
    storage::set_state(env, group_id, &state);

    membership::seed_creator(env, group_id, &creator, creator_name);

    storage::set_active_groups(env, storage::get_active_groups(env) + 1);

    if paid_fee > 0 {
        let token_client = soroban_sdk::token::Client::new(env, &policy.token);
        token_client.transfer(&creator, &policy.treasury, &paid_fee);
    }

    env.events()
        .publish((crate::symbol_short!("grp_creat"),), (group_id, creator));

    Ok(group_id)
}

pub fn approve_creator(env: &Env, caller: Address, account: Address) -> Result<(), ContractError> {
    require_owner(env, &caller)?;

    if storage::is_approved_creator(env, &account) {
        return Err(ContractError::AlreadyApproved);
    }
    storage::set_approved_creator(env, &account, true);

    env.events()
        .publish((crate::symbol_short!("cr_appr"),), account);

    Ok(())
}

pub fn revoke_creator(env: &Env, caller: Address, account: Address) -> Result<(), ContractError> {
    require_owner(env, &caller)?;

    if !storage::is_approved_creator(env, &account) {
        return Err(ContractError::NotApproved);
    }
    storage::set_approved_creator(env, &account, false);

    env.events()
        .publish((crate::symbol_short!("cr_revk"),), account);

    Ok(())
}

pub fn approve_group(env: &Env, caller: Address, group_id: u64) -> Result<(), ContractError> {
    require_owner(env, &caller)?;

    let mut record = storage::get_group(env, group_id).ok_or(ContractError::GroupNotFound)?;
    if record.approved {
        return Err(ContractError::AlreadyApproved);
    }
    record.approved = true;
    storage::set_group(env, &record);

    env.events()
        .publish((crate::symbol_short!("grp_appr"),), group_id);

    Ok(())
}

pub fn deactivate_group(env: &Env, caller: Address, group_id: u64) -> Result<(), ContractError> {
    require_owner(env, &caller)?;

    let mut record = storage::get_group(env, group_id).ok_or(ContractError::GroupNotFound)?;
    if !record.active {
        return Err(ContractError::GroupNotActive);
    }
    record.active = false;
    storage::set_group(env, &record);
    storage::set_active_groups(env, storage::get_active_groups(env) - 1);

    env.events()
        .publish((crate::symbol_short!("grp_deac"),), group_id);

    Ok(())
}

/// Stable ascending-id page of active and approved group records. `offset`
/// counts matching records, not raw ids.
pub fn get_active_groups(
    env: &Env,
    offset: u32,
    limit: u32,
) -> Result<Vec<GroupRecord>, ContractError> {
    if limit == 0 || limit > MAX_PAGE_LIMIT {
        return Err(ContractError::InvalidLimit);
    }

    let total = storage::get_group_counter(env);
    let mut page = Vec::new(env);
    let mut skipped: u32 = 0;

    for id in 1..=total {
        if page.len() >= limit {
            break;
        }
        if let Some(record) = storage::get_group(env, id) {
            if record.active && record.approved {
                if skipped < offset {
                    skipped += 1;
                } else {
                    page.push_back(record);
                }
            }
        }
    }

    Ok(page)
}

pub fn update_platform_policy(
    env: &Env,
    caller: Address,
    policy: PlatformPolicy,
) -> Result<(), ContractError> {
    require_owner(env, &caller)?;
    validate_policy(&policy)?;
    storage::set_policy(env, &policy);

    env.events()
        .publish((crate::symbol_short!("pol_upd"),), caller);

    Ok(())
}

pub fn get_platform_stats(env: &Env) -> PlatformStats {
    PlatformStats {
        total_groups: storage::get_group_counter(env),
        active_groups: storage::get_active_groups(env),
    }
}
