use soroban_sdk::{Address, Env};

use crate::errors::ContractError;
use crate::membership;
use crate::storage;
use crate::types::{GroupConfig, Role};

const BPS_MAX: u32 = 10_000;

pub fn pause_group(env: &Env, caller: Address, group_id: u64) -> Result<(), ContractError> {
    caller.require_auth();

    let mut state = storage::get_state(env, group_id).ok_or(ContractError::GroupNotFound)?;
    membership::require_role(env, group_id, &caller, &Role::Admin)?;

    if state.paused {
        return Err(ContractError::GroupPaused);
    }
    state.paused = true;
    storage::set_state(env, group_id, &state);

    env.events()
        .publish((crate::symbol_short!("grp_paus"),), group_id);

    Ok(())
}

pub fn unpause_group(env: &Env, caller: Address, group_id: u64) -> Result<(), ContractError> {
    caller.require_auth();

    let mut state = storage::get_state(env, group_id).ok_or(ContractError::GroupNotFound)?;
    membership::require_role(env, group_id, &caller, &Role::Admin)?;

    if !state.paused {
        return Err(ContractError::GroupNotPaused);
    }
    state.paused = false;
    storage::set_state(env, group_id, &state);

    env.events()
        .publish((crate::symbol_short!("grp_resm"),), group_id);

    Ok(())
}

/// Admin-side config edit. The platform fee rate was stamped at creation
/// and stays as it was; capacity can never drop below the members already
/// added, so rotation slots stay valid.
pub fn update_group_config(
    env: &Env,
    caller: Address,
    group_id: u64,
    new_config: GroupConfig,
) -> Result<(), ContractError> {
    caller.require_auth();

    let current = storage::get_config(env, group_id).ok_or(ContractError::GroupNotFound)?;
    let state = storage::get_state(env, group_id).ok_or(ContractError::GroupNotFound)?;
    membership::require_role(env, group_id, &caller, &Role::Admin)?;

    if crate::registry::is_blank_name(&new_config.name) {
        return Err(ContractError::EmptyName);
    }
    if new_config.contribution_amount <= 0
        || new_config.contribution_period == 0
        || new_config.late_fee_bps > BPS_MAX
    {
        return Err(ContractError::InvalidAmount);
    }
    let policy = storage::get_policy(env);
    if new_config.max_members < state.members_ever
        || new_config.max_members < policy.min_members
        || new_config.max_members > policy.max_members
    {
        return Err(ContractError::SizeOutOfRange);
    }

    let mut new_config = new_config;
    new_config.platform_fee_bps = current.platform_fee_bps;
    storage::set_config(env, group_id, &new_config);

    env.events()
        .publish((crate::symbol_short!("cfg_upd"),), group_id);

    Ok(())
}

/// Last-resort escape hatch: drains the group's tracked balance to the
/// calling admin. Lifetime contribution/payout totals are intentionally
/// left as they were, so statistics diverge from holdings afterward.
pub fn emergency_withdraw(env: &Env, caller: Address, group_id: u64) -> Result<i128, ContractError> {
    caller.require_auth();

    let mut state = storage::get_state(env, group_id).ok_or(ContractError::GroupNotFound)?;
    membership::require_role(env, group_id, &caller, &Role::Admin)?;

    let amount = state.balance;
    state.balance = 0;
    storage::set_state(env, group_id, &state);

    if amount > 0 {
        let policy = storage::get_policy(env);
        let token_client = soroban_sdk::token::Client::new(env, &policy.token);
        token_client.transfer(&env.current_contract_address(), &caller, &amount);
    }

    env.events()
        .publish((crate::symbol_short!("emergenc"),), (group_id, caller, amount));

    Ok(amount)
}
