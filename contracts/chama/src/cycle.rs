use soroban_sdk::{Address, Env, Map};

use crate::errors::ContractError;
use crate::membership;
use crate::policy;
use crate::storage;
use crate::types::{ContributionRecord, Cycle, GroupConfig, GroupState, Role};

/// Rotation scan: index `(number - 1) mod members_ever` into the arena,
/// then walk forward (wrapping) past removed members' holes, at most one
/// full lap.
fn select_recipient(
    env: &Env,
    group_id: u64,
    number: u32,
    state: &GroupState,
) -> Result<Address, ContractError> {
    let members = storage::get_member_list(env, group_id);
    let n = state.members_ever;
    let start = (number - 1) % n;

    for i in 0..n {
        let idx = (start + i) % n;
        if let Some(account) = members.get(idx) {
            if let Some(member) = storage::get_member(env, group_id, &account) {
                if member.active {
                    return Ok(account);
                }
            }
        }
    }
    Err(ContractError::NoEligibleRecipient)
}

pub fn start_new_cycle(env: &Env, caller: Address, group_id: u64) -> Result<u32, ContractError> {
    caller.require_auth();

    let (record, config, mut state) = membership::live_group(env, group_id)?;
    membership::require_admin_or_treasurer(env, group_id, &caller)?;

    if !record.approved {
        return Err(ContractError::NotApproved);
    }
    if state.active_members < 2 {
        return Err(ContractError::TooFewMembers);
    }
    if state.current_cycle > 0 {
        let current = storage::get_cycle(env, group_id, state.current_cycle)
            .ok_or(ContractError::NoActiveCycle)?;
        if !current.completed {
            return Err(ContractError::CycleNotCompleted);
        }
    }

    let number = state.current_cycle + 1;
    let recipient = select_recipient(env, group_id, number, &state)?;
    let now = env.ledger().timestamp();

    let cycle = Cycle {
        number,
        recipient: recipient.clone(),
        start: now,
        end: now + config.contribution_period,
        total_amount: 0,
        payout_amount: 0,
        platform_fee: 0,
        completed: false,
        paid_out: false,
        contributions: Map::new(env),
    };
    storage::set_cycle(env, group_id, &cycle);

    state.current_cycle = number;
    storage::set_state(env, group_id, &state);

    env.events().publish(
        (crate::symbol_short!("cyc_strt"),),
        (group_id, number, recipient),
    );

    Ok(number)
}

pub fn contribute(
    env: &Env,
    caller: Address,
    group_id: u64,
    amount: i128,
) -> Result<(), ContractError> {
    caller.require_auth();

    let (_record, config, mut state) = membership::live_group(env, group_id)?;
    let mut member = membership::require_role(env, group_id, &caller, &Role::Member)?;

    if state.current_cycle == 0 {
        return Err(ContractError::NoActiveCycle);
    }
    let mut cycle = storage::get_cycle(env, group_id, state.current_cycle)
        .ok_or(ContractError::NoActiveCycle)?;
    if cycle.completed {
        // The contribution window closed when the last active member paid.
        return Err(ContractError::NoActiveCycle);
    }
    if cycle.contributions.contains_key(caller.clone()) {
        return Err(ContractError::AlreadyContributed);
    }

    let now = env.ledger().timestamp();
    let due = cycle.end + config.grace_period;
    let late = now > due;

    let fee = if late {
        policy::late_fee(
            config.contribution_amount,
            config.late_fee_bps,
            &config.late_fee_model,
            now - due,
        )
    } else {
        0
    };
    let required = config.contribution_amount + fee;
    if amount < required {
        return Err(ContractError::InsufficientAmount);
    }

    // Overpayment is accepted and recorded in full.
    let policy_cfg = storage::get_policy(env);
    let token_client = soroban_sdk::token::Client::new(env, &policy_cfg.token);
    token_client.transfer(&caller, &env.current_contract_address(), &amount);

    cycle.contributions.set(
        caller.clone(),
        ContributionRecord {
            amount,
            timestamp: now,
        },
    );
    cycle.total_amount += amount;

    member.contributions_made += 1;
    member.total_contributed += amount;
    if late {
        member.missed_payments += 1;
        member.performance_score = policy::score_late(member.performance_score);
    } else {
        member.performance_score = policy::score_on_time(member.performance_score);
    }
    storage::set_member(env, group_id, &member);

    state.total_contributions += amount;
    state.balance += amount;

    env.events().publish(
        (crate::symbol_short!("contrib"),),
        (group_id, caller.clone(), amount),
    );
    if late {
        env.events().publish(
            (crate::symbol_short!("late_fee"),),
            (group_id, caller.clone(), fee),
        );
    }

    check_completion(env, group_id, &config, &mut cycle, &state);
    storage::set_cycle(env, group_id, &cycle);
    storage::set_state(env, group_id, &state);

    Ok(())
}

/// Marks the cycle completed once every active member has a recorded
/// contribution, and fixes the payout split. No funds move here.
fn check_completion(
    env: &Env,
    group_id: u64,
    config: &GroupConfig,
    cycle: &mut Cycle,
    state: &GroupState,
) {
    let members = storage::get_member_list(env, group_id);
    let mut contributed: u32 = 0;
    for account in members.iter() {
        if let Some(member) = storage::get_member(env, group_id, &account) {
            if member.active && cycle.contributions.contains_key(account.clone()) {
                contributed += 1;
            }
        }
    }

    if contributed >= state.active_members {
        cycle.completed = true;
        cycle.platform_fee = policy::platform_fee(cycle.total_amount, config.platform_fee_bps);
        cycle.payout_amount = cycle.total_amount - cycle.platform_fee;

        env.events().publish(
            (crate::symbol_short!("cyc_comp"),),
            (group_id, cycle.number, cycle.total_amount),
        );
    }
}

/// Re-run the completion check after the active-member set shrinks. A
/// removal mid-cycle can leave every remaining active member already
/// recorded, and the cycle must complete then, not wait for a contribution
/// that can no longer arrive.
pub fn reevaluate_completion(env: &Env, group_id: u64, state: &GroupState) {
    if state.current_cycle == 0 {
        return;
    }
    if let (Some(mut cycle), Some(config)) = (
        storage::get_cycle(env, group_id, state.current_cycle),
        storage::get_config(env, group_id),
    ) {
        if !cycle.completed {
            check_completion(env, group_id, &config, &mut cycle, state);
            if cycle.completed {
                storage::set_cycle(env, group_id, &cycle);
            }
        }
    }
}

pub fn process_payout(
    env: &Env,
    caller: Address,
    group_id: u64,
    cycle_number: u32,
) -> Result<(), ContractError> {
    caller.require_auth();

    let (_record, _config, mut state) = membership::live_group(env, group_id)?;
    membership::require_admin_or_treasurer(env, group_id, &caller)?;

    let mut cycle = storage::get_cycle(env, group_id, cycle_number)
        .ok_or(ContractError::CycleNotCompleted)?;
    if !cycle.completed {
        return Err(ContractError::CycleNotCompleted);
    }
    if cycle.paid_out {
        return Err(ContractError::AlreadyPaidOut);
    }

    // Bookkeeping settles before any transfer leaves the contract.
    cycle.paid_out = true;
    storage::set_cycle(env, group_id, &cycle);

    state.balance -= cycle.total_amount;
    state.total_payouts += cycle.payout_amount;
    storage::set_state(env, group_id, &state);

    let policy_cfg = storage::get_policy(env);
    let token_client = soroban_sdk::token::Client::new(env, &policy_cfg.token);
    let contract_addr = env.current_contract_address();
    token_client.transfer(&contract_addr, &cycle.recipient, &cycle.payout_amount);
    if cycle.platform_fee > 0 {
        token_client.transfer(&contract_addr, &policy_cfg.treasury, &cycle.platform_fee);
    }

    env.events().publish(
        (crate::symbol_short!("payout"),),
        (
            group_id,
            cycle.number,
            cycle.recipient.clone(),
            cycle.payout_amount,
        ),
    );

    Ok(())
}

pub fn get_cycle(env: &Env, group_id: u64, number: u32) -> Result<Cycle, ContractError> {
    storage::get_cycle(env, group_id, number).ok_or(ContractError::NoActiveCycle)
}

pub fn has_contributed(
    env: &Env,
    group_id: u64,
    number: u32,
    account: Address,
) -> Result<bool, ContractError> {
    let cycle =
        storage::get_cycle(env, group_id, number).ok_or(ContractError::NoActiveCycle)?;
    Ok(cycle.contributions.contains_key(account))
}

pub fn get_current_recipient(env: &Env, group_id: u64) -> Result<Address, ContractError> {
    let state = storage::get_state(env, group_id).ok_or(ContractError::GroupNotFound)?;
    if state.current_cycle == 0 {
        return Err(ContractError::NoActiveCycle);
    }
    let cycle = storage::get_cycle(env, group_id, state.current_cycle)
        .ok_or(ContractError::NoActiveCycle)?;
    Ok(cycle.recipient)
}
