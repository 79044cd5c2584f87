use soroban_sdk::{Address, Env, Vec};

use crate::types::{Cycle, DataKey, GroupConfig, GroupRecord, GroupState, Member, PlatformPolicy};

const INSTANCE_TTL_THRESHOLD: u32 = 100;
const INSTANCE_TTL_EXTEND: u32 = 500;
const PERSISTENT_TTL_THRESHOLD: u32 = 100;
const PERSISTENT_TTL_EXTEND: u32 = 1000;

// --- Owner ---

pub fn get_owner(env: &Env) -> Address {
    env.storage().instance().get(&DataKey::Owner).unwrap()
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
    extend_instance_ttl(env);
}

pub fn has_owner(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Owner)
}

// --- Platform policy ---

pub fn get_policy(env: &Env) -> PlatformPolicy {
    env.storage().instance().get(&DataKey::Policy).unwrap()
}

pub fn set_policy(env: &Env, policy: &PlatformPolicy) {
    env.storage().instance().set(&DataKey::Policy, policy);
    extend_instance_ttl(env);
}

// --- Counters ---

pub fn get_group_counter(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::GroupCounter)
        .unwrap_or(0)
}

pub fn set_group_counter(env: &Env, counter: u64) {
    env.storage()
        .instance()
        .set(&DataKey::GroupCounter, &counter);
    extend_instance_ttl(env);
}

pub fn get_active_groups(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::ActiveGroups)
        .unwrap_or(0)
}

pub fn set_active_groups(env: &Env, count: u64) {
    env.storage().instance().set(&DataKey::ActiveGroups, &count);
    extend_instance_ttl(env);
}

// --- Creator allow-list ---

pub fn is_approved_creator(env: &Env, account: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::ApprovedCreator(account.clone()))
        .unwrap_or(false)
}

pub fn set_approved_creator(env: &Env, account: &Address, approved: bool) {
    let key = DataKey::ApprovedCreator(account.clone());
    env.storage().persistent().set(&key, &approved);
    extend_persistent_ttl(env, &key);
}

// --- Group record ---

pub fn get_group(env: &Env, group_id: u64) -> Option<GroupRecord> {
    let key = DataKey::Group(group_id);
    let result = env.storage().persistent().get(&key);
    if result.is_some() {
        extend_persistent_ttl(env, &key);
    }
    result
}

pub fn set_group(env: &Env, record: &GroupRecord) {
    let key = DataKey::Group(record.id);
    env.storage().persistent().set(&key, record);
    extend_persistent_ttl(env, &key);
}

// --- Group config ---

pub fn get_config(env: &Env, group_id: u64) -> Option<GroupConfig> {
    let key = DataKey::Config(group_id);
    let result = env.storage().persistent().get(&key);
    if result.is_some() {
        extend_persistent_ttl(env, &key);
    }
    result
}

pub fn set_config(env: &Env, group_id: u64, config: &GroupConfig) {
    let key = DataKey::Config(group_id);
    env.storage().persistent().set(&key, config);
    extend_persistent_ttl(env, &key);
}

// --- Group state ---

pub fn get_state(env: &Env, group_id: u64) -> Option<GroupState> {
    let key = DataKey::State(group_id);
    let result = env.storage().persistent().get(&key);
    if result.is_some() {
        extend_persistent_ttl(env, &key);
    }
    result
}

pub fn set_state(env: &Env, group_id: u64, state: &GroupState) {
    let key = DataKey::State(group_id);
    env.storage().persistent().set(&key, state);
    extend_persistent_ttl(env, &key);
}

// --- Member arena ---

pub fn get_member_list(env: &Env, group_id: u64) -> Vec<Address> {
    let key = DataKey::MemberList(group_id);
    env.storage()
        .persistent()
        .get(&key)
        .unwrap_or(Vec::new(env))
}

pub fn push_member(env: &Env, group_id: u64, account: &Address) {
    let key = DataKey::MemberList(group_id);
    let mut members = get_member_list(env, group_id);
    members.push_back(account.clone());
    env.storage().persistent().set(&key, &members);
    extend_persistent_ttl(env, &key);
}

pub fn get_member(env: &Env, group_id: u64, account: &Address) -> Option<Member> {
    let key = DataKey::Member(group_id, account.clone());
    let result = env.storage().persistent().get(&key);
    if result.is_some() {
        extend_persistent_ttl(env, &key);
    }
    result
}

pub fn set_member(env: &Env, group_id: u64, member: &Member) {
    let key = DataKey::Member(group_id, member.account.clone());
    env.storage().persistent().set(&key, member);
    extend_persistent_ttl(env, &key);
}

// --- Cycles ---

pub fn get_cycle(env: &Env, group_id: u64, number: u32) -> Option<Cycle> {
    let key = DataKey::Cycle(group_id, number);
    let result = env.storage().persistent().get(&key);
    if result.is_some() {
        extend_persistent_ttl(env, &key);
    }
    result
}

pub fn set_cycle(env: &Env, group_id: u64, cycle: &Cycle) {
    let key = DataKey::Cycle(group_id, cycle.number);
    env.storage().persistent().set(&key, cycle);
    extend_persistent_ttl(env, &key);
}

// --- TTL Management ---

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}
