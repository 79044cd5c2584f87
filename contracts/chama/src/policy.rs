//! Late-fee and performance-score policy. Pure arithmetic; callers apply
//! the results to their own state.

use crate::types::LateFeeModel;

pub const BPS_DENOMINATOR: i128 = 10_000;
pub const SCORE_MAX: u32 = 10_000;
pub const SCORE_ON_TIME_BONUS: u32 = 100;
pub const SCORE_LATE_PENALTY: u32 = 200;

const SECONDS_PER_DAY: u64 = 86_400;
const PRORATE_BASELINE_DAYS: u64 = 30;

/// Fee owed on top of the contribution amount once past due.
///
/// `Flat` charges the full rate regardless of how late. `DailyProrated`
/// scales the flat fee by days late over a 30-day baseline, counting any
/// partial day as a full one and capping at the flat fee.
pub fn late_fee(
    amount: i128,
    late_fee_bps: u32,
    model: &LateFeeModel,
    past_due_secs: u64,
) -> i128 {
    let flat = amount * late_fee_bps as i128 / BPS_DENOMINATOR;
    match model {
        LateFeeModel::Flat => flat,
        LateFeeModel::DailyProrated => {
            let days = (past_due_secs / SECONDS_PER_DAY + 1).min(PRORATE_BASELINE_DAYS);
            flat * days as i128 / PRORATE_BASELINE_DAYS as i128
        }
    }
}

/// Platform's cut of a completed cycle's pool, in the stamped fee rate.
pub fn platform_fee(total_amount: i128, platform_fee_bps: u32) -> i128 {
    total_amount * platform_fee_bps as i128 / BPS_DENOMINATOR
}

/// Score after an on-time contribution.
pub fn score_on_time(score: u32) -> u32 {
    (score + SCORE_ON_TIME_BONUS).min(SCORE_MAX)
}

/// Score after a late contribution.
pub fn score_late(score: u32) -> u32 {
    score.saturating_sub(SCORE_LATE_PENALTY)
}
