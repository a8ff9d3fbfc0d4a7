//! Savings projection.
//!
//! Two views of the same question:
//! - [`project_savings`]: idealized, as if the user smoked nothing for every
//!   elapsed day
//! - [`savings_from_records`]: incremental, crediting only the cigarettes a
//!   user stayed under each day's allowance

use crate::allowance::allowance;
use crate::dates::days_between;
use crate::{DailyRecord, QuitPlanParameters, SavingsResult};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Price of a single cigarette.
///
/// An empty pack (invalid input) yields zero rather than dividing by zero.
pub fn cost_per_cigarette(price_per_pack: Decimal, cigarettes_per_pack: u32) -> Decimal {
    price_per_pack
        .checked_div(Decimal::from(cigarettes_per_pack))
        .unwrap_or(Decimal::ZERO)
}

/// Money and cigarettes saved by not smoking `daily_baseline` cigarettes a
/// day for `days_smoke_free` days.
///
/// Negative day counts (a plan that has not started yet) are clamped to 0.
/// Money saturates at `Decimal::MAX` instead of overflowing.
pub fn project_savings(
    price_per_pack: Decimal,
    cigarettes_per_pack: u32,
    daily_baseline: u32,
    days_smoke_free: i64,
) -> SavingsResult {
    let days = u32::try_from(days_smoke_free.max(0)).unwrap_or(u32::MAX);

    let cigarettes_avoided = u64::from(daily_baseline) * u64::from(days);
    let money_saved = cost_per_cigarette(price_per_pack, cigarettes_per_pack)
        .checked_mul(Decimal::from(cigarettes_avoided))
        .unwrap_or(Decimal::MAX);

    SavingsResult {
        days_smoke_free: days,
        money_saved,
        cigarettes_avoided,
    }
}

/// Idealized savings for a plan as of `today`
pub fn project_plan_savings(plan: &QuitPlanParameters, today: NaiveDate) -> SavingsResult {
    project_savings(
        plan.price_per_pack,
        plan.cigarettes_per_pack,
        plan.initial_smoking_amount,
        days_between(plan.start_date, today),
    )
}

/// Savings earned from logged days.
///
/// Each record on or after the plan's start date credits the cigarettes
/// kept under that day's allowance; smoking over the allowance credits
/// nothing but is not penalized. `days_smoke_free` counts those records
/// with zero cigarettes. Records should already be deduplicated by date.
pub fn savings_from_records(plan: &QuitPlanParameters, records: &[DailyRecord]) -> SavingsResult {
    let cost = cost_per_cigarette(plan.price_per_pack, plan.cigarettes_per_pack);
    let total = plan.total_days();

    let mut result = SavingsResult::default();

    for record in records {
        let day = plan.day_index_on(record.date);
        if day < 1 {
            continue;
        }

        let allowed = allowance(plan.reduction_type, plan.initial_smoking_amount, day, total);
        let avoided = allowed.saturating_sub(record.cigarettes_smoked);

        result.cigarettes_avoided += u64::from(avoided);
        result.money_saved = cost
            .checked_mul(Decimal::from(avoided))
            .and_then(|credit| result.money_saved.checked_add(credit))
            .unwrap_or(Decimal::MAX);
        if record.cigarettes_smoked == 0 {
            result.days_smoke_free += 1;
        }
    }

    result
}
