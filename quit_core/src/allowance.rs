//! Daily cigarette allowance curves.
//!
//! Every curve starts at the user's baseline on day 1, never increases from
//! one day to the next, and reaches zero on the plan's last day:
//! - Immediate: full stop after day 1
//! - Linear: equal daily decrements
//! - Exponential: front-loaded, the biggest cuts come first
//! - Logarithmic: back-loaded, eases in and cuts hardest near the goal

use crate::{DailyAllowance, QuitPlanParameters, ReductionType};
use chrono::{Days, NaiveDate};
use std::f64::consts::E;

/// Power applied to the remaining fraction by the exponential curve
const EXPONENTIAL_POWER: f64 = 2.0;

/// Recommended cigarette count for one day of a plan.
///
/// `day_index` is 1-based. Days past `total_days` get 0 and days before the
/// start are treated as day 1. A plan of one day or less has no intermediate
/// days, so every curve behaves like [`ReductionType::Immediate`].
pub fn allowance(
    reduction: ReductionType,
    initial_amount: u32,
    day_index: i64,
    total_days: i64,
) -> u32 {
    let day = day_index.max(1);
    if day > total_days {
        return 0;
    }
    if day == 1 {
        return initial_amount;
    }

    // 2 <= day <= total_days here, so the denominator is positive
    let remaining = 1.0 - (day - 1) as f64 / (total_days - 1) as f64;

    let fraction = match reduction {
        ReductionType::Immediate => 0.0,
        ReductionType::Linear => remaining,
        ReductionType::Exponential => remaining.powf(EXPONENTIAL_POWER),
        ReductionType::Logarithmic => (1.0 + (E - 1.0) * remaining).ln(),
    };

    scale(initial_amount, fraction)
}

/// Reduce by exactly one cigarette per day.
///
/// Standalone helper for callers that have a baseline but no goal date to
/// spread the reduction over. [`allowance`] never falls back to it: plans
/// always have a length of at least one day.
pub fn step_down_allowance(initial_amount: u32, day_index: i64) -> u32 {
    let elapsed = u32::try_from(day_index.max(1) - 1).unwrap_or(u32::MAX);
    initial_amount.saturating_sub(elapsed)
}

/// Allowance for a calendar date under the given plan
pub fn allowance_on(plan: &QuitPlanParameters, date: NaiveDate) -> u32 {
    allowance(
        plan.reduction_type,
        plan.initial_smoking_amount,
        plan.day_index_on(date),
        plan.total_days(),
    )
}

/// Full day-by-day schedule from the start date to the last plan day
pub fn schedule(plan: &QuitPlanParameters) -> Vec<DailyAllowance> {
    let total = plan.total_days();

    let entries: Vec<DailyAllowance> = (1..=total)
        .filter_map(|day| {
            let date = plan.start_date.checked_add_days(Days::new((day - 1) as u64))?;
            Some(DailyAllowance {
                day_index: u32::try_from(day).ok()?,
                date,
                recommended_count: allowance(
                    plan.reduction_type,
                    plan.initial_smoking_amount,
                    day,
                    total,
                ),
            })
        })
        .collect();

    tracing::debug!(
        "Built {} schedule for plan {}: {} days",
        plan.reduction_type,
        plan.id,
        entries.len()
    );

    entries
}

/// Round to the nearest whole cigarette, halves away from zero
fn scale(initial_amount: u32, fraction: f64) -> u32 {
    let value = (f64::from(initial_amount) * fraction.clamp(0.0, 1.0)).round();
    (value as u32).min(initial_amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn plan(reduction: ReductionType, initial: u32, days: u64) -> QuitPlanParameters {
        let start = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        QuitPlanParameters {
            id: Uuid::new_v4(),
            reduction_type: reduction,
            initial_smoking_amount: initial,
            start_date: start,
            goal_date: start + Days::new(days),
            cigarettes_per_pack: 20,
            price_per_pack: dec!(25000),
        }
    }

    #[test]
    fn test_every_curve_starts_at_baseline_and_ends_at_zero() {
        for reduction in ReductionType::ALL {
            for initial in 1..=40 {
                for total in 2..=60 {
                    assert_eq!(allowance(reduction, initial, 1, total), initial);
                    assert_eq!(
                        allowance(reduction, initial, total, total),
                        0,
                        "{} N={} T={}",
                        reduction,
                        initial,
                        total
                    );
                }
            }
        }
    }

    #[test]
    fn test_every_curve_is_non_increasing() {
        for reduction in ReductionType::ALL {
            for initial in 1..=40 {
                for total in 1..=60 {
                    let mut previous = initial;
                    for day in 1..=total + 2 {
                        let current = allowance(reduction, initial, day, total);
                        assert!(current <= initial);
                        assert!(
                            current <= previous,
                            "{} N={} T={} day={} went {} -> {}",
                            reduction,
                            initial,
                            total,
                            day,
                            previous,
                            current
                        );
                        previous = current;
                    }
                }
            }
        }
    }

    #[test]
    fn test_immediate_stops_after_first_day() {
        assert_eq!(allowance(ReductionType::Immediate, 20, 1, 30), 20);
        for day in 2..=35 {
            assert_eq!(allowance(ReductionType::Immediate, 20, day, 30), 0);
        }
    }

    #[test]
    fn test_short_plans_collapse_to_immediate() {
        for reduction in ReductionType::ALL {
            assert_eq!(allowance(reduction, 12, 1, 1), 12);
            assert_eq!(allowance(reduction, 12, 2, 1), 0);
            assert_eq!(allowance(reduction, 12, 1, 0), 12);
            assert_eq!(allowance(reduction, 12, 2, 0), 0);
        }
    }

    #[test]
    fn test_curve_values_over_eleven_days() {
        let linear: Vec<u32> = (1..=11)
            .map(|d| allowance(ReductionType::Linear, 20, d, 11))
            .collect();
        assert_eq!(linear, vec![20, 18, 16, 14, 12, 10, 8, 6, 4, 2, 0]);

        let exponential: Vec<u32> = (1..=11)
            .map(|d| allowance(ReductionType::Exponential, 20, d, 11))
            .collect();
        assert_eq!(exponential, vec![20, 16, 13, 10, 7, 5, 3, 2, 1, 0, 0]);

        let logarithmic: Vec<u32> = (1..=11)
            .map(|d| allowance(ReductionType::Logarithmic, 20, d, 11))
            .collect();
        assert_eq!(logarithmic, vec![20, 19, 17, 16, 14, 12, 10, 8, 6, 3, 0]);
    }

    #[test]
    fn test_exponential_front_loads_and_logarithmic_back_loads() {
        for day in 2..30 {
            let linear = allowance(ReductionType::Linear, 30, day, 30);
            let exponential = allowance(ReductionType::Exponential, 30, day, 30);
            let logarithmic = allowance(ReductionType::Logarithmic, 30, day, 30);
            assert!(exponential <= linear, "day {}", day);
            assert!(logarithmic >= linear, "day {}", day);
        }
    }

    #[test]
    fn test_halves_round_up() {
        // day 2 of 3 leaves half of 5
        assert_eq!(allowance(ReductionType::Linear, 5, 2, 3), 3);
    }

    #[test]
    fn test_days_before_start_get_baseline() {
        assert_eq!(allowance(ReductionType::Linear, 15, 0, 10), 15);
        assert_eq!(allowance(ReductionType::Exponential, 15, -4, 10), 15);
    }

    #[test]
    fn test_step_down_reduces_one_per_day() {
        assert_eq!(step_down_allowance(5, 1), 5);
        assert_eq!(step_down_allowance(5, 3), 3);
        assert_eq!(step_down_allowance(5, 6), 0);
        assert_eq!(step_down_allowance(5, 500), 0);
        assert_eq!(step_down_allowance(5, -2), 5);
    }

    #[test]
    fn test_schedule_covers_plan_days() {
        let plan = plan(ReductionType::Linear, 10, 10);
        let entries = schedule(&plan);

        assert_eq!(entries.len(), 10);
        assert_eq!(entries[0].date, plan.start_date);
        assert_eq!(entries[0].recommended_count, 10);
        assert_eq!(entries[9].day_index, 10);
        assert_eq!(entries[9].recommended_count, 0);
        assert_eq!(allowance_on(&plan, plan.goal_date), 0);
    }

    #[test]
    fn test_allowance_on_uses_calendar_dates() {
        let plan = plan(ReductionType::Linear, 20, 11);
        let third_day = plan.start_date + Days::new(2);
        assert_eq!(allowance_on(&plan, third_day), 16);
        assert_eq!(allowance_on(&plan, plan.start_date - Days::new(3)), 20);
    }

    #[test]
    fn test_recomputation_is_identical() {
        for reduction in ReductionType::ALL {
            let first: Vec<u32> = (1..=45).map(|d| allowance(reduction, 23, d, 45)).collect();
            let second: Vec<u32> = (1..=45).map(|d| allowance(reduction, 23, d, 45)).collect();
            assert_eq!(first, second);
        }
    }
}
