//! Where a plan stands on a given day.

use crate::allowance::allowance;
use crate::dates::days_between;
use crate::{DailyRecord, QuitPlanParameters};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// Phase of a plan relative to a date
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    NotStarted,
    InProgress,
    GoalReached,
}

/// Snapshot of a plan on one date
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PlanProgress {
    pub date: NaiveDate,
    pub day_index: i64,
    pub total_days: i64,
    pub allowance_today: u32,
    pub days_remaining: i64,
    pub percent_complete: u8,
    pub status: PlanStatus,
}

/// How one logged day compared to its allowance
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct DayCompliance {
    pub date: NaiveDate,
    pub day_index: i64,
    pub allowance: u32,
    pub smoked: u32,
    pub within_allowance: bool,
}

/// Compute progress through `plan` as of `today`
pub fn plan_progress(plan: &QuitPlanParameters, today: NaiveDate) -> PlanProgress {
    let day_index = plan.day_index_on(today);
    let total_days = plan.total_days();

    let status = if day_index < 1 {
        PlanStatus::NotStarted
    } else if day_index > total_days {
        PlanStatus::GoalReached
    } else {
        PlanStatus::InProgress
    };

    let elapsed = (day_index - 1).clamp(0, total_days);
    let percent_complete = u8::try_from(elapsed * 100 / total_days).unwrap_or(100);

    PlanProgress {
        date: today,
        day_index,
        total_days,
        allowance_today: allowance(
            plan.reduction_type,
            plan.initial_smoking_amount,
            day_index,
            total_days,
        ),
        days_remaining: days_between(today, plan.goal_date).max(0),
        percent_complete,
        status,
    }
}

/// Consecutive smoke-free logged days ending today.
///
/// If today has no record yet the streak is counted up to yesterday. A day
/// with any cigarettes, or with no record, ends the streak. When a date is
/// logged more than once the last record in the slice wins.
pub fn smoke_free_streak(records: &[DailyRecord], today: NaiveDate) -> u32 {
    let by_date: HashMap<NaiveDate, u32> = records
        .iter()
        .map(|r| (r.date, r.cigarettes_smoked))
        .collect();

    let mut cursor = if by_date.contains_key(&today) {
        Some(today)
    } else {
        today.pred_opt()
    };

    let mut streak = 0;
    while let Some(day) = cursor {
        match by_date.get(&day) {
            Some(0) => {
                streak += 1;
                cursor = day.pred_opt();
            }
            _ => break,
        }
    }

    streak
}

/// Compare each in-plan record with that day's allowance
pub fn compliance(plan: &QuitPlanParameters, records: &[DailyRecord]) -> Vec<DayCompliance> {
    let total = plan.total_days();

    records
        .iter()
        .filter_map(|record| {
            let day_index = plan.day_index_on(record.date);
            if day_index < 1 {
                return None;
            }
            let allowed = allowance(
                plan.reduction_type,
                plan.initial_smoking_amount,
                day_index,
                total,
            );
            Some(DayCompliance {
                date: record.date,
                day_index,
                allowance: allowed,
                smoked: record.cigarettes_smoked,
                within_allowance: record.cigarettes_smoked <= allowed,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ReductionType;
    use chrono::Days;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn plan() -> QuitPlanParameters {
        QuitPlanParameters::new(
            ReductionType::Linear,
            20,
            date(2026, 3, 1),
            date(2026, 3, 11),
            20,
            dec!(25000),
        )
        .unwrap()
    }

    fn record(date: NaiveDate, smoked: u32) -> DailyRecord {
        DailyRecord::new(date, smoked, 0)
    }

    #[test]
    fn test_progress_before_start() {
        let progress = plan_progress(&plan(), date(2026, 2, 25));
        assert_eq!(progress.status, PlanStatus::NotStarted);
        assert_eq!(progress.allowance_today, 20);
        assert_eq!(progress.percent_complete, 0);
        assert_eq!(progress.days_remaining, 14);
    }

    #[test]
    fn test_progress_midway() {
        let progress = plan_progress(&plan(), date(2026, 3, 6));
        assert_eq!(progress.status, PlanStatus::InProgress);
        assert_eq!(progress.day_index, 6);
        assert_eq!(progress.total_days, 10);
        assert_eq!(progress.percent_complete, 50);
        assert_eq!(progress.days_remaining, 5);
    }

    #[test]
    fn test_progress_at_and_after_goal() {
        let at_goal = plan_progress(&plan(), date(2026, 3, 11));
        assert_eq!(at_goal.status, PlanStatus::GoalReached);
        assert_eq!(at_goal.allowance_today, 0);
        assert_eq!(at_goal.percent_complete, 100);
        assert_eq!(at_goal.days_remaining, 0);

        let later = plan_progress(&plan(), date(2026, 6, 1));
        assert_eq!(later.status, PlanStatus::GoalReached);
        assert_eq!(later.percent_complete, 100);
    }

    #[test]
    fn test_streak_counts_back_from_today() {
        let today = date(2026, 3, 10);
        let records = vec![
            record(date(2026, 3, 6), 2),
            record(date(2026, 3, 7), 0),
            record(date(2026, 3, 8), 0),
            record(date(2026, 3, 9), 0),
            record(today, 0),
        ];
        assert_eq!(smoke_free_streak(&records, today), 4);
    }

    #[test]
    fn test_streak_uses_yesterday_when_today_unlogged() {
        let today = date(2026, 3, 10);
        let records = vec![record(date(2026, 3, 8), 0), record(date(2026, 3, 9), 0)];
        assert_eq!(smoke_free_streak(&records, today), 2);
    }

    #[test]
    fn test_streak_broken_by_relapse_or_gap() {
        let today = date(2026, 3, 10);

        let relapse = vec![record(date(2026, 3, 9), 0), record(today, 1)];
        assert_eq!(smoke_free_streak(&relapse, today), 0);

        let gap = vec![record(date(2026, 3, 7), 0), record(today, 0)];
        assert_eq!(smoke_free_streak(&gap, today), 1);

        assert_eq!(smoke_free_streak(&[], today), 0);
    }

    #[test]
    fn test_compliance_flags_over_allowance_days() {
        let plan = plan();
        let records = vec![
            record(plan.start_date - Days::new(1), 30),
            record(date(2026, 3, 1), 20),
            record(date(2026, 3, 2), 19),
        ];

        let days = compliance(&plan, &records);
        assert_eq!(days.len(), 2);
        assert!(days[0].within_allowance);
        assert_eq!(days[1].allowance, 18);
        assert!(!days[1].within_allowance);
    }
}
