//! Health milestones reached after the last cigarette.
//!
//! This module provides the built-in health timeline shown to users as they
//! stay smoke-free.

use crate::allowance::allowance;
use crate::{DailyRecord, QuitPlanParameters};
use chrono::{Days, Duration, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;

/// A recovery milestone on the health timeline
#[derive(Clone, Debug)]
pub struct HealthMilestone {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Time without smoking needed to reach this milestone
    pub after: Duration,
}

/// Timeline built once, ordered by `after`
static HEALTH_TIMELINE: Lazy<Vec<HealthMilestone>> = Lazy::new(build_timeline);

/// The built-in health timeline
pub fn health_timeline() -> &'static [HealthMilestone] {
    &HEALTH_TIMELINE
}

fn build_timeline() -> Vec<HealthMilestone> {
    vec![
        HealthMilestone {
            id: "heart_rate",
            title: "Heart rate normalizes",
            description: "Heart rate and blood pressure drop toward normal.",
            after: Duration::minutes(20),
        },
        HealthMilestone {
            id: "carbon_monoxide",
            title: "Carbon monoxide clears",
            description: "Carbon monoxide in the blood falls to normal levels.",
            after: Duration::hours(12),
        },
        HealthMilestone {
            id: "taste_smell",
            title: "Taste and smell return",
            description: "Damaged nerve endings start to regrow; taste and smell improve.",
            after: Duration::days(2),
        },
        HealthMilestone {
            id: "breathing",
            title: "Breathing gets easier",
            description: "Bronchial tubes relax and energy levels rise.",
            after: Duration::days(3),
        },
        HealthMilestone {
            id: "circulation",
            title: "Circulation improves",
            description: "Blood flow improves and walking becomes easier.",
            after: Duration::weeks(2),
        },
        HealthMilestone {
            id: "lung_function",
            title: "Lungs clear",
            description: "Coughing and shortness of breath decrease.",
            after: Duration::days(30),
        },
        HealthMilestone {
            id: "heart_disease_half",
            title: "Heart disease risk halved",
            description: "Excess risk of coronary heart disease is half that of a smoker.",
            after: Duration::days(365),
        },
        HealthMilestone {
            id: "stroke",
            title: "Stroke risk falls",
            description: "Stroke risk drops to that of a non-smoker.",
            after: Duration::days(5 * 365),
        },
        HealthMilestone {
            id: "lung_cancer_half",
            title: "Lung cancer risk halved",
            description: "Risk of dying from lung cancer is about half that of a smoker.",
            after: Duration::days(10 * 365),
        },
        HealthMilestone {
            id: "heart_disease_normal",
            title: "Heart like a non-smoker",
            description: "Coronary heart disease risk matches a non-smoker's.",
            after: Duration::days(15 * 365),
        },
    ]
}

/// Milestones already reached, in timeline order
pub fn milestones_reached(
    smoke_free_since: NaiveDateTime,
    now: NaiveDateTime,
) -> Vec<&'static HealthMilestone> {
    let elapsed = now - smoke_free_since;
    health_timeline()
        .iter()
        .filter(|m| elapsed >= m.after)
        .collect()
}

/// The next milestone and how long until it is reached
pub fn next_milestone(
    smoke_free_since: NaiveDateTime,
    now: NaiveDateTime,
) -> Option<(&'static HealthMilestone, Duration)> {
    let elapsed = now - smoke_free_since;
    health_timeline()
        .iter()
        .find(|m| elapsed < m.after)
        .map(|m| (m, m.after - elapsed))
}

/// Date the current smoke-free stretch began.
///
/// That is the first plan day with a zero allowance, pushed later to the day
/// after the most recent logged day with any cigarettes.
pub fn smoke_free_since(plan: &QuitPlanParameters, records: &[DailyRecord]) -> NaiveDate {
    let total = plan.total_days();

    let quit_day = (1..=total + 1)
        .find(|&day| allowance(plan.reduction_type, plan.initial_smoking_amount, day, total) == 0)
        .and_then(|day| plan.start_date.checked_add_days(Days::new((day - 1) as u64)))
        .unwrap_or(plan.goal_date);

    let after_relapse = records
        .iter()
        .filter(|r| r.cigarettes_smoked > 0)
        .map(|r| r.date)
        .max()
        .and_then(|d| d.succ_opt());

    match after_relapse {
        Some(date) if date > quit_day => date,
        _ => quit_day,
    }
}
