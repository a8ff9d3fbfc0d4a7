//! Core domain types for the quit-plan calculator.
//!
//! This module defines the fundamental types used throughout the system:
//! - Reduction strategies and plan parameters
//! - Derived daily allowances and savings results
//! - Logged daily records and plan restart history

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Reduction Strategy
// ============================================================================

/// Shape of the daily-allowance curve over the plan's duration
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReductionType {
    /// Stop completely after the first day
    Immediate,
    /// Equal daily decrements
    Linear,
    /// Large cuts early, small cuts near the goal
    Exponential,
    /// Small cuts early, large cuts near the goal
    Logarithmic,
}

impl ReductionType {
    pub const ALL: [ReductionType; 4] = [
        ReductionType::Immediate,
        ReductionType::Linear,
        ReductionType::Exponential,
        ReductionType::Logarithmic,
    ];

    /// Wire name used by the backend API
    pub fn as_str(&self) -> &'static str {
        match self {
            ReductionType::Immediate => "IMMEDIATE",
            ReductionType::Linear => "LINEAR",
            ReductionType::Exponential => "EXPONENTIAL",
            ReductionType::Logarithmic => "LOGARITHMIC",
        }
    }
}

impl fmt::Display for ReductionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReductionType {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "immediate" => Ok(ReductionType::Immediate),
            "linear" => Ok(ReductionType::Linear),
            "exponential" => Ok(ReductionType::Exponential),
            "logarithmic" => Ok(ReductionType::Logarithmic),
            other => Err(crate::Error::Parse(format!(
                "unknown reduction type '{}' (expected immediate, linear, exponential or logarithmic)",
                other
            ))),
        }
    }
}

// ============================================================================
// Plan Types
// ============================================================================

/// Inputs a user supplies when creating a quit plan
///
/// Field names follow the backend's JSON payload. Values are never mutated
/// after creation; a restart builds a new value.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuitPlanParameters {
    pub id: Uuid,
    pub reduction_type: ReductionType,
    pub initial_smoking_amount: u32,
    pub start_date: NaiveDate,
    pub goal_date: NaiveDate,
    pub cigarettes_per_pack: u32,
    pub price_per_pack: Decimal,
}

/// Recommended cigarette count for one day of a plan
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct DailyAllowance {
    pub day_index: u32,
    pub date: NaiveDate,
    pub recommended_count: u32,
}

/// What a user actually smoked on a given date
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub id: Uuid,
    pub date: NaiveDate,
    pub cigarettes_smoked: u32,
    #[serde(default)]
    pub cravings: u32,
    pub logged_at: DateTime<Utc>,
}

impl DailyRecord {
    /// Create a record logged now
    pub fn new(date: NaiveDate, cigarettes_smoked: u32, cravings: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            cigarettes_smoked,
            cravings,
            logged_at: Utc::now(),
        }
    }
}

/// Money and cigarettes saved over some span of days
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Default)]
pub struct SavingsResult {
    pub days_smoke_free: u32,
    pub money_saved: Decimal,
    pub cigarettes_avoided: u64,
}

// ============================================================================
// Persistence Types
// ============================================================================

/// A past window a plan was moved away from
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlanRestart {
    pub restarted_at: NaiveDate,
    pub previous_start_date: NaiveDate,
    pub previous_goal_date: NaiveDate,
}

/// The active plan together with the restarts that produced it
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredPlan {
    pub plan: QuitPlanParameters,
    #[serde(default)]
    pub restarts: Vec<PlanRestart>,
}

impl StoredPlan {
    pub fn new(plan: QuitPlanParameters) -> Self {
        Self {
            plan,
            restarts: Vec::new(),
        }
    }
}
