#![forbid(unsafe_code)]

//! Core domain model and calculators for quitplan.
//!
//! This crate provides:
//! - Domain types (reduction strategies, plan parameters, daily records)
//! - Allowance curves and schedules
//! - Savings projection
//! - Plan progress, streaks and health milestones
//! - Persistence (plan store, record log, CSV export)

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod dates;
pub mod plan;
pub mod allowance;
pub mod savings;
pub mod progress;
pub mod milestones;
pub mod store;
pub mod records;
pub mod report;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use dates::{days_between, days_between_instants, total_days};
pub use allowance::{allowance, allowance_on, schedule, step_down_allowance};
pub use savings::{cost_per_cigarette, project_plan_savings, project_savings, savings_from_records};
pub use progress::{compliance, plan_progress, smoke_free_streak, DayCompliance, PlanProgress, PlanStatus};
pub use milestones::{health_timeline, milestones_reached, next_milestone, smoke_free_since, HealthMilestone};
pub use store::{JsonPlanStore, PlanStore};
pub use records::{load_records, read_records, JsonlRecordLog, RecordSink};
pub use report::write_schedule_csv;
