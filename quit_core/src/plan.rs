//! Plan construction, validation and restarts.
//!
//! The calculators assume valid parameters; every plan that reaches them
//! should have passed [`QuitPlanParameters::validate`] first.

use crate::dates::{days_between, total_days};
use crate::{Error, PlanRestart, QuitPlanParameters, ReductionType, Result, StoredPlan};
use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use uuid::Uuid;

impl QuitPlanParameters {
    /// Build a plan, rejecting inputs the calculators cannot handle
    pub fn new(
        reduction_type: ReductionType,
        initial_smoking_amount: u32,
        start_date: NaiveDate,
        goal_date: NaiveDate,
        cigarettes_per_pack: u32,
        price_per_pack: Decimal,
    ) -> Result<Self> {
        let plan = Self {
            id: Uuid::new_v4(),
            reduction_type,
            initial_smoking_amount,
            start_date,
            goal_date,
            cigarettes_per_pack,
            price_per_pack,
        };
        plan.validate()?;
        Ok(plan)
    }

    /// Check the preconditions the calculators rely on
    pub fn validate(&self) -> Result<()> {
        if self.initial_smoking_amount == 0 {
            return Err(Error::InvalidPlan(
                "initial smoking amount must be at least 1 cigarette per day".into(),
            ));
        }
        if self.cigarettes_per_pack == 0 {
            return Err(Error::InvalidPlan(
                "a pack must contain at least 1 cigarette".into(),
            ));
        }
        if self.price_per_pack <= Decimal::ZERO {
            return Err(Error::InvalidPlan(format!(
                "price per pack must be positive, got {}",
                self.price_per_pack
            )));
        }
        if self.goal_date < self.start_date {
            return Err(Error::InvalidPlan(format!(
                "goal date {} is before start date {}",
                self.goal_date, self.start_date
            )));
        }
        Ok(())
    }

    /// Plan length in days (at least 1)
    pub fn total_days(&self) -> i64 {
        total_days(self.start_date, self.goal_date)
    }

    /// 1-based plan day for a calendar date; zero or negative before the start
    pub fn day_index_on(&self, date: NaiveDate) -> i64 {
        days_between(self.start_date, date) + 1
    }

    /// Move the plan window so it begins on `on`, keeping its length.
    ///
    /// Returns the new plan and the restart entry describing the old window.
    pub fn restarted(&self, on: NaiveDate) -> (Self, PlanRestart) {
        let length = days_between(self.start_date, self.goal_date).max(0) as u64;
        let goal_date = on.checked_add_days(Days::new(length)).unwrap_or(NaiveDate::MAX);

        let restart = PlanRestart {
            restarted_at: on,
            previous_start_date: self.start_date,
            previous_goal_date: self.goal_date,
        };

        let plan = Self {
            id: Uuid::new_v4(),
            start_date: on,
            goal_date,
            ..self.clone()
        };

        (plan, restart)
    }
}

impl StoredPlan {
    /// Restart the active plan on `on` and record the previous window
    pub fn restart(&mut self, on: NaiveDate) {
        let (plan, restart) = self.plan.restarted(on);
        tracing::info!(
            "Restarting plan {} on {} (was {} to {})",
            self.plan.id,
            on,
            restart.previous_start_date,
            restart.previous_goal_date
        );
        self.plan = plan;
        self.restarts.push(restart);
    }
}
