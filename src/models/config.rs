//! Schedule and waiting-duty configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The weekly frame: which days are active and how many periods each holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Active day identifiers, in display order. The generator and the
    /// distributors iterate days in exactly this order.
    pub active_days: Vec<String>,
    /// Default number of periods per day (1-based periods `1..=n`).
    pub periods_per_day: u32,
    /// Per-day overrides of the period count.
    pub day_periods: HashMap<String, u32>,
}

impl ScheduleConfig {
    /// Creates a configuration with a uniform period count.
    pub fn new(active_days: Vec<String>, periods_per_day: u32) -> Self {
        Self {
            active_days,
            periods_per_day,
            day_periods: HashMap::new(),
        }
    }

    /// Overrides the period count for one day.
    pub fn with_day_periods(mut self, day: impl Into<String>, periods: u32) -> Self {
        self.day_periods.insert(day.into(), periods);
        self
    }

    /// Number of periods on the given day.
    pub fn periods_for(&self, day: &str) -> u32 {
        self.day_periods.get(day).copied().unwrap_or(self.periods_per_day)
    }

    /// Total (day, period) cells in one week.
    pub fn weekly_periods(&self) -> u32 {
        self.active_days.iter().map(|d| self.periods_for(d)).sum()
    }
}

/// How waiting duty is distributed over idle cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaitingMethod {
    /// Assign a fixed number of waiting teachers per (day, period).
    Fixed,
    /// Fill every eligible free cell until quota caps are hit.
    Auto,
    /// No automatic assignment; the operator distributes by hand.
    Manual,
}

/// Waiting-duty distribution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitingConfig {
    /// Distribution policy.
    pub method: WaitingMethod,
    /// Weekly cap on lessons + waiting per candidate (default 24).
    pub max_total_quota: u32,
    /// Daily cap on lessons + waiting per candidate (default 5).
    pub max_daily_total: u32,
    /// Waiting teachers per (day, period) in [`WaitingMethod::Fixed`].
    pub fixed_per_period: u32,
}

impl WaitingConfig {
    /// Creates a configuration for the given method with default caps.
    pub fn new(method: WaitingMethod) -> Self {
        Self {
            method,
            max_total_quota: 24,
            max_daily_total: 5,
            fixed_per_period: 0,
        }
    }

    /// Sets the weekly total cap.
    pub fn with_max_total(mut self, max_total_quota: u32) -> Self {
        self.max_total_quota = max_total_quota;
        self
    }

    /// Sets the daily total cap.
    pub fn with_max_daily(mut self, max_daily_total: u32) -> Self {
        self.max_daily_total = max_daily_total;
        self
    }

    /// Sets the fixed per-period target.
    pub fn with_fixed_per_period(mut self, fixed_per_period: u32) -> Self {
        self.fixed_per_period = fixed_per_period;
        self
    }
}
