//! Per-teacher scheduling constraints.
//!
//! Constraints are advisory: the generator honors them by default but the
//! caller may deliberately bypass them (`bypass_constraints`), and the
//! interactive engines do not re-check them at all — [`crate::validation`]
//! provides the explicit re-check instead.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-day presence limits for a teacher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLimit {
    /// Minimum lessons that day.
    pub min: u32,
    /// Maximum lessons that day.
    pub max: u32,
    /// First period the teacher is present (optional window start).
    pub window_start: Option<u32>,
    /// Last period the teacher is present (optional window end).
    pub window_end: Option<u32>,
}

/// Scheduling constraints for one teacher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherConstraint {
    /// Teacher these constraints apply to.
    pub teacher_id: String,
    /// Maximum consecutive lessons (default 4).
    pub max_consecutive: u32,
    /// Day → periods the teacher must not be scheduled in.
    pub excluded_slots: HashMap<String, Vec<u32>>,
    /// Day → presence limits.
    pub daily_limits: HashMap<String, DailyLimit>,
    /// Weekly cap on first-period lessons.
    pub max_first_periods: Option<u32>,
    /// Weekly cap on last-period lessons.
    pub max_last_periods: Option<u32>,
    /// Day → last allowed period (early exit).
    pub early_exit: HashMap<String, u32>,
}

impl TeacherConstraint {
    /// Creates an empty constraint record for a teacher.
    pub fn new(teacher_id: impl Into<String>) -> Self {
        Self {
            teacher_id: teacher_id.into(),
            max_consecutive: 4,
            excluded_slots: HashMap::new(),
            daily_limits: HashMap::new(),
            max_first_periods: None,
            max_last_periods: None,
            early_exit: HashMap::new(),
        }
    }

    /// Excludes specific periods on a day.
    pub fn with_excluded(mut self, day: impl Into<String>, periods: Vec<u32>) -> Self {
        self.excluded_slots.insert(day.into(), periods);
        self
    }

    /// Sets presence limits for a day.
    pub fn with_daily_limit(mut self, day: impl Into<String>, limit: DailyLimit) -> Self {
        self.daily_limits.insert(day.into(), limit);
        self
    }

    /// Sets the early-exit period for a day (no lessons after it).
    pub fn with_early_exit(mut self, day: impl Into<String>, last_period: u32) -> Self {
        self.early_exit.insert(day.into(), last_period);
        self
    }

    /// Sets the weekly first-period cap.
    pub fn with_max_first_periods(mut self, max: u32) -> Self {
        self.max_first_periods = Some(max);
        self
    }

    /// Sets the weekly last-period cap.
    pub fn with_max_last_periods(mut self, max: u32) -> Self {
        self.max_last_periods = Some(max);
        self
    }

    /// Whether (day, period) is excluded for this teacher, either
    /// explicitly or by falling after the day's early-exit period.
    pub fn excludes(&self, day: &str, period: u32) -> bool {
        if let Some(periods) = self.excluded_slots.get(day) {
            if periods.contains(&period) {
                return true;
            }
        }
        match self.early_exit.get(day) {
            Some(&last) => period > last,
            None => false,
        }
    }
}

/// Teacher constraints indexed by teacher id.
#[derive(Debug, Clone, Default)]
pub struct ConstraintSet {
    by_teacher: HashMap<String, TeacherConstraint>,
}

impl ConstraintSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the set from a constraint list. Later records for the same
    /// teacher replace earlier ones.
    pub fn from_constraints(constraints: Vec<TeacherConstraint>) -> Self {
        let mut by_teacher = HashMap::new();
        for c in constraints {
            by_teacher.insert(c.teacher_id.clone(), c);
        }
        Self { by_teacher }
    }

    /// Builder: adds a constraint record.
    pub fn with_constraint(mut self, constraint: TeacherConstraint) -> Self {
        self.by_teacher.insert(constraint.teacher_id.clone(), constraint);
        self
    }

    /// Returns the constraint record for a teacher, if any.
    pub fn get(&self, teacher_id: &str) -> Option<&TeacherConstraint> {
        self.by_teacher.get(teacher_id)
    }

    /// Whether (day, period) is excluded for a teacher.
    ///
    /// Teachers without a constraint record have no exclusions.
    pub fn is_excluded(&self, teacher_id: &str, day: &str, period: u32) -> bool {
        self.by_teacher
            .get(teacher_id)
            .is_some_and(|c| c.excludes(day, period))
    }

    /// Iterates over all constraint records.
    pub fn iter(&self) -> impl Iterator<Item = &TeacherConstraint> {
        self.by_teacher.values()
    }

    /// Number of constrained teachers.
    pub fn len(&self) -> usize {
        self.by_teacher.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.by_teacher.is_empty()
    }
}
