//! Pre-flight input validation and post-hoc grid auditing.
//!
//! [`validate_inputs`] detects deadlocks before generation: duplicate
//! ids, dangling assignment references, and teachers whose constraints
//! leave fewer available periods than their weekly quota. Findings are
//! warnings, not errors — generation proceeds regardless, and the
//! caller decides what to surface.
//!
//! [`audit_grid`] is the inverse direction: given a finished (or
//! proposed) grid it reports every hard-constraint breach. The
//! interactive engines propose moves optimistically, so callers that
//! want a guarantee run the audit on the proposal before committing it.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::grid::{Grid, SlotKey};
use crate::models::{
    Assignment, ConstraintSet, ScheduleConfig, SchoolClass, Subject, Teacher, WaitingConfig,
    WaitingMethod,
};

/// Severity of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningLevel {
    Info,
    Warning,
    /// Generation or the audited grid is infeasible as configured.
    Error,
}

/// A single validation finding.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationWarning {
    /// Stable identifier, unique per finding kind and subject.
    pub id: String,
    pub level: WarningLevel,
    pub message: String,
    /// Suggested remediation, when one is obvious.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Id of the teacher/subject/class the finding concerns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_id: Option<String>,
}

impl ValidationWarning {
    fn new(id: impl Into<String>, level: WarningLevel, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            level,
            message: message.into(),
            suggestion: None,
            related_id: None,
        }
    }

    fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    fn related(mut self, id: impl Into<String>) -> Self {
        self.related_id = Some(id.into());
        self
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.level, self.message)
    }
}

/// Maximum lessons of one subject a class should take per day: one while
/// the weekly quota fits in single periods, two once it no longer does.
pub fn max_daily_periods_for_subject(periods_per_class: u32, week_days: u32) -> u32 {
    if periods_per_class <= week_days {
        1
    } else {
        2
    }
}

/// Splits a subject's weekly quota into (single-period days,
/// double-period days).
pub fn quota_distribution(periods_per_class: u32, week_days: u32) -> (u32, u32) {
    if periods_per_class <= week_days {
        return (periods_per_class, 0);
    }
    let doubles = (periods_per_class - week_days).min(week_days);
    (week_days - doubles, doubles)
}

/// Validates generation inputs and returns every finding.
///
/// Checks:
/// 1. Duplicate teacher, subject, and class ids.
/// 2. Assignments referencing unknown teachers, subjects, or classes.
/// 3. Per-teacher weekly availability — periods minus exclusions and
///    early-exit cutoffs, intersected with daily presence windows —
///    against `quota_limit`.
/// 4. Inconsistent daily limits (`min > max`, window vs early exit).
/// 5. Aggregate last-period capacity (per-teacher `max_last_periods`,
///    assumed 5 where unset) against the classes' weekly demand.
/// 6. Fixed-waiting capacity: the per-period headroom
///    `Σ max(0, max_total_quota − quota_limit) / weekly_periods` against
///    `fixed_per_period`.
pub fn validate_inputs(
    teachers: &[Teacher],
    subjects: &[Subject],
    classes: &[SchoolClass],
    assignments: &[Assignment],
    constraints: &ConstraintSet,
    config: &ScheduleConfig,
    waiting: &WaitingConfig,
) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let teacher_ids = check_duplicates(teachers.iter().map(|t| &t.id), "teacher", &mut warnings);
    let subject_ids = check_duplicates(subjects.iter().map(|s| &s.id), "subject", &mut warnings);
    let class_ids = check_duplicates(classes.iter().map(|c| &c.id), "class", &mut warnings);

    for a in assignments {
        for (kind, id, known) in [
            ("teacher", &a.teacher_id, &teacher_ids),
            ("subject", &a.subject_id, &subject_ids),
            ("class", &a.class_id, &class_ids),
        ] {
            if !known.contains_key(id.as_str()) {
                warnings.push(
                    ValidationWarning::new(
                        format!("assign-ref-{kind}-{id}"),
                        WarningLevel::Error,
                        format!(
                            "assignment ({}, {}) references unknown {kind} \"{id}\"",
                            a.class_id, a.subject_id
                        ),
                    )
                    .related(id.clone()),
                );
            }
        }
    }

    for teacher in teachers {
        check_teacher_availability(teacher, constraints, config, &mut warnings);
    }

    // Every class needs a staffed last period each day; compare that
    // demand against the teachers' combined last-period capacity.
    if !classes.is_empty() {
        let capacity: u32 = teachers
            .iter()
            .map(|t| {
                constraints
                    .get(&t.id)
                    .and_then(|c| c.max_last_periods)
                    .unwrap_or(5)
            })
            .sum();
        let demand = classes.len() as u32 * config.active_days.len() as u32;
        if capacity < demand {
            warnings.push(
                ValidationWarning::new(
                    "global-last-period",
                    WarningLevel::Warning,
                    format!(
                        "expected last-period shortfall: weekly capacity ({capacity}) is \
                         below demand ({demand})"
                    ),
                )
                .suggest("raise teachers' last-period caps"),
            );
        }
    }

    if waiting.method == WaitingMethod::Fixed && waiting.fixed_per_period > 0 {
        let total_gaps: u32 = teachers
            .iter()
            .map(|t| waiting.max_total_quota.saturating_sub(t.quota_limit))
            .sum();
        let weekly = config.weekly_periods();
        let per_period = if weekly > 0 { total_gaps / weekly } else { 0 };
        if waiting.fixed_per_period > per_period {
            warnings.push(
                ValidationWarning::new(
                    "waiting-deficit",
                    WarningLevel::Warning,
                    format!(
                        "{} waiting teachers requested per period but teacher quota \
                         headroom only covers {per_period}",
                        waiting.fixed_per_period
                    ),
                )
                .suggest(format!("closest feasible target: {per_period}")),
            );
        }
    }

    warnings
}

fn check_duplicates<'a>(
    ids: impl Iterator<Item = &'a String>,
    kind: &str,
    warnings: &mut Vec<ValidationWarning>,
) -> HashMap<&'a str, u32> {
    let mut seen: HashMap<&str, u32> = HashMap::new();
    for id in ids {
        let count = seen.entry(id.as_str()).or_insert(0);
        *count += 1;
        if *count == 2 {
            warnings.push(
                ValidationWarning::new(
                    format!("dup-{kind}-{id}"),
                    WarningLevel::Error,
                    format!("duplicate {kind} id \"{id}\""),
                )
                .related(id.clone()),
            );
        }
    }
    seen
}

/// Counts a teacher's truly available periods, day by day, and flags
/// configurations that cannot reach the weekly quota.
fn check_teacher_availability(
    teacher: &Teacher,
    constraints: &ConstraintSet,
    config: &ScheduleConfig,
    warnings: &mut Vec<ValidationWarning>,
) {
    let Some(tc) = constraints.get(&teacher.id) else {
        return;
    };

    let mut weekly_available = 0u32;
    for day in &config.active_days {
        let periods = config.periods_for(day);
        let effective_end = match tc.early_exit.get(day) {
            Some(&exit) => exit.min(periods),
            None => periods,
        };
        let excluded = |start: u32, end: u32| {
            tc.excluded_slots
                .get(day)
                .map(|ps| ps.iter().filter(|p| (start..=end).contains(p)).count() as u32)
                .unwrap_or(0)
        };
        let mut day_available = effective_end.saturating_sub(excluded(1, effective_end));

        if let Some(limit) = tc.daily_limits.get(day) {
            if let (Some(ws), Some(we)) = (limit.window_start, limit.window_end) {
                let start = ws.max(1);
                let end = we.min(effective_end);
                if start > end {
                    day_available = 0;
                    if tc.early_exit.contains_key(day) {
                        warnings.push(
                            ValidationWarning::new(
                                format!("window-early-exit-{}-{day}", teacher.id),
                                WarningLevel::Error,
                                format!(
                                    "\"{}\" on {day}: presence window {ws}-{we} conflicts \
                                     with early exit after period {effective_end}",
                                    teacher.name
                                ),
                            )
                            .suggest("move the exit period or widen the window")
                            .related(teacher.id.clone()),
                        );
                    }
                } else {
                    day_available = (end - start + 1).saturating_sub(excluded(start, end));
                }
            }

            if limit.min > limit.max {
                warnings.push(
                    ValidationWarning::new(
                        format!("daily-minmax-{}-{day}", teacher.id),
                        WarningLevel::Error,
                        format!(
                            "\"{}\" on {day}: daily minimum ({}) exceeds maximum ({})",
                            teacher.name, limit.min, limit.max
                        ),
                    )
                    .related(teacher.id.clone()),
                );
            }
            if day_available < limit.min {
                warnings.push(
                    ValidationWarning::new(
                        format!("daily-min-{}-{day}", teacher.id),
                        WarningLevel::Error,
                        format!(
                            "\"{}\" on {day}: daily minimum ({}) exceeds the {} actually \
                             available period(s)",
                            teacher.name, limit.min, day_available
                        ),
                    )
                    .suggest("lower the minimum or relax exclusions")
                    .related(teacher.id.clone()),
                );
            }
        }

        weekly_available += day_available;
    }

    if weekly_available < teacher.quota_limit {
        warnings.push(
            ValidationWarning::new(
                format!("quota-conflict-{}", teacher.id),
                WarningLevel::Error,
                format!(
                    "\"{}\": weekly quota ({}) exceeds the {} available period(s)",
                    teacher.name, teacher.quota_limit, weekly_available
                ),
            )
            .suggest("relax exclusions or early-exit constraints")
            .related(teacher.id.clone()),
        );
    }
}

/// Audits a grid against the hard constraints and reports every breach.
///
/// Intended as the re-check for optimistically proposed grids (chain
/// swaps in particular), and as a sanity pass over externally supplied
/// grids. Findings:
///
/// - a class taught by two teachers at the same (day, period) — error;
/// - a slot inside a teacher's excluded periods — error;
/// - a class holding more lessons of a subject than its weekly quota —
///   warning;
/// - a teacher's daily load above `ceil(quota_limit / active_days)` —
///   warning (the generator's ceiling, legitimately exceeded under
///   constraint bypass).
pub fn audit_grid(
    grid: &Grid,
    teachers: &[Teacher],
    subjects: &[Subject],
    constraints: &ConstraintSet,
    config: &ScheduleConfig,
) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // The grid's own class index keeps one key per cell, so double
    // bookings are found by rescanning the raw slots.
    let mut by_class_time: HashMap<(&str, u32, &str), Vec<&SlotKey>> = HashMap::new();
    for (key, slot) in grid.iter() {
        if let Some(class_id) = slot.class_id.as_deref() {
            by_class_time
                .entry((key.day.as_str(), key.period, class_id))
                .or_default()
                .push(key);
        }
        if constraints.is_excluded(&key.teacher_id, &key.day, key.period) {
            warnings.push(
                ValidationWarning::new(
                    format!("audit-excluded-{key}"),
                    WarningLevel::Error,
                    format!(
                        "teacher {} is scheduled at {} period {} inside an excluded slot",
                        key.teacher_id, key.day, key.period
                    ),
                )
                .related(key.teacher_id.clone()),
            );
        }
    }
    for ((day, period, class_id), mut keys) in by_class_time {
        if keys.len() > 1 {
            keys.sort_by(|a, b| a.teacher_id.cmp(&b.teacher_id));
            warnings.push(
                ValidationWarning::new(
                    format!("audit-class-{class_id}-{day}-{period}"),
                    WarningLevel::Error,
                    format!(
                        "class {class_id} has {} simultaneous lessons at {day} period \
                         {period} (teachers {})",
                        keys.len(),
                        keys.iter()
                            .map(|k| k.teacher_id.as_str())
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                )
                .related(class_id.to_string()),
            );
        }
    }

    let mut lesson_counts: HashMap<(&str, &str), u32> = HashMap::new();
    for (_, slot) in grid.iter() {
        if let (Some(class_id), Some(subject_id)) =
            (slot.class_id.as_deref(), slot.subject_id.as_deref())
        {
            *lesson_counts.entry((class_id, subject_id)).or_insert(0) += 1;
        }
    }
    for subject in subjects {
        for ((class_id, subject_id), count) in &lesson_counts {
            if *subject_id == subject.id && *count > subject.periods_per_class {
                warnings.push(
                    ValidationWarning::new(
                        format!("audit-quota-{class_id}-{subject_id}"),
                        WarningLevel::Warning,
                        format!(
                            "class {class_id} holds {count} lessons of {} (weekly quota {})",
                            subject.name, subject.periods_per_class
                        ),
                    )
                    .related(subject.id.clone()),
                );
            }
        }
    }

    let days = config.active_days.len().max(1) as u32;
    for teacher in teachers {
        let ceiling = teacher.quota_limit.div_ceil(days);
        for day in &config.active_days {
            let load = grid.daily_load(&teacher.id, day);
            if load > ceiling {
                warnings.push(
                    ValidationWarning::new(
                        format!("audit-daily-{}-{day}", teacher.id),
                        WarningLevel::Warning,
                        format!(
                            "teacher {} carries {load} slots on {day}, above the daily \
                             ceiling of {ceiling}",
                            teacher.id
                        ),
                    )
                    .related(teacher.id.clone()),
                );
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Slot;
    use crate::models::{DailyLimit, TeacherConstraint};

    fn week() -> ScheduleConfig {
        let days = ["sunday", "monday", "tuesday", "wednesday", "thursday"]
            .iter()
            .map(|d| d.to_string())
            .collect();
        ScheduleConfig::new(days, 7)
    }

    fn no_waiting() -> WaitingConfig {
        WaitingConfig::new(WaitingMethod::Manual)
    }

    fn validate(
        teachers: &[Teacher],
        constraints: &ConstraintSet,
        waiting: &WaitingConfig,
    ) -> Vec<ValidationWarning> {
        validate_inputs(teachers, &[], &[], &[], constraints, &week(), waiting)
    }

    #[test]
    fn test_clean_inputs_produce_no_warnings() {
        let teachers = vec![Teacher::new("T1").with_quota(20)];
        let warnings = validate(&teachers, &ConstraintSet::new(), &no_waiting());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_duplicate_ids_flagged_once() {
        let teachers = vec![Teacher::new("T1"), Teacher::new("T1"), Teacher::new("T1")];
        let warnings = validate(&teachers, &ConstraintSet::new(), &no_waiting());
        let dups: Vec<_> = warnings.iter().filter(|w| w.id == "dup-teacher-T1").collect();
        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].level, WarningLevel::Error);
    }

    #[test]
    fn test_dangling_assignment_references() {
        let teachers = vec![Teacher::new("T1")];
        let subjects = vec![Subject::new("S1", 4).with_name("math")];
        let classes = vec![SchoolClass::new("C1", "primary", 1).with_name("1-A")];
        let assignments = vec![Assignment::new("C1", "S9", "T1")];

        let warnings = validate_inputs(
            &teachers,
            &subjects,
            &classes,
            &assignments,
            &ConstraintSet::new(),
            &week(),
            &no_waiting(),
        );
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].related_id.as_deref(), Some("S9"));
        assert!(warnings[0].message.contains("unknown subject"));
    }

    #[test]
    fn test_quota_exceeds_availability_after_exclusions() {
        // 35 weekly periods, 24 quota, but 3 exclusions per day leave 20.
        let teachers = vec![Teacher::new("T1")];
        let mut tc = TeacherConstraint::new("T1");
        for day in ["sunday", "monday", "tuesday", "wednesday", "thursday"] {
            tc = tc.with_excluded(day, vec![1, 2, 3]);
        }
        let constraints = ConstraintSet::new().with_constraint(tc);

        let warnings = validate(&teachers, &constraints, &no_waiting());
        assert!(warnings.iter().any(|w| w.id == "quota-conflict-T1"));
    }

    #[test]
    fn test_early_exit_counts_against_availability() {
        // Exit after period 4 every day: 20 available < quota 24.
        let teachers = vec![Teacher::new("T1")];
        let mut tc = TeacherConstraint::new("T1");
        for day in ["sunday", "monday", "tuesday", "wednesday", "thursday"] {
            tc = tc.with_early_exit(day, 4);
        }
        let constraints = ConstraintSet::new().with_constraint(tc);

        let warnings = validate(&teachers, &constraints, &no_waiting());
        assert!(warnings.iter().any(|w| w.id == "quota-conflict-T1"));

        // Quota 20 fits exactly.
        let teachers = vec![Teacher::new("T1").with_quota(20)];
        let warnings = validate(&teachers, &constraints, &no_waiting());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_daily_min_greater_than_max() {
        let teachers = vec![Teacher::new("T1").with_quota(5)];
        let constraints = ConstraintSet::new().with_constraint(
            TeacherConstraint::new("T1").with_daily_limit(
                "sunday",
                DailyLimit { min: 5, max: 2, window_start: None, window_end: None },
            ),
        );

        let warnings = validate(&teachers, &constraints, &no_waiting());
        assert!(warnings.iter().any(|w| w.id == "daily-minmax-T1-sunday"));
    }

    #[test]
    fn test_window_conflicts_with_early_exit() {
        // Present only periods 5-7, but leaves after period 3.
        let teachers = vec![Teacher::new("T1").with_quota(10)];
        let constraints = ConstraintSet::new().with_constraint(
            TeacherConstraint::new("T1")
                .with_early_exit("sunday", 3)
                .with_daily_limit(
                    "sunday",
                    DailyLimit { min: 0, max: 3, window_start: Some(5), window_end: Some(7) },
                ),
        );

        let warnings = validate(&teachers, &constraints, &no_waiting());
        assert!(warnings.iter().any(|w| w.id == "window-early-exit-T1-sunday"));
    }

    #[test]
    fn test_last_period_capacity_shortfall() {
        // Three classes over 5 days need 15 staffed last periods; two
        // teachers capped at 3 each provide only 6.
        let teachers = vec![Teacher::new("T1"), Teacher::new("T2")];
        let classes: Vec<SchoolClass> = (1..=3)
            .map(|n| SchoolClass::new(format!("C{n}"), "middle", 1))
            .collect();
        let constraints = ConstraintSet::new()
            .with_constraint(TeacherConstraint::new("T1").with_max_last_periods(3))
            .with_constraint(TeacherConstraint::new("T2").with_max_last_periods(3));

        let warnings = validate_inputs(
            &teachers,
            &[],
            &classes,
            &[],
            &constraints,
            &week(),
            &no_waiting(),
        );
        assert!(warnings.iter().any(|w| w.id == "global-last-period"));
    }

    #[test]
    fn test_fixed_waiting_deficit() {
        // Two teachers with 2 spare periods each = 4 gaps over 35 weekly
        // periods → 0 waiting teachers sustainable, 2 requested.
        let teachers = vec![
            Teacher::new("T1").with_quota(22),
            Teacher::new("T2").with_quota(22),
        ];
        let waiting = WaitingConfig::new(WaitingMethod::Fixed).with_fixed_per_period(2);

        let warnings = validate(&teachers, &ConstraintSet::new(), &waiting);
        let deficit = warnings.iter().find(|w| w.id == "waiting-deficit").unwrap();
        assert_eq!(deficit.level, WarningLevel::Warning);
        assert_eq!(deficit.suggestion.as_deref(), Some("closest feasible target: 0"));
    }

    #[test]
    fn test_subject_spread_helpers() {
        assert_eq!(max_daily_periods_for_subject(4, 5), 1);
        assert_eq!(max_daily_periods_for_subject(7, 5), 2);

        assert_eq!(quota_distribution(4, 5), (4, 0));
        assert_eq!(quota_distribution(7, 5), (3, 2));
        assert_eq!(quota_distribution(10, 5), (0, 5));
    }

    #[test]
    fn test_audit_detects_class_double_booking() {
        let mut grid = Grid::new();
        grid.put(SlotKey::new("T1", "sunday", 1), Slot::lesson("T1", "S1", "C1"));
        grid.put(SlotKey::new("T2", "sunday", 1), Slot::lesson("T2", "S2", "C1"));

        let warnings = audit_grid(&grid, &[], &[], &ConstraintSet::new(), &week());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].id, "audit-class-C1-sunday-1");
        assert!(warnings[0].message.contains("T1, T2"));
    }

    #[test]
    fn test_audit_detects_exclusion_violation() {
        let mut grid = Grid::new();
        grid.put(SlotKey::new("T1", "sunday", 1), Slot::lesson("T1", "S1", "C1"));
        let constraints = ConstraintSet::new()
            .with_constraint(TeacherConstraint::new("T1").with_excluded("sunday", vec![1]));

        let warnings = audit_grid(&grid, &[], &[], &constraints, &week());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].id.starts_with("audit-excluded-"));
        assert_eq!(warnings[0].level, WarningLevel::Error);
    }

    #[test]
    fn test_audit_detects_subject_quota_overrun() {
        let subjects = vec![Subject::new("S1", 2).with_name("math")];
        let mut grid = Grid::new();
        for p in 1..=3 {
            grid.put(SlotKey::new("T1", "sunday", p), Slot::lesson("T1", "S1", "C1"));
        }

        let warnings = audit_grid(&grid, &[], &subjects, &ConstraintSet::new(), &week());
        assert!(warnings.iter().any(|w| w.id == "audit-quota-C1-S1"));
    }

    #[test]
    fn test_audit_detects_daily_ceiling_overrun() {
        // quota 24 over 5 days → ceiling 5; 6 slots on sunday overruns it.
        let teachers = vec![Teacher::new("T1")];
        let mut grid = Grid::new();
        for p in 1..=6 {
            grid.put(
                SlotKey::new("T1", "sunday", p),
                Slot::lesson("T1", "S1", format!("C{p}")),
            );
        }

        let warnings = audit_grid(&grid, &teachers, &[], &ConstraintSet::new(), &week());
        assert!(warnings.iter().any(|w| w.id == "audit-daily-T1-sunday"));
    }

    #[test]
    fn test_audit_passes_clean_grid() {
        let teachers = vec![Teacher::new("T1")];
        let subjects = vec![Subject::new("S1", 4).with_name("math")];
        let mut grid = Grid::new();
        grid.put(SlotKey::new("T1", "sunday", 1), Slot::lesson("T1", "S1", "C1"));
        grid.put(SlotKey::new("T1", "monday", 1), Slot::lesson("T1", "S1", "C1"));

        let warnings = audit_grid(&grid, &teachers, &subjects, &ConstraintSet::new(), &week());
        assert!(warnings.is_empty());
    }
}
