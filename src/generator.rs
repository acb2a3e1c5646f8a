//! Greedy constructive schedule generation.
//!
//! # Algorithm
//!
//! 1. Enumerate every (class, day, period) triple exactly once, in
//!    class-list then active-day then period order. Visiting each triple
//!    once is itself an invariant: no class can structurally receive two
//!    lessons at the same time.
//! 2. For each triple, try the class's eligible subjects in randomized
//!    order (an anti-clustering heuristic, not determinism — inject a
//!    seeded rng via [`ScheduleGenerator::generate_with`] for reproducible
//!    output).
//! 3. The first subject with remaining quota whose assigned teacher is
//!    free, under their daily ceiling, and not excluded at that time gets
//!    the slot. Otherwise the triple stays empty.
//!
//! There is no backtracking and no completeness guarantee: this is a
//! best-effort contract, and schedule quality is expected to be gated by
//! [`crate::validation::validate_inputs`] beforehand, not by the generator.
//!
//! # Reference
//! Schaerf (1999), "A Survey of Automated Timetabling", §3 (direct heuristics)

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::{Grid, Slot, SlotKey};
use crate::models::{
    Assignment, AssignmentIndex, ConstraintSet, ScheduleConfig, SchoolClass, Subject, Teacher,
};

/// Input container for schedule generation.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Available teachers.
    pub teachers: Vec<Teacher>,
    /// Subject catalogue.
    pub subjects: Vec<Subject>,
    /// Classes to schedule, in the order their slots are filled.
    pub classes: Vec<SchoolClass>,
    /// Manual class-subject-teacher assignments (authoritative).
    pub assignments: Vec<Assignment>,
    /// Per-teacher constraints.
    pub constraints: ConstraintSet,
    /// The weekly frame.
    pub config: ScheduleConfig,
    /// Previously locked grid, for independently scheduled sub-schools
    /// sharing one teacher pool. Its occupancy is inherited wholesale.
    pub existing: Option<Grid>,
    /// Drop the balanced daily ceiling and exclusion checks, keeping only
    /// the hard periods-per-day cap.
    pub bypass_constraints: bool,
}

impl GenerationRequest {
    /// Creates a request with no assignments or constraints.
    pub fn new(
        teachers: Vec<Teacher>,
        subjects: Vec<Subject>,
        classes: Vec<SchoolClass>,
        config: ScheduleConfig,
    ) -> Self {
        Self {
            teachers,
            subjects,
            classes,
            assignments: Vec::new(),
            constraints: ConstraintSet::new(),
            config,
            existing: None,
            bypass_constraints: false,
        }
    }

    /// Sets the manual assignments.
    pub fn with_assignments(mut self, assignments: Vec<Assignment>) -> Self {
        self.assignments = assignments;
        self
    }

    /// Sets the teacher constraints.
    pub fn with_constraints(mut self, constraints: ConstraintSet) -> Self {
        self.constraints = constraints;
        self
    }

    /// Seeds generation with a previously locked grid.
    pub fn with_existing(mut self, existing: Grid) -> Self {
        self.existing = Some(existing);
        self
    }

    /// Enables constraint bypassing.
    pub fn with_bypass(mut self, bypass: bool) -> Self {
        self.bypass_constraints = bypass;
        self
    }
}

/// Greedy constructive schedule generator.
///
/// # Example
///
/// ```
/// use timetable_engine::generator::{GenerationRequest, ScheduleGenerator};
/// use timetable_engine::models::{Assignment, ScheduleConfig, SchoolClass, Subject, Teacher};
///
/// let config = ScheduleConfig::new(vec!["sunday".into(), "monday".into()], 4);
/// let request = GenerationRequest::new(
///     vec![Teacher::new("T1")],
///     vec![Subject::new("S1", 3).with_phase("middle")],
///     vec![SchoolClass::new("C1", "middle", 1)],
///     config,
/// )
/// .with_assignments(vec![Assignment::new("C1", "S1", "T1")]);
///
/// let grid = ScheduleGenerator::new().generate(&request, |_| {});
/// assert_eq!(grid.count_assigned("C1", "S1"), 3);
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleGenerator {
    progress_interval: usize,
}

impl ScheduleGenerator {
    /// Creates a generator reporting progress every 10 processed triples.
    pub fn new() -> Self {
        Self {
            progress_interval: 10,
        }
    }

    /// Sets how many triples are processed between progress reports.
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    /// Generates a grid with thread-local randomness (production default).
    pub fn generate<F: FnMut(u8)>(&self, request: &GenerationRequest, on_progress: F) -> Grid {
        self.generate_with(request, &mut rand::rng(), on_progress)
    }

    /// Generates a grid with an injected rng.
    ///
    /// Seeding the rng makes the otherwise randomized subject trial order
    /// reproducible, which tests rely on.
    pub fn generate_with<R, F>(
        &self,
        request: &GenerationRequest,
        rng: &mut R,
        mut on_progress: F,
    ) -> Grid
    where
        R: Rng + ?Sized,
        F: FnMut(u8),
    {
        let mut grid = request.existing.clone().unwrap_or_default();

        let teachers_by_id: HashMap<&str, &Teacher> = request
            .teachers
            .iter()
            .map(|t| (t.id.as_str(), t))
            .collect();
        let assignments = AssignmentIndex::from_assignments(&request.assignments);
        let subjects_by_class = eligible_subjects(request, &assignments);

        let config = &request.config;
        let active_days = config.active_days.len().max(1) as u32;
        let total: usize = request
            .classes
            .iter()
            .map(|_| config.weekly_periods() as usize)
            .sum();

        let mut processed = 0usize;
        for class in &request.classes {
            let candidates = subjects_by_class
                .get(class.id.as_str())
                .map(Vec::as_slice)
                .unwrap_or_default();

            for day in &config.active_days {
                for period in 1..=config.periods_for(day) {
                    let mut trial: Vec<&Subject> = candidates.to_vec();
                    trial.shuffle(rng);

                    for subject in trial {
                        if grid.count_assigned(&class.id, &subject.id) >= subject.periods_per_class
                        {
                            continue;
                        }
                        // Strict mode: no assignment, no lesson. Unknown
                        // teacher ids are skipped rather than raised.
                        let Some(teacher_id) = assignments.teacher_for(&class.id, &subject.id)
                        else {
                            continue;
                        };
                        let Some(teacher) = teachers_by_id.get(teacher_id) else {
                            continue;
                        };

                        let key = SlotKey::new(teacher_id, day.clone(), period);
                        if grid.contains(&key) {
                            continue;
                        }

                        let daily = grid.daily_load(teacher_id, day);
                        if request.bypass_constraints {
                            if daily >= config.periods_for(day) {
                                continue;
                            }
                        } else {
                            if daily >= teacher.quota_limit.div_ceil(active_days) {
                                continue;
                            }
                            if request.constraints.is_excluded(teacher_id, day, period) {
                                continue;
                            }
                        }

                        grid.put(key, Slot::lesson(teacher_id, &subject.id, &class.id));
                        break;
                    }

                    processed += 1;
                    if total > 0 && processed % self.progress_interval == 0 {
                        on_progress((processed * 100 / total) as u8);
                    }
                }
            }
        }

        on_progress(100);
        grid
    }
}

impl Default for ScheduleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Subjects each class may receive: the explicit list when configured,
/// otherwise phase/grade targeting unioned with subjects named by the
/// class's own assignments.
fn eligible_subjects<'a>(
    request: &'a GenerationRequest,
    assignments: &AssignmentIndex,
) -> HashMap<&'a str, Vec<&'a Subject>> {
    let mut map = HashMap::new();
    for class in &request.classes {
        let eligible: Vec<&Subject> = if !class.subject_ids.is_empty() {
            request
                .subjects
                .iter()
                .filter(|s| class.subject_ids.contains(&s.id))
                .collect()
        } else {
            let assigned = assignments.subjects_for_class(&class.id);
            request
                .subjects
                .iter()
                .filter(|s| {
                    s.targets(&class.phase, class.grade) || assigned.contains(&s.id.as_str())
                })
                .collect()
        };
        map.insert(class.id.as_str(), eligible);
    }
    map
}
