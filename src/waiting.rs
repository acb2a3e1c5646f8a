//! Waiting-duty distribution.
//!
//! After the lesson grid is locked, idle cells are filled with waiting
//! duty. Candidates are teachers plus administrative staff (who carry no
//! lesson load at all); each (day, period) is considered in turn and free
//! candidates are ordered ascending by their current total load, biasing
//! assignment toward the least loaded. The distributor is idempotent with
//! respect to waiting slots already in the grid: it only ever adds new
//! ones into still-free cells.

use crate::grid::{Grid, Slot, SlotKey, SlotKind};
use crate::models::{AdminStaff, ScheduleConfig, Teacher, WaitingConfig, WaitingMethod};

/// Distributes waiting duty over a finalized lesson grid.
///
/// # Example
///
/// ```
/// use timetable_engine::grid::Grid;
/// use timetable_engine::models::{ScheduleConfig, Teacher, WaitingConfig, WaitingMethod};
/// use timetable_engine::waiting::WaitingDistributor;
///
/// let config = WaitingConfig::new(WaitingMethod::Fixed).with_fixed_per_period(1);
/// let distributor = WaitingDistributor::new(config);
/// let schedule = ScheduleConfig::new(vec!["sunday".into()], 2);
/// let teachers = vec![Teacher::new("T1"), Teacher::new("T2")];
///
/// let grid = distributor.distribute(&Grid::new(), &teachers, &[], &schedule);
/// assert_eq!(grid.len(), 2); // one waiting slot per period
/// ```
#[derive(Debug, Clone)]
pub struct WaitingDistributor {
    config: WaitingConfig,
}

impl WaitingDistributor {
    /// Creates a distributor with the given policy.
    pub fn new(config: WaitingConfig) -> Self {
        Self { config }
    }

    /// Returns a copy of `grid` with waiting duty added.
    ///
    /// Existing slots (lessons and prior waiting duty) are never removed
    /// or reassigned. In [`WaitingMethod::Manual`] the grid is returned
    /// unchanged. Callers own the decision to adopt or discard the result.
    pub fn distribute(
        &self,
        grid: &Grid,
        teachers: &[Teacher],
        admins: &[AdminStaff],
        schedule: &ScheduleConfig,
    ) -> Grid {
        let mut new_grid = grid.clone();
        if self.config.method == WaitingMethod::Manual {
            return new_grid;
        }

        let candidates: Vec<&str> = teachers
            .iter()
            .map(|t| t.id.as_str())
            .chain(admins.iter().map(|a| a.id.as_str()))
            .collect();

        for day in &schedule.active_days {
            for period in 1..=schedule.periods_for(day) {
                let mut free: Vec<&str> = candidates
                    .iter()
                    .copied()
                    .filter(|id| !new_grid.contains(&SlotKey::new(*id, day.clone(), period)))
                    .collect();
                // Fairness bias: least total load first. The sort is
                // stable, so ties keep the caller's candidate order.
                free.sort_by_key(|id| new_grid.teacher_load(id).total());

                match self.config.method {
                    WaitingMethod::Fixed => {
                        // Waiting slots already present at this cell count
                        // toward the target (idempotent re-runs).
                        let mut assigned = candidates
                            .iter()
                            .filter(|id| {
                                new_grid
                                    .get(&SlotKey::new(**id, day.clone(), period))
                                    .is_some_and(|s| s.kind == SlotKind::Waiting)
                            })
                            .count() as u32;

                        for id in free {
                            if assigned >= self.config.fixed_per_period {
                                break;
                            }
                            if self.assign_if_eligible(&mut new_grid, id, day, period) {
                                assigned += 1;
                            }
                        }
                    }
                    WaitingMethod::Auto => {
                        for id in free {
                            self.assign_if_eligible(&mut new_grid, id, day, period);
                        }
                    }
                    WaitingMethod::Manual => unreachable!(),
                }
            }
        }

        new_grid
    }

    /// Places a waiting slot when both quota caps leave room. Loads are
    /// checked live, so earlier placements in the same run count.
    fn assign_if_eligible(&self, grid: &mut Grid, id: &str, day: &str, period: u32) -> bool {
        if grid.teacher_load(id).total() >= self.config.max_total_quota {
            return false;
        }
        if grid.daily_load(id, day) >= self.config.max_daily_total {
            return false;
        }
        grid.put(SlotKey::new(id, day, period), Slot::waiting(id));
        true
    }
}
