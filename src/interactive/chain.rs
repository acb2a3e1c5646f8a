//! Three-party chain-swap resolution.
//!
//! Invoked after [`super::propose_move`] rejects a direct operation. The
//! resolver looks for a rotation of three lesson slots that realizes the
//! operator's intent: the source lesson still lands on the target cell,
//! and the displaced lesson is pushed onward to a third slot instead of
//! straight back. First-fit, not best-fit — the first structurally
//! possible rotation is proposed, without re-checking load or exclusion
//! constraints at the new times (an optimistic proposal for human review;
//! see [`crate::validation::audit_grid`]).

use super::SwapResult;
use crate::grid::{Grid, SlotKey};
use crate::models::{ScheduleConfig, Teacher};

/// Searches for a three-party rotation resolving a rejected move.
///
/// Both `source` and `target` must hold lessons. Two search strategies:
///
/// - **Same teacher**: rotate through a third slot of the same teacher —
///   source→target, target→third, third→source. Candidates are tried in
///   the configured week order (day as listed in
///   [`ScheduleConfig::active_days`], then period) so the result is
///   deterministic and the earliest cell in the week wins.
/// - **Different teachers**: find a third teacher occupying the exact
///   target (day, period); the source class goes to the target teacher,
///   the displaced class to the third teacher, and the third teacher's
///   class to the source teacher's freed cell.
///
/// Returns `None` when no rotation exists; the caller reports a generic
/// failure.
pub fn find_chain_swap(
    grid: &Grid,
    source: &SlotKey,
    target: &SlotKey,
    teachers: &[Teacher],
    config: &ScheduleConfig,
) -> Option<SwapResult> {
    let slot_a = grid.get(source).filter(|s| s.is_lesson())?.clone();
    let slot_b = grid.get(target).filter(|s| s.is_lesson())?.clone();

    if source.teacher_id == target.teacher_id {
        let teacher_id = &source.teacher_id;
        // Days not in the active list sort last, in name order.
        let day_index = |day: &str| {
            config
                .active_days
                .iter()
                .position(|d| d == day)
                .unwrap_or(usize::MAX)
        };
        let mut candidates: Vec<&SlotKey> = grid
            .teacher_slots(teacher_id)
            .filter(|(k, s)| s.is_lesson() && *k != source && *k != target)
            .map(|(k, _)| k)
            .collect();
        candidates.sort_by(|a, b| {
            (day_index(&a.day), &a.day, a.period).cmp(&(day_index(&b.day), &b.day, b.period))
        });

        let third: SlotKey = (*candidates.first()?).clone();
        let slot_c = grid.get(&third)?.clone();

        let mut new_grid = grid.clone();
        new_grid.put(target.clone(), slot_a.clone());
        new_grid.put(third.clone(), slot_b.clone());
        new_grid.put(source.clone(), slot_c.clone());

        let steps = vec![
            rotation_step(&slot_a, source, target),
            rotation_step(&slot_b, target, &third),
            rotation_step(&slot_c, &third, source),
        ];
        return Some(SwapResult::chain(
            new_grid,
            steps,
            vec![teacher_id.clone()],
        ));
    }

    // Different teachers: push the displaced lesson to a third teacher who
    // is busy at the exact target time, closing the triangle through the
    // source teacher's freed cell.
    for third_teacher in teachers {
        if third_teacher.id == source.teacher_id || third_teacher.id == target.teacher_id {
            continue;
        }
        let third = target.for_teacher(third_teacher.id.clone());
        let Some(slot_c) = grid.get(&third).filter(|s| s.is_lesson()).cloned() else {
            continue;
        };

        let mut new_grid = grid.clone();
        new_grid.put(target.clone(), slot_a.reassigned(target.teacher_id.clone()));
        new_grid.put(third.clone(), slot_b.reassigned(third_teacher.id.clone()));
        new_grid.put(source.clone(), slot_c.reassigned(source.teacher_id.clone()));

        let steps = vec![
            rotation_step(&slot_a, source, target),
            rotation_step(&slot_b, target, &third),
            rotation_step(&slot_c, &third, source),
        ];
        return Some(SwapResult::chain(
            new_grid,
            steps,
            vec![
                source.teacher_id.clone(),
                target.teacher_id.clone(),
                third_teacher.id.clone(),
            ],
        ));
    }

    None
}

fn rotation_step(slot: &crate::grid::Slot, from: &SlotKey, to: &SlotKey) -> String {
    let class_id = slot.class_id.as_deref().unwrap_or("?");
    format!(
        "{class_id}: {} ({} p{}) -> {} ({} p{})",
        from.teacher_id, from.day, from.period, to.teacher_id, to.day, to.period
    )
}
