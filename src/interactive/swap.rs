//! Direct two-party move/swap.

use super::SwapResult;
use crate::grid::{Grid, SlotKey};

/// Proposes relocating the lesson at `source` to the `target` key.
///
/// If `target` holds a lesson the two trade places (each slot reassigned
/// to the key's teacher); if it is empty the source cell is simply
/// vacated. Each validity check produces a distinct failure reason:
///
/// 1. `source` must hold a lesson.
/// 2. When the teachers differ, the moving teacher must not already be
///    busy at the target time under another class, and — if `target` held
///    a lesson — the receiving teacher must not already be busy at the
///    source time.
/// 3. Neither relocated class may end up taught twice at the same
///    (day, period).
///
/// Teacher load and exclusion constraints are not re-validated here; see
/// the module docs.
pub fn propose_move(grid: &Grid, source: &SlotKey, target: &SlotKey) -> SwapResult {
    let Some(source_slot) = grid.get(source).cloned() else {
        return SwapResult::failure("source slot is empty");
    };
    let target_slot = grid.get(target).cloned();

    if source.teacher_id != target.teacher_id {
        // Would the moving teacher be double-booked at the target time?
        let mover_key = target.for_teacher(source.teacher_id.clone());
        if let Some(occupant) = grid.get(&mover_key) {
            let displaced_class = target_slot.as_ref().and_then(|s| s.class_id.as_deref());
            if occupant.class_id.as_deref() != displaced_class {
                return SwapResult::failure(format!(
                    "moving teacher is already busy at {} period {}",
                    target.day, target.period
                ));
            }
        }
        // And the receiving teacher at the source time?
        if target_slot.is_some() {
            let receiver_key = source.for_teacher(target.teacher_id.clone());
            if grid.contains(&receiver_key) {
                return SwapResult::failure(format!(
                    "receiving teacher is already busy at {} period {}",
                    source.day, source.period
                ));
            }
        }
    }

    // The moving class must not already be taught elsewhere at the target
    // time. The class-occupancy index makes this O(1).
    if let Some(class_id) = source_slot.class_id.as_deref() {
        if let Some(occupied) = grid.class_at(&target.day, target.period, class_id) {
            if occupied != target {
                return SwapResult::failure(format!(
                    "class {class_id} already has another lesson at {} period {}",
                    target.day, target.period
                ));
            }
        }
    }

    // Same for the displaced class back at the source time.
    if let Some(class_id) = target_slot.as_ref().and_then(|s| s.class_id.as_deref()) {
        if let Some(occupied) = grid.class_at(&source.day, source.period, class_id) {
            if occupied != source {
                return SwapResult::failure(format!(
                    "class {class_id} already has another lesson at its original time {} period {}",
                    source.day, source.period
                ));
            }
        }
    }

    let mut new_grid = grid.clone();
    new_grid.remove(source);
    new_grid.put(target.clone(), source_slot.reassigned(target.teacher_id.clone()));
    if let Some(displaced) = &target_slot {
        new_grid.put(source.clone(), displaced.reassigned(source.teacher_id.clone()));
    }

    let moved = source_slot.class_id.as_deref().unwrap_or("?");
    let displaced = target_slot
        .as_ref()
        .and_then(|s| s.class_id.as_deref())
        .unwrap_or("empty");
    let step = format!(
        "direct swap: {moved} ({} p{}) <-> {displaced} ({} p{})",
        source.day, source.period, target.day, target.period
    );

    let mut related = vec![source.teacher_id.clone()];
    if target.teacher_id != source.teacher_id {
        related.push(target.teacher_id.clone());
    }
    SwapResult::direct(new_grid, step, related)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Slot;

    fn key(t: &str, d: &str, p: u32) -> SlotKey {
        SlotKey::new(t, d, p)
    }

    fn lesson(g: &mut Grid, t: &str, d: &str, p: u32, s: &str, c: &str) {
        g.put(key(t, d, p), Slot::lesson(t, s, c));
    }

    #[test]
    fn test_empty_source_fails() {
        let grid = Grid::new();
        let result = propose_move(&grid, &key("T1", "sunday", 1), &key("T2", "monday", 3));
        assert!(!result.success);
        assert_eq!(result.reason.as_deref(), Some("source slot is empty"));
        assert!(result.new_grid.is_none());
    }

    #[test]
    fn test_move_to_empty_cell() {
        let mut grid = Grid::new();
        lesson(&mut grid, "T1", "sunday", 1, "S1", "C1");

        let source = key("T1", "sunday", 1);
        let target = key("T2", "monday", 3);
        let result = propose_move(&grid, &source, &target);

        assert!(result.success);
        assert!(!result.is_chain);
        let new_grid = result.new_grid.unwrap();
        assert!(new_grid.get(&source).is_none());
        let moved = new_grid.get(&target).unwrap();
        assert_eq!(moved.teacher_id, "T2");
        assert_eq!(moved.class_id.as_deref(), Some("C1"));
        assert_eq!(result.related_teacher_ids, vec!["T1", "T2"]);
        // Input grid untouched.
        assert!(grid.contains(&source));
    }

    #[test]
    fn test_two_party_swap() {
        let mut grid = Grid::new();
        lesson(&mut grid, "T1", "sunday", 1, "S1", "C1");
        lesson(&mut grid, "T2", "monday", 3, "S2", "C2");

        let source = key("T1", "sunday", 1);
        let target = key("T2", "monday", 3);
        let result = propose_move(&grid, &source, &target);

        assert!(result.success);
        let new_grid = result.new_grid.unwrap();
        assert_eq!(
            new_grid.get(&target).unwrap().class_id.as_deref(),
            Some("C1")
        );
        assert_eq!(
            new_grid.get(&source).unwrap().class_id.as_deref(),
            Some("C2")
        );
        assert_eq!(new_grid.len(), 2);
    }

    #[test]
    fn test_swap_is_reversible() {
        let mut grid = Grid::new();
        lesson(&mut grid, "T1", "sunday", 1, "S1", "C1");
        lesson(&mut grid, "T2", "monday", 3, "S2", "C2");

        let source = key("T1", "sunday", 1);
        let target = key("T2", "monday", 3);
        let forward = propose_move(&grid, &source, &target);
        let halfway = forward.new_grid.unwrap();
        let back = propose_move(&halfway, &source, &target);
        assert!(back.success);
        assert_eq!(back.new_grid.unwrap(), grid);

        // Move-to-empty reverses through the opposite direction.
        let mut grid = Grid::new();
        lesson(&mut grid, "T1", "sunday", 1, "S1", "C1");
        let forward = propose_move(&grid, &source, &target);
        let halfway = forward.new_grid.unwrap();
        let back = propose_move(&halfway, &target, &source);
        assert_eq!(back.new_grid.unwrap(), grid);
    }

    #[test]
    fn test_moving_class_conflict_at_target_time() {
        let mut grid = Grid::new();
        lesson(&mut grid, "T1", "sunday", 1, "S1", "C1");
        // C1 already has a lesson with a third teacher at the target time.
        lesson(&mut grid, "T3", "monday", 3, "S3", "C1");

        let result = propose_move(&grid, &key("T1", "sunday", 1), &key("T2", "monday", 3));
        assert!(!result.success);
        assert!(result.reason.unwrap().contains("class C1"));
    }

    #[test]
    fn test_displaced_class_conflict_at_source_time() {
        let mut grid = Grid::new();
        lesson(&mut grid, "T1", "sunday", 1, "S1", "C1");
        lesson(&mut grid, "T2", "monday", 3, "S2", "C2");
        // C2 already has a lesson with a third teacher at the source time.
        lesson(&mut grid, "T3", "sunday", 1, "S3", "C2");

        let result = propose_move(&grid, &key("T1", "sunday", 1), &key("T2", "monday", 3));
        assert!(!result.success);
        assert!(result.reason.unwrap().contains("original time"));
    }

    #[test]
    fn test_moving_teacher_busy_at_target_time() {
        let mut grid = Grid::new();
        lesson(&mut grid, "T1", "sunday", 1, "S1", "C1");
        // T1 is already teaching another class at the target time.
        lesson(&mut grid, "T1", "monday", 3, "S1", "C9");

        let result = propose_move(&grid, &key("T1", "sunday", 1), &key("T2", "monday", 3));
        assert!(!result.success);
        assert!(result.reason.unwrap().contains("moving teacher"));
    }

    #[test]
    fn test_receiving_teacher_busy_at_source_time() {
        let mut grid = Grid::new();
        lesson(&mut grid, "T1", "sunday", 1, "S1", "C1");
        lesson(&mut grid, "T2", "monday", 3, "S2", "C2");
        // T2 is already teaching at the source time.
        lesson(&mut grid, "T2", "sunday", 1, "S2", "C3");

        let result = propose_move(&grid, &key("T1", "sunday", 1), &key("T2", "monday", 3));
        assert!(!result.success);
        assert!(result.reason.unwrap().contains("receiving teacher"));
    }

    #[test]
    fn test_same_teacher_move_skips_availability_checks() {
        let mut grid = Grid::new();
        lesson(&mut grid, "T1", "sunday", 1, "S1", "C1");
        lesson(&mut grid, "T1", "sunday", 2, "S2", "C2");

        let result = propose_move(&grid, &key("T1", "sunday", 1), &key("T1", "sunday", 2));
        assert!(result.success);
        let new_grid = result.new_grid.unwrap();
        assert_eq!(
            new_grid
                .get(&key("T1", "sunday", 2))
                .unwrap()
                .class_id
                .as_deref(),
            Some("C1")
        );
        assert_eq!(
            new_grid
                .get(&key("T1", "sunday", 1))
                .unwrap()
                .class_id
                .as_deref(),
            Some("C2")
        );
        assert_eq!(result.related_teacher_ids, vec!["T1"]);
    }

    #[test]
    fn test_step_description_mentions_both_cells() {
        let mut grid = Grid::new();
        lesson(&mut grid, "T1", "sunday", 1, "S1", "C1");

        let result = propose_move(&grid, &key("T1", "sunday", 1), &key("T2", "monday", 3));
        assert_eq!(result.steps.len(), 1);
        let step = &result.steps[0];
        assert!(step.contains("C1"));
        assert!(step.contains("sunday p1"));
        assert!(step.contains("monday p3"));
        assert!(step.contains("empty"));
    }
}
