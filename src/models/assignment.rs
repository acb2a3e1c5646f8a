//! Manual class-subject-teacher assignments.
//!
//! An [`Assignment`] is the single source of truth for who may teach a
//! given (class, subject) pair. The engine runs in strict mode: no
//! assignment means the subject is simply not schedulable for that class —
//! there is no inference and no fallback teacher.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Declares that `teacher_id` teaches `subject_id` for `class_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Class receiving the lessons.
    pub class_id: String,
    /// Subject being taught.
    pub subject_id: String,
    /// Teacher responsible for this pair.
    pub teacher_id: String,
}

impl Assignment {
    /// Creates an assignment.
    pub fn new(
        class_id: impl Into<String>,
        subject_id: impl Into<String>,
        teacher_id: impl Into<String>,
    ) -> Self {
        Self {
            class_id: class_id.into(),
            subject_id: subject_id.into(),
            teacher_id: teacher_id.into(),
        }
    }
}

/// Assignments indexed by (class, subject) for O(1) teacher lookup.
///
/// When the same pair appears twice the later entry wins, matching
/// last-write semantics of the collaborator's assignment editor.
#[derive(Debug, Clone, Default)]
pub struct AssignmentIndex {
    by_pair: HashMap<(String, String), String>,
}

impl AssignmentIndex {
    /// Builds the index from an assignment list.
    pub fn from_assignments(assignments: &[Assignment]) -> Self {
        let mut by_pair = HashMap::new();
        for a in assignments {
            by_pair.insert((a.class_id.clone(), a.subject_id.clone()), a.teacher_id.clone());
        }
        Self { by_pair }
    }

    /// Returns the teacher assigned to (class, subject), if any.
    pub fn teacher_for(&self, class_id: &str, subject_id: &str) -> Option<&str> {
        self.by_pair
            .get(&(class_id.to_string(), subject_id.to_string()))
            .map(String::as_str)
    }

    /// Subject ids that have an assignment for the given class.
    pub fn subjects_for_class(&self, class_id: &str) -> Vec<&str> {
        self.by_pair
            .keys()
            .filter(|(c, _)| c == class_id)
            .map(|(_, s)| s.as_str())
            .collect()
    }

    /// Number of indexed pairs.
    pub fn len(&self) -> usize {
        self.by_pair.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.by_pair.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teacher_lookup() {
        let idx = AssignmentIndex::from_assignments(&[
            Assignment::new("C1", "S1", "T1"),
            Assignment::new("C1", "S2", "T2"),
            Assignment::new("C2", "S1", "T1"),
        ]);

        assert_eq!(idx.teacher_for("C1", "S1"), Some("T1"));
        assert_eq!(idx.teacher_for("C1", "S2"), Some("T2"));
        assert_eq!(idx.teacher_for("C2", "S2"), None);
        assert_eq!(idx.len(), 3);
    }

    #[test]
    fn test_last_entry_wins_on_duplicate_pair() {
        let idx = AssignmentIndex::from_assignments(&[
            Assignment::new("C1", "S1", "T1"),
            Assignment::new("C1", "S1", "T9"),
        ]);
        assert_eq!(idx.teacher_for("C1", "S1"), Some("T9"));
        assert_eq!(idx.len(), 1);
    }

    #[test]
    fn test_subjects_for_class() {
        let idx = AssignmentIndex::from_assignments(&[
            Assignment::new("C1", "S1", "T1"),
            Assignment::new("C1", "S2", "T2"),
            Assignment::new("C2", "S3", "T3"),
        ]);

        let mut subjects = idx.subjects_for_class("C1");
        subjects.sort();
        assert_eq!(subjects, vec!["S1", "S2"]);
        assert!(idx.subjects_for_class("C9").is_empty());
    }
}
