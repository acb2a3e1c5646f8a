//! Subject model.
//!
//! A subject declares how many weekly periods each class taking it must
//! receive (`periods_per_class`) — the quota the generator fills up to and
//! never exceeds — and which phases and grades it targets.

use serde::{Deserialize, Serialize};

/// A taught subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    /// Unique subject identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Weekly lesson quota per class taking this subject.
    pub periods_per_class: u32,
    /// School phases this subject is taught in.
    pub phases: Vec<String>,
    /// Target grades within those phases. Empty means all grades.
    pub target_grades: Vec<u32>,
}

impl Subject {
    /// Creates a subject with the given weekly quota.
    pub fn new(id: impl Into<String>, periods_per_class: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            periods_per_class,
            phases: Vec::new(),
            target_grades: Vec::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a target phase.
    pub fn with_phase(mut self, phase: impl Into<String>) -> Self {
        self.phases.push(phase.into());
        self
    }

    /// Restricts the subject to specific grades.
    pub fn with_target_grades(mut self, grades: Vec<u32>) -> Self {
        self.target_grades = grades;
        self
    }

    /// Whether this subject applies to a class in the given phase and grade.
    pub fn targets(&self, phase: &str, grade: u32) -> bool {
        self.phases.iter().any(|p| p == phase)
            && (self.target_grades.is_empty() || self.target_grades.contains(&grade))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_builder() {
        let s = Subject::new("S1", 5)
            .with_name("Mathematics")
            .with_phase("middle")
            .with_target_grades(vec![1, 2]);

        assert_eq!(s.id, "S1");
        assert_eq!(s.periods_per_class, 5);
        assert_eq!(s.phases, vec!["middle"]);
        assert_eq!(s.target_grades, vec![1, 2]);
    }

    #[test]
    fn test_targets_phase_and_grade() {
        let s = Subject::new("S1", 3)
            .with_phase("middle")
            .with_target_grades(vec![2, 3]);

        assert!(s.targets("middle", 2));
        assert!(!s.targets("middle", 1));
        assert!(!s.targets("high", 2));
    }

    #[test]
    fn test_targets_all_grades_when_unrestricted() {
        let s = Subject::new("S1", 3).with_phase("high");
        assert!(s.targets("high", 1));
        assert!(s.targets("high", 99));
    }
}
