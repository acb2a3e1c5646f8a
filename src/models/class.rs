//! Class (student group) model.

use serde::{Deserialize, Serialize};

/// A class of students that receives lessons.
///
/// When `subject_ids` is non-empty it is the authoritative list of subjects
/// this class takes; otherwise the generator derives the list from subject
/// phase/grade targeting and from manual assignments naming this class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolClass {
    /// Unique class identifier.
    pub id: String,
    /// Display name override (default form is "grade-section").
    pub name: String,
    /// School phase the class belongs to.
    pub phase: String,
    /// Grade within the phase.
    pub grade: u32,
    /// Explicit subject list, when configured.
    pub subject_ids: Vec<String>,
    /// Owning school, for shared-school setups.
    pub school_id: Option<String>,
}

impl SchoolClass {
    /// Creates a class in the given phase and grade.
    pub fn new(id: impl Into<String>, phase: impl Into<String>, grade: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            phase: phase.into(),
            grade,
            subject_ids: Vec::new(),
            school_id: None,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the explicit subject list.
    pub fn with_subjects(mut self, subject_ids: Vec<String>) -> Self {
        self.subject_ids = subject_ids;
        self
    }

    /// Sets the owning school.
    pub fn with_school(mut self, school_id: impl Into<String>) -> Self {
        self.school_id = Some(school_id.into());
        self
    }
}
