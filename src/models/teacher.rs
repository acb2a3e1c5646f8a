//! Teacher and administrative staff models.
//!
//! Teachers carry a weekly lesson quota (`quota_limit`) and an optional
//! waiting-duty quota. Administrative staff have no lesson quota at all;
//! they only ever appear in the grid as waiting-duty candidates.

use serde::{Deserialize, Serialize};

/// A teacher available for lesson and waiting assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Maximum weekly lesson count.
    pub quota_limit: u32,
    /// Maximum weekly waiting-duty count (optional).
    pub waiting_quota: Option<u32>,
    /// Contact phone number (opaque to the engine).
    pub phone: String,
    /// Specialization this teacher belongs to.
    pub specialization_id: String,
    /// Owning school, for shared-school setups.
    pub school_id: Option<String>,
}

/// Administrative staff member — a waiting-duty candidate with zero
/// base lesson quota.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminStaff {
    /// Unique staff identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Job role description.
    pub role: String,
    /// Contact phone number.
    pub phone: String,
    /// Maximum weekly waiting-duty count (optional).
    pub waiting_quota: Option<u32>,
}

impl Teacher {
    /// Creates a teacher with a default quota of 24 weekly lessons.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            quota_limit: 24,
            waiting_quota: None,
            phone: String::new(),
            specialization_id: String::new(),
            school_id: None,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the weekly lesson quota.
    pub fn with_quota(mut self, quota_limit: u32) -> Self {
        self.quota_limit = quota_limit;
        self
    }

    /// Sets the weekly waiting-duty quota.
    pub fn with_waiting_quota(mut self, waiting_quota: u32) -> Self {
        self.waiting_quota = Some(waiting_quota);
        self
    }

    /// Sets the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Sets the specialization.
    pub fn with_specialization(mut self, specialization_id: impl Into<String>) -> Self {
        self.specialization_id = specialization_id.into();
        self
    }

    /// Sets the owning school.
    pub fn with_school(mut self, school_id: impl Into<String>) -> Self {
        self.school_id = Some(school_id.into());
        self
    }
}

impl AdminStaff {
    /// Creates an administrative staff member.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            role: String::new(),
            phone: String::new(),
            waiting_quota: None,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the job role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Sets the weekly waiting-duty quota.
    pub fn with_waiting_quota(mut self, waiting_quota: u32) -> Self {
        self.waiting_quota = Some(waiting_quota);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teacher_builder() {
        let t = Teacher::new("T1")
            .with_name("Ahmad")
            .with_quota(20)
            .with_waiting_quota(4)
            .with_specialization("math")
            .with_school("main");

        assert_eq!(t.id, "T1");
        assert_eq!(t.name, "Ahmad");
        assert_eq!(t.quota_limit, 20);
        assert_eq!(t.waiting_quota, Some(4));
        assert_eq!(t.specialization_id, "math");
        assert_eq!(t.school_id.as_deref(), Some("main"));
    }

    #[test]
    fn test_teacher_default_quota() {
        let t = Teacher::new("T1");
        assert_eq!(t.quota_limit, 24);
        assert!(t.waiting_quota.is_none());
    }

    #[test]
    fn test_admin_builder() {
        let a = AdminStaff::new("A1")
            .with_name("Supervisor")
            .with_role("deputy")
            .with_waiting_quota(6);

        assert_eq!(a.id, "A1");
        assert_eq!(a.role, "deputy");
        assert_eq!(a.waiting_quota, Some(6));
    }
}
