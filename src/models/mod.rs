//! Timetabling domain models.
//!
//! Input records as supplied by the data-entry collaborators, plus the
//! indexed lookups the engines use. Identifiers are opaque strings chosen
//! by the collaborator; the engine never parses or invents them.

mod assignment;
mod class;
mod config;
mod constraint;
mod subject;
mod teacher;

pub use assignment::{Assignment, AssignmentIndex};
pub use class::SchoolClass;
pub use config::{ScheduleConfig, WaitingConfig, WaitingMethod};
pub use constraint::{ConstraintSet, DailyLimit, TeacherConstraint};
pub use subject::Subject;
pub use teacher::{AdminStaff, Teacher};
