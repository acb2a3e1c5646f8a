//! Weekly school timetable engine.
//!
//! Assigns lesson slots to teachers, classes, and subjects under hard and
//! soft constraints, supports interactive repair (move, swap, three-party
//! chain swap) without breaking grid invariants, and fills remaining idle
//! time with fairness-balanced waiting duty.
//!
//! Data entry, persistence, and rendering are external collaborators: they
//! supply validated inputs and receive back a [`grid::Grid`] or a
//! [`interactive::SwapResult`]. This crate contains the decision logic only.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Teacher`, `AdminStaff`, `Subject`,
//!   `SchoolClass`, `Assignment`, `TeacherConstraint`, `ScheduleConfig`,
//!   `WaitingConfig`
//! - **`grid`**: The sparse weekly slot map keyed by (teacher, day, period),
//!   with incrementally maintained occupancy indices
//! - **`generator`**: Greedy constructive fill from manual assignments
//! - **`interactive`**: Two-party move/swap validation and the three-party
//!   chain-swap resolver
//! - **`waiting`**: Waiting-duty distribution under quota caps
//! - **`validation`**: Pre-flight input checks and post-hoc grid audits
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod generator;
pub mod grid;
pub mod interactive;
pub mod models;
pub mod validation;
pub mod waiting;
