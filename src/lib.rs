//! University timetabling as a constraint-satisfaction problem.
//!
//! Assigns every lecture and laboratory session of a semester to a
//! classroom, an instructor set and one of 30 weekly time slots, so that
//! no classroom, instructor or student group is double-booked and no
//! hard unavailability is violated.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `TimeSlot`, `AvailabilityGrid`, `Classroom`,
//!   `StaffMember`, `Event`, `Course`, `Constraint`, `Schedule`
//! - **`csp`**: The engine: domains, compatibility, AC-3, search drivers,
//!   cancellation and statistics
//! - **`solver`**: Configuration and end-to-end orchestration
//! - **`dataset`**: JSON dataset loading
//! - **`validation`**: Cross-record integrity checks (duplicate IDs, dangling references)
//! - **`error`**: Error types
//!
//! # References
//!
//! - Mackworth (1977), "Consistency in Networks of Relations"
//! - Haralick & Elliott (1980), "Increasing Tree Search Efficiency for
//!   Constraint Satisfaction Problems"
//! - Russell & Norvig, "Artificial Intelligence: A Modern Approach", ch. 6

pub mod csp;
pub mod dataset;
pub mod error;
pub mod models;
pub mod solver;
pub mod validation;

pub use error::{Result, ScheduleError};
pub use solver::{Algorithm, SolveOutcome, SolveReport, SolverConfig, TimetableSolver};
