//! Timetabling domain models.
//!
//! Provides the entity types the engine consumes and the schedule it
//! produces. Entities are immutable values built through validated
//! constructors; only availability grids change, and only while hard
//! constraints are applied.
//!
//! # Domain Mappings
//!
//! | Model | Role in the CSP |
//! |-------|-----------------|
//! | Course | Variable |
//! | Classroom × instructors × TimeSlot | Value |
//! | Constraint | Unary restriction (hard unavailability) |
//! | Schedule | Complete assignment |

mod availability;
mod classroom;
mod constraint;
mod course;
mod event;
mod schedule;
mod staff;
pub mod time_slot;

pub use availability::{AvailabilityGrid, Cell};
pub use classroom::{Classroom, ClassroomKind};
pub use constraint::{Constraint, ConstraintKind, Weight};
pub use course::{generate_courses, Course, CourseKind, Group};
pub use event::Event;
pub use schedule::{Schedule, ScheduledSession};
pub use staff::{Position, StaffMember};
pub use time_slot::{Day, TimeSlot};
