//! Constraint-satisfaction engine.
//!
//! Courses are the variables; a value is an [`Assignment`] of classroom,
//! instructor set and time slot. Hard unavailability is unary and is
//! folded into the domains by [`Problem::build_domains`]; every pair of
//! courses is linked by the binary [`compatible`] predicate.
//!
//! # Pipeline
//!
//! 1. [`apply_hard_constraints`] blocks grid cells
//! 2. [`Problem::build_domains`] enumerates legal candidates
//! 3. [`ac3`] filters them to arc consistency
//! 4. [`mac_backtrack`] (or [`backtrack`]) searches for a full assignment
//!
//! # Reference
//! Russell & Norvig, "Artificial Intelligence: A Modern Approach", ch. 6

mod arc;
mod cancel;
mod compat;
mod domain;
mod problem;
mod search;
mod stats;

pub use arc::{ac3, ac3_with_stats, revise};
pub use cancel::{CancellationToken, SearchGuard, StopReason};
pub use compat::{compatible, groups_compatible};
pub use domain::{Assignment, ClassroomIdx, CourseIdx, Domains, StaffIdx, ValueIdx};
pub use problem::{apply_hard_constraints, Problem};
pub use search::{
    backtrack, count_solutions, is_consistent, mac_backtrack, select_mrv, SearchResult,
    SolutionCount,
};
pub use stats::SearchStats;
