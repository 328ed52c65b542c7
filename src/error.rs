//! Error types.
//!
//! Configuration problems (malformed records, duplicate ids, dangling
//! references, unknown constraint targets) are errors and stop a run
//! before any search starts. Infeasibility is not an error: it is a
//! [`SolveOutcome`](crate::solver::SolveOutcome).

use std::path::PathBuf;

use thiserror::Error;

use crate::validation::ValidationError;

/// Crate result alias.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// A record that failed validated construction.
///
/// Collects every problem found in the record rather than only the first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {entity}: {}", .problems.join(" "))]
pub struct EntityError {
    /// Kind of record (e.g. "event", "classroom").
    pub entity: &'static str,
    /// Human-readable problems.
    pub problems: Vec<String>,
}

impl EntityError {
    /// Creates an error with a single problem.
    pub fn single(entity: &'static str, problem: impl Into<String>) -> Self {
        Self {
            entity,
            problems: vec![problem.into()],
        }
    }

    /// Creates an error from collected problems, or `None` if there are none.
    pub fn collect(entity: &'static str, problems: Vec<String>) -> Option<Self> {
        if problems.is_empty() {
            None
        } else {
            Some(Self { entity, problems })
        }
    }
}

/// Errors raised while loading data or preparing the search.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} record(s) failed to load", .0.len())]
    Records(Vec<EntityError>),

    #[error("dataset validation failed with {} error(s)", .0.len())]
    Invalid(Vec<ValidationError>),

    #[error("constraint references unknown classroom '{0}'")]
    UnknownClassroom(String),

    #[error("constraint references unknown staff member '{0}'")]
    UnknownStaff(String),

    #[error("course {course} references unknown instructor '{instructor}'")]
    UnknownInstructor { course: String, instructor: String },

    #[error("semester must be 1 or 2, got {0}")]
    InvalidSemester(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_error_collect() {
        assert!(EntityError::collect("event", Vec::new()).is_none());

        let err = EntityError::collect(
            "event",
            vec!["Name should not be empty.".into(), "Bad semester.".into()],
        )
        .unwrap();
        assert_eq!(err.problems.len(), 2);
        assert_eq!(
            err.to_string(),
            "invalid event: Name should not be empty. Bad semester."
        );
    }

    #[test]
    fn test_schedule_error_display() {
        let err = ScheduleError::UnknownClassroom("C404".into());
        assert_eq!(
            err.to_string(),
            "constraint references unknown classroom 'C404'"
        );

        let err = ScheduleError::UnknownInstructor {
            course: "1 Algorithms lecture A".into(),
            instructor: "p9".into(),
        };
        assert!(err.to_string().contains("p9"));
    }
}
