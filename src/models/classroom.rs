//! Classroom model.
//!
//! Classrooms are either lecture halls or laboratories. A session can
//! only take place in a classroom of its own kind.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EntityError;

use super::{AvailabilityGrid, CourseKind};

/// Classroom classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassroomKind {
    /// Lecture hall, hosts lecture sessions.
    Lecture,
    /// Laboratory, hosts laboratory sessions.
    Laboratory,
}

impl ClassroomKind {
    /// Whether sessions of the given kind can be held here.
    #[inline]
    pub fn hosts(self, kind: CourseKind) -> bool {
        matches!(
            (self, kind),
            (ClassroomKind::Lecture, CourseKind::Lecture)
                | (ClassroomKind::Laboratory, CourseKind::Laboratory)
        )
    }
}

impl FromStr for ClassroomKind {
    type Err = EntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Lecture" => Ok(Self::Lecture),
            "Laboratory" => Ok(Self::Laboratory),
            other => Err(EntityError::single(
                "classroom",
                format!("Invalid classroom type {other}."),
            )),
        }
    }
}

impl fmt::Display for ClassroomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lecture => f.write_str("Lecture"),
            Self::Laboratory => f.write_str("Laboratory"),
        }
    }
}

/// A classroom with its weekly availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classroom {
    /// Unique classroom identifier (e.g. "C112").
    pub id: String,
    /// Lecture hall or laboratory.
    pub kind: ClassroomKind,
    /// Weekly availability, mutated only by hard constraints.
    pub availability: AvailabilityGrid,
}

impl Classroom {
    /// Creates an always-open classroom.
    pub fn new(id: impl Into<String>, kind: ClassroomKind) -> Self {
        Self {
            id: id.into(),
            kind,
            availability: AvailabilityGrid::new(),
        }
    }

    /// Creates a lecture hall.
    pub fn lecture(id: impl Into<String>) -> Self {
        Self::new(id, ClassroomKind::Lecture)
    }

    /// Creates a laboratory.
    pub fn laboratory(id: impl Into<String>) -> Self {
        Self::new(id, ClassroomKind::Laboratory)
    }

    /// Validated construction from raw fields.
    ///
    /// Fails if the id is blank or the type is not `Lecture`/`Laboratory`;
    /// both problems are reported together.
    pub fn create(id: &str, kind: &str) -> Result<Self, EntityError> {
        let mut problems = Vec::new();
        if id.trim().is_empty() {
            problems.push("Id of the class cannot be empty.".to_string());
        }
        let kind = match kind.parse::<ClassroomKind>() {
            Ok(kind) => Some(kind),
            Err(e) => {
                problems.extend(e.problems);
                None
            }
        };

        match kind {
            Some(kind) if problems.is_empty() => Ok(Self::new(id, kind)),
            _ => Err(EntityError {
                entity: "classroom",
                problems,
            }),
        }
    }

    /// Blocks a slot (hard constraint).
    pub fn with_blocked(mut self, slot: super::TimeSlot) -> Self {
        self.availability.block(slot);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeSlot;

    #[test]
    fn test_create_valid() {
        let c = Classroom::create("C112", "Lecture").unwrap();
        assert_eq!(c.id, "C112");
        assert_eq!(c.kind, ClassroomKind::Lecture);
        assert_eq!(c.availability, AvailabilityGrid::new());
    }

    #[test]
    fn test_create_collects_problems() {
        let err = Classroom::create("  ", "Gym").unwrap_err();
        assert_eq!(err.entity, "classroom");
        assert_eq!(err.problems.len(), 2);
    }

    #[test]
    fn test_kind_hosts() {
        assert!(ClassroomKind::Lecture.hosts(CourseKind::Lecture));
        assert!(!ClassroomKind::Lecture.hosts(CourseKind::Laboratory));
        assert!(ClassroomKind::Laboratory.hosts(CourseKind::Laboratory));
        assert!(!ClassroomKind::Laboratory.hosts(CourseKind::Lecture));
    }

    #[test]
    fn test_with_blocked() {
        let m1 = TimeSlot::from_code("M1").unwrap();
        let c = Classroom::laboratory("L1").with_blocked(m1);
        assert!(!c.availability.is_open(m1));
    }
}
