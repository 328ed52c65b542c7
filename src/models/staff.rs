//! Staff member model.
//!
//! Staff members teach sessions: primary instructors co-teach lectures,
//! secondary instructors (assistants) run laboratories.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::EntityError;

use super::{AvailabilityGrid, TimeSlot};

/// Academic position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Assistant,
    Lecturer,
    Professor,
    /// Any other title, kept verbatim.
    Other(String),
}

impl Position {
    /// Parses a position title. Unknown titles become [`Position::Other`].
    pub fn parse(title: &str) -> Self {
        match title.trim() {
            "Assistant" => Self::Assistant,
            "Lecturer" => Self::Lecturer,
            "Professor" => Self::Professor,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assistant => f.write_str("Assistant"),
            Self::Lecturer => f.write_str("Lecturer"),
            Self::Professor => f.write_str("Professor"),
            Self::Other(title) => f.write_str(title),
        }
    }
}

/// A member of the teaching staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    /// Unique staff identifier, referenced by events.
    pub id: String,
    /// Full name, referenced by unavailability constraints.
    pub name: String,
    /// Academic position.
    pub position: Position,
    /// Weekly availability, mutated only by hard constraints.
    pub availability: AvailabilityGrid,
}

impl StaffMember {
    /// Creates an always-available staff member.
    pub fn new(id: impl Into<String>, name: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position,
            availability: AvailabilityGrid::new(),
        }
    }

    /// Validated construction from raw fields.
    pub fn create(id: &str, position: &str, name: &str) -> Result<Self, EntityError> {
        let mut problems = Vec::new();
        if id.trim().is_empty() {
            problems.push("Id of the staff member cannot be empty.".to_string());
        }
        if name.trim().is_empty() {
            problems.push(format!("Name of staff member '{id}' cannot be empty."));
        }
        match EntityError::collect("staff member", problems) {
            Some(err) => Err(err),
            None => Ok(Self::new(id, name, Position::parse(position))),
        }
    }

    /// Blocks a slot (hard constraint).
    pub fn with_blocked(mut self, slot: TimeSlot) -> Self {
        self.availability.block(slot);
        self
    }

    /// Whether this member is free at a slot.
    #[inline]
    pub fn is_available_at(&self, slot: TimeSlot) -> bool {
        self.availability.is_open(slot)
    }
}
