//! Event (course offering) model.
//!
//! An event is a catalog entry such as "Algorithms, semester 3" before
//! it is expanded into per-group [`Course`](super::Course) sessions.
//! Events in an optional package (1-3) are electives; events without a
//! package are mandatory for every group.

use serde::{Deserialize, Serialize};

use crate::error::EntityError;

/// Valid semester range.
pub const SEMESTERS: std::ops::RangeInclusive<u8> = 1..=6;
/// Valid elective package range.
pub const PACKAGES: std::ops::RangeInclusive<u8> = 1..=3;

/// A course offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Identifier derived from semester and name (e.g. "3 DS").
    pub id: String,
    /// Full course name.
    pub name: String,
    /// Semester (1-6).
    pub semester: u8,
    /// Elective package (1-3), `None` for mandatory courses.
    pub package: Option<u8>,
    /// Staff ids that co-teach the lectures.
    pub primary_instructors: Vec<String>,
    /// Staff ids that can run the laboratories.
    pub secondary_instructors: Vec<String>,
}

impl Event {
    /// Validated construction.
    ///
    /// Fails if the name is blank, the semester is outside 1-6, the package
    /// is present but outside 1-3, or there are no primary instructors.
    /// Every problem is reported.
    pub fn create(
        name: &str,
        semester: u8,
        package: Option<u8>,
        primary_instructors: Vec<String>,
        secondary_instructors: Vec<String>,
    ) -> Result<Self, EntityError> {
        let mut problems = Vec::new();
        if name.trim().is_empty() {
            problems.push("Name should not be empty.".to_string());
        }
        if !SEMESTERS.contains(&semester) {
            problems.push(format!(
                "Semester should be in interval 1-6, but has value {semester}."
            ));
        }
        if let Some(p) = package {
            if !PACKAGES.contains(&p) {
                problems.push(format!(
                    "Optional package should be in interval 1-3 or absent, but has value {p}."
                ));
            }
        }
        if primary_instructors.is_empty() {
            problems.push(format!("Event '{name}' has no primary instructors."));
        }

        if let Some(err) = EntityError::collect("event", problems) {
            return Err(err);
        }

        Ok(Self {
            id: derive_id(name, semester),
            name: name.to_string(),
            semester,
            package,
            primary_instructors,
            secondary_instructors,
        })
    }

    /// Whether this event is an elective.
    #[inline]
    pub fn is_elective(&self) -> bool {
        self.package.is_some()
    }

    /// All referenced staff ids (primary first).
    pub fn instructor_ids(&self) -> impl Iterator<Item = &str> {
        self.primary_instructors
            .iter()
            .chain(&self.secondary_instructors)
            .map(String::as_str)
    }
}

/// `"{semester} {initials}"` for multi-word names, `"{semester} {name}"` otherwise.
fn derive_id(name: &str, semester: u8) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    if words.len() == 1 {
        format!("{semester} {}", words[0])
    } else {
        let initials: String = words
            .iter()
            .filter_map(|w| w.chars().next())
            .flat_map(char::to_uppercase)
            .collect();
        format!("{semester} {initials}")
    }
}
