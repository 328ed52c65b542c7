//! Course (session) model and course generation.
//!
//! A course is one teaching session of one event for one student group,
//! e.g. "Algorithms, lecture, group A". It is the unit the solver assigns
//! a classroom, instructors and a time slot to.
//!
//! # Groups
//!
//! | Label | Meaning |
//! |-------|---------|
//! | `A`, `B`, `E` | Whole year-group |
//! | `A1`..`A5`, `B1`..`B4`, `E1`..`E3` | Laboratory sub-group |
//! | `ABE` | All students combined (elective lectures) |

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Event;

/// Sub-groups per year-group for mandatory laboratories.
const SUBGROUPS: [(char, u8); 3] = [('A', 5), ('B', 4), ('E', 3)];

/// Session kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseKind {
    Lecture,
    Laboratory,
}

impl fmt::Display for CourseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lecture => f.write_str("Lecture"),
            Self::Laboratory => f.write_str("Laboratory"),
        }
    }
}

impl std::str::FromStr for CourseKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Lecture" => Ok(Self::Lecture),
            "Laboratory" => Ok(Self::Laboratory),
            other => Err(format!("Invalid event type '{other}'.")),
        }
    }
}

/// A student group label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Group(String);

impl Group {
    /// Pseudo-group for all students combined.
    pub const ALL_STUDENTS: &'static str = "ABE";

    /// Creates a group label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The label text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the combined `ABE` pseudo-group.
    #[inline]
    pub fn is_all_students(&self) -> bool {
        self.0 == Self::ALL_STUDENTS
    }

    /// Whether two groups share students.
    ///
    /// Two sub-groups overlap only when equal; a year-group overlaps
    /// itself and each of its sub-groups. Symmetric.
    pub fn overlaps(&self, other: &Group) -> bool {
        let (a, b) = (self.as_str(), other.as_str());
        match (a.len(), b.len()) {
            (2, 2) => a == b,
            (1, _) => b.starts_with(a),
            (_, 1) => a.starts_with(b),
            _ => a == b,
        }
    }

    /// Whether sessions of the two groups may share a time slot.
    ///
    /// `ABE` is compatible with every group. This contradicts its meaning
    /// (every student attends it) but existing datasets rely on it.
    pub fn is_compatible_with(&self, other: &Group) -> bool {
        if self.is_all_students() || other.is_all_students() {
            return true;
        }
        !self.overlaps(other)
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A teaching session to be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Course {
    /// Owning event id.
    pub event_id: String,
    /// Owning event name (for display).
    pub event_name: String,
    /// Owning event semester.
    pub semester: u8,
    /// Lecture or laboratory.
    pub kind: CourseKind,
    /// Student group attending.
    pub group: Group,
    /// Elective package copied from the event.
    pub package: Option<u8>,
    /// Candidate instructors: primary for lectures, secondary for laboratories.
    pub instructors: Vec<String>,
}

impl Course {
    /// Derives a session of the given kind for a group of an event.
    pub fn from_event(event: &Event, kind: CourseKind, group: impl Into<String>) -> Self {
        let instructors = match kind {
            CourseKind::Lecture => event.primary_instructors.clone(),
            CourseKind::Laboratory => event.secondary_instructors.clone(),
        };
        Self {
            event_id: event.id.clone(),
            event_name: event.name.clone(),
            semester: event.semester,
            kind,
            group: Group::new(group),
            package: event.package,
            instructors,
        }
    }

    /// Short label, e.g. `"3 DS Lecture A"`.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.event_id, self.kind, self.group)
    }
}

/// Expands events of the requested semester parity into courses.
///
/// `semester` 1 selects odd-semester events (1, 3, 5), 2 selects even
/// ones. A mandatory event yields lectures for `A`, `B`, `E` and one
/// laboratory per sub-group (`A1..A5`, `B1..B4`, `E1..E3`); an elective
/// yields one `ABE` lecture and one laboratory per year-group.
///
/// Output order follows event order, then lectures before laboratories.
pub fn generate_courses(events: &[Event], semester: u8) -> Vec<Course> {
    let mut courses = Vec::new();

    for event in events.iter().filter(|e| e.semester % 2 == semester % 2) {
        if event.is_elective() {
            courses.push(Course::from_event(event, CourseKind::Lecture, Group::ALL_STUDENTS));
            for (year, _) in SUBGROUPS {
                courses.push(Course::from_event(event, CourseKind::Laboratory, year));
            }
        } else {
            for (year, _) in SUBGROUPS {
                courses.push(Course::from_event(event, CourseKind::Lecture, year));
            }
            for (year, count) in SUBGROUPS {
                for i in 1..=count {
                    courses.push(Course::from_event(
                        event,
                        CourseKind::Laboratory,
                        format!("{year}{i}"),
                    ));
                }
            }
        }
    }

    courses
}
