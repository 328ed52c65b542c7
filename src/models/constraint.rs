//! Timetabling constraints.
//!
//! Constraints arrive from the dataset alongside the entities. Hard
//! unavailability constraints block cells in classroom and staff
//! availability grids before search. Preferences are accepted and kept,
//! but no scoring is implemented, so they never influence the result.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{CourseKind, TimeSlot};

/// Constraint strength.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weight {
    /// Must hold in every schedule.
    #[default]
    Hard,
    /// Preference only.
    Soft,
}

impl Weight {
    /// Parses `"hard"` / `"soft"`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "hard" => Some(Self::Hard),
            "soft" => Some(Self::Soft),
            _ => None,
        }
    }
}

/// What a constraint says.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintKind {
    /// The classroom cannot be used at these slots.
    UnavailableClassroomTime {
        classroom_id: String,
        slots: BTreeSet<TimeSlot>,
    },

    /// The staff member (matched by name) cannot teach at these slots.
    UnavailableStaffTime {
        staff_name: String,
        slots: BTreeSet<TimeSlot>,
    },

    /// A preferred placement for a session. Not enforced.
    PreferredEvent {
        classroom: String,
        instructor: String,
        course: String,
        group: String,
        event_type: CourseKind,
        preferred: BTreeSet<TimeSlot>,
    },
}

/// A weighted constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    /// Hard or soft.
    pub weight: Weight,
    /// Constraint payload.
    pub kind: ConstraintKind,
}

impl Constraint {
    /// Creates a hard classroom unavailability constraint.
    pub fn unavailable_classroom(
        classroom_id: impl Into<String>,
        slots: impl IntoIterator<Item = TimeSlot>,
    ) -> Self {
        Self {
            weight: Weight::Hard,
            kind: ConstraintKind::UnavailableClassroomTime {
                classroom_id: classroom_id.into(),
                slots: slots.into_iter().collect(),
            },
        }
    }

    /// Creates a hard staff unavailability constraint.
    pub fn unavailable_staff(
        staff_name: impl Into<String>,
        slots: impl IntoIterator<Item = TimeSlot>,
    ) -> Self {
        Self {
            weight: Weight::Hard,
            kind: ConstraintKind::UnavailableStaffTime {
                staff_name: staff_name.into(),
                slots: slots.into_iter().collect(),
            },
        }
    }

    /// Creates a soft placement preference.
    pub fn preferred_event(
        classroom: impl Into<String>,
        instructor: impl Into<String>,
        course: impl Into<String>,
        group: impl Into<String>,
        event_type: CourseKind,
        preferred: impl IntoIterator<Item = TimeSlot>,
    ) -> Self {
        Self {
            weight: Weight::Soft,
            kind: ConstraintKind::PreferredEvent {
                classroom: classroom.into(),
                instructor: instructor.into(),
                course: course.into(),
                group: group.into(),
                event_type,
                preferred: preferred.into_iter().collect(),
            },
        }
    }

    /// Sets the weight.
    pub fn with_weight(mut self, weight: Weight) -> Self {
        self.weight = weight;
        self
    }

    /// Whether this constraint must hold.
    #[inline]
    pub fn is_hard(&self) -> bool {
        self.weight == Weight::Hard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slots(codes: &[&str]) -> Vec<TimeSlot> {
        codes.iter().map(|c| TimeSlot::from_code(c).unwrap()).collect()
    }

    #[test]
    fn test_unavailable_classroom() {
        let c = Constraint::unavailable_classroom("C2", slots(&["M1", "T1", "M1"]));
        assert!(c.is_hard());
        match c.kind {
            ConstraintKind::UnavailableClassroomTime {
                classroom_id,
                slots,
            } => {
                assert_eq!(classroom_id, "C2");
                assert_eq!(slots.len(), 2);
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn test_unavailable_staff_soft() {
        let c =
            Constraint::unavailable_staff("Dr. Smith", slots(&["W3"])).with_weight(Weight::Soft);
        assert!(!c.is_hard());
        match c.kind {
            ConstraintKind::UnavailableStaffTime { staff_name, .. } => {
                assert_eq!(staff_name, "Dr. Smith");
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn test_preferred_event() {
        let c = Constraint::preferred_event(
            "C112",
            "Dr. Johnson",
            "IP",
            "A2",
            CourseKind::Lecture,
            slots(&["W2"]),
        );
        assert_eq!(c.weight, Weight::Soft);
        match c.kind {
            ConstraintKind::PreferredEvent {
                group, preferred, ..
            } => {
                assert_eq!(group, "A2");
                assert_eq!(preferred.len(), 1);
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn test_weight_parse() {
        assert_eq!(Weight::parse("hard"), Some(Weight::Hard));
        assert_eq!(Weight::parse("soft"), Some(Weight::Soft));
        assert_eq!(Weight::parse("maybe"), None);
    }
}
