//! Schedule (solution) model.
//!
//! A schedule is the complete assignment of every course to a classroom,
//! an instructor set and a time slot, in course order. It is what the
//! presentation layer renders.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{AvailabilityGrid, Course, TimeSlot};

/// One placed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledSession {
    /// The scheduled course.
    pub course: Course,
    /// Assigned classroom id.
    pub classroom_id: String,
    /// Assigned staff ids.
    pub instructor_ids: Vec<String>,
    /// Assigned weekly slot.
    pub slot: TimeSlot,
}

/// A complete timetable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Placed sessions, in course order.
    pub sessions: Vec<ScheduledSession>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a session.
    pub fn add_session(&mut self, session: ScheduledSession) {
        self.sessions.push(session);
    }

    /// Number of sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Finds the session of a course.
    pub fn session_for(&self, course: &Course) -> Option<&ScheduledSession> {
        self.sessions.iter().find(|s| &s.course == course)
    }

    /// Sessions held at a slot.
    pub fn sessions_at(&self, slot: TimeSlot) -> Vec<&ScheduledSession> {
        self.sessions.iter().filter(|s| s.slot == slot).collect()
    }

    /// Sessions held in a classroom.
    pub fn sessions_for_classroom(&self, classroom_id: &str) -> Vec<&ScheduledSession> {
        self.sessions
            .iter()
            .filter(|s| s.classroom_id == classroom_id)
            .collect()
    }

    /// Sessions taught by a staff member.
    pub fn sessions_for_staff(&self, staff_id: &str) -> Vec<&ScheduledSession> {
        self.sessions
            .iter()
            .filter(|s| s.instructor_ids.iter().any(|id| id == staff_id))
            .collect()
    }

    /// Sessions grouped by student group label, each list in slot order.
    pub fn sessions_by_group(&self) -> BTreeMap<&str, Vec<&ScheduledSession>> {
        let mut map: BTreeMap<&str, Vec<&ScheduledSession>> = BTreeMap::new();
        for s in &self.sessions {
            map.entry(s.course.group.as_str()).or_default().push(s);
        }
        for list in map.values_mut() {
            list.sort_by_key(|s| s.slot);
        }
        map
    }

    /// Occupancy of a classroom: `Reserved` at every slot it is used.
    pub fn occupancy_for_classroom(&self, classroom_id: &str) -> AvailabilityGrid {
        let mut grid = AvailabilityGrid::new();
        for s in self.sessions_for_classroom(classroom_id) {
            grid.reserve(s.slot);
        }
        grid
    }

    /// Occupancy of a staff member: `Reserved` at every slot they teach.
    pub fn occupancy_for_staff(&self, staff_id: &str) -> AvailabilityGrid {
        let mut grid = AvailabilityGrid::new();
        for s in self.sessions_for_staff(staff_id) {
            grid.reserve(s.slot);
        }
        grid
    }
}
