//! Binary compatibility between two candidate assignments.
//!
//! This is the only place where classroom, instructor and student-group
//! collisions are decided. AC-3, consistency checks and every search
//! driver call [`compatible`] and nothing else.

use crate::models::{Course, Group};

use super::Assignment;

/// Whether `a` (for `course_a`) and `b` (for `course_b`) can coexist.
///
/// Different slots never conflict. At the same slot the classrooms must
/// differ, the instructor sets must be disjoint and the student groups
/// must be compatible (see [`groups_compatible`]). Symmetric.
pub fn compatible(a: &Assignment, course_a: &Course, b: &Assignment, course_b: &Course) -> bool {
    if a.slot != b.slot {
        return true;
    }
    debug_assert!(
        !a.instructors.is_empty() && !b.instructors.is_empty(),
        "assignment without instructors for {course_a} or {course_b}"
    );

    a.classroom != b.classroom
        && !a.shares_instructor(b)
        && groups_compatible(&course_a.group, &course_b.group)
}

/// Whether two student groups may attend sessions at the same slot.
///
/// True when the groups share no students. `ABE` is treated as
/// compatible with everything, see [`Group::is_compatible_with`].
#[inline]
pub fn groups_compatible(a: &Group, b: &Group) -> bool {
    a.is_compatible_with(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourseKind, Event, TimeSlot};

    fn course(kind: CourseKind, group: &str) -> Course {
        let event = Event::create("Algorithms", 1, None, vec!["p1".into()], vec!["a1".into()])
            .unwrap();
        Course::from_event(&event, kind, group)
    }

    fn at(classroom: usize, instructors: &[usize], code: &str) -> Assignment {
        Assignment::new(
            classroom,
            instructors.to_vec(),
            TimeSlot::from_code(code).unwrap(),
        )
    }

    #[test]
    fn test_different_slots_always_compatible() {
        let a = course(CourseKind::Lecture, "A");
        let b = course(CourseKind::Lecture, "A");
        assert!(compatible(&at(0, &[0], "M1"), &a, &at(0, &[0], "M2"), &b));
    }

    #[test]
    fn test_same_slot_classroom_clash() {
        let a = course(CourseKind::Lecture, "A");
        let b = course(CourseKind::Lecture, "B");
        assert!(!compatible(&at(0, &[0], "M1"), &a, &at(0, &[1], "M1"), &b));
        assert!(compatible(&at(0, &[0], "M1"), &a, &at(1, &[1], "M1"), &b));
    }

    #[test]
    fn test_same_slot_instructor_clash() {
        let a = course(CourseKind::Lecture, "A");
        let b = course(CourseKind::Lecture, "B");
        assert!(!compatible(&at(0, &[0, 1], "M1"), &a, &at(1, &[1], "M1"), &b));
    }

    #[test]
    fn test_subgroup_and_year_group_clash() {
        let a1 = course(CourseKind::Laboratory, "A1");
        let a = course(CourseKind::Lecture, "A");
        assert!(!compatible(&at(0, &[0], "M1"), &a1, &at(1, &[1], "M1"), &a));
        assert!(!compatible(&at(1, &[1], "M1"), &a, &at(0, &[0], "M1"), &a1));
    }

    #[test]
    fn test_disjoint_subgroups_compatible() {
        let a1 = course(CourseKind::Laboratory, "A1");
        let b2 = course(CourseKind::Laboratory, "B2");
        assert!(compatible(&at(0, &[0], "M1"), &a1, &at(1, &[1], "M1"), &b2));
    }

    #[test]
    fn test_symmetry() {
        let courses = [
            course(CourseKind::Lecture, "A"),
            course(CourseKind::Lecture, "ABE"),
            course(CourseKind::Laboratory, "A1"),
            course(CourseKind::Laboratory, "A2"),
            course(CourseKind::Laboratory, "B1"),
        ];
        let values = [
            at(0, &[0], "M1"),
            at(1, &[0], "M1"),
            at(1, &[1], "M1"),
            at(2, &[2, 3], "M1"),
            at(0, &[1], "T1"),
        ];
        for ca in &courses {
            for cb in &courses {
                for a in &values {
                    for b in &values {
                        assert_eq!(compatible(a, ca, b, cb), compatible(b, cb, a, ca));
                    }
                }
            }
        }
    }

    /// Known anomaly: `ABE` lectures never clash on students.
    #[test]
    fn test_all_students_group_never_clashes_known_anomaly() {
        let abe = course(CourseKind::Lecture, "ABE");
        let a1 = course(CourseKind::Laboratory, "A1");
        assert!(compatible(&at(0, &[0], "M1"), &abe, &at(1, &[1], "M1"), &a1));
        // Resource clashes still apply.
        assert!(!compatible(&at(0, &[0], "M1"), &abe, &at(0, &[1], "M1"), &a1));
    }
}
