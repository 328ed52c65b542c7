//! Problem arena, hard-constraint application and domain construction.
//!
//! Entities are interned once into index-addressed vectors; the engine
//! refers to courses, classrooms and staff by index only.

use log::{debug, info, trace, warn};
use std::collections::HashMap;

use crate::error::{Result, ScheduleError};
use crate::models::{
    Classroom, Constraint, ConstraintKind, Course, CourseKind, Schedule,
    ScheduledSession, StaffMember, TimeSlot,
};

use super::{Assignment, ClassroomIdx, CourseIdx, Domains, StaffIdx, ValueIdx};

/// Blocks availability cells for every hard constraint.
///
/// `UnavailableClassroomTime` applies to the classroom with that id,
/// whatever its kind. `UnavailableStaffTime` applies to every staff member
/// with that name. Soft constraints and preferences change nothing.
///
/// # Errors
/// [`ScheduleError::UnknownClassroom`] / [`ScheduleError::UnknownStaff`]
/// when a hard constraint names an entity that does not exist. Cells
/// blocked by earlier constraints stay blocked.
pub fn apply_hard_constraints(
    classrooms: &mut [Classroom],
    staff: &mut [StaffMember],
    constraints: &[Constraint],
) -> Result<()> {
    for constraint in constraints.iter().filter(|c| c.is_hard()) {
        match &constraint.kind {
            ConstraintKind::UnavailableClassroomTime {
                classroom_id,
                slots,
            } => {
                let classroom = classrooms
                    .iter_mut()
                    .find(|c| &c.id == classroom_id)
                    .ok_or_else(|| ScheduleError::UnknownClassroom(classroom_id.clone()))?;
                for &slot in slots {
                    classroom.availability.block(slot);
                }
                debug!("Blocked {} slot(s) for classroom {}", slots.len(), classroom_id);
            }
            ConstraintKind::UnavailableStaffTime { staff_name, slots } => {
                let mut matched = 0;
                for member in staff.iter_mut().filter(|m| &m.name == staff_name) {
                    for &slot in slots {
                        member.availability.block(slot);
                    }
                    matched += 1;
                }
                if matched == 0 {
                    return Err(ScheduleError::UnknownStaff(staff_name.clone()));
                }
                debug!("Blocked {} slot(s) for staff '{}'", slots.len(), staff_name);
            }
            ConstraintKind::PreferredEvent { course, group, .. } => {
                trace!("Preference for {course} {group} is not scored");
            }
        }
    }
    Ok(())
}

/// An interned timetabling problem.
#[derive(Debug, Clone)]
pub struct Problem {
    courses: Vec<Course>,
    classrooms: Vec<Classroom>,
    staff: Vec<StaffMember>,
    // resolved `Course::instructors`, same order
    course_staff: Vec<Vec<StaffIdx>>,
}

impl Problem {
    /// Interns the entities and resolves instructor ids.
    ///
    /// # Errors
    /// [`ScheduleError::UnknownInstructor`] if a course names a staff id
    /// that is not in `staff`.
    pub fn new(
        courses: Vec<Course>,
        classrooms: Vec<Classroom>,
        staff: Vec<StaffMember>,
    ) -> Result<Self> {
        let by_id: HashMap<&str, StaffIdx> = staff
            .iter()
            .enumerate()
            .map(|(i, m)| (m.id.as_str(), i))
            .collect();

        let course_staff = courses
            .iter()
            .map(|course| {
                course
                    .instructors
                    .iter()
                    .map(|id| {
                        by_id.get(id.as_str()).copied().ok_or_else(|| {
                            ScheduleError::UnknownInstructor {
                                course: course.label(),
                                instructor: id.clone(),
                            }
                        })
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            courses,
            classrooms,
            staff,
            course_staff,
        })
    }

    /// Courses, in enumeration order.
    #[inline]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Course by index.
    #[inline]
    pub fn course(&self, course: CourseIdx) -> &Course {
        &self.courses[course]
    }

    /// Number of courses.
    #[inline]
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Classrooms.
    #[inline]
    pub fn classrooms(&self) -> &[Classroom] {
        &self.classrooms
    }

    /// Staff members.
    #[inline]
    pub fn staff(&self) -> &[StaffMember] {
        &self.staff
    }

    /// Applies hard constraints to the owned availability grids.
    pub fn apply_hard_constraints(&mut self, constraints: &[Constraint]) -> Result<()> {
        apply_hard_constraints(&mut self.classrooms, &mut self.staff, constraints)
    }

    /// Indices of the classrooms that host a kind of session.
    pub fn classroom_pool(&self, kind: CourseKind) -> Vec<ClassroomIdx> {
        self.classrooms
            .iter()
            .enumerate()
            .filter(|(_, c)| c.kind.hosts(kind))
            .map(|(i, _)| i)
            .collect()
    }

    /// Candidate instructor sets of a course.
    ///
    /// Lecture: one set holding every primary instructor (they co-teach).
    /// Laboratory: one singleton per secondary instructor.
    pub fn instructor_sets(&self, course: CourseIdx) -> Vec<Vec<StaffIdx>> {
        let staff = &self.course_staff[course];
        match self.courses[course].kind {
            CourseKind::Lecture if staff.is_empty() => Vec::new(),
            CourseKind::Lecture => vec![staff.clone()],
            CourseKind::Laboratory => staff.iter().map(|&s| vec![s]).collect(),
        }
    }

    /// Whether an assignment is legal for a course on its own: matching
    /// classroom kind, open classroom cell, open cell for every instructor.
    pub fn locally_legal(&self, course: CourseIdx, assignment: &Assignment) -> bool {
        let classroom = &self.classrooms[assignment.classroom];
        classroom.kind.hosts(self.courses[course].kind)
            && classroom.availability.is_open(assignment.slot)
            && !assignment.instructors.is_empty()
            && assignment
                .instructors
                .iter()
                .all(|&s| self.staff[s].is_available_at(assignment.slot))
    }

    /// Enumerates every locally legal assignment of every course.
    ///
    /// Enumeration order is classroom, then slot (week order), then
    /// instructor set. A course whose domain comes out empty makes the
    /// problem infeasible.
    pub fn build_domains(&self) -> Domains {
        let lecture_pool = self.classroom_pool(CourseKind::Lecture);
        let lab_pool = self.classroom_pool(CourseKind::Laboratory);

        let table: Vec<Vec<Assignment>> = (0..self.courses.len())
            .map(|course| {
                let pool = match self.courses[course].kind {
                    CourseKind::Lecture => &lecture_pool,
                    CourseKind::Laboratory => &lab_pool,
                };
                let sets = self.instructor_sets(course);

                let mut values = Vec::new();
                for &classroom in pool {
                    for slot in TimeSlot::all() {
                        for set in &sets {
                            let candidate = Assignment::new(classroom, set.clone(), slot);
                            if self.locally_legal(course, &candidate) {
                                values.push(candidate);
                            }
                        }
                    }
                }
                if values.is_empty() {
                    warn!("Course {} has no legal assignment", self.courses[course]);
                }
                values
            })
            .collect();

        let domains = Domains::new(table);
        info!(
            "Built domains for {} course(s): {} candidate(s) over {} lecture room(s) and {} laboratory room(s)",
            self.courses.len(),
            domains.total_len(),
            lecture_pool.len(),
            lab_pool.len()
        );
        domains
    }

    /// Compatibility of two candidates of two courses.
    #[inline]
    pub fn compatible(
        &self,
        course_a: CourseIdx,
        a: &Assignment,
        course_b: CourseIdx,
        b: &Assignment,
    ) -> bool {
        super::compatible(a, &self.courses[course_a], b, &self.courses[course_b])
    }

    /// Materializes a complete assignment as a [`Schedule`] in course order.
    pub fn schedule(&self, domains: &Domains, values: &[ValueIdx]) -> Schedule {
        let mut schedule = Schedule::new();
        for (course, &value) in values.iter().enumerate() {
            let assignment = domains.value(course, value);
            schedule.add_session(ScheduledSession {
                course: self.courses[course].clone(),
                classroom_id: self.classrooms[assignment.classroom].id.clone(),
                instructor_ids: assignment
                    .instructors
                    .iter()
                    .map(|&s| self.staff[s].id.clone())
                    .collect(),
                slot: assignment.slot,
            });
        }
        schedule
    }
}
