//! Input validation for timetabling datasets.
//!
//! Checks the referential integrity of classrooms, staff, events and
//! constraints before any search starts. Detects:
//! - Duplicate IDs
//! - Events naming unknown instructors
//! - Hard constraints targeting unknown classrooms or staff
//!
//! Per-record checks (blank names, semester ranges, slot codes) happen
//! earlier, in the validated constructors of each model.

use crate::models::{Classroom, Constraint, ConstraintKind, Event, StaffMember};
use std::collections::HashSet;
use std::fmt;

/// Every cross-record problem of a dataset, or `Ok`.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// One referential-integrity problem between timetabling records.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    /// Names the offending classroom, staff member, event or constraint.
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two classrooms, staff members or events share an id.
    DuplicateId,
    /// An event lists a primary or secondary instructor id with no staff record.
    InvalidInstructorReference,
    /// A hard unavailability names a classroom id or staff name nobody has.
    UnknownConstraintTarget,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a loaded dataset.
///
/// Checks:
/// 1. No duplicate classroom IDs
/// 2. No duplicate staff IDs
/// 3. No duplicate event IDs (derived from semester and name)
/// 4. All event instructors point to existing staff IDs
/// 5. All hard constraints target an existing classroom ID or staff name
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_dataset(
    classrooms: &[Classroom],
    staff: &[StaffMember],
    events: &[Event],
    constraints: &[Constraint],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut classroom_ids = HashSet::new();
    for c in classrooms {
        if !classroom_ids.insert(c.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate classroom ID: {}", c.id),
            ));
        }
    }

    let mut staff_ids = HashSet::new();
    for m in staff {
        if !staff_ids.insert(m.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate staff ID: {}", m.id),
            ));
        }
    }

    let mut event_ids = HashSet::new();
    for event in events {
        if !event_ids.insert(event.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate event ID: {}", event.id),
            ));
        }

        for id in event.instructor_ids() {
            if !staff_ids.contains(id) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidInstructorReference,
                    format!("Event '{}' references unknown instructor '{}'", event.id, id),
                ));
            }
        }
    }

    // Constraint targets
    let staff_names: HashSet<&str> = staff.iter().map(|m| m.name.as_str()).collect();
    for constraint in constraints.iter().filter(|c| c.is_hard()) {
        match &constraint.kind {
            ConstraintKind::UnavailableClassroomTime { classroom_id, .. }
                if !classroom_ids.contains(classroom_id.as_str()) =>
            {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownConstraintTarget,
                    format!("Constraint references unknown classroom '{classroom_id}'"),
                ));
            }
            ConstraintKind::UnavailableStaffTime { staff_name, .. }
                if !staff_names.contains(staff_name.as_str()) =>
            {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownConstraintTarget,
                    format!("Constraint references unknown staff member '{staff_name}'"),
                ));
            }
            _ => {}
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
