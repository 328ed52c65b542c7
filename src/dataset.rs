//! JSON dataset loading.
//!
//! A dataset is a directory holding `classrooms.json`,
//! `staff_members.json`, `events.json` and, optionally,
//! `constraints.json`. Raw records are deserialized first, then every
//! record goes through validated construction; all record problems are
//! reported together, followed by cross-record validation.

use log::{debug, info};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EntityError, Result, ScheduleError};
use crate::models::{
    Classroom, Constraint, ConstraintKind, CourseKind, Event, StaffMember, TimeSlot, Weight,
};
use crate::validation::{validate_dataset, ValidationResult};

pub const CLASSROOMS_FILE: &str = "classrooms.json";
pub const STAFF_FILE: &str = "staff_members.json";
pub const EVENTS_FILE: &str = "events.json";
pub const CONSTRAINTS_FILE: &str = "constraints.json";

#[derive(Debug, Deserialize)]
struct ClassroomsFile {
    classrooms: Vec<ClassroomRecord>,
}

#[derive(Debug, Deserialize)]
struct ClassroomRecord {
    id: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct StaffFile {
    staff_members: Vec<StaffRecord>,
}

#[derive(Debug, Deserialize)]
struct StaffRecord {
    id: String,
    position: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct EventsFile {
    events: Vec<EventRecord>,
}

#[derive(Debug, Deserialize)]
struct EventRecord {
    name: String,
    semester: u8,
    #[serde(default)]
    optional_package: Option<u8>,
    primary_instructors: Vec<String>,
    #[serde(default)]
    secondary_instructors: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ConstraintsFile {
    constraints: Vec<ConstraintRecord>,
}

/// Day name → list of `"HH:MM-HH:MM"` ranges.
type Intervals = BTreeMap<String, Vec<String>>;

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ConstraintRecord {
    UnavailableStaffTime {
        name: String,
        unavailability: Intervals,
        #[serde(default)]
        weight: Option<String>,
    },
    UnavailableClassroomTime {
        id: String,
        unavailability: Intervals,
        #[serde(default)]
        weight: Option<String>,
    },
    PreferredEvent {
        classroom: String,
        instructor: String,
        course: String,
        group: String,
        event_type: String,
        preferred_time: Intervals,
        #[serde(default)]
        weight: Option<String>,
    },
}

fn parse_slots(intervals: &Intervals, problems: &mut Vec<String>) -> BTreeSet<TimeSlot> {
    let mut slots = BTreeSet::new();
    for (day, ranges) in intervals {
        for range in ranges {
            match TimeSlot::from_day_and_range(day, range) {
                Ok(slot) => {
                    slots.insert(slot);
                }
                Err(e) => problems.extend(e.problems),
            }
        }
    }
    slots
}

/// Unavailability constraints need at least one interval.
fn require_intervals(intervals: &Intervals, problems: &mut Vec<String>) {
    if intervals.values().all(Vec::is_empty) {
        problems
            .push("The constraint should contain at least one unavailability interval.".into());
    }
}

fn parse_weight(weight: Option<&str>, problems: &mut Vec<String>) -> Weight {
    match weight {
        None => {
            problems.push("The constraint should have a weight.".to_string());
            Weight::Hard
        }
        Some(w) => Weight::parse(w).unwrap_or_else(|| {
            problems.push(format!("Invalid weight '{w}'."));
            Weight::Hard
        }),
    }
}

impl ConstraintRecord {
    fn into_constraint(self) -> std::result::Result<Constraint, EntityError> {
        let mut problems = Vec::new();
        let (weight, kind) = match self {
            ConstraintRecord::UnavailableStaffTime {
                name,
                unavailability,
                weight,
            } => {
                require_intervals(&unavailability, &mut problems);
                (
                    parse_weight(weight.as_deref(), &mut problems),
                    ConstraintKind::UnavailableStaffTime {
                        staff_name: name,
                        slots: parse_slots(&unavailability, &mut problems),
                    },
                )
            }
            ConstraintRecord::UnavailableClassroomTime {
                id,
                unavailability,
                weight,
            } => {
                require_intervals(&unavailability, &mut problems);
                (
                    parse_weight(weight.as_deref(), &mut problems),
                    ConstraintKind::UnavailableClassroomTime {
                        classroom_id: id,
                        slots: parse_slots(&unavailability, &mut problems),
                    },
                )
            }
            ConstraintRecord::PreferredEvent {
                classroom,
                instructor,
                course,
                group,
                event_type,
                preferred_time,
                weight,
            } => {
                let event_type = event_type.parse::<CourseKind>().unwrap_or_else(|e| {
                    problems.push(e);
                    CourseKind::Lecture
                });
                (
                    parse_weight(weight.as_deref(), &mut problems),
                    ConstraintKind::PreferredEvent {
                        classroom,
                        instructor,
                        course,
                        group,
                        event_type,
                        preferred: parse_slots(&preferred_time, &mut problems),
                    },
                )
            }
        };

        match EntityError::collect("constraint", problems) {
            Some(err) => Err(err),
            None => Ok(Constraint { weight, kind }),
        }
    }
}

fn parse_json<'a, T: Deserialize<'a>>(origin: &str, text: &'a str) -> Result<T> {
    serde_json::from_str(text).map_err(|source| ScheduleError::Json {
        origin: origin.to_string(),
        source,
    })
}

fn read(path: PathBuf) -> Result<String> {
    fs::read_to_string(&path).map_err(|source| ScheduleError::Io { path, source })
}

/// Splits validated-construction results into values and errors.
fn partition<T>(
    results: impl IntoIterator<Item = std::result::Result<T, EntityError>>,
    errors: &mut Vec<EntityError>,
) -> Vec<T> {
    let mut values = Vec::new();
    for r in results {
        match r {
            Ok(v) => values.push(v),
            Err(e) => errors.push(e),
        }
    }
    values
}

/// Validated entities of one input dataset.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub classrooms: Vec<Classroom>,
    pub staff: Vec<StaffMember>,
    pub events: Vec<Event>,
    pub constraints: Vec<Constraint>,
}

impl Dataset {
    /// Loads the dataset stored in `dir`.
    ///
    /// # Errors
    /// I/O and JSON errors name the offending file.
    /// [`ScheduleError::Records`] collects every record that failed
    /// construction, [`ScheduleError::Invalid`] every cross-record problem.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        info!("Loading dataset from {}", dir.display());

        let classrooms = read(dir.join(CLASSROOMS_FILE))?;
        let staff = read(dir.join(STAFF_FILE))?;
        let events = read(dir.join(EVENTS_FILE))?;
        let constraints_path = dir.join(CONSTRAINTS_FILE);
        let constraints = if constraints_path.exists() {
            Some(read(constraints_path)?)
        } else {
            debug!("No {CONSTRAINTS_FILE} in {}", dir.display());
            None
        };

        Self::from_json_strs(&classrooms, &staff, &events, constraints.as_deref())
    }

    /// Builds a dataset from the contents of the four JSON files.
    pub fn from_json_strs(
        classrooms: &str,
        staff: &str,
        events: &str,
        constraints: Option<&str>,
    ) -> Result<Self> {
        let classrooms: ClassroomsFile = parse_json(CLASSROOMS_FILE, classrooms)?;
        let staff: StaffFile = parse_json(STAFF_FILE, staff)?;
        let events: EventsFile = parse_json(EVENTS_FILE, events)?;
        let constraints = match constraints {
            Some(text) => parse_json::<ConstraintsFile>(CONSTRAINTS_FILE, text)?.constraints,
            None => Vec::new(),
        };

        let mut errors = Vec::new();
        let classrooms = partition(
            classrooms
                .classrooms
                .iter()
                .map(|r| Classroom::create(&r.id, &r.kind)),
            &mut errors,
        );
        let staff = partition(
            staff
                .staff_members
                .iter()
                .map(|r| StaffMember::create(&r.id, &r.position, &r.name)),
            &mut errors,
        );
        let events = partition(
            events.events.into_iter().map(|r| {
                Event::create(
                    &r.name,
                    r.semester,
                    r.optional_package,
                    r.primary_instructors,
                    r.secondary_instructors,
                )
            }),
            &mut errors,
        );
        let constraints = partition(
            constraints.into_iter().map(ConstraintRecord::into_constraint),
            &mut errors,
        );
        if !errors.is_empty() {
            return Err(ScheduleError::Records(errors));
        }

        Self::from_parts(classrooms, staff, events, constraints)
    }

    /// Assembles a dataset from already-constructed entities.
    ///
    /// # Errors
    /// [`ScheduleError::Invalid`] if [`Dataset::validate`] fails.
    pub fn from_parts(
        classrooms: Vec<Classroom>,
        staff: Vec<StaffMember>,
        events: Vec<Event>,
        constraints: Vec<Constraint>,
    ) -> Result<Self> {
        let dataset = Self {
            classrooms,
            staff,
            events,
            constraints,
        };
        dataset.validate().map_err(ScheduleError::Invalid)?;
        info!(
            "Dataset: {} classroom(s), {} staff member(s), {} event(s), {} constraint(s)",
            dataset.classrooms.len(),
            dataset.staff.len(),
            dataset.events.len(),
            dataset.constraints.len()
        );
        Ok(dataset)
    }

    /// Cross-record checks: unique ids and resolvable references.
    pub fn validate(&self) -> ValidationResult {
        validate_dataset(&self.classrooms, &self.staff, &self.events, &self.constraints)
    }
}
