//! Candidate assignments and per-course domains.
//!
//! The domain builder enumerates every locally legal assignment of each
//! course once, into an immutable candidate table. A [`Domains`] value
//! is the table plus, per course, the indices of the candidates that are
//! still possible. Cloning `Domains` copies only the index lists; the
//! table is shared, so sibling search branches never see each other's
//! narrowing.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::sync::Arc;

use crate::models::TimeSlot;

/// Index of a course in a [`Problem`](super::Problem).
pub type CourseIdx = usize;
/// Index of a classroom in a [`Problem`](super::Problem).
pub type ClassroomIdx = usize;
/// Index of a staff member in a [`Problem`](super::Problem).
pub type StaffIdx = usize;
/// Index of a candidate within one course's candidate table.
pub type ValueIdx = usize;

/// A (classroom, instructor set, slot) triple for one course.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Assignment {
    /// Classroom used.
    pub classroom: ClassroomIdx,
    /// Teaching staff; never empty.
    pub instructors: Vec<StaffIdx>,
    /// Weekly slot.
    pub slot: TimeSlot,
}

impl Assignment {
    /// Creates an assignment.
    pub fn new(classroom: ClassroomIdx, instructors: Vec<StaffIdx>, slot: TimeSlot) -> Self {
        Self {
            classroom,
            instructors,
            slot,
        }
    }

    /// Whether the two assignments share a staff member.
    #[inline]
    pub fn shares_instructor(&self, other: &Assignment) -> bool {
        self.instructors
            .iter()
            .any(|i| other.instructors.contains(i))
    }
}

/// Per-course sets of still-possible assignments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domains {
    table: Arc<Vec<Vec<Assignment>>>,
    live: Vec<Vec<ValueIdx>>,
}

impl Domains {
    /// Creates full domains over a candidate table.
    pub fn new(table: Vec<Vec<Assignment>>) -> Self {
        let live = table.iter().map(|c| (0..c.len()).collect()).collect();
        Self {
            table: Arc::new(table),
            live,
        }
    }

    /// Number of courses.
    #[inline]
    pub fn course_count(&self) -> usize {
        self.live.len()
    }

    /// Remaining domain size of a course.
    #[inline]
    pub fn len(&self, course: CourseIdx) -> usize {
        self.live[course].len()
    }

    /// Whether a course has no remaining values.
    #[inline]
    pub fn is_empty(&self, course: CourseIdx) -> bool {
        self.live[course].is_empty()
    }

    /// Whether any course has no remaining values.
    pub fn any_empty(&self) -> bool {
        self.live.iter().any(Vec::is_empty)
    }

    /// Number of candidates the builder produced for a course.
    #[inline]
    pub fn initial_len(&self, course: CourseIdx) -> usize {
        self.table[course].len()
    }

    /// Candidate by index (whether or not it is still live).
    #[inline]
    pub fn value(&self, course: CourseIdx, value: ValueIdx) -> &Assignment {
        &self.table[course][value]
    }

    /// Indices still live for a course, in enumeration order.
    #[inline]
    pub fn indices(&self, course: CourseIdx) -> &[ValueIdx] {
        &self.live[course]
    }

    /// Live assignments of a course.
    pub fn values(&self, course: CourseIdx) -> impl Iterator<Item = &Assignment> + '_ {
        let table = &self.table[course];
        self.live[course].iter().map(move |&v| &table[v])
    }

    /// Whether a candidate is still live.
    pub fn contains(&self, course: CourseIdx, value: ValueIdx) -> bool {
        self.live[course].contains(&value)
    }

    /// Remaining sizes of all courses.
    pub fn sizes(&self) -> Vec<usize> {
        self.live.iter().map(Vec::len).collect()
    }

    /// Total number of live values.
    pub fn total_len(&self) -> usize {
        self.live.iter().map(Vec::len).sum()
    }

    /// Narrows a course's domain to a single value.
    pub fn fix(&mut self, course: CourseIdx, value: ValueIdx) {
        self.live[course].clear();
        self.live[course].push(value);
    }

    /// Keeps only the values of `course` accepted by `keep`.
    ///
    /// `keep` sees the domains with `course` temporarily emptied, so it
    /// must only inspect other courses. Returns the number of removed values.
    pub fn retain<F>(&mut self, course: CourseIdx, mut keep: F) -> usize
    where
        F: FnMut(&Domains, &Assignment) -> bool,
    {
        let mut live = std::mem::take(&mut self.live[course]);
        let before = live.len();
        let this: &Domains = self;
        let table = &this.table[course];
        live.retain(|&v| keep(this, &table[v]));
        let removed = before - live.len();
        self.live[course] = live;
        removed
    }

    /// Shuffles every domain's enumeration order, reproducibly for a seed.
    pub fn shuffle(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        for live in &mut self.live {
            live.shuffle(&mut rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(code: &str) -> TimeSlot {
        TimeSlot::from_code(code).unwrap()
    }

    fn sample() -> Domains {
        Domains::new(vec![
            vec![
                Assignment::new(0, vec![0], slot("M1")),
                Assignment::new(0, vec![0], slot("M2")),
                Assignment::new(1, vec![0], slot("M1")),
            ],
            vec![Assignment::new(0, vec![1], slot("M1"))],
        ])
    }

    #[test]
    fn test_new_domains_are_full() {
        let d = sample();
        assert_eq!(d.course_count(), 2);
        assert_eq!(d.sizes(), vec![3, 1]);
        assert_eq!(d.total_len(), 4);
        assert!(!d.any_empty());
        assert_eq!(d.indices(0), &[0, 1, 2]);
    }

    #[test]
    fn test_fix_and_clone_isolation() {
        let d = sample();
        let mut child = d.clone();
        child.fix(0, 2);
        assert_eq!(child.len(0), 1);
        assert_eq!(child.values(0).next().unwrap().classroom, 1);
        assert_eq!(d.len(0), 3);
        assert_eq!(child.initial_len(0), 3);
    }

    #[test]
    fn test_retain() {
        let mut d = sample();
        let removed = d.retain(0, |doms, a| {
            assert!(doms.is_empty(0));
            a.slot != slot("M1")
        });
        assert_eq!(removed, 2);
        assert_eq!(d.indices(0), &[1]);
        assert!(d.contains(0, 1));
        assert!(!d.contains(0, 0));
    }

    #[test]
    fn test_shuffle_is_reproducible() {
        let table: Vec<Vec<Assignment>> = vec![TimeSlot::all()
            .map(|s| Assignment::new(0, vec![0], s))
            .collect()];
        let mut a = Domains::new(table.clone());
        let mut b = Domains::new(table);
        a.shuffle(7);
        b.shuffle(7);
        assert_eq!(a.indices(0), b.indices(0));
        assert_eq!(a.len(0), 30);
    }

    #[test]
    fn test_shares_instructor() {
        let a = Assignment::new(0, vec![1, 2], slot("M1"));
        let b = Assignment::new(1, vec![3, 2], slot("M1"));
        let c = Assignment::new(1, vec![4], slot("M1"));
        assert!(a.shares_instructor(&b));
        assert!(!a.shares_instructor(&c));
    }
}
