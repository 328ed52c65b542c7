//! Search drivers.
//!
//! - [`backtrack`]: chronological backtracking in course order over the
//!   initial domains, the baseline.
//! - [`count_solutions`]: the same traversal, enumerating every complete
//!   assignment.
//! - [`mac_backtrack`]: MRV variable ordering with AC-3 maintained after
//!   every tentative assignment, the production solver.
//!
//! All drivers are iterative over an explicit stack, so deep problems do
//! not exhaust the call stack. The guard is polled on every node.

use log::debug;

use super::{
    ac3_with_stats, CourseIdx, Domains, Problem, SearchGuard, SearchStats, StopReason, ValueIdx,
};

/// Result of a single-solution search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    /// A complete assignment: `values[c]` is the chosen value of course `c`.
    Found(Vec<ValueIdx>),
    /// The search space holds no solution.
    Exhausted,
    /// The guard stopped the search first.
    Interrupted(StopReason),
}

/// Result of [`count_solutions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolutionCount {
    /// Complete assignments enumerated.
    pub count: u64,
    /// Whether the whole space was enumerated.
    pub exhaustive: bool,
    /// Set when the guard stopped enumeration.
    pub stopped: Option<StopReason>,
}

/// Whether giving `value` to `course` is compatible with every committed
/// course in `assigned`.
pub fn is_consistent(
    problem: &Problem,
    domains: &Domains,
    assigned: &[Option<ValueIdx>],
    course: CourseIdx,
    value: ValueIdx,
) -> bool {
    let candidate = domains.value(course, value);
    assigned.iter().enumerate().all(|(other, committed)| match committed {
        Some(w) if other != course => {
            problem.compatible(course, candidate, other, domains.value(other, *w))
        }
        _ => true,
    })
}

/// Picks the unassigned course with the fewest live values; ties go to the
/// lowest index.
pub fn select_mrv(domains: &Domains, assigned: &[Option<ValueIdx>]) -> Option<CourseIdx> {
    (0..domains.course_count())
        .filter(|&c| assigned[c].is_none())
        .min_by_key(|&c| (domains.len(c), c))
}

enum Walk {
    Stopped,
    Exhausted,
    Interrupted(StopReason),
}

/// Chronological depth-first walk in course order. `on_solution` gets each
/// complete assignment and returns whether to keep going.
fn walk<F>(
    problem: &Problem,
    domains: &Domains,
    guard: &SearchGuard,
    stats: &mut SearchStats,
    mut on_solution: F,
) -> Walk
where
    F: FnMut(&[Option<ValueIdx>]) -> bool,
{
    let n = problem.course_count();
    if n == 0 {
        stats.on_solution();
        return if on_solution(&[]) {
            Walk::Exhausted
        } else {
            Walk::Stopped
        };
    }

    let mut assigned: Vec<Option<ValueIdx>> = vec![None; n];
    // next candidate position per depth
    let mut cursors = vec![0usize; n];
    let mut depth = 0;

    loop {
        if let Some(reason) = guard.check() {
            return Walk::Interrupted(reason);
        }
        stats.on_node_explored(depth);

        let candidates = domains.indices(depth);
        let mut next = None;
        while cursors[depth] < candidates.len() {
            let value = candidates[cursors[depth]];
            cursors[depth] += 1;
            if is_consistent(problem, domains, &assigned, depth, value) {
                next = Some(value);
                break;
            }
        }

        match next {
            Some(value) if depth + 1 == n => {
                assigned[depth] = Some(value);
                stats.on_solution();
                if !on_solution(&assigned) {
                    return Walk::Stopped;
                }
                assigned[depth] = None;
            }
            Some(value) => {
                assigned[depth] = Some(value);
                depth += 1;
                cursors[depth] = 0;
            }
            None => {
                stats.on_backtrack();
                if depth == 0 {
                    return Walk::Exhausted;
                }
                depth -= 1;
                assigned[depth] = None;
            }
        }
    }
}

/// Plain chronological backtracking over `domains` in course order.
///
/// Returns the first complete assignment found.
pub fn backtrack(
    problem: &Problem,
    domains: &Domains,
    guard: &SearchGuard,
    stats: &mut SearchStats,
) -> SearchResult {
    let mut found = None;
    let outcome = walk(problem, domains, guard, stats, |assigned| {
        found = assigned.iter().copied().collect::<Option<Vec<_>>>();
        false
    });
    match (outcome, found) {
        (Walk::Stopped, Some(values)) => SearchResult::Found(values),
        (Walk::Interrupted(reason), _) => SearchResult::Interrupted(reason),
        _ => SearchResult::Exhausted,
    }
}

/// Counts complete assignments with the plain backtracking traversal.
///
/// Stops early once `limit` solutions were counted. A limit of zero
/// returns an empty, non-exhaustive count without searching.
pub fn count_solutions(
    problem: &Problem,
    domains: &Domains,
    limit: Option<u64>,
    guard: &SearchGuard,
    stats: &mut SearchStats,
) -> SolutionCount {
    if limit == Some(0) {
        return SolutionCount {
            count: 0,
            exhaustive: false,
            stopped: None,
        };
    }
    let mut count = 0u64;
    let outcome = walk(problem, domains, guard, stats, |_| {
        count += 1;
        limit.map_or(true, |limit| count < limit)
    });
    debug!("Counted {count} solution(s)");
    match outcome {
        Walk::Exhausted => SolutionCount {
            count,
            exhaustive: true,
            stopped: None,
        },
        Walk::Stopped => SolutionCount {
            count,
            exhaustive: false,
            stopped: None,
        },
        Walk::Interrupted(reason) => SolutionCount {
            count,
            exhaustive: false,
            stopped: Some(reason),
        },
    }
}

struct Frame {
    course: CourseIdx,
    // domains in effect when `course` was selected
    domains: Domains,
    cursor: usize,
}

/// MRV backtracking with maintained arc consistency.
///
/// `domains` should already be arc consistent. Each tentative value is
/// checked against the committed courses, fixed in a private copy of the
/// domains, and propagated with AC-3; the copy becomes the child node only
/// if propagation succeeds. The first complete assignment wins.
pub fn mac_backtrack(
    problem: &Problem,
    domains: Domains,
    guard: &SearchGuard,
    stats: &mut SearchStats,
) -> SearchResult {
    let n = problem.course_count();
    let mut assigned: Vec<Option<ValueIdx>> = vec![None; n];

    let Some(root) = select_mrv(&domains, &assigned) else {
        stats.on_solution();
        return SearchResult::Found(Vec::new());
    };
    let mut stack = vec![Frame {
        course: root,
        domains,
        cursor: 0,
    }];

    loop {
        let depth = stack.len();
        let Some(frame) = stack.last_mut() else {
            return SearchResult::Exhausted;
        };
        if let Some(reason) = guard.check() {
            return SearchResult::Interrupted(reason);
        }
        stats.on_node_explored(depth - 1);

        let course = frame.course;
        let mut child = None;
        while frame.cursor < frame.domains.len(course) {
            let value = frame.domains.indices(course)[frame.cursor];
            frame.cursor += 1;
            if !is_consistent(problem, &frame.domains, &assigned, course, value) {
                continue;
            }

            let mut next = frame.domains.clone();
            next.fix(course, value);
            assigned[course] = Some(value);
            if ac3_with_stats(problem, &mut next, &assigned, stats) {
                child = Some(next);
                break;
            }
            assigned[course] = None;
        }

        match child {
            Some(next) => match select_mrv(&next, &assigned) {
                Some(course) => stack.push(Frame {
                    course,
                    domains: next,
                    cursor: 0,
                }),
                None => {
                    stats.on_solution();
                    let values = assigned.iter().copied().collect::<Option<Vec<_>>>();
                    if let Some(values) = values {
                        return SearchResult::Found(values);
                    }
                }
            },
            None => {
                stats.on_backtrack();
                stack.pop();
                if let Some(parent) = stack.last() {
                    assigned[parent.course] = None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csp::{ac3, CancellationToken};
    use crate::models::{
        generate_courses, Classroom, Course, CourseKind, Event, Position, StaffMember, TimeSlot,
    };
    use std::time::Duration;

    fn slot(code: &str) -> TimeSlot {
        TimeSlot::from_code(code).unwrap()
    }

    fn only_open(mut classroom: Classroom, open: &[&str]) -> Classroom {
        for s in TimeSlot::all() {
            if !open.iter().any(|code| slot(code) == s) {
                classroom.availability.block(s);
            }
        }
        classroom
    }

    fn staff() -> Vec<StaffMember> {
        vec![
            StaffMember::new("p1", "Ada Lovelace", Position::Professor),
            StaffMember::new("p2", "Alan Turing", Position::Professor),
            StaffMember::new("a1", "Grace Hopper", Position::Assistant),
        ]
    }

    fn event(name: &str, primary: &str) -> Event {
        Event::create(name, 1, None, vec![primary.into()], vec!["a1".into()]).unwrap()
    }

    /// Three lectures, two rooms, two slots. Exactly two solutions.
    fn small() -> Problem {
        let e1 = event("Algorithms", "p1");
        let e2 = event("Databases", "p2");
        let courses = vec![
            Course::from_event(&e1, CourseKind::Lecture, "A"),
            Course::from_event(&e1, CourseKind::Lecture, "B"),
            Course::from_event(&e2, CourseKind::Lecture, "A"),
        ];
        let classrooms = vec![
            only_open(Classroom::lecture("C1"), &["M1", "M2"]),
            only_open(Classroom::lecture("C2"), &["M1"]),
        ];
        Problem::new(courses, classrooms, staff()).unwrap()
    }

    /// Two lectures of one instructor competing for one slot.
    fn infeasible() -> Problem {
        let e = event("Algorithms", "p1");
        let courses = vec![
            Course::from_event(&e, CourseKind::Lecture, "A"),
            Course::from_event(&e, CourseKind::Lecture, "B"),
        ];
        let classrooms = vec![
            only_open(Classroom::lecture("C1"), &["M1"]),
            only_open(Classroom::lecture("C2"), &["M1"]),
        ];
        Problem::new(courses, classrooms, staff()).unwrap()
    }

    fn assert_valid(problem: &Problem, domains: &Domains, values: &[ValueIdx]) {
        assert_eq!(values.len(), problem.course_count());
        for i in 0..values.len() {
            for j in (i + 1)..values.len() {
                let a = domains.value(i, values[i]);
                let b = domains.value(j, values[j]);
                assert!(problem.compatible(i, a, j, b), "courses {i} and {j} collide");
            }
        }
    }

    #[test]
    fn test_backtrack_finds_valid_solution() {
        let p = small();
        let d = p.build_domains();
        let mut stats = SearchStats::default();
        match backtrack(&p, &d, &SearchGuard::unlimited(), &mut stats) {
            SearchResult::Found(values) => assert_valid(&p, &d, &values),
            _ => panic!("wrong variant"),
        }
        assert_eq!(stats.solutions, 1);
        assert!(stats.backtracks > 0);
    }

    #[test]
    fn test_mac_finds_valid_solution() {
        let p = small();
        let mut d = p.build_domains();
        assert!(ac3(&p, &mut d, &[None, None, None]));
        let mut stats = SearchStats::default();
        match mac_backtrack(&p, d.clone(), &SearchGuard::unlimited(), &mut stats) {
            SearchResult::Found(values) => assert_valid(&p, &d, &values),
            _ => panic!("wrong variant"),
        }
        assert!(stats.revisions > 0);
    }

    #[test]
    fn test_count_solutions() {
        let p = small();
        let d = p.build_domains();
        let guard = SearchGuard::unlimited();
        let count = count_solutions(&p, &d, None, &guard, &mut SearchStats::default());
        assert_eq!(count.count, 2);
        assert!(count.exhaustive);
        assert_eq!(count.stopped, None);
    }

    #[test]
    fn test_count_solutions_limit() {
        let p = small();
        let d = p.build_domains();
        let guard = SearchGuard::unlimited();
        let count = count_solutions(&p, &d, Some(1), &guard, &mut SearchStats::default());
        assert_eq!(count.count, 1);
        assert!(!count.exhaustive);
    }

    #[test]
    fn test_count_solutions_zero_limit() {
        let p = small();
        let d = p.build_domains();
        let guard = SearchGuard::unlimited();
        let mut stats = SearchStats::default();
        let count = count_solutions(&p, &d, Some(0), &guard, &mut stats);
        assert_eq!(count.count, 0);
        assert!(!count.exhaustive);
        assert_eq!(stats.nodes, 0);
        assert_eq!(stats.solutions, 0);
    }

    #[test]
    fn test_infeasible_instance() {
        let p = infeasible();
        let d = p.build_domains();
        let guard = SearchGuard::unlimited();
        let mut stats = SearchStats::default();

        assert_eq!(backtrack(&p, &d, &guard, &mut stats), SearchResult::Exhausted);
        assert_eq!(mac_backtrack(&p, d.clone(), &guard, &mut stats), SearchResult::Exhausted);
        assert_eq!(count_solutions(&p, &d, None, &guard, &mut stats).count, 0);
    }

    #[test]
    fn test_counting_and_mac_agree_on_feasibility() {
        // elective: one ABE lecture and three laboratories sharing one assistant
        let elective =
            Event::create("Algorithms", 1, Some(1), vec!["p1".into()], vec!["a1".into()])
                .unwrap();
        let courses = generate_courses(&[elective], 1);
        let guard = SearchGuard::unlimited();

        for open in [&["M1"][..], &["M1", "M2"], &["M1", "M2", "T1", "T2"]] {
            let classrooms = vec![
                only_open(Classroom::lecture("C1"), open),
                only_open(Classroom::laboratory("L1"), open),
            ];
            let p = Problem::new(courses.clone(), classrooms, staff()).unwrap();
            let d = p.build_domains();

            let count = count_solutions(&p, &d, None, &guard, &mut SearchStats::default());
            let mac = mac_backtrack(&p, d.clone(), &guard, &mut SearchStats::default());
            assert!(count.exhaustive);
            assert_eq!(
                count.count > 0,
                matches!(mac, SearchResult::Found(_)),
                "open slots {open:?}"
            );
        }
    }

    #[test]
    fn test_mrv_prefers_smallest_domain() {
        let p = small();
        let mut d = p.build_domains();
        d.retain(2, |_, a| a.slot == slot("M2"));
        assert_eq!(select_mrv(&d, &[None, None, None]), Some(2));
        assert_eq!(select_mrv(&d, &[None, None, Some(0)]), Some(0));
        assert_eq!(select_mrv(&d, &[Some(0), Some(0), Some(0)]), None);
    }

    #[test]
    fn test_cancelled_search_is_interrupted() {
        let p = small();
        let d = p.build_domains();
        let token = CancellationToken::new();
        token.cancel();
        let guard = SearchGuard::new(token);
        let mut stats = SearchStats::default();

        assert_eq!(
            backtrack(&p, &d, &guard, &mut stats),
            SearchResult::Interrupted(StopReason::Cancelled)
        );
        assert_eq!(
            mac_backtrack(&p, d.clone(), &guard, &mut stats),
            SearchResult::Interrupted(StopReason::Cancelled)
        );
        assert_eq!(stats.solutions, 0);
    }

    #[test]
    fn test_expired_time_limit_interrupts() {
        let p = small();
        let d = p.build_domains();
        let guard = SearchGuard::unlimited().with_time_limit(Duration::ZERO);
        let count = count_solutions(&p, &d, None, &guard, &mut SearchStats::default());
        assert_eq!(count.stopped, Some(StopReason::TimeLimit));
        assert!(!count.exhaustive);
    }

    #[test]
    fn test_no_courses() {
        let p = Problem::new(vec![], vec![], vec![]).unwrap();
        let d = p.build_domains();
        let guard = SearchGuard::unlimited();
        let mut stats = SearchStats::default();
        assert_eq!(backtrack(&p, &d, &guard, &mut stats), SearchResult::Found(vec![]));
        assert_eq!(mac_backtrack(&p, d, &guard, &mut stats), SearchResult::Found(vec![]));
    }
}
