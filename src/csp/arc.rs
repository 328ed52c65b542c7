//! Arc-consistency propagation (AC-3).
//!
//! Every ordered pair of distinct courses is an arc. `revise(i, j)`
//! removes from course `i` every value that has no compatible partner in
//! course `j` (or that clashes with `j`'s value when `j` is already
//! assigned). `ac3` runs revisions to a fixpoint and reports failure as
//! soon as a domain empties.
//!
//! Used once as preprocessing and after every tentative assignment during
//! MAC search.
//!
//! # Reference
//! Mackworth (1977), "Consistency in Networks of Relations"

use log::trace;
use std::collections::VecDeque;

use super::{CourseIdx, Domains, Problem, SearchStats, ValueIdx};

/// Bit set of the slots occupied by a course's live values.
fn slot_mask(domains: &Domains, course: CourseIdx) -> u32 {
    domains
        .values(course)
        .fold(0, |mask, a| mask | (1 << a.slot.index()))
}

/// Revises arc `(i, j)`. Returns the number of values removed from `i`.
///
/// A value of `i` in slot `s` trivially has a witness when `j` still has
/// a value outside `s`, so the pairwise scan only runs when `j` is
/// confined to `s`.
fn revise_counted(
    problem: &Problem,
    domains: &mut Domains,
    i: CourseIdx,
    j: CourseIdx,
    assigned: &[Option<ValueIdx>],
) -> usize {
    if let Some(w) = assigned[j] {
        let partner = domains.value(j, w).clone();
        return domains.retain(i, |_, v| problem.compatible(i, v, j, &partner));
    }

    let mask = slot_mask(domains, j);
    domains.retain(i, |doms, v| {
        if mask & !(1 << v.slot.index()) != 0 {
            return true;
        }
        doms.values(j).any(|w| problem.compatible(i, v, j, w))
    })
}

/// Revises arc `(i, j)`: drops every value of course `i` that no value of
/// course `j` supports. Returns whether anything was dropped.
pub fn revise(
    problem: &Problem,
    domains: &mut Domains,
    i: CourseIdx,
    j: CourseIdx,
    assigned: &[Option<ValueIdx>],
) -> bool {
    revise_counted(problem, domains, i, j, assigned) > 0
}

/// Runs AC-3 to a fixpoint.
///
/// `assigned[c]` holds the value committed for course `c`, if any.
/// Returns `false` as soon as some domain becomes empty; the domains are
/// then left partially revised and must be discarded.
pub fn ac3(problem: &Problem, domains: &mut Domains, assigned: &[Option<ValueIdx>]) -> bool {
    ac3_with_stats(problem, domains, assigned, &mut SearchStats::default())
}

/// [`ac3`] that also records revisions and pruned values.
pub fn ac3_with_stats(
    problem: &Problem,
    domains: &mut Domains,
    assigned: &[Option<ValueIdx>],
    stats: &mut SearchStats,
) -> bool {
    let n = domains.course_count();
    if domains.any_empty() {
        return false;
    }

    let mut queue: VecDeque<(CourseIdx, CourseIdx)> = VecDeque::with_capacity(n * n);
    // queued[i * n + j] mirrors membership of (i, j) in `queue`
    let mut queued = vec![false; n * n];
    for i in 0..n {
        for j in 0..n {
            if i != j {
                queue.push_back((i, j));
                queued[i * n + j] = true;
            }
        }
    }

    while let Some((i, j)) = queue.pop_front() {
        queued[i * n + j] = false;

        let removed = revise_counted(problem, domains, i, j, assigned);
        stats.on_revision(removed);
        if removed == 0 {
            continue;
        }
        if domains.is_empty(i) {
            trace!("AC-3 emptied the domain of {}", problem.course(i));
            return false;
        }
        for k in (0..n).filter(|&k| k != i && k != j) {
            if !queued[k * n + i] {
                queued[k * n + i] = true;
                queue.push_back((k, i));
            }
        }
    }

    true
}
