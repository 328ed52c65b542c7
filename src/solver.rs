//! Timetable solver: configuration and orchestration.
//!
//! # Algorithm
//!
//! 1. Expand the events of the requested semester parity into courses.
//! 2. Apply hard constraints to the classroom and staff grids.
//! 3. Build the initial domains (optionally shuffled for variety).
//! 4. Run the configured algorithm. For [`Algorithm::Ac3Backtracking`]
//!    AC-3 preprocessing runs first and short-circuits to
//!    [`SolveOutcome::Infeasible`] when it empties a domain.
//!
//! Infeasibility is an outcome, not an error; only bad input data makes
//! [`TimetableSolver::solve`] return `Err`.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use crate::csp::{
    ac3_with_stats, backtrack, count_solutions, mac_backtrack, CancellationToken, Problem,
    SearchGuard, SearchResult, SearchStats, SolutionCount, StopReason,
};
use crate::dataset::Dataset;
use crate::error::{Result, ScheduleError};
use crate::models::{generate_courses, Schedule};

/// Search strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Chronological backtracking in course order.
    Backtracking,
    /// Counts every solution with the backtracking traversal.
    CountingBacktracking,
    /// AC-3 only; reports the filtered domain sizes.
    Ac3Preprocess,
    /// AC-3 preprocessing, then MRV backtracking with maintained arc consistency.
    #[default]
    Ac3Backtracking,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Backtracking,
        Algorithm::CountingBacktracking,
        Algorithm::Ac3Preprocess,
        Algorithm::Ac3Backtracking,
    ];

    /// Short command-line name.
    pub fn cli_name(self) -> &'static str {
        match self {
            Algorithm::Backtracking => "bkt",
            Algorithm::CountingBacktracking => "counting-bkt",
            Algorithm::Ac3Preprocess => "arc-preproc",
            Algorithm::Ac3Backtracking => "arc-bkt",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cli_name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.cli_name() == s.trim())
            .ok_or_else(|| format!("Unknown algorithm '{s}'."))
    }
}

/// Order in which each course's candidates are tried.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueOrder {
    /// Classroom, then slot, then instructor set.
    #[default]
    Natural,
    /// A reproducible permutation per seed.
    Shuffled { seed: u64 },
}

/// Solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Search strategy.
    pub algorithm: Algorithm,
    /// Wall-clock limit for the search.
    pub time_limit: Option<Duration>,
    /// Stop counting after this many solutions.
    pub solution_limit: Option<u64>,
    /// Candidate order.
    pub value_order: ValueOrder,
}

impl SolverConfig {
    /// Sets the algorithm.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets the time limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Caps the counting variant.
    pub fn with_solution_limit(mut self, limit: u64) -> Self {
        self.solution_limit = Some(limit);
        self
    }

    /// Shuffles candidate order with `seed`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.value_order = ValueOrder::Shuffled { seed };
        self
    }
}

/// What a solve produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    /// A complete timetable.
    Scheduled(Schedule),
    /// Result of the counting variant.
    Counted(SolutionCount),
    /// AC-3 preprocessing succeeded; remaining domain size per course.
    Consistent { domain_sizes: Vec<usize> },
    /// No timetable exists.
    Infeasible,
    /// Cancelled or out of time before an answer was known.
    Interrupted(StopReason),
}

impl SolveOutcome {
    /// `Some(true)` / `Some(false)` when feasibility is known.
    pub fn is_feasible(&self) -> Option<bool> {
        match self {
            SolveOutcome::Scheduled(_) => Some(true),
            SolveOutcome::Infeasible => Some(false),
            SolveOutcome::Counted(c) if c.count > 0 => Some(true),
            SolveOutcome::Counted(c) if c.exhaustive => Some(false),
            _ => None,
        }
    }

    /// The timetable, if one was found.
    pub fn schedule(&self) -> Option<&Schedule> {
        match self {
            SolveOutcome::Scheduled(schedule) => Some(schedule),
            _ => None,
        }
    }
}

/// Outcome plus search statistics.
#[derive(Debug, Clone)]
pub struct SolveReport {
    pub outcome: SolveOutcome,
    pub stats: SearchStats,
}

/// Solves timetabling instances.
///
/// # Example
///
/// ```
/// use timetable_csp::dataset::Dataset;
/// use timetable_csp::models::{Classroom, Event, Position, StaffMember};
/// use timetable_csp::solver::{SolverConfig, TimetableSolver};
///
/// let dataset = Dataset::from_parts(
///     vec![Classroom::lecture("C1"), Classroom::laboratory("L1")],
///     vec![
///         StaffMember::new("p1", "Ada Lovelace", Position::Professor),
///         StaffMember::new("a1", "Grace Hopper", Position::Assistant),
///     ],
///     vec![Event::create("Logic", 1, Some(1), vec!["p1".into()], vec!["a1".into()]).unwrap()],
///     vec![],
/// )
/// .unwrap();
///
/// let report = TimetableSolver::new(SolverConfig::default()).solve(&dataset, 1).unwrap();
/// let schedule = report.outcome.schedule().unwrap();
/// assert_eq!(schedule.session_count(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimetableSolver {
    config: SolverConfig,
}

impl TimetableSolver {
    /// Creates a solver.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves `semester` (1 = odd semesters, 2 = even) of a dataset.
    pub fn solve(&self, dataset: &Dataset, semester: u8) -> Result<SolveReport> {
        self.solve_with_token(dataset, semester, &CancellationToken::new())
    }

    /// [`solve`](Self::solve) that stops early once `token` is cancelled.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidSemester`] unless `semester` is 1 or 2, and
    /// any error from resolving instructors or applying hard constraints.
    pub fn solve_with_token(
        &self,
        dataset: &Dataset,
        semester: u8,
        token: &CancellationToken,
    ) -> Result<SolveReport> {
        if !(1..=2).contains(&semester) {
            return Err(ScheduleError::InvalidSemester(semester));
        }

        let courses = generate_courses(&dataset.events, semester);
        info!("Semester {semester}: {} course(s) to schedule", courses.len());

        let mut problem = Problem::new(
            courses,
            dataset.classrooms.clone(),
            dataset.staff.clone(),
        )?;
        problem.apply_hard_constraints(&dataset.constraints)?;

        Ok(self.solve_problem(&problem, token))
    }

    /// Runs the configured algorithm on a prepared problem.
    pub fn solve_problem(&self, problem: &Problem, token: &CancellationToken) -> SolveReport {
        let start = Instant::now();
        let mut stats = SearchStats::default();
        let mut guard = SearchGuard::new(token.clone());
        if let Some(limit) = self.config.time_limit {
            guard = guard.with_time_limit(limit);
        }

        let mut domains = problem.build_domains();
        if let ValueOrder::Shuffled { seed } = self.config.value_order {
            debug!("Shuffling candidate order with seed {seed}");
            domains.shuffle(seed);
        }
        let unassigned = vec![None; problem.course_count()];

        info!(
            "Running {} over {} course(s)",
            self.config.algorithm,
            problem.course_count()
        );
        let outcome = match self.config.algorithm {
            Algorithm::Backtracking => match backtrack(problem, &domains, &guard, &mut stats) {
                SearchResult::Found(values) => {
                    SolveOutcome::Scheduled(problem.schedule(&domains, &values))
                }
                SearchResult::Exhausted => SolveOutcome::Infeasible,
                SearchResult::Interrupted(reason) => SolveOutcome::Interrupted(reason),
            },
            Algorithm::CountingBacktracking => SolveOutcome::Counted(count_solutions(
                problem,
                &domains,
                self.config.solution_limit,
                &guard,
                &mut stats,
            )),
            Algorithm::Ac3Preprocess => {
                if ac3_with_stats(problem, &mut domains, &unassigned, &mut stats) {
                    SolveOutcome::Consistent {
                        domain_sizes: domains.sizes(),
                    }
                } else {
                    SolveOutcome::Infeasible
                }
            }
            Algorithm::Ac3Backtracking => {
                if !ac3_with_stats(problem, &mut domains, &unassigned, &mut stats) {
                    info!("AC-3 preprocessing proved the instance infeasible");
                    SolveOutcome::Infeasible
                } else {
                    debug!(
                        "AC-3 preprocessing kept {} candidate(s)",
                        domains.total_len()
                    );
                    match mac_backtrack(problem, domains.clone(), &guard, &mut stats) {
                        SearchResult::Found(values) => {
                            SolveOutcome::Scheduled(problem.schedule(&domains, &values))
                        }
                        SearchResult::Exhausted => SolveOutcome::Infeasible,
                        SearchResult::Interrupted(reason) => SolveOutcome::Interrupted(reason),
                    }
                }
            }
        };

        stats.set_total_time(start.elapsed());
        match &outcome {
            SolveOutcome::Interrupted(reason) => warn!("Search stopped: {reason}"),
            SolveOutcome::Infeasible => info!("No schedule exists"),
            _ => info!("Solved in {:.3?}", stats.time_total),
        }
        debug!("{stats}");

        SolveReport { outcome, stats }
    }
}
