use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::error;

use timetable_csp::dataset::Dataset;
use timetable_csp::models::Schedule;
use timetable_csp::{Algorithm, SolveOutcome, SolverConfig, TimetableSolver};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    /// Plain chronological backtracking
    #[value(name = "bkt")]
    Backtracking,
    /// Count every solution
    #[value(name = "counting-bkt")]
    CountingBacktracking,
    /// AC-3 preprocessing only
    #[value(name = "arc-preproc")]
    Ac3Preprocess,
    /// AC-3 with MRV backtracking
    #[value(name = "arc-bkt")]
    Ac3Backtracking,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Backtracking => Algorithm::Backtracking,
            AlgorithmArg::CountingBacktracking => Algorithm::CountingBacktracking,
            AlgorithmArg::Ac3Preprocess => Algorithm::Ac3Preprocess,
            AlgorithmArg::Ac3Backtracking => Algorithm::Ac3Backtracking,
        }
    }
}

/// Builds a weekly university timetable.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Search algorithm
    #[arg(value_enum)]
    algorithm: AlgorithmArg,

    /// 1 for odd semesters, 2 for even semesters
    #[arg(value_parser = clap::value_parser!(u8).range(1..=2))]
    semester: u8,

    /// Dataset name (a directory under --data-dir)
    dataset: String,

    /// Directory holding the datasets
    #[arg(long, default_value = "inputs")]
    data_dir: PathBuf,

    /// Stop searching after this many seconds
    #[arg(long)]
    time_limit_secs: Option<u64>,

    /// Shuffle candidate order with this seed
    #[arg(long)]
    seed: Option<u64>,

    /// Stop counting after this many solutions
    #[arg(long)]
    solution_limit: Option<u64>,
}

impl Args {
    fn config(&self) -> SolverConfig {
        let mut config = SolverConfig::default().with_algorithm(self.algorithm.into());
        if let Some(secs) = self.time_limit_secs {
            config = config.with_time_limit(Duration::from_secs(secs));
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(limit) = self.solution_limit {
            config = config.with_solution_limit(limit);
        }
        config
    }
}

fn print_schedule(schedule: &Schedule) {
    for (group, sessions) in schedule.sessions_by_group() {
        println!("Group {group}");
        for s in sessions {
            println!(
                "  {:<4} {:<12} {:<30} {:<10} {:<8} {}",
                s.slot.to_string(),
                s.slot.range(),
                s.course.event_name,
                s.course.kind.to_string(),
                s.classroom_id,
                s.instructor_ids.join(", ")
            );
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let dataset = match Dataset::load(args.data_dir.join(&args.dataset)) {
        Ok(dataset) => dataset,
        Err(e) => {
            error!("{e}");
            match &e {
                timetable_csp::ScheduleError::Records(errors) => {
                    errors.iter().for_each(|err| error!("  {err}"))
                }
                timetable_csp::ScheduleError::Invalid(errors) => {
                    errors.iter().for_each(|err| error!("  {err}"))
                }
                _ => {}
            }
            return ExitCode::FAILURE;
        }
    };

    let solver = TimetableSolver::new(args.config());
    let report = match solver.solve(&dataset, args.semester) {
        Ok(report) => report,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match &report.outcome {
        SolveOutcome::Scheduled(schedule) => print_schedule(schedule),
        SolveOutcome::Counted(count) if count.exhaustive => {
            println!("{} solution(s)", count.count)
        }
        SolveOutcome::Counted(count) => println!("at least {} solution(s)", count.count),
        SolveOutcome::Consistent { domain_sizes } => {
            println!(
                "Arc consistent: {} candidate(s) over {} course(s)",
                domain_sizes.iter().sum::<usize>(),
                domain_sizes.len()
            )
        }
        SolveOutcome::Infeasible => println!("No schedule possible"),
        SolveOutcome::Interrupted(reason) => println!("Search stopped: {reason}"),
    }
    println!("{}", report.stats);

    ExitCode::SUCCESS
}
