use clap::Parser;
use hanoi_solver::engine::{Move, Peg, RodsState};
use hanoi_solver::observer::MoveObserver;
use hanoi_solver::solver::{minimal_move_count, solve_tower};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_RUNS: usize = 20;
const DEFAULT_SEED: u64 = 0;
const DEFAULT_MAX_DISKS: u32 = 12;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Solve random tower configurations and audit every move", long_about = None)]
struct Args {
    /// Number of random configurations to solve
    #[clap(short, long, default_value_t = DEFAULT_RUNS)]
    runs: usize,

    /// Seed for drawing configurations
    #[clap(short, long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Largest disk count to draw (inclusive)
    #[clap(short, long, default_value_t = DEFAULT_MAX_DISKS)]
    max_disks: u32,
}

/// Checks each reported snapshot and collects everything that looks wrong.
#[derive(Default)]
struct AuditObserver {
    previous: Option<RodsState>,
    moves_seen: u64,
    problems: Vec<String>,
}

impl MoveObserver for AuditObserver {
    fn on_initial_state(&mut self, state: &RodsState) {
        if let Err(err) = state.check_invariants() {
            self.problems.push(format!("initial state: {}", err));
        }
        self.previous = Some(state.clone());
    }

    fn on_move(&mut self, record: &Move) {
        self.moves_seen += 1;
        if record.index != self.moves_seen {
            self.problems.push(format!(
                "move numbered {} but {} moves seen",
                record.index, self.moves_seen
            ));
        }
        if let Err(err) = record.state.check_invariants() {
            self.problems.push(format!("after move {}: {}", record.index, err));
        }
        if let Some(previous) = &self.previous {
            if previous.top(record.from).ok() != Some(record.disk) {
                self.problems.push(format!(
                    "move {} claims disk {} left {}, which held {:?}",
                    record.index,
                    record.disk,
                    record.from,
                    previous.stack(record.from)
                ));
            }
        }
        self.previous = Some(record.state.clone());
    }

    fn on_final_state(&mut self, state: &RodsState) {
        if self.previous.as_ref() != Some(state) {
            self.problems
                .push("final state differs from the last reported move".to_string());
        }
    }
}

fn random_distinct_pegs(rng: &mut SmallRng) -> (Peg, Peg) {
    let source = Peg::ALL[rng.gen_range(0..3)];
    let others: Vec<Peg> = Peg::ALL.into_iter().filter(|&p| p != source).collect();
    (source, others[rng.gen_range(0..others.len())])
}

fn main() -> ExitCode {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let max_disks = args.max_disks.clamp(1, 20);
    if max_disks != args.max_disks {
        warn!(requested = args.max_disks, using = max_disks, "max disks clamped");
    }

    let mut rng = SmallRng::seed_from_u64(args.seed);
    let mut failed_runs = 0usize;
    let mut total_moves = 0u64;

    println!("Starting audit of {} random configurations (seed {})...", args.runs, args.seed);

    for run in 0..args.runs {
        let disk_count = rng.gen_range(1..=max_disks);
        let (source, target) = random_distinct_pegs(&mut rng);
        debug!(run, disk_count, %source, %target, "auditing");

        let mut audit = AuditObserver::default();
        let mut problems = match solve_tower(disk_count, source, target, &mut audit) {
            Ok(solution) => {
                let mut problems = std::mem::take(&mut audit.problems);
                if solution.moves_made != minimal_move_count(disk_count) {
                    problems.push(format!(
                        "{} moves made, expected {}",
                        solution.moves_made,
                        minimal_move_count(disk_count)
                    ));
                }
                if !solution.final_state.is_solved_on(target) {
                    problems.push(format!("not solved on {}: {}", target, solution.final_state));
                }
                total_moves += solution.moves_made;
                problems
            }
            Err(err) => vec![format!("solver error: {}", err)],
        };

        let status = if problems.is_empty() { "ok" } else { "FAILED" };
        println!(
            "  Run {:<4} disks: {:<3} {} -> {}  moves: {:<8} {}",
            run, disk_count, source, target, audit.moves_seen, status
        );
        if !problems.is_empty() {
            failed_runs += 1;
            for problem in problems.drain(..) {
                eprintln!("    {}", problem);
            }
        }
    }

    println!("\n--- Audit Complete ---");
    println!("Runs: {}, failed: {}, total moves checked: {}", args.runs, failed_runs, total_moves);

    if failed_runs == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
