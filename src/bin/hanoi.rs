use clap::Parser;
use hanoi_solver::engine::Peg;
use hanoi_solver::observer::{ConsoleObserver, Tee, TracingObserver};
use hanoi_solver::solver::solve_tower;
use hanoi_solver::error::Result;
use hanoi_solver::utils::{parse_disk_count_up_to, read_disk_count, PRACTICAL_MAX_DISKS};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Exit code for input rejected at the boundary (no moves performed).
const EXIT_INVALID_INPUT: u8 = 2;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Solve the three-peg tower puzzle and print every move", long_about = None)]
struct Args {
    /// Number of disks, at most 30 (2^30 - 1 moves); prompted for on stdin when omitted
    #[clap(short = 'n', long, allow_negative_numbers = true)]
    disks: Option<String>,

    /// Peg holding the disks at the start
    #[clap(short, long, default_value = "A")]
    source: Peg,

    /// Peg that must hold the disks at the end
    #[clap(short, long, default_value = "C")]
    target: Peg,

    /// Only print the initial and final states
    #[clap(short, long)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn prompt_disk_count() -> Result<u32> {
    print!("Enter the number of disks n: ");
    if let Err(err) = io::stdout().flush() {
        error!(error = %err, "failed to show the prompt");
    }
    read_disk_count(io::stdin().lock(), PRACTICAL_MAX_DISKS)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let disk_count = match args.disks.as_deref() {
        Some(raw) => parse_disk_count_up_to(raw, PRACTICAL_MAX_DISKS),
        None => prompt_disk_count(),
    };
    let disk_count = match disk_count {
        Ok(n) => n,
        Err(err) => {
            eprintln!("Invalid disk count: {}", err);
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
    };
    info!(disk_count, source = %args.source, target = %args.target, "solving");

    let console = ConsoleObserver::stdout().with_moves(!args.quiet);
    let mut observer = Tee(console, TracingObserver);
    match solve_tower(disk_count, args.source, args.target, &mut observer) {
        Ok(solution) => {
            let Tee(console, _) = observer;
            if let Err(err) = console.finish() {
                error!(error = %err, "failed to write the move report");
                return ExitCode::FAILURE;
            }
            info!(moves = solution.moves_made, "solved");
            ExitCode::SUCCESS
        }
        Err(err) if err.is_recoverable() => {
            eprintln!("Invalid configuration: {}", err);
            ExitCode::from(EXIT_INVALID_INPUT)
        }
        Err(err) => {
            eprintln!("Internal error, run aborted: {}", err);
            ExitCode::FAILURE
        }
    }
}
