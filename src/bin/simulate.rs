use clap::Parser;
use colored::Colorize;
use flagquiz::simulation::{run_simulation, SimulationParams, SimulationReport};
use flagquiz::QuizConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

/// Violations printed before the rest are summarized
const MAX_LISTED_VIOLATIONS: usize = 20;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play many seeded quiz sessions and check their invariants", long_about = None)]
struct Args {
    /// Number of independent sessions (default: 10,000)
    #[arg(long, default_value_t = 10_000)]
    sessions: u64,

    /// Answered rounds per session (default: 100)
    #[arg(long, default_value_t = 100)]
    rounds: u32,

    /// Seed of the first session; session i uses seed + i
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Worker threads (default: number of CPUs)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Comma-separated countries (default: the 11 built-in countries)
    #[arg(long)]
    countries: Option<String>,

    /// File with one country per line
    #[arg(long)]
    countries_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();
    let args = Args::parse();

    let pool = match QuizConfig::resolve_countries(args.countries.as_deref(), args.countries_file.as_deref()) {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            return ExitCode::from(2);
        }
    };

    println!("Guess the Flag - Session Simulator");
    println!("==================================");
    println!("Countries: {} ({})", pool.len(), pool);
    println!("Sessions: {}", args.sessions);
    println!("Rounds per session: {}", args.rounds);
    println!("First seed: {}", args.seed);
    println!("----------------------------------");

    let params = SimulationParams {
        pool,
        sessions: args.sessions,
        rounds: args.rounds,
        base_seed: args.seed,
        threads: args.threads,
    };

    let start = Instant::now();
    let report = match run_simulation(&params) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{} cannot build thread pool: {}", "error:".red().bold(), e);
            return ExitCode::FAILURE;
        }
    };
    print_report(&report, start.elapsed());

    if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_report(report: &SimulationReport, duration: Duration) {
    let secs = duration.as_secs_f64();

    println!("Results:");
    println!("  Rounds: {}", report.rounds);
    println!("  Time: {:.3}s", secs);
    println!("  RPS: {:.0} rounds/sec", report.rounds as f64 / secs.max(f64::EPSILON));
    println!("  Correct: {}  Wrong: {}", report.correct, report.wrong);
    println!(
        "  Final score: mean {:.2}, max {}",
        report.mean_final_score(),
        report.max_final_score
    );
    let shares = report.correct_index_shares();
    println!(
        "  Correct flag position: [1] {:.1}%  [2] {:.1}%  [3] {:.1}%",
        shares[0] * 100.0,
        shares[1] * 100.0,
        shares[2] * 100.0
    );

    if report.is_clean() {
        println!("{}", "All invariants held.".green().bold());
        return;
    }

    println!(
        "{}",
        format!("{} invariant violations:", report.violations.len()).red().bold()
    );
    for violation in report.violations.iter().take(MAX_LISTED_VIOLATIONS) {
        println!("  {}", violation);
    }
    if report.violations.len() > MAX_LISTED_VIOLATIONS {
        println!("  ... and {} more", report.violations.len() - MAX_LISTED_VIOLATIONS);
    }
}
