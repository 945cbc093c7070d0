//! # Guess the Flag - Terminal Front End
//!
//! Drives a [`QuizController`] from the terminal. Each round prints the
//! country to find and three numbered flags; the player types 1, 2 or 3.
//! The verdict and score are shown as an "alert" that is dismissed with
//! Enter, which deals the next round.
//!
//! ## Usage
//! ```text
//! play --seed 42 --countries "Estonia,France,Germany,Ireland"
//! play --countries-file flags.txt --rounds 10
//! ```
//! Type `q` at any prompt to stop. Set `RUST_LOG=debug` (or pass
//! `--verbose`) to trace every transition.

use clap::Parser;
use colored::Colorize;
use flagquiz::controller::parse_pick;
use flagquiz::{QuizConfig, QuizController, QuizError, Round};
use log::{error, info};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about = "Guess the flag of the named country", long_about = None)]
struct Args {
    /// Comma-separated countries to play with (default: the 11 built-in countries)
    #[arg(short, long)]
    countries: Option<String>,

    /// File with one country per line; takes precedence over --countries
    #[arg(short = 'f', long)]
    countries_file: Option<PathBuf>,

    /// Seed for a reproducible game
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many answered rounds (at least 1)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    rounds: Option<u32>,

    /// Log every state transition
    #[arg(short, long, action = clap::ArgAction::SetTrue)]
    verbose: bool,
}

/// What the player typed at a prompt.
enum Input {
    Line(String),
    Quit,
}

fn read_input(lines: &mut impl Iterator<Item = io::Result<String>>) -> io::Result<Input> {
    print!("> ");
    io::stdout().flush()?;
    match lines.next() {
        None => Ok(Input::Quit),
        Some(line) => {
            let line = line?;
            if line.trim().eq_ignore_ascii_case("q") {
                Ok(Input::Quit)
            } else {
                Ok(Input::Line(line))
            }
        }
    }
}

fn show_round(round: &Round, number: u64) {
    println!();
    println!("{} {}", "Round".dimmed(), number.to_string().dimmed());
    println!("Tap the flag of");
    println!("  {}", round.prompt().bold());
    for (i, country) in round.countries.iter().enumerate() {
        println!("  [{}] flag of {}", i + 1, country);
    }
}

fn run(args: Args) -> flagquiz::Result<()> {
    let countries =
        QuizConfig::resolve_countries(args.countries.as_deref(), args.countries_file.as_deref())?;
    let config = QuizConfig {
        countries,
        seed: args.seed,
        max_rounds: args.rounds,
    };

    let (session, seed) = config.start_session();
    println!("{}", "Guess the Flag".bold().cyan());
    println!("{}", format!("seed {}, type q to quit", seed).dimmed());

    let mut controller = QuizController::new(session);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    'game: loop {
        if config.round_limit_reached(controller.history().len()) {
            info!("reached {} rounds", controller.history().len());
            break;
        }
        show_round(controller.round(), controller.session().rounds_started());

        let feedback = loop {
            let line = match read_input(&mut lines)? {
                Input::Quit => break 'game,
                Input::Line(line) => line,
            };
            match parse_pick(&line) {
                Some(choice) => break controller.answer(choice)?,
                None => println!("{}", "Pick 1, 2 or 3.".yellow()),
            }
        };

        let title = if feedback.is_correct() {
            feedback.verdict.title().green().bold()
        } else {
            feedback.verdict.title().red().bold()
        };
        println!();
        println!("{}", title);
        if !feedback.is_correct() {
            println!("{}", feedback.message());
        }
        println!("{}", feedback.score_line());

        if config.round_limit_reached(controller.history().len()) {
            info!("reached {} rounds", controller.history().len());
            break;
        }

        println!("{}", "Press Enter to continue".dimmed());
        if let Input::Quit = read_input(&mut lines)? {
            break;
        }
        controller.acknowledge()?;
    }

    println!();
    println!("{}", controller.format_history());
    let stats = controller.stats();
    if stats.answered > 0 {
        println!("Accuracy: {:.0}%", stats.accuracy() * 100.0);
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e @ QuizError::InvalidConfiguration(_)) => {
            error!("{}", e);
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::from(2)
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
