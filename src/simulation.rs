//! # Session Simulation
//!
//! Plays many independent seeded sessions with a random-guessing player and
//! checks, after every transition, the rules a session must never break:
//!
//! - the correct index is one of the three flags on screen
//! - the three flags are distinct members of the pool
//! - a correct pick adds exactly one point
//! - a wrong pick takes one point off, never going below zero
//! - replaying a seed deals the same rounds
//!
//! Sessions run in parallel on a dedicated rayon pool. Each session builds
//! its own report; reports are merged into a shared total behind a mutex.

use crate::config::rng_from_seed;
use crate::countries::{CountryPool, FLAGS_PER_ROUND};
use crate::quiz::{penalize, QuizSession, Round};
use log::{debug, warn};
use parking_lot::Mutex;
use rand::Rng;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

/// Mixed into the session seed to get an independent stream for the player.
const PLAYER_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Replay every n-th session to check that seeding is deterministic.
const REPLAY_EVERY: u64 = 100;

/// Parameters for a simulation run.
#[derive(Debug, Clone)]
pub struct SimulationParams {
    pub pool: CountryPool,
    /// Number of independent sessions
    pub sessions: u64,
    /// Answered rounds per session
    pub rounds: u32,
    /// Session `i` is seeded with `base_seed + i`
    pub base_seed: u64,
    /// Worker threads; 0 uses the number of CPUs
    pub threads: usize,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            pool: CountryPool::default(),
            sessions: 1_000,
            rounds: 50,
            base_seed: 0,
            threads: 0,
        }
    }
}

/// Totals over one or more simulated sessions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationReport {
    pub sessions: u64,
    pub rounds: u64,
    pub correct: u64,
    pub wrong: u64,
    /// How often each position held the correct flag
    pub correct_index_counts: [u64; FLAGS_PER_ROUND],
    pub final_score_sum: u64,
    pub max_final_score: u32,
    /// Human-readable descriptions of every broken rule
    pub violations: Vec<String>,
}

impl SimulationReport {
    /// Folds another report into this one.
    pub fn merge(&mut self, other: SimulationReport) {
        self.sessions += other.sessions;
        self.rounds += other.rounds;
        self.correct += other.correct;
        self.wrong += other.wrong;
        for (total, n) in self
            .correct_index_counts
            .iter_mut()
            .zip(other.correct_index_counts)
        {
            *total += n;
        }
        self.final_score_sum += other.final_score_sum;
        self.max_final_score = self.max_final_score.max(other.max_final_score);
        self.violations.extend(other.violations);
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn mean_final_score(&self) -> f64 {
        if self.sessions == 0 {
            0.0
        } else {
            self.final_score_sum as f64 / self.sessions as f64
        }
    }

    /// Share of rounds in which each position was correct.
    pub fn correct_index_shares(&self) -> [f64; FLAGS_PER_ROUND] {
        let mut shares = [0.0; FLAGS_PER_ROUND];
        if self.rounds > 0 {
            for (share, n) in shares.iter_mut().zip(self.correct_index_counts) {
                *share = n as f64 / self.rounds as f64;
            }
        }
        shares
    }
}

fn check_round(round: &Round, pool: &CountryPool, seed: u64, number: u32, report: &mut SimulationReport) {
    if round.correct_index >= FLAGS_PER_ROUND {
        report.violations.push(format!(
            "seed {} round {}: correct index {} out of range",
            seed, number, round.correct_index
        ));
    }
    let [a, b, c] = &round.countries;
    if a == b || b == c || a == c {
        report.violations.push(format!(
            "seed {} round {}: repeated flag in {:?}",
            seed, number, round.countries
        ));
    }
    for name in &round.countries {
        if !pool.contains(name) {
            report.violations.push(format!(
                "seed {} round {}: '{}' is not in the pool",
                seed, number, name
            ));
        }
    }
}

/// Plays one session of `rounds` answers and returns its report and the rounds dealt.
pub fn simulate_session(
    pool: &CountryPool,
    seed: u64,
    rounds: u32,
) -> (SimulationReport, Vec<Round>) {
    let mut report = SimulationReport {
        sessions: 1,
        ..Default::default()
    };
    let mut dealt = Vec::with_capacity(rounds as usize);
    let mut session = QuizSession::with_pool(pool.clone(), rng_from_seed(seed));
    let mut player = rng_from_seed(seed ^ PLAYER_SEED_SALT);

    for number in 1..=rounds {
        let round = session.round().clone();
        check_round(&round, pool, seed, number, &mut report);
        report.correct_index_counts[round.correct_index % FLAGS_PER_ROUND] += 1;

        let before = session.score();
        let choice = player.random_range(0..FLAGS_PER_ROUND);
        let feedback = match session.submit_answer(choice) {
            Ok(feedback) => feedback,
            Err(e) => {
                report
                    .violations
                    .push(format!("seed {} round {}: answer rejected: {}", seed, number, e));
                break;
            }
        };
        report.rounds += 1;

        if feedback.is_correct() {
            report.correct += 1;
            if feedback.score != before + 1 {
                report.violations.push(format!(
                    "seed {} round {}: correct answer moved score {} -> {}",
                    seed, number, before, feedback.score
                ));
            }
        } else {
            report.wrong += 1;
            if feedback.score > before || feedback.score != penalize(before) {
                report.violations.push(format!(
                    "seed {} round {}: wrong answer moved score {} -> {}",
                    seed, number, before, feedback.score
                ));
            }
        }
        dealt.push(round);

        if let Err(e) = session.next_round() {
            report
                .violations
                .push(format!("seed {} round {}: cannot continue: {}", seed, number, e));
            break;
        }
    }

    report.final_score_sum = session.score() as u64;
    report.max_final_score = session.score();
    (report, dealt)
}

/// Runs every session of `params` in parallel and merges the results.
pub fn run_simulation(params: &SimulationParams) -> Result<SimulationReport, rayon::ThreadPoolBuildError> {
    let threads = if params.threads > 0 {
        params.threads
    } else {
        num_cpus::get()
    };
    let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;
    debug!(
        "simulating {} sessions x {} rounds on {} threads",
        params.sessions, params.rounds, threads
    );

    let total = Mutex::new(SimulationReport::default());
    pool.install(|| {
        (0..params.sessions).into_par_iter().for_each(|i| {
            let seed = params.base_seed.wrapping_add(i);
            let (mut report, dealt) =
                simulate_session(&params.pool, seed, params.rounds);

            if i % REPLAY_EVERY == 0 {
                let (_, replayed) = simulate_session(&params.pool, seed, params.rounds);
                if replayed != dealt {
                    warn!("seed {} dealt different rounds on replay", seed);
                    report
                        .violations
                        .push(format!("seed {}: replay dealt different rounds", seed));
                }
            }

            total.lock().merge(report);
        });
    });

    Ok(total.into_inner())
}
