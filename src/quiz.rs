//! # Quiz Session State Machine
//!
//! The whole game reduces to two states and two transitions:
//!
//! ```text
//!   start ──► AwaitingAnswer ──submit_answer──► ShowingFeedback
//!                   ▲                                 │
//!                   └────────────next_round───────────┘
//! ```
//!
//! [`QuizSession`] owns the country pool, the current round, the score and
//! the random source. Nothing here renders, blocks or performs I/O; the
//! host drives the session with discrete calls and reads the results.
//!
//! ## Randomness
//! The generator is injected, so a session built from a seeded
//! [`Xoshiro256PlusPlus`] replays the same rounds every time. Every shuffle
//! is immediately followed by a fresh pick of the correct index.

use crate::countries::{CountryPool, FLAGS_PER_ROUND};
use crate::error::{QuizError, Result};
use log::debug;
use rand::Rng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::fmt;

/// Which half of a round the session is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Three flags are on screen, waiting for a pick.
    AwaitingAnswer,
    /// An answer was scored; the feedback is waiting to be acknowledged.
    ShowingFeedback,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::AwaitingAnswer => write!(f, "awaiting an answer"),
            Phase::ShowingFeedback => write!(f, "showing feedback"),
        }
    }
}

/// The three flags currently on screen and which of them is right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    /// Candidate countries, in display order.
    pub countries: [String; FLAGS_PER_ROUND],
    /// Index into `countries` of the country named in the prompt.
    pub correct_index: usize,
}

impl Round {
    /// The country the player is asked to find.
    pub fn prompt(&self) -> &str {
        &self.countries[self.correct_index]
    }
}

/// Outcome of a single answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Wrong,
}

impl Verdict {
    /// Alert title shown to the player.
    pub fn title(self) -> &'static str {
        match self {
            Verdict::Correct => "Correct",
            Verdict::Wrong => "Wrong",
        }
    }
}

/// What the player sees after answering, until they continue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub verdict: Verdict,
    /// The country whose flag was picked.
    pub chosen: String,
    /// The country that was asked for.
    pub expected: String,
    /// Score after the answer was applied.
    pub score: u32,
}

impl Feedback {
    pub fn is_correct(&self) -> bool {
        self.verdict == Verdict::Correct
    }

    /// `"Correct"` or `"Wrong! That's the flag of <chosen>"`.
    pub fn message(&self) -> String {
        match self.verdict {
            Verdict::Correct => "Correct".to_string(),
            Verdict::Wrong => format!("Wrong! That's the flag of {}", self.chosen),
        }
    }

    /// Second line of the alert.
    pub fn score_line(&self) -> String {
        format!("Your score is {}", self.score)
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.message(), self.score_line())
    }
}

/// One play-through: pool, current round, score and random source.
#[derive(Debug, Clone)]
pub struct QuizSession<R: Rng = Xoshiro256PlusPlus> {
    pool: CountryPool,
    round: Round,
    score: u32,
    feedback: Option<Feedback>,
    rounds_started: u64,
    rng: R,
}

impl<R: Rng> QuizSession<R> {
    /// Starts a session over `countries`.
    ///
    /// Fails with [`QuizError::InvalidConfiguration`] if the names cannot form
    /// a [`CountryPool`].
    pub fn start<I, S>(countries: I, rng: R) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::with_pool(CountryPool::new(countries)?, rng))
    }

    /// Starts a session from an already validated pool.
    ///
    /// The pool is shuffled, a correct index is drawn, and the score is zero.
    pub fn with_pool(mut pool: CountryPool, mut rng: R) -> Self {
        let round = deal(&mut pool, &mut rng);
        debug!("session started: prompt '{}' at index {}", round.prompt(), round.correct_index);
        Self {
            pool,
            round,
            score: 0,
            feedback: None,
            rounds_started: 1,
            rng,
        }
    }

    /// Scores a pick of `choice` (0, 1 or 2) against the current round.
    ///
    /// The round is not advanced; call [`next_round`](Self::next_round) once
    /// the feedback has been acknowledged. On error the session is unchanged.
    pub fn submit_answer(&mut self, choice: usize) -> Result<Feedback> {
        if self.feedback.is_some() {
            return Err(QuizError::OutOfOrder {
                phase: Phase::ShowingFeedback,
            });
        }
        if choice >= FLAGS_PER_ROUND {
            return Err(QuizError::InvalidChoice { choice });
        }

        let verdict = if choice == self.round.correct_index {
            self.score = self.score.saturating_add(1);
            Verdict::Correct
        } else {
            self.score = penalize(self.score);
            Verdict::Wrong
        };

        let feedback = Feedback {
            verdict,
            chosen: self.round.countries[choice].clone(),
            expected: self.round.prompt().to_string(),
            score: self.score,
        };
        debug!("answer {} scored {:?}, score now {}", choice, verdict, self.score);

        self.feedback = Some(feedback.clone());
        Ok(feedback)
    }

    /// Acknowledges the pending feedback and deals a fresh round.
    ///
    /// Fails with [`QuizError::OutOfOrder`] if no answer has been given yet.
    pub fn next_round(&mut self) -> Result<&Round> {
        if self.feedback.is_none() {
            return Err(QuizError::OutOfOrder {
                phase: Phase::AwaitingAnswer,
            });
        }

        self.feedback = None;
        self.round = deal(&mut self.pool, &mut self.rng);
        self.rounds_started += 1;
        debug!(
            "round {} dealt: prompt '{}' at index {}",
            self.rounds_started,
            self.round.prompt(),
            self.round.correct_index
        );
        Ok(&self.round)
    }

    pub fn phase(&self) -> Phase {
        if self.feedback.is_some() {
            Phase::ShowingFeedback
        } else {
            Phase::AwaitingAnswer
        }
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Feedback for the current round, if it has been answered.
    pub fn pending_feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn pool(&self) -> &CountryPool {
        &self.pool
    }

    /// Number of rounds dealt so far, counting the current one.
    pub fn rounds_started(&self) -> u64 {
        self.rounds_started
    }

    /// Starts over with a new pool, keeping the random source.
    pub fn restart(&mut self, mut pool: CountryPool) {
        self.round = deal(&mut pool, &mut self.rng);
        self.pool = pool;
        self.score = 0;
        self.feedback = None;
        self.rounds_started = 1;
        debug!("session restarted: prompt '{}' at index {}", self.round.prompt(), self.round.correct_index);
    }
}

/// Score after a wrong answer: one point off, never below zero.
///
/// A score of one drops to zero, same as any other single-point loss.
pub fn penalize(score: u32) -> u32 {
    score.saturating_sub(1)
}

/// Shuffles the pool and picks which of the front three is asked for.
fn deal<R: Rng>(pool: &mut CountryPool, rng: &mut R) -> Round {
    pool.shuffle(rng);
    let front = pool.front();
    Round {
        countries: [front[0].clone(), front[1].clone(), front[2].clone()],
        correct_index: rng.random_range(0..FLAGS_PER_ROUND),
    }
}
