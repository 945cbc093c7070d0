//! # Quiz Controller - Central Session Management
//!
//! `QuizController` owns the authoritative [`QuizSession`] for a running game.
//! The presentation layer never touches the session directly: it asks the
//! controller to score a pick or to continue, reads the results, and
//! subscribes to change notifications.
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                QuizController                 │
//! │   QuizSession ── answer history ── stats      │
//! │        │                                      │
//! │        └─► SessionEvent ──► subscribers       │
//! └───────────────────────────────────────────────┘
//! ```

use crate::countries::{CountryPool, FLAGS_PER_ROUND};
use crate::error::Result;
use crate::quiz::{Feedback, Phase, QuizSession, Round};
use log::{debug, info, warn};
use rand::Rng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::{Duration, SystemTime};

/// Change notifications published to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A pick was scored; the feedback is now on screen.
    Answered(Feedback),
    /// The feedback was acknowledged and a new round dealt.
    RoundStarted { round: Round, number: u64 },
    /// The session was restarted with a new pool; score is back to zero.
    Reset { round: Round },
}

/// A single answered round.
#[derive(Debug, Clone)]
pub struct AnswerRecord {
    /// When the answer was given
    pub timestamp: SystemTime,
    /// Round number (1-indexed)
    pub round_number: u64,
    /// The country that was asked for
    pub prompt: String,
    /// The country whose flag was picked
    pub chosen: String,
    pub correct: bool,
    /// Score after the answer
    pub score: u32,
}

/// Aggregate numbers over the answer history.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SessionStats {
    pub answered: usize,
    pub correct: usize,
    pub wrong: usize,
    pub best_streak: usize,
    pub score: u32,
}

impl SessionStats {
    /// Fraction of correct answers, 0.0 when nothing was answered.
    pub fn accuracy(&self) -> f64 {
        if self.answered == 0 {
            0.0
        } else {
            self.correct as f64 / self.answered as f64
        }
    }
}

/// The single owner of a running quiz.
///
/// A session never ends on its own, so the answer history grows by one
/// record per answered round until [`reset`](Self::reset) clears it. Front
/// ends that play without a round limit should reset periodically.
///
/// # Usage
/// ```rust,ignore
/// let mut controller = QuizController::new(config.start_session().0);
/// let events = controller.subscribe();
///
/// let feedback = controller.answer(1)?;
/// println!("{}", feedback);
/// controller.acknowledge()?;
/// ```
pub struct QuizController<R: Rng = Xoshiro256PlusPlus> {
    session: QuizSession<R>,
    history: Vec<AnswerRecord>,
    subscribers: Vec<Sender<SessionEvent>>,
}

impl<R: Rng> QuizController<R> {
    pub fn new(session: QuizSession<R>) -> Self {
        Self {
            session,
            history: Vec::new(),
            subscribers: Vec::new(),
        }
    }

    /// Returns a receiver for every subsequent [`SessionEvent`].
    pub fn subscribe(&mut self) -> Receiver<SessionEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    /// Scores a pick of `choice` (0-based) and records it.
    pub fn answer(&mut self, choice: usize) -> Result<Feedback> {
        let prompt = self.session.round().prompt().to_string();
        let feedback = match self.session.submit_answer(choice) {
            Ok(feedback) => feedback,
            Err(e) => {
                warn!("rejected answer {}: {}", choice, e);
                return Err(e);
            }
        };

        self.history.push(AnswerRecord {
            timestamp: SystemTime::now(),
            round_number: self.session.rounds_started(),
            prompt,
            chosen: feedback.chosen.clone(),
            correct: feedback.is_correct(),
            score: feedback.score,
        });
        self.publish(SessionEvent::Answered(feedback.clone()));
        Ok(feedback)
    }

    /// Acknowledges the feedback on screen and deals the next round.
    pub fn acknowledge(&mut self) -> Result<&Round> {
        if let Err(e) = self.session.next_round() {
            warn!("cannot continue: {}", e);
            return Err(e);
        }
        let event = SessionEvent::RoundStarted {
            round: self.session.round().clone(),
            number: self.session.rounds_started(),
        };
        self.publish(event);
        Ok(self.session.round())
    }

    /// Starts over with a new pool, keeping the random source.
    pub fn reset(&mut self, pool: CountryPool) {
        self.session.restart(pool);
        self.history.clear();
        info!("session reset with {} countries", self.session.pool().len());
        self.publish(SessionEvent::Reset {
            round: self.session.round().clone(),
        });
    }

    pub fn session(&self) -> &QuizSession<R> {
        &self.session
    }

    pub fn round(&self) -> &Round {
        self.session.round()
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn score(&self) -> u32 {
        self.session.score()
    }

    pub fn history(&self) -> &[AnswerRecord] {
        &self.history
    }

    /// Time between the first and the last recorded answer.
    pub fn play_time(&self) -> Duration {
        match (self.history.first(), self.history.last()) {
            (Some(first), Some(last)) => last
                .timestamp
                .duration_since(first.timestamp)
                .unwrap_or_default(),
            _ => Duration::ZERO,
        }
    }

    pub fn stats(&self) -> SessionStats {
        let mut stats = SessionStats {
            score: self.session.score(),
            ..Default::default()
        };
        let mut streak = 0;
        for record in &self.history {
            stats.answered += 1;
            if record.correct {
                stats.correct += 1;
                streak += 1;
                stats.best_streak = stats.best_streak.max(streak);
            } else {
                stats.wrong += 1;
                streak = 0;
            }
        }
        stats
    }

    /// Plain-text transcript of the game so far.
    pub fn format_history(&self) -> String {
        if self.history.is_empty() {
            return String::from("No answers yet.");
        }

        let mut output = String::from("=== Guess the Flag ===\n\n");
        for record in &self.history {
            let mark = if record.correct { "correct" } else { "wrong" };
            output.push_str(&format!(
                "{}. {} - picked {} ({}), score {}\n",
                record.round_number, record.prompt, record.chosen, mark, record.score
            ));
        }

        let stats = self.stats();
        output.push_str(&format!(
            "\nScore: {} ({}/{} correct, best streak {})\n",
            stats.score, stats.correct, stats.answered, stats.best_streak
        ));
        output.push_str(&format!("Played for {}s\n", self.play_time().as_secs()));
        output
    }

    fn publish(&mut self, event: SessionEvent) {
        debug!("publishing {:?}", event);
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

impl<R: Rng> From<QuizSession<R>> for QuizController<R> {
    fn from(session: QuizSession<R>) -> Self {
        Self::new(session)
    }
}

/// Converts a 1-based pick typed by a player into a flag index.
pub fn parse_pick(input: &str) -> Option<usize> {
    match input.trim().parse::<usize>() {
        Ok(n @ 1..=FLAGS_PER_ROUND) => Some(n - 1),
        _ => None,
    }
}
