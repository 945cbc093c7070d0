//! # Guess the Flag
//!
//! A flag quiz: the player is shown a country name and three flags, picks the
//! flag that matches, and gets told whether they were right along with their
//! running score.
//!
//! The crate is split so the game logic never depends on how it is shown:
//! - [`quiz`]: the session state machine (`AwaitingAnswer` / `ShowingFeedback`)
//! - [`countries`]: the validated pool of country names
//! - [`controller`]: history, statistics and change notifications around a session
//! - [`config`]: runtime configuration and seeded random sources
//! - [`simulation`]: parallel seeded play-throughs that check the session rules
//!
//! ## Example
//! ```
//! use flagquiz::{config::rng_from_seed, QuizSession};
//!
//! let mut session = QuizSession::start(["Estonia", "France", "Germany"], rng_from_seed(7)).unwrap();
//! let correct = session.round().correct_index;
//! let feedback = session.submit_answer(correct).unwrap();
//! assert_eq!(feedback.message(), "Correct");
//! assert_eq!(session.score(), 1);
//! session.next_round().unwrap();
//! ```

pub mod config;
pub mod controller;
pub mod countries;
pub mod error;
pub mod quiz;
pub mod simulation;

pub use config::QuizConfig;
pub use controller::{QuizController, SessionEvent, SessionStats};
pub use countries::{CountryPool, DEFAULT_COUNTRIES, FLAGS_PER_ROUND};
pub use error::{QuizError, Result};
pub use quiz::{Feedback, Phase, QuizSession, Round, Verdict};
