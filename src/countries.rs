//! # Country Pool
//!
//! The list of countries a quiz draws its flags from. A pool always holds
//! at least [`FLAGS_PER_ROUND`] distinct, non-blank names, so every round can
//! show three different flags.
//!
//! Pools can be built from an explicit list, parsed from a comma-separated
//! string, or loaded from a text file with one country per line.

use crate::error::{QuizError, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Number of flags shown in every round.
pub const FLAGS_PER_ROUND: usize = 3;

/// The built-in countries, in their display order before the first shuffle.
pub const DEFAULT_COUNTRIES: [&str; 11] = [
    "Estonia", "France", "Germany", "Ireland", "Italy", "Nigeria", "Poland", "Russia", "Spain",
    "UK", "US",
];

/// An ordered, validated list of country names.
///
/// The order only matters for which names end up on screen: the first
/// [`FLAGS_PER_ROUND`] entries after a shuffle form the current round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryPool {
    names: Vec<String>,
}

impl CountryPool {
    /// Builds a pool from any list of names.
    ///
    /// Names are trimmed. Fails with [`QuizError::InvalidConfiguration`] if
    /// fewer than three names are given, or if any name is blank or repeated.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_string())
            .collect();

        if names.len() < FLAGS_PER_ROUND {
            return Err(QuizError::InvalidConfiguration(format!(
                "need at least {} countries, got {}",
                FLAGS_PER_ROUND,
                names.len()
            )));
        }

        let mut seen = HashSet::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(QuizError::InvalidConfiguration(format!(
                    "country #{} has an empty name",
                    i + 1
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(QuizError::InvalidConfiguration(format!(
                    "country '{}' is listed more than once",
                    name
                )));
            }
        }

        Ok(Self { names })
    }

    /// Reads a pool from a text file: one country per line, blank lines and
    /// lines starting with `#` are skipped.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Replaces the current order with a uniformly random permutation.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.names.shuffle(rng);
    }

    /// The names currently on screen.
    pub fn front(&self) -> &[String] {
        &self.names[..FLAGS_PER_ROUND]
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false: a valid pool holds at least three names.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl Default for CountryPool {
    fn default() -> Self {
        Self {
            names: DEFAULT_COUNTRIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl fmt::Display for CountryPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names.join(", "))
    }
}

impl FromStr for CountryPool {
    type Err = QuizError;

    /// Parses a comma-separated list such as `"Estonia, France, Germany"`.
    /// Empty entries between commas are ignored.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::new(s.split(',').map(str::trim).filter(|n| !n.is_empty()))
    }
}
