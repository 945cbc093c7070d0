//! Runtime configuration shared by the binaries.

use crate::countries::CountryPool;
use crate::error::Result;
use crate::quiz::QuizSession;
use log::info;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::path::Path;

/// Everything needed to start a game.
#[derive(Debug, Clone, Default)]
pub struct QuizConfig {
    pub countries: CountryPool,
    /// Fixed seed for reproducible games; `None` draws one from system entropy.
    pub seed: Option<u64>,
    /// Stop after this many answered rounds; `None` plays until the player quits.
    pub max_rounds: Option<u32>,
}

impl QuizConfig {
    /// Resolves the country source: a file wins over a list, and the built-in
    /// countries are used when neither is given.
    pub fn resolve_countries(list: Option<&str>, file: Option<&Path>) -> Result<CountryPool> {
        match (file, list) {
            (Some(path), _) => {
                info!("loading countries from {}", path.display());
                CountryPool::from_file(path)
            }
            (None, Some(list)) => list.parse(),
            (None, None) => Ok(CountryPool::default()),
        }
    }

    /// The seed this configuration plays with. Without a fixed seed a fresh one
    /// is drawn, so log it if the game needs to be replayed.
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| rand::rng().random())
    }

    /// Whether `answered` rounds use up the round limit. A limit of zero is
    /// reached before the first round is dealt.
    pub fn round_limit_reached(&self, answered: usize) -> bool {
        self.max_rounds
            .map_or(false, |max| answered >= max as usize)
    }

    /// Starts a session; returns it together with the seed actually used.
    pub fn start_session(&self) -> (QuizSession, u64) {
        let seed = self.effective_seed();
        info!(
            "starting quiz with {} countries, seed {}",
            self.countries.len(),
            seed
        );
        let session = QuizSession::with_pool(self.countries.clone(), rng_from_seed(seed));
        (session, seed)
    }
}

/// The generator every session uses.
pub fn rng_from_seed(seed: u64) -> Xoshiro256PlusPlus {
    Xoshiro256PlusPlus::seed_from_u64(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuizError;

    #[test]
    fn test_default_config() {
        let config = QuizConfig::default();
        assert_eq!(config.countries.len(), 11);
        assert!(config.max_rounds.is_none());
    }

    #[test]
    fn test_resolve_countries_from_list() {
        let pool = QuizConfig::resolve_countries(Some("Spain,UK,US"), None).unwrap();
        assert_eq!(pool.len(), 3);
        assert!(QuizConfig::resolve_countries(Some("Spain"), None).is_err());
        assert_eq!(QuizConfig::resolve_countries(None, None).unwrap(), CountryPool::default());
    }

    #[test]
    fn test_file_wins_over_list() {
        let path = std::env::temp_dir().join(format!(
            "flagquiz-config-countries-{}.txt",
            std::process::id()
        ));
        std::fs::write(&path, "Ireland
Italy
Nigeria
Poland
").unwrap();

        let pool = QuizConfig::resolve_countries(Some("Spain,UK,US"), Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(
            pool.iter().collect::<Vec<_>>(),
            ["Ireland", "Italy", "Nigeria", "Poland"]
        );
        assert!(!pool.contains("Spain"));
    }

    #[test]
    fn test_missing_file_does_not_fall_back_to_list() {
        let path = std::env::temp_dir().join("flagquiz-config-no-such-file.txt");
        let result = QuizConfig::resolve_countries(Some("Spain,UK,US"), Some(&path));
        assert!(matches!(result, Err(QuizError::Io(_))));
    }

    #[test]
    fn test_round_limit() {
        let unlimited = QuizConfig::default();
        assert!(!unlimited.round_limit_reached(0));
        assert!(!unlimited.round_limit_reached(1_000));

        let none_allowed = QuizConfig {
            max_rounds: Some(0),
            ..Default::default()
        };
        assert!(none_allowed.round_limit_reached(0));

        let three = QuizConfig {
            max_rounds: Some(3),
            ..Default::default()
        };
        assert!(!three.round_limit_reached(2));
        assert!(three.round_limit_reached(3));
    }

    #[test]
    fn test_seeded_sessions_match() {
        let config = QuizConfig {
            seed: Some(1234),
            ..Default::default()
        };
        let (a, seed_a) = config.start_session();
        let (b, seed_b) = config.start_session();
        assert_eq!(seed_a, 1234);
        assert_eq!(seed_b, 1234);
        assert_eq!(a.round(), b.round());
    }
}
