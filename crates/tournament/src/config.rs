//! Tournament scoring rules and bracket limits

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::store::StoreError;

/// Score every startup enters a tournament with
pub const BASE_SCORE: i32 = 70;

/// Points awarded to the winner of a battle
pub const ADVANCEMENT_BONUS: i32 = 30;

/// Extra points for the winner of a random tie-break
pub const TIEBREAK_BONUS: i32 = 2;

/// Tournament configuration
///
/// Loaded from TOML; every key is optional and falls back to the default.
///
/// ```toml
/// base_score = 70
/// max_entrants = 8
/// enforce_event_cap = true
/// seed = 42
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    pub base_score: i32,
    pub advancement_bonus: i32,
    pub tiebreak_bonus: i32,
    /// Fewest startups a bracket can start with
    pub min_entrants: usize,
    /// Registration capacity and largest bracket size
    pub max_entrants: usize,
    /// Reject a second event of the same kind for a startup within one round
    pub enforce_event_cap: bool,
    /// Seed for shuffles and tie-breaks (None = entropy)
    pub seed: Option<u64>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            base_score: BASE_SCORE,
            advancement_bonus: ADVANCEMENT_BONUS,
            tiebreak_bonus: TIEBREAK_BONUS,
            min_entrants: 4,
            max_entrants: 8,
            enforce_event_cap: true,
            seed: None,
        }
    }
}

impl TournamentConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, StoreError> {
        Ok(toml::from_str(contents)?)
    }

    /// Check whether `count` startups can form a bracket
    pub fn accepts_entrant_count(&self, count: usize) -> bool {
        count >= self.min_entrants && count <= self.max_entrants && count % 2 == 0
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
