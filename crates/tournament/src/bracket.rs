//! Bracket construction: seeding, pairing and round numbering

use rand::seq::SliceRandom;
use rand::Rng;
use startup_core::{RoundPhase, StartupId};
use std::collections::HashSet;
use tracing::{info, warn};

use crate::error::{Result, TournamentError};
use crate::state::{Battle, Tournament};

/// Number of the final round for a single-elimination field of `entrants`.
///
/// Equals `ceil(log2(entrants))`: 4 startups play 2 rounds, 6 and 8 play 3.
/// The final round is always derived from here, never stored.
pub fn final_round(entrants: usize) -> u32 {
    if entrants <= 1 {
        return 0;
    }
    usize::BITS - (entrants - 1).leading_zeros()
}

/// Pair consecutive startups into battles of `round`.
///
/// With an odd count the last startup is returned as the bye.
pub(crate) fn pair_up(round: u32, order: &[StartupId]) -> (Vec<Battle>, Option<StartupId>) {
    let mut pairs = order.chunks_exact(2);
    let battles = pairs
        .by_ref()
        .map(|pair| Battle::new(round, pair[0], pair[1]))
        .collect();
    let bye = pairs.remainder().first().copied();
    (battles, bye)
}

impl Tournament {
    /// Shuffle the roster uniformly and build the round-1 battles
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        let mut order: Vec<StartupId> = self.startups.iter().map(|s| s.id).collect();
        order.shuffle(rng);
        self.start_with_seeding(&order)
    }

    /// Build the round-1 battles from an explicit order: `(s0, s1), (s2, s3), ...`
    pub fn start_with_seeding(&mut self, seeding: &[StartupId]) -> Result<()> {
        if self.is_started() {
            return Err(TournamentError::TournamentAlreadyStarted);
        }
        let count = self.startups.len();
        if !self.config.accepts_entrant_count(count) {
            warn!(count, "Rejected bracket start");
            return Err(TournamentError::InvalidEntrantCount {
                count,
                min: self.config.min_entrants,
                max: self.config.max_entrants,
            });
        }

        let unique: HashSet<StartupId> = seeding.iter().copied().collect();
        if seeding.len() != count
            || unique.len() != count
            || !self.startups.iter().all(|s| unique.contains(&s.id))
        {
            return Err(TournamentError::InvalidSeeding);
        }

        let (battles, _) = pair_up(1, seeding);
        self.battles = battles;
        self.byes.clear();
        self.current_round = 1;
        self.is_completed = false;
        self.winner = None;

        info!(
            tournament = %self.id,
            startups = count,
            rounds = self.final_round(),
            "Tournament started with {} battles",
            self.battles.len()
        );
        Ok(())
    }

    /// Phase of `round` within this tournament's bracket
    pub fn round_phase(&self, round: u32) -> RoundPhase {
        RoundPhase::for_round(round, self.final_round())
    }

    pub fn is_final_round(&self, round: u32) -> bool {
        round == self.final_round()
    }
}

#[cfg(test)]
#[path = "bracket_tests.rs"]
mod bracket_tests;
