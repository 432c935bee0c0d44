//! Battle resolution: winner selection, tie-breaks and advancement bonus

use rand::Rng;
use serde::{Deserialize, Serialize};
use startup_core::{BattleId, StartupId};
use tracing::{info, warn};

use crate::error::{Result, TournamentError};
use crate::progression::Progress;
use crate::state::Tournament;

/// What happened when a battle was completed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleOutcome {
    pub battle_id: BattleId,
    pub round: u32,
    pub winner: StartupId,
    pub loser: StartupId,
    /// The battle was decided between two equal scores
    pub had_tiebreak: bool,
    pub winner_score: i32,
    pub loser_score: i32,
    /// Effect of this completion on the bracket
    pub progress: Progress,
}

impl Tournament {
    /// Complete a battle and advance the bracket if its round is done.
    ///
    /// Without `winner` the higher score wins; on equal scores the winner is
    /// drawn uniformly at random. An explicit `winner` is honored as given.
    /// Either way, a battle completed on equal scores counts as a tie-break:
    /// the winner receives the tie-break bonus on top of the advancement
    /// bonus and the battle is flagged.
    ///
    /// A battle can only be completed once; a second call is rejected and
    /// awards nothing.
    pub fn complete_battle<R: Rng + ?Sized>(
        &mut self,
        battle_id: BattleId,
        winner: Option<StartupId>,
        rng: &mut R,
    ) -> Result<BattleOutcome> {
        self.ensure_in_progress()?;

        let battle = self
            .battle(battle_id)
            .ok_or(TournamentError::BattleNotFound(battle_id))?;
        if battle.is_completed {
            warn!(battle = %battle_id, "Battle already completed");
            return Err(TournamentError::BattleAlreadyCompleted(battle_id));
        }
        let (first, second, round) = (battle.startup1, battle.startup2, battle.round);

        let first_score = self.score_of(first)?;
        let second_score = self.score_of(second)?;

        let (winner, had_tiebreak) = match winner {
            Some(chosen) => {
                if chosen != first && chosen != second {
                    return Err(TournamentError::StartupNotInBattle {
                        startup: chosen,
                        battle: battle_id,
                    });
                }
                (chosen, first_score == second_score)
            }
            None if first_score == second_score => {
                let lucky = if rng.gen_bool(0.5) { first } else { second };
                (lucky, true)
            }
            None if first_score > second_score => (first, false),
            None => (second, false),
        };
        let loser = if winner == first { second } else { first };

        let bonus = if had_tiebreak {
            self.config.tiebreak_bonus + self.config.advancement_bonus
        } else {
            self.config.advancement_bonus
        };
        let winner_score = {
            let startup = self.startup_mut(winner)?;
            startup.score += bonus;
            startup.score
        };
        let loser_score = self.score_of(loser)?;

        let battle = self.battle_mut(battle_id)?;
        battle.is_completed = true;
        battle.winner = Some(winner);
        battle.had_tiebreak = had_tiebreak;

        info!(
            battle = %battle_id,
            round,
            winner = %winner,
            winner_score,
            loser_score,
            had_tiebreak,
            "Battle completed"
        );

        let progress = self.advance(rng);
        Ok(BattleOutcome {
            battle_id,
            round,
            winner,
            loser,
            had_tiebreak,
            winner_score,
            loser_score,
            progress,
        })
    }

    fn score_of(&self, id: StartupId) -> Result<i32> {
        self.startup(id)
            .map(|s| s.score)
            .ok_or(TournamentError::StartupNotFound(id))
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod resolver_tests;
