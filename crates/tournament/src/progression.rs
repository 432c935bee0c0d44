//! Round progression, tournament completion and final ranking

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use startup_core::{ParticipationEntry, Startup, StartupId, TournamentEvent};
use tracing::info;

use crate::bracket::pair_up;
use crate::state::{Bye, Tournament};

/// Bracket state after a battle completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum Progress {
    /// Battles of the current round are still open
    RoundInProgress { round: u32 },
    /// The round finished and the next one was paired
    NextRound {
        round: u32,
        battles: usize,
        bye: Option<StartupId>,
    },
    /// Only one startup is left standing
    Completed { champion: StartupId },
}

impl Tournament {
    /// Move the bracket forward if every battle of the current round is done.
    ///
    /// Winners are reshuffled before pairing. An odd number of winners gives
    /// the last one after the shuffle a bye into the next round.
    pub(crate) fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Progress {
        let round = self.current_round;
        if self.battles_in_round(round).any(|b| !b.is_completed) {
            return Progress::RoundInProgress { round };
        }

        let mut winners: Vec<StartupId> = self
            .battles_in_round(round)
            .filter_map(|b| b.winner)
            .chain(
                self.byes
                    .iter()
                    .filter(|bye| bye.round == round)
                    .map(|bye| bye.startup_id),
            )
            .collect();

        if let &[champion] = winners.as_slice() {
            self.finish(champion);
            return Progress::Completed { champion };
        }

        winners.shuffle(rng);
        let next = round + 1;
        let (battles, bye) = pair_up(next, &winners);
        let count = battles.len();
        self.battles.extend(battles);
        if let Some(startup_id) = bye {
            self.byes.push(Bye {
                round: next,
                startup_id,
            });
        }
        self.current_round = next;

        info!(
            tournament = %self.id,
            round = next,
            phase = %self.round_phase(next),
            battles = count,
            "Advanced to next round"
        );
        Progress::NextRound {
            round: next,
            battles: count,
            bye,
        }
    }

    fn finish(&mut self, champion: StartupId) {
        let ranking: Vec<StartupId> = self.ranking().iter().map(|s| s.id).collect();
        let completed_at = Utc::now();

        for (idx, id) in ranking.iter().enumerate() {
            let events = self.events_of(*id);
            if let Some(startup) = self.startups.iter_mut().find(|s| s.id == *id) {
                startup.participation_history.push(ParticipationEntry {
                    edition: self.id,
                    position: idx as u32 + 1,
                    score: startup.score,
                    stats: startup.stats,
                    events,
                    completed_at,
                });
            }
        }

        self.winner = Some(champion);
        self.is_completed = true;
        self.current_round += 1;

        info!(
            tournament = %self.id,
            champion = %champion,
            battles = self.battles.len(),
            "Tournament completed"
        );
    }

    /// Every event `startup` received, in battle order, tagged with its phase
    fn events_of(&self, startup: StartupId) -> Vec<TournamentEvent> {
        self.battles
            .iter()
            .filter(|b| b.involves(startup))
            .flat_map(|b| {
                let phase = self.round_phase(b.round);
                b.events_for(startup)
                    .map(move |e| TournamentEvent::new(e.kind, phase))
            })
            .collect()
    }

    /// Startups ordered by battles won, then score, both descending.
    ///
    /// The sort is stable, so full ties keep registration order.
    pub fn ranking(&self) -> Vec<&Startup> {
        let mut ranked: Vec<(&Startup, usize)> = self
            .startups
            .iter()
            .map(|s| (s, self.wins_of(s.id)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.score.cmp(&a.0.score)));
        ranked.into_iter().map(|(s, _)| s).collect()
    }
}

#[cfg(test)]
#[path = "progression_tests.rs"]
mod progression_tests;
