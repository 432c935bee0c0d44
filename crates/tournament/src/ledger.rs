//! Scoring events recorded against battles

use startup_core::{BattleId, EventKind, StartupId};
use tracing::{debug, warn};

use crate::error::{Result, TournamentError};
use crate::state::{BattleEvent, Tournament};

impl Tournament {
    /// Record `kind` for `startup_id` in an open battle of the current round.
    ///
    /// Appends the event, applies its point delta to the running score and
    /// bumps the matching stat. With the event cap enforced each kind can be
    /// given to a startup at most once per round. Returns the new score.
    pub fn record_event(
        &mut self,
        battle_id: BattleId,
        startup_id: StartupId,
        kind: EventKind,
    ) -> Result<i32> {
        self.ensure_in_progress()?;
        let enforce_cap = self.config.enforce_event_cap;

        let battle = self.battle_mut(battle_id)?;
        if !battle.involves(startup_id) {
            return Err(TournamentError::StartupNotInBattle {
                startup: startup_id,
                battle: battle_id,
            });
        }
        if battle.is_completed {
            return Err(TournamentError::BattleAlreadyCompleted(battle_id));
        }
        // A startup has one battle per round, so the battle's own log is the round's log
        if enforce_cap && battle.events_for(startup_id).any(|e| e.kind == kind) {
            let round = battle.round;
            warn!(startup = %startup_id, %kind, round, "Event already used this round");
            return Err(TournamentError::EventAlreadyUsedThisRound {
                startup: startup_id,
                kind,
                round,
            });
        }
        battle.events.push(BattleEvent { startup_id, kind });

        let startup = self.startup_mut(startup_id)?;
        startup.apply_event(kind);
        debug!(
            startup = %startup_id,
            %kind,
            points = kind.points(),
            score = startup.score,
            "Recorded event"
        );
        Ok(startup.score)
    }

    /// Kinds `startup_id` has not received yet in its battle `battle_id`
    pub fn available_events(&self, battle_id: BattleId, startup_id: StartupId) -> Vec<EventKind> {
        let Some(battle) = self.battle(battle_id) else {
            return Vec::new();
        };
        if battle.is_completed || !battle.involves(startup_id) {
            return Vec::new();
        }
        EventKind::ALL
            .into_iter()
            .filter(|&kind| {
                !self.config.enforce_event_cap
                    || !battle.events_for(startup_id).any(|e| e.kind == kind)
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod ledger_tests;
