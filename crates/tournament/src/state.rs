//! The tournament aggregate: startups, battles and round bookkeeping
//!
//! Every operation (registration, bracket start, event recording, battle
//! completion) is an `impl Tournament` block in its own module. The aggregate
//! is plain data so a whole tournament can be snapshotted to JSON.

use serde::{Deserialize, Serialize};
use std::path::Path;

use startup_core::{BattleId, EditionId, EventKind, Startup, StartupId};

use crate::bracket::final_round;
use crate::config::TournamentConfig;
use crate::error::{Result, TournamentError};
use crate::store::StoreError;

/// A scoring event recorded against one side of a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleEvent {
    pub startup_id: StartupId,
    pub kind: EventKind,
}

/// One head-to-head pairing within a round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Battle {
    pub id: BattleId,
    pub round: u32,
    pub startup1: StartupId,
    pub startup2: StartupId,
    pub is_completed: bool,
    pub winner: Option<StartupId>,
    pub had_tiebreak: bool,
    pub events: Vec<BattleEvent>,
}

impl Battle {
    pub fn new(round: u32, startup1: StartupId, startup2: StartupId) -> Self {
        Self {
            id: BattleId::new(),
            round,
            startup1,
            startup2,
            is_completed: false,
            winner: None,
            had_tiebreak: false,
            events: Vec::new(),
        }
    }

    pub fn involves(&self, startup: StartupId) -> bool {
        self.startup1 == startup || self.startup2 == startup
    }

    /// The other side of the battle, if `startup` is one of its sides
    pub fn opponent_of(&self, startup: StartupId) -> Option<StartupId> {
        if self.startup1 == startup {
            Some(self.startup2)
        } else if self.startup2 == startup {
            Some(self.startup1)
        } else {
            None
        }
    }

    pub fn loser(&self) -> Option<StartupId> {
        self.winner.and_then(|winner| self.opponent_of(winner))
    }

    pub fn events_for(&self, startup: StartupId) -> impl Iterator<Item = &BattleEvent> {
        self.events.iter().filter(move |e| e.startup_id == startup)
    }
}

/// A startup that advanced to `round` without a battle because the
/// previous round produced an odd number of winners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bye {
    pub round: u32,
    pub startup_id: StartupId,
}

/// Complete tournament state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: EditionId,
    /// Rules this tournament runs under
    pub config: TournamentConfig,
    /// Registered startups, in registration order
    pub startups: Vec<Startup>,
    pub battles: Vec<Battle>,
    #[serde(default)]
    pub byes: Vec<Bye>,
    /// 0 before the bracket starts
    pub current_round: u32,
    pub is_completed: bool,
    pub winner: Option<StartupId>,
}

impl Tournament {
    pub fn new(config: TournamentConfig) -> Self {
        Self {
            id: EditionId::new(),
            config,
            startups: Vec::new(),
            battles: Vec::new(),
            byes: Vec::new(),
            current_round: 0,
            is_completed: false,
            winner: None,
        }
    }

    pub fn is_started(&self) -> bool {
        self.current_round > 0
    }

    /// Number of the final round for the registered field
    pub fn final_round(&self) -> u32 {
        final_round(self.startups.len())
    }

    pub fn startup(&self, id: StartupId) -> Option<&Startup> {
        self.startups.iter().find(|s| s.id == id)
    }

    pub(crate) fn startup_mut(&mut self, id: StartupId) -> Result<&mut Startup> {
        self.startups
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(TournamentError::StartupNotFound(id))
    }

    pub fn battle(&self, id: BattleId) -> Option<&Battle> {
        self.battles.iter().find(|b| b.id == id)
    }

    pub(crate) fn battle_mut(&mut self, id: BattleId) -> Result<&mut Battle> {
        self.battles
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(TournamentError::BattleNotFound(id))
    }

    /// All battles of `round`, completed or not
    pub fn battles_in_round(&self, round: u32) -> impl Iterator<Item = &Battle> {
        self.battles.iter().filter(move |b| b.round == round)
    }

    /// Open battles of the current round
    pub fn current_battles(&self) -> Vec<&Battle> {
        self.battles_in_round(self.current_round)
            .filter(|b| !b.is_completed)
            .collect()
    }

    /// Number of battles `startup` has won so far
    pub fn wins_of(&self, startup: StartupId) -> usize {
        self.battles
            .iter()
            .filter(|b| b.winner == Some(startup))
            .count()
    }

    pub(crate) fn ensure_in_progress(&self) -> Result<()> {
        if self.is_completed {
            return Err(TournamentError::TournamentCompleted);
        }
        if !self.is_started() {
            return Err(TournamentError::TournamentNotStarted);
        }
        Ok(())
    }

    /// Save a snapshot to a JSON file
    pub fn save(&self, path: &Path) -> std::result::Result<(), StoreError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a snapshot from a JSON file
    pub fn load(path: &Path) -> std::result::Result<Self, StoreError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}
