//! Participation history recorded at tournament completion

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::EditionId;
use crate::types::{EventKind, RoundPhase, Stats};

/// One event a startup received during a tournament, tagged with its phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentEvent {
    pub kind: EventKind,
    pub phase: RoundPhase,
    pub description: String,
}

impl TournamentEvent {
    pub fn new(kind: EventKind, phase: RoundPhase) -> Self {
        Self {
            kind,
            phase,
            description: format!("{} during the {}", kind.label(), phase.name().to_lowercase()),
        }
    }
}

/// How a startup finished one tournament edition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationEntry {
    pub edition: EditionId,
    /// Final position, 1-based
    pub position: u32,
    pub score: i32,
    pub stats: Stats,
    pub events: Vec<TournamentEvent>,
    pub completed_at: DateTime<Utc>,
}
