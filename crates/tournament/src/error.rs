//! Error types for tournament operations

use startup_core::{BattleId, EventKind, ProfileError, StartupId};
use thiserror::Error;

/// Validation failures surfaced synchronously by the tournament core.
///
/// None of these are retried internally and none of them originate in
/// persistence; see [`crate::StoreError`] for the collaborator side.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TournamentError {
    #[error("a startup named '{name}' is already registered")]
    DuplicateStartup { name: String },

    #[error("the tournament already holds the maximum of {max} startups")]
    CapacityExceeded { max: usize },

    #[error("cannot start with {count} startups: need an even count between {min} and {max}")]
    InvalidEntrantCount { count: usize, min: usize, max: usize },

    #[error("seeding must list every registered startup exactly once")]
    InvalidSeeding,

    #[error("battle {0} not found")]
    BattleNotFound(BattleId),

    #[error("startup {startup} is not part of battle {battle}")]
    StartupNotInBattle { startup: StartupId, battle: BattleId },

    #[error("battle {0} is already completed")]
    BattleAlreadyCompleted(BattleId),

    #[error("startup {startup} already received {kind} in round {round}")]
    EventAlreadyUsedThisRound {
        startup: StartupId,
        kind: EventKind,
        round: u32,
    },

    #[error("startup {0} not found")]
    StartupNotFound(StartupId),

    #[error("no active tournament")]
    NoActiveTournament,

    #[error("the tournament has already started")]
    TournamentAlreadyStarted,

    #[error("the tournament has not started yet")]
    TournamentNotStarted,

    #[error("the tournament is already completed")]
    TournamentCompleted,

    #[error("the tournament is not completed yet")]
    TournamentNotCompleted,

    #[error("invalid startup profile: {0}")]
    InvalidProfile(#[from] ProfileError),
}

/// Convenience result type for tournament operations.
pub type Result<T> = std::result::Result<T, TournamentError>;
