//! Handle owning the single active tournament
//!
//! A [`Session`] replaces process-wide state: it holds at most one tournament,
//! creates it on the first registration and drops it on reset. It also owns
//! the random generator used for shuffles and tie-breaks. [`SharedSession`]
//! puts a session behind one mutex so concurrent callers mutate the whole
//! aggregate one operation at a time.

use chrono::{Datelike, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use startup_core::{BattleId, EventKind, Startup, StartupId, StartupProfile};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{error, info};

use crate::config::TournamentConfig;
use crate::error::{Result, TournamentError};
use crate::report::FinalReport;
use crate::resolver::BattleOutcome;
use crate::state::{Battle, Tournament};
use crate::store::{StartupStore, StoreError};

/// Failure while enrolling a startup through a store
#[derive(Error, Debug)]
pub enum EnrollError {
    #[error(transparent)]
    Tournament(#[from] TournamentError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct Session {
    config: TournamentConfig,
    rng: StdRng,
    tournament: Option<Tournament>,
}

impl Session {
    /// Create a session; the RNG is seeded from `config.seed` when present
    pub fn new(config: TournamentConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: TournamentConfig, rng: StdRng) -> Self {
        Self {
            config,
            rng,
            tournament: None,
        }
    }

    /// Resume a previously saved tournament
    pub fn resume(tournament: Tournament, rng: StdRng) -> Self {
        Self {
            config: tournament.config.clone(),
            rng,
            tournament: Some(tournament),
        }
    }

    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    pub fn tournament(&self) -> Option<&Tournament> {
        self.tournament.as_ref()
    }

    fn active(&self) -> Result<&Tournament> {
        self.tournament
            .as_ref()
            .ok_or(TournamentError::NoActiveTournament)
    }

    fn active_mut(&mut self) -> Result<&mut Tournament> {
        self.tournament
            .as_mut()
            .ok_or(TournamentError::NoActiveTournament)
    }

    /// Register a startup, creating the tournament if none is active
    pub fn register(&mut self, startup: Startup) -> Result<()> {
        if self.tournament.is_none() {
            let tournament = Tournament::new(self.config.clone());
            info!(tournament = %tournament.id, "Created tournament");
            self.tournament = Some(tournament);
        }
        self.active_mut()?.register(startup)
    }

    /// Validate `profile`, reuse the stored startup with the same name or
    /// create one, then register it
    pub fn enroll<S: StartupStore + ?Sized>(
        &mut self,
        store: &mut S,
        profile: StartupProfile,
    ) -> std::result::Result<Startup, EnrollError> {
        profile
            .validate(Utc::now().year())
            .map_err(TournamentError::from)?;

        if let Some(tournament) = &self.tournament {
            if tournament.is_started() {
                return Err(TournamentError::TournamentAlreadyStarted.into());
            }
            if tournament.startups.iter().any(|s| s.has_name(&profile.name)) {
                return Err(TournamentError::DuplicateStartup { name: profile.name }.into());
            }
            if tournament.startups.len() >= tournament.config.max_entrants {
                return Err(TournamentError::CapacityExceeded {
                    max: tournament.config.max_entrants,
                }
                .into());
            }
        }

        let startup = match store.find_startup_by_name(&profile.name)? {
            Some(existing) => {
                info!(startup = %existing.id, name = existing.name(), "Reusing stored startup");
                existing
            }
            None => store.create_startup(profile, self.config.base_score)?,
        };
        self.register(startup.clone())?;
        Ok(startup)
    }

    pub fn remove(&mut self, id: StartupId) -> Result<Option<Startup>> {
        self.active_mut()?.remove(id)
    }

    pub fn update_profile(&mut self, id: StartupId, profile: StartupProfile) -> Result<Startup> {
        profile.validate(Utc::now().year())?;
        self.active_mut()?.update_profile(id, profile).cloned()
    }

    /// Discard the active tournament entirely
    pub fn reset(&mut self) {
        if let Some(tournament) = self.tournament.take() {
            info!(tournament = %tournament.id, "Tournament reset");
        }
    }

    pub fn start(&mut self) -> Result<()> {
        let tournament = self
            .tournament
            .as_mut()
            .ok_or(TournamentError::NoActiveTournament)?;
        tournament.start(&mut self.rng)
    }

    pub fn start_with_seeding(&mut self, seeding: &[StartupId]) -> Result<()> {
        self.active_mut()?.start_with_seeding(seeding)
    }

    pub fn record_event(
        &mut self,
        battle_id: BattleId,
        startup_id: StartupId,
        kind: EventKind,
    ) -> Result<i32> {
        self.active_mut()?.record_event(battle_id, startup_id, kind)
    }

    /// Resolve a battle. Tie-breaks are decided here and reported in the
    /// outcome, never by the caller.
    pub fn complete_battle(
        &mut self,
        battle_id: BattleId,
        winner: Option<StartupId>,
    ) -> Result<BattleOutcome> {
        let tournament = self
            .tournament
            .as_mut()
            .ok_or(TournamentError::NoActiveTournament)?;
        tournament.complete_battle(battle_id, winner, &mut self.rng)
    }

    pub fn current_battles(&self) -> Result<Vec<&Battle>> {
        Ok(self.active()?.current_battles())
    }

    pub fn startup(&self, id: StartupId) -> Result<&Startup> {
        self.active()?
            .startup(id)
            .ok_or(TournamentError::StartupNotFound(id))
    }

    pub fn battle(&self, id: BattleId) -> Result<&Battle> {
        self.active()?
            .battle(id)
            .ok_or(TournamentError::BattleNotFound(id))
    }

    /// Final standings of the completed tournament
    pub fn finalize(&self) -> Result<FinalReport> {
        let report = self.active()?.final_report()?;
        info!(tournament = %report.tournament_id, "Tournament finalized");
        Ok(report)
    }
}

/// An operation panicked while holding the session lock
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("session is poisoned: an earlier operation panicked mid-update")]
pub struct SessionPoisoned;

/// A session behind a single lock
#[derive(Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<Session>>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Run `f` with exclusive access to the session.
    ///
    /// Fails with [`SessionPoisoned`] once a previous operation panicked while
    /// holding the lock.
    pub fn with<T>(
        &self,
        f: impl FnOnce(&mut Session) -> T,
    ) -> std::result::Result<T, SessionPoisoned> {
        let mut guard = self.inner.lock().map_err(|_| {
            error!("Session lock poisoned by an earlier panic");
            SessionPoisoned
        })?;
        Ok(f(&mut guard))
    }

    pub fn is_poisoned(&self) -> bool {
        self.inner.is_poisoned()
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
