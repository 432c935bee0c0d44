//! Startup registration before the bracket starts

use startup_core::{Startup, StartupId, StartupProfile, Stats};
use tracing::{info, warn};

use crate::error::{Result, TournamentError};
use crate::state::Tournament;

impl Tournament {
    /// Add a startup to the roster.
    ///
    /// Names are unique ignoring case. The startup enters with the base score,
    /// zeroed stats and an empty history cache.
    pub fn register(&mut self, mut startup: Startup) -> Result<()> {
        if self.is_started() {
            return Err(TournamentError::TournamentAlreadyStarted);
        }
        if self
            .startups
            .iter()
            .any(|s| s.id == startup.id || s.has_name(startup.name()))
        {
            warn!(name = startup.name(), "Rejected duplicate startup");
            return Err(TournamentError::DuplicateStartup {
                name: startup.profile.name.clone(),
            });
        }
        if self.startups.len() >= self.config.max_entrants {
            warn!(name = startup.name(), "Rejected startup, roster is full");
            return Err(TournamentError::CapacityExceeded {
                max: self.config.max_entrants,
            });
        }

        startup.score = self.config.base_score;
        startup.stats = Stats::default();
        startup.participation_history.clear();

        info!(
            tournament = %self.id,
            startup = %startup.id,
            name = startup.name(),
            "Registered startup ({}/{})",
            self.startups.len() + 1,
            self.config.max_entrants
        );
        self.startups.push(startup);
        Ok(())
    }

    /// Withdraw a startup before the bracket starts.
    ///
    /// Returns the removed startup, or `None` if it was not registered.
    pub fn remove(&mut self, id: StartupId) -> Result<Option<Startup>> {
        if self.is_started() {
            return Err(TournamentError::TournamentAlreadyStarted);
        }
        let removed = self
            .startups
            .iter()
            .position(|s| s.id == id)
            .map(|idx| self.startups.remove(idx));
        if let Some(startup) = &removed {
            info!(startup = %startup.id, name = startup.name(), "Removed startup");
        }
        Ok(removed)
    }

    /// Replace the descriptive fields of a registered startup.
    ///
    /// Score, stats and history are untouched.
    pub fn update_profile(&mut self, id: StartupId, profile: StartupProfile) -> Result<&Startup> {
        if self.is_completed {
            return Err(TournamentError::TournamentCompleted);
        }
        if self
            .startups
            .iter()
            .any(|s| s.id != id && s.has_name(&profile.name))
        {
            return Err(TournamentError::DuplicateStartup { name: profile.name });
        }
        let startup = self.startup_mut(id)?;
        startup.profile = profile;
        Ok(startup)
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod registry_tests;
