//! Final standings and hand-off to the persistence collaborator

use chrono::Utc;
use serde::{Deserialize, Serialize};
use startup_core::{EditionId, StartupId, Stats};
use tracing::info;

use crate::error::{Result, TournamentError};
use crate::state::Tournament;
use crate::store::{FinalResult, ResultStore, StoreError};

/// One line of the final standings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    /// 1-based final position
    pub position: u32,
    pub startup_id: StartupId,
    pub name: String,
    pub wins: usize,
    pub score: i32,
    pub stats: Stats,
}

/// Sorted standings of a completed tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalReport {
    pub tournament_id: EditionId,
    pub champion: StartupId,
    pub standings: Vec<Standing>,
}

impl Tournament {
    /// Build the final report. Can be called any number of times once the
    /// tournament is completed.
    pub fn final_report(&self) -> Result<FinalReport> {
        let champion = match (self.is_completed, self.winner) {
            (true, Some(champion)) => champion,
            _ => return Err(TournamentError::TournamentNotCompleted),
        };

        let standings = self
            .ranking()
            .into_iter()
            .enumerate()
            .map(|(idx, startup)| Standing {
                position: idx as u32 + 1,
                startup_id: startup.id,
                name: startup.name().to_string(),
                wins: self.wins_of(startup.id),
                score: startup.score,
                stats: startup.stats,
            })
            .collect();

        Ok(FinalReport {
            tournament_id: self.id,
            champion,
            standings,
        })
    }
}

impl FinalReport {
    pub fn champion(&self) -> Option<&Standing> {
        self.standings.iter().find(|s| s.startup_id == self.champion)
    }

    /// Store one final result per startup under the edition keyed by this
    /// tournament's id.
    ///
    /// Persisting the same report again reuses that edition and upserts, so a
    /// retry after a partial failure never duplicates history.
    pub fn persist<S: ResultStore + ?Sized>(
        &self,
        store: &mut S,
    ) -> std::result::Result<EditionId, StoreError> {
        let edition = store.ensure_tournament_record(self.tournament_id)?;
        self.persist_into(store, edition)?;
        Ok(edition)
    }

    /// Upsert this report's results under an existing `edition`
    pub fn persist_into<S: ResultStore + ?Sized>(
        &self,
        store: &mut S,
        edition: EditionId,
    ) -> std::result::Result<(), StoreError> {
        let recorded_at = Utc::now();
        for standing in &self.standings {
            store.upsert_final_result(FinalResult {
                edition,
                startup_id: standing.startup_id,
                position: standing.position,
                score: standing.score,
                stats: standing.stats,
                recorded_at,
            })?;
        }
        info!(
            tournament = %self.tournament_id,
            edition = %edition,
            results = self.standings.len(),
            "Persisted final results"
        );
        Ok(())
    }

    /// Generate a text report
    pub fn render(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== Tournament {} ===\n\n", self.tournament_id));
        if let Some(champion) = self.champion() {
            report.push_str(&format!(
                "Champion: {} ({} points)\n\n",
                champion.name, champion.score
            ));
        }

        report.push_str(&format!(
            "{:>3}  {:<24} {:>4} {:>6}  {:>3} {:>3} {:>3} {:>3} {:>3}\n",
            "#", "Startup", "Wins", "Score", "PIT", "BUG", "TRA", "ANG", "FAK"
        ));
        report.push_str(&"-".repeat(66));
        report.push('\n');

        for s in &self.standings {
            report.push_str(&format!(
                "{:>3}  {:<24} {:>4} {:>6}  {:>3} {:>3} {:>3} {:>3} {:>3}\n",
                s.position,
                s.name,
                s.wins,
                s.score,
                s.stats.pitches,
                s.stats.bugs,
                s.stats.tractions,
                s.stats.angry_investors,
                s.stats.fake_news
            ));
        }

        report
    }

    /// Print report to stdout
    pub fn print(&self) {
        println!("{}", self.render());
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;
