//! Persistence collaborators for startups and final results
//!
//! The tournament core never calls these itself; callers use them to make
//! registrations and final standings durable. Two implementations are
//! provided: [`MemoryStore`] and the file-backed [`JsonFileStore`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use startup_core::{EditionId, Startup, StartupId, StartupPatch, StartupProfile, Stats};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised by persistence collaborators
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("startup {0} not found")]
    StartupNotFound(StartupId),

    #[error("a startup named '{0}' already exists")]
    DuplicateName(String),

    #[error("tournament edition {0} not found")]
    EditionNotFound(EditionId),
}

/// Durable result of one startup in one tournament edition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalResult {
    pub edition: EditionId,
    pub startup_id: StartupId,
    pub position: u32,
    pub score: i32,
    pub stats: Stats,
    pub recorded_at: DateTime<Utc>,
}

/// A stored tournament edition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditionRecord {
    pub id: EditionId,
    pub created_at: DateTime<Utc>,
}

/// Startup records
pub trait StartupStore {
    /// Create a startup record; the store assigns the id
    fn create_startup(
        &mut self,
        profile: StartupProfile,
        base_score: i32,
    ) -> Result<Startup, StoreError>;

    /// Case-insensitive lookup by name
    fn find_startup_by_name(&self, name: &str) -> Result<Option<Startup>, StoreError>;

    fn find_startup(&self, id: StartupId) -> Result<Option<Startup>, StoreError>;

    fn update_startup(&mut self, id: StartupId, patch: &StartupPatch) -> Result<Startup, StoreError>;

    fn list_startups(&self) -> Result<Vec<Startup>, StoreError>;

    /// Past results of a startup, oldest edition first
    fn list_participations(&self, id: StartupId) -> Result<Vec<FinalResult>, StoreError>;
}

/// Tournament editions and their final results
pub trait ResultStore {
    fn create_tournament_record(&mut self) -> Result<EditionId, StoreError>;

    /// Record edition `id` unless it is already known; returns `id`
    fn ensure_tournament_record(&mut self, id: EditionId) -> Result<EditionId, StoreError>;

    /// Insert or replace the result keyed by (edition, startup)
    fn upsert_final_result(&mut self, result: FinalResult) -> Result<(), StoreError>;

    /// All results of one edition, ordered by final position
    fn edition_results(&self, edition: EditionId) -> Result<Vec<FinalResult>, StoreError>;
}

/// In-process store, also the on-disk layout of [`JsonFileStore`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStore {
    startups: Vec<Startup>,
    editions: Vec<EditionRecord>,
    results: Vec<FinalResult>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn editions(&self) -> &[EditionRecord] {
        &self.editions
    }

    fn edition_index(&self, edition: EditionId) -> usize {
        self.editions
            .iter()
            .position(|e| e.id == edition)
            .unwrap_or(usize::MAX)
    }
}

impl StartupStore for MemoryStore {
    fn create_startup(
        &mut self,
        profile: StartupProfile,
        base_score: i32,
    ) -> Result<Startup, StoreError> {
        if self.startups.iter().any(|s| s.has_name(&profile.name)) {
            return Err(StoreError::DuplicateName(profile.name));
        }
        let startup = Startup::from_profile(StartupId::new(), profile, base_score);
        debug!(startup = %startup.id, name = startup.name(), "Stored new startup");
        self.startups.push(startup.clone());
        Ok(startup)
    }

    fn find_startup_by_name(&self, name: &str) -> Result<Option<Startup>, StoreError> {
        Ok(self.startups.iter().find(|s| s.has_name(name)).cloned())
    }

    fn find_startup(&self, id: StartupId) -> Result<Option<Startup>, StoreError> {
        Ok(self.startups.iter().find(|s| s.id == id).cloned())
    }

    fn update_startup(&mut self, id: StartupId, patch: &StartupPatch) -> Result<Startup, StoreError> {
        if let Some(name) = &patch.name {
            if self.startups.iter().any(|s| s.id != id && s.has_name(name)) {
                return Err(StoreError::DuplicateName(name.clone()));
            }
        }
        let startup = self
            .startups
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoreError::StartupNotFound(id))?;
        patch.apply(startup);
        Ok(startup.clone())
    }

    fn list_startups(&self) -> Result<Vec<Startup>, StoreError> {
        Ok(self.startups.clone())
    }

    fn list_participations(&self, id: StartupId) -> Result<Vec<FinalResult>, StoreError> {
        let mut results: Vec<FinalResult> = self
            .results
            .iter()
            .filter(|r| r.startup_id == id)
            .cloned()
            .collect();
        results.sort_by_key(|r| (self.edition_index(r.edition), r.position));
        Ok(results)
    }
}

impl ResultStore for MemoryStore {
    fn create_tournament_record(&mut self) -> Result<EditionId, StoreError> {
        let record = EditionRecord {
            id: EditionId::new(),
            created_at: Utc::now(),
        };
        let id = record.id;
        self.editions.push(record);
        Ok(id)
    }

    fn ensure_tournament_record(&mut self, id: EditionId) -> Result<EditionId, StoreError> {
        if !self.editions.iter().any(|e| e.id == id) {
            self.editions.push(EditionRecord {
                id,
                created_at: Utc::now(),
            });
        }
        Ok(id)
    }

    fn upsert_final_result(&mut self, result: FinalResult) -> Result<(), StoreError> {
        if !self.editions.iter().any(|e| e.id == result.edition) {
            return Err(StoreError::EditionNotFound(result.edition));
        }
        match self
            .results
            .iter_mut()
            .find(|r| r.edition == result.edition && r.startup_id == result.startup_id)
        {
            Some(existing) => *existing = result,
            None => self.results.push(result),
        }
        Ok(())
    }

    fn edition_results(&self, edition: EditionId) -> Result<Vec<FinalResult>, StoreError> {
        let mut results: Vec<FinalResult> = self
            .results
            .iter()
            .filter(|r| r.edition == edition)
            .cloned()
            .collect();
        results.sort_by_key(|r| r.position);
        Ok(results)
    }
}

/// Store kept in a single JSON file, rewritten after every mutation
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    data: MemoryStore,
}

impl JsonFileStore {
    /// Open the store at `path`, starting empty if the file does not exist
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let data = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            MemoryStore::default()
        };
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.data)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl StartupStore for JsonFileStore {
    fn create_startup(
        &mut self,
        profile: StartupProfile,
        base_score: i32,
    ) -> Result<Startup, StoreError> {
        let startup = self.data.create_startup(profile, base_score)?;
        self.save()?;
        Ok(startup)
    }

    fn find_startup_by_name(&self, name: &str) -> Result<Option<Startup>, StoreError> {
        self.data.find_startup_by_name(name)
    }

    fn find_startup(&self, id: StartupId) -> Result<Option<Startup>, StoreError> {
        self.data.find_startup(id)
    }

    fn update_startup(&mut self, id: StartupId, patch: &StartupPatch) -> Result<Startup, StoreError> {
        let startup = self.data.update_startup(id, patch)?;
        self.save()?;
        Ok(startup)
    }

    fn list_startups(&self) -> Result<Vec<Startup>, StoreError> {
        self.data.list_startups()
    }

    fn list_participations(&self, id: StartupId) -> Result<Vec<FinalResult>, StoreError> {
        self.data.list_participations(id)
    }
}

impl ResultStore for JsonFileStore {
    fn create_tournament_record(&mut self) -> Result<EditionId, StoreError> {
        let id = self.data.create_tournament_record()?;
        self.save()?;
        Ok(id)
    }

    fn ensure_tournament_record(&mut self, id: EditionId) -> Result<EditionId, StoreError> {
        let id = self.data.ensure_tournament_record(id)?;
        self.save()?;
        Ok(id)
    }

    fn upsert_final_result(&mut self, result: FinalResult) -> Result<(), StoreError> {
        self.data.upsert_final_result(result)?;
        self.save()
    }

    fn edition_results(&self, edition: EditionId) -> Result<Vec<FinalResult>, StoreError> {
        self.data.edition_results(edition)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
