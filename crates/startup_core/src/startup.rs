//! Startup profiles and the competing startup record

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::history::ParticipationEntry;
use crate::ids::StartupId;
use crate::types::{EventKind, Stats};

/// Earliest founding year accepted for a profile
pub const MIN_FOUNDING_YEAR: i32 = 1900;

/// Reasons a startup profile is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("name is required")]
    MissingName,

    #[error("slogan is required")]
    MissingSlogan,

    #[error("founding year {year} is outside {min}..={max}")]
    FoundingYearOutOfRange { year: i32, min: i32, max: i32 },
}

/// Descriptive fields supplied when a startup signs up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupProfile {
    pub name: String,
    pub slogan: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub founding_year: i32,
}

impl StartupProfile {
    pub fn new(name: &str, slogan: &str, founding_year: i32) -> Self {
        Self {
            name: name.to_string(),
            slogan: slogan.to_string(),
            description: None,
            founding_year,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Check required fields and the founding year against `current_year`
    pub fn validate(&self, current_year: i32) -> Result<(), ProfileError> {
        if self.name.trim().is_empty() {
            return Err(ProfileError::MissingName);
        }
        if self.slogan.trim().is_empty() {
            return Err(ProfileError::MissingSlogan);
        }
        if !(MIN_FOUNDING_YEAR..=current_year).contains(&self.founding_year) {
            return Err(ProfileError::FoundingYearOutOfRange {
                year: self.founding_year,
                min: MIN_FOUNDING_YEAR,
                max: current_year,
            });
        }
        Ok(())
    }
}

/// A competitor in the tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Startup {
    pub id: StartupId,
    #[serde(flatten)]
    pub profile: StartupProfile,
    pub score: i32,
    pub stats: Stats,
    /// Cache of past results, filled in when a tournament completes
    #[serde(default)]
    pub participation_history: Vec<ParticipationEntry>,
}

impl Startup {
    pub fn from_profile(id: StartupId, profile: StartupProfile, base_score: i32) -> Self {
        Self {
            id,
            profile,
            score: base_score,
            stats: Stats::default(),
            participation_history: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.profile.name
    }

    /// Case-insensitive name comparison used for uniqueness checks
    pub fn has_name(&self, name: &str) -> bool {
        self.profile.name.to_lowercase() == name.to_lowercase()
    }

    /// Apply an event's point delta and bump its counter
    pub fn apply_event(&mut self, kind: EventKind) {
        self.score += kind.points();
        self.stats.increment(kind);
    }
}

/// Partial update of a stored startup record; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupPatch {
    pub name: Option<String>,
    pub slogan: Option<String>,
    pub description: Option<Option<String>>,
    pub founding_year: Option<i32>,
    pub score: Option<i32>,
}

impl StartupPatch {
    pub fn apply(&self, startup: &mut Startup) {
        if let Some(name) = &self.name {
            startup.profile.name = name.clone();
        }
        if let Some(slogan) = &self.slogan {
            startup.profile.slogan = slogan.clone();
        }
        if let Some(description) = &self.description {
            startup.profile.description = description.clone();
        }
        if let Some(year) = self.founding_year {
            startup.profile.founding_year = year;
        }
        if let Some(score) = self.score {
            startup.score = score;
        }
    }
}

#[cfg(test)]
#[path = "startup_tests.rs"]
mod startup_tests;
