//! Scoring events, per-kind statistics and round phases

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A scoring occurrence judged during a battle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Pitch,
    Bug,
    Traction,
    AngryInvestor,
    FakeNews,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::Pitch,
        EventKind::Bug,
        EventKind::Traction,
        EventKind::AngryInvestor,
        EventKind::FakeNews,
    ];

    /// Fixed score delta applied when this event is recorded
    pub fn points(self) -> i32 {
        match self {
            EventKind::Pitch => 6,
            EventKind::Bug => -4,
            EventKind::Traction => 3,
            EventKind::AngryInvestor => -6,
            EventKind::FakeNews => -8,
        }
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            EventKind::Pitch => "Convincing pitch",
            EventKind::Bug => "Critical bug",
            EventKind::Traction => "User traction",
            EventKind::AngryInvestor => "Angry investor",
            EventKind::FakeNews => "Fake news",
        }
    }

    /// Wire name, matching the serde representation
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Pitch => "PITCH",
            EventKind::Bug => "BUG",
            EventKind::Traction => "TRACTION",
            EventKind::AngryInvestor => "ANGRY_INVESTOR",
            EventKind::FakeNews => "FAKE_NEWS",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown event kind: {}", s))
    }
}

/// Count of recorded events per kind
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub pitches: u32,
    pub bugs: u32,
    pub tractions: u32,
    pub angry_investors: u32,
    pub fake_news: u32,
}

impl Stats {
    pub fn get(&self, kind: EventKind) -> u32 {
        match kind {
            EventKind::Pitch => self.pitches,
            EventKind::Bug => self.bugs,
            EventKind::Traction => self.tractions,
            EventKind::AngryInvestor => self.angry_investors,
            EventKind::FakeNews => self.fake_news,
        }
    }

    pub fn increment(&mut self, kind: EventKind) {
        let counter = match kind {
            EventKind::Pitch => &mut self.pitches,
            EventKind::Bug => &mut self.bugs,
            EventKind::Traction => &mut self.tractions,
            EventKind::AngryInvestor => &mut self.angry_investors,
            EventKind::FakeNews => &mut self.fake_news,
        };
        *counter += 1;
    }

    /// Total number of events counted across all kinds
    pub fn total(&self) -> u32 {
        EventKind::ALL.iter().map(|&kind| self.get(kind)).sum()
    }

    /// Net score contribution of the counted events
    pub fn points(&self) -> i32 {
        EventKind::ALL
            .iter()
            .map(|&kind| kind.points() * self.get(kind) as i32)
            .sum()
    }
}

/// Elimination layer a round belongs to, relative to the final
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundPhase {
    FirstRound,
    SemiFinal,
    Final,
}

impl RoundPhase {
    /// Classify `round` (1-based) given the number of the final round
    pub fn for_round(round: u32, final_round: u32) -> RoundPhase {
        if round >= final_round {
            RoundPhase::Final
        } else if round + 1 == final_round {
            RoundPhase::SemiFinal
        } else {
            RoundPhase::FirstRound
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RoundPhase::FirstRound => "First Round",
            RoundPhase::SemiFinal => "Semifinal",
            RoundPhase::Final => "Final",
        }
    }
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
