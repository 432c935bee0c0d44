//! Startup Rush domain types
//!
//! Shared vocabulary for the tournament engine and anything that displays or
//! stores its results:
//! - Identifiers for startups, battles and tournament editions
//! - Startup profiles, scores and per-event statistics
//! - The five scoring event kinds and their point deltas
//! - Participation history entries recorded when a tournament completes

pub mod history;
pub mod ids;
pub mod startup;
pub mod types;

pub use history::*;
pub use ids::*;
pub use startup::*;
pub use types::*;
