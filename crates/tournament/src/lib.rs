//! Startup Rush tournament engine
//!
//! This crate provides:
//! - Registration of 4 to 8 startups into a single active tournament
//! - Bracket seeding, round progression and tie-break resolution
//! - Event scoring with a per-round cap on each event kind
//! - Final standings and participation history for completed tournaments
//! - Persistence collaborators (in-memory and JSON file) for durable results
//!
//! # Usage
//!
//! ```bash
//! # Simulate a full 8-startup tournament and store the results
//! cargo run -p tournament -- simulate --startups 8 --seed 7
//!
//! # Show the history of one startup
//! cargo run -p tournament -- history "Rocket Labs"
//! ```

mod bracket;
mod config;
mod error;
mod ledger;
mod progression;
mod registry;
mod report;
mod resolver;
mod session;
mod state;
mod store;

#[cfg(test)]
mod fixtures;

pub use bracket::*;
pub use config::*;
pub use error::*;
pub use progression::*;
pub use report::*;
pub use resolver::*;
pub use session::*;
pub use state::*;
pub use store::*;

pub use startup_core;
