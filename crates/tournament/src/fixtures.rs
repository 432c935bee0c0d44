//! Shared helpers for unit tests

use rand::rngs::StdRng;
use rand::SeedableRng;
use startup_core::{Startup, StartupId, StartupProfile};

use crate::config::TournamentConfig;
use crate::state::Tournament;

pub fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

pub fn startup(name: &str) -> Startup {
    Startup::from_profile(
        StartupId::new(),
        StartupProfile::new(name, &format!("{} slogan", name), 2020),
        70,
    )
}

/// A tournament with `count` registered startups named S1..Sn
pub fn tournament_with(count: usize) -> Tournament {
    let mut tournament = Tournament::new(TournamentConfig::default());
    for i in 1..=count {
        tournament.register(startup(&format!("S{}", i))).unwrap();
    }
    tournament
}

/// A tournament with `count` startups started in registration order,
/// so round 1 pairs (S1, S2), (S3, S4), ...
pub fn started_in_order(count: usize) -> Tournament {
    let mut tournament = tournament_with(count);
    let order: Vec<StartupId> = tournament.startups.iter().map(|s| s.id).collect();
    tournament.start_with_seeding(&order).unwrap();
    tournament
}

pub fn id_of(tournament: &Tournament, name: &str) -> StartupId {
    tournament
        .startups
        .iter()
        .find(|s| s.name() == name)
        .map(|s| s.id)
        .unwrap()
}
