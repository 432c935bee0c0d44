use super::*;
use crate::fixtures::startup;
use crate::progression::Progress;
use crate::store::{MemoryStore, StartupStore};
use std::thread;

fn seeded_session() -> Session {
    Session::new(TournamentConfig {
        seed: Some(11),
        ..Default::default()
    })
}

#[test]
fn test_operations_need_an_active_tournament() {
    let mut session = seeded_session();
    assert!(session.tournament().is_none());
    assert_eq!(session.start(), Err(TournamentError::NoActiveTournament));
    assert_eq!(session.finalize(), Err(TournamentError::NoActiveTournament));
    assert!(matches!(
        session.current_battles(),
        Err(TournamentError::NoActiveTournament)
    ));
    assert_eq!(
        session.complete_battle(BattleId::new(), None),
        Err(TournamentError::NoActiveTournament)
    );
}

#[test]
fn test_first_registration_creates_tournament_and_reset_drops_it() {
    let mut session = seeded_session();
    session.register(startup("Rocket")).unwrap();

    let tournament = session.tournament().unwrap();
    assert_eq!(tournament.startups.len(), 1);
    assert_eq!(tournament.current_round, 0);

    session.reset();
    assert!(session.tournament().is_none());

    session.register(startup("Rocket")).unwrap();
    assert_eq!(session.tournament().unwrap().startups.len(), 1);
}

#[test]
fn test_enroll_creates_or_reuses_stored_startups() {
    let mut store = MemoryStore::new();
    let existing = store
        .create_startup(StartupProfile::new("Rocket", "Old slogan", 2019), 70)
        .unwrap();

    let mut session = seeded_session();
    let reused = session
        .enroll(&mut store, StartupProfile::new("rocket", "New slogan", 2019))
        .unwrap();
    assert_eq!(reused.id, existing.id);

    let created = session
        .enroll(&mut store, StartupProfile::new("NeoBank", "Bank", 2018))
        .unwrap();
    assert!(store.find_startup(created.id).unwrap().is_some());
    assert_eq!(session.tournament().unwrap().startups.len(), 2);

    let duplicate = session.enroll(&mut store, StartupProfile::new("NEOBANK", "Bank", 2018));
    assert!(matches!(
        duplicate,
        Err(EnrollError::Tournament(TournamentError::DuplicateStartup { .. }))
    ));
}

#[test]
fn test_enroll_validates_profile() {
    let mut store = MemoryStore::new();
    let mut session = seeded_session();

    let result = session.enroll(&mut store, StartupProfile::new("", "Slogan", 2020));
    assert!(matches!(
        result,
        Err(EnrollError::Tournament(TournamentError::InvalidProfile(_)))
    ));
    assert!(store.list_startups().unwrap().is_empty());
}

#[test]
fn test_rejected_enrollment_leaves_store_untouched() {
    let mut store = MemoryStore::new();
    let mut session = seeded_session();
    for name in ["A", "B", "C", "D", "E", "F", "G", "H"] {
        session
            .enroll(&mut store, StartupProfile::new(name, "Slogan", 2020))
            .unwrap();
    }

    let ninth = session.enroll(&mut store, StartupProfile::new("I", "Slogan", 2020));
    assert!(matches!(
        ninth,
        Err(EnrollError::Tournament(TournamentError::CapacityExceeded { max: 8 }))
    ));
    assert_eq!(store.list_startups().unwrap().len(), 8);

    session.start().unwrap();
    let late = session.enroll(&mut store, StartupProfile::new("J", "Slogan", 2020));
    assert!(matches!(
        late,
        Err(EnrollError::Tournament(TournamentError::TournamentAlreadyStarted))
    ));
    assert!(store.find_startup_by_name("J").unwrap().is_none());
}

#[test]
fn test_full_run_through_session() {
    let mut session = seeded_session();
    for name in ["A", "B", "C", "D", "E", "F", "G", "H"] {
        session.register(startup(name)).unwrap();
    }
    session.start().unwrap();

    let mut completions = 0;
    loop {
        let open: Vec<BattleId> = session
            .current_battles()
            .unwrap()
            .iter()
            .map(|b| b.id)
            .collect();
        if open.is_empty() {
            break;
        }
        for id in open {
            session.complete_battle(id, None).unwrap();
            completions += 1;
        }
    }

    assert_eq!(completions, 7);
    let report = session.finalize().unwrap();
    assert_eq!(report.standings.len(), 8);
    assert_eq!(report.standings[0].wins, 3);
    assert_eq!(Some(report.champion), session.tournament().unwrap().winner);
}

#[test]
fn test_update_profile_through_session() {
    let mut session = seeded_session();
    let entrant = startup("Rocket");
    let id = entrant.id;
    session.register(entrant).unwrap();

    let updated = session
        .update_profile(id, StartupProfile::new("Rocket", "Even faster", 2019))
        .unwrap();
    assert_eq!(updated.profile.slogan, "Even faster");
    assert_eq!(session.startup(id).unwrap().profile.slogan, "Even faster");

    assert!(matches!(
        session.update_profile(id, StartupProfile::new("Rocket", "x", 1800)),
        Err(TournamentError::InvalidProfile(_))
    ));
}

#[test]
fn test_shared_session_serializes_concurrent_completions() {
    let mut session = seeded_session();
    for name in ["A", "B", "C", "D", "E", "F", "G", "H"] {
        session.register(startup(name)).unwrap();
    }
    session.start().unwrap();
    let battles: Vec<BattleId> = session
        .current_battles()
        .unwrap()
        .iter()
        .map(|b| b.id)
        .collect();

    let shared = SharedSession::new(session);
    let handles: Vec<_> = battles
        .into_iter()
        .map(|id| {
            let shared = shared.clone();
            thread::spawn(move || shared.with(|s| s.complete_battle(id, None).map(|o| o.progress)))
        })
        .collect();
    let progress: Vec<Progress> = handles
        .into_iter()
        .map(|h| h.join().unwrap().unwrap().unwrap())
        .collect();

    // Exactly one of the four completions closed the round
    let advanced = progress
        .iter()
        .filter(|p| matches!(p, Progress::NextRound { round: 2, .. }))
        .count();
    assert_eq!(advanced, 1);
    shared.with(|s| {
        let tournament = s.tournament().unwrap();
        assert_eq!(tournament.current_round, 2);
        assert_eq!(tournament.battles_in_round(2).count(), 2);
    })
    .unwrap();
}

#[test]
fn test_shared_session_reports_poisoning() {
    let shared = SharedSession::new(seeded_session());
    let panicking = shared.clone();
    let joined = thread::spawn(move || {
        panicking.with(|s| {
            s.register(startup("Rocket")).unwrap();
            panic!("mid-update failure");
        })
    })
    .join();

    assert!(joined.is_err());
    assert!(shared.is_poisoned());
    assert_eq!(
        shared.with(|s| s.tournament().is_some()),
        Err(SessionPoisoned)
    );
}
