use super::*;
use crate::fixtures::{id_of, rng, started_in_order};
use crate::store::{MemoryStore, StartupStore};
use startup_core::EventKind;

fn completed_tournament() -> Tournament {
    let mut rng = rng();
    let mut tournament = started_in_order(4);
    let s1 = id_of(&tournament, "S1");
    let s3 = id_of(&tournament, "S3");
    let (b1, b2) = (tournament.battles[0].id, tournament.battles[1].id);

    tournament.record_event(b1, s1, EventKind::Pitch).unwrap();
    tournament.complete_battle(b1, Some(s1), &mut rng).unwrap();
    tournament.complete_battle(b2, Some(s3), &mut rng).unwrap();
    let final_battle = tournament.current_battles()[0].id;
    tournament.complete_battle(final_battle, None, &mut rng).unwrap();
    tournament
}

#[test]
fn test_report_requires_completion() {
    let tournament = started_in_order(4);
    assert_eq!(
        tournament.final_report(),
        Err(TournamentError::TournamentNotCompleted)
    );
}

#[test]
fn test_report_standings() {
    let tournament = completed_tournament();
    let report = tournament.final_report().unwrap();

    assert_eq!(report.tournament_id, tournament.id);
    assert_eq!(report.champion, id_of(&tournament, "S1"));
    let names: Vec<&str> = report.standings.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["S1", "S3", "S2", "S4"]);

    let top = &report.standings[0];
    assert_eq!(top.position, 1);
    assert_eq!(top.wins, 2);
    assert_eq!(top.score, 136);
    assert_eq!(top.stats.pitches, 1);
    assert_eq!(report.champion().map(|s| s.position), Some(1));

    let positions: Vec<u32> = report.standings.iter().map(|s| s.position).collect();
    assert_eq!(positions, vec![1, 2, 3, 4]);
}

#[test]
fn test_report_is_repeatable() {
    let tournament = completed_tournament();
    assert_eq!(tournament.final_report(), tournament.final_report());
}

#[test]
fn test_render_lists_every_startup() {
    let report = completed_tournament().final_report().unwrap();
    let text = report.render();
    assert!(text.contains("Champion: S1 (136 points)"));
    for name in ["S1", "S2", "S3", "S4"] {
        assert!(text.contains(name));
    }
}

#[test]
fn test_persist_writes_one_result_per_startup() {
    let report = completed_tournament().final_report().unwrap();
    let mut store = MemoryStore::new();

    let edition = report.persist(&mut store).unwrap();
    assert_eq!(edition, report.tournament_id);
    let results = store.edition_results(edition).unwrap();
    assert_eq!(results.len(), 4);
    assert_eq!(results[0].startup_id, report.champion);
    assert_eq!(results[0].score, 136);

    // Persisting again into the same edition upserts
    report.persist_into(&mut store, edition).unwrap();
    assert_eq!(store.edition_results(edition).unwrap().len(), 4);
    assert_eq!(store.list_participations(report.champion).unwrap().len(), 1);
}

#[test]
fn test_persist_twice_keeps_one_edition() {
    let report = completed_tournament().final_report().unwrap();
    let mut store = MemoryStore::new();

    let first = report.persist(&mut store).unwrap();
    let second = report.persist(&mut store).unwrap();

    assert_eq!(first, second);
    assert_eq!(store.editions().len(), 1);
    assert_eq!(store.edition_results(first).unwrap().len(), 4);
    for standing in &report.standings {
        assert_eq!(store.list_participations(standing.startup_id).unwrap().len(), 1);
    }
}
