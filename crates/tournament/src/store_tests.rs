use super::*;

fn profile(name: &str) -> StartupProfile {
    StartupProfile::new(name, "slogan", 2020)
}

fn result(edition: EditionId, startup_id: StartupId, position: u32, score: i32) -> FinalResult {
    FinalResult {
        edition,
        startup_id,
        position,
        score,
        stats: Stats::default(),
        recorded_at: Utc::now(),
    }
}

#[test]
fn test_create_and_find_startup() {
    let mut store = MemoryStore::new();
    let created = store.create_startup(profile("Rocket"), 70).unwrap();

    assert_eq!(created.score, 70);
    assert_eq!(store.find_startup(created.id).unwrap(), Some(created.clone()));
    assert_eq!(
        store.find_startup_by_name("ROCKET").unwrap().map(|s| s.id),
        Some(created.id)
    );
    assert_eq!(store.find_startup_by_name("Other").unwrap(), None);
}

#[test]
fn test_create_rejects_duplicate_name() {
    let mut store = MemoryStore::new();
    store.create_startup(profile("Rocket"), 70).unwrap();
    assert!(matches!(
        store.create_startup(profile("rocket"), 70),
        Err(StoreError::DuplicateName(_))
    ));
}

#[test]
fn test_update_startup_applies_patch() {
    let mut store = MemoryStore::new();
    let created = store.create_startup(profile("Rocket"), 70).unwrap();
    let patch = StartupPatch {
        slogan: Some("Faster".to_string()),
        ..Default::default()
    };

    let updated = store.update_startup(created.id, &patch).unwrap();
    assert_eq!(updated.profile.slogan, "Faster");
    assert_eq!(updated.name(), "Rocket");

    let missing = StartupId::new();
    assert!(matches!(
        store.update_startup(missing, &patch),
        Err(StoreError::StartupNotFound(id)) if id == missing
    ));
}

#[test]
fn test_upsert_replaces_existing_result() {
    let mut store = MemoryStore::new();
    let startup = store.create_startup(profile("Rocket"), 70).unwrap();
    let edition = store.create_tournament_record().unwrap();

    store.upsert_final_result(result(edition, startup.id, 2, 90)).unwrap();
    store.upsert_final_result(result(edition, startup.id, 1, 130)).unwrap();

    let results = store.edition_results(edition).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].position, 1);
    assert_eq!(results[0].score, 130);
}

#[test]
fn test_upsert_requires_known_edition() {
    let mut store = MemoryStore::new();
    let edition = EditionId::new();
    assert!(matches!(
        store.upsert_final_result(result(edition, StartupId::new(), 1, 100)),
        Err(StoreError::EditionNotFound(_))
    ));
}

#[test]
fn test_ensure_tournament_record_is_idempotent() {
    let mut store = MemoryStore::new();
    let edition = EditionId::new();

    assert_eq!(store.ensure_tournament_record(edition).unwrap(), edition);
    assert_eq!(store.ensure_tournament_record(edition).unwrap(), edition);
    assert_eq!(store.editions().len(), 1);
    assert_eq!(store.editions()[0].id, edition);
}

#[test]
fn test_participations_ordered_by_edition() {
    let mut store = MemoryStore::new();
    let startup = store.create_startup(profile("Rocket"), 70).unwrap();
    let first = store.create_tournament_record().unwrap();
    let second = store.create_tournament_record().unwrap();

    store.upsert_final_result(result(second, startup.id, 1, 140)).unwrap();
    store.upsert_final_result(result(first, startup.id, 3, 80)).unwrap();

    let history = store.list_participations(startup.id).unwrap();
    let editions: Vec<EditionId> = history.iter().map(|r| r.edition).collect();
    assert_eq!(editions, vec![first, second]);
    assert_eq!(store.editions().len(), 2);
}

#[test]
fn test_json_file_store_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");

    let (startup_id, edition) = {
        let mut store = JsonFileStore::open(&path).unwrap();
        let startup = store.create_startup(profile("Rocket"), 70).unwrap();
        let edition = store.create_tournament_record().unwrap();
        store.upsert_final_result(result(edition, startup.id, 1, 136)).unwrap();
        (startup.id, edition)
    };

    let reopened = JsonFileStore::open(&path).unwrap();
    assert_eq!(reopened.path(), path.as_path());
    assert_eq!(reopened.list_startups().unwrap().len(), 1);
    let history = reopened.list_participations(startup_id).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].edition, edition);
    assert_eq!(history[0].score, 136);
}

#[test]
fn test_json_file_store_rejects_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    std::fs::write(&path, "not json").unwrap();

    assert!(matches!(JsonFileStore::open(&path), Err(StoreError::Json(_))));
}
