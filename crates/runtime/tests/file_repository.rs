//! File-backed save slots.

use std::fs;
use std::sync::Arc;

use game_content::layers::{toys, trees};
use game_core::{Decimal, GameConfig, GameEngine};
use runtime::{
    FileStateRepository, RepositoryError, Runtime, RuntimeConfig, SAVE_VERSION, StateRepository,
};
use tempfile::TempDir;

fn progressed_state() -> (game_core::Catalog, game_core::GameState) {
    let catalog = game_content::catalog(GameConfig::new().with_starting_day(toys::DAY)).unwrap();
    let mut state = catalog.initial_state();
    let mut engine = GameEngine::new(&catalog, &mut state);
    engine
        .set_resource(toys::CLOTHES, Decimal::from(12u32))
        .unwrap();
    engine.tick(0.05);
    (catalog, state)
}

#[test]
fn save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let repo = FileStateRepository::new(dir.path()).unwrap();
    let (catalog, state) = progressed_state();

    repo.save("main", &state).unwrap();
    let loaded = repo.load("main").unwrap().unwrap();

    assert_eq!(loaded, state);
    assert!(catalog.view(&loaded).milestone_earned(toys::MILESTONE1));
    assert!(repo.load("other").unwrap().is_none());
}

#[test]
fn lists_only_save_files() {
    let dir = TempDir::new().unwrap();
    let repo = FileStateRepository::new(dir.path()).unwrap();
    let (_, state) = progressed_state();

    repo.save("main", &state).unwrap();
    repo.save("backup", &state).unwrap();
    fs::write(dir.path().join("notes.txt"), "x").unwrap();
    fs::write(dir.path().join("stale.sav.tmp"), "x").unwrap();

    assert_eq!(repo.list_slots().unwrap(), vec!["backup", "main"]);

    repo.delete("backup").unwrap();
    assert!(!repo.exists("backup"));
    assert_eq!(repo.list_slots().unwrap(), vec!["main"]);
}

#[test]
fn tampered_state_fails_checksum() {
    let dir = TempDir::new().unwrap();
    let repo = FileStateRepository::new(dir.path()).unwrap();
    let (_, state) = progressed_state();
    repo.save("main", &state).unwrap();

    let mut file = repo.load_file("main").unwrap().unwrap();
    assert_eq!(file.version, SAVE_VERSION);
    file.checksum = "00".repeat(32);
    fs::write(
        dir.path().join("main.sav"),
        bincode::serialize(&file).unwrap(),
    )
    .unwrap();

    let err = repo.load("main").unwrap_err();
    assert!(matches!(err, RepositoryError::ChecksumMismatch { .. }));
}

#[test]
fn newer_format_version_is_refused() {
    let dir = TempDir::new().unwrap();
    let repo = FileStateRepository::new(dir.path()).unwrap();
    let (_, state) = progressed_state();
    repo.save("main", &state).unwrap();

    let mut file = repo.load_file("main").unwrap().unwrap();
    file.version = SAVE_VERSION + 1;
    fs::write(
        dir.path().join("main.sav"),
        bincode::serialize(&file).unwrap(),
    )
    .unwrap();

    let err = repo.load("main").unwrap_err();
    assert!(matches!(
        err,
        RepositoryError::UnsupportedVersion { found, .. } if found == SAVE_VERSION + 1
    ));
}

#[test]
fn slot_names_cannot_escape_the_directory() {
    let dir = TempDir::new().unwrap();
    let repo = FileStateRepository::new(dir.path()).unwrap();
    let (_, state) = progressed_state();

    let err = repo.save("../escape", &state).unwrap_err();
    assert!(matches!(err, RepositoryError::InvalidSlot(_)));
    assert!(!repo.exists("../escape"));
}

#[test]
fn exports_json_with_checksum() {
    let dir = TempDir::new().unwrap();
    let repo = FileStateRepository::new(dir.path()).unwrap();
    let (_, state) = progressed_state();
    repo.save("main", &state).unwrap();

    let json = repo.export_json("main").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["version"], SAVE_VERSION);
    assert_eq!(value["checksum"].as_str().map(str::len), Some(64));
    assert!(repo.export_json("missing").unwrap().is_none());
}

#[test]
fn exported_json_keeps_infinite_resources() {
    let dir = TempDir::new().unwrap();
    let repo = FileStateRepository::new(dir.path()).unwrap();
    let (catalog, mut state) = progressed_state();
    GameEngine::new(&catalog, &mut state)
        .set_resource(trees::LOGS, Decimal::INFINITY)
        .unwrap();
    repo.save("main", &state).unwrap();

    let json = repo.export_json("main").unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let logs = &value["state"]["layers"][trees::ID.as_str()]["resources"][trees::LOGS.key];
    assert_eq!(logs.as_str(), Some("inf"));

    let restored: game_core::GameState = serde_json::from_value(value["state"].clone()).unwrap();
    assert_eq!(restored, state);
    assert_eq!(repo.load("main").unwrap(), Some(state));
}

#[tokio::test]
async fn runtime_resumes_from_file_slot() {
    let dir = TempDir::new().unwrap();
    let repo = Arc::new(FileStateRepository::new(dir.path()).unwrap());
    let catalog = Arc::new(game_content::catalog(GameConfig::default()).unwrap());

    let config = RuntimeConfig {
        save_slot: "resume".into(),
        ..RuntimeConfig::manual()
    };

    let runtime = Runtime::builder()
        .catalog(catalog.clone())
        .config(config.clone())
        .repository(repo.clone())
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    handle
        .set_resource(trees::LOGS, Decimal::new(1e4))
        .await
        .unwrap();
    let report = handle.tick(0.05).await.unwrap();
    assert_eq!(report.completed, vec![trees::ID]);
    handle.save().await.unwrap();
    drop(handle);
    runtime.shutdown().await.unwrap();

    let runtime = Runtime::builder()
        .catalog(catalog.clone())
        .config(config)
        .repository(repo)
        .build()
        .await
        .unwrap();
    let state = runtime.handle().query_state().await.unwrap();
    let view = catalog.view(&state);
    assert_eq!(view.resource(trees::LOGS), Decimal::new(1e4));
    assert_eq!(view.days_completed(), 1);

    runtime.shutdown().await.unwrap();
}
