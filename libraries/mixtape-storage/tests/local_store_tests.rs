//! Integration tests for the local persistence adapter
//!
//! These tests use REAL redb files in temp directories to match on-device
//! behavior.

use chrono::{TimeZone, Utc};
use mixtape_core::{Profile, Project, Track, TrackId};
use mixtape_storage::{LocalStore, MemoryStore, RedbStore, PROJECTS_KEY};
use mixtape_core::KeyValueStore;
use tempfile::TempDir;

fn open(dir: &TempDir) -> LocalStore<RedbStore> {
    LocalStore::new(RedbStore::open(dir.path().join("mixtape.redb")).expect("open store"))
}

fn sample_projects() -> Vec<Project> {
    let mut first = Project::new("Road trip", Some("Taylor"), 0);
    first.tracks.push(Track {
        id: TrackId::new("t1"),
        title: "Intro".to_string(),
        file_url: "https://cdn.example.com/u/p/a.mp3".to_string(),
        storage_path: Some("u/p/a.mp3".to_string()),
        file_size: 4096,
        duration: 93.25,
        created_at: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
    });
    first.tracks.push(Track {
        id: TrackId::new("t2"),
        title: "Local demo".to_string(),
        file_url: "blob:1234".to_string(),
        storage_path: None,
        file_size: 12,
        duration: 0.0,
        created_at: Utc::now(),
    });
    let second = Project::new("Late night", None, 1);
    vec![first, second]
}

#[test]
fn test_projects_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let projects = sample_projects();

    let mut local = open(&dir);
    local.save_projects(&projects).unwrap();
    drop(local);

    let loaded = open(&dir).load_projects();
    assert_eq!(loaded, projects);
}

#[test]
fn test_round_trip_applies_defaults_once() {
    let store = MemoryStore::new();
    store
        .set(
            PROJECTS_KEY,
            r#"{"projects": [{"id": "p1", "name": "Mix", "tracks": [{"id": "t1"}]}]}"#,
        )
        .unwrap();
    let mut local = LocalStore::new(store.clone());

    let first = local.load_projects();
    local.save_projects(&first).unwrap();
    let second = local.load_projects();

    assert_eq!(first, second);
    assert_eq!(second[0].tracks.len(), 1);
}

#[test]
fn test_remote_shaped_snapshot_is_normalized() {
    let store = MemoryStore::new();
    store
        .set(
            PROJECTS_KEY,
            r#"{"projects": [{
                "id": "p1",
                "name": "Synced",
                "cover_gradient": "linear-gradient(red, blue)",
                "created_at": "2025-01-01T00:00:00+00:00",
                "tracks": [{"id": "t1", "file_url": "https://x/a.mp3", "storage_path": "a", "file_size": 5}]
            }]}"#,
        )
        .unwrap();

    let projects = LocalStore::new(store).load_projects();
    assert_eq!(projects[0].cover_gradient, "linear-gradient(red, blue)");
    assert_eq!(projects[0].tracks[0].file_url, "https://x/a.mp3");
    assert_eq!(projects[0].tracks[0].storage_path.as_deref(), Some("a"));
    assert_eq!(projects[0].tracks[0].file_size, 5);
}

#[test]
fn test_profile_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let profile = Profile::new("Taylor Creator", "taylor@gmail.com");

    let mut local = open(&dir);
    local.save_profile(Some(&profile)).unwrap();
    drop(local);

    let mut local = open(&dir);
    assert_eq!(local.load_profile(), Some(profile));

    local.save_profile(None).unwrap();
    assert_eq!(local.load_profile(), None);
}

#[test]
fn test_corrupt_file_contents_fail_soft() {
    let dir = tempfile::tempdir().unwrap();
    let local = open(&dir);
    local.inner().set(PROJECTS_KEY, "\u{0}garbage").unwrap();
    assert!(local.load_projects().is_empty());
}
