//! Repository Integration Tests
//!
//! Tests for the JSON stores against temporary directories.

#[cfg(test)]
mod tests {
    use crate::domain::{
        AppSettings, DomainError, ImportError, MediaType, ProgressChange, ProgressMap,
        ProgressRecord, WindowResizer,
    };
    use crate::repository::backup::create_backup;
    use crate::repository::{JsonProgressRepository, ProgressRepository, SettingsStore};
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::TempDir;

    fn setup_repo() -> (TempDir, JsonProgressRepository) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let repo = JsonProgressRepository::new(dir.path().join("tv_show_progress.json"));
        (dir, repo)
    }

    fn tv(major: i64, minor: i64) -> ProgressRecord {
        ProgressRecord::new(major, minor, String::new(), MediaType::TvShow)
    }

    #[tokio::test]
    async fn test_load_creates_empty_store() {
        let (_dir, repo) = setup_repo();

        let map = repo.load().await;
        assert!(map.is_empty());
        assert_eq!(std::fs::read_to_string(repo.path()).unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_load_is_idempotent() {
        let (_dir, repo) = setup_repo();
        repo.upsert("Foo", tv(1, 5)).await.unwrap();
        repo.upsert("Bar", tv(2, 1)).await.unwrap();

        assert_eq!(repo.load().await, repo.load().await);
    }

    #[tokio::test]
    async fn test_corrupt_store_loads_empty() {
        let (_dir, repo) = setup_repo();
        std::fs::write(repo.path(), "{ not json").unwrap();

        assert!(repo.load().await.is_empty());
        // Writers refuse to clobber a store they cannot read
        assert!(repo.upsert("Foo", tv(1, 1)).await.is_err());
        assert_eq!(std::fs::read_to_string(repo.path()).unwrap(), "{ not json");
    }

    #[tokio::test]
    async fn test_unreadable_entry_is_skipped_and_blocks_writes() {
        let (_dir, repo) = setup_repo();
        let original = r#"{"Good":{"Season":3,"Episode":4},"Legacy":{"Season":"2","Episode":1}}"#;
        std::fs::write(repo.path(), original).unwrap();

        let map = repo.load().await;
        assert_eq!(map.titles().collect::<Vec<_>>(), vec!["Good"]);

        let err = repo.upsert("New", tv(1, 1)).await.unwrap_err();
        assert!(matches!(err, DomainError::Corrupted(_)));
        assert!(err.to_string().contains("entry 'Legacy'"));
        assert!(err.to_string().ends_with("Import a backup to restore it."));
        assert!(matches!(repo.remove("Good").await, Err(DomainError::Corrupted(_))));
        assert_eq!(std::fs::read_to_string(repo.path()).unwrap(), original);
    }

    #[tokio::test]
    async fn test_save_to_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonProgressRepository::new(dir.path().to_path_buf());

        let err = repo.save(&ProgressMap::new()).await.unwrap_err();
        assert!(matches!(err, DomainError::Io(_)));
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let (_dir, repo) = setup_repo();
        repo.upsert("Foo", ProgressRecord::new(1, 5, "good".into(), MediaType::Comic))
            .await
            .unwrap();
        repo.upsert("Bar", tv(2, 1)).await.unwrap();
        let before = std::fs::read_to_string(repo.path()).unwrap();

        let map = repo.load().await;
        repo.save(&map).await.expect("Save failed");

        assert_eq!(std::fs::read_to_string(repo.path()).unwrap(), before);
    }

    #[tokio::test]
    async fn test_store_file_format() {
        let (_dir, repo) = setup_repo();
        repo.upsert("Foo", ProgressRecord::new(1, 5, "note".into(), MediaType::Book))
            .await
            .unwrap();

        let text = std::fs::read_to_string(repo.path()).unwrap();
        let expected = "{\n  \"Foo\": {\n    \"Season\": 1,\n    \"Episode\": 5,\n    \"Notes\": \"note\",\n    \"MediaType\": \"book\"\n  }\n}";
        assert_eq!(text, expected);
    }

    #[tokio::test]
    async fn test_upsert_new_record() {
        let (_dir, repo) = setup_repo();

        let update = repo.upsert("Foo", tv(1, 5)).await.expect("Upsert failed");
        assert_eq!(update.change, ProgressChange::New);
        let message = update.message();
        assert!(message.contains("🆕"));
        assert!(message.contains("Updated progress for 'Foo' - Season 1, Episode 5"));

        let map = repo.load().await;
        assert_eq!(map.get("Foo"), Some(&tv(1, 5)));
    }

    #[tokio::test]
    async fn test_upsert_direction_markers() {
        let (_dir, repo) = setup_repo();
        repo.upsert("Foo", tv(1, 5)).await.unwrap();

        let forward = repo.upsert("Foo", tv(1, 6)).await.unwrap();
        assert_eq!(forward.change, ProgressChange::Forward);
        assert!(forward.message().starts_with("⏩"));

        let backward = repo.upsert("Foo", tv(1, 2)).await.unwrap();
        assert_eq!(backward.change, ProgressChange::Backward);
        assert!(backward.message().starts_with("⏪"));

        let same = repo.upsert("Foo", tv(1, 2)).await.unwrap();
        assert_eq!(same.change, ProgressChange::Same);
        assert!(same.message().starts_with("📺"));

        let next_season = repo.upsert("Foo", tv(2, 1)).await.unwrap();
        assert_eq!(next_season.change, ProgressChange::Forward);
    }

    #[tokio::test]
    async fn test_upsert_overwrites_all_fields() {
        let (_dir, repo) = setup_repo();
        repo.upsert("Foo", ProgressRecord::new(1, 5, "old".into(), MediaType::TvShow))
            .await
            .unwrap();
        repo.upsert("Foo", ProgressRecord::new(3, 1, String::new(), MediaType::Book))
            .await
            .unwrap();

        let map = repo.load().await;
        assert_eq!(map.len(), 1);
        assert_eq!(
            map.get("Foo"),
            Some(&ProgressRecord::new(3, 1, String::new(), MediaType::Book))
        );
    }

    #[tokio::test]
    async fn test_upsert_rejects_blank_title() {
        let (_dir, repo) = setup_repo();
        assert!(repo.upsert("   ", tv(1, 1)).await.is_err());
        assert!(repo.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_legacy_records_load_as_tv_show() {
        let (_dir, repo) = setup_repo();
        std::fs::write(
            repo.path(),
            r#"{"Old Show": {"Season": 4, "Episode": 2}, "Older": {"Season": 1, "Episode": 1, "Notes": "x"}}"#,
        )
        .unwrap();

        let map = repo.load().await;
        let old = map.get("Old Show").unwrap();
        assert_eq!(old.media_type, MediaType::TvShow);
        assert_eq!(old.notes, "");
        assert_eq!(map.titles().collect::<Vec<_>>(), vec!["Old Show", "Older"]);
    }

    #[tokio::test]
    async fn test_remove_existing_title() {
        let (_dir, repo) = setup_repo();
        repo.upsert("Foo", tv(1, 5)).await.unwrap();
        repo.upsert("Bar", tv(1, 1)).await.unwrap();

        let removed = repo.remove("Foo").await.expect("Remove failed");
        assert_eq!(removed, tv(1, 5));

        let map = repo.load().await;
        assert!(!map.contains("Foo"));
        assert!(map.contains("Bar"));
    }

    #[tokio::test]
    async fn test_remove_absent_title_leaves_store() {
        let (_dir, repo) = setup_repo();
        repo.upsert("Foo", tv(1, 5)).await.unwrap();
        let before = std::fs::read_to_string(repo.path()).unwrap();

        assert!(repo.remove("foo").await.is_err());
        assert_eq!(std::fs::read_to_string(repo.path()).unwrap(), before);
    }

    #[tokio::test]
    async fn test_backup_is_verbatim_copy() {
        let (dir, repo) = setup_repo();
        repo.upsert("Foo", tv(1, 5)).await.unwrap();

        let file = repo.backup().await.expect("Backup failed");
        assert_eq!(file.parent(), Some(dir.path()));
        let name = file.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("tv_show_progress_backup_"));
        assert!(name.ends_with(".json"));
        assert!(!name.contains(':'));
        assert_eq!(
            std::fs::read(&file).unwrap(),
            std::fs::read(repo.path()).unwrap()
        );
    }

    #[tokio::test]
    async fn test_backup_without_store_fails() {
        let (_dir, repo) = setup_repo();
        assert!(repo.backup().await.is_err());
    }

    #[tokio::test]
    async fn test_backups_in_same_second_do_not_overwrite() {
        let (_dir, repo) = setup_repo();
        repo.upsert("Foo", tv(1, 5)).await.unwrap();
        let instant = chrono::Utc::now();

        let first = create_backup(repo.path(), instant).await.unwrap();
        repo.upsert("Foo", tv(9, 9)).await.unwrap();
        let second = create_backup(repo.path(), instant).await.unwrap();

        assert_ne!(first, second);
        assert!(second.to_str().unwrap().ends_with("_1.json"));
        assert!(std::fs::read_to_string(&first).unwrap().contains("\"Season\": 1"));
        assert!(std::fs::read_to_string(&second).unwrap().contains("\"Season\": 9"));
    }

    #[tokio::test]
    async fn test_backup_then_import_restores() {
        let (_dir, repo) = setup_repo();
        repo.upsert("Foo", tv(1, 5)).await.unwrap();
        repo.upsert("Bar", tv(2, 2)).await.unwrap();
        let snapshot = repo.load().await;
        let backup = repo.backup().await.unwrap();

        repo.upsert("Foo", tv(3, 3)).await.unwrap();
        repo.remove("Bar").await.unwrap();
        repo.upsert("Baz", tv(1, 1)).await.unwrap();

        let summary = repo.import_from(&backup).await.expect("Import failed");
        assert_eq!(summary.entries, 2);
        assert_ne!(summary.safety_backup, backup);
        assert_eq!(repo.load().await, snapshot);

        // The safety backup holds the state just before the import
        let safety = std::fs::read_to_string(&summary.safety_backup).unwrap();
        assert!(safety.contains("Baz"));
    }

    #[tokio::test]
    async fn test_import_array_is_rejected() {
        let (dir, repo) = setup_repo();
        repo.upsert("Foo", tv(1, 5)).await.unwrap();
        let before = std::fs::read_to_string(repo.path()).unwrap();

        let payload: PathBuf = dir.path().join("array.json");
        std::fs::write(&payload, "[1, 2, 3]").unwrap();

        let err = repo.import_from(&payload).await.unwrap_err();
        assert_eq!(err, ImportError::InvalidFormat(None));
        assert_eq!(err.to_string(), "Invalid backup file format!");
        assert_eq!(std::fs::read_to_string(repo.path()).unwrap(), before);
    }

    #[tokio::test]
    async fn test_import_malformed_record_is_rejected() {
        let (dir, repo) = setup_repo();
        repo.upsert("Foo", tv(1, 5)).await.unwrap();
        let before = std::fs::read_to_string(repo.path()).unwrap();

        let payload = dir.path().join("bad.json");
        std::fs::write(&payload, r#"{"Good": {"Season": 1, "Episode": 1}, "Bad": {"Episode": 2}}"#)
            .unwrap();

        match repo.import_from(&payload).await {
            Err(ImportError::InvalidFormat(Some(detail))) => assert!(detail.contains("'Bad'")),
            other => panic!("expected invalid format, got {:?}", other),
        }
        assert_eq!(std::fs::read_to_string(repo.path()).unwrap(), before);
    }

    #[tokio::test]
    async fn test_import_unreadable_file() {
        let (dir, repo) = setup_repo();
        repo.load().await;

        let err = repo
            .import_from(&dir.path().join("missing.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, ImportError::Read(_)));
        assert!(err.to_string().starts_with("Error importing backup:"));
    }

    #[tokio::test]
    async fn test_import_on_first_run() {
        let (dir, repo) = setup_repo();
        let payload = dir.path().join("export.json");
        std::fs::write(&payload, r#"{"Saga": {"Season": 10, "Episode": 3, "MediaType": "comic"}}"#)
            .unwrap();

        let summary = repo.import_from(&payload).await.expect("Import failed");
        assert_eq!(summary.entries, 1);
        assert_eq!(repo.load().await.get("Saga").unwrap().media_type, MediaType::Comic);
    }

    #[tokio::test]
    async fn test_import_fails_without_safety_backup() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("tv_show_progress.json");
        std::fs::create_dir(&store).unwrap();
        let repo = JsonProgressRepository::new(store.clone());

        let payload = dir.path().join("export.json");
        std::fs::write(&payload, r#"{"Foo": {"Season": 1, "Episode": 1}}"#).unwrap();

        let err = repo.import_from(&payload).await.unwrap_err();
        assert!(matches!(err, ImportError::SafetyBackup(_)));
        assert_eq!(err.to_string(), "Failed to create safety backup before import.");
        assert!(store.is_dir());
    }

    // ========================
    // Settings
    // ========================

    #[derive(Default)]
    struct RecordingWindow {
        sizes: Mutex<Vec<(u32, u32)>>,
        fail: bool,
    }

    impl WindowResizer for RecordingWindow {
        fn resize(&self, width: u32, height: u32) -> Result<(), String> {
            if self.fail {
                return Err("window is gone".to_string());
            }
            self.sizes.lock().unwrap().push((width, height));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_settings_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_settings.json");

        let store = SettingsStore::open(path.clone()).await;
        assert_eq!(store.current().await, AppSettings::default());

        let on_disk: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, serde_json::json!({"minimalMode": false}));
    }

    #[tokio::test]
    async fn test_corrupt_settings_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_settings.json");
        std::fs::write(&path, "minimal please").unwrap();

        let store = SettingsStore::open(path).await;
        assert!(!store.current().await.minimal_mode);
    }

    #[tokio::test]
    async fn test_settings_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_settings.json");

        let store = SettingsStore::open(path.clone()).await;
        store.save(AppSettings { minimal_mode: true }).await;

        let reopened = SettingsStore::open(path).await;
        assert!(reopened.load().await.minimal_mode);
    }

    #[tokio::test]
    async fn test_set_minimal_mode_persists_and_resizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_settings.json");
        let store = SettingsStore::open(path.clone()).await;
        let window = RecordingWindow::default();

        let updated = store.set_minimal_mode(true, &window).await.expect("Toggle failed");
        assert!(updated.minimal_mode);
        assert!(store.current().await.minimal_mode);
        assert!(std::fs::read_to_string(&path).unwrap().contains("\"minimalMode\": true"));

        store.set_minimal_mode(false, &window).await.unwrap();
        assert_eq!(*window.sizes.lock().unwrap(), vec![(420, 640), (1000, 800)]);
    }

    #[tokio::test]
    async fn test_set_minimal_mode_reports_resize_failure() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::open(dir.path().join("app_settings.json")).await;
        let window = RecordingWindow {
            fail: true,
            ..Default::default()
        };

        let err = store.set_minimal_mode(true, &window).await.unwrap_err();
        assert!(err.to_string().contains("window is gone"));
    }

    #[tokio::test]
    async fn test_set_minimal_mode_persist_failure_keeps_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_settings.json");
        std::fs::create_dir(&path).unwrap();
        let store = SettingsStore::open(path).await;
        let window = RecordingWindow::default();

        assert!(store.set_minimal_mode(true, &window).await.is_err());
        assert!(!store.current().await.minimal_mode);
        assert!(window.sizes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_current_survives_settings_file_loss() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_settings.json");
        let store = SettingsStore::open(path.clone()).await;
        store
            .set_minimal_mode(true, &RecordingWindow::default())
            .await
            .unwrap();

        std::fs::remove_file(&path).unwrap();
        assert!(store.current().await.minimal_mode);
    }

    #[tokio::test]
    async fn test_overlapping_toggles_leave_window_matching_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_settings.json");
        let store = SettingsStore::open(path.clone()).await;
        let window = RecordingWindow::default();

        let (first, second) = tokio::join!(
            store.set_minimal_mode(true, &window),
            store.set_minimal_mode(false, &window)
        );
        first.unwrap();
        second.unwrap();

        let current = store.current().await;
        let last = *window.sizes.lock().unwrap().last().unwrap();
        assert_eq!(last, current.window_preset().size());

        let on_disk: AppSettings =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, current);
    }
}
