use water_tracker::{ensure_db, StoreError, WaterStore, DEFAULT_WEIGHT_LBS};

#[test]
fn bootstrap_insert_and_summarize_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("water.db");

    assert!(ensure_db(&db_path).expect("first ensure"));
    assert!(!ensure_db(&db_path).expect("second ensure"));

    let store = WaterStore::open(&db_path);
    let event = store.insert_drink(8.0).expect("insert drink");
    assert!(event.id > 0);

    let summary = store
        .last_24h_summary()
        .expect("summary")
        .expect("summary row");
    assert!((summary.total_ounces_last_24_hours - 8.0).abs() < 1e-9);
    assert!((summary.weight - DEFAULT_WEIGHT_LBS).abs() < 1e-9);
    assert!((summary.target_ounces - DEFAULT_WEIGHT_LBS / 2.0).abs() < 1e-9);
    assert!((summary.percent_of_target - 10.0).abs() < 1e-9);

    let daily = store.list_daily_totals(10).expect("daily totals");
    assert_eq!(daily.len(), 1);
    assert!((daily[0].total - 8.0).abs() < 1e-9);

    let rolling = store.list_rolling_window(10).expect("rolling window");
    assert_eq!(rolling.len(), 1);
    assert!((rolling[0].rolling_24h_ounces - 8.0).abs() < 1e-9);

    store.delete_event(event.id).expect("delete");
    assert!(store.list_recent_events(10).expect("events").is_empty());
}

#[test]
fn validation_errors_surface_before_any_write() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("water.db");
    ensure_db(&db_path).expect("ensure");

    let store = WaterStore::open(&db_path);
    let error = store.insert_drink(-1.0).expect_err("rejected volume");
    assert!(matches!(error, StoreError::InvalidVolume(_)));
    assert!(error.to_string().starts_with("INVALID_VOLUME"));

    assert!(store.list_recent_events(10).expect("events").is_empty());
}

#[test]
fn store_in_missing_directory_is_created_on_demand() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("nested").join("data").join("water.db");

    assert!(ensure_db(&db_path).expect("ensure"));
    let store = WaterStore::open(&db_path);
    store.insert_drink(8.0).expect("insert drink");
    assert_eq!(store.list_recent_events(10).expect("events").len(), 1);
}
