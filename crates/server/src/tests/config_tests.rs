use super::{load_settings_from, normalize_api_prefix, normalize_database_url, Settings};

use std::{
    collections::HashMap,
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_apply_without_file_or_env() {
    let settings = load_settings_from(None, env_from(&[]));
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.server_bind, "0.0.0.0:3001");
    assert_eq!(settings.api_prefix, "/api");
}

#[test]
fn file_values_override_defaults() {
    let file = r#"
        bind_addr = "127.0.0.1:4000"
        database_url = "sqlite://./custom.db"
        api_prefix = "v1/"
    "#;
    let settings = load_settings_from(Some(file), env_from(&[]));
    assert_eq!(settings.server_bind, "127.0.0.1:4000");
    assert_eq!(settings.database_url, "sqlite://./custom.db");
    assert_eq!(settings.api_prefix, "/v1");
}

#[test]
fn prefixed_env_wins_over_short_env_and_file() {
    let file = r#"bind_addr = "127.0.0.1:4000""#;
    let settings = load_settings_from(
        Some(file),
        env_from(&[
            ("SERVER_BIND", "127.0.0.1:5000"),
            ("APP__BIND_ADDR", "127.0.0.1:6000"),
            ("DATABASE_URL", "sqlite://short.db"),
        ]),
    );
    assert_eq!(settings.server_bind, "127.0.0.1:6000");
    assert_eq!(settings.database_url, "sqlite://short.db");
}

#[test]
fn malformed_file_is_ignored() {
    let settings = load_settings_from(Some("bind_addr = ["), env_from(&[]));
    assert_eq!(settings, Settings::default());
}

#[test]
fn empty_api_prefix_mounts_at_root() {
    assert_eq!(normalize_api_prefix(""), "");
    assert_eq!(normalize_api_prefix("/"), "");
    assert_eq!(normalize_api_prefix("/api"), "/api");
    assert_eq!(normalize_api_prefix("api"), "/api");
}

#[test]
fn normalizes_plain_file_path_to_sqlite_url() {
    assert_eq!(
        normalize_database_url("./data/test.db"),
        "sqlite://./data/test.db"
    );
}

#[test]
fn empty_database_url_falls_back_to_default() {
    assert_eq!(normalize_database_url("  "), Settings::default().database_url);
}

#[test]
fn keeps_windows_absolute_path_with_single_sqlite_colon() {
    assert_eq!(
        normalize_database_url("sqlite:C:\\Users\\alice\\test.db"),
        "sqlite:C:/Users/alice/test.db"
    );
}

#[test]
fn normalizes_windows_plain_path_with_single_sqlite_colon() {
    assert_eq!(
        normalize_database_url("C:\\Users\\alice\\test.db"),
        "sqlite:C:/Users/alice/test.db"
    );
}

#[test]
fn converts_sqlite_double_slash_windows_path() {
    assert_eq!(
        normalize_database_url("sqlite://C:/Users/alice/test.db"),
        "sqlite:C:/Users/alice/test.db"
    );
}

#[tokio::test]
async fn normalized_plain_path_opens_sqlite_in_new_directory() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();

    let temp_root = env::temp_dir().join(format!("terms_server_open_test_{suffix}"));
    let db_path = temp_root.join("nested").join("server.db");

    let database_url = normalize_database_url(db_path.to_string_lossy().as_ref());
    let storage = storage::Storage::new(&database_url)
        .await
        .expect("open sqlite");
    storage.close().await;
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should be created: {}",
        db_path.display()
    );

    fs::remove_dir_all(temp_root).expect("cleanup");
}
