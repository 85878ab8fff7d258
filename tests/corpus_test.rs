//! Corpus-based tests
//!
//! Exercises the reader against the checked-in tree under `tests/corpus/tree`,
//! which has name collisions at several depths and one file of every
//! decoded format.
//!
//! Test categories:
//! - Collision resolution (depth, lexicographic tie-breaks, scopes)
//! - Decoding by extension
//! - Bootstrap config kinds


use std::sync::Arc;

use test_helpers::*;
use treeconf::{ConfKind, Content, FileConfigReader, ReaderCache, ReaderOptions, Table};

// ==================== Collision Resolution ====================

#[test]
fn test_root_level_settings_win_unscoped() {
    let reader = corpus_reader();
    let settings = reader.find("settings.json", None).unwrap();
    assert_eq!(settings.as_json().unwrap()["service"], "top");
}

#[test]
fn test_scoped_settings() {
    let reader = corpus_reader();

    let api = reader.find("settings.json", Some("services/api")).unwrap();
    assert_eq!(api.as_json().unwrap()["port"], 8080);

    // services/api sorts before services/billing at equal depth
    let first_service = reader.find("settings.json", Some("services")).unwrap();
    assert_eq!(first_service.as_json().unwrap()["service"], "api");

    let billing = reader.find("billing/settings.json", Some("services")).unwrap();
    assert_eq!(billing.as_json().unwrap()["service"], "billing");
}

#[test]
fn test_shallower_database_conf_wins() {
    let reader = corpus_reader();

    let shared = reader.find("database.conf", None).unwrap();
    assert_eq!(shared.as_key_value().unwrap()["host"], "db.shared.internal");

    let billing = reader.find("database.conf", Some("services")).unwrap();
    let billing = billing.as_key_value().unwrap();
    assert_eq!(billing["host"], "db.billing.internal");
    assert_eq!(
        billing["dsn"],
        "postgres://billing@db.billing.internal/billing?sslmode=require"
    );
}

#[test]
fn test_equal_depth_tie_break() {
    let reader = corpus_reader();
    let readme = reader.find("README.txt", None).unwrap();
    assert_eq!(readme.as_text(), Some("Corpus tree used by the integration tests.\n"));

    let shared = reader.find("README.txt", Some("shared")).unwrap();
    assert_eq!(shared.as_text(), Some("Shared fixtures.\n"));
}

#[test]
fn test_locate_returns_absolute_path() {
    let reader = corpus_reader();
    let path = reader.locate("schema.sql", None).unwrap();
    assert!(path.is_absolute());
    assert!(path.ends_with("services/billing/db/schema.sql"));
}

// ==================== Decoding ====================

#[test]
fn test_schema_statements() {
    let reader = corpus_reader();
    let schema = reader.find("schema.sql", None).unwrap();
    assert_eq!(
        schema,
        Content::Sql(vec![
            "CREATE TABLE invoices ( id INTEGER PRIMARY KEY, amount INTEGER NOT NULL );".into(),
            "INSERT INTO invoices VALUES (1, 100);".into(),
        ])
    );
}

#[test]
fn test_semicolon_csv_detected() {
    let reader = corpus_reader();
    let users = reader.find("users.csv", None).unwrap();
    match users.as_table().unwrap() {
        Table::Records { columns, records } => {
            assert_eq!(columns, &["id", "name", "email"]);
            assert_eq!(records.len(), 2);
            assert_eq!(records[0]["email"], "ada@example.com");
        }
        other => panic!("expected records, got {:?}", other),
    }
}

#[test]
fn test_index_covers_whole_corpus() {
    let reader = corpus_reader();
    let tree = reader.tree();
    assert_eq!(tree.file_count(), 9);
    assert_eq!(tree.candidates("settings.json").unwrap().len(), 3);
    assert_eq!(
        tree.candidates("database.conf").unwrap(),
        &["shared/database.conf", "services/billing/db/database.conf"]
    );
}

// ==================== Bootstrap Kinds ====================

#[test]
fn test_json_bootstrap_matches_key_value_bootstrap() {
    let options = ReaderOptions {
        kind: ConfKind::Json,
        required_keys: vec!["owner".into(), "retries".into()],
        force_refresh: false,
    };
    let json_reader =
        FileConfigReader::with_cache(Arc::new(ReaderCache::new()), CORPUS_JSON, options).unwrap();
    let kv_reader = corpus_reader();

    assert_eq!(json_reader.root(), kv_reader.root());
    assert_eq!(json_reader.tree(), kv_reader.tree());
    assert_eq!(json_reader.config().get_str("owner"), Some("corpus"));
}
