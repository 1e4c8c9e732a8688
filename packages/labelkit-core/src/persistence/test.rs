//! Tests for the store implementations.

use std::fs;

use ntest::timeout;
use tempfile::tempdir;

use crate::config::LabelConfig;
use crate::error::LabelError;
use crate::persistence::{load_json, FileStore, KeyValueStore, MemoryStore};

fn file_store(dir: &std::path::Path) -> FileStore {
    FileStore::new(&LabelConfig {
        data_dir: dir.to_path_buf(),
        persistence_retry_delay_ms: 0,
        ..Default::default()
    })
}

#[test]
fn test_memory_store_get_set() {
    let store = MemoryStore::new();
    assert_eq!(store.get("k").unwrap(), None);
    store.set("k", "v1").unwrap();
    store.set("k", "v2").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
}

#[timeout(1000)]
#[test]
fn test_file_store_round_trip() {
    let temp_dir = tempdir().unwrap();
    let store = file_store(temp_dir.path());

    assert_eq!(store.get("labelkit_selectedBarcodes").unwrap(), None);
    store.set("labelkit_selectedBarcodes", r#"["001","002"]"#).unwrap();

    let path = temp_dir.path().join("labelkit_selectedBarcodes.json");
    assert!(path.exists());
    assert!(!temp_dir.path().join("labelkit_selectedBarcodes.json.tmp").exists());

    let reopened = file_store(temp_dir.path());
    assert_eq!(
        reopened.get("labelkit_selectedBarcodes").unwrap().as_deref(),
        Some(r#"["001","002"]"#)
    );
}

#[timeout(1000)]
#[test]
fn test_file_store_detects_tampering() {
    let temp_dir = tempdir().unwrap();
    let store = file_store(temp_dir.path());
    store.set("key", "original").unwrap();

    let path = store.path_for("key");
    let contents = fs::read_to_string(&path).unwrap();
    fs::write(&path, contents.replace("original", "tampered")).unwrap();

    assert!(matches!(store.get("key"), Err(LabelError::DataCorruption(_))));
}

#[timeout(1000)]
#[test]
fn test_file_store_rejects_garbage() {
    let temp_dir = tempdir().unwrap();
    let store = file_store(temp_dir.path());
    fs::write(store.path_for("key"), "not json").unwrap();

    assert!(matches!(store.get("key"), Err(LabelError::DataCorruption(_))));
}

#[test]
fn test_file_store_sanitizes_keys() {
    let temp_dir = tempdir().unwrap();
    let store = file_store(temp_dir.path());
    assert_eq!(
        store.path_for("../etc/passwd"),
        temp_dir.path().join(".._etc_passwd.json")
    );
}

#[test]
fn test_load_json_falls_back_on_bad_data() {
    let store = MemoryStore::new();
    assert_eq!(load_json::<Vec<String>>(&store, "missing"), None);

    store.set("bad", "{").unwrap();
    assert_eq!(load_json::<Vec<String>>(&store, "bad"), None);

    store.set("good", r#"["a"]"#).unwrap();
    assert_eq!(load_json::<Vec<String>>(&store, "good"), Some(vec!["a".to_string()]));
}
