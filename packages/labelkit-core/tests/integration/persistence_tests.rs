//! Persistence of templates and selection through the file store.

use std::fs;
use std::sync::Arc;

use ntest::timeout;
use tempfile::tempdir;

use labelkit_core::config::LabelConfig;
use labelkit_core::geometry::{GeometryEdit, GeometrySource};
use labelkit_core::persistence::{FileStore, KeyValueStore};
use labelkit_core::{LabelError, Session};

use super::helpers::koha_catalog;

fn open(config: &LabelConfig) -> Session {
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(config));
    Session::open(config.clone(), store).unwrap()
}

#[timeout(2000)]
#[test]
fn test_templates_and_selection_survive_restart() {
    let temp_dir = tempdir().unwrap();
    let config = LabelConfig {
        data_dir: temp_dir.path().to_path_buf(),
        ..Default::default()
    };

    {
        let mut session = open(&config);
        session.ingest(koha_catalog()).unwrap();
        session.select_by_location("Yetişkin").unwrap();
        session.edit_geometry(GeometryEdit::LabelWidth(50.0)).unwrap();
        session.save_template("Wide barcode").unwrap();
    }

    let mut session = open(&config);
    assert_eq!(session.selection().len(), 2);
    assert!(session.print_list().is_empty());

    session.apply_template("Wide barcode").unwrap();
    assert_eq!(session.geometry().model().label_width, 50.0);
    assert_eq!(
        session.geometry().source(),
        &GeometrySource::Template("Wide barcode".to_string())
    );

    // Re-ingesting clears the persisted selection too
    session.ingest(koha_catalog()).unwrap();
    assert!(open(&config).selection().is_empty());
}

#[timeout(2000)]
#[test]
fn test_corrupt_store_files_start_empty() {
    let temp_dir = tempdir().unwrap();
    let config = LabelConfig {
        data_dir: temp_dir.path().to_path_buf(),
        ..Default::default()
    };
    let store = FileStore::new(&config);
    store
        .set(&config.selection_key(), r#"["111000000072"]"#)
        .unwrap();
    fs::write(store.path_for(&config.templates_key()), "{ broken").unwrap();

    let path = store.path_for(&config.selection_key());
    let tampered = fs::read_to_string(&path)
        .unwrap()
        .replace("111000000072", "111000000073");
    fs::write(&path, tampered).unwrap();

    let session = open(&config);
    assert!(session.selection().is_empty());
    assert_eq!(session.templates().custom_count(), 0);
}

#[timeout(2000)]
#[test]
fn test_blank_template_name_writes_nothing() {
    let temp_dir = tempdir().unwrap();
    let config = LabelConfig {
        data_dir: temp_dir.path().to_path_buf(),
        ..Default::default()
    };
    let mut session = open(&config);

    assert_eq!(session.save_template("  "), Err(LabelError::BlankName));
    assert!(!FileStore::new(&config)
        .path_for(&config.templates_key())
        .exists());
}
