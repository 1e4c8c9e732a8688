//! Directory-backed store: one checksummed JSON file per key.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::PathBuf;

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use super::io_utils::{classify_io_error, retry_io_operation};
use super::KeyValueStore;
use crate::config::LabelConfig;
use crate::error::LabelError;

const ENVELOPE_VERSION: u32 = 1;

/// On-disk wrapper around a stored value.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    version: u32,
    checksum: u32,
    payload: String,
}

fn checksum(payload: &str) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(payload.as_bytes());
    hasher.finalize()
}

/// Store writing `<data_dir>/<key>.json` atomically.
#[derive(Debug)]
pub struct FileStore {
    /// Data directory path
    data_dir: PathBuf,
    /// Maximum retry attempts for transient I/O errors
    max_retries: u32,
    /// Delay between retry attempts in milliseconds
    retry_delay_ms: u64,
}

impl FileStore {
    pub fn new(config: &LabelConfig) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
            max_retries: config.persistence_max_retries,
            retry_delay_ms: config.persistence_retry_delay_ms,
        }
    }

    /// File holding `key`. Characters outside `[A-Za-z0-9_.-]` become `_`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_stem: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.data_dir.join(format!("{}.json", file_stem))
    }

    fn set_internal(&self, key: &str, value: &str) -> Result<(), LabelError> {
        let envelope = Envelope {
            version: ENVELOPE_VERSION,
            checksum: checksum(value),
            payload: value.to_string(),
        };
        let json = serde_json::to_string_pretty(&envelope)
            .map_err(|e| LabelError::SerializationError(e.to_string()))?;

        let final_path = self.path_for(key);
        let temp_path = final_path.with_extension("json.tmp");

        fs::create_dir_all(&self.data_dir)
            .map_err(|e| classify_io_error(e, "Failed to create data directory"))?;

        let mut file = File::create(&temp_path)
            .map_err(|e| classify_io_error(e, "Failed to create temp file"))?;
        file.write_all(json.as_bytes())
            .map_err(|e| classify_io_error(e, "Failed to write value"))?;
        file.sync_all()
            .map_err(|e| classify_io_error(e, "Failed to sync value"))?;

        fs::rename(&temp_path, &final_path)
            .map_err(|e| classify_io_error(e, "Failed to rename value file"))?;

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, LabelError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let mut file =
            File::open(&path).map_err(|e| classify_io_error(e, "Failed to open value file"))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| classify_io_error(e, "Failed to read value file"))?;

        let envelope: Envelope = serde_json::from_str(&contents).map_err(|e| {
            LabelError::DataCorruption(format!("Unreadable envelope for '{}': {}", key, e))
        })?;

        if envelope.version != ENVELOPE_VERSION {
            return Err(LabelError::SerializationError(format!(
                "Unsupported envelope version: {}",
                envelope.version
            )));
        }

        let actual = checksum(&envelope.payload);
        if actual != envelope.checksum {
            return Err(LabelError::DataCorruption(format!(
                "Checksum mismatch for '{}': expected {:08x}, got {:08x}",
                key, envelope.checksum, actual
            )));
        }

        Ok(Some(envelope.payload))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), LabelError> {
        retry_io_operation(
            || self.set_internal(key, value),
            self.max_retries,
            self.retry_delay_ms,
            "store set",
        )
    }
}
