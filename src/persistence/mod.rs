//! JSON file persistence
//!
//! Features:
//! - Typed load/save through serde
//! - Atomic replace (write `*.tmp`, then rename over the target)
//! - Parent directories created on save
//!
//! Callers decide how to degrade: settings and high scores both fall back to
//! defaults rather than surfacing these errors to the game.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors from reading or writing a persisted JSON file
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed json in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl PersistError {
    /// True when the file simply does not exist yet
    pub fn is_not_found(&self) -> bool {
        matches!(self, PersistError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }

    fn io(path: &Path, source: io::Error) -> Self {
        PersistError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn json(path: &Path, source: serde_json::Error) -> Self {
        PersistError::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Read and deserialize a JSON file
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, PersistError> {
    let json = fs::read_to_string(path).map_err(|e| PersistError::io(path, e))?;
    serde_json::from_str(&json).map_err(|e| PersistError::json(path, e))
}

/// Serialize to pretty JSON and atomically replace `path`
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| PersistError::io(dir, e))?;
    }

    let json = serde_json::to_string_pretty(value).map_err(|e| PersistError::json(path, e))?;

    let tmp = tmp_path(path);
    fs::write(&tmp, json).map_err(|e| PersistError::io(&tmp, e))?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(PersistError::io(path, e));
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
