//! Generic JSON persistence helpers for ~/.speed_tapper/ save files.

use crate::core::constants::SAVE_DIR_NAME;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("could not determine home directory")]
    NoHomeDir,
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl PersistenceError {
    fn io(path: &Path, source: io::Error) -> Self {
        PersistenceError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn json(path: &Path, source: serde_json::Error) -> Self {
        PersistenceError::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Get the ~/.speed_tapper/ directory path. Does not create it.
pub fn save_dir() -> Result<PathBuf, PersistenceError> {
    let home_dir = dirs::home_dir().ok_or(PersistenceError::NoHomeDir)?;
    Ok(home_dir.join(SAVE_DIR_NAME))
}

/// Get the full path for a save file in ~/.speed_tapper/.
pub fn save_path(filename: &str) -> Result<PathBuf, PersistenceError> {
    Ok(save_dir()?.join(filename))
}

/// Read and parse a JSON file. A missing file is `Ok(None)`.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, PersistenceError> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(PersistenceError::io(path, e)),
    };
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|e| PersistenceError::json(path, e))
}

/// Write a value as pretty-printed JSON, creating parent directories.
///
/// Writes to a sibling temp file first and renames it over the target so a
/// crash mid-write leaves the previous save intact.
pub fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| PersistenceError::io(parent, e))?;
    }
    let json = serde_json::to_string_pretty(data).map_err(|e| PersistenceError::json(path, e))?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(|e| PersistenceError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| PersistenceError::io(path, e))?;
    Ok(())
}

/// Read a JSON object onto `T::default()` one field at a time.
///
/// A field that does not fit its type keeps the default, except that a
/// numeric string is accepted as the number. Anything other than an object
/// yields `T::default()`.
pub fn from_value_lenient<T>(value: &Value) -> T
where
    T: Default + Serialize + DeserializeOwned,
{
    let Value::Object(fields) = value else {
        if !value.is_null() {
            tracing::debug!("expected an object, found {}", value);
        }
        return T::default();
    };
    let mut merged = match serde_json::to_value(T::default()) {
        Ok(Value::Object(defaults)) => defaults,
        _ => return T::default(),
    };

    for (key, field) in fields {
        let previous = merged.insert(key.clone(), field.clone());
        if fits::<T>(&merged) {
            continue;
        }
        if let Some(number) = numeric_string(field) {
            merged.insert(key.clone(), number);
            if fits::<T>(&merged) {
                continue;
            }
        }
        tracing::debug!("ignoring saved field {}: {}", key, field);
        match previous {
            Some(default) => merged.insert(key.clone(), default),
            None => merged.remove(key),
        };
    }

    serde_json::from_value(Value::Object(merged)).unwrap_or_default()
}

fn fits<T: DeserializeOwned>(fields: &Map<String, Value>) -> bool {
    serde_json::from_value::<T>(Value::Object(fields.clone())).is_ok()
}

fn numeric_string(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) => s.trim().parse::<u64>().ok().map(Value::from),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) fn test_dir(label: &str) -> PathBuf {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!(
        "speed_tapper_test_{}_{}_{}",
        label,
        std::process::id(),
        n
    ))
}
