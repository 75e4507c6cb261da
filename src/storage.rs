use std::{
    collections::HashMap,
    fs,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use anyhow::{Context, Result};
use log::{error, warn};
use serde_json::Value;

/// Durable key-value storage for named JSON blobs. Reads yield `None` on
/// missing or corrupt data; writes are best-effort and failures are only
/// logged, so the core keeps working without persistence.
pub trait Storage: Send + Sync {
    fn load(&self, key: &str) -> Option<Value>;
    fn save(&self, key: &str, value: &Value);
}

pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create data directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for JsonFileStorage {
    fn load(&self, key: &str) -> Option<Value> {
        let path = self.path_for(key);
        if !path.exists() {
            return None;
        }
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) => {
                error!("Failed to read {}: {err}", path.display());
                return None;
            }
        };
        match serde_json::from_str(&contents) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("Discarding corrupt blob {}: {err}", path.display());
                None
            }
        }
    }

    fn save(&self, key: &str, value: &Value) {
        let path = self.path_for(key);
        let serialized = match serde_json::to_string_pretty(value) {
            Ok(serialized) => serialized,
            Err(err) => {
                error!("Failed to serialize blob '{key}': {err}");
                return;
            }
        };
        if let Err(err) = fs::write(&path, serialized) {
            error!("Failed to write {}: {err}", path.display());
        }
    }
}

// Clones share the same blobs, so a test can hand one to a store and keep
// the other to inspect or reload from.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    blobs: Arc<Mutex<HashMap<String, Value>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, key: &str, value: Value) {
        self.blobs.lock().unwrap().insert(key.to_string(), value);
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Option<Value> {
        self.blobs.lock().unwrap().get(key).cloned()
    }

    fn save(&self, key: &str, value: &Value) {
        self.blobs.lock().unwrap().insert(key.to_string(), value.clone());
    }
}
