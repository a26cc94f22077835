//! # Intent Store Adapters
//!
//! The reconnect-intent flag survives restarts within one profile; nothing
//! else does. Two adapters: in-memory for tests, JSON file for real use.

use crate::ports::IntentStore;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Volatile store for tests and agent-less embeddings.
#[derive(Default)]
pub struct MemoryIntentStore {
    connected: AtomicBool,
}

impl MemoryIntentStore {
    /// Store starting from "never connected".
    pub fn new() -> Self {
        Self::default()
    }
}

impl IntentStore for MemoryIntentStore {
    fn get(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn set(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }
}

#[derive(Serialize, Deserialize, Default)]
struct IntentRecord {
    connected: bool,
}

/// File-backed store; the flag lives in a tiny JSON document.
pub struct JsonFileIntentStore {
    path: PathBuf,
}

impl JsonFileIntentStore {
    /// Store backed by `path`. The file is created on first `set`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl IntentStore for JsonFileIntentStore {
    fn get(&self) -> bool {
        let Ok(raw) = std::fs::read_to_string(&self.path) else {
            return false;
        };
        serde_json::from_str::<IntentRecord>(&raw)
            .map(|record| record.connected)
            .unwrap_or(false)
    }

    fn set(&self, connected: bool) {
        let record = IntentRecord { connected };
        let Ok(raw) = serde_json::to_string(&record) else {
            return;
        };
        if let Err(error) = std::fs::write(&self.path, raw) {
            tracing::warn!(%error, path = %self.path.display(), "intent flag not persisted");
        }
    }
}
