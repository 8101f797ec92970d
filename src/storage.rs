//! Key/value persistence over SQLite, modelled on browser local storage.
//!
//! Values cross the boundary as JSON. A store that cannot be opened puts
//! the adapter into a degraded mode where every operation is a no-op
//! returning a failure indicator; callers never see an error. A stored
//! value that no longer parses is treated as absent.

use rusqlite::{Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub struct Storage {
    conn: Option<Mutex<Connection>>,
}

impl Storage {
    pub fn open(path: &Path) -> Self {
        match Self::try_open(path) {
            Ok(conn) => Self {
                conn: Some(Mutex::new(conn)),
            },
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "durable store unavailable, falling back to session-only state"
                );
                Self { conn: None }
            }
        }
    }

    /// Adapter with no durable store behind it
    pub fn unavailable() -> Self {
        Self { conn: None }
    }

    pub fn is_available(&self) -> bool {
        self.conn.is_some()
    }

    fn try_open(path: &Path) -> anyhow::Result<Connection> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS app_state (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;
        Ok(conn)
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> bool {
        let Some(conn) = &self.conn else { return false };
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to serialize value");
                return false;
            }
        };
        let conn = conn.lock().unwrap();
        match conn.execute(
            "INSERT OR REPLACE INTO app_state (key, value) VALUES (?1, ?2)",
            rusqlite::params![key, json],
        ) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to persist value");
                false
            }
        }
    }

    /// Returns the default when the key is absent, the store is
    /// unavailable or the stored value fails to parse.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let Some(conn) = &self.conn else {
            return default;
        };
        let stored: Option<String> = {
            let conn = conn.lock().unwrap();
            conn.query_row("SELECT value FROM app_state WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
            .unwrap_or_else(|e| {
                tracing::warn!(key, error = %e, "failed to read value");
                None
            })
        };
        match stored {
            Some(json) => serde_json::from_str(&json).unwrap_or(default),
            None => default,
        }
    }

    pub fn remove(&self, key: &str) -> bool {
        let Some(conn) = &self.conn else { return false };
        let conn = conn.lock().unwrap();
        match conn.execute("DELETE FROM app_state WHERE key = ?1", [key]) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to remove value");
                false
            }
        }
    }
}

/// Default settings database location under the platform data directory
pub fn default_storage_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wird")
        .join("settings.db")
}
