//! Persistent key/value items, mirroring the browser `localStorage` API

use chrono::Utc;
use rusqlite::OptionalExtension;

use crate::database::Database;
use crate::Result;

/// Key the bearer token is stored under.
pub const TOKEN_KEY: &str = "token";

pub struct LocalStorage {
    db: Database,
}

impl LocalStorage {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.db.with_connection(|conn| {
            let value = conn
                .query_row(
                    "SELECT value FROM local_storage WHERE key = ?1",
                    [key],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(value)
        })
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();
        self.db.with_connection(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO local_storage (key, value, updated_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![key, value, updated_at],
            )?;
            Ok(())
        })?;

        tracing::debug!(key = %key, "Stored local item");

        Ok(())
    }

    pub fn remove_item(&self, key: &str) -> Result<()> {
        self.db.with_connection(|conn| {
            conn.execute("DELETE FROM local_storage WHERE key = ?1", [key])?;
            Ok(())
        })?;

        tracing::debug!(key = %key, "Removed local item");

        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        self.db.with_connection(|conn| {
            conn.execute("DELETE FROM local_storage", [])?;
            Ok(())
        })
    }
}

impl Clone for LocalStorage {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}
