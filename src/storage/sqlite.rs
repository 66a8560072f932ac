use super::KvStore;
use crate::utils::paths::{ensure_directories_exist, get_settings_db_path};
use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

/// Settings persisted in a single `settings(key, value)` table.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database at {path:?}"))?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Open the store at its default location under the home directory.
    pub fn open_default() -> Result<Self> {
        ensure_directories_exist()?;
        let path = get_settings_db_path()?;
        Self::open(&path)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    #[cfg(test)]
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM settings ORDER BY key ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut result = Vec::new();
        for key in rows {
            result.push(key?);
        }
        Ok(result)
    }
}

impl KvStore for SqliteStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("Failed to read setting '{key}'"))?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO settings (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .with_context(|| format!("Failed to write setting '{key}'"))?;
        Ok(())
    }

    fn clear_all(&mut self) -> Result<()> {
        self.conn
            .execute("DELETE FROM settings", [])
            .context("Failed to clear settings")?;
        Ok(())
    }
}
