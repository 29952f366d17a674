use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::domain::Entry;

use super::{ENTRIES_KEY, MIGRATION_001_KV_STORE};

/// Durable key-value store backed by a single SQLite table.
///
/// The ledger keeps its whole entry list as one JSON document under
/// [`ENTRIES_KEY`]; every save rewrites that document.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations. Safe to run on every start.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_KV_STORE)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Initialize a database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    /// Close the connection pool. Later reads and writes fail.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    // ========================
    // Key-value primitives
    // ========================

    /// Read the raw value stored under `key`.
    pub async fn get_value(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Failed to read key {}", key))?;

        Ok(row.map(|row| row.get("value")))
    }

    /// Overwrite the value stored under `key` in a single statement.
    pub async fn put_value(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to write key {}", key))?;
        Ok(())
    }

    // ========================
    // Entry list
    // ========================

    /// Read the stored entry list, in stored order.
    ///
    /// Never fails: missing data, a read error or an undecodable document all
    /// yield an empty list. Errors are logged.
    pub async fn load_entries(&self) -> Vec<Entry> {
        match self.try_load_entries().await {
            Ok(entries) => {
                log::debug!("Loaded {} entries from storage", entries.len());
                entries
            }
            Err(err) => {
                log::warn!("Could not load entries, starting empty: {:#}", err);
                Vec::new()
            }
        }
    }

    async fn try_load_entries(&self) -> Result<Vec<Entry>> {
        let Some(raw) = self.get_value(ENTRIES_KEY).await? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).context("Stored entries are not a valid entry list")
    }

    /// Serialize the full entry list and overwrite the stored copy.
    pub async fn save_entries(&self, entries: &[Entry]) -> Result<()> {
        let json = serde_json::to_string(entries).context("Failed to serialize entries")?;
        self.put_value(ENTRIES_KEY, &json).await?;
        log::debug!("Saved {} entries to storage", entries.len());
        Ok(())
    }
}
