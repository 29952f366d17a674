mod repository;

pub use repository::*;

/// SQL migration for the key-value table
pub const MIGRATION_001_KV_STORE: &str = include_str!("migrations/001_kv_store.sql");

/// Key the entry list is stored under
pub const ENTRIES_KEY: &str = "@entries";
