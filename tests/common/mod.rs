// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::path::PathBuf;

use anyhow::Result;
use budget_tracker::Repository;
use budget_tracker::application::LedgerService;
use budget_tracker::domain::{EntryDraft, EntryKind};
use tempfile::TempDir;

/// Path of the test database inside the temp dir
pub fn db_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("test.db")
}

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let service = open_service(&temp_dir).await?;
    Ok((service, temp_dir))
}

/// Open (or reopen) the service on the temp dir's database
pub async fn open_service(temp_dir: &TempDir) -> Result<LedgerService> {
    let path = db_path(temp_dir);
    Ok(LedgerService::open(path.to_str().unwrap()).await?)
}

/// Open a bare repository on the temp dir's database
pub async fn open_repository(temp_dir: &TempDir) -> Result<Repository> {
    let url = format!("sqlite:{}?mode=rwc", db_path(temp_dir).display());
    Repository::init(&url).await
}

pub fn income(amount: &str, category: &str) -> EntryDraft {
    EntryDraft::new(EntryKind::Income, amount, category)
}

pub fn expense(amount: &str, category: &str) -> EntryDraft {
    EntryDraft::new(EntryKind::Expense, amount, category)
}
