use crate::domain::{
    Entry, EntryDraft, EntryId, EntryKind, Totals, compute_totals, sanitize_entries,
};
use crate::storage::Repository;

use super::AppError;

/// Application service owning the ledger.
/// This is the primary interface for any client (CLI, API, TUI, etc.).
///
/// The in-memory entry list is the authoritative copy; the repository only
/// mirrors it. Every mutation rewrites the stored copy before returning.
pub struct LedgerService {
    repo: Repository,
    /// Newest first
    entries: Vec<Entry>,
}

impl LedgerService {
    /// Build the service on an open repository, loading whatever it holds.
    pub async fn load(repo: Repository) -> Self {
        let stored = repo.load_entries().await;
        let (entries, rejected) = sanitize_entries(stored);
        for dropped in &rejected {
            log::warn!("Skipping stored entry {}: {}", dropped.entry.id, dropped.reason);
        }
        log::debug!("Ledger loaded with {} entries", entries.len());

        Self { repo, entries }
    }

    /// Open the ledger at the given path, creating the database if needed.
    pub async fn open(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::load(repo).await)
    }

    /// Release the underlying store. The in-memory ledger keeps working but
    /// nothing is persisted afterwards.
    pub async fn close(&self) {
        self.repo.close().await;
    }

    // ========================
    // Mutations
    // ========================

    /// Validate and record a new entry at the head of the ledger.
    ///
    /// On a validation error the ledger is left untouched.
    pub async fn add_entry(&mut self, draft: EntryDraft) -> Result<Entry, AppError> {
        let entry = draft.into_entry()?;

        self.entries.insert(0, entry.clone());
        log::info!(
            "Added {} entry {} ({} cents, {})",
            entry.kind,
            entry.id,
            entry.amount_cents,
            entry.category
        );

        self.persist().await;
        Ok(entry)
    }

    /// Remove the entry with the given id.
    ///
    /// Returns the removed entry, or `None` when no entry matched; deleting an
    /// unknown id is a no-op and does not touch storage.
    pub async fn delete_entry(&mut self, id: &EntryId) -> Option<Entry> {
        let Some(index) = self.entries.iter().position(|e| &e.id == id) else {
            log::debug!("Delete of unknown entry {} ignored", id);
            return None;
        };

        let removed = self.entries.remove(index);
        log::info!("Deleted entry {}", removed.id);

        self.persist().await;
        Some(removed)
    }

    /// Best-effort write of the full list; failures are logged, not returned.
    async fn persist(&self) {
        if let Err(err) = self.repo.save_entries(&self.entries).await {
            log::warn!("Could not persist ledger, changes are kept in memory only: {:#}", err);
        }
    }

    // ========================
    // Queries
    // ========================

    /// All entries, newest first.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entries of one kind, newest first.
    pub fn entries_of_kind(&self, kind: EntryKind) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    pub fn get_entry(&self, id: &EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Income, expense and balance over the current ledger.
    pub fn compute_totals(&self) -> Totals {
        compute_totals(&self.entries)
    }
}
