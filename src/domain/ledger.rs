use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Cents, Entry};

/// Aggregate figures derived from the ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub income_cents: Cents,
    pub expense_cents: Cents,
    /// income - expense; may be negative
    pub balance_cents: Cents,
}

/// Compute income, expense and balance totals from a list of entries.
///
/// Sums saturate at the `Cents` bounds instead of overflowing.
pub fn compute_totals(entries: &[Entry]) -> Totals {
    let mut income_cents: Cents = 0;
    let mut expense_cents: Cents = 0;

    for entry in entries {
        if entry.is_income() {
            income_cents = income_cents.saturating_add(entry.amount_cents);
        } else {
            expense_cents = expense_cents.saturating_add(entry.amount_cents);
        }
    }

    Totals {
        income_cents,
        expense_cents,
        balance_cents: income_cents.saturating_sub(expense_cents),
    }
}

/// A stored record dropped while loading, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEntry {
    pub entry: Entry,
    pub reason: String,
}

/// Drop loaded entries that break the ledger invariants.
///
/// Entries with a non-positive or over-limit amount or an empty category are rejected, as is
/// any entry whose id was already seen earlier in the list. Empty notes are
/// normalized to `None`. Order is preserved.
pub fn sanitize_entries(entries: Vec<Entry>) -> (Vec<Entry>, Vec<RejectedEntry>) {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(entries.len());
    let mut rejected = Vec::new();

    for mut entry in entries {
        if let Err(err) = entry.check() {
            rejected.push(RejectedEntry {
                entry,
                reason: err.to_string(),
            });
            continue;
        }
        if !seen.insert(entry.id.clone()) {
            rejected.push(RejectedEntry {
                reason: format!("duplicate id {}", entry.id),
                entry,
            });
            continue;
        }
        if entry.note.as_deref().is_some_and(|n| n.trim().is_empty()) {
            entry.note = None;
        }
        kept.push(entry);
    }

    (kept, rejected)
}
