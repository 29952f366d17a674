use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::{Cents, MAX_AMOUNT_CENTS, ParseCentsError, format_cents, parse_cents};

/// Opaque entry identifier.
///
/// New ids are time-ordered UUIDv7 strings. Ids loaded from storage are kept
/// verbatim, whatever shape they have.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for EntryId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for EntryId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Money coming in (salary, refunds, gifts)
    Income,
    /// Money going out (rent, groceries, bills)
    #[default]
    Expense,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(EntryKind::Income),
            "expense" => Some(EntryKind::Expense),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single recorded income or expense.
/// Entries are immutable once created; the only way to change one is to delete it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    #[serde(rename = "type", alias = "kind")]
    pub kind: EntryKind,
    /// Amount in cents (always positive)
    #[serde(rename = "amount", with = "super::money::amount_serde")]
    pub amount_cents: Cents,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// When the entry was recorded
    #[serde(rename = "date", alias = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Entry {
    /// Create a new entry with a fresh id, stamped with the current time.
    /// Callers go through [`EntryDraft::into_entry`], which validates first.
    fn new(kind: EntryKind, amount_cents: Cents, category: String, note: Option<String>) -> Self {
        debug_assert!(amount_cents > 0, "Entry amount must be positive");
        Self {
            id: EntryId::new(),
            kind,
            amount_cents,
            category,
            note,
            created_at: Utc::now(),
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == EntryKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == EntryKind::Expense
    }

    /// Check the invariants every stored entry must hold.
    pub fn check(&self) -> Result<(), ValidationError> {
        if self.amount_cents <= 0 {
            return Err(ValidationError::NonPositiveAmount);
        }
        if self.amount_cents > MAX_AMOUNT_CENTS {
            return Err(ValidationError::InvalidAmount(format_cents(self.amount_cents)));
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        Ok(())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("amount is required")]
    MissingAmount,

    #[error("amount is not a valid number or is too large: {0:?}")]
    InvalidAmount(String),

    #[error("amount must be greater than zero")]
    NonPositiveAmount,

    #[error("category is required")]
    MissingCategory,
}

/// Unvalidated entry input, as collected from a form or the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDraft {
    pub kind: EntryKind,
    /// Raw amount text, e.g. "12.50"
    pub amount: String,
    pub category: String,
    pub note: Option<String>,
}

impl EntryDraft {
    pub fn new(kind: EntryKind, amount: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            kind,
            amount: amount.into(),
            category: category.into(),
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Parse and check the amount without consuming the draft.
    pub fn amount_cents(&self) -> Result<Cents, ValidationError> {
        let raw = self.amount.trim();
        if raw.is_empty() {
            return Err(ValidationError::MissingAmount);
        }

        let cents = parse_cents(raw).map_err(|e| match e {
            ParseCentsError::InvalidFormat | ParseCentsError::Overflow => {
                ValidationError::InvalidAmount(raw.to_string())
            }
        })?;

        if cents <= 0 {
            return Err(ValidationError::NonPositiveAmount);
        }
        if cents > MAX_AMOUNT_CENTS {
            return Err(ValidationError::InvalidAmount(raw.to_string()));
        }
        Ok(cents)
    }

    /// Validate the draft and turn it into an entry with a fresh id and timestamp.
    pub fn into_entry(self) -> Result<Entry, ValidationError> {
        let amount_cents = self.amount_cents()?;

        let category = self.category.trim();
        if category.is_empty() {
            return Err(ValidationError::MissingCategory);
        }

        let note = self
            .note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        Ok(Entry::new(self.kind, amount_cents, category.to_string(), note))
    }
}
