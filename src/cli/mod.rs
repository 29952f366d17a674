use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use env_logger::Env;

use crate::application::{AppError, LedgerService};
use crate::domain::{Cents, Entry, EntryDraft, EntryId, EntryKind, format_cents};

/// Budget Tracker - record income and expenses, see where you stand
#[derive(Parser)]
#[command(name = "budget-tracker")]
#[command(about = "A local-first personal budget tracker")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "budget.db", global = true)]
    pub database: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Currency symbol used when printing amounts
    #[arg(long, default_value = "₹", global = true)]
    pub currency: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database (if needed) and show where it lives
    Init,

    /// Record an income or expense entry
    Add {
        /// Amount (e.g., "50.00" or "50")
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Category (e.g., "Rent", "Salary")
        #[arg(short, long, default_value = "")]
        category: String,

        /// Entry type: income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: String,

        /// Optional note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Delete an entry by id
    Delete {
        /// Entry ID
        id: String,
    },

    /// List entries, newest first
    List {
        /// Only show one type: income or expense
        #[arg(short = 't', long = "type")]
        kind: Option<String>,

        /// Maximum number of entries to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show income, expense and balance totals
    Summary,
}

impl Cli {
    /// Install the env_logger backend. `RUST_LOG` overrides the default filter.
    pub fn init_logging(&self) {
        let default_filter = if self.verbose {
            "budget_tracker=debug"
        } else {
            "budget_tracker=info"
        };
        // A second init (e.g. from tests) is harmless
        let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
            .try_init();
    }

    pub async fn run(self) -> Result<()> {
        let mut service = LedgerService::open(&self.database)
            .await
            .with_context(|| format!("Failed to open budget at {}", self.database))?;

        match self.command {
            Commands::Init => {
                println!("Budget ready at: {}", self.database);
                println!("  Entries: {}", service.len());
            }

            Commands::Add {
                amount,
                category,
                kind,
                note,
            } => {
                let kind = parse_kind(&kind)?;
                let mut draft = EntryDraft::new(kind, amount, category);
                if let Some(note) = note {
                    draft = draft.with_note(note);
                }

                match service.add_entry(draft).await {
                    Ok(entry) => {
                        println!(
                            "Added {}: {} ({})",
                            entry.kind,
                            money(&self.currency, entry.amount_cents),
                            entry.category
                        );
                        println!("  ID: {}", entry.id);
                    }
                    Err(AppError::Validation(err)) => {
                        bail!("Please fill amount & category: {}", err);
                    }
                    Err(err) => return Err(err.into()),
                }
            }

            Commands::Delete { id } => {
                let id = EntryId::from(id);
                match service.delete_entry(&id).await {
                    Some(entry) => println!(
                        "Deleted {}: {} ({})",
                        entry.kind,
                        money(&self.currency, entry.amount_cents),
                        entry.category
                    ),
                    None => println!("No entry with ID {}; nothing deleted.", id),
                }
            }

            Commands::List { kind, limit } => {
                let kind = kind.as_deref().map(parse_kind).transpose()?;
                let mut out = io::stdout().lock();
                run_list_command(&mut out, &service, &self.currency, kind, limit)?;
            }

            Commands::Summary => {
                let mut out = io::stdout().lock();
                run_summary_command(&mut out, &service, &self.currency)?;
            }
        }

        Ok(())
    }
}

fn parse_kind(kind: &str) -> Result<EntryKind> {
    EntryKind::parse(kind)
        .ok_or_else(|| anyhow::anyhow!("Invalid entry type: {}. Use income or expense", kind))
}

fn run_list_command<W: Write>(
    out: &mut W,
    service: &LedgerService,
    currency: &str,
    kind: Option<EntryKind>,
    limit: Option<usize>,
) -> io::Result<()> {
    let entries: Vec<&Entry> = match kind {
        Some(kind) => service.entries_of_kind(kind).collect(),
        None => service.entries().iter().collect(),
    };
    let limit = limit.unwrap_or(entries.len());

    if entries.is_empty() {
        return writeln!(out, "No entries yet");
    }

    writeln!(
        out,
        "{:<36} {:<10} {:<8} {:>14} {:<16} NOTE",
        "ID", "DATE", "TYPE", "AMOUNT", "CATEGORY"
    )?;
    writeln!(out, "{}", "-".repeat(100))?;
    for entry in entries.iter().take(limit) {
        let sign = if entry.is_income() { "+" } else { "-" };
        writeln!(
            out,
            "{:<36} {:<10} {:<8} {:>14} {:<16} {}",
            truncate(entry.id.as_str(), 36),
            entry.created_at.format("%Y-%m-%d"),
            entry.kind,
            format!("{}{}", sign, money(currency, entry.amount_cents)),
            truncate(&entry.category, 16),
            entry.note.as_deref().unwrap_or(""),
        )?;
    }
    Ok(())
}

fn run_summary_command<W: Write>(
    out: &mut W,
    service: &LedgerService,
    currency: &str,
) -> io::Result<()> {
    let totals = service.compute_totals();
    writeln!(out, "{:<10} {:>14}", "Income", money(currency, totals.income_cents))?;
    writeln!(out, "{:<10} {:>14}", "Expense", money(currency, totals.expense_cents))?;
    writeln!(out, "{}", "-".repeat(25))?;
    writeln!(out, "{:<10} {:>14}", "Balance", money(currency, totals.balance_cents))
}

/// Format cents with the currency symbol, sign first: "-₹300.00".
fn money(symbol: &str, cents: Cents) -> String {
    let formatted = format_cents(cents);
    match formatted.strip_prefix('-') {
        Some(magnitude) => format!("-{}{}", symbol, magnitude),
        None => format!("{}{}", symbol, formatted),
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
