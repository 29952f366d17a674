// Application layer: the in-memory ledger and its persistence policy.
// Clients (the CLI today) talk to `LedgerService` only.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
