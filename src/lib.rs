//! # Ledger Core
//!
//! A multi-tenant double-entry bookkeeping library with balanced
//! transaction validation and derived account balances.
//!
//! ## Features
//!
//! - **Double-entry bookkeeping**: Every transaction must balance debits against credits exactly
//! - **Account management**: Asset, Liability, Equity, Revenue, and Expense accounts with contra support
//! - **Owner isolation**: Every operation is scoped to an owner; foreign rows are invisible
//! - **Derived balances**: Balances are folded from posting history, never stored
//! - **Fixed-point money**: Integer minor units keep arithmetic exact
//! - **Storage abstraction**: Database-agnostic design with trait-based storage
//!
//! ## Quick Start
//!
//! ```rust
//! use ledger_core::{Ledger, MemoryStore, NewAccount, AccountType, OwnerId, Amount};
//! use ledger_core::patterns;
//! use chrono::NaiveDate;
//!
//! // let ledger = Ledger::new(MemoryStore::new());
//! // let owner = OwnerId::new();
//! // let chart = ledger.create_starter_chart(owner).await?;
//! ```

pub mod ledger;
pub mod money;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use ledger::*;
pub use money::*;
pub use traits::*;
pub use types::*;
pub use utils::MemoryStore;

// Re-export transaction patterns for convenience
pub use ledger::engine::patterns;
