//! Ledger module containing account management, transaction recording,
//! and balance derivation

pub mod balance;
pub mod core;
pub mod engine;
pub mod registry;

pub use balance::*;
pub use core::*;
pub use engine::*;
pub use registry::*;
