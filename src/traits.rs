//! Storage abstraction for the ledger

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::types::*;

/// Storage capability the ledger components are built over.
///
/// Implementations supply owner-scoped persistence for accounts and
/// transactions; any backend (PostgreSQL, SQLite, in-memory, etc.) works by
/// implementing these methods. Three contracts live in the store rather
/// than in callers:
///
/// - [`insert_account`](LedgerStore::insert_account) enforces
///   `(owner, name, account_type)` uniqueness atomically; the loser of a
///   racing pair observes [`LedgerError::DuplicateAccount`].
/// - [`insert_transaction`](LedgerStore::insert_transaction) persists the
///   header and all postings as one record; a transaction is never
///   observable half-written.
/// - Reads are owner-scoped inside the store, so rows belonging to another
///   owner never cross this boundary.
///
/// Accounts and transactions are insert-only; committed records are
/// immutable.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Insert a new account, enforcing per-owner name/type uniqueness
    async fn insert_account(&self, account: &Account) -> LedgerResult<()>;

    /// Get an owner's account by id
    async fn get_account(
        &self,
        owner: OwnerId,
        account_id: AccountId,
    ) -> LedgerResult<Option<Account>>;

    /// List an owner's accounts ordered by name ascending, optionally
    /// filtered by type
    async fn list_accounts(
        &self,
        owner: OwnerId,
        account_type: Option<AccountType>,
    ) -> LedgerResult<Vec<Account>>;

    /// Insert a committed transaction as one atomic record
    async fn insert_transaction(&self, transaction: &Transaction) -> LedgerResult<()>;

    /// Get an owner's transaction by id
    async fn get_transaction(
        &self,
        owner: OwnerId,
        transaction_id: TransactionId,
    ) -> LedgerResult<Option<Transaction>>;

    /// List an owner's transactions, most recent business date first;
    /// insertion order breaks ties
    async fn list_transactions(&self, owner: OwnerId) -> LedgerResult<Vec<Transaction>>;

    /// Transactions carrying at least one posting on the given account,
    /// optionally cut off at a business date (inclusive)
    async fn get_account_transactions(
        &self,
        owner: OwnerId,
        account_id: AccountId,
        as_of: Option<NaiveDate>,
    ) -> LedgerResult<Vec<Transaction>>;
}
