//! In-memory storage implementation for testing and development

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::traits::*;
use crate::types::*;

/// In-memory [`LedgerStore`] backing tests, demos, and development.
///
/// Clones share the underlying maps, so one store can serve several
/// components at once. The uniqueness and atomicity contracts of the trait
/// hold because every insert runs inside a single write-lock section.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
    transactions: Arc<RwLock<Vec<Transaction>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all data (useful between tests)
    pub fn clear(&self) -> LedgerResult<()> {
        self.write_accounts()?.clear();
        self.write_transactions()?.clear();
        Ok(())
    }

    fn read_accounts(&self) -> LedgerResult<RwLockReadGuard<'_, HashMap<AccountId, Account>>> {
        self.accounts
            .read()
            .map_err(|_| LedgerError::Storage("account store lock poisoned".to_string()))
    }

    fn write_accounts(&self) -> LedgerResult<RwLockWriteGuard<'_, HashMap<AccountId, Account>>> {
        self.accounts
            .write()
            .map_err(|_| LedgerError::Storage("account store lock poisoned".to_string()))
    }

    fn read_transactions(&self) -> LedgerResult<RwLockReadGuard<'_, Vec<Transaction>>> {
        self.transactions
            .read()
            .map_err(|_| LedgerError::Storage("transaction store lock poisoned".to_string()))
    }

    fn write_transactions(&self) -> LedgerResult<RwLockWriteGuard<'_, Vec<Transaction>>> {
        self.transactions
            .write()
            .map_err(|_| LedgerError::Storage("transaction store lock poisoned".to_string()))
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn insert_account(&self, account: &Account) -> LedgerResult<()> {
        // Uniqueness check and insert under one write lock.
        let mut accounts = self.write_accounts()?;
        let clash = accounts.values().any(|existing| {
            existing.owner == account.owner
                && existing.account_type == account.account_type
                && existing.name == account.name
        });
        if clash {
            return Err(LedgerError::DuplicateAccount {
                name: account.name.clone(),
                account_type: account.account_type,
            });
        }
        accounts.insert(account.id, account.clone());
        Ok(())
    }

    async fn get_account(
        &self,
        owner: OwnerId,
        account_id: AccountId,
    ) -> LedgerResult<Option<Account>> {
        let accounts = self.read_accounts()?;
        Ok(accounts
            .get(&account_id)
            .filter(|account| account.owner == owner)
            .cloned())
    }

    async fn list_accounts(
        &self,
        owner: OwnerId,
        account_type: Option<AccountType>,
    ) -> LedgerResult<Vec<Account>> {
        let accounts = self.read_accounts()?;
        let mut filtered: Vec<Account> = accounts
            .values()
            .filter(|account| account.owner == owner)
            .filter(|account| account_type.is_none_or(|t| account.account_type == t))
            .cloned()
            .collect();
        filtered.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(filtered)
    }

    async fn insert_transaction(&self, transaction: &Transaction) -> LedgerResult<()> {
        self.write_transactions()?.push(transaction.clone());
        Ok(())
    }

    async fn get_transaction(
        &self,
        owner: OwnerId,
        transaction_id: TransactionId,
    ) -> LedgerResult<Option<Transaction>> {
        let transactions = self.read_transactions()?;
        Ok(transactions
            .iter()
            .find(|txn| txn.id == transaction_id && txn.owner == owner)
            .cloned())
    }

    async fn list_transactions(&self, owner: OwnerId) -> LedgerResult<Vec<Transaction>> {
        let transactions = self.read_transactions()?;
        let mut owned: Vec<Transaction> = transactions
            .iter()
            .filter(|txn| txn.owner == owner)
            .cloned()
            .collect();
        // Newest business date first; the stable sort keeps insertion order
        // within one date.
        owned.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(owned)
    }

    async fn get_account_transactions(
        &self,
        owner: OwnerId,
        account_id: AccountId,
        as_of: Option<NaiveDate>,
    ) -> LedgerResult<Vec<Transaction>> {
        let transactions = self.read_transactions()?;
        let filtered: Vec<Transaction> = transactions
            .iter()
            .filter(|txn| txn.owner == owner)
            .filter(|txn| txn.entries.iter().any(|entry| entry.account_id == account_id))
            .filter(|txn| as_of.is_none_or(|cutoff| txn.date <= cutoff))
            .cloned()
            .collect();
        Ok(filtered)
    }
}
