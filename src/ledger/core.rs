//! Unified ledger facade

use chrono::NaiveDate;

use crate::ledger::balance::BalanceCalculator;
use crate::ledger::engine::LedgerEngine;
use crate::ledger::registry::{create_starter_chart, AccountRegistry};
use crate::money::Amount;
use crate::traits::LedgerStore;
use crate::types::*;
use std::collections::HashMap;

/// One entry point over accounts, transactions, and balances.
///
/// The facade wires an [`AccountRegistry`], a [`LedgerEngine`], and a
/// [`BalanceCalculator`] over clones of the same store, so every
/// component observes the same data.
pub struct Ledger<S: LedgerStore> {
    accounts: AccountRegistry<S>,
    engine: LedgerEngine<S>,
    balances: BalanceCalculator<S>,
}

impl<S: LedgerStore + Clone> Ledger<S> {
    /// Build a ledger over the given store
    pub fn new(store: S) -> Self {
        Self {
            accounts: AccountRegistry::new(store.clone()),
            engine: LedgerEngine::new(store.clone()),
            balances: BalanceCalculator::new(store),
        }
    }
}

impl<S: LedgerStore> Ledger<S> {
    /// Open an account for the owner
    pub async fn create_account(
        &self,
        owner: OwnerId,
        draft: NewAccount,
    ) -> LedgerResult<Account> {
        self.accounts.create(owner, draft).await
    }

    /// Fetch one of the owner's accounts
    pub async fn get_account(
        &self,
        owner: OwnerId,
        account_id: AccountId,
    ) -> LedgerResult<Account> {
        self.accounts.get(owner, account_id).await
    }

    /// List the owner's accounts, name ascending
    pub async fn list_accounts(&self, owner: OwnerId) -> LedgerResult<Vec<Account>> {
        self.accounts.list(owner).await
    }

    /// List the owner's accounts of one type
    pub async fn list_accounts_by_type(
        &self,
        owner: OwnerId,
        account_type: AccountType,
    ) -> LedgerResult<Vec<Account>> {
        self.accounts.list_by_type(owner, account_type).await
    }

    /// Seed a personal-finance starter chart for the owner
    pub async fn create_starter_chart(
        &self,
        owner: OwnerId,
    ) -> LedgerResult<HashMap<String, Account>> {
        create_starter_chart(&self.accounts, owner).await
    }

    /// Record a balanced transaction for the owner
    pub async fn create_transaction(
        &self,
        owner: OwnerId,
        draft: NewTransaction,
    ) -> LedgerResult<Transaction> {
        self.engine.create_transaction(owner, draft).await
    }

    /// List the owner's transactions with account details, newest first
    pub async fn list_transactions(&self, owner: OwnerId) -> LedgerResult<Vec<TransactionDetail>> {
        self.engine.list_transactions(owner).await
    }

    /// Fetch one of the owner's transactions with account details
    pub async fn get_transaction(
        &self,
        owner: OwnerId,
        transaction_id: TransactionId,
    ) -> LedgerResult<TransactionDetail> {
        self.engine.get_transaction(owner, transaction_id).await
    }

    /// Current balance of one of the owner's accounts
    pub async fn balance_of(
        &self,
        owner: OwnerId,
        account_id: AccountId,
        as_of: Option<NaiveDate>,
    ) -> LedgerResult<Amount> {
        self.balances.balance_of(owner, account_id, as_of).await
    }
}
