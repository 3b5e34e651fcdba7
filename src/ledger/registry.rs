//! Chart-of-accounts management

use std::collections::HashMap;
use tracing::debug;

use crate::traits::*;
use crate::types::*;
use crate::utils::validation;

/// Owner-scoped chart-of-accounts operations over a [`LedgerStore`]
pub struct AccountRegistry<S: LedgerStore> {
    store: S,
}

impl<S: LedgerStore> AccountRegistry<S> {
    /// Create a registry over the given store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create a new account for the owner.
    ///
    /// The name is trimmed and `(owner, name, account_type)` must be
    /// unique; the store enforces that atomically, so the loser of a
    /// concurrent duplicate observes [`LedgerError::DuplicateAccount`].
    pub async fn create(&self, owner: OwnerId, new_account: NewAccount) -> LedgerResult<Account> {
        let name = validation::validate_account_name(&new_account.name)?;
        let now = chrono::Utc::now().naive_utc();
        let account = Account {
            id: AccountId::new(),
            owner,
            name,
            account_type: new_account.account_type,
            sub_type: validation::optional_trimmed(new_account.sub_type),
            description: validation::optional_trimmed(new_account.description),
            initial_balance: new_account.initial_balance,
            is_contra: new_account.is_contra,
            created_at: now,
            updated_at: now,
        };

        self.store.insert_account(&account).await?;
        debug!(owner = %owner, account = %account.id, name = %account.name, "account created");
        Ok(account)
    }

    /// Get an owner's account by id.
    ///
    /// An account belonging to another owner produces the same
    /// [`LedgerError::AccountNotFound`] as one that does not exist.
    pub async fn get(&self, owner: OwnerId, account_id: AccountId) -> LedgerResult<Account> {
        self.store
            .get_account(owner, account_id)
            .await?
            .ok_or(LedgerError::AccountNotFound(account_id))
    }

    /// List the owner's accounts, ordered by name
    pub async fn list(&self, owner: OwnerId) -> LedgerResult<Vec<Account>> {
        self.store.list_accounts(owner, None).await
    }

    /// List the owner's accounts of one classification, ordered by name
    pub async fn list_by_type(
        &self,
        owner: OwnerId,
        account_type: AccountType,
    ) -> LedgerResult<Vec<Account>> {
        self.store.list_accounts(owner, Some(account_type)).await
    }
}

/// Seed a small personal chart of accounts, returned keyed by a short slug.
///
/// Covers every account type plus one contra asset; handy for demos and
/// tests.
pub async fn create_starter_chart<S: LedgerStore>(
    registry: &AccountRegistry<S>,
    owner: OwnerId,
) -> LedgerResult<HashMap<String, Account>> {
    let seeds: Vec<(&str, NewAccount)> = vec![
        ("cash", NewAccount::new("Cash", AccountType::Asset)),
        (
            "savings",
            NewAccount {
                sub_type: Some("Savings".to_string()),
                ..NewAccount::new("Savings Account", AccountType::Asset)
            },
        ),
        ("equipment", NewAccount::new("Equipment", AccountType::Asset)),
        (
            "accumulated_depreciation",
            NewAccount {
                is_contra: true,
                ..NewAccount::new("Accumulated Depreciation", AccountType::Asset)
            },
        ),
        (
            "credit_card",
            NewAccount {
                sub_type: Some("Credit Card".to_string()),
                ..NewAccount::new("Credit Card", AccountType::Liability)
            },
        ),
        (
            "opening_equity",
            NewAccount::new("Opening Balance Equity", AccountType::Equity),
        ),
        ("salary", NewAccount::new("Salary Income", AccountType::Revenue)),
        ("rent", NewAccount::new("Rent Expense", AccountType::Expense)),
        (
            "groceries",
            NewAccount::new("Groceries Expense", AccountType::Expense),
        ),
    ];

    let mut chart = HashMap::new();
    for (slug, seed) in seeds {
        let account = registry.create(owner, seed).await?;
        chart.insert(slug.to_string(), account);
    }
    Ok(chart)
}
