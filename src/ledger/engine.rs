//! Transaction recording and enriched reads

use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::debug;

use crate::money::Amount;
use crate::traits::*;
use crate::types::*;
use crate::utils::validation;

/// Records balanced transactions and serves owner-scoped reads over a
/// [`LedgerStore`].
///
/// Committed transactions are immutable; there is no update or delete.
/// A correction is a new transaction that offsets the original.
pub struct LedgerEngine<S: LedgerStore> {
    store: S,
}

impl<S: LedgerStore> LedgerEngine<S> {
    /// Create an engine over the given store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Record a balanced transaction for the owner.
    ///
    /// Validation runs in a fixed order and the first failure wins:
    /// overall shape, per-posting shape, account resolution under the
    /// owner, debit-XOR-credit per posting, then the exact balance check.
    /// Nothing persists unless every step passes; the commit stores the
    /// header and all postings as one record.
    pub async fn create_transaction(
        &self,
        owner: OwnerId,
        draft: NewTransaction,
    ) -> LedgerResult<Transaction> {
        let description = validate_shape(&draft)?;

        let mut accounts = Vec::with_capacity(draft.entries.len());
        for entry in &draft.entries {
            accounts.push(self.resolve_account(owner, entry.account_id).await?);
        }

        let NewTransaction {
            date,
            transaction_type,
            reference,
            entries,
            ..
        } = draft;
        let postings = normalize_postings(entries, &accounts)?;
        let (debits, _credits) = balanced_totals(&postings)?;

        let now = chrono::Utc::now().naive_utc();
        let transaction = Transaction {
            id: TransactionId::new(),
            owner,
            date,
            description,
            transaction_type: transaction_type.unwrap_or_default(),
            entries: postings,
            reference: validation::optional_trimmed(reference),
            created_at: now,
            updated_at: now,
        };

        self.store.insert_transaction(&transaction).await?;
        debug!(
            owner = %owner,
            transaction = %transaction.id,
            entries = transaction.entries.len(),
            total = %debits,
            "transaction committed"
        );
        Ok(transaction)
    }

    /// List the owner's transactions, newest business date first, with
    /// each posting joined to its account's name and type at read time
    pub async fn list_transactions(&self, owner: OwnerId) -> LedgerResult<Vec<TransactionDetail>> {
        let transactions = self.store.list_transactions(owner).await?;
        let accounts = self.account_index(owner).await?;
        transactions
            .into_iter()
            .map(|txn| enrich(txn, &accounts))
            .collect()
    }

    /// Fetch one of the owner's transactions with account details resolved
    pub async fn get_transaction(
        &self,
        owner: OwnerId,
        transaction_id: TransactionId,
    ) -> LedgerResult<TransactionDetail> {
        let transaction = self
            .store
            .get_transaction(owner, transaction_id)
            .await?
            .ok_or(LedgerError::TransactionNotFound(transaction_id))?;
        let accounts = self.account_index(owner).await?;
        enrich(transaction, &accounts)
    }

    async fn resolve_account(
        &self,
        owner: OwnerId,
        account_id: AccountId,
    ) -> LedgerResult<Account> {
        self.store
            .get_account(owner, account_id)
            .await?
            .ok_or(LedgerError::AccountNotFound(account_id))
    }

    async fn account_index(&self, owner: OwnerId) -> LedgerResult<HashMap<AccountId, Account>> {
        let accounts = self.store.list_accounts(owner, None).await?;
        Ok(accounts.into_iter().map(|a| (a.id, a)).collect())
    }
}

/// Check the draft's overall and per-posting shape, returning the trimmed
/// description. Runs before any account is resolved.
fn validate_shape(draft: &NewTransaction) -> LedgerResult<String> {
    let description = draft.description.trim();
    if description.is_empty() || draft.entries.len() < 2 {
        return Err(LedgerError::InvalidInput(
            "Date, description, and at least two entries are required for a transaction."
                .to_string(),
        ));
    }

    for entry in &draft.entries {
        let supplied = entry.debit.is_some() || entry.credit.is_some();
        let non_negative = entry.debit.is_none_or(|d| !d.is_negative())
            && entry.credit.is_none_or(|c| !c.is_negative());
        if !supplied || !non_negative {
            return Err(LedgerError::InvalidInput(
                "Each entry must have an accountId and non-negative debit/credit.".to_string(),
            ));
        }
    }

    Ok(description.to_string())
}

/// Default omitted sides to zero and enforce debit-XOR-credit per posting.
/// `accounts` holds the resolved account for each entry, in input order.
fn normalize_postings(entries: Vec<NewPosting>, accounts: &[Account]) -> LedgerResult<Vec<Posting>> {
    let mut postings = Vec::with_capacity(entries.len());
    for (entry, account) in entries.into_iter().zip(accounts) {
        let debit = entry.debit.unwrap_or(Amount::ZERO);
        let credit = entry.credit.unwrap_or(Amount::ZERO);
        if debit.is_positive() == credit.is_positive() {
            return Err(LedgerError::InvalidEntry {
                account: account.name.clone(),
            });
        }
        postings.push(Posting {
            account_id: entry.account_id,
            debit,
            credit,
            category: validation::optional_trimmed(entry.category),
        });
    }
    Ok(postings)
}

/// Sum both sides with overflow checks and require exact equality
fn balanced_totals(postings: &[Posting]) -> LedgerResult<(Amount, Amount)> {
    let mut debits = Amount::ZERO;
    let mut credits = Amount::ZERO;
    for posting in postings {
        debits = debits.checked_add(posting.debit).ok_or_else(overflow)?;
        credits = credits.checked_add(posting.credit).ok_or_else(overflow)?;
    }
    if debits != credits {
        return Err(LedgerError::UnbalancedTransaction { debits, credits });
    }
    Ok((debits, credits))
}

fn overflow() -> LedgerError {
    LedgerError::InvalidInput("Entry amounts exceed the representable range.".to_string())
}

fn enrich(
    transaction: Transaction,
    accounts: &HashMap<AccountId, Account>,
) -> LedgerResult<TransactionDetail> {
    let Transaction {
        id,
        owner,
        date,
        description,
        transaction_type,
        entries,
        reference,
        created_at,
        updated_at,
    } = transaction;

    let mut details = Vec::with_capacity(entries.len());
    for posting in entries {
        let account = accounts.get(&posting.account_id).ok_or_else(|| {
            LedgerError::Storage(format!(
                "transaction {} references missing account {}",
                id, posting.account_id
            ))
        })?;
        details.push(PostingDetail {
            account_id: posting.account_id,
            account_name: account.name.clone(),
            account_type: account.account_type,
            debit: posting.debit,
            credit: posting.credit,
            category: posting.category,
        });
    }

    Ok(TransactionDetail {
        id,
        owner,
        date,
        description,
        transaction_type,
        entries: details,
        reference,
        created_at,
        updated_at,
    })
}

/// Fluent assembly of a [`NewTransaction`] draft.
///
/// Building never fails; the engine validates the draft when it is
/// recorded.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    draft: NewTransaction,
}

impl TransactionBuilder {
    /// Start a draft for the given business date and description
    pub fn new(date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            draft: NewTransaction {
                date,
                description: description.into(),
                transaction_type: None,
                reference: None,
                entries: Vec::new(),
            },
        }
    }

    /// Classify the transaction
    pub fn transaction_type(mut self, transaction_type: TransactionType) -> Self {
        self.draft.transaction_type = Some(transaction_type);
        self
    }

    /// Set the external document reference
    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.draft.reference = Some(reference.into());
        self
    }

    /// Add a debit line
    pub fn debit(mut self, account_id: AccountId, amount: Amount) -> Self {
        self.draft.entries.push(NewPosting::debit(account_id, amount));
        self
    }

    /// Add a credit line
    pub fn credit(mut self, account_id: AccountId, amount: Amount) -> Self {
        self.draft.entries.push(NewPosting::credit(account_id, amount));
        self
    }

    /// Add a prepared line
    pub fn entry(mut self, entry: NewPosting) -> Self {
        self.draft.entries.push(entry);
        self
    }

    /// Finish the draft
    pub fn build(self) -> NewTransaction {
        self.draft
    }
}

/// Common transaction drafts
pub mod patterns {
    use super::*;

    /// Money spent: debit the expense account, credit the funding account
    pub fn expense(
        date: NaiveDate,
        description: impl Into<String>,
        expense_account: AccountId,
        funding_account: AccountId,
        amount: Amount,
    ) -> NewTransaction {
        TransactionBuilder::new(date, description)
            .transaction_type(TransactionType::Expense)
            .debit(expense_account, amount)
            .credit(funding_account, amount)
            .build()
    }

    /// Money earned: debit the deposit account, credit the revenue account
    pub fn income(
        date: NaiveDate,
        description: impl Into<String>,
        deposit_account: AccountId,
        revenue_account: AccountId,
        amount: Amount,
    ) -> NewTransaction {
        TransactionBuilder::new(date, description)
            .transaction_type(TransactionType::Income)
            .debit(deposit_account, amount)
            .credit(revenue_account, amount)
            .build()
    }

    /// Move money between two accounts of the owner
    pub fn transfer(
        date: NaiveDate,
        description: impl Into<String>,
        from_account: AccountId,
        to_account: AccountId,
        amount: Amount,
    ) -> NewTransaction {
        TransactionBuilder::new(date, description)
            .transaction_type(TransactionType::Transfer)
            .debit(to_account, amount)
            .credit(from_account, amount)
            .build()
    }

    /// Seed an account's opening balance against an equity account.
    ///
    /// The account is posted on its normal side, so the draft works for
    /// debit-normal and credit-normal (including contra) accounts alike.
    pub fn opening_balance(
        date: NaiveDate,
        account: &Account,
        equity_account: AccountId,
        amount: Amount,
    ) -> NewTransaction {
        let builder =
            TransactionBuilder::new(date, format!("Opening balance for {}", account.name))
                .transaction_type(TransactionType::InitialBalance);
        match account.normal_balance() {
            NormalBalance::Debit => builder
                .debit(account.id, amount)
                .credit(equity_account, amount),
            NormalBalance::Credit => builder
                .credit(account.id, amount)
                .debit(equity_account, amount),
        }
        .build()
    }
}
