//! Core types and data structures for the ledger

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::money::{Amount, AmountError};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

entity_id!(
    /// Identity of the user owning a slice of the ledger
    OwnerId
);

entity_id!(
    /// Identifier of an account in the chart of accounts
    AccountId
);

entity_id!(
    /// Identifier of a committed transaction
    TransactionId
);

/// Account classifications following standard accounting principles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    /// Resources owned (cash, bank accounts, equipment)
    Asset,
    /// Obligations owed (credit cards, loans)
    Liability,
    /// Owner's residual interest (opening balances, retained earnings)
    Equity,
    /// Money earned (salary, sales)
    Revenue,
    /// Money spent (rent, groceries)
    Expense,
}

impl AccountType {
    /// Returns the side on which this classification normally carries its
    /// balance. Assets and Expenses grow with debits; Liabilities, Equity,
    /// and Revenue grow with credits.
    pub fn normal_balance(&self) -> NormalBalance {
        match self {
            AccountType::Asset | AccountType::Expense => NormalBalance::Debit,
            AccountType::Liability | AccountType::Equity | AccountType::Revenue => {
                NormalBalance::Credit
            }
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccountType::Asset => "Asset",
            AccountType::Liability => "Liability",
            AccountType::Equity => "Equity",
            AccountType::Revenue => "Revenue",
            AccountType::Expense => "Expense",
        };
        f.write_str(name)
    }
}

/// The two sides of double-entry bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NormalBalance {
    /// Increases Assets and Expenses, decreases the rest
    Debit,
    /// Increases Liabilities, Equity, and Revenue, decreases the rest
    Credit,
}

impl NormalBalance {
    /// The other side
    pub fn opposite(self) -> NormalBalance {
        match self {
            NormalBalance::Debit => NormalBalance::Credit,
            NormalBalance::Credit => NormalBalance::Debit,
        }
    }
}

/// High-level classification of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TransactionType {
    Expense,
    Income,
    Transfer,
    #[default]
    #[serde(rename = "Journal Entry")]
    JournalEntry,
    #[serde(rename = "Initial Balance")]
    InitialBalance,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransactionType::Expense => "Expense",
            TransactionType::Income => "Income",
            TransactionType::Transfer => "Transfer",
            TransactionType::JournalEntry => "Journal Entry",
            TransactionType::InitialBalance => "Initial Balance",
        };
        f.write_str(name)
    }
}

/// An account in an owner's chart of accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: AccountId,
    /// Owning user; every read and write is scoped to this identity
    pub owner: OwnerId,
    /// Display name, stored trimmed; unique per owner and account type
    pub name: String,
    /// Classification (Asset, Liability, etc.)
    pub account_type: AccountType,
    /// Free-form refinement such as "Checking" or "Credit Card"
    pub sub_type: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// Starting balance in minor units, folded into every balance read
    pub initial_balance: Amount,
    /// Contra accounts carry their balance opposite their type's normal side
    pub is_contra: bool,
    /// When the account was created
    pub created_at: NaiveDateTime,
    /// When the account was last updated
    pub updated_at: NaiveDateTime,
}

impl Account {
    /// The side that increases this account, honoring the contra flag
    pub fn normal_balance(&self) -> NormalBalance {
        let side = self.account_type.normal_balance();
        if self.is_contra {
            side.opposite()
        } else {
            side
        }
    }
}

/// Input for creating an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAccount {
    pub name: String,
    pub account_type: AccountType,
    pub sub_type: Option<String>,
    pub description: Option<String>,
    /// Defaults to zero
    #[serde(default)]
    pub initial_balance: Amount,
    #[serde(default)]
    pub is_contra: bool,
}

impl NewAccount {
    /// Account input with empty optional fields and a zero opening balance
    pub fn new(name: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            name: name.into(),
            account_type,
            sub_type: None,
            description: None,
            initial_balance: Amount::ZERO,
            is_contra: false,
        }
    }
}

/// A committed debit or credit line within a transaction.
///
/// Exactly one of `debit`/`credit` is strictly positive; the other is
/// exactly zero. The engine rejects anything else before commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    /// Account the line applies to
    pub account_id: AccountId,
    /// Debit side in minor units
    pub debit: Amount,
    /// Credit side in minor units
    pub credit: Amount,
    /// Optional spending label for this line
    pub category: Option<String>,
}

/// Input line for a transaction; an omitted side defaults to zero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPosting {
    pub account_id: AccountId,
    pub debit: Option<Amount>,
    pub credit: Option<Amount>,
    pub category: Option<String>,
}

impl NewPosting {
    /// A debit line
    pub fn debit(account_id: AccountId, amount: Amount) -> Self {
        Self {
            account_id,
            debit: Some(amount),
            credit: None,
            category: None,
        }
    }

    /// A credit line
    pub fn credit(account_id: AccountId, amount: Amount) -> Self {
        Self {
            account_id,
            debit: None,
            credit: Some(amount),
            category: None,
        }
    }

    /// Attach a category label to the line
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// A committed, immutable journal transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier for the transaction
    pub id: TransactionId,
    /// Owning user
    pub owner: OwnerId,
    /// Business date, distinct from the record timestamps
    pub date: NaiveDate,
    /// Description of the transaction
    pub description: String,
    /// Classification, `Journal Entry` unless the caller chose one
    pub transaction_type: TransactionType,
    /// Postings in the order they were supplied
    pub entries: Vec<Posting>,
    /// External document reference (invoice number, check number, etc.)
    pub reference: Option<String>,
    /// When the transaction was created
    pub created_at: NaiveDateTime,
    /// When the transaction was last updated
    pub updated_at: NaiveDateTime,
}

impl Transaction {
    /// Sum of all debit sides
    pub fn total_debits(&self) -> Amount {
        self.entries.iter().fold(Amount::ZERO, |acc, e| acc + e.debit)
    }

    /// Sum of all credit sides
    pub fn total_credits(&self) -> Amount {
        self.entries.iter().fold(Amount::ZERO, |acc, e| acc + e.credit)
    }

    /// Whether debits equal credits exactly
    pub fn is_balanced(&self) -> bool {
        self.total_debits() == self.total_credits()
    }
}

/// Input for recording a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub description: String,
    /// Defaults to [`TransactionType::JournalEntry`] when not given
    pub transaction_type: Option<TransactionType>,
    pub reference: Option<String>,
    pub entries: Vec<NewPosting>,
}

/// A posting joined with its account's name and type at read time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostingDetail {
    pub account_id: AccountId,
    pub account_name: String,
    pub account_type: AccountType,
    pub debit: Amount,
    pub credit: Amount,
    pub category: Option<String>,
}

/// A transaction with account details resolved into each posting.
///
/// Stored transactions hold bare account ids; the joined fields here are
/// produced at read time and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDetail {
    pub id: TransactionId,
    pub owner: OwnerId,
    pub date: NaiveDate,
    pub description: String,
    pub transaction_type: TransactionType,
    pub entries: Vec<PostingDetail>,
    pub reference: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Errors that can occur in the ledger system
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Malformed input: missing fields, empty names, negative or
    /// unrepresentable amounts
    #[error("{0}")]
    InvalidInput(String),
    /// An account with the same name and type already exists for this owner
    #[error("An account named \"{name}\" of type \"{account_type}\" already exists.")]
    DuplicateAccount {
        name: String,
        account_type: AccountType,
    },
    /// The account does not exist or belongs to another owner; the two
    /// cases are deliberately indistinguishable
    #[error("Account with ID {0} not found or does not belong to owner.")]
    AccountNotFound(AccountId),
    /// The transaction does not exist or belongs to another owner
    #[error("Transaction with ID {0} not found or does not belong to owner.")]
    TransactionNotFound(TransactionId),
    /// A posting broke the debit-XOR-credit rule
    #[error(
        "Transaction entry for account {account} must have either a debit OR a credit, not both or neither."
    )]
    InvalidEntry { account: String },
    /// Total debits and credits differ
    #[error("Total debits ({debits}) must equal total credits ({credits}) for the transaction.")]
    UnbalancedTransaction { debits: Amount, credits: Amount },
    /// Storage backend failure; never a domain outcome
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<AmountError> for LedgerError {
    fn from(err: AmountError) -> Self {
        LedgerError::InvalidInput(err.to_string())
    }
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
