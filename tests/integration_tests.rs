//! Integration tests for ledger-core

use chrono::NaiveDate;
use ledger_core::{
    patterns, Account, AccountType, Amount, Ledger, LedgerError, MemoryStore, NewAccount,
    NewPosting, OwnerId, TransactionBuilder, TransactionType,
};
use serde_json::json;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn complete_personal_finance_workflow() {
    let ledger = Ledger::new(MemoryStore::new());
    let owner = OwnerId::new();

    // Set up the starter chart of accounts.
    let chart = ledger.create_starter_chart(owner).await.unwrap();
    assert!(chart.contains_key("cash"));
    assert!(chart.contains_key("salary"));
    assert!(chart.contains_key("opening_equity"));

    let cash = &chart["cash"];
    let savings = &chart["savings"];
    let salary = &chart["salary"];
    let rent = &chart["rent"];
    let opening_equity = &chart["opening_equity"];

    // Seed the cash balance.
    let opening = ledger
        .create_transaction(
            owner,
            patterns::opening_balance(
                date(2024, 1, 1),
                cash,
                opening_equity.id,
                Amount::from_major(2500),
            ),
        )
        .await
        .unwrap();
    assert_eq!(opening.transaction_type, TransactionType::InitialBalance);
    assert_eq!(opening.description, "Opening balance for Cash");

    // A month of activity.
    ledger
        .create_transaction(
            owner,
            patterns::income(
                date(2024, 1, 2),
                "January salary",
                cash.id,
                salary.id,
                Amount::from_major(4200),
            ),
        )
        .await
        .unwrap();
    ledger
        .create_transaction(
            owner,
            patterns::expense(
                date(2024, 1, 3),
                "January rent",
                rent.id,
                cash.id,
                Amount::from_major(1300),
            ),
        )
        .await
        .unwrap();
    ledger
        .create_transaction(
            owner,
            patterns::transfer(
                date(2024, 1, 5),
                "Emergency fund top-up",
                cash.id,
                savings.id,
                Amount::from_major(500),
            ),
        )
        .await
        .unwrap();

    // Balances fold out of the history.
    let balance = |account: &Account| ledger.balance_of(owner, account.id, None);
    assert_eq!(balance(cash).await.unwrap(), Amount::from_major(4900));
    assert_eq!(balance(savings).await.unwrap(), Amount::from_major(500));
    assert_eq!(balance(salary).await.unwrap(), Amount::from_major(4200));
    assert_eq!(balance(rent).await.unwrap(), Amount::from_major(1300));
    assert_eq!(
        balance(opening_equity).await.unwrap(),
        Amount::from_major(2500)
    );

    // The listing is newest first and joined to account details.
    let listed = ledger.list_transactions(owner).await.unwrap();
    assert_eq!(listed.len(), 4);
    assert_eq!(listed[0].description, "Emergency fund top-up");
    assert_eq!(listed[3].description, "Opening balance for Cash");
    assert_eq!(listed[0].entries[0].account_name, "Savings Account");
    assert_eq!(listed[0].entries[0].account_type, AccountType::Asset);
}

#[tokio::test]
async fn owners_see_only_their_own_books() {
    let ledger = Ledger::new(MemoryStore::new());
    let alice = OwnerId::new();
    let bob = OwnerId::new();

    // Both owners can use the same account names.
    let alice_cash = ledger
        .create_account(alice, NewAccount::new("Cash", AccountType::Asset))
        .await
        .unwrap();
    let alice_salary = ledger
        .create_account(alice, NewAccount::new("Salary", AccountType::Revenue))
        .await
        .unwrap();
    let bob_cash = ledger
        .create_account(bob, NewAccount::new("Cash", AccountType::Asset))
        .await
        .unwrap();

    let txn = ledger
        .create_transaction(
            alice,
            patterns::income(
                date(2024, 6, 1),
                "Salary",
                alice_cash.id,
                alice_salary.id,
                Amount::from_major(1000),
            ),
        )
        .await
        .unwrap();

    // Bob's views never surface Alice's rows.
    assert_eq!(ledger.list_accounts(bob).await.unwrap().len(), 1);
    assert!(ledger.list_transactions(bob).await.unwrap().is_empty());

    let err = ledger.get_account(bob, alice_cash.id).await.unwrap_err();
    assert!(matches!(err, LedgerError::AccountNotFound(id) if id == alice_cash.id));

    let err = ledger.get_transaction(bob, txn.id).await.unwrap_err();
    assert!(matches!(err, LedgerError::TransactionNotFound(id) if id == txn.id));

    // Bob cannot post to Alice's accounts either.
    let err = ledger
        .create_transaction(
            bob,
            TransactionBuilder::new(date(2024, 6, 2), "Poaching")
                .debit(bob_cash.id, Amount::from_major(10))
                .credit(alice_salary.id, Amount::from_major(10))
                .build(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::AccountNotFound(id) if id == alice_salary.id));
}

#[tokio::test]
async fn duplicate_accounts_are_rejected_with_the_full_story() {
    let ledger = Ledger::new(MemoryStore::new());
    let owner = OwnerId::new();

    ledger
        .create_account(owner, NewAccount::new("Cash", AccountType::Asset))
        .await
        .unwrap();

    // Whitespace differences do not dodge the uniqueness check.
    let err = ledger
        .create_account(owner, NewAccount::new("  Cash  ", AccountType::Asset))
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "An account named \"Cash\" of type \"Asset\" already exists."
    );

    // The same name under a different type is a different account.
    ledger
        .create_account(owner, NewAccount::new("Cash", AccountType::Expense))
        .await
        .unwrap();
}

#[tokio::test]
async fn failed_drafts_leave_the_ledger_untouched() {
    let ledger = Ledger::new(MemoryStore::new());
    let owner = OwnerId::new();

    let cash = ledger
        .create_account(owner, NewAccount::new("Cash", AccountType::Asset))
        .await
        .unwrap();
    let salary = ledger
        .create_account(owner, NewAccount::new("Salary", AccountType::Revenue))
        .await
        .unwrap();

    ledger
        .create_transaction(
            owner,
            patterns::income(
                date(2024, 7, 1),
                "Salary",
                cash.id,
                salary.id,
                Amount::from_major(3000),
            ),
        )
        .await
        .unwrap();

    // An unbalanced draft reports both totals and persists nothing.
    let err = ledger
        .create_transaction(
            owner,
            TransactionBuilder::new(date(2024, 7, 2), "Sloppy")
                .debit(cash.id, Amount::from_major(100))
                .credit(salary.id, Amount::from_major(99))
                .build(),
        )
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Total debits (100.00) must equal total credits (99.00) for the transaction."
    );

    // Same for a draft naming an unknown account.
    let err = ledger
        .create_transaction(
            owner,
            TransactionBuilder::new(date(2024, 7, 3), "Ghost")
                .debit(ledger_core::AccountId::new(), Amount::from_major(10))
                .credit(salary.id, Amount::from_major(10))
                .build(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::AccountNotFound(_)));

    assert_eq!(ledger.list_transactions(owner).await.unwrap().len(), 1);
    assert_eq!(
        ledger.balance_of(owner, cash.id, None).await.unwrap(),
        Amount::from_major(3000)
    );
}

#[tokio::test]
async fn validation_failures_carry_the_documented_messages() {
    let ledger = Ledger::new(MemoryStore::new());
    let owner = OwnerId::new();

    let cash = ledger
        .create_account(owner, NewAccount::new("Cash", AccountType::Asset))
        .await
        .unwrap();
    let rent = ledger
        .create_account(owner, NewAccount::new("Rent", AccountType::Expense))
        .await
        .unwrap();

    let single = TransactionBuilder::new(date(2024, 8, 1), "Half a thought")
        .debit(cash.id, Amount::from_major(5))
        .build();
    let err = ledger.create_transaction(owner, single).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Date, description, and at least two entries are required for a transaction."
    );

    let sideless = TransactionBuilder::new(date(2024, 8, 1), "Rent")
        .entry(NewPosting {
            account_id: rent.id,
            debit: None,
            credit: None,
            category: None,
        })
        .credit(cash.id, Amount::from_major(5))
        .build();
    let err = ledger.create_transaction(owner, sideless).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Each entry must have an accountId and non-negative debit/credit."
    );

    let two_sided = TransactionBuilder::new(date(2024, 8, 1), "Rent")
        .entry(NewPosting {
            account_id: rent.id,
            debit: Some(Amount::from_major(5)),
            credit: Some(Amount::from_major(5)),
            category: None,
        })
        .credit(cash.id, Amount::from_major(5))
        .build();
    let err = ledger
        .create_transaction(owner, two_sided)
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Transaction entry for account Rent must have either a debit OR a credit, not both or neither."
    );
}

#[tokio::test]
async fn balances_respect_the_as_of_cutoff() {
    let ledger = Ledger::new(MemoryStore::new());
    let owner = OwnerId::new();

    let cash = ledger
        .create_account(owner, NewAccount::new("Cash", AccountType::Asset))
        .await
        .unwrap();
    let salary = ledger
        .create_account(owner, NewAccount::new("Salary", AccountType::Revenue))
        .await
        .unwrap();

    for (month, major) in [(1, 1000), (2, 2000), (3, 4000)] {
        ledger
            .create_transaction(
                owner,
                patterns::income(
                    date(2024, month, 15),
                    "Salary",
                    cash.id,
                    salary.id,
                    Amount::from_major(major),
                ),
            )
            .await
            .unwrap();
    }

    let at = |cutoff| ledger.balance_of(owner, cash.id, Some(cutoff));
    assert_eq!(at(date(2024, 1, 31)).await.unwrap(), Amount::from_major(1000));
    assert_eq!(at(date(2024, 2, 15)).await.unwrap(), Amount::from_major(3000));
    assert_eq!(
        ledger.balance_of(owner, cash.id, None).await.unwrap(),
        Amount::from_major(7000)
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn racing_account_creation_admits_exactly_one() {
    let store = MemoryStore::new();
    let first = Ledger::new(store.clone());
    let second = Ledger::new(store);
    let owner = OwnerId::new();

    let a = tokio::spawn(async move {
        first
            .create_account(owner, NewAccount::new("Cash", AccountType::Asset))
            .await
    });
    let b = tokio::spawn(async move {
        second
            .create_account(owner, NewAccount::new("Cash", AccountType::Asset))
            .await
    });

    let results = [a.await.unwrap(), b.await.unwrap()];
    let created = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(created, 1);
    assert!(results.iter().any(|r| matches!(
        r,
        Err(LedgerError::DuplicateAccount { .. })
    )));
}

#[tokio::test]
async fn wire_format_stays_flat_and_integer_valued() {
    let ledger = Ledger::new(MemoryStore::new());
    let owner = OwnerId::new();

    let cash = ledger
        .create_account(owner, NewAccount::new("Cash", AccountType::Asset))
        .await
        .unwrap();
    let salary = ledger
        .create_account(owner, NewAccount::new("Salary", AccountType::Revenue))
        .await
        .unwrap();

    let txn = ledger
        .create_transaction(
            owner,
            patterns::income(
                date(2024, 9, 1),
                "Salary",
                cash.id,
                salary.id,
                Amount::from_minor(123456),
            ),
        )
        .await
        .unwrap();

    let value = serde_json::to_value(&txn).unwrap();
    // Amounts serialize as bare minor-unit integers, ids as plain strings.
    assert_eq!(value["entries"][0]["debit"], json!(123456));
    assert_eq!(value["entries"][0]["credit"], json!(0));
    assert_eq!(value["id"], json!(txn.id.to_string()));
    assert_eq!(value["transaction_type"], json!("Income"));

    assert_eq!(
        serde_json::to_value(TransactionType::JournalEntry).unwrap(),
        json!("Journal Entry")
    );
    assert_eq!(
        serde_json::to_value(TransactionType::InitialBalance).unwrap(),
        json!("Initial Balance")
    );

    let account_value = serde_json::to_value(&cash).unwrap();
    assert_eq!(account_value["account_type"], json!("Asset"));
    assert_eq!(account_value["initial_balance"], json!(0));

    // The wire form round-trips.
    let back: ledger_core::Transaction = serde_json::from_value(value).unwrap();
    assert_eq!(back, txn);
}
