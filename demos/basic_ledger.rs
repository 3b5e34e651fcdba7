//! Basic ledger usage example

use chrono::NaiveDate;
use ledger_core::{
    patterns, Amount, Ledger, MemoryStore, NewPosting, OwnerId, TransactionBuilder,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧾 Ledger Core - Basic Ledger Example\n");

    // Create a new ledger with in-memory storage
    let ledger = Ledger::new(MemoryStore::new());
    let owner = OwnerId::new();

    // 1. Set up the starter chart of accounts
    println!("📊 Setting up Chart of Accounts...");
    let accounts = ledger.create_starter_chart(owner).await?;

    for account in accounts.values() {
        println!(
            "  ✓ Created account: {} ({:?})",
            account.name, account.account_type
        );
    }
    println!();

    // 2. Record some transactions
    println!("💰 Recording Transactions...\n");

    // Seed the cash balance
    let opening = patterns::opening_balance(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        &accounts["cash"],
        accounts["opening_equity"].id,
        Amount::from_major(5000),
    );
    ledger.create_transaction(owner, opening).await?;
    println!("  ✓ Recorded: Opening cash balance of $5,000");

    // Salary comes in
    let salary = patterns::income(
        NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        "January salary",
        accounts["cash"].id,
        accounts["salary"].id,
        Amount::from_major(4200),
    );
    ledger.create_transaction(owner, salary).await?;
    println!("  ✓ Recorded: Salary income of $4,200");

    // Rent goes out
    let rent = patterns::expense(
        NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
        "January rent",
        accounts["rent"].id,
        accounts["cash"].id,
        Amount::from_major(1300),
    );
    ledger.create_transaction(owner, rent).await?;
    println!("  ✓ Recorded: Rent payment of $1,300");

    // Move some savings aside
    let transfer = patterns::transfer(
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        "Emergency fund top-up",
        accounts["cash"].id,
        accounts["savings"].id,
        Amount::from_major(500),
    );
    ledger.create_transaction(owner, transfer).await?;
    println!("  ✓ Recorded: Transfer of $500 to savings");

    // A split grocery run, built entry by entry
    let total: Amount = "86.40".parse()?;
    let half: Amount = "43.20".parse()?;
    let groceries = TransactionBuilder::new(
        NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
        "Weekly shop, half on the card",
    )
    .debit(accounts["groceries"].id, total)
    .entry(NewPosting::credit(accounts["cash"].id, half).with_category("Food"))
    .entry(NewPosting::credit(accounts["credit_card"].id, half).with_category("Food"))
    .build();
    ledger.create_transaction(owner, groceries).await?;
    println!("  ✓ Recorded: Groceries of $86.40 split across cash and card");

    // 3. Inspect the ledger
    println!("\n📈 Account Balances...\n");
    for key in ["cash", "savings", "salary", "rent", "groceries", "credit_card"] {
        let account = &accounts[key];
        let balance = ledger.balance_of(owner, account.id, None).await?;
        println!("  {:<24} ${}", account.name, balance);
    }

    println!("\n🗒  Transaction History (newest first)...\n");
    for detail in ledger.list_transactions(owner).await? {
        println!("  {} - {}", detail.date, detail.description);
        for entry in &detail.entries {
            let side = if entry.debit.is_positive() {
                format!("debit  ${}", entry.debit)
            } else {
                format!("credit ${}", entry.credit)
            };
            println!("      {:<24} {}", entry.account_name, side);
        }
    }

    println!("\n🎉 Example completed successfully!");
    Ok(())
}
