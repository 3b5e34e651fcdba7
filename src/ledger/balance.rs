//! Derived account balances

use chrono::NaiveDate;

use crate::money::Amount;
use crate::traits::*;
use crate::types::*;

/// Computes account balances by folding postings over a [`LedgerStore`].
///
/// Balances are never stored. Each query starts from the account's
/// `initial_balance` and replays every posting that touches the account,
/// so the result is always consistent with the transaction history.
pub struct BalanceCalculator<S: LedgerStore> {
    store: S,
}

impl<S: LedgerStore> BalanceCalculator<S> {
    /// Create a calculator over the given store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Balance of one of the owner's accounts, signed by its normal side.
    ///
    /// A debit-normal account grows with debits and shrinks with credits;
    /// a credit-normal account is the mirror image. Contra accounts fold
    /// on their flipped side. With `as_of` set, only transactions dated on
    /// or before the cutoff contribute. A history whose running balance
    /// leaves the representable range reports an error rather than
    /// wrapping.
    pub async fn balance_of(
        &self,
        owner: OwnerId,
        account_id: AccountId,
        as_of: Option<NaiveDate>,
    ) -> LedgerResult<Amount> {
        let account = self
            .store
            .get_account(owner, account_id)
            .await?
            .ok_or(LedgerError::AccountNotFound(account_id))?;
        let transactions = self
            .store
            .get_account_transactions(owner, account_id, as_of)
            .await?;

        // The commit-time check bounds one transaction's totals, not the
        // accumulated balance across a history.
        let mut balance = account.initial_balance;
        for transaction in &transactions {
            for posting in transaction.entries.iter().filter(|p| p.account_id == account_id) {
                let (gain, loss) = match account.normal_balance() {
                    NormalBalance::Debit => (posting.debit, posting.credit),
                    NormalBalance::Credit => (posting.credit, posting.debit),
                };
                balance = balance
                    .checked_add(gain)
                    .and_then(|b| b.checked_sub(loss))
                    .ok_or_else(overflow)?;
            }
        }
        Ok(balance)
    }
}

fn overflow() -> LedgerError {
    LedgerError::InvalidInput("Entry amounts exceed the representable range.".to_string())
}
