//! Input normalization helpers shared by the ledger components

use crate::types::*;

/// Validate an account name, returning it trimmed
pub fn validate_account_name(name: &str) -> LedgerResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::InvalidInput(
            "Account name is required.".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional free-text field, mapping empty input to `None`
pub fn optional_trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
