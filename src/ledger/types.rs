/*!
 * Ledger Types
 * Account errors and result alias
 */

use crate::core::types::Amount;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ledger operation errors
///
/// Everything except `Store` is a business outcome the caller reports and
/// moves past. `Store` means the backing file failed and the run cannot
/// trust its balances anymore.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic, Serialize, Deserialize)]
#[serde(tag = "error", content = "details", rename_all = "snake_case")]
pub enum LedgerError {
    #[error("Account {0} already exists")]
    #[diagnostic(
        code(ledger::account_exists),
        help("Pick an unused account id or operate on the existing account")
    )]
    AccountExists(String),

    #[error("Account {0} not found")]
    #[diagnostic(
        code(ledger::account_not_found),
        help("Create the account before transacting on it")
    )]
    AccountNotFound(String),

    #[error("Insufficient funds in account {account}: requested {requested}, available {available}")]
    #[diagnostic(
        code(ledger::insufficient_funds),
        help("Withdraw at most the available balance")
    )]
    InsufficientFunds {
        account: String,
        requested: Amount,
        available: Amount,
    },

    #[error("Ledger store failure: {0}")]
    #[diagnostic(
        code(ledger::store),
        help("Check that the accounts file is present and writable")
    )]
    Store(String),
}

impl LedgerError {
    /// Business outcomes are benign; store failures are not.
    #[must_use]
    pub const fn is_benign(&self) -> bool {
        !matches!(self, LedgerError::Store(_))
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
