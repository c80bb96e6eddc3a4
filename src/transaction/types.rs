/*!
 * Transaction Types
 * Requests, outcomes, and execution errors
 */

use crate::core::types::Amount;
use crate::ledger::LedgerError;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Supported bank operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
    Balance,
}

impl TransactionKind {
    /// Parse a user-supplied action name.
    ///
    /// Free-form input only enters the system through here, so a typo is an
    /// error at the boundary instead of a transaction that silently does
    /// nothing.
    pub fn parse(s: &str) -> Result<Self, TransactionError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deposit" => Ok(TransactionKind::Deposit),
            "withdraw" => Ok(TransactionKind::Withdraw),
            "balance" => Ok(TransactionKind::Balance),
            _ => Err(TransactionError::UnknownAction(s.to_string())),
        }
    }

    #[inline(always)]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdraw => "withdraw",
            TransactionKind::Balance => "balance",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One requested bank operation
///
/// `amount` is ignored by balance queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TransactionRequest {
    pub id: String,
    pub kind: TransactionKind,
    pub account: String,
    pub amount: Amount,
}

impl TransactionRequest {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        kind: TransactionKind,
        account: impl Into<String>,
        amount: Amount,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            account: account.into(),
            amount,
        }
    }
}

/// Result of a transaction that ran to completion
///
/// Refusals are outcomes, not errors: an overdraft or a missing account is a
/// decided answer, and the process that asked still finishes normally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TransactionOutcome {
    Deposited {
        account: String,
        amount: Amount,
        balance: Amount,
    },
    Withdrawn {
        account: String,
        amount: Amount,
        balance: Amount,
    },
    InsufficientFunds {
        account: String,
        requested: Amount,
        available: Amount,
    },
    AccountMissing {
        account: String,
    },
    Balance {
        account: String,
        balance: Amount,
    },
}

impl TransactionOutcome {
    /// True when the requested effect actually happened
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(
            self,
            TransactionOutcome::Deposited { .. }
                | TransactionOutcome::Withdrawn { .. }
                | TransactionOutcome::Balance { .. }
        )
    }
}

impl fmt::Display for TransactionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionOutcome::Deposited {
                account,
                amount,
                balance,
            } => write!(f, "Deposited {} into {}; balance {}", amount, account, balance),
            TransactionOutcome::Withdrawn {
                account,
                amount,
                balance,
            } => write!(f, "Withdrew {} from {}; balance {}", amount, account, balance),
            TransactionOutcome::InsufficientFunds {
                account,
                requested,
                available,
            } => write!(
                f,
                "Insufficient funds in {}: requested {}, available {}",
                account, requested, available
            ),
            TransactionOutcome::AccountMissing { account } => {
                write!(f, "Account {} not found", account)
            }
            TransactionOutcome::Balance { account, balance } => {
                write!(f, "Balance of {}: {}", account, balance)
            }
        }
    }
}

/// Transaction execution errors
///
/// Only failures that stop a transaction from finishing appear here; refused
/// operations surface as [`TransactionOutcome`] values instead.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum TransactionError {
    #[error("Unknown action: {0:?}")]
    #[diagnostic(
        code(transaction::unknown_action),
        help("Valid actions are deposit, withdraw, and balance")
    )]
    UnknownAction(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Ledger(#[from] LedgerError),
}

pub type TransactionResult<T> = Result<T, TransactionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_known_actions() {
        assert_eq!(
            TransactionKind::parse("deposit").unwrap(),
            TransactionKind::Deposit
        );
        assert_eq!(
            TransactionKind::parse("  Withdraw ").unwrap(),
            TransactionKind::Withdraw
        );
        assert_eq!(
            TransactionKind::parse("BALANCE").unwrap(),
            TransactionKind::Balance
        );
    }

    #[test]
    fn test_parse_rejects_unknown_actions() {
        let err = TransactionKind::parse("transfer").unwrap_err();
        assert_eq!(err, TransactionError::UnknownAction("transfer".to_string()));
    }

    #[test]
    fn test_refusals_are_not_successes() {
        let refused = TransactionOutcome::InsufficientFunds {
            account: "A1".to_string(),
            requested: 10,
            available: 0,
        };
        assert!(!refused.is_success());
        assert!(!TransactionOutcome::AccountMissing {
            account: "A1".to_string()
        }
        .is_success());
        assert!(TransactionOutcome::Balance {
            account: "A1".to_string(),
            balance: 0,
        }
        .is_success());
    }

    #[test]
    fn test_outcome_rendering() {
        let outcome = TransactionOutcome::Withdrawn {
            account: "A2".to_string(),
            amount: 200,
            balance: 300,
        };
        assert_eq!(outcome.to_string(), "Withdrew 200 from A2; balance 300");
    }
}
