/*!
 * Transaction Executor
 * Runs bank operations and drives the owning process through its states
 */

use super::types::{
    TransactionError, TransactionKind, TransactionOutcome, TransactionRequest, TransactionResult,
};
use crate::core::types::Pid;
use crate::ledger::{Ledger, LedgerError};
use crate::process::{ProcessRegistry, ProcessState};
use log::info;

/// Bridge between transactions, the ledger, and the process table
///
/// A transaction reaches `Completed` exactly when it produced an outcome,
/// including refusals. Store failures abort before completion, leaving the
/// process in `Running` as evidence of where the run stopped.
#[derive(Clone)]
pub struct TransactionExecutor {
    registry: ProcessRegistry,
    ledger: Ledger,
}

impl TransactionExecutor {
    #[must_use]
    pub fn new(registry: ProcessRegistry, ledger: Ledger) -> Self {
        Self { registry, ledger }
    }

    #[must_use]
    pub fn registry(&self) -> &ProcessRegistry {
        &self.registry
    }

    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Execute one request, optionally on behalf of a tracked process.
    ///
    /// With a PID the process is marked `Running` before the ledger call and
    /// `Completed` once an outcome exists.
    pub fn execute(
        &self,
        request: &TransactionRequest,
        pid: Option<Pid>,
    ) -> TransactionResult<TransactionOutcome> {
        if let Some(pid) = pid {
            self.registry.update_state(pid, ProcessState::Running);
        }

        let outcome = self.dispatch(request)?;

        if let Some(pid) = pid {
            self.registry.update_state(pid, ProcessState::Completed);
        }
        info!("Transaction {} finished: {}", request.id, outcome);
        Ok(outcome)
    }

    fn dispatch(&self, request: &TransactionRequest) -> TransactionResult<TransactionOutcome> {
        match request.kind {
            TransactionKind::Deposit => {
                match self.ledger.deposit(&request.account, request.amount) {
                    Ok(balance) => Ok(TransactionOutcome::Deposited {
                        account: request.account.clone(),
                        amount: request.amount,
                        balance,
                    }),
                    Err(e) => Self::refusal(e),
                }
            }
            TransactionKind::Withdraw => {
                match self.ledger.withdraw(&request.account, request.amount) {
                    Ok(balance) => Ok(TransactionOutcome::Withdrawn {
                        account: request.account.clone(),
                        amount: request.amount,
                        balance,
                    }),
                    Err(e) => Self::refusal(e),
                }
            }
            TransactionKind::Balance => match self.ledger.balance(&request.account) {
                Ok(balance) => Ok(TransactionOutcome::Balance {
                    account: request.account.clone(),
                    balance,
                }),
                Err(e) => Self::refusal(e),
            },
        }
    }

    /// Turn a benign ledger refusal into an outcome; let store failures through.
    fn refusal(err: LedgerError) -> TransactionResult<TransactionOutcome> {
        match err {
            LedgerError::AccountNotFound(account) => {
                Ok(TransactionOutcome::AccountMissing { account })
            }
            LedgerError::InsufficientFunds {
                account,
                requested,
                available,
            } => Ok(TransactionOutcome::InsufficientFunds {
                account,
                requested,
                available,
            }),
            fatal => Err(TransactionError::Ledger(fatal)),
        }
    }
}
