/*!
 * Transactions
 * Bank operations executed on behalf of simulated processes
 */

mod executor;
mod types;

pub use executor::TransactionExecutor;
pub use types::{
    TransactionError, TransactionKind, TransactionOutcome, TransactionRequest, TransactionResult,
};
