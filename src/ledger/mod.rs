/*!
 * Bank Ledger
 * Accounts, balances, and JSON persistence
 */

mod accounts;
mod store;
mod types;

pub use accounts::Ledger;
pub use store::LedgerStore;
pub use types::{LedgerError, LedgerResult};
