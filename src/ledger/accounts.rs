/*!
 * Account Ledger
 * Balance bookkeeping with optional file persistence
 */

use super::store::LedgerStore;
use super::types::{LedgerError, LedgerResult};
use crate::core::types::Amount;
use log::info;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

struct LedgerInner {
    accounts: BTreeMap<String, Amount>,
    store: Option<LedgerStore>,
}

/// Shared bank ledger
///
/// One lock covers balances and persistence together, so a committed mutation
/// and its file write happen as a unit. If the write fails the in-memory
/// change is rolled back and the store error propagates.
#[derive(Clone)]
pub struct Ledger {
    inner: Arc<RwLock<LedgerInner>>,
}

impl Ledger {
    /// In-memory ledger with no backing file
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(LedgerInner {
                accounts: BTreeMap::new(),
                store: None,
            })),
        }
    }

    /// Ledger backed by a JSON balance file, seeded from its current contents
    pub fn with_store(path: impl Into<PathBuf>) -> LedgerResult<Self> {
        let store = LedgerStore::new(path);
        let accounts = store.load()?;
        Ok(Self {
            inner: Arc::new(RwLock::new(LedgerInner {
                accounts,
                store: Some(store),
            })),
        })
    }

    pub fn create_account(&self, account: &str, initial: Amount) -> LedgerResult<()> {
        let mut inner = self.inner.write();
        if inner.accounts.contains_key(account) {
            return Err(LedgerError::AccountExists(account.to_string()));
        }
        inner.accounts.insert(account.to_string(), initial);
        if let Err(e) = Self::persist(&inner) {
            inner.accounts.remove(account);
            return Err(e);
        }
        drop(inner);
        info!("Created account {} with balance {}", account, initial);
        Ok(())
    }

    /// Add funds and return the new balance
    pub fn deposit(&self, account: &str, amount: Amount) -> LedgerResult<Amount> {
        let mut inner = self.inner.write();
        let balance = inner
            .accounts
            .get_mut(account)
            .ok_or_else(|| LedgerError::AccountNotFound(account.to_string()))?;
        let previous = *balance;
        *balance = previous.saturating_add(amount);
        let updated = *balance;

        if let Err(e) = Self::persist(&inner) {
            if let Some(balance) = inner.accounts.get_mut(account) {
                *balance = previous;
            }
            return Err(e);
        }
        drop(inner);
        info!("Deposited {} into {}; balance {}", amount, account, updated);
        Ok(updated)
    }

    /// Remove funds and return the new balance.
    ///
    /// Overdrafts are refused before any state changes, so a failed withdrawal
    /// leaves both memory and the file untouched.
    pub fn withdraw(&self, account: &str, amount: Amount) -> LedgerResult<Amount> {
        let mut inner = self.inner.write();
        let balance = inner
            .accounts
            .get_mut(account)
            .ok_or_else(|| LedgerError::AccountNotFound(account.to_string()))?;
        let previous = *balance;
        if amount > previous {
            return Err(LedgerError::InsufficientFunds {
                account: account.to_string(),
                requested: amount,
                available: previous,
            });
        }
        *balance = previous - amount;
        let updated = *balance;

        if let Err(e) = Self::persist(&inner) {
            if let Some(balance) = inner.accounts.get_mut(account) {
                *balance = previous;
            }
            return Err(e);
        }
        drop(inner);
        info!("Withdrew {} from {}; balance {}", amount, account, updated);
        Ok(updated)
    }

    /// Current balance of an account
    pub fn balance(&self, account: &str) -> LedgerResult<Amount> {
        self.inner
            .read()
            .accounts
            .get(account)
            .copied()
            .ok_or_else(|| LedgerError::AccountNotFound(account.to_string()))
    }

    /// Snapshot of every account in id order
    #[must_use]
    pub fn accounts(&self) -> Vec<(String, Amount)> {
        self.inner
            .read()
            .accounts
            .iter()
            .map(|(id, balance)| (id.clone(), *balance))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().accounts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().accounts.is_empty()
    }

    fn persist(inner: &LedgerInner) -> LedgerResult<()> {
        match &inner.store {
            Some(store) => store.save(&inner.accounts),
            None => Ok(()),
        }
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== ACCOUNTS ===")?;
        let accounts = self.accounts();
        if accounts.is_empty() {
            writeln!(f, "No accounts on file")?;
        } else {
            for (id, balance) in accounts {
                writeln!(f, "{:>10}: {}", id, balance)?;
            }
        }
        Ok(())
    }
}
