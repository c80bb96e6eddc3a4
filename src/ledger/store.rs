/*!
 * Ledger Store
 * JSON file persistence for account balances
 */

use super::types::{LedgerError, LedgerResult};
use crate::core::types::Amount;
use log::info;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed balance snapshot
///
/// The whole ledger is small enough to rewrite on every mutation, which keeps
/// the on-disk file consistent with memory after each committed operation.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read balances from disk. A missing file is an empty ledger, not an error.
    pub fn load(&self) -> LedgerResult<BTreeMap<String, Amount>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| LedgerError::Store(format!("read {}: {}", self.path.display(), e)))?;
        let accounts: BTreeMap<String, Amount> = serde_json::from_str(&raw)
            .map_err(|e| LedgerError::Store(format!("parse {}: {}", self.path.display(), e)))?;
        info!(
            "Loaded {} account(s) from {}",
            accounts.len(),
            self.path.display()
        );
        Ok(accounts)
    }

    /// Rewrite the balance file from the given snapshot
    pub fn save(&self, accounts: &BTreeMap<String, Amount>) -> LedgerResult<()> {
        let raw = serde_json::to_string_pretty(accounts)
            .map_err(|e| LedgerError::Store(format!("encode ledger: {}", e)))?;
        fs::write(&self.path, raw)
            .map_err(|e| LedgerError::Store(format!("write {}: {}", self.path.display(), e)))?;
        Ok(())
    }
}
