/*!
 * File Allocation Table
 * Contiguous block assignment for simulated files
 */

use super::disk::Block;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Block map for simulated files
///
/// Blocks are handed out contiguously and never reclaimed; re-allocating an
/// existing name replaces its block list with fresh blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AllocationTable {
    files: BTreeMap<String, Vec<Block>>,
    next_block: Block,
}

impl AllocationTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the next `blocks` contiguous blocks to a file and return them
    pub fn allocate(&mut self, name: impl Into<String>, blocks: u32) -> Vec<Block> {
        let name = name.into();
        let assigned: Vec<Block> = (self.next_block..self.next_block + blocks).collect();
        self.next_block += blocks;
        info!(
            "Allocated {} block(s) to file {} starting at block {}",
            blocks,
            name,
            assigned.first().copied().unwrap_or(self.next_block)
        );
        self.files.insert(name, assigned.clone());
        assigned
    }

    #[must_use]
    pub fn blocks_of(&self, name: &str) -> Option<&[Block]> {
        self.files.get(name).map(Vec::as_slice)
    }

    /// Files in name order with their blocks
    #[must_use]
    pub fn files(&self) -> Vec<(&str, &[Block])> {
        self.files
            .iter()
            .map(|(name, blocks)| (name.as_str(), blocks.as_slice()))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl fmt::Display for AllocationTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== FILE ALLOCATION TABLE ===")?;
        if self.files.is_empty() {
            writeln!(f, "No files allocated")?;
        } else {
            for (name, blocks) in &self.files {
                writeln!(f, "{:>12}: blocks {:?}", name, blocks)?;
            }
        }
        Ok(())
    }
}
