/*!
 * IPC Types
 * Status snapshots and delivery constants
 */

use crate::core::types::Pid;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Simulated acknowledgement delay applied by synchronous sends
pub const DEFAULT_ACK_DELAY: Duration = Duration::from_millis(100);

/// Point-in-time view of queue depths across the hub
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct IpcStatus {
    /// Messages waiting in the shared broadcast queue
    pub global_depth: usize,
    /// Pending message count per destination mailbox
    pub mailboxes: BTreeMap<Pid, usize>,
}

impl IpcStatus {
    #[must_use]
    pub fn total_pending(&self) -> usize {
        self.global_depth + self.mailboxes.values().sum::<usize>()
    }
}

impl fmt::Display for IpcStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== IPC STATUS ===")?;
        writeln!(f, "Global queue: {} message(s)", self.global_depth)?;
        if self.mailboxes.is_empty() {
            writeln!(f, "No process mailboxes in use")?;
        } else {
            for (pid, depth) in &self.mailboxes {
                writeln!(f, "PID {} mailbox: {} message(s)", pid, depth)?;
            }
        }
        Ok(())
    }
}
