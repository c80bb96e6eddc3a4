/*!
 * Process Registry
 * Thread-safe PCB table with monotonic PID allocation
 */

use super::types::{Pcb, ProcessState, ProcessTable};
use crate::core::types::{Pid, SimTime};
use log::{debug, info, warn};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

struct RegistryInner {
    table: Vec<Pcb>,
    next_pid: Pid,
}

/// Central process table
///
/// All reads and writes go through one lock, so every observer sees the table
/// move through whole operations. Clones share the same underlying table.
///
/// # Performance
/// Lookups scan the PCB vector; the table is sized for interactive runs, not
/// for millions of processes.
#[derive(Clone)]
pub struct ProcessRegistry {
    inner: Arc<RwLock<RegistryInner>>,
}

impl ProcessRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(RegistryInner {
                table: Vec::new(),
                next_pid: 1,
            })),
        }
    }

    /// Create a process for a transaction and admit it to the ready state.
    ///
    /// PID allocation happens under the table lock, so concurrent creators
    /// always receive distinct consecutive PIDs. The PCB is already `Ready`
    /// by the time any snapshot can observe it.
    pub fn create_process(&self, transaction_id: impl Into<String>) -> Pid {
        let transaction_id = transaction_id.into();
        let mut inner = self.inner.write();
        let pid = inner.next_pid;
        inner.next_pid += 1;

        let mut pcb = Pcb::new(pid, transaction_id.clone());
        pcb.state = ProcessState::Ready;
        inner.table.push(pcb);
        drop(inner);

        info!("Created process {} for transaction {}", pid, transaction_id);
        pid
    }

    /// Set the state of a process. Unknown PIDs are ignored.
    ///
    /// Transitions off the nominal chain are applied as requested but logged,
    /// so a scheduler bug cannot rewrite history silently.
    pub fn update_state(&self, pid: Pid, next: ProcessState) {
        let mut inner = self.inner.write();
        let Some(pcb) = inner.table.iter_mut().find(|p| p.pid == pid) else {
            return;
        };
        if !pcb.state.is_nominal_transition(next) {
            warn!(
                "Process {} taking non-nominal transition {} -> {}",
                pid, pcb.state, next
            );
        }
        pcb.state = next;
        drop(inner);
        info!("Process {} is now {}", pid, next);
    }

    /// Record the waiting time computed by the scheduler. Unknown PIDs are ignored.
    pub fn set_waiting_time(&self, pid: Pid, waiting_time: SimTime) {
        let mut inner = self.inner.write();
        if let Some(pcb) = inner.table.iter_mut().find(|p| p.pid == pid) {
            pcb.waiting_time = waiting_time;
            debug!("Process {} waiting time set to {}", pid, waiting_time);
        }
    }

    /// Record the turnaround time computed by the scheduler. Unknown PIDs are ignored.
    pub fn set_turnaround_time(&self, pid: Pid, turnaround_time: SimTime) {
        let mut inner = self.inner.write();
        if let Some(pcb) = inner.table.iter_mut().find(|p| p.pid == pid) {
            pcb.turnaround_time = turnaround_time;
            debug!("Process {} turnaround time set to {}", pid, turnaround_time);
        }
    }

    /// Fetch a copy of one PCB
    #[must_use]
    pub fn get_process(&self, pid: Pid) -> Option<Pcb> {
        self.inner.read().table.iter().find(|p| p.pid == pid).cloned()
    }

    /// Snapshot the whole table in creation order.
    ///
    /// The returned PCBs are detached copies; later registry updates never
    /// show through them.
    #[must_use]
    pub fn list_processes(&self) -> Vec<Pcb> {
        self.inner.read().table.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().table.is_empty()
    }

    /// Drop every PCB. The PID counter keeps running, so PIDs stay unique
    /// for the lifetime of the registry.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        let removed = inner.table.len();
        inner.table.clear();
        drop(inner);
        info!("Cleared {} processes from the table", removed);
    }
}

impl Default for ProcessRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProcessRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.list_processes();
        write!(f, "{}", ProcessTable(&snapshot))
    }
}
