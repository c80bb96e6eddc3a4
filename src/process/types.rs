/*!
 * Process Types
 * Control blocks and the process state machine
 */

use crate::core::types::{Pid, SimTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default burst length granted to every simulated process
pub const DEFAULT_BURST_TIME: SimTime = 1;

/// Process state
///
/// Core flows only ever walk the nominal chain New -> Ready -> Running ->
/// Completed; Waiting exists for callers that request it explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Control block allocated, not yet admitted
    New,
    /// Admitted and eligible for the CPU
    Ready,
    /// Currently executing its transaction
    Running,
    /// Parked on an explicit caller request
    Waiting,
    /// Transaction finished; kept in the table for reporting
    Completed,
}

impl ProcessState {
    /// Check whether `next` is the nominal successor of this state.
    ///
    /// Any other transition (including every entry into `Waiting`) is legal
    /// but logged by the registry so it is never taken silently.
    #[must_use]
    pub const fn is_nominal_transition(self, next: ProcessState) -> bool {
        matches!(
            (self, next),
            (ProcessState::New, ProcessState::Ready)
                | (ProcessState::Ready, ProcessState::Running)
                | (ProcessState::Running, ProcessState::Completed)
        )
    }

    /// Check if the process has finished
    #[inline(always)]
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, ProcessState::Completed)
    }

    /// Uppercase label used in table output
    #[inline(always)]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProcessState::New => "NEW",
            ProcessState::Ready => "READY",
            ProcessState::Running => "RUNNING",
            ProcessState::Waiting => "WAITING",
            ProcessState::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() keeps table column widths working.
        f.pad(self.as_str())
    }
}

/// Process control block
///
/// Identity (`pid`, `transaction_id`, `arrival_time`, `burst_time`) is fixed
/// at creation; only `state`, `waiting_time`, and `turnaround_time` change
/// afterwards, and only through the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Pcb {
    pub pid: Pid,
    pub state: ProcessState,
    pub transaction_id: String,
    pub arrival_time: SimTime,
    pub burst_time: SimTime,
    pub waiting_time: SimTime,
    pub turnaround_time: SimTime,
}

impl Pcb {
    #[must_use]
    pub fn new(pid: Pid, transaction_id: impl Into<String>) -> Self {
        Self {
            pid,
            state: ProcessState::New,
            transaction_id: transaction_id.into(),
            arrival_time: 0,
            burst_time: DEFAULT_BURST_TIME,
            waiting_time: 0,
            turnaround_time: 0,
        }
    }
}

/// Borrowed view that renders a PCB collection as an aligned table.
pub struct ProcessTable<'a>(pub &'a [Pcb]);

impl fmt::Display for ProcessTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== PROCESS TABLE ===")?;
        writeln!(
            f,
            "{:>6} {:>14} {:>11} {:>10} {:>11}",
            "PID", "Transaction", "Status", "Wait Time", "Turnaround"
        )?;
        writeln!(f, "{}", "-".repeat(56))?;
        for pcb in self.0 {
            writeln!(
                f,
                "{:>6} {:>14} {:>11} {:>10} {:>11}",
                pcb.pid, pcb.transaction_id, pcb.state, pcb.waiting_time, pcb.turnaround_time
            )?;
        }
        Ok(())
    }
}
