/*!
 * Teller OS
 * Pedagogical OS mechanism simulator over a toy bank ledger
 *
 * Bank transactions stand in for workloads: each one runs inside a simulated
 * process that moves through a PCB table, gets CPU time from a round robin
 * scheduler, and talks to its peers through an IPC hub. Paging and disk
 * scheduling round out the classic mechanism set.
 */

pub mod core;
pub mod ipc;
pub mod ledger;
pub mod memory;
pub mod process;
pub mod scheduler;
pub mod storage;
pub mod transaction;

pub use crate::core::{Amount, Pid, SimTime};
pub use ipc::{IpcHub, IpcStatus};
pub use ledger::{Ledger, LedgerError, LedgerResult, LedgerStore};
pub use memory::{PageAccess, PageCache};
pub use process::{Pcb, ProcessRegistry, ProcessState, ProcessTable};
pub use scheduler::{
    Quantum, RoundRobinScheduler, RunMetrics, RunReport, ScheduleSlice, SchedulerError,
};
pub use storage::{AllocationTable, SeekPolicy, SeekReport};
pub use transaction::{
    TransactionError, TransactionExecutor, TransactionKind, TransactionOutcome,
    TransactionRequest,
};
