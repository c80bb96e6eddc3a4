/*!
 * Process Management
 * PCB table, states, and PID allocation
 */

mod registry;
mod types;

pub use registry::ProcessRegistry;
pub use types::{Pcb, ProcessState, ProcessTable, DEFAULT_BURST_TIME};
