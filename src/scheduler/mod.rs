/*!
 * CPU Scheduling
 * Round robin execution and run reporting
 */

mod round_robin;
mod types;

pub use round_robin::RoundRobinScheduler;
pub use types::{
    Quantum, RunMetrics, RunReport, ScheduleSlice, SchedulerError, SchedulerResult,
    DEFAULT_QUANTUM,
};
