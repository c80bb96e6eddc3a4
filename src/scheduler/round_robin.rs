/*!
 * Round Robin Scheduler
 * Sequential quantum-sliced execution with timing metrics
 */

use super::types::{Quantum, RunMetrics, RunReport, ScheduleSlice, SchedulerResult};
use crate::core::types::SimTime;
use crate::transaction::{TransactionExecutor, TransactionRequest};
use log::info;

/// Round robin over a batch of transactions
///
/// Every transaction fits inside one quantum, so a run is a single pass over
/// the batch in arrival order and the simulated clock advances by exactly one
/// quantum per process. Timing comes from that clock, not from wall time.
#[derive(Clone)]
pub struct RoundRobinScheduler {
    executor: TransactionExecutor,
    quantum: Quantum,
}

impl RoundRobinScheduler {
    /// Scheduler with the default quantum
    #[must_use]
    pub fn new(executor: TransactionExecutor) -> Self {
        Self {
            executor,
            quantum: Quantum::default(),
        }
    }

    /// Scheduler with a caller-chosen quantum
    #[must_use]
    pub fn with_quantum(executor: TransactionExecutor, quantum: Quantum) -> Self {
        Self { executor, quantum }
    }

    #[must_use]
    pub fn quantum(&self) -> Quantum {
        self.quantum
    }

    #[must_use]
    pub fn executor(&self) -> &TransactionExecutor {
        &self.executor
    }

    /// Schedule a batch of transactions and report what happened.
    ///
    /// Each request gets a fresh process the moment its turn arrives, and it
    /// begins running immediately, so its waiting time equals its start time
    /// and its turnaround time equals its end time.
    ///
    /// A store failure aborts the run mid-batch; requests after the failure
    /// point never receive a process.
    pub fn run(&self, requests: &[TransactionRequest]) -> SchedulerResult<RunReport> {
        let registry = self.executor.registry();
        let quantum = self.quantum.units();

        let mut clock: SimTime = 0;
        let mut total_waiting: SimTime = 0;
        let mut total_turnaround: SimTime = 0;
        let mut trace = Vec::with_capacity(requests.len());

        for request in requests {
            let pid = registry.create_process(&request.id);
            let start_time = clock;
            let waiting_time = start_time;
            registry.set_waiting_time(pid, waiting_time);

            let outcome = self.executor.execute(request, Some(pid))?;

            clock += quantum;
            let end_time = clock;
            registry.set_turnaround_time(pid, end_time);

            total_waiting += waiting_time;
            total_turnaround += end_time;
            info!(
                "Process {} held the CPU from {} to {}",
                pid, start_time, end_time
            );

            trace.push(ScheduleSlice {
                pid,
                transaction_id: request.id.clone(),
                start_time,
                end_time,
                waiting_time,
                outcome,
            });
        }

        let processes = requests.len();
        let metrics = if processes == 0 {
            RunMetrics::idle(quantum)
        } else {
            // The CPU never idles between slices, so busy time is the whole run.
            let busy_time = clock;
            RunMetrics {
                processes,
                quantum,
                total_time: clock,
                avg_waiting_time: total_waiting as f64 / processes as f64,
                avg_turnaround_time: total_turnaround as f64 / processes as f64,
                cpu_utilization: (busy_time as f64 / clock as f64) * 100.0,
            }
        };

        Ok(RunReport {
            trace,
            metrics,
            table: registry.list_processes(),
        })
    }
}
