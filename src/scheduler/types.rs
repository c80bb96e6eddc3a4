/*!
 * Scheduler Types
 * Quantum, trace slices, metrics, and run reports
 */

use crate::core::types::{Pid, SimTime};
use crate::process::{Pcb, ProcessTable};
use crate::transaction::{TransactionError, TransactionOutcome};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Default quantum granted to each process, in simulated time units
pub const DEFAULT_QUANTUM: SimTime = 2;

/// Validated time quantum
///
/// A zero quantum would stall the simulated clock, so it cannot be
/// constructed; deserialization runs through the same check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Quantum(SimTime);

impl Quantum {
    pub fn new(units: SimTime) -> Result<Self, SchedulerError> {
        if units == 0 {
            return Err(SchedulerError::InvalidQuantum(units));
        }
        Ok(Self(units))
    }

    #[inline(always)]
    #[must_use]
    pub const fn units(&self) -> SimTime {
        self.0
    }
}

impl Default for Quantum {
    fn default() -> Self {
        Self(DEFAULT_QUANTUM)
    }
}

impl<'de> Deserialize<'de> for Quantum {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let units = SimTime::deserialize(deserializer)?;
        Quantum::new(units).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Quantum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} unit(s)", self.0)
    }
}

/// Scheduler errors
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum SchedulerError {
    #[error("Invalid time quantum: {0} (must be at least 1)")]
    #[diagnostic(
        code(scheduler::invalid_quantum),
        help("Use a quantum of one time unit or more")
    )]
    InvalidQuantum(SimTime),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Execution(#[from] TransactionError),
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// One slot of CPU time granted to a process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ScheduleSlice {
    pub pid: Pid,
    pub transaction_id: String,
    pub start_time: SimTime,
    pub end_time: SimTime,
    pub waiting_time: SimTime,
    pub outcome: TransactionOutcome,
}

/// Aggregate figures for one scheduling run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RunMetrics {
    pub processes: usize,
    pub quantum: SimTime,
    pub total_time: SimTime,
    pub avg_waiting_time: f64,
    pub avg_turnaround_time: f64,
    pub cpu_utilization: f64,
}

impl RunMetrics {
    /// Metrics for a run that scheduled nothing
    #[must_use]
    pub fn idle(quantum: SimTime) -> Self {
        Self {
            processes: 0,
            quantum,
            total_time: 0,
            avg_waiting_time: 0.0,
            avg_turnaround_time: 0.0,
            cpu_utilization: 0.0,
        }
    }
}

/// Full record of a scheduling run: trace, metrics, and final table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RunReport {
    pub trace: Vec<ScheduleSlice>,
    pub metrics: RunMetrics,
    pub table: Vec<Pcb>,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== ROUND ROBIN SCHEDULE ===")?;
        writeln!(f, "Gantt chart:")?;
        if self.trace.is_empty() {
            writeln!(f, "(idle)")?;
        } else {
            let mut bar = String::new();
            let mut times = String::new();
            for slice in &self.trace {
                let cell = format!("| {} ", slice.transaction_id);
                times.push_str(&format!("{:<width$}", slice.start_time, width = cell.len()));
                bar.push_str(&cell);
            }
            bar.push('|');
            if let Some(last) = self.trace.last() {
                times.push_str(&last.end_time.to_string());
            }
            writeln!(f, "{}", bar)?;
            writeln!(f, "{}", times)?;
        }

        writeln!(f)?;
        writeln!(f, "Processes scheduled: {}", self.metrics.processes)?;
        writeln!(f, "Time quantum:        {}", self.metrics.quantum)?;
        writeln!(f, "Total time:          {}", self.metrics.total_time)?;
        writeln!(f, "Average waiting:     {:.2}", self.metrics.avg_waiting_time)?;
        writeln!(
            f,
            "Average turnaround:  {:.2}",
            self.metrics.avg_turnaround_time
        )?;
        writeln!(f, "CPU utilization:     {:.2}%", self.metrics.cpu_utilization)?;

        writeln!(f)?;
        write!(f, "{}", ProcessTable(&self.table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_quantum_rejected() {
        assert_eq!(
            Quantum::new(0).unwrap_err(),
            SchedulerError::InvalidQuantum(0)
        );
    }

    #[test]
    fn test_default_quantum() {
        assert_eq!(Quantum::default().units(), DEFAULT_QUANTUM);
    }

    #[test]
    fn test_quantum_deserialization_validates() {
        let quantum: Quantum = serde_json::from_str("3").unwrap();
        assert_eq!(quantum.units(), 3);
        assert!(serde_json::from_str::<Quantum>("0").is_err());
    }

    #[test]
    fn test_idle_metrics_are_all_zero() {
        let metrics = RunMetrics::idle(2);
        assert_eq!(metrics.processes, 0);
        assert_eq!(metrics.total_time, 0);
        assert_eq!(metrics.avg_waiting_time, 0.0);
        assert_eq!(metrics.cpu_utilization, 0.0);
    }

    #[test]
    fn test_empty_report_renders_idle() {
        let report = RunReport {
            trace: Vec::new(),
            metrics: RunMetrics::idle(2),
            table: Vec::new(),
        };
        assert!(report.to_string().contains("(idle)"));
    }
}
