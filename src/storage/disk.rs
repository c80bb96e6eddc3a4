/*!
 * Disk Scheduling
 * Seek simulation under FCFS and SCAN policies
 */

use serde::{Deserialize, Serialize};
use std::fmt;

pub type Block = u32;

/// Head movement policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeekPolicy {
    Fcfs,
    Scan,
}

impl SeekPolicy {
    #[inline(always)]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            SeekPolicy::Fcfs => "FCFS",
            SeekPolicy::Scan => "SCAN",
        }
    }
}

impl fmt::Display for SeekPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One head movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SeekStep {
    pub from: Block,
    pub to: Block,
    pub distance: u32,
}

impl SeekStep {
    fn new(from: Block, to: Block) -> Self {
        Self {
            from,
            to,
            distance: from.abs_diff(to),
        }
    }
}

/// Outcome of servicing a request batch
///
/// `steps` records every head movement, including SCAN's sweep to the disk
/// edge; `avg_seek` averages over the requests serviced, not the movements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SeekReport {
    pub policy: SeekPolicy,
    pub steps: Vec<SeekStep>,
    pub total_seek: u64,
    pub avg_seek: f64,
}

impl SeekReport {
    fn idle(policy: SeekPolicy) -> Self {
        Self {
            policy,
            steps: Vec::new(),
            total_seek: 0,
            avg_seek: 0.0,
        }
    }
}

impl fmt::Display for SeekReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== DISK SCHEDULE ({}) ===", self.policy)?;
        if self.steps.is_empty() {
            writeln!(f, "No requests serviced")?;
        } else {
            for step in &self.steps {
                writeln!(
                    f,
                    "{:>4} -> {:>4} (seek {:>4})",
                    step.from, step.to, step.distance
                )?;
            }
        }
        writeln!(f, "Total seek:   {}", self.total_seek)?;
        writeln!(f, "Average seek: {:.2}", self.avg_seek)
    }
}

/// Service requests in arrival order with the head parked at block 0.
#[must_use]
pub fn fcfs(requests: &[Block]) -> SeekReport {
    if requests.is_empty() {
        return SeekReport::idle(SeekPolicy::Fcfs);
    }

    let mut head: Block = 0;
    let mut steps = Vec::with_capacity(requests.len());
    let mut total_seek: u64 = 0;

    for &request in requests {
        let step = SeekStep::new(head, request);
        total_seek += u64::from(step.distance);
        head = request;
        steps.push(step);
    }

    SeekReport {
        policy: SeekPolicy::Fcfs,
        avg_seek: total_seek as f64 / requests.len() as f64,
        steps,
        total_seek,
    }
}

/// Sweep right from the head to the last block, then service the left side
/// on the way back.
///
/// The sweep always reaches block `disk_size - 1` before reversing, even
/// when nothing is queued on the left.
#[must_use]
pub fn scan(requests: &[Block], initial_head: Block, disk_size: Block) -> SeekReport {
    if requests.is_empty() || disk_size == 0 {
        return SeekReport::idle(SeekPolicy::Scan);
    }

    let mut sorted = requests.to_vec();
    sorted.sort_unstable();
    let split = sorted.partition_point(|&r| r < initial_head);
    let (left, right) = sorted.split_at(split);

    let mut head = initial_head;
    let mut steps = Vec::with_capacity(requests.len() + 1);
    let mut total_seek: u64 = 0;

    for &request in right {
        let step = SeekStep::new(head, request);
        total_seek += u64::from(step.distance);
        head = request;
        steps.push(step);
    }

    let edge = disk_size - 1;
    if head != edge {
        let step = SeekStep::new(head, edge);
        total_seek += u64::from(step.distance);
        head = edge;
        steps.push(step);
    }

    for &request in left.iter().rev() {
        let step = SeekStep::new(head, request);
        total_seek += u64::from(step.distance);
        head = request;
        steps.push(step);
    }

    SeekReport {
        policy: SeekPolicy::Scan,
        avg_seek: total_seek as f64 / requests.len() as f64,
        steps,
        total_seek,
    }
}
