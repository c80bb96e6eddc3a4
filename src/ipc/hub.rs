/*!
 * IPC Hub
 * Per-process mailboxes plus a shared broadcast queue
 */

use super::types::{IpcStatus, DEFAULT_ACK_DELAY};
use crate::core::types::Pid;
use ahash::RandomState;
use log::info;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

struct HubInner {
    mailboxes: HashMap<Pid, VecDeque<String>, RandomState>,
    global_queue: VecDeque<String>,
}

/// Message exchange for simulated processes
///
/// One mutex guards every queue, so each send or receive is a single atomic
/// step and per-queue FIFO order always holds. Clones share the same queues.
#[derive(Clone)]
pub struct IpcHub {
    inner: Arc<Mutex<HubInner>>,
    ack_delay: Duration,
}

impl IpcHub {
    #[must_use]
    pub fn new() -> Self {
        Self::with_ack_delay(DEFAULT_ACK_DELAY)
    }

    /// Build a hub with a custom synchronous acknowledgement delay.
    ///
    /// Tests shrink the delay so sync-send assertions stay fast.
    #[must_use]
    pub fn with_ack_delay(ack_delay: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HubInner {
                mailboxes: HashMap::default(),
                global_queue: VecDeque::new(),
            })),
            ack_delay,
        }
    }

    /// Deliver a directed message into the destination mailbox.
    ///
    /// The stored text is the rendered envelope, so a later receive needs no
    /// extra context to show who sent it.
    pub fn send_to_process(&self, src: Pid, dst: Pid, message: &str) {
        let envelope = format!("[PID {} -> PID {}]: {}", src, dst, message);
        let mut inner = self.inner.lock();
        inner.mailboxes.entry(dst).or_default().push_back(envelope);
        drop(inner);
        info!("IPC message sent from PID {} to PID {}", src, dst);
    }

    /// Pop the oldest message for a process.
    ///
    /// A process that never received anything has no mailbox; asking does not
    /// create one.
    #[must_use]
    pub fn receive_for_process(&self, pid: Pid) -> Option<String> {
        let mut inner = self.inner.lock();
        inner.mailboxes.get_mut(&pid)?.pop_front()
    }

    /// Enqueue on the shared queue and block for the acknowledgement delay.
    ///
    /// The message is already visible to receivers while the sender sleeps;
    /// the delay happens after the lock is released.
    pub fn send_sync(&self, message: impl Into<String>) {
        let message = message.into();
        let mut inner = self.inner.lock();
        inner.global_queue.push_back(message);
        drop(inner);

        info!("Sync message enqueued; awaiting acknowledgement");
        thread::sleep(self.ack_delay);
    }

    /// Enqueue on the shared queue and return immediately
    pub fn send_async(&self, message: impl Into<String>) {
        let message = message.into();
        let mut inner = self.inner.lock();
        inner.global_queue.push_back(message);
        drop(inner);
        info!("Async message enqueued");
    }

    /// Pop the oldest message from the shared queue
    #[must_use]
    pub fn receive_global(&self) -> Option<String> {
        self.inner.lock().global_queue.pop_front()
    }

    /// Broadcast that a process finished its work
    pub fn notify_completion(&self, pid: Pid) {
        self.send_async(format!("Process {} has completed", pid));
    }

    /// Snapshot queue depths across the hub
    #[must_use]
    pub fn status(&self) -> IpcStatus {
        let inner = self.inner.lock();
        IpcStatus {
            global_depth: inner.global_queue.len(),
            mailboxes: inner
                .mailboxes
                .iter()
                .map(|(pid, queue)| (*pid, queue.len()))
                .collect(),
        }
    }
}

impl Default for IpcHub {
    fn default() -> Self {
        Self::new()
    }
}
