/*!
 * IPC Tests
 * Mailbox delivery, broadcast ordering, and sync send timing
 */

use pretty_assertions::assert_eq;
use std::thread;
use std::time::{Duration, Instant};
use teller_os::IpcHub;

#[test]
fn test_cross_thread_delivery() {
    let hub = IpcHub::with_ack_delay(Duration::from_millis(1));

    let mut handles = Vec::new();
    for sender in 1..=4u32 {
        let hub = hub.clone();
        handles.push(thread::spawn(move || {
            for i in 0..5 {
                hub.send_to_process(sender, 9, &format!("m{}", i));
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let mut count = 0;
    while hub.receive_for_process(9).is_some() {
        count += 1;
    }
    assert_eq!(count, 20);
}

#[test]
fn test_single_sender_order_is_preserved() {
    let hub = IpcHub::with_ack_delay(Duration::from_millis(1));

    let sender = {
        let hub = hub.clone();
        thread::spawn(move || {
            for i in 0..10 {
                hub.send_to_process(3, 7, &format!("m{}", i));
            }
        })
    };
    sender.join().unwrap();

    let mut received = Vec::new();
    while let Some(message) = hub.receive_for_process(7) {
        received.push(message);
    }
    let expected: Vec<String> = (0..10)
        .map(|i| format!("[PID 3 -> PID 7]: m{}", i))
        .collect();
    assert_eq!(received, expected);
}

#[test]
fn test_sync_message_is_visible_while_sender_waits() {
    let hub = IpcHub::with_ack_delay(Duration::from_millis(200));

    let sender = {
        let hub = hub.clone();
        thread::spawn(move || {
            let started = Instant::now();
            hub.send_sync("ping");
            started.elapsed()
        })
    };

    // Poll well inside the acknowledgement window.
    let mut seen_early = false;
    let started = Instant::now();
    while started.elapsed() < Duration::from_millis(150) {
        if hub.receive_global().is_some() {
            seen_early = true;
            break;
        }
        thread::sleep(Duration::from_millis(5));
    }

    let sender_elapsed = sender.join().unwrap();
    assert!(seen_early, "message should be queued before the ack delay ends");
    assert!(sender_elapsed >= Duration::from_millis(200));
}

#[test]
fn test_async_send_is_not_blocked_by_a_sync_ack() {
    let hub = IpcHub::with_ack_delay(Duration::from_millis(250));

    let sender = {
        let hub = hub.clone();
        thread::spawn(move || hub.send_sync("sync"))
    };

    // Let the sync sender enqueue and enter its acknowledgement sleep.
    thread::sleep(Duration::from_millis(50));

    let started = Instant::now();
    hub.send_async("async");
    assert!(started.elapsed() < Duration::from_millis(100));

    sender.join().unwrap();
    assert_eq!(hub.receive_global(), Some("sync".to_string()));
    assert_eq!(hub.receive_global(), Some("async".to_string()));
}

#[test]
fn test_broadcasts_drain_in_send_order() {
    let hub = IpcHub::with_ack_delay(Duration::from_millis(1));
    hub.send_async("first");
    hub.send_sync("second");
    hub.send_async("third");

    assert_eq!(hub.receive_global(), Some("first".to_string()));
    assert_eq!(hub.receive_global(), Some("second".to_string()));
    assert_eq!(hub.receive_global(), Some("third".to_string()));
    assert_eq!(hub.receive_global(), None);
}

#[test]
fn test_completion_notices() {
    let hub = IpcHub::with_ack_delay(Duration::from_millis(1));
    hub.notify_completion(1);
    hub.notify_completion(2);

    assert_eq!(
        hub.receive_global(),
        Some("Process 1 has completed".to_string())
    );
    assert_eq!(
        hub.receive_global(),
        Some("Process 2 has completed".to_string())
    );
}

#[test]
fn test_status_counts_queues_without_draining_them() {
    let hub = IpcHub::with_ack_delay(Duration::from_millis(1));
    hub.send_to_process(1, 2, "a");
    hub.send_to_process(3, 2, "b");
    hub.send_async("global");

    let status = hub.status();
    assert_eq!(status.global_depth, 1);
    assert_eq!(status.mailboxes.get(&2), Some(&2));
    assert_eq!(status.total_pending(), 3);

    // Status is a snapshot; the queues are untouched.
    assert!(hub.receive_for_process(2).is_some());
    assert!(hub.receive_global().is_some());
}

#[test]
fn test_receive_on_unknown_pid_is_none() {
    let hub = IpcHub::with_ack_delay(Duration::from_millis(1));
    assert_eq!(hub.receive_for_process(77), None);
    assert!(hub.status().mailboxes.is_empty());
}
