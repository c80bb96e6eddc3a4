/*!
 * Scheduler Tests
 * Round robin runs over banking transactions
 */

use pretty_assertions::assert_eq;
use teller_os::ledger::Ledger;
use teller_os::process::{ProcessRegistry, ProcessState};
use teller_os::scheduler::{Quantum, RoundRobinScheduler, DEFAULT_QUANTUM};
use teller_os::transaction::{
    TransactionExecutor, TransactionKind, TransactionOutcome, TransactionRequest,
};

fn demo_scheduler() -> RoundRobinScheduler {
    let ledger = Ledger::new();
    ledger.create_account("A1", 1000).unwrap();
    ledger.create_account("A2", 500).unwrap();
    RoundRobinScheduler::new(TransactionExecutor::new(ProcessRegistry::new(), ledger))
}

fn demo_batch() -> Vec<TransactionRequest> {
    vec![
        TransactionRequest::new("T1", TransactionKind::Deposit, "A1", 500),
        TransactionRequest::new("T2", TransactionKind::Withdraw, "A2", 200),
        TransactionRequest::new("T3", TransactionKind::Balance, "A1", 0),
        TransactionRequest::new("T4", TransactionKind::Deposit, "A2", 300),
    ]
}

#[test]
fn test_demo_run_timing() {
    let scheduler = demo_scheduler();
    assert_eq!(scheduler.quantum().units(), DEFAULT_QUANTUM);

    let report = scheduler.run(&demo_batch()).unwrap();

    let starts: Vec<_> = report.trace.iter().map(|s| s.start_time).collect();
    let ends: Vec<_> = report.trace.iter().map(|s| s.end_time).collect();
    let waits: Vec<_> = report.trace.iter().map(|s| s.waiting_time).collect();
    assert_eq!(starts, vec![0, 2, 4, 6]);
    assert_eq!(ends, vec![2, 4, 6, 8]);
    assert_eq!(waits, starts);

    assert_eq!(report.metrics.processes, 4);
    assert_eq!(report.metrics.total_time, 8);
    assert_eq!(report.metrics.avg_waiting_time, 3.0);
    assert_eq!(report.metrics.avg_turnaround_time, 5.0);
    assert_eq!(report.metrics.cpu_utilization, 100.0);
}

#[test]
fn test_demo_run_outcomes_apply_in_arrival_order() {
    let scheduler = demo_scheduler();
    let report = scheduler.run(&demo_batch()).unwrap();

    let outcomes: Vec<_> = report.trace.iter().map(|s| s.outcome.clone()).collect();
    assert_eq!(
        outcomes,
        vec![
            TransactionOutcome::Deposited {
                account: "A1".to_string(),
                amount: 500,
                balance: 1500,
            },
            TransactionOutcome::Withdrawn {
                account: "A2".to_string(),
                amount: 200,
                balance: 300,
            },
            TransactionOutcome::Balance {
                account: "A1".to_string(),
                balance: 1500,
            },
            TransactionOutcome::Deposited {
                account: "A2".to_string(),
                amount: 300,
                balance: 600,
            },
        ]
    );

    let ledger = scheduler.executor().ledger();
    assert_eq!(ledger.balance("A1").unwrap(), 1500);
    assert_eq!(ledger.balance("A2").unwrap(), 600);
}

#[test]
fn test_demo_run_table_mirrors_the_trace() {
    let scheduler = demo_scheduler();
    let report = scheduler.run(&demo_batch()).unwrap();

    assert_eq!(report.table.len(), 4);
    for (slice, pcb) in report.trace.iter().zip(&report.table) {
        assert_eq!(pcb.pid, slice.pid);
        assert_eq!(pcb.transaction_id, slice.transaction_id);
        assert_eq!(pcb.state, ProcessState::Completed);
        assert_eq!(pcb.waiting_time, slice.waiting_time);
        assert_eq!(pcb.turnaround_time, slice.end_time);
    }
}

#[test]
fn test_single_process_run() {
    let scheduler = demo_scheduler();
    let batch = vec![TransactionRequest::new(
        "T1",
        TransactionKind::Balance,
        "A1",
        0,
    )];
    let report = scheduler.run(&batch).unwrap();

    assert_eq!(report.metrics.total_time, 2);
    assert_eq!(report.metrics.avg_waiting_time, 0.0);
    assert_eq!(report.metrics.avg_turnaround_time, 2.0);
    assert_eq!(report.metrics.cpu_utilization, 100.0);
}

#[test]
fn test_wider_quantum_stretches_the_clock() {
    let ledger = Ledger::new();
    ledger.create_account("A1", 1000).unwrap();
    let executor = TransactionExecutor::new(ProcessRegistry::new(), ledger);
    let scheduler = RoundRobinScheduler::with_quantum(executor, Quantum::new(5).unwrap());

    let batch = vec![
        TransactionRequest::new("T1", TransactionKind::Balance, "A1", 0),
        TransactionRequest::new("T2", TransactionKind::Balance, "A1", 0),
    ];
    let report = scheduler.run(&batch).unwrap();

    assert_eq!(report.metrics.total_time, 10);
    assert_eq!(report.metrics.avg_waiting_time, 2.5);
    assert_eq!(report.metrics.avg_turnaround_time, 7.5);
}

#[test]
fn test_empty_batch_reports_all_zero() {
    let scheduler = demo_scheduler();
    let report = scheduler.run(&[]).unwrap();

    assert!(report.trace.is_empty());
    assert_eq!(report.metrics.processes, 0);
    assert_eq!(report.metrics.total_time, 0);
    assert_eq!(report.metrics.avg_waiting_time, 0.0);
    assert_eq!(report.metrics.avg_turnaround_time, 0.0);
    assert_eq!(report.metrics.cpu_utilization, 0.0);
}

#[test]
fn test_back_to_back_runs_keep_pids_fresh() {
    let scheduler = demo_scheduler();

    let first = scheduler.run(&demo_batch()).unwrap();
    let second = scheduler.run(&demo_batch()).unwrap();

    let first_pids: Vec<_> = first.trace.iter().map(|s| s.pid).collect();
    let second_pids: Vec<_> = second.trace.iter().map(|s| s.pid).collect();
    assert_eq!(first_pids, vec![1, 2, 3, 4]);
    assert_eq!(second_pids, vec![5, 6, 7, 8]);

    // Second report's table carries both batches
    assert_eq!(second.table.len(), 8);
}

#[test]
fn test_report_rendering() {
    let scheduler = demo_scheduler();
    let report = scheduler.run(&demo_batch()).unwrap();
    let rendered = report.to_string();

    assert!(rendered.contains("ROUND ROBIN SCHEDULE"));
    assert!(rendered.contains("| T1 | T2 | T3 | T4 |"));
    assert!(rendered.contains("CPU utilization:     100.00%"));
    assert!(rendered.contains("PROCESS TABLE"));
}
