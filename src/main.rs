/*!
 * Teller OS CLI
 * Interactive console for the simulator
 */

use anyhow::{bail, Context, Result};
use std::io::{self, BufRead, Write};
use std::mem;
use std::str::FromStr;
use std::thread;
use teller_os::memory::{PageAccess, PageId};
use teller_os::storage::{self, Block};
use teller_os::{
    AllocationTable, Amount, IpcHub, Ledger, PageCache, Pid, ProcessRegistry,
    RoundRobinScheduler, RunReport, TransactionError, TransactionExecutor, TransactionKind,
    TransactionRequest,
};

const LEDGER_FILE: &str = "accounts.json";

const DEMO_BLOCKS: [Block; 8] = [98, 183, 37, 122, 14, 124, 65, 67];
const DEMO_HEAD: Block = 53;
const DEMO_DISK_SIZE: Block = 200;

struct Console {
    lines: io::Lines<io::StdinLock<'static>>,
}

impl Console {
    fn new() -> Self {
        Self {
            lines: io::stdin().lock().lines(),
        }
    }

    /// Prompt and read one line. `None` means stdin closed.
    fn read(&mut self, label: &str) -> Result<Option<String>> {
        print!("{}", label);
        io::stdout().flush().context("flush stdout")?;
        match self.lines.next() {
            Some(line) => Ok(Some(line.context("read stdin")?)),
            None => Ok(None),
        }
    }

    /// Prompt until the input parses. `None` means stdin closed.
    fn read_parsed<T: FromStr>(&mut self, label: &str) -> Result<Option<T>> {
        loop {
            let Some(raw) = self.read(label)? else {
                return Ok(None);
            };
            match raw.trim().parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => println!("Enter a valid number"),
            }
        }
    }

    fn confirm(&mut self, label: &str) -> Result<Option<bool>> {
        let Some(raw) = self.read(label)? else {
            return Ok(None);
        };
        Ok(Some(raw.trim().eq_ignore_ascii_case("y")))
    }
}

fn print_menu() {
    println!();
    println!("=== TELLER OS ===");
    println!(" 1. Create account");
    println!(" 2. Deposit");
    println!(" 3. Withdraw");
    println!(" 4. Check balance");
    println!(" 5. Show accounts");
    println!(" 6. Queue transaction");
    println!(" 7. Show process table");
    println!(" 8. Run round robin schedule");
    println!(" 9. Run queued transactions concurrently");
    println!("10. Send process message");
    println!("11. Receive process message");
    println!("12. Broadcast message");
    println!("13. Receive broadcast");
    println!("14. Show IPC status");
    println!("15. Access memory page");
    println!("16. Show memory map");
    println!("17. Allocate file");
    println!("18. Show allocation table");
    println!("19. Disk scheduling");
    println!("20. Export last schedule as JSON");
    println!(" 0. Exit");
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let ledger = Ledger::with_store(LEDGER_FILE)
        .with_context(|| format!("open ledger store {}", LEDGER_FILE))?;
    let registry = ProcessRegistry::new();
    let executor = TransactionExecutor::new(registry.clone(), ledger.clone());
    let scheduler = RoundRobinScheduler::new(executor.clone());
    let hub = IpcHub::new();
    let mut pages = PageCache::new();
    let mut fat = AllocationTable::new();
    let mut pending: Vec<TransactionRequest> = Vec::new();
    let mut last_report: Option<RunReport> = None;
    let mut next_txn: u32 = 1;

    let mut console = Console::new();

    loop {
        print_menu();
        let Some(choice) = console.read("> ")? else {
            break;
        };
        match choice.trim() {
            "1" => {
                let Some(account) = console.read("Account id: ")? else {
                    break;
                };
                let Some(initial) = console.read_parsed::<Amount>("Initial balance: ")? else {
                    break;
                };
                match ledger.create_account(account.trim(), initial) {
                    Ok(()) => println!("Account {} created", account.trim()),
                    Err(e) if e.is_benign() => println!("{}", e),
                    Err(e) => return Err(e.into()),
                }
            }
            "2" => {
                let Some(account) = console.read("Account id: ")? else {
                    break;
                };
                let Some(amount) = console.read_parsed::<Amount>("Amount: ")? else {
                    break;
                };
                match ledger.deposit(account.trim(), amount) {
                    Ok(balance) => println!("Balance of {}: {}", account.trim(), balance),
                    Err(e) if e.is_benign() => println!("{}", e),
                    Err(e) => return Err(e.into()),
                }
            }
            "3" => {
                let Some(account) = console.read("Account id: ")? else {
                    break;
                };
                let Some(amount) = console.read_parsed::<Amount>("Amount: ")? else {
                    break;
                };
                match ledger.withdraw(account.trim(), amount) {
                    Ok(balance) => println!("Balance of {}: {}", account.trim(), balance),
                    Err(e) if e.is_benign() => println!("{}", e),
                    Err(e) => return Err(e.into()),
                }
            }
            "4" => {
                let Some(account) = console.read("Account id: ")? else {
                    break;
                };
                match ledger.balance(account.trim()) {
                    Ok(balance) => println!("Balance of {}: {}", account.trim(), balance),
                    Err(e) if e.is_benign() => println!("{}", e),
                    Err(e) => return Err(e.into()),
                }
            }
            "5" => print!("{}", ledger),
            "6" => {
                let Some(action) = console.read("Action (deposit/withdraw/balance): ")? else {
                    break;
                };
                let kind = match TransactionKind::parse(&action) {
                    Ok(kind) => kind,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };
                let Some(account) = console.read("Account id: ")? else {
                    break;
                };
                let amount = if kind == TransactionKind::Balance {
                    0
                } else {
                    let Some(amount) = console.read_parsed::<Amount>("Amount: ")? else {
                        break;
                    };
                    amount
                };
                let id = format!("T{}", next_txn);
                next_txn += 1;
                pending.push(TransactionRequest::new(id.clone(), kind, account.trim(), amount));
                println!("Queued transaction {}", id);
            }
            "7" => print!("{}", registry),
            "8" => {
                if pending.is_empty() {
                    println!("No queued transactions");
                } else {
                    let batch = mem::take(&mut pending);
                    let report = scheduler.run(&batch)?;
                    print!("{}", report);
                    for slice in &report.trace {
                        println!("{}: {}", slice.transaction_id, slice.outcome);
                    }
                    last_report = Some(report);
                }
            }
            "9" => {
                if pending.is_empty() {
                    println!("No queued transactions");
                } else {
                    let batch = mem::take(&mut pending);
                    let mut handles = Vec::with_capacity(batch.len());
                    for request in batch {
                        let executor = executor.clone();
                        let hub = hub.clone();
                        handles.push(thread::spawn(
                            move || -> Result<(), TransactionError> {
                                let pid = executor.registry().create_process(&request.id);
                                let outcome = executor.execute(&request, Some(pid))?;
                                println!("[PID {}] {}", pid, outcome);
                                hub.notify_completion(pid);
                                Ok(())
                            },
                        ));
                    }
                    for handle in handles {
                        match handle.join() {
                            Ok(result) => result?,
                            Err(_) => bail!("transaction worker panicked"),
                        }
                    }
                    while let Some(note) = hub.receive_global() {
                        println!("{}", note);
                    }
                }
            }
            "10" => {
                let Some(src) = console.read_parsed::<Pid>("From PID: ")? else {
                    break;
                };
                let Some(dst) = console.read_parsed::<Pid>("To PID: ")? else {
                    break;
                };
                let Some(message) = console.read("Message: ")? else {
                    break;
                };
                hub.send_to_process(src, dst, message.trim());
                println!("Message delivered to PID {} mailbox", dst);
            }
            "11" => {
                let Some(pid) = console.read_parsed::<Pid>("PID: ")? else {
                    break;
                };
                match hub.receive_for_process(pid) {
                    Some(message) => println!("{}", message),
                    None => println!("No messages for PID {}", pid),
                }
            }
            "12" => {
                let Some(message) = console.read("Message: ")? else {
                    break;
                };
                let Some(sync) = console.confirm("Wait for acknowledgement? (y/N): ")? else {
                    break;
                };
                if sync {
                    hub.send_sync(message.trim());
                    println!("Broadcast acknowledged");
                } else {
                    hub.send_async(message.trim());
                    println!("Broadcast queued");
                }
            }
            "13" => match hub.receive_global() {
                Some(message) => println!("{}", message),
                None => println!("No broadcasts pending"),
            },
            "14" => print!("{}", hub.status()),
            "15" => {
                let Some(page) = console.read_parsed::<PageId>("Page number: ")? else {
                    break;
                };
                let Some(data) = console.read("Data: ")? else {
                    break;
                };
                match pages.access(page, data.trim()) {
                    PageAccess::Hit => println!("Page {} was already resident", page),
                    PageAccess::Inserted => println!("Page {} loaded", page),
                    PageAccess::Evicted { victim } => {
                        println!("Page {} loaded; evicted page {}", page, victim)
                    }
                }
            }
            "16" => print!("{}", pages),
            "17" => {
                let Some(name) = console.read("File name: ")? else {
                    break;
                };
                let Some(blocks) = console.read_parsed::<u32>("Blocks: ")? else {
                    break;
                };
                let assigned = fat.allocate(name.trim(), blocks);
                println!("Assigned blocks {:?}", assigned);
            }
            "18" => print!("{}", fat),
            "19" => {
                let Some(raw) = console.read("Blocks (space separated, blank for demo): ")?
                else {
                    break;
                };
                let parsed: Vec<Block> = raw
                    .split_whitespace()
                    .filter_map(|t| t.parse().ok())
                    .collect();
                let (blocks, head, size) = if parsed.is_empty() {
                    (DEMO_BLOCKS.to_vec(), DEMO_HEAD, DEMO_DISK_SIZE)
                } else {
                    let Some(head) = console.read_parsed::<Block>("Initial head: ")? else {
                        break;
                    };
                    let Some(size) = console.read_parsed::<Block>("Disk size: ")? else {
                        break;
                    };
                    (parsed, head, size)
                };
                print!("{}", storage::fcfs(&blocks));
                print!("{}", storage::scan(&blocks, head, size));
            }
            "20" => match &last_report {
                Some(report) => {
                    let encoded =
                        serde_json::to_string_pretty(report).context("encode schedule report")?;
                    println!("{}", encoded);
                }
                None => println!("No schedule has run yet"),
            },
            "0" => break,
            other => println!("Unknown choice: {}", other),
        }
    }

    println!("Goodbye");
    Ok(())
}
