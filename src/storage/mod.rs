/*!
 * Storage Simulation
 * Disk seek scheduling and file allocation
 */

mod disk;
mod fat;

pub use disk::{fcfs, scan, Block, SeekPolicy, SeekReport, SeekStep};
pub use fat::AllocationTable;
