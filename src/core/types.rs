/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type
pub type Pid = u32;

/// Simulated time, measured in abstract scheduler units (not wall time)
pub type SimTime = u64;

/// Ledger balance or transfer amount, in whole currency units
pub type Amount = u64;
