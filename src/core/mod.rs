/*!
 * Core Module
 * Shared type aliases
 */

pub mod types;

pub use types::{Amount, Pid, SimTime};
