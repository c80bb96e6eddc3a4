/*!
 * Inter-Process Communication
 * Directed mailboxes, broadcast queue, sync and async sends
 */

mod hub;
mod types;

pub use hub::IpcHub;
pub use types::{IpcStatus, DEFAULT_ACK_DELAY};
