/*!
 * Memory Management
 * LRU paging simulation
 */

mod paging;

pub use paging::{PageAccess, PageCache, PageId, DEFAULT_FRAMES};
