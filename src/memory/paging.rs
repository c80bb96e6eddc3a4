/*!
 * Page Cache
 * Fixed-frame memory with LRU replacement
 */

use ahash::RandomState;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::fmt;

pub type PageId = u32;

/// Default number of physical frames
pub const DEFAULT_FRAMES: usize = 3;

/// What happened on a page access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "access", rename_all = "snake_case")]
pub enum PageAccess {
    /// Page was already resident
    Hit,
    /// Page loaded into a free frame
    Inserted,
    /// Page loaded after evicting the least recently used page
    Evicted { victim: PageId },
}

/// LRU page cache
///
/// `recency` orders resident pages from least to most recently used; the
/// front is always the next eviction victim.
pub struct PageCache {
    frames: usize,
    pages: HashMap<PageId, String, RandomState>,
    recency: VecDeque<PageId>,
}

impl PageCache {
    #[must_use]
    pub fn new() -> Self {
        Self::with_frames(DEFAULT_FRAMES)
    }

    /// Cache with a caller-chosen frame count, floored at one frame
    #[must_use]
    pub fn with_frames(frames: usize) -> Self {
        Self {
            frames: frames.max(1),
            pages: HashMap::default(),
            recency: VecDeque::new(),
        }
    }

    /// Touch a page, loading it if needed.
    ///
    /// Hits refresh both the stored data and the recency position. Misses on
    /// a full cache evict the least recently used page first.
    pub fn access(&mut self, page: PageId, data: impl Into<String>) -> PageAccess {
        let data = data.into();
        if self.pages.contains_key(&page) {
            self.pages.insert(page, data);
            self.touch(page);
            return PageAccess::Hit;
        }

        let evicted = if self.pages.len() >= self.frames {
            self.recency.pop_front().map(|victim| {
                self.pages.remove(&victim);
                victim
            })
        } else {
            None
        };

        self.pages.insert(page, data);
        self.recency.push_back(page);

        match evicted {
            Some(victim) => {
                info!("Evicted page {} to load page {}", victim, page);
                PageAccess::Evicted { victim }
            }
            None => PageAccess::Inserted,
        }
    }

    #[must_use]
    pub fn contains(&self, page: PageId) -> bool {
        self.pages.contains_key(&page)
    }

    #[must_use]
    pub fn frames(&self) -> usize {
        self.frames
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Resident pages from least to most recently used
    #[must_use]
    pub fn snapshot(&self) -> Vec<(PageId, String)> {
        self.recency
            .iter()
            .filter_map(|page| self.pages.get(page).map(|data| (*page, data.clone())))
            .collect()
    }

    fn touch(&mut self, page: PageId) {
        if let Some(pos) = self.recency.iter().position(|&p| p == page) {
            self.recency.remove(pos);
        }
        self.recency.push_back(page);
    }
}

impl Default for PageCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PageCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== MEMORY MAP ===")?;
        if self.is_empty() {
            writeln!(f, "No pages resident")?;
        } else {
            for (page, data) in self.snapshot() {
                writeln!(f, "Page {:>4}: {}", page, data)?;
            }
        }
        Ok(())
    }
}
