//! cache
//!
//! Process-wide mapping from repository identifier to cached snapshot.
//!
//! # Design
//!
//! A long-lived status-line process queries the same handful of repositories
//! on every prompt redraw. The cache guarantees at most one [`Snapshot`] per
//! repository identifier and refreshes it in place, so memory use is bounded
//! by the number of distinct repositories visited, not the number of redraws.
//!
//! The bound itself is explicit: [`StatusCache::new`] takes a capacity and
//! evicts the least-recently-used entry when a new repository would exceed
//! it. Evicting an entry releases its repository handle.
//!
//! # Concurrency
//!
//! The map mutex is held only for lookup, insert, and recency bookkeeping.
//! Each entry carries its own mutex around the repository handle and
//! snapshot, so two refreshes of the same repository serialize while
//! refreshes of different repositories proceed independently.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::git::{GitError, Repo};
use crate::status::{refresh, Snapshot};

/// Default number of repositories kept open at once.
pub const DEFAULT_CAPACITY: usize = 16;

/// One cached repository: its open handle and its snapshot.
///
/// The handle is owned exclusively by this entry; nothing outside a refresh
/// call touches it. The entry is the stable reference callers hold - the
/// snapshot inside is mutated by refreshes but never replaced.
pub struct CacheEntry {
    state: Mutex<EntryState>,
}

struct EntryState {
    repo: Repo,
    snapshot: Snapshot,
}

impl CacheEntry {
    /// Read the current snapshot.
    ///
    /// Returns a copy taken under the entry lock, so it is internally
    /// consistent even if a refresh runs concurrently.
    pub fn snapshot(&self) -> Snapshot {
        self.lock_state().snapshot.clone()
    }

    fn lock_state(&self) -> MutexGuard<'_, EntryState> {
        // A panic mid-refresh leaves a stale-but-consistent snapshot behind;
        // recover the data instead of poisoning every later query
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for CacheEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheEntry").finish_non_exhaustive()
    }
}

struct Slot {
    entry: Arc<CacheEntry>,
    last_used: u64,
}

struct CacheInner {
    slots: HashMap<PathBuf, Slot>,
    /// Monotonic counter stamped onto a slot at every touch
    clock: u64,
}

/// The status cache.
///
/// # Example
///
/// ```no_run
/// use statline::cache::StatusCache;
/// use std::path::Path;
///
/// let cache = StatusCache::default();
/// let entry = cache.get_or_refresh(Path::new("/work/repo/.git"))?;
/// println!("{:?}", entry.snapshot().branch);
/// # Ok::<(), statline::git::GitError>(())
/// ```
pub struct StatusCache {
    capacity: usize,
    inner: Mutex<CacheInner>,
}

impl StatusCache {
    /// Create a cache holding at most `capacity` repositories.
    ///
    /// A capacity of zero is treated as one; the cache must be able to hold
    /// the repository it is currently serving.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(CacheInner {
                slots: HashMap::new(),
                clock: 0,
            }),
        }
    }

    /// Return the up-to-date entry for `repo_id`, creating it if unseen.
    ///
    /// An unseen identifier opens the repository and stores a fresh entry; a
    /// seen identifier refreshes the existing snapshot in place and returns
    /// the same entry, so two sequential calls yield the same `Arc`.
    ///
    /// # Errors
    ///
    /// - [`GitError::Open`] if a new repository cannot be opened
    /// - [`GitError::Refresh`] if reading repository state fails; the entry
    ///   stays cached but its snapshot is unreliable for this cycle
    pub fn get_or_refresh(&self, repo_id: &Path) -> Result<Arc<CacheEntry>, GitError> {
        let entry = {
            let mut inner = self.lock_inner();
            inner.clock += 1;
            let now = inner.clock;

            if let Some(slot) = inner.slots.get_mut(repo_id) {
                slot.last_used = now;
                slot.entry.clone()
            } else {
                let repo = Repo::open(repo_id)?;
                let entry = Arc::new(CacheEntry {
                    state: Mutex::new(EntryState {
                        repo,
                        snapshot: Snapshot::default(),
                    }),
                });

                if inner.slots.len() >= self.capacity {
                    evict_lru(&mut inner.slots);
                }

                inner.slots.insert(
                    repo_id.to_path_buf(),
                    Slot {
                        entry: entry.clone(),
                        last_used: now,
                    },
                );
                entry
            }
        };

        // Map lock released; only this repository's refreshes contend here
        let mut state = entry.lock_state();
        let EntryState { repo, snapshot } = &mut *state;
        refresh(repo, snapshot)?;
        drop(state);

        Ok(entry)
    }

    /// Number of repositories currently cached.
    pub fn len(&self) -> usize {
        self.lock_inner().slots.len()
    }

    /// Whether the cache holds no repositories.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `repo_id` is currently cached.
    pub fn contains(&self, repo_id: &Path) -> bool {
        self.lock_inner().slots.contains_key(repo_id)
    }

    fn lock_inner(&self) -> MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for StatusCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl std::fmt::Debug for StatusCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusCache")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish()
    }
}

/// Drop the slot with the oldest `last_used` stamp.
fn evict_lru(slots: &mut HashMap<PathBuf, Slot>) {
    let oldest = slots
        .iter()
        .min_by_key(|(_, slot)| slot.last_used)
        .map(|(id, _)| id.clone());

    if let Some(id) = oldest {
        slots.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_clamps_to_one() {
        let cache = StatusCache::new(0);
        assert_eq!(cache.capacity, 1);
    }

    #[test]
    fn new_cache_is_empty() {
        let cache = StatusCache::default();
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
        assert!(!cache.contains(Path::new("/nowhere/.git")));
    }

    #[test]
    fn open_failure_does_not_insert() {
        let cache = StatusCache::default();
        let missing = Path::new("/definitely/not/a/repository/.git");

        assert!(cache.get_or_refresh(missing).is_err());
        assert!(cache.is_empty());
    }

    // Eviction order and identity stability need real repositories to
    // exercise; they are covered in tests/status_integration.rs.
}
