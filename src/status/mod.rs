//! status
//!
//! The status snapshot and the staged refresh pipeline that fills it.
//!
//! # Pipeline
//!
//! [`refresh`] recomputes a [`Snapshot`] in six stages, each gated on the
//! previous one:
//!
//! 1. Reset every field to its zero value
//! 2. Full index/working-tree scan (staged, modified, conflict counts)
//! 3. Stash count
//! 4. Branch resolution (unborn ends the pipeline; detached sets only the
//!    head commit; a branch sets name, head, and upstream when configured)
//! 5. Ahead/behind, only once an upstream is resolved
//! 6. Tag association, only once a head commit is resolved
//!
//! The preconditions are enforced by the code structure, not call-order
//! discipline: stages 5 and 6 read the fields stage 4 produced and are
//! skipped when those fields are absent.
//!
//! # Failure Semantics
//!
//! Any read failure in stages 2-6 propagates as an error. The snapshot has
//! already been reset by then, so the caller must treat it as unreliable for
//! that cycle; the pipeline never retries internally.

use serde::Serialize;

use crate::core::types::Oid;
use crate::git::{GitError, Head, Repo};

/// The aggregated, queryable state of one repository at one point in time.
///
/// Invariants (upheld by [`refresh`]):
///
/// - `ahead` and `behind` are both 0 whenever `upstream` is absent
/// - `tags` is empty whenever `head` is absent
/// - every refresh starts from all-zero fields, so counts never carry over
///   from a previous repository state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Symbolic branch name; absent when HEAD is detached or history is unborn
    pub branch: Option<String>,
    /// Commit HEAD resolves to; absent only when history is unborn
    pub head: Option<Oid>,
    /// Target of the configured upstream branch, if any
    pub upstream: Option<Oid>,
    /// Commits reachable from `head` but not `upstream`
    pub ahead: usize,
    /// Commits reachable from `upstream` but not `head`
    pub behind: usize,
    /// Working-tree entries new, modified, or deleted relative to the index
    pub modified: usize,
    /// Index entries new, modified, or deleted relative to HEAD
    pub staged: usize,
    /// Entries in an unresolved merge-conflict state
    pub conflicts: usize,
    /// Saved stash entries
    pub stashes: usize,
    /// Tag names whose dereferenced target equals `head`, in reference-store
    /// enumeration order
    pub tags: Vec<String>,
}

impl Snapshot {
    /// Whether history is unborn (no commit reachable from HEAD).
    pub fn is_unborn(&self) -> bool {
        self.head.is_none()
    }

    /// Whether HEAD is detached.
    pub fn is_detached(&self) -> bool {
        self.head.is_some() && self.branch.is_none()
    }

    /// Whether the repository has both staged and further-modified content.
    pub fn is_dirty(&self) -> bool {
        self.modified > 0 && self.staged > 0
    }

    /// Zero all counters and clear every field.
    fn reset(&mut self) {
        self.branch = None;
        self.head = None;
        self.upstream = None;
        self.ahead = 0;
        self.behind = 0;
        self.modified = 0;
        self.staged = 0;
        self.conflicts = 0;
        self.stashes = 0;
        self.tags.clear();
    }
}

/// Recompute `snapshot` from the current on-disk state of `repo`.
///
/// Mutates the snapshot in place; callers holding a reference to it observe
/// the new state once this returns. See the module docs for the stage order
/// and failure semantics.
pub fn refresh(repo: &mut Repo, snapshot: &mut Snapshot) -> Result<(), GitError> {
    snapshot.reset();

    let counts = repo.change_counts()?;
    snapshot.staged = counts.staged;
    snapshot.modified = counts.modified;
    snapshot.conflicts = counts.conflicts;

    snapshot.stashes = repo.stash_count()?;

    match repo.head()? {
        Head::Unborn => return Ok(()),
        Head::Detached { head } => {
            snapshot.head = Some(head);
        }
        Head::Branch {
            name,
            head,
            upstream,
        } => {
            snapshot.branch = Some(name);
            snapshot.head = Some(head);
            snapshot.upstream = upstream;
        }
    }

    if let (Some(head), Some(upstream)) = (&snapshot.head, &snapshot.upstream) {
        let (ahead, behind) = repo.ahead_behind(head, upstream)?;
        snapshot.ahead = ahead;
        snapshot.behind = behind;
    }

    if let Some(head) = &snapshot.head {
        snapshot.tags = repo.tags_at(head)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oid(fill: char) -> Oid {
        Oid::new(fill.to_string().repeat(40)).unwrap()
    }

    #[test]
    fn default_is_unborn() {
        let snapshot = Snapshot::default();
        assert!(snapshot.is_unborn());
        assert!(!snapshot.is_detached());
        assert!(!snapshot.is_dirty());
    }

    #[test]
    fn detached_has_head_without_branch() {
        let snapshot = Snapshot {
            head: Some(oid('a')),
            ..Default::default()
        };
        assert!(snapshot.is_detached());
        assert!(!snapshot.is_unborn());
    }

    #[test]
    fn on_branch_is_not_detached() {
        let snapshot = Snapshot {
            branch: Some("main".to_string()),
            head: Some(oid('a')),
            ..Default::default()
        };
        assert!(!snapshot.is_detached());
    }

    #[test]
    fn dirty_requires_both_staged_and_modified() {
        let staged_only = Snapshot {
            staged: 1,
            ..Default::default()
        };
        assert!(!staged_only.is_dirty());

        let both = Snapshot {
            staged: 1,
            modified: 2,
            ..Default::default()
        };
        assert!(both.is_dirty());
    }

    #[test]
    fn reset_clears_every_field() {
        let mut snapshot = Snapshot {
            branch: Some("main".to_string()),
            head: Some(oid('a')),
            upstream: Some(oid('b')),
            ahead: 1,
            behind: 2,
            modified: 3,
            staged: 4,
            conflicts: 5,
            stashes: 6,
            tags: vec!["v1.0.0".to_string()],
        };
        snapshot.reset();
        assert_eq!(snapshot, Snapshot::default());
    }
}
