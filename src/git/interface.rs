//! git::interface
//!
//! Git interface implementation using git2.
//!
//! The [`Repo`] struct is a handle to one open repository. It is owned
//! exclusively by the cache entry for its repository identifier and lives for
//! as long as that entry does, so repeated status queries reuse the open
//! repository instead of re-walking the object database setup on every prompt
//! redraw.
//!
//! # Error Handling
//!
//! Git errors are categorized into typed variants:
//! - [`GitError::DirectoryGone`]: the queried working directory no longer exists
//! - [`GitError::Locate`]: unexpected I/O failure during repository discovery
//! - [`GitError::Open`]: the located repository could not be opened
//! - [`GitError::Refresh`]: any failure reading repository metadata during a
//!   status refresh

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::types::{Oid, TypeError};

/// Errors from Git operations.
///
/// The categorization lets the caller distinguish conditions it renders
/// differently: a vanished working directory gets a degraded display, while
/// a failed refresh means the cached snapshot is stale for that cycle.
#[derive(Debug, Error)]
pub enum GitError {
    /// The supplied working directory no longer exists.
    #[error("directory no longer exists: {path}")]
    DirectoryGone {
        /// The directory that was queried
        path: PathBuf,
    },

    /// Unexpected I/O failure while walking ancestor directories.
    #[error("error searching for a repository from {path}: {message}")]
    Locate {
        /// The directory the search started from
        path: PathBuf,
        /// Description of the failure
        message: String,
    },

    /// The located repository could not be opened.
    #[error("failed to open repository at {path}: {message}")]
    Open {
        /// The repository metadata path
        path: PathBuf,
        /// Description of the failure
        message: String,
    },

    /// Failure reading repository metadata during a snapshot refresh.
    #[error("failed to read repository state: {message}")]
    Refresh {
        /// Description of the failure
        message: String,
    },
}

impl GitError {
    /// Wrap a git2 error encountered during a refresh.
    fn refresh(err: git2::Error) -> Self {
        GitError::Refresh {
            message: err.message().to_string(),
        }
    }
}

impl From<TypeError> for GitError {
    fn from(err: TypeError) -> Self {
        GitError::Refresh {
            message: err.to_string(),
        }
    }
}

/// Counts from one full scan of the index and working tree.
///
/// A single path may contribute to more than one counter: a file staged and
/// then modified again differs from HEAD in the index *and* from the index in
/// the working tree, so it counts as both staged and modified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeCounts {
    /// Index entries new, modified, or deleted relative to HEAD
    pub staged: usize,
    /// Working-tree entries new, modified, or deleted relative to the index
    pub modified: usize,
    /// Entries in an unresolved merge-conflict state
    pub conflicts: usize,
}

/// Resolution of HEAD at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    /// HEAD exists but no commit has ever been made.
    Unborn,

    /// HEAD refers directly to a commit rather than a branch.
    Detached {
        /// The commit HEAD points to
        head: Oid,
    },

    /// HEAD is on a branch.
    Branch {
        /// Short branch name (e.g. "main")
        name: String,
        /// The branch's target commit
        head: Oid,
        /// Target of the configured upstream branch, if any
        upstream: Option<Oid>,
    },
}

/// A handle to one open Git repository.
///
/// All repository reads flow through this type. No other module imports
/// `git2` directly.
pub struct Repo {
    /// The underlying git2 repository
    repo: git2::Repository,
}

impl std::fmt::Debug for Repo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repo")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Repo {
    /// Open the repository whose metadata store is at `git_dir`.
    ///
    /// `git_dir` is the repository identifier produced by [`crate::git::locate`]:
    /// the `.git` directory (or gitfile, for linked worktrees) of the
    /// repository. The enclosing working directory is what actually gets
    /// opened, so worktree gitfiles resolve correctly.
    ///
    /// # Errors
    ///
    /// - [`GitError::Open`] if the repository cannot be opened
    pub fn open(git_dir: &Path) -> Result<Self, GitError> {
        let root = git_dir.parent().ok_or_else(|| GitError::Open {
            path: git_dir.to_path_buf(),
            message: "metadata path has no parent directory".to_string(),
        })?;

        let repo = git2::Repository::open(root).map_err(|e| GitError::Open {
            path: git_dir.to_path_buf(),
            message: e.message().to_string(),
        })?;

        Ok(Self { repo })
    }

    /// Scan the index and working tree, classifying every changed path.
    ///
    /// This is the dominant cost of a refresh: one full `statuses()` pass
    /// over the repository, with untracked files included and ignored files
    /// excluded.
    pub fn change_counts(&self) -> Result<ChangeCounts, GitError> {
        let mut opts = git2::StatusOptions::new();
        opts.include_untracked(true).include_ignored(false);

        let statuses = self
            .repo
            .statuses(Some(&mut opts))
            .map_err(GitError::refresh)?;

        let mut counts = ChangeCounts::default();

        for entry in statuses.iter() {
            let status = entry.status();

            if status.is_index_new() || status.is_index_modified() || status.is_index_deleted() {
                counts.staged += 1;
            }

            if status.is_wt_new() || status.is_wt_modified() || status.is_wt_deleted() {
                counts.modified += 1;
            }

            if status.is_conflicted() {
                counts.conflicts += 1;
            }
        }

        Ok(counts)
    }

    /// Count saved stash entries.
    ///
    /// Enumerates stash entries structurally rather than line-counting the
    /// stash reflog. A repository with no stash yields zero; this is not an
    /// error.
    pub fn stash_count(&mut self) -> Result<usize, GitError> {
        let mut count = 0usize;
        self.repo
            .stash_foreach(|_, _, _| {
                count += 1;
                true
            })
            .map_err(GitError::refresh)?;

        Ok(count)
    }

    /// Resolve HEAD into branch name, target commit, and upstream target.
    ///
    /// Unborn history and detached HEAD are normal outcomes, expressed as
    /// [`Head`] variants. A branch without a configured upstream yields
    /// `upstream: None`.
    pub fn head(&self) -> Result<Head, GitError> {
        let reference = match self.repo.head() {
            Ok(r) => r,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return Ok(Head::Unborn),
            Err(e) => return Err(GitError::refresh(e)),
        };

        let head = reference
            .peel_to_commit()
            .map_err(GitError::refresh)?
            .id();
        let head = Oid::new(head.to_string())?;

        if !reference.is_branch() {
            return Ok(Head::Detached { head });
        }

        let name = match reference.shorthand() {
            Some(n) => n.to_string(),
            // Non-UTF8 branch name: treat as detached rather than lie
            None => return Ok(Head::Detached { head }),
        };

        let branch = git2::Branch::wrap(reference);
        let upstream = match branch.upstream() {
            Ok(up) => {
                let oid = up.get().peel_to_commit().map_err(GitError::refresh)?.id();
                Some(Oid::new(oid.to_string())?)
            }
            Err(e) if e.code() == git2::ErrorCode::NotFound => None,
            Err(e) => return Err(GitError::refresh(e)),
        };

        Ok(Head::Branch {
            name,
            head,
            upstream,
        })
    }

    /// Count commits unique to each side of a local/upstream pair.
    ///
    /// Returns `(ahead, behind)`: commits reachable from `local` but not
    /// `upstream`, and vice versa, measured from their merge base.
    pub fn ahead_behind(&self, local: &Oid, upstream: &Oid) -> Result<(usize, usize), GitError> {
        let local = git2::Oid::from_str(local.as_str()).map_err(GitError::refresh)?;
        let upstream = git2::Oid::from_str(upstream.as_str()).map_err(GitError::refresh)?;

        self.repo
            .graph_ahead_behind(local, upstream)
            .map_err(GitError::refresh)
    }

    /// Collect every tag name whose dereferenced target is `target`.
    ///
    /// Annotated tags are peeled to the commit they annotate. Names are
    /// returned in the enumeration order of the underlying reference store,
    /// and every matching tag is kept (two tags on the same commit both
    /// appear).
    pub fn tags_at(&self, target: &Oid) -> Result<Vec<String>, GitError> {
        let target = git2::Oid::from_str(target.as_str()).map_err(GitError::refresh)?;

        let refs = self
            .repo
            .references_glob("refs/tags/*")
            .map_err(GitError::refresh)?;

        let mut tags = Vec::new();
        for reference in refs {
            let reference = reference.map_err(GitError::refresh)?;

            let name = match reference.name().and_then(|n| n.strip_prefix("refs/tags/")) {
                Some(n) => n.to_string(),
                None => continue, // Skip refs with non-UTF8 names
            };

            // Tags can point at trees or blobs; those never match a commit.
            // Anything beyond a peel-type failure is a real read error.
            let commit = match reference.peel_to_commit() {
                Ok(c) => c,
                Err(e)
                    if e.code() == git2::ErrorCode::InvalidSpec
                        || e.class() == git2::ErrorClass::Object =>
                {
                    continue
                }
                Err(e) => return Err(GitError::refresh(e)),
            };

            if commit.id() == target {
                tags.push(name);
            }
        }

        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod git_error {
        use super::*;

        #[test]
        fn error_display_formatting() {
            let err = GitError::DirectoryGone {
                path: PathBuf::from("/tmp/gone"),
            };
            assert!(err.to_string().contains("no longer exists"));
            assert!(err.to_string().contains("/tmp/gone"));

            let err = GitError::Locate {
                path: PathBuf::from("/tmp"),
                message: "permission denied".to_string(),
            };
            assert!(err.to_string().contains("permission denied"));

            let err = GitError::Open {
                path: PathBuf::from("/tmp/repo/.git"),
                message: "corrupt".to_string(),
            };
            assert!(err.to_string().contains("/tmp/repo/.git"));

            let err = GitError::Refresh {
                message: "index locked".to_string(),
            };
            assert!(err.to_string().contains("index locked"));
        }
    }

    mod change_counts {
        use super::*;

        #[test]
        fn default_is_zero() {
            let counts = ChangeCounts::default();
            assert_eq!(counts.staged, 0);
            assert_eq!(counts.modified, 0);
            assert_eq!(counts.conflicts, 0);
        }
    }
}
