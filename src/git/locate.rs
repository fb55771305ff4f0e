//! git::locate
//!
//! Repository discovery: find the enclosing repository for a directory.
//!
//! The locator walks upward from a starting directory until it finds a
//! `.git` entry (a directory for normal repositories, a gitfile for linked
//! worktrees), or runs off the filesystem root. Its result is the
//! **repository identifier**: the canonicalized metadata path, stable across
//! queries from different subdirectories of the same repository, which makes
//! it the cache key.

use std::io;
use std::path::{Path, PathBuf};

use super::GitError;

/// Find the enclosing repository for `start`.
///
/// Returns the canonicalized path of the repository's `.git` entry, or
/// `Ok(None)` when no ancestor of `start` is a repository. Not finding a
/// repository is a normal negative result, not an error.
///
/// Permission-denied on a candidate during the walk skips that ancestor and
/// keeps walking; restricted directories on the way up must not break status
/// display for an otherwise readable repository.
///
/// # Errors
///
/// - [`GitError::DirectoryGone`] if `start` itself no longer exists
/// - [`GitError::Locate`] for any other I/O failure
pub fn locate(start: &Path) -> Result<Option<PathBuf>, GitError> {
    match std::fs::metadata(start) {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(GitError::DirectoryGone {
                path: start.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(GitError::Locate {
                path: start.to_path_buf(),
                message: e.to_string(),
            });
        }
    }

    let mut dir = Some(start);
    while let Some(d) = dir {
        let candidate = d.join(".git");
        match std::fs::symlink_metadata(&candidate) {
            Ok(_) => {
                // Canonicalize so every subdirectory of a repository maps to
                // the same identifier
                let id = candidate.canonicalize().map_err(|e| GitError::Locate {
                    path: start.to_path_buf(),
                    message: e.to_string(),
                })?;
                return Ok(Some(id));
            }
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
                ) => {}
            Err(e) => {
                return Err(GitError::Locate {
                    path: start.to_path_buf(),
                    message: e.to_string(),
                });
            }
        }
        dir = d.parent();
    }

    Ok(None)
}
