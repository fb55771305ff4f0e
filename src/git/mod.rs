//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **only doorway** to Git. All repository reads flow
//! through this interface. Direct parsing of `.git` internal files outside
//! this module is prohibited. No other module should import `git2`.
//!
//! Statline never writes to a repository; every operation here is a read of
//! on-disk metadata (refs, index, stash, tag objects).
//!
//! # Responsibilities
//!
//! - Repository discovery ([`locate`]) and opening
//! - Change-classification scan of index and working tree
//! - Stash enumeration
//! - HEAD, branch, and upstream resolution
//! - Ahead/behind graph queries
//! - Tag enumeration with annotated-tag peeling
//!
//! # Error Handling
//!
//! "Not present" conditions that are part of normal operation (no enclosing
//! repository, no upstream, no stash, unborn history) are expressed in the
//! types (`Option`, zero counts), never as errors. Everything else surfaces
//! as a typed [`GitError`].

mod interface;
mod locate;

pub use interface::{ChangeCounts, GitError, Head, Repo};
pub use locate::locate;
