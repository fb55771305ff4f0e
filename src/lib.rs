//! Statline - repository status aggregation for terminal status lines
//!
//! Statline answers one question cheaply and repeatedly: "what is the state of
//! the repository around this directory?" It discovers the enclosing git
//! repository, computes a consistent snapshot of its state (branch,
//! ahead/behind, staged/modified/conflicted counts, stash depth, tags), and
//! caches one snapshot per repository so that a status line querying on every
//! prompt redraw does not pay for repeated allocation or repository opens.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, runs one query)
//! - [`cache`] - Process-wide snapshot cache with an explicit LRU bound
//! - [`status`] - Snapshot structure and the staged refresh pipeline
//! - [`git`] - Single interface for all Git operations
//! - [`segments`] - Turns a snapshot into ordered display fragments
//! - [`core`] - Strong types and configuration
//!
//! # Correctness Invariants
//!
//! 1. At most one snapshot exists per repository identifier; refreshes mutate
//!    it in place rather than reallocating
//! 2. Refreshes of the same repository serialize; different repositories
//!    refresh independently
//! 3. Every refresh resets all snapshot fields before recomputation, so a
//!    snapshot never accumulates stale counts
//! 4. Unexpected I/O failures surface as errors; only enumerated "not present"
//!    conditions (no repository, no upstream, no stash, unborn history) are
//!    normal zero-valued outcomes

pub mod cache;
pub mod cli;
pub mod core;
pub mod git;
pub mod segments;
pub mod status;
