//! core
//!
//! Strong types and configuration for Statline.
//!
//! # Modules
//!
//! - [`types`] - Strong types: Oid
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Configuration is optional; a missing config file means defaults

pub mod config;
pub mod types;
