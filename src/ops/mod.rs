//! High-level operations.
//!
//! This module contains the implementation of begin commands.

pub mod begin_run;
pub mod list;

pub use begin_run::{load_manager, resolve_requests, run_requests};
pub use list::{format_listing, list_targets, TargetSummary};
