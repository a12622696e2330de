//! begin - declare namespaced targets and dispatch them.
//!
//! This crate provides the core library functionality for begin: the
//! target registry model, discovery and loading of targets files, and
//! resolution of command-line requests to targets.

pub mod core;
pub mod ops;
pub mod recipes;
pub mod sources;
pub mod util;

/// Test utilities for begin unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides a recording target body and on-disk trees
/// of targets files.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    errors::{BeginError, ExitCode},
    manager::RegistryManager,
    registry::Registry,
    request::{parse_requests, Request},
    target::{Options, Target, TargetFunction},
    target_map::TargetMap,
};

pub use crate::util::context::GlobalContext;
