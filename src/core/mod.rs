//! Core data structures for begin.
//!
//! This module contains the registry and dispatch model:
//! - Targets and their identity keys
//! - Registries (one namespace, one defining file)
//! - The compiled target map and the validating registry manager
//! - Requests parsed from the command line

pub mod errors;
pub mod manager;
pub mod registry;
pub mod request;
pub mod target;
pub mod target_map;

pub use errors::{BeginError, ExitCode};
pub use manager::RegistryManager;
pub use registry::{Registry, DEFAULT_REGISTRY_NAME};
pub use request::{parse_requests, Request};
pub use target::{
    target_fn, NamedFn, Options, Target, TargetFn, TargetFunction, TargetMetaData, TargetOptions,
};
pub use target_map::TargetMap;
