//! Test utilities for begin unit tests.
//!
//! Provides a target body that records its calls and an on-disk tree of
//! targets files for discovery tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use begin::test_support::RecordingTarget;
//!
//! #[test]
//! fn test_example() {
//!     let recorder = RecordingTarget::new("install");
//!     let mut registry = Registry::new("targets.toml");
//!     registry.register_target(recorder.handle());
//!     // ...
//!     assert_eq!(recorder.calls().len(), 1);
//! }
//! ```

pub mod fixtures;

use std::sync::{Arc, Mutex};

use anyhow::Result;

use crate::core::{Options, TargetFn, TargetFunction};

pub use fixtures::*;

/// A target body that records the options of every call.
#[derive(Debug, Clone)]
pub struct RecordingTarget {
    inner: Arc<Recorder>,
}

#[derive(Debug)]
struct Recorder {
    name: String,
    calls: Mutex<Vec<Options>>,
}

impl RecordingTarget {
    pub fn new(name: impl Into<String>) -> Self {
        RecordingTarget {
            inner: Arc::new(Recorder {
                name: name.into(),
                calls: Mutex::new(Vec::new()),
            }),
        }
    }

    /// A shared handle for registration. Calls through any handle are
    /// recorded in this recorder.
    pub fn handle(&self) -> TargetFn {
        self.inner.clone()
    }

    /// Options of every call so far, in call order.
    pub fn calls(&self) -> Vec<Options> {
        self.inner.calls.lock().unwrap().clone()
    }
}

impl TargetFunction for Recorder {
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, options: &Options) -> Result<()> {
        self.calls.lock().unwrap().push(options.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_target() {
        let recorder = RecordingTarget::new("install");
        let handle = recorder.handle();
        let mut options = Options::new();
        options.insert("key".to_string(), "value".to_string());

        handle.call(&Options::new()).unwrap();
        handle.call(&options).unwrap();

        assert_eq!(handle.name(), "install");
        assert_eq!(recorder.calls(), vec![Options::new(), options]);
    }
}
