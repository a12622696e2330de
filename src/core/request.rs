//! Requests - what the user asked to run.
//!
//! A request is written as `name` or `name@namespace`, followed by any number
//! of `key:value` option tokens:
//!
//! ```text
//! begin install@global prefix:/usr/local tests@ci
//! ```

use std::fmt;

use crate::core::errors::BeginError;
use crate::core::registry::DEFAULT_REGISTRY_NAME;
use crate::core::target::Options;

/// A parsed request to run one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    target_name: String,
    registry_namespace: String,
    options: Options,
}

impl Request {
    /// Parse a `name[@namespace]` identifier.
    ///
    /// Only the first `@` separates; a missing or empty namespace becomes the
    /// default namespace.
    pub fn new(target_identifier: &str) -> Self {
        let (target_name, namespace) = match target_identifier.split_once('@') {
            Some((name, namespace)) => (name, namespace),
            None => (target_identifier, ""),
        };
        let registry_namespace = if namespace.is_empty() {
            DEFAULT_REGISTRY_NAME
        } else {
            namespace
        };

        Request {
            target_name: target_name.to_string(),
            registry_namespace: registry_namespace.to_string(),
            options: Options::new(),
        }
    }

    /// Add a `key:value` option. Only the first `:` separates.
    pub fn add_option(&mut self, param_identifier: &str) {
        let (key, value) = param_identifier
            .split_once(':')
            .unwrap_or((param_identifier, ""));
        self.options.insert(key.to_string(), value.to_string());
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    pub fn registry_namespace(&self) -> &str {
        &self.registry_namespace
    }

    pub fn options(&self) -> &Options {
        &self.options
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.target_name, self.registry_namespace)
    }
}

/// Group command-line tokens into requests.
///
/// An option token before any target token is rejected.
pub fn parse_requests<I, S>(tokens: I) -> Result<Vec<Request>, BeginError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut requests = Vec::new();
    let mut current: Option<Request> = None;

    for token in tokens {
        let token = token.as_ref();
        if token.contains(':') {
            match current.as_mut() {
                Some(request) => request.add_option(token),
                None => {
                    return Err(BeginError::InvalidRequest {
                        token: token.to_string(),
                        reason: "option given before any target".to_string(),
                    })
                }
            }
        } else {
            if token.is_empty() || token.starts_with('@') {
                return Err(BeginError::InvalidRequest {
                    token: token.to_string(),
                    reason: "empty target name".to_string(),
                });
            }
            if let Some(request) = current.replace(Request::new(token)) {
                requests.push(request);
            }
        }
    }

    requests.extend(current);
    Ok(requests)
}
