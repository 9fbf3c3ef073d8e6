//! Configuration management.
//!
//! Every setting is resolved on its own: an upper-cased environment variable
//! wins, then a lower-cased query parameter, then the built-in default.

use std::collections::HashMap;
use std::env;
use std::time::Duration;

use tracing::info;

use crate::{Error, Result};

/// Default base URL of the upstream event-management API.
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://www.eventbriteapi.com/v3";

/// Default timeout applied to each upstream request.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the upstream API, without a trailing slash
    pub upstream_base_url: String,
    /// Timeout for a single upstream request
    pub request_timeout: Duration,
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Env,
    Query,
    Default,
}

fn lookup<'a>(
    name: &str,
    env: &'a HashMap<String, String>,
    query: &'a HashMap<String, String>,
) -> (Option<&'a str>, Source) {
    if let Some(value) = env.get(&name.to_uppercase()) {
        return (Some(value.as_str()), Source::Env);
    }
    if let Some(value) = query.get(&name.to_lowercase()) {
        return (Some(value.as_str()), Source::Query);
    }
    (None, Source::Default)
}

impl Config {
    /// Resolve configuration from an environment snapshot and parsed query parameters.
    pub fn resolve(
        env: &HashMap<String, String>,
        query: &HashMap<String, String>,
    ) -> Result<Self> {
        let (base_url, source) = lookup("upstream_base_url", env, query);
        let upstream_base_url = base_url
            .unwrap_or(DEFAULT_UPSTREAM_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        if !(upstream_base_url.starts_with("http://") || upstream_base_url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "upstream_base_url must be an http(s) URL, got {:?}",
                upstream_base_url
            )));
        }
        info!(source = ?source, "Setting upstream_base_url = {}", upstream_base_url);

        let (timeout, source) = lookup("request_timeout_secs", env, query);
        let timeout_secs = match timeout {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    Error::Config(format!(
                        "request_timeout_secs must be a positive integer, got {:?}",
                        raw
                    ))
                })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };
        info!(source = ?source, "Setting request_timeout_secs = {}", timeout_secs);

        Ok(Self {
            upstream_base_url,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        let snapshot: HashMap<String, String> = env::vars().collect();
        Self::resolve(&snapshot, &HashMap::new())
    }
}
