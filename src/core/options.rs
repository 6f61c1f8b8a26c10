//! Handler configuration
//!
//! [`HandlerOptions`] is fixed for a handler and everything derived from it.
//! Values can come from code (builder-style setters) or from the environment
//! through [`HandlerOptions::from_env`].

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use std::time::Duration;

/// How long a logging call waits for the remote endpoint (1 second)
pub const DEFAULT_JSON_TIMEOUT: Duration = Duration::from_secs(1);

/// Upper bound on the lifetime of an abandoned HTTP request (30 seconds)
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Minimum level (`trace`, `debug`, `info`, `warn`, `error`, `fatal`).
pub const LOG_LEVEL_ENV: &str = "PRETTY_LOG_LEVEL";

/// Colorize text output (`true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`).
pub const LOG_COLOR_ENV: &str = "PRETTY_LOG_COLOR";

/// Add the call site to every entry.
pub const LOG_SOURCE_ENV: &str = "PRETTY_LOG_SOURCE";

/// Remote JSON endpoint, e.g. `http://localhost:8081/logs`.
pub const LOG_JSON_URL_ENV: &str = "PRETTY_LOG_JSON_URL";

/// JSON dispatch timeout in milliseconds.
pub const LOG_JSON_TIMEOUT_MS_ENV: &str = "PRETTY_LOG_JSON_TIMEOUT_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerOptions {
    /// Compute the call site of each entry
    pub add_source: bool,
    /// Wrap text output in ANSI color codes
    pub colorize: bool,
    /// Endpoint receiving JSON entries; `None` disables JSON output entirely
    pub json_url: Option<String>,
    /// Entries below this level are dropped before any work is done
    pub min_level: LogLevel,
    /// How long a logging call waits for the remote endpoint
    pub json_timeout: Duration,
    /// How long an abandoned request may keep running in the background
    pub request_timeout: Duration,
}

impl Default for HandlerOptions {
    fn default() -> Self {
        Self {
            add_source: true,
            colorize: true,
            json_url: None,
            min_level: LogLevel::Info,
            json_timeout: DEFAULT_JSON_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl HandlerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_add_source(mut self, add_source: bool) -> Self {
        self.add_source = add_source;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_colorize(mut self, colorize: bool) -> Self {
        self.colorize = colorize;
        self
    }

    /// Set the remote JSON endpoint; an empty string disables it
    #[must_use = "builder methods return a new value"]
    pub fn with_json_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.json_url = if url.trim().is_empty() {
            None
        } else {
            Some(url)
        };
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_json_timeout(mut self, timeout: Duration) -> Self {
        self.json_timeout = timeout;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Defaults overridden by the `PRETTY_LOG_*` environment variables
    ///
    /// Unset variables keep their default; malformed ones are an error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = Self::default();

        if let Some(level) = lookup(LOG_LEVEL_ENV) {
            options.min_level = level
                .parse()
                .map_err(|message: String| LoggerError::config(LOG_LEVEL_ENV, message))?;
        }
        if let Some(colorize) = lookup(LOG_COLOR_ENV) {
            options.colorize = parse_bool(LOG_COLOR_ENV, &colorize)?;
        }
        if let Some(add_source) = lookup(LOG_SOURCE_ENV) {
            options.add_source = parse_bool(LOG_SOURCE_ENV, &add_source)?;
        }
        if let Some(url) = lookup(LOG_JSON_URL_ENV) {
            options = options.with_json_url(url);
        }
        if let Some(millis) = lookup(LOG_JSON_TIMEOUT_MS_ENV) {
            let millis: u64 = millis.trim().parse().map_err(|_| {
                LoggerError::config(
                    LOG_JSON_TIMEOUT_MS_ENV,
                    format!("expected milliseconds, got '{}'", millis),
                )
            })?;
            options.json_timeout = Duration::from_millis(millis);
        }

        options.validate()?;
        Ok(options)
    }

    /// Check timeouts for consistency
    pub fn validate(&self) -> Result<()> {
        if self.json_timeout.is_zero() {
            return Err(LoggerError::config(
                "HandlerOptions",
                "json_timeout must be non-zero",
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(LoggerError::config(
                "HandlerOptions",
                "request_timeout must be non-zero",
            ));
        }
        if self.json_timeout > self.request_timeout {
            return Err(LoggerError::config(
                "HandlerOptions",
                format!(
                    "json_timeout ({:?}) exceeds request_timeout ({:?})",
                    self.json_timeout, self.request_timeout
                ),
            ));
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(LoggerError::config(
            key,
            format!("expected a boolean, got '{}'", value),
        )),
    }
}
