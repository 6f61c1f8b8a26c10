//! Best-effort delivery of JSON entries to a remote HTTP endpoint
//!
//! Each entry is POSTed from a short-lived worker thread. The logging call
//! waits for the worker at most `json_timeout`; if the endpoint is slower the
//! worker is abandoned and finishes (or hits `request_timeout`) on its own.

use super::json;
use crate::core::{HandlerOptions, LogEntry, LoggerError, Result};
use crossbeam_channel::{bounded, RecvTimeoutError};
use std::fmt;
use std::thread;
use std::time::Duration;
use ureq::Agent;

/// What became of a dispatched entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// No endpoint configured
    Skipped,
    /// The endpoint answered with this status
    Delivered(u16),
    /// The endpoint did not answer in time; the request was abandoned
    TimedOut,
}

/// Sends JSON entries to the endpoint configured in [`HandlerOptions`]
///
/// # Example
///
/// ```no_run
/// use rust_pretty_logger::appenders::JsonDispatcher;
/// use rust_pretty_logger::{HandlerOptions, LogEntry, LogLevel};
///
/// let options = HandlerOptions::new().with_json_url("http://localhost:8081/logs");
/// let dispatcher = JsonDispatcher::new(&options);
///
/// let outcome = dispatcher.dispatch(&LogEntry::new(LogLevel::Info, "foo"), None);
/// println!("{:?}", outcome);
/// ```
#[derive(Clone)]
pub struct JsonDispatcher {
    url: Option<String>,
    agent: Agent,
    timeout: Duration,
}

impl JsonDispatcher {
    pub fn new(options: &HandlerOptions) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(options.request_timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            url: options.json_url.clone(),
            agent,
            timeout: options.json_timeout,
        }
    }

    /// Whether an endpoint is configured at all
    pub fn is_enabled(&self) -> bool {
        self.url.is_some()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Encode and POST an entry, waiting at most the configured timeout
    ///
    /// Encoding errors abort before any request is made. A timeout is not an
    /// error: the request is left to finish in the background.
    pub fn dispatch(&self, entry: &LogEntry, group: Option<&str>) -> Result<DispatchOutcome> {
        let Some(url) = self.url.clone() else {
            return Ok(DispatchOutcome::Skipped);
        };

        let body = json::encode(entry, group)?;
        let agent = self.agent.clone();
        let (tx, rx) = bounded(1);

        let worker_url = url.clone();
        thread::Builder::new()
            .name("json-log-dispatch".to_string())
            .spawn(move || {
                let result = agent
                    .post(worker_url.as_str())
                    .header("Content-Type", "application/json")
                    .send(&body[..])
                    .map(|response| response.status().as_u16());
                // The caller may have stopped waiting; nobody to tell then.
                let _ = tx.send(result);
            })
            .map_err(|e| {
                LoggerError::io_operation(
                    "spawning JSON dispatch worker",
                    format!("cannot send log to '{}'", url),
                    e,
                )
            })?;

        match rx.recv_timeout(self.timeout) {
            Ok(Ok(status)) => Ok(DispatchOutcome::Delivered(status)),
            Ok(Err(e)) => Err(LoggerError::transport(url, e)),
            Err(RecvTimeoutError::Timeout) => Ok(DispatchOutcome::TimedOut),
            Err(RecvTimeoutError::Disconnected) => Err(LoggerError::DispatchAborted { url }),
        }
    }
}

impl fmt::Debug for JsonDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonDispatcher")
            .field("url", &self.url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
