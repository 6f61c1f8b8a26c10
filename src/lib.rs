//! # Rust Pretty Logger
//!
//! Structured logging that is pleasant to read in a terminal and can forward
//! the same entries as JSON to a remote collector.
//!
//! ## Features
//!
//! - **Readable Output**: Colorized multi-line blocks per entry
//! - **Call Sites**: `file:line` of the logging call, without stack walking
//! - **Attributes**: Bound attributes, groups and values pulled from a request context
//! - **Remote JSON**: Best-effort HTTP delivery bounded by a timeout
//! - **Thread Safe**: Loggers are cheap to clone and share across threads

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{SharedBuffer, TextSink};
    pub use crate::attrs;
    pub use crate::core::{
        Attr, ContextKey, FieldValue, HandlerOptions, LogContext, LogEntry, LogLevel, Logger,
        LoggerBuilder, LoggerError, LoggerMetrics, Result, Route,
    };
}

pub use crate::appenders::{DispatchOutcome, JsonDispatcher, SharedBuffer, TextRenderer, TextSink};
pub use crate::core::{
    clear_default, default_logger, set_default, Attr, ContextKey, FieldValue, Handler,
    HandlerOptions, LogContext, LogEntry, LogLevel, Logger, LoggerBuilder, LoggerError,
    LoggerMetrics, Result, Route, SourceLocation, DEFAULT_JSON_TIMEOUT, DEFAULT_REQUEST_TIMEOUT,
    TIMESTAMP_FORMAT,
};
