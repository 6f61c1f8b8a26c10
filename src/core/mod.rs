//! Core logger types

pub mod error;
pub mod global;
pub mod handler;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod merge;
pub mod metrics;
pub mod options;
pub mod source;

pub use error::{LoggerError, Result};
pub use global::{clear_default, default_logger, set_default};
pub use handler::Handler;
pub use log_context::{Attr, ContextKey, FieldValue, LogContext};
pub use log_entry::{LogEntry, Route, TIMESTAMP_FORMAT};
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use options::{HandlerOptions, DEFAULT_JSON_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};
pub use source::SourceLocation;
