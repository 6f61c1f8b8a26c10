//! Logging macros for ergonomic log message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`. Attributes follow
//! the format arguments after a `;`.
//!
//! # Examples
//!
//! ```
//! use rust_pretty_logger::prelude::*;
//! use rust_pretty_logger::info;
//!
//! let logger = Logger::builder().writer(SharedBuffer::new()).build();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // With attributes
//! info!(logger, "User {} logged in", 42; "method" => "password", "attempts" => 1);
//! ```

/// Build an array of [`Attr`](crate::Attr) from `key => value` pairs.
///
/// # Examples
///
/// ```
/// use rust_pretty_logger::{attrs, Attr};
///
/// let attrs = attrs!["url" => "/api", "status" => 200];
/// assert_eq!(attrs[1], Attr::new("status", 200));
/// ```
#[macro_export]
macro_rules! attrs {
    () => {{
        let empty: [$crate::Attr; 0] = [];
        empty
    }};
    ($($key:expr => $value:expr),+ $(,)?) => {
        [$($crate::Attr::new($key, $value)),+]
    };
}

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use rust_pretty_logger::prelude::*;
/// # let logger = Logger::builder().writer(SharedBuffer::new()).build();
/// use rust_pretty_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// log!(logger, LogLevel::Warn, "Retrying"; "attempt" => 3);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $fmt:literal $(, $arg:expr)* ; $($key:expr => $value:expr),+ $(,)?) => {
        $logger.log($level, format!($fmt $(, $arg)*), &$crate::attrs![$($key => $value),+])
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+), &[])
    };
}

/// Log a trace-level message.
///
/// # Examples
///
/// ```
/// # use rust_pretty_logger::prelude::*;
/// # let logger = Logger::builder().writer(SharedBuffer::new()).min_level(LogLevel::Trace).build();
/// use rust_pretty_logger::trace;
/// trace!(logger, "Entering function: calculate()");
/// trace!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use rust_pretty_logger::prelude::*;
/// # let logger = Logger::builder().writer(SharedBuffer::new()).build();
/// use rust_pretty_logger::debug;
/// debug!(logger, "Debug information");
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use rust_pretty_logger::prelude::*;
/// # let logger = Logger::builder().writer(SharedBuffer::new()).build();
/// use rust_pretty_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_pretty_logger::prelude::*;
/// # let logger = Logger::builder().writer(SharedBuffer::new()).build();
/// use rust_pretty_logger::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use rust_pretty_logger::prelude::*;
/// # let logger = Logger::builder().writer(SharedBuffer::new()).build();
/// use rust_pretty_logger::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Error code: {}, message: {}", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
///
/// # Examples
///
/// ```
/// # use rust_pretty_logger::prelude::*;
/// # let logger = Logger::builder().writer(SharedBuffer::new()).build();
/// use rust_pretty_logger::fatal;
/// fatal!(logger, "Critical system failure");
/// fatal!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
