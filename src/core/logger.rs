//! Logger façade
//!
//! Every logging method comes in six flavours per level: to both outputs,
//! text only, JSON only, and the same three taking an ambient [`LogContext`].
//! The choice travels with the call as a [`Route`]; derived loggers sharing a
//! handler never see each other's routing.

use super::{
    error::Result,
    handler::Handler,
    log_context::{Attr, ContextKey, LogContext},
    log_entry::{LogEntry, Route},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    options::HandlerOptions,
    source::SourceLocation,
};
use crate::appenders::TextSink;
use std::io::Write;
use std::time::Duration;

macro_rules! level_methods {
    (
        $level:expr, $name:literal,
        $all:ident, $text:ident, $json:ident,
        $ctx_all:ident, $ctx_text:ident, $ctx_json:ident
    ) => {
        #[doc = concat!("Log a ", $name, " entry to text and JSON outputs")]
        #[track_caller]
        #[inline]
        pub fn $all(&self, message: impl Into<String>, attrs: &[Attr]) {
            self.log_routed(&LogContext::new(), $level, Route::ALL, message, attrs);
        }

        #[doc = concat!("Log a ", $name, " entry to the text output only")]
        #[track_caller]
        #[inline]
        pub fn $text(&self, message: impl Into<String>, attrs: &[Attr]) {
            self.log_routed(&LogContext::new(), $level, Route::TEXT_ONLY, message, attrs);
        }

        #[doc = concat!("Log a ", $name, " entry to the JSON endpoint only")]
        #[track_caller]
        #[inline]
        pub fn $json(&self, message: impl Into<String>, attrs: &[Attr]) {
            self.log_routed(&LogContext::new(), $level, Route::JSON_ONLY, message, attrs);
        }

        #[doc = concat!("Log a ", $name, " entry to both outputs, extracting context keys from `ctx`")]
        #[track_caller]
        #[inline]
        pub fn $ctx_all(&self, ctx: &LogContext, message: impl Into<String>, attrs: &[Attr]) {
            self.log_routed(ctx, $level, Route::ALL, message, attrs);
        }

        #[doc = concat!("Log a ", $name, " entry to the text output, extracting context keys from `ctx`")]
        #[track_caller]
        #[inline]
        pub fn $ctx_text(&self, ctx: &LogContext, message: impl Into<String>, attrs: &[Attr]) {
            self.log_routed(ctx, $level, Route::TEXT_ONLY, message, attrs);
        }

        #[doc = concat!("Log a ", $name, " entry to the JSON endpoint, extracting context keys from `ctx`")]
        #[track_caller]
        #[inline]
        pub fn $ctx_json(&self, ctx: &LogContext, message: impl Into<String>, attrs: &[Attr]) {
            self.log_routed(ctx, $level, Route::JSON_ONLY, message, attrs);
        }
    };
}

/// Cloneable, thread-safe logging handle
///
/// # Example
///
/// ```
/// use rust_pretty_logger::prelude::*;
///
/// let buffer = SharedBuffer::new();
/// let logger = Logger::builder()
///     .writer(buffer.clone())
///     .colorize(false)
///     .build();
///
/// let api = logger.with_group("api").with([("route", "/users")]);
/// api.warn("slow request", &attrs!["elapsed_ms" => 812]);
///
/// let output = buffer.contents();
/// assert!(output.contains("\t- api.route : /users"));
/// assert!(output.contains("\t- api.elapsed_ms : 812"));
/// ```
#[derive(Debug, Clone)]
pub struct Logger {
    handler: Handler,
}

impl Logger {
    pub fn new(sink: TextSink, options: HandlerOptions) -> Self {
        Self::from_handler(Handler::new(sink, options))
    }

    pub fn from_handler(handler: Handler) -> Self {
        Self { handler }
    }

    /// Logger writing to stderr, configured from `PRETTY_LOG_*` variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(TextSink::stderr(), HandlerOptions::from_env()?))
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        self.handler.metrics()
    }

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.handler.enabled(level)
    }

    /// Derive a logger attaching `attrs` to every entry
    ///
    /// The new attributes replace this logger's bound attributes.
    #[must_use]
    pub fn with<I>(&self, attrs: I) -> Logger
    where
        I: IntoIterator,
        I::Item: Into<Attr>,
    {
        Self::from_handler(
            self.handler
                .with_attrs(attrs.into_iter().map(Into::into).collect()),
        )
    }

    /// Derive a logger prefixing every attribute with `name`
    #[must_use]
    pub fn with_group(&self, name: impl Into<String>) -> Logger {
        Self::from_handler(self.handler.with_group(name))
    }

    /// Derive a logger that also reads `keys` from the context of `*_ctx` calls
    #[must_use]
    pub fn with_context_keys<I>(&self, keys: I) -> Logger
    where
        I: IntoIterator,
        I::Item: Into<ContextKey>,
    {
        Self::from_handler(self.handler.with_context_keys(keys))
    }

    /// Log an entry with explicit context and routing
    ///
    /// All other logging methods end up here.
    #[track_caller]
    pub fn log_routed(
        &self,
        ctx: &LogContext,
        level: LogLevel,
        route: Route,
        message: impl Into<String>,
        attrs: &[Attr],
    ) {
        if !self.handler.enabled(level) {
            self.handler.metrics().record_filtered();
            return;
        }

        let mut entry = LogEntry::new(level, message).with_attrs(attrs.to_vec());
        if self.handler.options().add_source {
            entry = entry.with_source(SourceLocation::caller());
        }
        self.handler.handle(entry, ctx, route);
    }

    #[track_caller]
    #[inline]
    pub fn log(&self, level: LogLevel, message: impl Into<String>, attrs: &[Attr]) {
        self.log_routed(&LogContext::new(), level, Route::ALL, message, attrs);
    }

    #[track_caller]
    #[inline]
    pub fn log_text(&self, level: LogLevel, message: impl Into<String>, attrs: &[Attr]) {
        self.log_routed(&LogContext::new(), level, Route::TEXT_ONLY, message, attrs);
    }

    #[track_caller]
    #[inline]
    pub fn log_json(&self, level: LogLevel, message: impl Into<String>, attrs: &[Attr]) {
        self.log_routed(&LogContext::new(), level, Route::JSON_ONLY, message, attrs);
    }

    #[track_caller]
    #[inline]
    pub fn log_ctx(
        &self,
        ctx: &LogContext,
        level: LogLevel,
        message: impl Into<String>,
        attrs: &[Attr],
    ) {
        self.log_routed(ctx, level, Route::ALL, message, attrs);
    }

    #[track_caller]
    #[inline]
    pub fn log_ctx_text(
        &self,
        ctx: &LogContext,
        level: LogLevel,
        message: impl Into<String>,
        attrs: &[Attr],
    ) {
        self.log_routed(ctx, level, Route::TEXT_ONLY, message, attrs);
    }

    #[track_caller]
    #[inline]
    pub fn log_ctx_json(
        &self,
        ctx: &LogContext,
        level: LogLevel,
        message: impl Into<String>,
        attrs: &[Attr],
    ) {
        self.log_routed(ctx, level, Route::JSON_ONLY, message, attrs);
    }

    level_methods! {
        LogLevel::Trace, "trace",
        trace, trace_text, trace_json,
        trace_ctx, trace_ctx_text, trace_ctx_json
    }
    level_methods! {
        LogLevel::Debug, "debug",
        debug, debug_text, debug_json,
        debug_ctx, debug_ctx_text, debug_ctx_json
    }
    level_methods! {
        LogLevel::Info, "info",
        info, info_text, info_json,
        info_ctx, info_ctx_text, info_ctx_json
    }
    level_methods! {
        LogLevel::Warn, "warn",
        warn, warn_text, warn_json,
        warn_ctx, warn_ctx_text, warn_ctx_json
    }
    level_methods! {
        LogLevel::Error, "error",
        error, error_text, error_json,
        error_ctx, error_ctx_text, error_ctx_json
    }
    level_methods! {
        LogLevel::Fatal, "fatal",
        fatal, fatal_text, fatal_json,
        fatal_ctx, fatal_ctx_text, fatal_ctx_json
    }
}

impl Default for Logger {
    /// Colorized logger on stderr with source locations, level `Info` and above
    fn default() -> Self {
        Self::new(TextSink::stderr(), HandlerOptions::default())
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_pretty_logger::prelude::*;
/// use std::time::Duration;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .colorize(false)
///     .json_url("http://localhost:8081/logs")
///     .json_timeout(Duration::from_millis(500))
///     .build();
///
/// assert!(logger.enabled(LogLevel::Debug));
/// ```
pub struct LoggerBuilder {
    sink: Option<TextSink>,
    options: HandlerOptions,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            sink: None,
            options: HandlerOptions::default(),
        }
    }

    /// Write text blocks to `writer` (stderr when not set)
    #[must_use = "builder methods return a new value"]
    pub fn writer<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.sink = Some(TextSink::new(writer));
        self
    }

    /// Write text blocks to an existing sink
    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: TextSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Replace all options at once
    #[must_use = "builder methods return a new value"]
    pub fn options(mut self, options: HandlerOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.options.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn colorize(mut self, colorize: bool) -> Self {
        self.options.colorize = colorize;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn add_source(mut self, add_source: bool) -> Self {
        self.options.add_source = add_source;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn json_url(mut self, url: impl Into<String>) -> Self {
        self.options = self.options.with_json_url(url);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn json_timeout(mut self, timeout: Duration) -> Self {
        self.options.json_timeout = timeout;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.options.request_timeout = timeout;
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        Logger::new(self.sink.unwrap_or_default(), self.options)
    }

    /// Build the Logger after validating the options
    pub fn try_build(self) -> Result<Logger> {
        self.options.validate()?;
        Ok(self.build())
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
