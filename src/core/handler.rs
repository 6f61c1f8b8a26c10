//! Per-entry processing: filtering, merging, text output and JSON dispatch

use super::{
    log_context::{Attr, ContextKey, LogContext},
    log_entry::{LogEntry, Route},
    log_level::LogLevel,
    merge::merge_attrs,
    metrics::LoggerMetrics,
    options::HandlerOptions,
};
use crate::appenders::{DispatchOutcome, JsonDispatcher, TextRenderer, TextSink};
use std::fmt;
use std::sync::Arc;

/// Processes log entries for a [`Logger`](super::Logger)
///
/// A handler is immutable. The `with_*` methods return a new handler sharing
/// the parent's sink, options, dispatcher and metrics; the parent is left
/// untouched.
///
/// Nothing here reports failure to the caller. Sink errors and lost JSON
/// entries are printed to stderr once and counted in [`LoggerMetrics`].
#[derive(Clone)]
pub struct Handler {
    sink: TextSink,
    options: Arc<HandlerOptions>,
    renderer: TextRenderer,
    dispatcher: JsonDispatcher,
    metrics: Arc<LoggerMetrics>,
    group: Option<String>,
    attrs: Arc<[Attr]>,
    context_keys: Arc<[ContextKey]>,
}

impl Handler {
    pub fn new(sink: TextSink, options: HandlerOptions) -> Self {
        Self {
            renderer: TextRenderer::with_colors(options.colorize),
            dispatcher: JsonDispatcher::new(&options),
            options: Arc::new(options),
            sink,
            metrics: Arc::new(LoggerMetrics::new()),
            group: None,
            attrs: Arc::from(Vec::new()),
            context_keys: Arc::from(Vec::new()),
        }
    }

    /// Whether entries at `level` are processed at all
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.options.min_level
    }

    /// Derive a handler whose bound attributes are exactly `attrs`
    ///
    /// The parent's bound attributes are not carried over; the group and
    /// context keys are.
    #[must_use]
    pub fn with_attrs(&self, attrs: Vec<Attr>) -> Self {
        Self {
            attrs: Arc::from(attrs),
            ..self.clone()
        }
    }

    /// Derive a handler grouping attributes under `name`
    ///
    /// An existing group is replaced, not nested. An empty name removes it.
    #[must_use]
    pub fn with_group(&self, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            group: if name.is_empty() { None } else { Some(name) },
            ..self.clone()
        }
    }

    /// Derive a handler that also extracts `keys` from the ambient context
    #[must_use]
    pub fn with_context_keys<I>(&self, keys: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ContextKey>,
    {
        let context_keys: Vec<ContextKey> = self
            .context_keys
            .iter()
            .cloned()
            .chain(keys.into_iter().map(Into::into))
            .collect();
        Self {
            context_keys: Arc::from(context_keys),
            ..self.clone()
        }
    }

    /// Process one entry
    ///
    /// `entry.attrs` holds the call-site attributes; bound attributes and
    /// context values are merged around them here. Text is written before
    /// this returns. JSON delivery waits at most the configured timeout.
    pub fn handle(&self, mut entry: LogEntry, ctx: &LogContext, route: Route) {
        if !self.enabled(entry.level) {
            self.metrics.record_filtered();
            return;
        }
        let send_json = route.json && self.dispatcher.is_enabled();
        if !route.text && !send_json {
            return;
        }

        let call_site = std::mem::take(&mut entry.attrs);
        entry.attrs = merge_attrs(&self.attrs, call_site, &self.context_keys, ctx);

        if route.text {
            self.write_text(&entry);
        }
        if send_json {
            self.send_json(&entry);
        }
    }

    fn write_text(&self, entry: &LogEntry) {
        let block = self.renderer.render(entry, self.group());
        match self.sink.write_block(&block) {
            Ok(()) => {
                self.metrics.record_text_written();
            }
            Err(e) => {
                self.metrics.record_text_failed();
                eprintln!(
                    "[LOGGER ERROR] Failed to write log block to {}: {}",
                    self.sink.name(),
                    e
                );
            }
        }
    }

    fn send_json(&self, entry: &LogEntry) {
        match self.dispatcher.dispatch(entry, self.group()) {
            Ok(DispatchOutcome::Skipped) => {}
            Ok(DispatchOutcome::Delivered(status)) => {
                self.metrics.record_json_delivered();
                if !(200..300).contains(&status) {
                    eprintln!(
                        "[LOGGER WARNING] JSON log endpoint {} answered with status {}",
                        self.dispatcher.url().unwrap_or_default(),
                        status
                    );
                }
            }
            Ok(DispatchOutcome::TimedOut) => {
                self.metrics.record_json_timed_out();
            }
            Err(e) => {
                self.metrics.record_json_failed();
                eprintln!("[LOGGER ERROR] {}", e);
            }
        }
    }

    pub fn options(&self) -> &HandlerOptions {
        &self.options
    }

    pub fn sink(&self) -> &TextSink {
        &self.sink
    }

    pub fn metrics(&self) -> &Arc<LoggerMetrics> {
        &self.metrics
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    pub fn context_keys(&self) -> &[ContextKey] {
        &self.context_keys
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("sink", &self.sink)
            .field("options", &self.options)
            .field("group", &self.group)
            .field("attrs", &self.attrs)
            .field("context_keys", &self.context_keys)
            .finish()
    }
}
