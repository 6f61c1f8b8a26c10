//! Log entry structure

use super::log_context::Attr;
use super::log_level::LogLevel;
use super::source::SourceLocation;
use chrono::{DateTime, Local};

/// strftime pattern for timestamps in text blocks and JSON payloads
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Which outputs a single call should reach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Route {
    pub text: bool,
    pub json: bool,
}

impl Route {
    pub const ALL: Route = Route::new(true, true);
    pub const TEXT_ONLY: Route = Route::new(true, false);
    pub const JSON_ONLY: Route = Route::new(false, true);
    pub const NONE: Route = Route::new(false, false);

    pub const fn new(text: bool, json: bool) -> Self {
        Self { text, json }
    }

    pub fn is_none(&self) -> bool {
        !self.text && !self.json
    }
}

impl Default for Route {
    fn default() -> Self {
        Route::ALL
    }
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Local>,
    pub source: Option<SourceLocation>,
    pub attrs: Vec<Attr>,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Local::now(),
            source: None,
            attrs: Vec::new(),
        }
    }

    pub fn with_source(mut self, source: SourceLocation) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_attrs(mut self, attrs: Vec<Attr>) -> Self {
        self.attrs = attrs;
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Timestamp rendered with [`TIMESTAMP_FORMAT`]
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_formatted_timestamp() {
        let timestamp = Local
            .with_ymd_and_hms(2024, 3, 9, 7, 5, 1)
            .single()
            .expect("valid datetime");
        let entry = LogEntry::new(LogLevel::Info, "hello").with_timestamp(timestamp);
        assert_eq!(entry.formatted_timestamp(), "2024-03-09 07:05:01");
    }

    #[test]
    fn test_route_constants() {
        assert!(Route::ALL.text && Route::ALL.json);
        assert!(Route::TEXT_ONLY.text && !Route::TEXT_ONLY.json);
        assert!(!Route::JSON_ONLY.text && Route::JSON_ONLY.json);
        assert!(Route::NONE.is_none());
        assert_eq!(Route::default(), Route::ALL);
    }
}
