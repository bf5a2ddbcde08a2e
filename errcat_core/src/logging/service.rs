//! Logging service and logger backends
//!
//! Backends never write to stdout: the `errcat` binary prints reports there.

use super::codes::Code;
use super::config;
use super::events::{LogEvent, LogLevel};
use std::sync::{Arc, Mutex, MutexGuard};

pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Level filtering front for a logger backend
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Stderr service built from the logging preferences
    pub fn from_preferences() -> Self {
        let format = if config::use_structured_logging() {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        Self::new(Arc::new(StderrLogger::new(format)), config::get_min_log_level())
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    pub fn log_event(&self, event: LogEvent) {
        if self.should_log(event.level) {
            self.logger.log(&event);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `[LEVEL] CODE - message key=value`
    Text,
    /// One JSON object per line
    Json,
}

pub struct StderrLogger {
    format: OutputFormat,
}

impl StderrLogger {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    fn render(&self, event: &LogEvent) -> String {
        match self.format {
            OutputFormat::Text if event.is_error() => event.format_detailed(),
            OutputFormat::Text => event.format(),
            OutputFormat::Json => event.format_json().unwrap_or_else(|_| event.format()),
        }
    }
}

impl Logger for StderrLogger {
    fn log(&self, event: &LogEvent) {
        eprintln!("{}", self.render(event));
    }
}

/// Forwards events to the `log` facade
///
/// Level filtering is left to whatever `log` backend the binary installs.
#[cfg(feature = "log-facade")]
pub struct LogCrateLogger;

#[cfg(feature = "log-facade")]
impl Logger for LogCrateLogger {
    fn log(&self, event: &LogEvent) {
        let level = match event.level {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warning => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
        };

        log::log!(target: "errcat", level, "{}", event.format());
    }
}

/// Captures events, keeping at most the log buffer size
#[derive(Default)]
pub struct MemoryLogger {
    captured: Mutex<Vec<LogEvent>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    fn captured(&self) -> MutexGuard<'_, Vec<LogEvent>> {
        self.captured
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.captured().clone()
    }

    pub fn len(&self) -> usize {
        self.captured().len()
    }

    pub fn is_empty(&self) -> bool {
        self.captured().is_empty()
    }

    pub fn count_at(&self, level: LogLevel) -> usize {
        self.captured().iter().filter(|e| e.level == level).count()
    }

    /// Captured events carrying `code`, oldest first
    pub fn with_code(&self, code: Code) -> Vec<LogEvent> {
        self.captured()
            .iter()
            .filter(|e| e.code == code)
            .cloned()
            .collect()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        let mut captured = self.captured();

        let capacity = config::get_error_buffer_size();
        if captured.len() >= capacity {
            let overflow = captured.len() + 1 - capacity;
            captured.drain(..overflow);
        }

        captured.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_memory_logger() {
        let logger = MemoryLogger::new();
        assert!(logger.is_empty());

        logger.log(&LogEvent::success(codes::success::CATALOG_LOADED, "loaded"));
        logger.log(&LogEvent::error(
            codes::catalog::DUPLICATE_GLOBAL_CODE,
            "collision",
        ));
        logger.log(&LogEvent::warning_with_code(
            codes::catalog::INVALID_LOCAL_CODE,
            "tolerated",
        ));

        assert_eq!(logger.len(), 3);
        assert_eq!(logger.count_at(LogLevel::Error), 1);
        assert_eq!(logger.count_at(LogLevel::Warning), 1);
        assert_eq!(logger.with_code(codes::catalog::INVALID_LOCAL_CODE).len(), 1);
        assert_eq!(logger.events()[0].message, "loaded");
    }

    #[test]
    fn test_service_filters_by_level() {
        let logger = Arc::new(MemoryLogger::new());
        let service = LoggingService::new(logger.clone(), LogLevel::Warning);

        service.log_event(LogEvent::debug("debug"));
        service.log_event(LogEvent::info("info"));
        service.log_event(LogEvent::warning("warning"));
        service.log_event(LogEvent::error(codes::system::INTERNAL_ERROR, "error"));

        assert_eq!(service.min_level(), LogLevel::Warning);
        assert_eq!(logger.len(), 2);
        assert!(logger.with_code(codes::system::INTERNAL_ERROR)[0].is_error());
    }

    #[test]
    fn test_stderr_rendering() {
        let event = LogEvent::error(codes::catalog::UNRESOLVABLE_CATALOG, "missing")
            .with_context("catalog", "Shop");

        let text = StderrLogger::new(OutputFormat::Text).render(&event);
        assert!(text.starts_with("[ERROR] EC010 - missing"));
        assert!(text.contains("Category:"));

        let json = StderrLogger::new(OutputFormat::Json).render(&event);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["code"], "EC010");

        StderrLogger::new(OutputFormat::Text).log(&LogEvent::info("hello"));
    }
}
