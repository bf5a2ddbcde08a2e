//! Global logging for errcat
//!
//! One process-wide `LoggingService`, set once and read through the logging macros.
//! Logging before initialization is a no-op.

pub mod codes;
pub mod config;
pub mod events;
#[macro_use]
pub mod macros;
pub mod service;

use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
#[cfg(feature = "log-facade")]
pub use service::LogCrateLogger;
pub use service::{Logger, LoggingService, MemoryLogger, OutputFormat, StderrLogger};

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

/// Install the process-wide service
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    let missing = codes::unregistered(&[
        codes::catalog::INVALID_LOCAL_CODE,
        codes::catalog::DUPLICATE_GLOBAL_CODE,
        codes::catalog::UNRESOLVABLE_CATALOG,
        codes::catalog_file::PARSE_ERROR,
    ]);
    if let Some(code) = missing.first() {
        return Err(format!("Missing metadata for code {}", code));
    }

    GLOBAL_LOGGER
        .set(service.clone())
        .map_err(|_| "Global logger already initialized".to_string())?;

    service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

/// Hand an event to the global logger
///
/// Messages longer than the configured maximum are cut on a char boundary.
pub fn dispatch(mut event: LogEvent) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };

    let max_length = config::get_max_log_message_length();
    if event.message.len() > max_length {
        let mut cut = max_length;
        while !event.message.is_char_boundary(cut) {
            cut -= 1;
        }
        event.message.truncate(cut);
    }

    logger.log_event(event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_without_logger() {
        dispatch(LogEvent::info("no logger yet").with_context("key", "value"));
    }

    #[test]
    fn test_global_logger_is_set_once() {
        let service = Arc::new(LoggingService::new(
            Arc::new(MemoryLogger::new()),
            LogLevel::Debug,
        ));
        let _ = init_global_logging_with_service(service.clone());

        assert!(is_initialized());
        assert!(init_global_logging_with_service(service).is_err());
    }
}
