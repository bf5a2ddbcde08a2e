//! Logging macros taking a `Code` and `key => value` context
//!
//! Context values may be any `Display` type.

#[doc(hidden)]
#[macro_export]
macro_rules! __errcat_log {
    ($event:expr $(, $key:expr => $value:expr)*) => {{
        let event = $event;
        $(
            let event = event.with_context($key, &::std::format!("{}", $value));
        )*
        $crate::logging::dispatch(event)
    }};
}

#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__errcat_log!($crate::logging::LogEvent::error($code, $message) $(, $key => $value)*)
    };
}

#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__errcat_log!($crate::logging::LogEvent::success($code, $message) $(, $key => $value)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__errcat_log!($crate::logging::LogEvent::info($message) $(, $key => $value)*)
    };
}

/// Warning, optionally carrying a code: `log_warning!(code = c, "msg", ...)`
#[macro_export]
macro_rules! log_warning {
    (code = $code:expr, $message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__errcat_log!(
            $crate::logging::LogEvent::warning_with_code($code, $message) $(, $key => $value)*
        )
    };

    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::__errcat_log!($crate::logging::LogEvent::warning($message) $(, $key => $value)*)
    };
}

/// Debug events are only built when the configured level lets them through
#[macro_export]
macro_rules! log_debug {
    ($message:expr $(, $key:expr => $value:expr)* $(,)?) => {
        if $crate::logging::config::get_min_log_level() >= $crate::logging::LogLevel::Debug {
            $crate::__errcat_log!($crate::logging::LogEvent::debug($message) $(, $key => $value)*)
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::logging::codes;

    #[test]
    fn test_macros_expand() {
        let component = "ExampleA";
        let code: i64 = 100_001;

        log_error!(codes::catalog::DUPLICATE_GLOBAL_CODE, "Collision",
            "component" => component,
            "code" => code
        );
        log_warning!(code = codes::catalog::INVALID_LOCAL_CODE, "Tolerated",
            "code" => 0
        );
        log_warning!("Plain warning");
        log_success!(codes::success::CATALOG_QUERY_COMPLETE, "Done", "rows" => 5);
        log_info!("Loading", "path" => std::path::Path::new("catalog.toml").display());
        log_debug!("Skipped", "component" => component);
    }
}
