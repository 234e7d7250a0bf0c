//! Logging macros taking a `Code` plus `"key" => value` context pairs.
//!
//! Context values only need `Display`; they are formatted once and borrowed
//! by the context helpers in [`crate::logging`].

/// Format the context pairs and append them as the last argument of `$func`
#[doc(hidden)]
#[macro_export]
macro_rules! __log_with_context {
    ($func:path, ($($arg:expr),*), $($key:expr => $value:expr),+) => {
        {
            let owned: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context: Vec<(&str, &str)> = owned.iter().map(|(k, v)| (*k, v.as_str())).collect();
            $func($($arg,)* context)
        }
    };
}

#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr) => {
        $crate::logging::log_error_with_context($code, $message, None, vec![])
    };

    ($code:expr, $message:expr, range = $range:expr) => {
        $crate::logging::log_error_with_context($code, $message, Some($range), vec![])
    };

    ($code:expr, $message:expr, range = $range:expr, $($key:expr => $value:expr),+) => {
        $crate::__log_with_context!(
            $crate::logging::log_error_with_context,
            ($code, $message, Some($range)),
            $($key => $value),+
        )
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {
        $crate::__log_with_context!(
            $crate::logging::log_error_with_context,
            ($code, $message, None),
            $($key => $value),+
        )
    };
}

#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr) => {
        $crate::logging::log_success_with_context($code, $message, vec![])
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {
        $crate::__log_with_context!(
            $crate::logging::log_success_with_context,
            ($code, $message),
            $($key => $value),+
        )
    };
}

#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        $crate::logging::log_info_with_context($message, vec![])
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        $crate::__log_with_context!(
            $crate::logging::log_info_with_context,
            ($message),
            $($key => $value),+
        )
    };
}

/// Warning, optionally tagged with a `W`-code: `log_warning!(code = c, msg, ...)`
#[macro_export]
macro_rules! log_warning {
    (code = $code:expr, $message:expr) => {
        $crate::logging::log_warning_with_context(Some($code), $message, vec![])
    };

    (code = $code:expr, $message:expr, $($key:expr => $value:expr),+) => {
        $crate::__log_with_context!(
            $crate::logging::log_warning_with_context,
            (Some($code), $message),
            $($key => $value),+
        )
    };

    ($message:expr) => {
        $crate::logging::log_warning_with_context(None, $message, vec![])
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        $crate::__log_with_context!(
            $crate::logging::log_warning_with_context,
            (None, $message),
            $($key => $value),+
        )
    };
}

/// Debug event. Nothing is formatted unless the configured level admits debug.
#[macro_export]
macro_rules! log_debug {
    ($message:expr $(, $key:expr => $value:expr)*) => {
        if $crate::logging::config::get_min_log_level() >= $crate::logging::LogLevel::Debug {
            if let Some(logger) = $crate::logging::try_get_global_logger() {
                #[allow(unused_mut)]
                let mut event = $crate::logging::LogEvent::debug($message);
                $(
                    event = event.with_context($key, &format!("{}", $value));
                )*
                logger.log_event(event);
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::logging::codes;

    // Without a global logger every macro is a silent no-op
    #[test]
    fn test_macros_without_global_logger() {
        log_error!(codes::document::IO_ERROR, "read failed");
        log_error!(codes::document::IO_ERROR, "read failed", "path" => "a.py");
        log_error!(
            codes::highlight::RANGE_OUT_OF_BOUNDS,
            "bad range",
            range = crate::utils::TextRange::new(1, 2)
        );
        log_error!(
            codes::highlight::RANGE_OUT_OF_BOUNDS,
            "bad range",
            range = crate::utils::TextRange::new(1, 2),
            "document_len" => 0
        );
        log_success!(codes::success::THEME_LOADED, "loaded", "rules" => 3);
        log_info!("info", "count" => 1);
        log_warning!("plain warning");
        log_warning!(code = codes::theme::INVALID_COLOR, "bad color", "value" => "#zz");
        log_debug!("debug");
        log_debug!("debug", "tokens" => 10);
    }
}
