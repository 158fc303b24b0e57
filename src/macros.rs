/// Log at debug level, recording the invoking file and line.
///
/// Expands to [`HecEmitter::log_debug`](crate::emitter::HecEmitter::log_debug)
/// and must be awaited:
///
/// ```no_run
/// # async fn run(emitter: splunk_log_sink::HecEmitter) {
/// splunk_log_sink::hec_debug!(emitter, "cache warmed in {} ms", 12).await;
/// # }
/// ```
#[macro_export]
macro_rules! hec_debug {
    ($emitter:expr, $($arg:tt)+) => {
        $emitter.log_debug(
            ::std::format!($($arg)+),
            $crate::record::SourceLocation::new(::std::file!(), ::std::line!()),
        )
    };
}

/// Log at information level, recording the invoking file and line.
#[macro_export]
macro_rules! hec_information {
    ($emitter:expr, $($arg:tt)+) => {
        $emitter.log_information(
            ::std::format!($($arg)+),
            $crate::record::SourceLocation::new(::std::file!(), ::std::line!()),
        )
    };
}

/// Log at warning level, recording the invoking file and line.
#[macro_export]
macro_rules! hec_warning {
    ($emitter:expr, $($arg:tt)+) => {
        $emitter.log_warning(
            ::std::format!($($arg)+),
            $crate::record::SourceLocation::new(::std::file!(), ::std::line!()),
        )
    };
}
