//! log macro's for proximity ranking logging

/// Writes a debug! message to the app::ranker logger
#[macro_export]
macro_rules! ranker_debug {
    ($($arg:tt)+) => {
        log::debug!(target: "app::ranker", $($arg)+)
    };
}

/// Writes an info! message to the app::ranker logger
#[macro_export]
macro_rules! ranker_info {
    ($($arg:tt)+) => {
        log::info!(target: "app::ranker", $($arg)+)
    };
}

/// Writes an warn! message to the app::ranker logger
#[macro_export]
macro_rules! ranker_warn {
    ($($arg:tt)+) => {
        log::warn!(target: "app::ranker", $($arg)+)
    };
}

/// Writes an error! message to the app::ranker logger
#[macro_export]
macro_rules! ranker_error {
    ($($arg:tt)+) => {
        log::error!(target: "app::ranker", $($arg)+)
    };
}
