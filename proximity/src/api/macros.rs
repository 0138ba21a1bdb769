//! log macro's for REST API logging

/// Writes a debug! message to the app::api logger
#[macro_export]
macro_rules! api_debug {
    ($($arg:tt)+) => {
        log::debug!(target: "app::api", $($arg)+)
    };
}

/// Writes an info! message to the app::api logger
#[macro_export]
macro_rules! api_info {
    ($($arg:tt)+) => {
        log::info!(target: "app::api", $($arg)+)
    };
}

/// Writes an warn! message to the app::api logger
#[macro_export]
macro_rules! api_warn {
    ($($arg:tt)+) => {
        log::warn!(target: "app::api", $($arg)+)
    };
}

/// Writes an error! message to the app::api logger
#[macro_export]
macro_rules! api_error {
    ($($arg:tt)+) => {
        log::error!(target: "app::api", $($arg)+)
    };
}
