//! log macro's for reference point logging

/// Writes a debug! message to the app::reference logger
#[macro_export]
macro_rules! reference_debug {
    ($($arg:tt)+) => {
        log::debug!(target: "app::reference", $($arg)+)
    };
}

/// Writes an info! message to the app::reference logger
#[macro_export]
macro_rules! reference_info {
    ($($arg:tt)+) => {
        log::info!(target: "app::reference", $($arg)+)
    };
}

/// Writes an warn! message to the app::reference logger
#[macro_export]
macro_rules! reference_warn {
    ($($arg:tt)+) => {
        log::warn!(target: "app::reference", $($arg)+)
    };
}

/// Writes an error! message to the app::reference logger
#[macro_export]
macro_rules! reference_error {
    ($($arg:tt)+) => {
        log::error!(target: "app::reference", $($arg)+)
    };
}
