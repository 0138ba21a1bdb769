#![doc = include_str!("../README.md")]

use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use tokio::sync::OnceCell;

#[cfg(test)]
#[macro_use]
pub mod test_util;

pub mod api;
pub mod config;
pub mod ranker;
pub mod reference;

pub use crate::config::Config;
pub use crate::ranker::{
    rank_by_proximity, rank_from_source, Located, Location, ProximityRanker, ProximityResult,
    RankOutcome, RankedEntity, DEFAULT_RADIUS_KM,
};
pub use crate::reference::{ReferencePoint, ReferencePointSelector, ReferenceSource};

/// Level of the fallback logger used until a configuration file is loaded.
pub const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;

/// Initialized log4rs handle
pub static LOG_HANDLE: OnceCell<Option<log4rs::Handle>> = OnceCell::const_new();

/// Returns the log4rs handle.
///
/// The first call installs a console logger on stderr at
/// [`DEFAULT_LOG_LEVEL`]. Stdout is left to the ranked results.
pub async fn get_log_handle() -> Option<log4rs::Handle> {
    LOG_HANDLE
        .get_or_init(|| async move {
            let stderr = ConsoleAppender::builder()
                .target(Target::Stderr)
                .encoder(Box::new(PatternEncoder::new(
                    "{d(%H:%M:%S)} {h({l}):5.5} {t} - {m}{n}",
                )))
                .build();
            let config = log4rs::config::Config::builder()
                .appender(Appender::builder().build("stderr", Box::new(stderr)))
                .build(Root::builder().appender("stderr").build(DEFAULT_LOG_LEVEL));

            match config {
                Ok(config) => log4rs::init_config(config).ok(),
                Err(e) => {
                    eprintln!("(get_log_handle) invalid fallback logger: {}", e);
                    None
                }
            }
        })
        .await
        .to_owned()
}

/// Replaces the active logger configuration with the YAML file at
/// `config_file`.
pub async fn load_logger_config_from_file(config_file: &str) -> Result<(), String> {
    let Some(log_handle) = get_log_handle().await else {
        return Err(String::from(
            "(load_logger_config_from_file) no logger installed, keeping default output",
        ));
    };

    let config = log4rs::config::load_config_file(config_file, Default::default())
        .map_err(|e| format!("(load_logger_config_from_file) {}: {}", config_file, e))?;
    log_handle.set_config(config);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_logger_config_from_missing_file() {
        get_log_handle().await;
        ut_info!("(test_load_logger_config_from_missing_file) Start.");

        let result = load_logger_config_from_file("does/not/exist/log4rs.yaml").await;
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .contains("does/not/exist/log4rs.yaml"));

        ut_info!("(test_load_logger_config_from_missing_file) Success.");
    }

    #[tokio::test]
    async fn test_load_logger_config_from_file() {
        get_log_handle().await;
        ut_info!("(test_load_logger_config_from_file) Start.");

        let path = std::env::temp_dir()
            .join(format!("car-buddy-log4rs-{}.yaml", std::process::id()));
        std::fs::write(
            &path,
            "appenders:\n  stderr:\n    kind: console\n    target: stderr\nroot:\n  level: info\n  appenders:\n    - stderr\n",
        )
        .unwrap();

        let result = load_logger_config_from_file(&path.to_string_lossy()).await;
        std::fs::remove_file(&path).unwrap();
        assert_eq!(result, Ok(()));

        ut_info!("(test_load_logger_config_from_file) Success.");
    }
}
