//! Logging Infrastructure
//!
//! Structured logging setup for host applications embedding the engine.

use std::path::Path;
use tracing_appender::rolling::RollingFileAppender;

use crate::core::EngineConfig;

/// Log file prefix for the daily rolling appender
const LOG_FILE_PREFIX: &str = "booking-engine";

/// Initialize the logger at `info` level on stdout
pub fn init_logger() -> bool {
    init_logger_with_file(None, false, None)
}

/// Initialize the logger from `LOG_LEVEL` / `LOG_DIR` in the config
pub fn init_logger_from_config(config: &EngineConfig) -> bool {
    init_logger_with_file(Some(&config.log_level), false, config.log_dir.as_deref())
}

/// Initialize the logger with optional JSON output and file output
///
/// Returns `false` when a global subscriber is already installed; the
/// existing one is kept.
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&str>) -> bool {
    let level = parse_level(log_level);

    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let result = match (log_dir.and_then(file_appender), json) {
        (Some(appender), true) => builder.json().with_writer(appender).try_init(),
        (Some(appender), false) => builder.with_ansi(false).with_writer(appender).try_init(),
        (None, true) => builder.json().try_init(),
        (None, false) => builder.try_init(),
    };

    result.is_ok()
}

/// Parse a level name, falling back to `info`
pub fn parse_level(log_level: Option<&str>) -> tracing::Level {
    log_level
        .and_then(|level| level.trim().parse().ok())
        .unwrap_or(tracing::Level::INFO)
}

/// Daily rolling appender for `dir`, only when the directory exists
pub fn file_appender(dir: &str) -> Option<RollingFileAppender> {
    let log_path = Path::new(dir);
    if !log_path.is_dir() {
        return None;
    }
    Some(tracing_appender::rolling::daily(log_path, LOG_FILE_PREFIX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level(Some("debug")), tracing::Level::DEBUG);
        assert_eq!(parse_level(Some(" WARN ")), tracing::Level::WARN);
        assert_eq!(parse_level(Some("verbose")), tracing::Level::INFO);
        assert_eq!(parse_level(None), tracing::Level::INFO);
    }

    #[test]
    fn test_init_from_config_installs_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = EngineConfig::default();
        config.log_level = "debug".into();
        config.log_dir = Some(dir.path().to_str().unwrap().to_string());

        assert!(init_logger_from_config(&config));
        tracing::info!("logger installed");
        assert!(!init_logger_from_config(&config));
    }

    #[test]
    fn test_file_appender_requires_existing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_str().unwrap();
        assert!(file_appender(path).is_some());

        let missing = dir.path().join("missing");
        assert!(file_appender(missing.to_str().unwrap()).is_none());
    }
}
