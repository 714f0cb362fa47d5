//! Logging system initialization
//!
//! The terminal belongs to the UI, so log lines go to `studytimer.log`.

use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::AppError;

pub const LOG_FILE_PREFIX: &str = "studytimer";

pub fn init_logging(log_dir: &Path, level: &str) -> Result<(), AppError> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(log_dir)
        .map_err(|e| AppError::Logging(Box::new(e)))?;

    let subscriber = fmt()
        .with_writer(file_appender)
        .with_env_filter(EnvFilter::new(format!("studytimer={level}")))
        .with_ansi(false)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).map_err(|e| AppError::Logging(Box::new(e)))?;

    tracing::info!(dir = %log_dir.display(), "studytimer v{} started", env!("CARGO_PKG_VERSION"));
    Ok(())
}
