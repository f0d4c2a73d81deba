//! Logger setup for hosts embedding the dispatcher.

use std::fs::File;
use std::io;

use log::SetLoggerError;
use simplelog::{ConfigBuilder, WriteLogger};
use thiserror::Error;

use crate::core::config::ResolvedConfig;

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("cannot open log file: {0}")]
    Io(#[from] io::Error),
    #[error("a logger is already installed: {0}")]
    AlreadyInstalled(#[from] SetLoggerError),
}

/// Installs the global logger: the configured log file, or stderr.
pub fn init_logging(config: &ResolvedConfig) -> Result<(), LoggingError> {
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    match &config.log_file {
        Some(path) => WriteLogger::init(config.log_level, log_config, File::create(path)?)?,
        None => WriteLogger::init(config.log_level, log_config, io::stderr())?,
    }

    log::info!("mangabatch logging at {} level", config.log_level);
    Ok(())
}
