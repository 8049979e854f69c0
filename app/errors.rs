use std::io;

use config::ConfigError;
use flv_formats::errors::FLVError;
use thiserror::Error;
use tracing::dispatcher::SetGlobalDefaultError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("config error: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("flv error: {0}")]
    FLVError(#[from] FLVError),
    #[error("io error: {0}")]
    IoError(#[from] io::Error),
    #[error("logger setup failed: {0}")]
    LoggerError(#[from] SetGlobalDefaultError),
}

pub(crate) type AppResult<T> = Result<T, AppError>;
