//! CLI error type.

use thiserror::Error;
use threadline_admin::AdminError;
use threadline_client::{ApiError, ConfigError};
use threadline_storefront::StorefrontError;
use threadline_storefront::storage::StorageError;

/// Anything a command can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    /// Missing or invalid environment configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storefront(#[from] StorefrontError),

    #[error(transparent)]
    Admin(#[from] AdminError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Terminal read or write failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Arguments that parse but do not make sense together.
    #[error("{0}")]
    Usage(String),
}

pub type Result<T> = std::result::Result<T, CliError>;
