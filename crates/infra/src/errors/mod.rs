//! Infrastructure errors and conversions into domain errors

mod conversions;

pub(crate) use self::conversions::transport_error;

use campline_domain::ConfigError;
use thiserror::Error;

/// Failures while assembling infrastructure (clients, config, logging)
#[derive(Debug, Error)]
pub enum InfraError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}
