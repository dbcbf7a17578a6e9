use glance_core::{ApiError, ApiErrorKind, CoreError, ValidationError, API_KEY_ENV};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error("failed to format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) | Self::Core(CoreError::Validation(_)) => 2,
            Self::Api(error) | Self::Core(CoreError::Api(error)) => api_exit_code(error),
            Self::Serialization(_) | Self::Timestamp(_) => 5,
            Self::Io(_) => 10,
        }
    }

    /// Follow-up advice printed under the error message.
    pub fn hint(&self) -> Option<String> {
        let error = match self {
            Self::Api(error) | Self::Core(CoreError::Api(error)) => error,
            _ => return None,
        };
        if error.kind() == ApiErrorKind::Unauthenticated {
            Some(format!(
                "set {API_KEY_ENV} or pass --api-key with a valid Glassnode API key"
            ))
        } else if error.retryable() {
            Some(String::from("try again later"))
        } else {
            None
        }
    }
}

const fn api_exit_code(error: &ApiError) -> u8 {
    match error.kind() {
        ApiErrorKind::InvalidRequest => 2,
        ApiErrorKind::Unauthenticated => 3,
        _ => 4,
    }
}
