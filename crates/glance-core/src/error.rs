use thiserror::Error;

/// Validation errors raised while constructing domain values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("asset symbol cannot be empty")]
    EmptySymbol,
    #[error("asset symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("asset symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("metric path cannot be empty")]
    EmptyMetricPath,
    #[error("metric path contains invalid character '{ch}' at index {index}")]
    MetricPathInvalidChar { ch: char, index: usize },
    #[error("metric path contains invalid segment '{segment}'")]
    MetricPathInvalidSegment { segment: String },

    #[error("api key cannot be empty")]
    EmptyApiKey,

    #[error("catalog id cannot be empty")]
    EmptyId,

    #[error("invalid value for {name}: '{value}'")]
    InvalidConfig { name: &'static str, value: String },
}

/// Error for entry points that take raw user input: either the input is
/// invalid or the remote call behind it failed.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] crate::api::ApiError),
}
