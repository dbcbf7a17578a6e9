//! Remote API contract and error taxonomy.
//!
//! [`MetricsApi`] is the seam between the catalog/series logic and the
//! network. [`GlassnodeApi`] is the production implementation; tests plug in
//! their own implementations or drive `GlassnodeApi` through a scripted
//! [`HttpClient`](crate::HttpClient).
//!
//! | Method | Result | Endpoint |
//! |--------|--------|----------|
//! | [`fetch_assets`](MetricsApi::fetch_assets) | `Vec<Asset>` | asset list |
//! | [`fetch_metrics`](MetricsApi::fetch_metrics) | `Vec<Metric>` | metric list |
//! | [`fetch_series`](MetricsApi::fetch_series) | [`Series`] | metric data for one asset |

mod glassnode;

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{Asset, AssetSymbol, Metric, MetricPath, Series, ValidationError};

pub use glassnode::GlassnodeApi;

/// Failure classification surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// No credential configured, or the remote rejected it.
    Unauthenticated,
    /// Transport failure: unreachable host, reset connection, timeout.
    NetworkFailure,
    /// Remote answered with a non-success status other than 401/403.
    HttpStatus,
    /// Body did not match the expected schema.
    DecodeFailure,
    /// A series had no points to summarize.
    InsufficientData,
    /// Caller-side precondition violated (unknown selection, blank input).
    InvalidRequest,
}

/// Structured error returned by every remote operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    kind: ApiErrorKind,
    message: String,
    status: Option<u16>,
    retryable: bool,
}

impl ApiError {
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Unauthenticated,
            message: message.into(),
            status: None,
            retryable: false,
        }
    }

    pub fn missing_credential() -> Self {
        Self::unauthenticated("no api key configured")
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::NetworkFailure,
            message: message.into(),
            status: None,
            retryable: true,
        }
    }

    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::HttpStatus,
            message: message.into(),
            status: Some(status),
            retryable: status == 408 || status == 429 || status >= 500,
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::DecodeFailure,
            message: message.into(),
            status: None,
            retryable: false,
        }
    }

    pub fn insufficient_data(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::InsufficientData,
            message: message.into(),
            status: None,
            retryable: false,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::InvalidRequest,
            message: message.into(),
            status: None,
            retryable: false,
        }
    }

    pub const fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn status(&self) -> Option<u16> {
        self.status
    }

    /// Whether repeating the same call later may succeed. The core itself
    /// never retries.
    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    /// `true` for failures a display layer shows as "no data".
    pub const fn is_no_data(&self) -> bool {
        matches!(
            self.kind,
            ApiErrorKind::DecodeFailure | ApiErrorKind::InsufficientData
        )
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            ApiErrorKind::Unauthenticated => "api.unauthenticated",
            ApiErrorKind::NetworkFailure => "api.network_failure",
            ApiErrorKind::HttpStatus => "api.http_status",
            ApiErrorKind::DecodeFailure => "api.decode_failure",
            ApiErrorKind::InsufficientData => "api.insufficient_data",
            ApiErrorKind::InvalidRequest => "api.invalid_request",
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for ApiError {}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        Self::invalid_request(error.to_string())
    }
}

/// Boxed future returned by [`MetricsApi`] methods.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;

/// Read-only access to the remote catalog and series endpoints.
///
/// Each call issues at most one request and never retries; a missing
/// credential must fail with [`ApiErrorKind::Unauthenticated`] before any
/// request is attempted.
pub trait MetricsApi: Send + Sync {
    /// Full asset list in remote order.
    fn fetch_assets(&self) -> ApiFuture<'_, Vec<Asset>>;

    /// Full metric list in remote order, each with its supported symbols.
    fn fetch_metrics(&self) -> ApiFuture<'_, Vec<Metric>>;

    /// Series for one metric and asset.
    fn fetch_series<'a>(
        &'a self,
        path: &'a MetricPath,
        symbol: &'a AssetSymbol,
    ) -> ApiFuture<'a, Series>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_retryability_follows_status_class() {
        assert!(ApiError::http_status(503, "down").retryable());
        assert!(ApiError::http_status(429, "slow down").retryable());
        assert!(!ApiError::http_status(404, "missing").retryable());
        assert_eq!(ApiError::http_status(404, "missing").status(), Some(404));
    }

    #[test]
    fn decode_and_insufficient_data_are_distinct_no_data_kinds() {
        let decode = ApiError::decode("bad json");
        let empty = ApiError::insufficient_data("no points");
        assert!(decode.is_no_data() && empty.is_no_data());
        assert_ne!(decode.kind(), empty.kind());
        assert!(!ApiError::missing_credential().is_no_data());
    }

    #[test]
    fn display_includes_stable_code() {
        assert_eq!(
            ApiError::missing_credential().to_string(),
            "no api key configured (api.unauthenticated)"
        );
    }

    #[test]
    fn validation_errors_become_invalid_requests() {
        let error = ApiError::from(ValidationError::EmptyMetricPath);
        assert_eq!(error.kind(), ApiErrorKind::InvalidRequest);
        assert_eq!(error.message(), "metric path cannot be empty");
    }
}
