//! Series Fetcher and summary statistics.
//!
//! Fetching is a read-through to the remote API with no caching; every call
//! issues one request. [`summarize`] is pure and never indexes into an empty
//! series.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::{ApiError, MetricsApi};
use crate::{AssetSymbol, MetricPath, Series};

/// Headline numbers for one series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub current: f64,
    pub first: f64,
    pub min: f64,
    pub max: f64,
    pub delta: f64,
    /// `None` when the first value is zero and the ratio is undefined.
    pub delta_percent: Option<f64>,
    pub first_timestamp: i64,
    pub last_timestamp: i64,
    pub point_count: usize,
}

impl SeriesSummary {
    pub fn is_increase(&self) -> bool {
        self.delta > 0.0
    }
}

/// Computes current/first/min/max/delta for a series.
///
/// "First" and "current" are the first and last points as given; ordering
/// is not re-checked. An empty series yields `InsufficientData`.
pub fn summarize(series: &Series) -> Result<SeriesSummary, ApiError> {
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return Err(ApiError::insufficient_data("series has no data points"));
    };

    let (min, max) = series
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), point| {
            (min.min(point.v), max.max(point.v))
        });

    let delta = last.v - first.v;
    Ok(SeriesSummary {
        current: last.v,
        first: first.v,
        min,
        max,
        delta,
        delta_percent: percent_change(first.v, delta),
        first_timestamp: first.t,
        last_timestamp: last.t,
        point_count: series.len(),
    })
}

/// `delta / base * 100`, or `None` when the result would not be finite.
pub fn percent_change(base: f64, delta: f64) -> Option<f64> {
    if base == 0.0 {
        return None;
    }
    let percent = delta / base * 100.0;
    percent.is_finite().then_some(percent)
}

/// Retrieves metric series for one asset.
#[derive(Clone)]
pub struct SeriesFetcher {
    api: Arc<dyn MetricsApi>,
}

impl SeriesFetcher {
    pub fn new(api: Arc<dyn MetricsApi>) -> Self {
        Self { api }
    }

    /// Fetches the series for `path` and `symbol`.
    ///
    /// Blank inputs are rejected with `InvalidRequest` before any request is
    /// made.
    pub async fn fetch_series(&self, path: &str, symbol: &str) -> Result<Series, ApiError> {
        let path = MetricPath::parse(path)?;
        let symbol = AssetSymbol::parse(symbol)?;
        self.fetch(&path, &symbol).await
    }

    /// Typed variant of [`fetch_series`](Self::fetch_series).
    pub async fn fetch(&self, path: &MetricPath, symbol: &AssetSymbol) -> Result<Series, ApiError> {
        let series = self.api.fetch_series(path, symbol).await?;
        debug!(%path, %symbol, points = series.len(), "series fetched");
        if !series.is_chronological() {
            warn!(%path, %symbol, "series timestamps are not ascending");
        }
        Ok(series)
    }

    /// Fetches and summarizes in one step.
    pub async fn fetch_summary(
        &self,
        path: &MetricPath,
        symbol: &AssetSymbol,
    ) -> Result<SeriesSummary, ApiError> {
        let series = self.fetch(path, symbol).await?;
        summarize(&series)
    }
}

impl std::fmt::Debug for SeriesFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeriesFetcher").finish_non_exhaustive()
    }
}
