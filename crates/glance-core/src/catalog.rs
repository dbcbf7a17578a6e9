//! Catalog Resolver.
//!
//! Serves the asset and metric lists to a selection UI and turns a user's
//! `(asset, metric)` choice into a fetchable metric path. Both lists are
//! fetched once and memoized in [`CatalogCell`]s owned by the resolver.
//!
//! ```rust,ignore
//! let resolver = CatalogResolver::new(api, None);
//! let assets = resolver.get_all_assets().await?;
//! let btc = AssetSymbol::parse("BTC")?;
//! let metrics = resolver.metrics_supporting(&btc).await?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::info;

use crate::api::{ApiError, MetricsApi};
use crate::cache::CatalogCell;
use crate::{Asset, AssetSymbol, Metric, MetricPath};

/// A user's pick in the configuration UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub asset_symbol: AssetSymbol,
    pub metric_id: String,
}

impl Selection {
    pub fn new(asset_symbol: AssetSymbol, metric_id: impl Into<String>) -> Self {
        Self {
            asset_symbol,
            metric_id: metric_id.into(),
        }
    }
}

/// A selection checked against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSelection {
    pub asset: Asset,
    pub metric: Metric,
}

impl ResolvedSelection {
    pub fn path(&self) -> &MetricPath {
        &self.metric.path
    }

    pub fn symbol(&self) -> &AssetSymbol {
        &self.asset.symbol
    }

    /// Widget title, e.g. `BTC: Addresses in Profit`.
    pub fn title(&self) -> String {
        format!("{}: {}", self.asset.symbol, self.metric.name)
    }
}

/// Memoizing front end over [`MetricsApi`] catalog endpoints.
pub struct CatalogResolver {
    api: Arc<dyn MetricsApi>,
    assets: CatalogCell<Asset>,
    metrics: CatalogCell<Metric>,
}

impl CatalogResolver {
    /// `ttl = None` keeps the catalog until [`refresh`](Self::refresh).
    pub fn new(api: Arc<dyn MetricsApi>, ttl: Option<Duration>) -> Self {
        Self {
            api,
            assets: CatalogCell::new("assets", ttl),
            metrics: CatalogCell::new("metrics", ttl),
        }
    }

    /// All assets sorted by symbol. The first call fetches; later calls
    /// return the same shared slice.
    pub async fn get_all_assets(&self) -> Result<Arc<[Asset]>, ApiError> {
        self.assets.get_or_try_fill(|| self.fetch_sorted_assets()).await
    }

    /// All metrics in remote order, memoized like the assets.
    pub async fn get_all_metrics(&self) -> Result<Arc<[Metric]>, ApiError> {
        self.metrics.get_or_try_fill(|| self.api.fetch_metrics()).await
    }

    /// Metrics whose supported symbols contain `symbol`, in catalog order.
    /// Resolves the metric list first when needed.
    pub async fn metrics_supporting(&self, symbol: &AssetSymbol) -> Result<Vec<Metric>, ApiError> {
        let metrics = self.get_all_metrics().await?;
        Ok(metrics
            .iter()
            .filter(|metric| metric.supports(symbol))
            .cloned()
            .collect())
    }

    /// Re-fetches both lists. A list whose fetch fails keeps its previous
    /// contents; the first error is returned after both attempts.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        let assets = self.assets.refresh(|| self.fetch_sorted_assets()).await;
        let metrics = self.metrics.refresh(|| self.api.fetch_metrics()).await;

        let (assets, metrics) = (assets?, metrics?);
        info!(
            assets = assets.len(),
            metrics = metrics.len(),
            "catalog refreshed"
        );
        Ok(())
    }

    /// Drops both cached lists; the next read fetches again.
    pub async fn invalidate(&self) {
        self.assets.invalidate().await;
        self.metrics.invalidate().await;
    }

    pub async fn assets_by_ids(&self, ids: &[String]) -> Result<Vec<Asset>, ApiError> {
        let assets = self.get_all_assets().await?;
        Ok(assets
            .iter()
            .filter(|asset| ids.contains(&asset.id))
            .cloned()
            .collect())
    }

    pub async fn metrics_by_ids(&self, ids: &[String]) -> Result<Vec<Metric>, ApiError> {
        let metrics = self.get_all_metrics().await?;
        Ok(metrics
            .iter()
            .filter(|metric| ids.contains(&metric.id))
            .cloned()
            .collect())
    }

    /// Metrics ordered by display name for picker suggestions.
    pub async fn suggested_metrics(&self) -> Result<Vec<Metric>, ApiError> {
        let mut metrics = self.get_all_metrics().await?.to_vec();
        metrics.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(metrics)
    }

    pub async fn default_asset(&self) -> Result<Option<Asset>, ApiError> {
        Ok(self.get_all_assets().await?.first().cloned())
    }

    pub async fn default_metric(&self) -> Result<Option<Metric>, ApiError> {
        Ok(self.get_all_metrics().await?.first().cloned())
    }

    /// Asset lookup ignoring ASCII case, for typed input.
    pub async fn find_asset(&self, symbol: &str) -> Result<Option<Asset>, ApiError> {
        let assets = self.get_all_assets().await?;
        Ok(assets
            .iter()
            .find(|asset| asset.symbol.eq_ignore_case(symbol))
            .cloned())
    }

    /// Checks a selection against the catalog.
    ///
    /// Fails with `InvalidRequest` when the asset or metric is unknown, or
    /// when the metric is not available for the asset.
    pub async fn resolve(&self, selection: &Selection) -> Result<ResolvedSelection, ApiError> {
        let assets = self.get_all_assets().await?;
        let asset = assets
            .iter()
            .find(|asset| asset.symbol == selection.asset_symbol)
            .cloned()
            .ok_or_else(|| {
                ApiError::invalid_request(format!(
                    "unknown asset '{}'",
                    selection.asset_symbol
                ))
            })?;

        let metrics = self.get_all_metrics().await?;
        let metric = metrics
            .iter()
            .find(|metric| metric.id == selection.metric_id)
            .cloned()
            .ok_or_else(|| {
                ApiError::invalid_request(format!("unknown metric id '{}'", selection.metric_id))
            })?;

        if !metric.supports(&asset.symbol) {
            return Err(ApiError::invalid_request(format!(
                "metric '{}' is not available for {}",
                metric.name, asset.symbol
            )));
        }

        Ok(ResolvedSelection { asset, metric })
    }

    async fn fetch_sorted_assets(&self) -> Result<Vec<Asset>, ApiError> {
        let mut assets = self.api.fetch_assets().await?;
        assets.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        Ok(assets)
    }
}

impl std::fmt::Debug for CatalogResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogResolver")
            .field("ttl", &self.assets.ttl())
            .finish_non_exhaustive()
    }
}
