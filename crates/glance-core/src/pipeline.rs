//! End-to-end flow from a selection to display-ready numbers.

use std::sync::Arc;

use serde::Serialize;

use crate::api::{ApiError, GlassnodeApi, MetricsApi};
use crate::catalog::{CatalogResolver, Selection};
use crate::chart::{chart_frame, ChartFrame};
use crate::credentials::{ApiKey, CredentialProvider, EnvCredentialProvider, StaticCredential};
use crate::series::{summarize, SeriesFetcher, SeriesSummary};
use crate::{Asset, AssetSymbol, CoreError, GlanceConfig, Metric};

/// Everything a widget needs to render one metric tile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlanceSnapshot {
    pub title: String,
    pub asset: Asset,
    pub metric: Metric,
    pub summary: SeriesSummary,
    pub chart: ChartFrame,
}

/// Catalog resolver and series fetcher sharing one API.
#[derive(Debug)]
pub struct Glance {
    catalog: CatalogResolver,
    series: SeriesFetcher,
}

impl Glance {
    pub fn new(api: Arc<dyn MetricsApi>, config: &GlanceConfig) -> Self {
        Self {
            catalog: CatalogResolver::new(Arc::clone(&api), config.catalog_ttl),
            series: SeriesFetcher::new(api),
        }
    }

    /// Pipeline over the Glassnode API with a reqwest transport.
    pub fn glassnode(credentials: Arc<dyn CredentialProvider>, config: GlanceConfig) -> Self {
        let api = GlassnodeApi::with_credentials(credentials, config.clone());
        Self::new(Arc::new(api), &config)
    }

    /// Glassnode pipeline for `config`. An explicit `api_key` wins over the
    /// `GLASSNODE_API_KEY` variable, which is otherwise read per request.
    pub fn configure(config: GlanceConfig, api_key: Option<&str>) -> Result<Self, CoreError> {
        let credentials: Arc<dyn CredentialProvider> = match api_key {
            Some(raw) => Arc::new(StaticCredential::new(ApiKey::parse(raw)?)),
            None => Arc::new(EnvCredentialProvider::default()),
        };
        Ok(Self::glassnode(credentials, config))
    }

    /// Same as [`Glance::configure`] with configuration from `GLANCE_*`
    /// variables.
    pub fn from_env(api_key: Option<&str>) -> Result<Self, CoreError> {
        Self::configure(GlanceConfig::from_env()?, api_key)
    }

    pub fn catalog(&self) -> &CatalogResolver {
        &self.catalog
    }

    pub fn series(&self) -> &SeriesFetcher {
        &self.series
    }

    /// Resolves the selection, fetches its series and derives the summary
    /// and chart frame.
    pub async fn snapshot(&self, selection: &Selection) -> Result<GlanceSnapshot, ApiError> {
        let resolved = self.catalog.resolve(selection).await?;
        let series = self.series.fetch(resolved.path(), resolved.symbol()).await?;
        let summary = summarize(&series)?;
        let chart = chart_frame(&series)?;

        Ok(GlanceSnapshot {
            title: resolved.title(),
            asset: resolved.asset,
            metric: resolved.metric,
            summary,
            chart,
        })
    }

    /// [`snapshot`](Self::snapshot) for typed input, e.g. `("BTC", "42")`.
    pub async fn snapshot_for(
        &self,
        asset_symbol: &str,
        metric_id: &str,
    ) -> Result<GlanceSnapshot, CoreError> {
        let selection = Selection::new(AssetSymbol::parse(asset_symbol)?, metric_id.trim());
        Ok(self.snapshot(&selection).await?)
    }

    /// Re-fetches the catalog. Callers decide the cadence.
    pub async fn refresh(&self) -> Result<(), ApiError> {
        self.catalog.refresh().await
    }
}
