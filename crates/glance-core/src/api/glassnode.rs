use std::collections::HashSet;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{ApiError, ApiFuture, MetricsApi};
use crate::config::AuthMode;
use crate::credentials::CredentialProvider;
use crate::http_client::{HttpAuth, HttpClient, HttpRequest, ReqwestHttpClient};
use crate::{Asset, AssetSymbol, GlanceConfig, Metric, MetricPath, Series, SeriesPoint};

const API_KEY_HEADER: &str = "X-Api-Key";
const CATALOG_PAGE_SIZE: &str = "1000";
const SERIES_RESOLUTION: &str = "24h";

/// Glassnode adapter: catalog from the CMS host, series from the API host.
#[derive(Clone)]
pub struct GlassnodeApi {
    http_client: Arc<dyn HttpClient>,
    credentials: Arc<dyn CredentialProvider>,
    config: GlanceConfig,
}

impl GlassnodeApi {
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        credentials: Arc<dyn CredentialProvider>,
        config: GlanceConfig,
    ) -> Self {
        Self {
            http_client,
            credentials,
            config,
        }
    }

    /// Adapter over a default reqwest transport.
    pub fn with_credentials(credentials: Arc<dyn CredentialProvider>, config: GlanceConfig) -> Self {
        Self::new(Arc::new(ReqwestHttpClient::new()), credentials, config)
    }

    pub fn config(&self) -> &GlanceConfig {
        &self.config
    }

    fn assets_request(&self) -> HttpRequest {
        HttpRequest::get(format!("{}/api/metric-assets", self.config.cms_base_url))
            .with_query("pagination[pageSize]", CATALOG_PAGE_SIZE)
    }

    fn metrics_request(&self) -> HttpRequest {
        HttpRequest::get(format!("{}/api/metrics", self.config.cms_base_url))
            .with_query("populate[0]", "metric_assets")
            .with_query("pagination[pageSize]", CATALOG_PAGE_SIZE)
    }

    fn series_request(&self, path: &MetricPath, symbol: &AssetSymbol) -> HttpRequest {
        HttpRequest::get(format!("{}/v1/metrics{}", self.config.api_base_url, path))
            .with_query("a", symbol.as_str())
            .with_query("i", SERIES_RESOLUTION)
    }

    /// Attaches the credential and executes one request, returning the body
    /// of a 2xx response.
    async fn execute_authenticated(&self, request: HttpRequest) -> Result<String, ApiError> {
        let key = self
            .credentials
            .credential()
            .ok_or_else(ApiError::missing_credential)?;

        let auth = match self.config.auth_mode {
            AuthMode::Header => HttpAuth::Header {
                name: String::from(API_KEY_HEADER),
                value: key.expose().to_owned(),
            },
            AuthMode::Query => HttpAuth::ApiKeyQuery(key.expose().to_owned()),
        };
        let request = request
            .with_auth(&auth)
            .with_timeout_ms(self.config.timeout_ms);
        let url = request.redacted_url();
        debug!(%url, "issuing request");

        let response = self.http_client.execute(request).await.map_err(|error| {
            warn!(%url, error = error.message(), "transport failure");
            if error.timed_out() {
                ApiError::network(format!("request to {url} timed out: {}", error.message()))
            } else {
                ApiError::network(format!("request to {url} failed: {}", error.message()))
            }
        })?;

        debug!(%url, status = response.status, "response received");
        match response.status {
            401 | 403 => Err(ApiError::unauthenticated(format!(
                "api key rejected with status {}",
                response.status
            ))),
            _ if !response.is_success() => Err(ApiError::http_status(
                response.status,
                format!("{url} returned status {}", response.status),
            )),
            _ => Ok(response.body),
        }
    }
}

impl MetricsApi for GlassnodeApi {
    fn fetch_assets(&self) -> ApiFuture<'_, Vec<Asset>> {
        Box::pin(async move {
            let body = self.execute_authenticated(self.assets_request()).await?;
            let response: CollectionResponse<AssetRecord> = decode(&body, "asset list")?;
            Ok(normalize_assets(response.data))
        })
    }

    fn fetch_metrics(&self) -> ApiFuture<'_, Vec<Metric>> {
        Box::pin(async move {
            let body = self.execute_authenticated(self.metrics_request()).await?;
            let response: CollectionResponse<MetricRecord> = decode(&body, "metric list")?;
            Ok(normalize_metrics(response.data))
        })
    }

    fn fetch_series<'a>(
        &'a self,
        path: &'a MetricPath,
        symbol: &'a AssetSymbol,
    ) -> ApiFuture<'a, Series> {
        Box::pin(async move {
            let body = self
                .execute_authenticated(self.series_request(path, symbol))
                .await?;
            let points: Vec<RawPoint> = decode(&body, "series")?;
            let total = points.len();
            let series: Series = points
                .into_iter()
                .filter_map(|point| point.v.map(|v| SeriesPoint::new(point.t, v)))
                .collect();

            if series.len() < total {
                debug!(
                    path = %path,
                    symbol = %symbol,
                    skipped = total - series.len(),
                    "skipped points without a value"
                );
            }
            Ok(series)
        })
    }
}

fn decode<T: DeserializeOwned>(body: &str, what: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|error| {
        warn!(what, %error, "response did not match expected schema");
        ApiError::decode(format!("failed to decode {what}: {error}"))
    })
}

fn normalize_assets(records: Vec<AssetRecord>) -> Vec<Asset> {
    let mut seen = HashSet::new();
    let mut assets = Vec::with_capacity(records.len());

    for record in records {
        let id = record.id.into_string();
        if !seen.insert(id.clone()) {
            warn!(%id, "dropping duplicate asset id");
            continue;
        }

        let asset = AssetSymbol::parse(&record.attributes.symbol)
            .and_then(|symbol| Asset::new(id.clone(), record.attributes.name, symbol));
        match asset {
            Ok(asset) => assets.push(asset),
            Err(error) => warn!(%id, %error, "skipping invalid asset record"),
        }
    }

    assets
}

fn normalize_metrics(records: Vec<MetricRecord>) -> Vec<Metric> {
    let mut seen = HashSet::new();
    let mut metrics = Vec::with_capacity(records.len());

    for record in records {
        let id = record.id.into_string();
        if !seen.insert(id.clone()) {
            warn!(%id, "dropping duplicate metric id");
            continue;
        }

        let attributes = record.attributes;
        let symbols = attributes
            .metric_assets
            .and_then(|relation| relation.data)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|asset| AssetSymbol::parse(&asset.attributes.symbol).ok());

        let metric = MetricPath::parse(&attributes.path).and_then(|path| {
            Metric::new(
                id.clone(),
                attributes.name,
                attributes.short_name,
                path,
                symbols,
            )
        });
        match metric {
            Ok(metric) => metrics.push(metric),
            Err(error) => warn!(%id, %error, "skipping invalid metric record"),
        }
    }

    metrics
}

#[derive(Debug, Deserialize)]
struct CollectionResponse<T> {
    data: Vec<T>,
}

/// Catalog ids arrive as numbers from the CMS but are opaque to callers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RemoteId {
    Number(i64),
    Text(String),
}

impl RemoteId {
    fn into_string(self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::Text(value) => value,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AssetRecord {
    id: RemoteId,
    attributes: AssetAttributes,
}

#[derive(Debug, Deserialize)]
struct AssetAttributes {
    name: String,
    symbol: String,
}

#[derive(Debug, Deserialize)]
struct MetricRecord {
    id: RemoteId,
    attributes: MetricAttributes,
}

#[derive(Debug, Deserialize)]
struct MetricAttributes {
    name: String,
    #[serde(rename = "shortName", alias = "short_name", default)]
    short_name: Option<String>,
    path: String,
    #[serde(rename = "metric_assets", alias = "metricAssets", default)]
    metric_assets: Option<Relation>,
}

#[derive(Debug, Deserialize)]
struct Relation {
    #[serde(default)]
    data: Option<Vec<RelatedAsset>>,
}

#[derive(Debug, Deserialize)]
struct RelatedAsset {
    attributes: RelatedAssetAttributes,
}

#[derive(Debug, Deserialize)]
struct RelatedAssetAttributes {
    symbol: String,
}

#[derive(Debug, Deserialize)]
struct RawPoint {
    t: i64,
    #[serde(default)]
    v: Option<f64>,
}
