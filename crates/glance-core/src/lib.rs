//! # Glance Core
//!
//! Catalog resolution and series fetching for on-chain metric widgets.
//!
//! ## Overview
//!
//! A display layer (widget, dashboard, CLI) needs three things from this
//! crate:
//!
//! - the **catalog** of supported assets and metrics, fetched once and
//!   memoized, to populate a picker
//! - a **resolver** turning the picked `(asset, metric)` pair into a
//!   fetchable metric path
//! - the metric **series** for that pair, reduced to headline numbers
//!   (current, first, min, max, delta) and chart geometry
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | `MetricsApi` trait, error taxonomy, Glassnode adapter |
//! | [`cache`] | Single-flight memo cell for catalog lists |
//! | [`catalog`] | Catalog Resolver |
//! | [`chart`] | Rebased chart frame for line/area charts |
//! | [`config`] | Hosts, timeouts, auth mode and catalog lifetime |
//! | [`credentials`] | API key providers |
//! | [`domain`] | Asset, Metric, Series types |
//! | [`error`] | Validation and typed-input errors |
//! | [`format`] | Number/date/delta formatting |
//! | [`http_client`] | HTTP transport seam |
//! | [`pipeline`] | `Glance` facade tying it all together |
//! | [`series`] | Series Fetcher and summary statistics |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use glance_core::{AssetSymbol, Glance};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Key from GLASSNODE_API_KEY, hosts and timeouts from GLANCE_*.
//!     let glance = Glance::from_env(None)?;
//!
//!     let btc = AssetSymbol::parse("BTC")?;
//!     for metric in glance.catalog().metrics_supporting(&btc).await? {
//!         println!("{} {}", metric.id, metric.name);
//!     }
//!
//!     let snapshot = glance.snapshot_for("BTC", "42").await?;
//!     println!("{} = {}", snapshot.title, snapshot.summary.current);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │ Display / Picker UI  │
//! └─────────┬────────────┘
//!           │
//!           ▼
//! ┌──────────────────────┐     ┌──────────────────────┐
//! │ Glance (pipeline)    │────▶│ CatalogResolver      │──▶ CatalogCell (memo)
//! └─────────┬────────────┘     └──────────┬───────────┘
//!           │                             │
//!           ▼                             ▼
//! ┌──────────────────────┐     ┌──────────────────────┐
//! │ SeriesFetcher        │────▶│ MetricsApi           │──▶ CredentialProvider
//! └──────────────────────┘     │ (GlassnodeApi)       │
//!                              └──────────┬───────────┘
//!                                         ▼
//!                              ┌──────────────────────┐
//!                              │ HttpClient (reqwest) │
//!                              └──────────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Remote operations return [`ApiError`]; entry points taking raw input
//! (`Glance::configure`, `Glance::snapshot_for`) return [`CoreError`], which
//! separates invalid input from remote failures. Nothing here is fatal to the
//! host process.
//!
//! ```rust
//! use glance_core::{ApiError, ApiErrorKind};
//!
//! fn banner(error: &ApiError) -> &'static str {
//!     match error.kind() {
//!         ApiErrorKind::Unauthenticated => "Add your API key",
//!         ApiErrorKind::DecodeFailure | ApiErrorKind::InsufficientData => "No data",
//!         _ => "Try again later",
//!     }
//! }
//!
//! assert_eq!(banner(&ApiError::missing_credential()), "Add your API key");
//! ```
//!
//! ## Security
//!
//! - The API key is read from a [`CredentialProvider`] per request and is
//!   never logged; logged URLs are redacted.
//! - All HTTP requests use TLS via rustls.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod chart;
pub mod config;
pub mod credentials;
pub mod domain;
pub mod error;
pub mod format;
pub mod http_client;
pub mod pipeline;
pub mod series;

// API contract and errors
pub use api::{ApiError, ApiErrorKind, ApiFuture, GlassnodeApi, MetricsApi};

// Catalog
pub use cache::CatalogCell;
pub use catalog::{CatalogResolver, ResolvedSelection, Selection};

// Series and display helpers
pub use chart::{chart_frame, ChartFrame};
pub use format::{format_axis_date, format_delta, format_number};
pub use series::{percent_change, summarize, SeriesFetcher, SeriesSummary};

// Configuration and credentials
pub use config::{AuthMode, GlanceConfig};
pub use credentials::{
    ApiKey, CredentialProvider, EnvCredentialProvider, MemoryCredentialStore, StaticCredential,
    API_KEY_ENV,
};

// Domain models
pub use domain::{Asset, AssetSymbol, Metric, MetricPath, Series, SeriesPoint};

// Error types
pub use error::{CoreError, ValidationError};

// HTTP client types
pub use http_client::{HttpAuth, HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

// Facade
pub use pipeline::{Glance, GlanceSnapshot};
