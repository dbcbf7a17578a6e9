//! # Domain Models
//!
//! Catalog and series types shared by the resolver, the fetcher and the
//! display helpers.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Asset`] | On-chain asset (id, name, ticker symbol) |
//! | [`Metric`] | Metric definition with fetch path and supported assets |
//! | [`AssetSymbol`] | Validated ticker used as the join key between assets and metrics |
//! | [`MetricPath`] | Validated, slash-prefixed metric path |
//! | [`SeriesPoint`] | Single `(t, v)` observation |
//! | [`Series`] | Timestamp-ordered observations for one metric/asset pair |
//!
//! Values are immutable once decoded; the catalog only changes through an
//! explicit re-fetch.

mod models;
mod series;
mod symbol;

pub use models::{Asset, Metric, MetricPath};
pub use series::{Series, SeriesPoint};
pub use symbol::AssetSymbol;
