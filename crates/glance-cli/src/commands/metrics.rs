use glance_core::{AssetSymbol, Glance, Metric};
use serde::Serialize;
use tracing::debug;

use crate::cli::MetricsArgs;
use crate::error::CliError;

use super::{CommandResult, Table};

#[derive(Debug, Serialize)]
struct MetricsResponseData<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    asset: Option<&'a AssetSymbol>,
    metrics: &'a [Metric],
}

pub async fn run(args: &MetricsArgs, glance: &Glance) -> Result<CommandResult, CliError> {
    let catalog = glance.catalog();

    let symbol = match args.asset.as_deref() {
        // Typed symbols are matched case-insensitively against the catalog;
        // unknown ones fall through to an exact (empty) filter.
        Some(raw) => Some(match catalog.find_asset(raw).await? {
            Some(asset) => asset.symbol,
            None => {
                debug!(asset = raw, "asset not in catalog");
                AssetSymbol::parse(raw)?
            }
        }),
        None => None,
    };

    let mut metrics = match &symbol {
        Some(symbol) => catalog.metrics_supporting(symbol).await?,
        None => catalog.get_all_metrics().await?.to_vec(),
    };
    if args.sort_by_name {
        metrics.sort_by(|a, b| a.name.cmp(&b.name));
    }

    let mut table = Table::new(vec!["id", "name", "path", "assets"]);
    for metric in &metrics {
        table.push(vec![
            metric.id.clone(),
            metric.display_name().to_owned(),
            metric.path.to_string(),
            metric.supported_asset_symbols.len().to_string(),
        ]);
    }

    let data = serde_json::to_value(MetricsResponseData {
        asset: symbol.as_ref(),
        metrics: &metrics,
    })?;
    Ok(CommandResult { data, table })
}
