use glance_core::{format_axis_date, format_delta, format_number, Glance};
use serde::Serialize;
use serde_json::Value;

use crate::cli::SummaryArgs;
use crate::error::CliError;

use super::{CommandResult, Table};

#[derive(Debug, Serialize)]
struct SummaryResponseData {
    snapshot: Value,
    delta_label: String,
    axis_labels: Vec<String>,
}

pub async fn run(args: &SummaryArgs, glance: &Glance) -> Result<CommandResult, CliError> {
    let snapshot = glance.snapshot_for(&args.asset, &args.metric_id).await?;

    let summary = &snapshot.summary;
    let delta_label = format_delta(summary);
    let axis_labels: Vec<String> = snapshot
        .chart
        .x_ticks
        .iter()
        .map(|&t| format_axis_date(t).unwrap_or_else(|| t.to_string()))
        .collect();

    let mut table = Table::new(vec!["field", "value"]);
    let rows = [
        ("title", snapshot.title.clone()),
        ("current", format_number(summary.current)),
        ("change", delta_label.clone()),
        ("first", format_number(summary.first)),
        ("min", format_number(summary.min)),
        ("max", format_number(summary.max)),
        ("points", summary.point_count.to_string()),
        ("axis", axis_labels.join(" | ")),
    ];
    for (field, value) in rows {
        table.push(vec![field.to_owned(), value]);
    }

    let data = serde_json::to_value(SummaryResponseData {
        snapshot: serde_json::to_value(&snapshot)?,
        delta_label,
        axis_labels,
    })?;
    Ok(CommandResult { data, table })
}
