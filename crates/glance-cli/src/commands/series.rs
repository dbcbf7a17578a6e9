use glance_core::{format_number, Glance, Series};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::cli::SeriesArgs;
use crate::error::CliError;

use super::{CommandResult, Table};

#[derive(Debug, Serialize)]
struct SeriesResponseData<'a> {
    path: &'a str,
    asset: &'a str,
    points: &'a Series,
}

pub async fn run(args: &SeriesArgs, glance: &Glance) -> Result<CommandResult, CliError> {
    let series = glance.series().fetch_series(&args.path, &args.asset).await?;

    let mut table = Table::new(vec!["date", "value"]);
    for point in series.iter() {
        let date = OffsetDateTime::from_unix_timestamp(point.t)
            .ok()
            .and_then(|timestamp| timestamp.format(&Rfc3339).ok())
            .unwrap_or_else(|| point.t.to_string());
        table.push(vec![date, format_number(point.v)]);
    }

    let data = serde_json::to_value(SeriesResponseData {
        path: &args.path,
        asset: &args.asset,
        points: &series,
    })?;
    Ok(CommandResult { data, table })
}
