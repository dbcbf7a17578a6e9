mod assets;
mod metrics;
mod series;
mod summary;

use std::time::Instant;

use glance_core::{CoreError, Glance, GlanceConfig};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::metadata::Metadata;

/// Rows for table output, aligned by [`crate::output`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<&'static str>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}

pub struct CommandResult {
    pub data: Value,
    pub table: Table,
}

/// Serialized command output.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub meta: Metadata,
    pub data: Value,
    #[serde(skip)]
    pub table: Table,
}

pub async fn run(cli: &Cli) -> Result<Envelope, CliError> {
    let glance = build_glance(cli)?;
    let started = Instant::now();

    let (command, result) = match &cli.command {
        Command::Assets => ("assets", assets::run(&glance).await?),
        Command::Metrics(args) => ("metrics", metrics::run(args, &glance).await?),
        Command::Series(args) => ("series", series::run(args, &glance).await?),
        Command::Summary(args) => ("summary", summary::run(args, &glance).await?),
    };

    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    debug!(command, latency_ms, "command finished");

    Ok(Envelope {
        meta: Metadata::new(command, latency_ms)?,
        data: result.data,
        table: result.table,
    })
}

fn build_glance(cli: &Cli) -> Result<Glance, CoreError> {
    let mut config = GlanceConfig::from_env()?;
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout_ms(timeout_ms);
    }
    Glance::configure(config, cli.api_key.as_deref())
}
