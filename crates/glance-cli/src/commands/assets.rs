use glance_core::Glance;

use crate::error::CliError;

use super::{CommandResult, Table};

pub async fn run(glance: &Glance) -> Result<CommandResult, CliError> {
    let assets = glance.catalog().get_all_assets().await?;

    let mut table = Table::new(vec!["id", "symbol", "name"]);
    for asset in assets.iter() {
        table.push(vec![
            asset.id.clone(),
            asset.symbol.to_string(),
            asset.name.clone(),
        ]);
    }

    Ok(CommandResult {
        data: serde_json::to_value(&*assets)?,
        table,
    })
}
