use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{AssetSymbol, ValidationError};

/// Asset entry of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub symbol: AssetSymbol,
}

impl Asset {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        symbol: AssetSymbol,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: validate_id(id.into())?,
            name: name.into(),
            symbol,
        })
    }

    /// Label shown in pickers, e.g. `BTC - Bitcoin`.
    pub fn display_label(&self) -> String {
        format!("{} - {}", self.symbol, self.name)
    }
}

/// Metric definition of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub id: String,
    pub name: String,
    pub short_name: Option<String>,
    pub path: MetricPath,
    pub supported_asset_symbols: BTreeSet<AssetSymbol>,
}

impl Metric {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        short_name: Option<String>,
        path: MetricPath,
        supported_asset_symbols: impl IntoIterator<Item = AssetSymbol>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: validate_id(id.into())?,
            name: name.into(),
            short_name: short_name.filter(|value| !value.trim().is_empty()),
            path,
            supported_asset_symbols: supported_asset_symbols.into_iter().collect(),
        })
    }

    pub fn supports(&self, symbol: &AssetSymbol) -> bool {
        self.supported_asset_symbols.contains(symbol)
    }

    /// Short name when present, full name otherwise.
    pub fn display_name(&self) -> &str {
        self.short_name.as_deref().unwrap_or(&self.name)
    }
}

/// Path of a metric endpoint, normalized with a single leading `/`.
///
/// Example: `/addresses/profit_count`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MetricPath(String);

impl MetricPath {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim().trim_start_matches('/');
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyMetricPath);
        }

        for (index, ch) in trimmed.chars().enumerate() {
            let valid = ch.is_ascii_alphanumeric() || matches!(ch, '/' | '_' | '-' | '.');
            if !valid {
                return Err(ValidationError::MetricPathInvalidChar { ch, index });
            }
        }

        // Paths are appended to the metrics endpoint and must stay under it.
        if let Some(segment) = trimmed
            .split('/')
            .find(|segment| matches!(*segment, "" | "." | ".."))
        {
            return Err(ValidationError::MetricPathInvalidSegment {
                segment: segment.to_owned(),
            });
        }

        Ok(Self(format!("/{trimmed}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MetricPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for MetricPath {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MetricPath> for String {
    fn from(value: MetricPath) -> Self {
        value.0
    }
}

fn validate_id(id: String) -> Result<String, ValidationError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyId);
    }
    Ok(trimmed.to_owned())
}
