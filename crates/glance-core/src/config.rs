//! Runtime configuration.
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GLANCE_API_BASE_URL` | `https://api.glassnode.com` | Series data host |
//! | `GLANCE_CMS_BASE_URL` | `https://cms.glassnode.com` | Asset/metric catalog host |
//! | `GLANCE_TIMEOUT_MS` | `10000` | Per-request timeout |
//! | `GLANCE_CATALOG_TTL_SECS` | unset | Catalog lifetime; unset keeps it until refreshed |
//! | `GLANCE_AUTH_MODE` | `header` | `header` sends `X-Api-Key`, `query` sends `api_key=` |

use std::time::Duration;

use crate::ValidationError;

pub const DEFAULT_API_BASE_URL: &str = "https://api.glassnode.com";
pub const DEFAULT_CMS_BASE_URL: &str = "https://cms.glassnode.com";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// How the API key is attached to requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Header,
    Query,
}

impl AuthMode {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "header" => Ok(Self::Header),
            "query" => Ok(Self::Query),
            _ => Err(ValidationError::InvalidConfig {
                name: "GLANCE_AUTH_MODE",
                value: raw.to_owned(),
            }),
        }
    }
}

/// Endpoint hosts, timeouts, auth placement and catalog lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlanceConfig {
    pub api_base_url: String,
    pub cms_base_url: String,
    pub timeout_ms: u64,
    pub catalog_ttl: Option<Duration>,
    pub auth_mode: AuthMode,
}

impl Default for GlanceConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::from(DEFAULT_API_BASE_URL),
            cms_base_url: String::from(DEFAULT_CMS_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            catalog_ttl: None,
            auth_mode: AuthMode::Header,
        }
    }
}

impl GlanceConfig {
    /// Defaults overridden by `GLANCE_*` environment variables.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`GlanceConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = non_blank(lookup("GLANCE_API_BASE_URL")) {
            config.api_base_url = validate_base_url("GLANCE_API_BASE_URL", &url)?;
        }
        if let Some(url) = non_blank(lookup("GLANCE_CMS_BASE_URL")) {
            config.cms_base_url = validate_base_url("GLANCE_CMS_BASE_URL", &url)?;
        }
        if let Some(raw) = non_blank(lookup("GLANCE_TIMEOUT_MS")) {
            config.timeout_ms = parse_positive("GLANCE_TIMEOUT_MS", &raw)?;
        }
        if let Some(raw) = non_blank(lookup("GLANCE_CATALOG_TTL_SECS")) {
            let secs = parse_positive("GLANCE_CATALOG_TTL_SECS", &raw)?;
            config.catalog_ttl = Some(Duration::from_secs(secs));
        }
        if let Some(raw) = non_blank(lookup("GLANCE_AUTH_MODE")) {
            config.auth_mode = AuthMode::parse(&raw)?;
        }

        Ok(config)
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_catalog_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.catalog_ttl = ttl;
        self
    }

    pub fn with_auth_mode(mut self, auth_mode: AuthMode) -> Self {
        self.auth_mode = auth_mode;
        self
    }

    pub fn with_base_urls(mut self, api: impl AsRef<str>, cms: impl AsRef<str>) -> Self {
        self.api_base_url = api.as_ref().trim_end_matches('/').to_owned();
        self.cms_base_url = cms.as_ref().trim_end_matches('/').to_owned();
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn validate_base_url(name: &'static str, raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
        return Err(ValidationError::InvalidConfig {
            name,
            value: raw.to_owned(),
        });
    }
    Ok(trimmed.to_owned())
}

fn parse_positive(name: &'static str, raw: &str) -> Result<u64, ValidationError> {
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ValidationError::InvalidConfig {
            name,
            value: raw.to_owned(),
        }),
    }
}
