//! API credential sources.
//!
//! The core never stores secrets on disk; a [`CredentialProvider`] is asked
//! for the key right before each remote call, so rotating the key takes
//! effect on the next request.

use std::fmt::{Debug, Formatter};
use std::sync::RwLock;

use crate::ValidationError;

/// Environment variable read by [`EnvCredentialProvider::default`].
pub const API_KEY_ENV: &str = "GLASSNODE_API_KEY";

/// Opaque API key. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyApiKey);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for ApiKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Source of the API credential.
pub trait CredentialProvider: Send + Sync {
    /// Returns the current key, or `None` when no credential is configured.
    fn credential(&self) -> Option<ApiKey>;
}

/// Fixed credential, possibly absent.
#[derive(Debug, Clone, Default)]
pub struct StaticCredential(Option<ApiKey>);

impl StaticCredential {
    pub fn new(key: ApiKey) -> Self {
        Self(Some(key))
    }

    pub fn absent() -> Self {
        Self(None)
    }

    /// Blank input yields an absent credential.
    pub fn from_optional(raw: Option<&str>) -> Self {
        Self(raw.and_then(|value| ApiKey::parse(value).ok()))
    }
}

impl CredentialProvider for StaticCredential {
    fn credential(&self) -> Option<ApiKey> {
        self.0.clone()
    }
}

/// Reads the key from an environment variable on every call.
#[derive(Debug, Clone)]
pub struct EnvCredentialProvider {
    var: String,
}

impl EnvCredentialProvider {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvCredentialProvider {
    fn default() -> Self {
        Self::new(API_KEY_ENV)
    }
}

impl CredentialProvider for EnvCredentialProvider {
    fn credential(&self) -> Option<ApiKey> {
        std::env::var(&self.var)
            .ok()
            .and_then(|value| ApiKey::parse(&value).ok())
    }
}

/// In-process credential store fed by a credential entry form.
///
/// Setting a blank key is ignored so an accidental empty submission does not
/// wipe a working credential; use [`MemoryCredentialStore::clear`] for that.
#[derive(Default)]
pub struct MemoryCredentialStore {
    key: RwLock<Option<ApiKey>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `raw` and returns whether it was accepted.
    pub fn set(&self, raw: Option<&str>) -> bool {
        let Some(key) = raw.and_then(|value| ApiKey::parse(value).ok()) else {
            return false;
        };
        match self.key.write() {
            Ok(mut guard) => {
                *guard = Some(key);
                true
            }
            Err(_) => false,
        }
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.key.write() {
            *guard = None;
        }
    }
}

impl Debug for MemoryCredentialStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let configured = self.credential().is_some();
        f.debug_struct("MemoryCredentialStore")
            .field("configured", &configured)
            .finish()
    }
}

impl CredentialProvider for MemoryCredentialStore {
    fn credential(&self) -> Option<ApiKey> {
        self.key.read().ok().and_then(|guard| guard.clone())
    }
}
