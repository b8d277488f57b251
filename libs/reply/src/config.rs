//! Replier defaults and configuration loading.
//!
//! Configuration is layered with figment:
//! 1. built-in defaults
//! 2. an optional YAML file
//! 3. environment variables prefixed with `REPLY_` (e.g. `REPLY_DEFAULT_STATUS=204`)

use std::hash::Hash;
use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use http::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ReplyError;
use crate::manifest::{Manifest, ManifestEntry};

/// Status sent when the request sets none.
pub const DEFAULT_STATUS: StatusCode = StatusCode::OK;

/// Status sent for multiple errors when none of them carries a usable status.
pub const DEFAULT_ERROR_STATUS: StatusCode = StatusCode::BAD_REQUEST;

/// Content type set on every response that does not already have one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Data placeholder of the default (blank) response.
pub const DEFAULT_BLANK_BODY: &str = "{}";

/// Prefix of environment variables read by [`ReplierConfig::load`].
pub const ENV_PREFIX: &str = "REPLY_";

/// Defaults applied by a [`Replier`](crate::Replier).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplierConfig {
    #[serde(with = "crate::status_serde")]
    pub default_status: StatusCode,
    #[serde(with = "crate::status_serde")]
    pub default_error_status: StatusCode,
    pub content_type: String,
    pub blank_body: String,
    /// Rendered for every error identity missing from the manifest.
    pub internal_error: ManifestEntry,
}

impl Default for ReplierConfig {
    fn default() -> Self {
        Self {
            default_status: DEFAULT_STATUS,
            default_error_status: DEFAULT_ERROR_STATUS,
            content_type: DEFAULT_CONTENT_TYPE.to_owned(),
            blank_body: DEFAULT_BLANK_BODY.to_owned(),
            internal_error: ManifestEntry::internal_server_error(),
        }
    }
}

impl ReplierConfig {
    /// Extract the configuration from an already assembled figment.
    ///
    /// # Errors
    /// Returns `ReplyError::Config` if the figment cannot be extracted.
    pub fn from_figment(figment: &Figment) -> Result<Self, ReplyError> {
        Ok(figment.extract()?)
    }

    /// Load defaults, then the YAML file at `path` (if any), then `REPLY_*`
    /// environment variables.
    ///
    /// # Errors
    /// Returns `ReplyError::Config` if the file or the environment holds
    /// invalid values.
    pub fn load(path: Option<&Path>) -> Result<Self, ReplyError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            ensure_file(path)?;
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX));
        Self::from_figment(&figment)
    }
}

/// Load a manifest from a YAML file mapping identities to entries.
///
/// ```yaml
/// not-found:
///   title: Resource Not Found
///   status: 404
/// ```
///
/// # Errors
/// Returns `ReplyError::Config` if the file is missing or malformed.
pub fn load_manifest<K>(path: &Path) -> Result<Manifest<K>, ReplyError>
where
    K: DeserializeOwned + Eq + Hash,
{
    ensure_file(path)?;
    Ok(Figment::from(Yaml::file(path)).extract()?)
}

/// Figment treats a missing file as an empty source; an explicitly named file must exist.
fn ensure_file(path: &Path) -> Result<(), ReplyError> {
    if path.is_file() {
        return Ok(());
    }
    Err(figment::Error::from(format!("config file does not exist: {}", path.display())).into())
}
