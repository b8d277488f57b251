//! Error manifest: maps application error identities to consumer-facing entries

use std::collections::HashMap;
use std::hash::Hash;

use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Title used by [`ManifestEntry::internal_server_error`].
pub const INTERNAL_SERVER_ERROR_TITLE: &str = "Internal Server Error";

/// Describes how one application error is rendered to the consumer.
///
/// Everything here is consumer-visible: keep titles short and be mindful
/// of how much the detail divulges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct ManifestEntry {
    /// Short, human-readable summary of the problem.
    pub title: String,
    /// Longer explanation of the problem.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub detail: String,
    /// HTTP status that best relates to the error; `None` falls back to the
    /// replier's default error status.
    #[serde(default, with = "crate::status_serde::optional")]
    pub status: Option<StatusCode>,
    /// Link giving further insight into the error.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub about: String,
    /// Internal code used to reference the error.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub code: String,
    /// Additional meta-information about the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl ManifestEntry {
    /// Entry with a status and title; the remaining fields start empty.
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            status: Some(status),
            ..Self::default()
        }
    }

    /// The entry used for every error identity missing from the manifest.
    pub fn internal_server_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            INTERNAL_SERVER_ERROR_TITLE,
        )
    }

    /// Set the longer explanation shown next to the title.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    /// Set the link to documentation about the error.
    pub fn with_about(mut self, about: impl Into<String>) -> Self {
        self.about = about.into();
        self
    }

    /// Set the internal reference code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Attach extra meta-information rendered with the error.
    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }
}

/// Mapping from error identity to [`ManifestEntry`].
///
/// Identities are compared with `Eq`, so the usual key is an application
/// error enum (or any other sentinel value), never a formatted message.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent, bound(deserialize = "K: Deserialize<'de> + Eq + Hash"))]
pub struct Manifest<K> {
    entries: HashMap<K, ManifestEntry>,
}

impl<K> Default for Manifest<K> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> Manifest<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the entry for `key`.
    #[must_use]
    pub fn with(mut self, key: K, entry: ManifestEntry) -> Self {
        self.entries.insert(key, entry);
        self
    }

    /// Merge partial manifests in order into a single manifest.
    ///
    /// An identity present in several partials takes the entry of the last
    /// one listed.
    #[must_use]
    pub fn merge<I>(partials: I) -> Self
    where
        I: IntoIterator<Item = Manifest<K>>,
    {
        let mut merged = Self::new();
        for partial in partials {
            merged.extend(partial.entries);
        }
        merged
    }

    #[must_use]
    pub fn lookup(&self, key: &K) -> Option<&ManifestEntry> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &ManifestEntry)> {
        self.entries.iter()
    }
}

impl<K: Eq + Hash> FromIterator<(K, ManifestEntry)> for Manifest<K> {
    fn from_iter<I: IntoIterator<Item = (K, ManifestEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<K: Eq + Hash> Extend<(K, ManifestEntry)> for Manifest<K> {
    fn extend<I: IntoIterator<Item = (K, ManifestEntry)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}
