//! Standardized JSON response envelopes for HTTP APIs
//!
//! A [`Replier`] turns a [`ResponseRequest`] into one of five response kinds
//! (multiple errors, error, tokens, data or blank) and writes it through a
//! [`ResponseSink`]. Application errors are rendered from an error
//! [`Manifest`]; identities the manifest does not know become the internal
//! server error entry.
//!
//! The wire shape is pluggable through the [`Envelope`] and [`ErrorEntry`]
//! traits. [`DefaultEnvelope`] produces:
//!
//! ```json
//! {"errors":[{"title":"Resource Not Found","status":"404"}]}
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod aides;
pub mod config;
pub mod error;
pub mod manifest;
pub mod replier;
pub mod sink;
mod status_serde;
pub mod transfer;

#[cfg(feature = "axum")]
pub mod axum_support;

pub use aides::{ResponseAttribute, with_headers, with_meta};
pub use config::{ReplierConfig, load_manifest};
pub use error::ReplyError;
pub use manifest::{Manifest, ManifestEntry};
pub use replier::{Replier, ReplierBuilder, ResponseRequest, UnresolvedHook};
pub use sink::ResponseSink;
pub use transfer::{DefaultEnvelope, DefaultErrorEntry, Envelope, ErrorEntry, Headers, Meta};
