//! Application errors of the demo API and the manifest describing them

use http::StatusCode;
use reply::{Manifest, ManifestEntry};
use serde::Deserialize;

/// Error identities raised by the demo handlers.
///
/// Manifest files refer to them in kebab case, e.g. `example-404`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DemoError {
    Example404,
    ExampleDobValidation,
    ExampleNameValidation,
    /// Never registered in the base manifest
    Unexpected,
}

/// Built-in manifest, one partial per error.
#[must_use]
pub fn base_manifest() -> Vec<Manifest<DemoError>> {
    vec![
        Manifest::new().with(
            DemoError::Example404,
            ManifestEntry::new(StatusCode::NOT_FOUND, "resource not found"),
        ),
        Manifest::new().with(
            DemoError::ExampleNameValidation,
            ManifestEntry::new(StatusCode::BAD_REQUEST, "Validation Error")
                .with_detail("The name provided does not meet validation requirements")
                .with_about("www.example.com/reply/validation/1011")
                .with_code("1011"),
        ),
        Manifest::new().with(
            DemoError::ExampleDobValidation,
            ManifestEntry::new(StatusCode::BAD_REQUEST, "Validation Error")
                .with_detail("Check your DoB, and try again.")
                .with_code("100YT"),
        ),
    ]
}
