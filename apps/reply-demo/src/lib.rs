//! Example HTTP API answering every route through `reply`
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod errors;
pub mod routes;
pub mod shapes;

pub use errors::{DemoError, base_manifest};
pub use routes::{AppState, router};
