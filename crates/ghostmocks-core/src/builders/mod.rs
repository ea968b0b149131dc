//! Context builder traits and adapters for generated test specs.
pub mod playwright;

pub use playwright::{PlaywrightContextBuilder, PlaywrightSpecContext};

use serde_json::Value as JsonValue;

/// One endpoint whose fixture has been written and whose test is pending.
#[derive(Debug, Clone, Copy)]
pub struct EndpointFixture<'a> {
    /// Output name of the endpoint (file stem of fixture and test)
    pub endpoint: &'a str,
    /// Path of the fixture relative to the test file's directory
    pub fixture_path: &'a str,
    /// HTTP method of the recorded request
    pub method: &'a str,
    /// URL of the recorded request
    pub source_url: &'a str,
}

/// Trait for converting an endpoint fixture into a template context.
pub trait SpecContextBuilder {
    fn build(&self, fixture: &EndpointFixture<'_>) -> crate::Result<JsonValue>;
}
