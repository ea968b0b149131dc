//! Playwright-specific context builder for generated specs.

use super::{EndpointFixture, SpecContextBuilder};
use crate::config::Config;
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Values substituted into the Playwright spec template
#[derive(Debug, Clone, Serialize)]
pub struct PlaywrightSpecContext {
    /// Endpoint name used in labels
    pub endpoint: String,
    /// Glob passed to `page.route` (e.g. "**/users")
    pub route_pattern: String,
    /// Fixture path relative to the spec file (e.g. "../mocks/users.json")
    pub fixture_path: String,
    /// HTTP method of the recorded request
    pub method: String,
    /// URL the request was recorded against
    pub source_url: String,
    /// URL the test navigates to
    pub app_url: String,
    /// Selector matching rendered list items
    pub list_selector: String,
    /// Timeout for the list to appear
    pub wait_timeout_ms: u64,
}

#[derive(Debug, Clone)]
pub struct PlaywrightContextBuilder {
    app_url: String,
    list_selector: String,
    wait_timeout_ms: u64,
}

impl PlaywrightContextBuilder {
    pub fn new(
        app_url: impl Into<String>,
        list_selector: impl Into<String>,
        wait_timeout_ms: u64,
    ) -> Self {
        Self {
            app_url: app_url.into(),
            list_selector: list_selector.into(),
            wait_timeout_ms,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.app_url.clone(),
            config.list_selector.clone(),
            config.wait_timeout_ms,
        )
    }
}

impl SpecContextBuilder for PlaywrightContextBuilder {
    fn build(&self, fixture: &EndpointFixture<'_>) -> crate::Result<JsonValue> {
        let context = PlaywrightSpecContext {
            endpoint: fixture.endpoint.to_string(),
            route_pattern: format!("**/{}", fixture.endpoint),
            fixture_path: fixture.fixture_path.to_string(),
            method: fixture.method.to_string(),
            source_url: fixture.source_url.to_string(),
            app_url: self.app_url.clone(),
            list_selector: self.list_selector.clone(),
            wait_timeout_ms: self.wait_timeout_ms,
        };

        // Convert to JSON
        Ok(serde_json::to_value(&context)?)
    }
}
