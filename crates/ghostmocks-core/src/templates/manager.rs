//! Template loading and rendering for generated test specs

// Internal imports (std, crate)
use std::collections::HashMap;
use std::path::Path;

use crate::{error::Result, fixture::write_file, Error};

// External imports (alphabetized)
use serde_json::Value as JsonValue;
use tera::{Context, Tera};

/// Name the built-in Playwright template is registered under
pub const PLAYWRIGHT_TEMPLATE: &str = "playwright.spec.ts";

const PLAYWRIGHT_SOURCE: &str = include_str!("../../templates/playwright.spec.ts.tera");

/// Loads and renders the test spec template
#[derive(Debug)]
pub struct SpecTemplate {
    /// Tera template engine holding exactly one template
    tera: Tera,
    /// Name of the template inside `tera`
    name: String,
}

impl SpecTemplate {
    /// The built-in Playwright spec template
    pub fn playwright() -> Result<Self> {
        Self::from_source(PLAYWRIGHT_TEMPLATE, PLAYWRIGHT_SOURCE)
    }

    /// Load a custom template from disk.
    ///
    /// The template receives the same context as the built-in one.
    pub async fn from_file(path: &Path) -> Result<Self> {
        let source = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::template(format!(
                "Failed to read template {}: {}",
                path.display(),
                e
            ))
        })?;
        // Registered without the `.tera` suffix so Tera never autoescapes
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.trim_end_matches(".tera").to_string())
            .unwrap_or_else(|| "custom".to_string());
        Self::from_source(&name, &source)
    }

    fn from_source(name: &str, source: &str) -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.register_filter("comment_safe", comment_safe);
        tera.add_raw_template(name, source)
            .map_err(|e| Error::template(format!("Failed to parse template '{}': {}", name, e)))?;
        Ok(Self {
            tera,
            name: name.to_string(),
        })
    }

    /// Name of the loaded template
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the template with a JSON object context
    pub fn render(&self, context: &JsonValue) -> Result<String> {
        let tera_context = Context::from_value(context.clone())?;
        log::debug!("Rendering template '{}'", self.name);
        let rendered = self.tera.render(&self.name, &tera_context).map_err(|e| {
            log::error!("Template rendering failed for '{}': {:?}", self.name, e);
            Error::template(format!("Failed to render template '{}': {}", self.name, e))
        })?;
        Ok(rendered)
    }

    /// Render the template and write it to `output_path`, creating parent
    /// directories and overwriting any existing file.
    pub async fn generate_test(&self, context: &JsonValue, output_path: &Path) -> Result<()> {
        let rendered = self.render(context)?;
        log::debug!("Writing rendered spec to: {}", output_path.display());
        write_file(output_path, &rendered).await
    }
}

/// Make `text` safe to embed in a `/* ... */` block comment: line breaks
/// become spaces and `*/` is written as `*\/`.
pub fn escape_block_comment(text: &str) -> String {
    text.replace(['\r', '\n'], " ").replace("*/", "*\\/")
}

// Tera filter wrapping `escape_block_comment`
fn comment_safe(value: &JsonValue, _: &HashMap<String, JsonValue>) -> tera::Result<JsonValue> {
    let text = match value {
        JsonValue::String(s) => escape_block_comment(s),
        other => escape_block_comment(&other.to_string()),
    };
    Ok(JsonValue::String(text))
}
