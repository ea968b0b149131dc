//! HAR loading and API response extraction.
//!
//! This module reads HAR (HTTP Archive) captures and turns their recorded
//! traffic into a list of successful JSON API responses, each tagged with a
//! logical endpoint name derived from the request URL. Those responses are
//! what the rest of the pipeline turns into fixtures and tests.
//!
//! Real captures are noisy: entries may lack fields, carry HTML or images, or
//! hold truncated bodies. Only a missing or unparsable HAR file is an error;
//! anything wrong with an individual entry just drops that entry.
//!
//! # Examples
//!
//! ```no_run
//! use ghostmocks_core::har::HarDocument;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> ghostmocks_core::Result<()> {
//! let har = HarDocument::from_file("session.har").await?;
//! for response in har.extract_responses() {
//!     println!("{} {} -> {}", response.method, response.url, response.endpoint);
//! }
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::path::Path;

use crate::utils::{sanitize_endpoint, FALLBACK_ENDPOINT};
use crate::Error;

// External imports (alphabetized)
use serde_json::Value as JsonValue;
use tokio::fs;
use url::Url;

/// Parsed HAR capture.
///
/// The document is kept as raw JSON so that malformed entries can be skipped
/// individually instead of failing the whole load.
#[derive(Debug)]
pub struct HarDocument {
    json: JsonValue,
}

/// The fields of one recorded request/response pair that extraction reads.
///
/// Missing or mistyped fields are defaulted (empty string, zero status).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HarEntry {
    pub url: String,
    pub method: String,
    pub status: u16,
    pub mime_type: String,
    pub text: Option<String>,
}

/// A successful JSON API response extracted from a HAR entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedResponse {
    /// Path-safe name derived from the last URL path segment
    pub endpoint: String,
    pub url: String,
    pub method: String,
    pub status: u16,
    /// Parsed response body
    pub data: JsonValue,
}

impl HarDocument {
    /// Load a HAR file from disk.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        if !fs::try_exists(path).await? {
            return Err(Error::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path).await?;
        Self::parse(&content).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse HAR content that is already in memory.
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            json: serde_json::from_str(content)?,
        })
    }

    /// Wrap an already parsed JSON document.
    pub fn from_json(json: JsonValue) -> Self {
        Self { json }
    }

    /// All entries under `log.entries`, in capture order.
    pub fn entries(&self) -> Vec<HarEntry> {
        self.json
            .pointer("/log/entries")
            .and_then(JsonValue::as_array)
            .map(|entries| entries.iter().map(HarEntry::from_json).collect())
            .unwrap_or_default()
    }

    /// Extract successful JSON API responses in capture order.
    pub fn extract_responses(&self) -> Vec<ExtractedResponse> {
        self.entries()
            .into_iter()
            .filter_map(|entry| entry.into_response())
            .collect()
    }
}

impl HarEntry {
    /// Read the relevant fields out of a raw HAR entry.
    pub fn from_json(entry: &JsonValue) -> Self {
        let str_at = |pointer: &str| {
            entry
                .pointer(pointer)
                .and_then(JsonValue::as_str)
                .unwrap_or_default()
                .to_string()
        };

        Self {
            url: str_at("/request/url"),
            method: str_at("/request/method"),
            status: entry
                .pointer("/response/status")
                .and_then(status_code)
                .unwrap_or(0),
            mime_type: str_at("/response/content/mimeType"),
            text: entry
                .pointer("/response/content/text")
                .and_then(JsonValue::as_str)
                .map(String::from),
        }
    }

    /// Whether the response status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the response MIME type looks like JSON.
    pub fn is_json(&self) -> bool {
        self.mime_type.to_ascii_lowercase().contains("json")
    }

    fn into_response(self) -> Option<ExtractedResponse> {
        if !self.is_success() || !self.is_json() {
            return None;
        }
        let text = self.text.as_deref().filter(|t| !t.is_empty())?;

        let data: JsonValue = match serde_json::from_str(text) {
            Ok(data) => data,
            Err(e) => {
                log::debug!("Skipping {} {}: malformed JSON body: {}", self.method, self.url, e);
                return None;
            }
        };

        let url = match Url::parse(&self.url) {
            Ok(url) => url,
            Err(e) => {
                log::debug!("Skipping entry with unparsable URL '{}': {}", self.url, e);
                return None;
            }
        };
        let endpoint = endpoint_name(&url);

        Some(ExtractedResponse {
            endpoint,
            url: self.url,
            method: self.method,
            status: self.status,
            data,
        })
    }
}

/// Derive the endpoint name from the last non-empty path segment of `url`.
pub fn endpoint_name(url: &Url) -> String {
    let segment = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .unwrap_or(FALLBACK_ENDPOINT);
    sanitize_endpoint(segment)
}

// Some exporters write the status as a float (e.g. `200.0`)
fn status_code(value: &JsonValue) -> Option<u16> {
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64))
        .and_then(|code| u16::try_from(code).ok())
}
