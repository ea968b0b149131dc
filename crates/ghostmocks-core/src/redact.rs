//! Secret redaction for captured response payloads.
//!
//! Redaction walks the parsed JSON tree directly. Object members whose key is
//! a known secret name get their whole value replaced, and string leaves are
//! scanned for bearer tokens. Object key sets, key order and array lengths
//! are never changed, and redacting twice gives the same result as once.

// Internal imports (std, crate)
use std::borrow::Cow;
use std::collections::HashSet;

// External imports (alphabetized)
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value as JsonValue;

/// Marker written in place of redacted values
pub const REDACTION_MARKER: &str = "[REDACTED]";

/// Object keys (compared case-insensitively) whose values are always redacted
pub const DEFAULT_SECRET_KEYS: &[&str] = &[
    "token",
    "apikey",
    "api_key",
    "password",
    "secret",
    "credential",
    "auth",
];

const BEARER_REPLACEMENT: &str = "${1}[REDACTED]";

static BEARER_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(Bearer\s+)[A-Za-z0-9\-._~+/]+=*").expect("valid bearer regex"));

/// Replaces sensitive values in JSON payloads with [`REDACTION_MARKER`].
#[derive(Debug, Clone)]
pub struct Redactor {
    secret_keys: HashSet<String>,
}

impl Default for Redactor {
    fn default() -> Self {
        Self::with_extra_keys(std::iter::empty::<&str>())
    }
}

impl Redactor {
    /// Build a redactor matching the default secret keys plus `extra`.
    pub fn with_extra_keys<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let secret_keys = DEFAULT_SECRET_KEYS
            .iter()
            .map(|k| k.to_string())
            .chain(extra.into_iter().map(|k| k.as_ref().to_lowercase()))
            .collect();
        Self { secret_keys }
    }

    /// Whether values stored under `key` are redacted.
    pub fn is_secret_key(&self, key: &str) -> bool {
        self.secret_keys.contains(&key.to_lowercase())
    }

    /// Return a redacted copy of `value`.
    pub fn redact(&self, value: &JsonValue) -> JsonValue {
        let mut redacted = value.clone();
        self.redact_in_place(&mut redacted);
        redacted
    }

    /// Redact `value` in place.
    pub fn redact_in_place(&self, value: &mut JsonValue) {
        match value {
            JsonValue::Object(map) => {
                for (key, member) in map.iter_mut() {
                    if self.is_secret_key(key) {
                        *member = JsonValue::String(REDACTION_MARKER.to_string());
                    } else {
                        self.redact_in_place(member);
                    }
                }
            }
            JsonValue::Array(items) => {
                for item in items {
                    self.redact_in_place(item);
                }
            }
            JsonValue::String(s) => {
                if BEARER_TOKEN.is_match(s) {
                    *s = redact_bearer_tokens(s).into_owned();
                }
            }
            JsonValue::Null | JsonValue::Bool(_) | JsonValue::Number(_) => {}
        }
    }
}

/// Replace the token part of every `Bearer <token>` occurrence in `text`.
pub fn redact_bearer_tokens(text: &str) -> Cow<'_, str> {
    BEARER_TOKEN.replace_all(text, BEARER_REPLACEMENT)
}
