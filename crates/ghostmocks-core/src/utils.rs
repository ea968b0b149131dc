//! Path helpers for generated artifacts

use std::path::{Component, Path, PathBuf};

/// Endpoint name used when a URL has no usable path segment
pub const FALLBACK_ENDPOINT: &str = "data";

/// Make an endpoint name safe to use as a file stem.
///
/// Keeps ASCII alphanumerics, `-`, `_` and `.`; anything else (path
/// separators, percent escapes, reserved characters) becomes `_`. Names made
/// only of dots, or empty names, fall back to [`FALLBACK_ENDPOINT`].
pub fn sanitize_endpoint(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.') {
                ch
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.chars().all(|ch| ch == '.') {
        FALLBACK_ENDPOINT.to_string()
    } else {
        cleaned
    }
}

/// Compute the path of `to` relative to the directory `from`, using `/`
/// separators so it can be embedded in generated TypeScript.
///
/// Relative inputs are resolved against `base` first.
pub fn relative_path(from: &Path, to: &Path, base: &Path) -> String {
    let from = normalize(&base.join(from));
    let to = normalize(&base.join(to));

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::new();
    parts.extend(from.iter().skip(common).map(|_| "..".to_string()));
    parts.extend(
        to.iter()
            .skip(common)
            .map(|c| c.to_string_lossy().into_owned()),
    );

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

// Lexical normalization; symlinks are not resolved
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
