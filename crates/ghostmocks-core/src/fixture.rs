//! Fixture persistence.

use std::path::Path;

use serde_json::Value as JsonValue;
use tokio::fs;

use crate::Error;

/// Write `data` to `path` as pretty-printed JSON (2-space indent, UTF-8),
/// creating parent directories and overwriting any existing file.
pub async fn write_fixture(path: &Path, data: &JsonValue) -> crate::Result<()> {
    let mut content = serde_json::to_string_pretty(data)?;
    content.push('\n');
    write_file(path, &content).await
}

/// Write `content` to `path`, creating parent directories as needed.
pub(crate) async fn write_file(path: &Path, content: &str) -> crate::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::write(parent, e))?;
    }
    fs::write(path, content)
        .await
        .map_err(|e| Error::write(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_fixture_roundtrip_creates_directories() -> crate::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("demo/mocks/users.json");
        let data = json!([{ "id": 1, "name": "Ada", "token": "[REDACTED]" }]);

        write_fixture(&path, &data).await?;

        let content = fs::read_to_string(&path).await?;
        assert!(content.starts_with("[\n  {\n    \"id\": 1,"));
        let loaded: JsonValue = serde_json::from_str(&content)?;
        assert_eq!(loaded, data);
        Ok(())
    }

    #[tokio::test]
    async fn test_fixture_overwrites_existing_file() -> crate::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("users.json");
        fs::write(&path, "stale content that is much longer than the new one").await?;

        write_fixture(&path, &json!({})).await?;

        assert_eq!(fs::read_to_string(&path).await?, "{}\n");
        Ok(())
    }

    #[tokio::test]
    async fn test_write_failure_reports_path() -> crate::Result<()> {
        let dir = tempdir()?;
        let blocker = dir.path().join("mocks");
        fs::write(&blocker, "not a directory").await?;

        let err = write_fixture(&blocker.join("users.json"), &json!([]))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
        assert!(err.to_string().contains("mocks"));
        Ok(())
    }
}
