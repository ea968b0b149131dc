//! Fixture and test generation pipeline

// Internal imports (std, crate)
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::{
    builders::{EndpointFixture, PlaywrightContextBuilder, SpecContextBuilder},
    config::{Config, DuplicatePolicy},
    error::{Error, Result},
    fixture::write_fixture,
    har::{ExtractedResponse, HarDocument},
    redact::Redactor,
    templates::SpecTemplate,
    utils::relative_path,
};

/// Progress notifications emitted while a run is in flight
#[derive(Debug)]
pub enum GenerationEvent<'a> {
    /// A JSON API response was extracted from the HAR
    Found(&'a ExtractedResponse),
    /// No API responses were found; nothing will be written
    NothingFound,
    /// Processing of a response under its output name started
    Processing { method: &'a str, name: &'a str },
    FixtureWritten(&'a Path),
    TestWritten(&'a Path),
    /// Processing of one endpoint failed; the run continues
    Failed { endpoint: &'a str, error: &'a Error },
}

impl fmt::Display for GenerationEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(response) => write!(
                f,
                "Found API response: {} {} ({})",
                response.method, response.url, response.endpoint
            ),
            Self::NothingFound => write!(f, "No API responses found in HAR file"),
            Self::Processing { method, name } => write!(f, "Processing: {method} {name}"),
            Self::FixtureWritten(path) => write!(f, "Generated fixture: {}", path.display()),
            Self::TestWritten(path) => write!(f, "Generated test: {}", path.display()),
            Self::Failed { endpoint, error } => write!(f, "Failed to generate {endpoint}: {error}"),
        }
    }
}

/// An endpoint whose artifacts could not be generated
#[derive(Debug)]
pub struct EndpointFailure {
    pub endpoint: String,
    pub error: Error,
}

/// Outcome of a generation run
#[derive(Debug, Default)]
pub struct GenerationSummary {
    /// Number of API responses extracted from the HAR
    pub responses: usize,
    /// Fixture files written, in processing order
    pub fixtures: Vec<PathBuf>,
    /// Test spec files written, in processing order
    pub tests: Vec<PathBuf>,
    pub failures: Vec<EndpointFailure>,
}

impl GenerationSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Main entry point for generation; progress is reported through `log`.
pub async fn generate(config: &Config) -> Result<GenerationSummary> {
    generate_with_progress(config, |event| match event {
        GenerationEvent::NothingFound | GenerationEvent::Failed { .. } => log::warn!("{event}"),
        _ => log::info!("{event}"),
    })
    .await
}

/// Run the pipeline, reporting each step to `on_event`.
///
/// Load and template errors abort the run. Failures while writing one
/// endpoint are recorded in the summary and the remaining endpoints are
/// still processed.
pub async fn generate_with_progress<F>(config: &Config, mut on_event: F) -> Result<GenerationSummary>
where
    F: FnMut(GenerationEvent<'_>),
{
    // 1. Load the HAR and extract API responses
    let har = HarDocument::from_file(&config.har_path).await?;
    let responses = har.extract_responses();
    for response in &responses {
        on_event(GenerationEvent::Found(response));
    }

    let mut summary = GenerationSummary {
        responses: responses.len(),
        ..Default::default()
    };
    if responses.is_empty() {
        on_event(GenerationEvent::NothingFound);
        return Ok(summary);
    }

    // 2. Prepare the shared pieces
    let template = match &config.template_path {
        Some(path) => SpecTemplate::from_file(path).await?,
        None => SpecTemplate::playwright()?,
    };
    let pipeline = Pipeline {
        config,
        redactor: Redactor::with_extra_keys(&config.extra_secret_keys),
        builder: PlaywrightContextBuilder::from_config(config),
        template,
        base_dir: std::env::current_dir()?,
    };
    let mut names = EndpointNames::new(config.on_duplicate);

    // 3. Process responses strictly in extraction order
    for response in &responses {
        let result = match names.resolve(&response.endpoint) {
            Ok(name) => {
                pipeline
                    .process(response, &name, &mut summary, &mut on_event)
                    .await
            }
            Err(e) => Err(e),
        };

        if let Err(error) = result {
            on_event(GenerationEvent::Failed {
                endpoint: &response.endpoint,
                error: &error,
            });
            summary.failures.push(EndpointFailure {
                endpoint: response.endpoint.clone(),
                error,
            });
        }
    }

    Ok(summary)
}

struct Pipeline<'a> {
    config: &'a Config,
    redactor: Redactor,
    builder: PlaywrightContextBuilder,
    template: SpecTemplate,
    base_dir: PathBuf,
}

impl Pipeline<'_> {
    async fn process<F>(
        &self,
        response: &ExtractedResponse,
        name: &str,
        summary: &mut GenerationSummary,
        on_event: &mut F,
    ) -> Result<()>
    where
        F: FnMut(GenerationEvent<'_>),
    {
        on_event(GenerationEvent::Processing {
            method: &response.method,
            name,
        });

        let fixture_path = self.config.mocks_dir.join(format!("{name}.json"));
        let test_path = self.config.tests_dir.join(format!("{name}.spec.ts"));

        let redacted = self.redactor.redact(&response.data);
        write_fixture(&fixture_path, &redacted).await?;
        on_event(GenerationEvent::FixtureWritten(&fixture_path));

        let fixture_rel = relative_path(&self.config.tests_dir, &fixture_path, &self.base_dir);
        let context = self.builder.build(&EndpointFixture {
            endpoint: name,
            fixture_path: &fixture_rel,
            method: &response.method,
            source_url: &response.url,
        })?;
        self.template.generate_test(&context, &test_path).await?;
        on_event(GenerationEvent::TestWritten(&test_path));

        summary.fixtures.push(fixture_path);
        summary.tests.push(test_path);
        Ok(())
    }
}

/// Assigns output names to endpoints according to the duplicate policy
#[derive(Debug)]
struct EndpointNames {
    policy: DuplicatePolicy,
    seen: HashMap<String, usize>,
}

impl EndpointNames {
    fn new(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            seen: HashMap::new(),
        }
    }

    fn resolve(&mut self, endpoint: &str) -> Result<String> {
        let count = {
            let count = self.seen.entry(endpoint.to_string()).or_insert(0);
            *count += 1;
            *count
        };
        if count == 1 {
            return Ok(endpoint.to_string());
        }

        match self.policy {
            DuplicatePolicy::Overwrite => Ok(endpoint.to_string()),
            DuplicatePolicy::Reject => Err(Error::DuplicateEndpoint(endpoint.to_string())),
            DuplicatePolicy::Suffix => {
                let mut n = count;
                loop {
                    let candidate = format!("{endpoint}_{n}");
                    if !self.seen.contains_key(&candidate) {
                        self.seen.insert(candidate.clone(), 1);
                        return Ok(candidate);
                    }
                    n += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value as JsonValue};
    use tempfile::{tempdir, TempDir};

    fn entry(method: &str, url: &str, status: u16, mime: &str, body: &JsonValue) -> JsonValue {
        json!({
            "request": { "method": method, "url": url },
            "response": {
                "status": status,
                "content": { "mimeType": mime, "text": body.to_string() }
            }
        })
    }

    async fn setup(entries: Vec<JsonValue>) -> Result<(TempDir, Config)> {
        let dir = tempdir()?;
        let har_path = dir.path().join("capture.har");
        let har = json!({ "log": { "version": "1.2", "entries": entries } });
        tokio::fs::write(&har_path, har.to_string()).await?;

        let mut config = Config::new(&har_path);
        config.mocks_dir = dir.path().join("demo/mocks");
        config.tests_dir = dir.path().join("demo/tests");
        Ok((dir, config))
    }

    async fn read_json(path: &Path) -> Result<JsonValue> {
        Ok(serde_json::from_str(&tokio::fs::read_to_string(path).await?)?)
    }

    #[tokio::test]
    async fn test_single_entry_generates_redacted_fixture_and_test() -> Result<()> {
        let body = json!([{ "id": 1, "name": "Ada", "token": "abc123" }]);
        let (_dir, config) = setup(vec![entry(
            "GET",
            "https://api.example.com/users",
            200,
            "application/json",
            &body,
        )])
        .await?;

        let summary = generate(&config).await?;
        assert!(summary.is_success());
        assert_eq!(summary.responses, 1);

        let fixture = config.mocks_dir.join("users.json");
        assert_eq!(summary.fixtures, vec![fixture.clone()]);
        assert_eq!(
            read_json(&fixture).await?,
            json!([{ "id": 1, "name": "Ada", "token": "[REDACTED]" }])
        );

        let spec = tokio::fs::read_to_string(config.tests_dir.join("users.spec.ts")).await?;
        assert!(spec.contains("\"**/users\""));
        assert!(spec.contains("\"../mocks/users.json\""));
        let header_close = spec.find("*/").unwrap();
        assert!(header_close < spec.find("import").unwrap());
        assert!(spec[header_close..].starts_with("*/\n\nimport"));
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_har_writes_nothing() -> Result<()> {
        let (_dir, config) = setup(vec![]).await?;

        let mut events = Vec::new();
        let summary = generate_with_progress(&config, |e| events.push(e.to_string())).await?;

        assert_eq!(summary.responses, 0);
        assert!(summary.fixtures.is_empty());
        assert_eq!(events, vec!["No API responses found in HAR file".to_string()]);
        assert!(!config.mocks_dir.exists());
        assert!(!config.tests_dir.exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_har_is_fatal() {
        let config = Config::new("/definitely/not/here.har");
        let err = generate(&config).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_duplicates_overwrite_by_default() -> Result<()> {
        let (_dir, config) = setup(vec![
            entry("GET", "https://api.example.com/v1/users", 200, "application/json", &json!([1])),
            entry("GET", "https://api.example.com/v1/teams", 200, "application/json", &json!([])),
            entry("GET", "https://api.example.com/v2/users", 200, "application/json", &json!([2])),
        ])
        .await?;

        let summary = generate(&config).await?;
        assert_eq!(summary.responses, 3);
        assert_eq!(read_json(&config.mocks_dir.join("users.json")).await?, json!([2]));

        let mut files = std::fs::read_dir(&config.mocks_dir)?
            .map(|e| e.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect::<std::io::Result<Vec<_>>>()?;
        files.sort();
        assert_eq!(files, vec!["teams.json", "users.json"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicates_suffixed() -> Result<()> {
        let (_dir, mut config) = setup(vec![
            entry("GET", "https://api.example.com/v1/users", 200, "application/json", &json!([1])),
            entry("GET", "https://api.example.com/v2/users", 200, "application/json", &json!([2])),
        ])
        .await?;
        config.on_duplicate = DuplicatePolicy::Suffix;

        generate(&config).await?;
        assert_eq!(read_json(&config.mocks_dir.join("users.json")).await?, json!([1]));
        assert_eq!(read_json(&config.mocks_dir.join("users_2.json")).await?, json!([2]));
        assert!(config.tests_dir.join("users_2.spec.ts").exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicates_rejected_without_aborting() -> Result<()> {
        let (_dir, mut config) = setup(vec![
            entry("GET", "https://api.example.com/v1/users", 200, "application/json", &json!([1])),
            entry("GET", "https://api.example.com/v2/users", 200, "application/json", &json!([2])),
            entry("GET", "https://api.example.com/teams", 200, "application/json", &json!([3])),
        ])
        .await?;
        config.on_duplicate = DuplicatePolicy::Reject;

        let summary = generate(&config).await?;
        assert!(!summary.is_success());
        assert_eq!(summary.failures.len(), 1);
        assert!(matches!(summary.failures[0].error, Error::DuplicateEndpoint(_)));
        assert_eq!(read_json(&config.mocks_dir.join("users.json")).await?, json!([1]));
        assert!(config.mocks_dir.join("teams.json").exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_write_failure_is_isolated_per_endpoint() -> Result<()> {
        let (dir, mut config) = setup(vec![
            entry("GET", "https://api.example.com/users", 200, "application/json", &json!([1])),
        ])
        .await?;
        // A plain file where the mocks directory should be
        let blocker = dir.path().join("blocked");
        tokio::fs::write(&blocker, "").await?;
        config.mocks_dir = blocker;

        let summary = generate(&config).await?;
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].endpoint, "users");
        assert!(matches!(summary.failures[0].error, Error::Write { .. }));
        Ok(())
    }

    #[test]
    fn test_suffix_skips_taken_names() -> Result<()> {
        let mut names = EndpointNames::new(DuplicatePolicy::Suffix);
        assert_eq!(names.resolve("users_2")?, "users_2");
        assert_eq!(names.resolve("users")?, "users");
        assert_eq!(names.resolve("users")?, "users_3");
        Ok(())
    }
}
