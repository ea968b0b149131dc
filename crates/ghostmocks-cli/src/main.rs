//! ghostmocks CLI entrypoint
//! Parses command-line arguments and drives the core generation pipeline.

// Internal imports (std, crate)
use std::path::PathBuf;
use std::process::ExitCode;

// External imports (alphabetized)
use clap::Parser;
use ghostmocks_core::{Config, DuplicatePolicy, GenerationEvent, GenerationSummary};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ghostmocks")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// HAR file to convert (falls back to `har_path` from --config)
    har_file: Option<PathBuf>,
    /// YAML or TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory for generated JSON fixtures (default: mocks)
    #[arg(long)]
    mocks_dir: Option<PathBuf>,
    /// Directory for generated Playwright specs (default: tests)
    #[arg(long)]
    tests_dir: Option<PathBuf>,
    /// URL the generated tests navigate to (default: http://localhost:4200)
    #[arg(long)]
    app_url: Option<String>,
    /// Selector of the rendered list items (default: li)
    #[arg(long)]
    list_selector: Option<String>,
    /// Custom Tera template for the generated specs
    #[arg(long)]
    template: Option<PathBuf>,
    /// What to do when two responses map to the same endpoint name
    #[arg(long, value_enum)]
    on_duplicate: Option<DuplicatePolicy>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => {
            // --help / --version
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(summary) if summary.is_success() => ExitCode::SUCCESS,
        Ok(summary) => {
            eprintln!(
                "❌ {} endpoint(s) failed to generate",
                summary.failures.len()
            );
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<GenerationSummary> {
    let config = resolve_config(cli).await?;
    tracing::debug!(?config, "resolved configuration");

    println!("🔍 Reading HAR file: {}", config.har_path.display());
    println!("🔄 Processing HAR entries...");

    let mut found = 0usize;
    let mut announced = false;
    let summary = ghostmocks_core::generate_with_progress(&config, |event| match event {
        GenerationEvent::Found(response) => {
            found += 1;
            println!("  ✓ Found API response: {} {}", response.method, response.url);
        }
        GenerationEvent::NothingFound => {
            eprintln!("⚠️  No API responses found in HAR file");
            println!("   Make sure the HAR contains JSON API responses");
        }
        GenerationEvent::Processing { method, name } => {
            if !announced {
                println!("\n📦 Found {found} API response(s)\n");
                announced = true;
            }
            println!("Processing: {method} {name}");
        }
        GenerationEvent::FixtureWritten(path) => {
            println!("  ✓ Generated fixture: {}", path.display());
        }
        GenerationEvent::TestWritten(path) => {
            println!("  ✓ Generated test: {}\n", path.display());
        }
        GenerationEvent::Failed { endpoint, error } => {
            tracing::warn!(endpoint, %error, "endpoint generation failed");
            eprintln!("  ✗ Failed to generate {endpoint}: {error}\n");
        }
    })
    .await?;

    if summary.responses > 0 {
        println!(
            "✅ Generation complete! {} fixture(s), {} test(s)",
            summary.fixtures.len(),
            summary.tests.len()
        );
        println!("\nNext steps:");
        println!("  1. Start the app under test at {}", config.app_url);
        println!("  2. Run the generated specs with `npx playwright test`");
    }
    Ok(summary)
}

/// Merge the optional config file with command-line overrides
async fn resolve_config(cli: Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path.display(), e))?,
        None => Config::new(PathBuf::new()),
    };

    if let Some(har_file) = cli.har_file {
        config.har_path = har_file;
    }
    if config.har_path.as_os_str().is_empty() {
        anyhow::bail!("Usage: ghostmocks <har-file-path>\n   Example: ghostmocks sample.har");
    }

    if let Some(dir) = cli.mocks_dir {
        config.mocks_dir = dir;
    }
    if let Some(dir) = cli.tests_dir {
        config.tests_dir = dir;
    }
    if let Some(url) = cli.app_url {
        config.app_url = url;
    }
    if let Some(selector) = cli.list_selector {
        config.list_selector = selector;
    }
    if let Some(template) = cli.template {
        config.template_path = Some(template);
    }
    if let Some(policy) = cli.on_duplicate {
        config.on_duplicate = policy;
    }
    Ok(config)
}
