//! `conceptforge` -- generate superhero concepts from the command line.
//!
//! # Environment variables
//!
//! | Variable                   | Required | Default                   | Description                      |
//! |----------------------------|----------|---------------------------|----------------------------------|
//! | `API_KEY`                  | yes      | --                        | Gemini API key (`GEMINI_API_KEY` also accepted) |
//! | `GEMINI_BASE_URL`          | no       | Gemini `v1beta` endpoint  | REST base URL                    |
//! | `GEMINI_TEXT_MODEL`        | no       | `gemini-2.5-flash`        | Model for text modes             |
//! | `GEMINI_IMAGE_MODEL`       | no       | `imagen-3.0-generate-002` | Model for image modes            |
//! | `GEMINI_VIDEO_MODEL`       | no       | `veo-2.0-generate-001`    | Model for video shots            |
//! | `VIDEO_POLL_INTERVAL_SECS` | no       | `10`                      | Seconds between status checks    |
//! | `VIDEO_MAX_POLLS`          | no       | `30`                      | Status checks before timing out  |
//! | `REQUEST_TIMEOUT_SECS`     | no       | `60`                      | Per-request HTTP timeout         |
//! | `DOWNLOAD_TIMEOUT_SECS`    | no       | `600`                     | Total asset download timeout     |

use clap::Parser;
use conceptforge_cli::args::Cli;
use conceptforge_cli::{output, run};
use conceptforge_gemini::{ConceptStudio, GeminiConfig};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "conceptforge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = GeminiConfig::from_env()?;
    tracing::info!(
        base_url = %config.base_url,
        has_api_key = config.api_key.is_some(),
        "Configuration loaded",
    );

    let studio = ConceptStudio::new(config)?;
    let outcome = run::execute(&studio, &cli.command).await?;

    println!("{}", outcome.summary());

    if let Some(dir) = &cli.out_dir {
        output::save(&outcome, dir).await?;
    }

    Ok(())
}
