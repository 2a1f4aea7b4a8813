//! atfile-fetch - fetch an ATFile upload and check its content
//!
//! Logs in to a PDS, resolves a `blue.zio.atfile.upload` record, downloads
//! the attached blob and reports its size, content type and, for MPEG
//! audio, whether it starts with an ID3 tag and where the first frame sync is.

mod cli;
mod config;
mod error;
mod report;

use crate::cli::Cli;
use crate::config::{FetchConfig, OutputFormat};
use crate::error::Result;
use crate::report::Report;
use atfile_client::AtFileClient;
use clap::Parser;
use mpeg_probe::{probe_with, ProbeOptions};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging() {
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

const DEFAULT_LOG_DIRECTIVES: &str = "atfile_fetch=info";

/// `RUST_LOG` directives when set, otherwise the built-in default
fn log_filter(directives: Option<&str>) -> Result<EnvFilter> {
    match directives.map(str::trim) {
        Some(directives) if !directives.is_empty() => Ok(EnvFilter::try_new(directives)?),
        _ => Ok(EnvFilter::new(DEFAULT_LOG_DIRECTIVES)),
    }
}

fn init_logging() -> Result<()> {
    let env_filter = log_filter(std::env::var("RUST_LOG").ok().as_deref())?;

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    };

    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = FetchConfig::from_cli(cli)?;
    info!("Server: {}", config.server);
    info!("Username: {}", config.username);
    info!("Record key: {}", config.key);

    let client =
        AtFileClient::with_options(config.credentials(), config.locator(), config.timeout)?;
    let upload = client.fetch_upload(&config.key).await?;
    info!("Blob URL: {}", upload.blob_url);

    if config.output == OutputFormat::Text {
        print!("{}", report::file_information(&upload));
    }

    let result = probe_with(
        &upload.content.bytes,
        upload.content.content_type.as_deref(),
        ProbeOptions {
            strict: config.strict,
        },
    )?;

    match config.output {
        OutputFormat::Text => print!("{}", report::probe_summary(&result)),
        OutputFormat::Json => println!("{}", report::to_json(&Report::new(&upload, &result))?),
    }

    Ok(())
}
