mod cli;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use studykit_core::config::{load_dotenv, Config};
use studykit_core::CancelSignal;
use studykit_ingest::mime_for_path;
use studykit_synth::{extract_document, study_kit_from_document, PipelineError, StudyKitGenerator};
use tracing::{info, warn};

use crate::cli::{CliArgs, Command};

/// Conventional exit status for a run interrupted by Ctrl-C.
const EXIT_INTERRUPTED: u8 = 130;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    load_dotenv();
    let args = CliArgs::parse();
    let config = match args.profile.as_deref() {
        Some(profile) => Config::for_profile(profile),
        None => Config::from_env(),
    };
    config.log_summary();

    match args.command {
        Command::Extract { file, mime, json } => extract(&config, &file, mime.as_deref(), json).await,
        Command::Generate {
            file,
            mime,
            budget_secs,
            pretty,
        } => generate(config, &file, mime.as_deref(), budget_secs, pretty).await,
        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&config.redacted_summary())?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn read_document(file: &Path, mime: Option<&str>) -> Result<(Vec<u8>, String)> {
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;
    let mime = mime.map(str::to_string).unwrap_or_else(|| mime_for_path(file).to_string());
    Ok((bytes, mime))
}

async fn extract(config: &Config, file: &Path, mime: Option<&str>, json: bool) -> Result<ExitCode> {
    let (bytes, mime) = read_document(file, mime).await?;
    let extracted = extract_document(bytes, &mime, &config.extraction)
        .await
        .with_context(|| format!("could not extract text from {}", file.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&extracted)?);
    } else {
        println!("{}", extracted.as_str());
    }
    Ok(ExitCode::SUCCESS)
}

async fn generate(
    mut config: Config,
    file: &Path,
    mime: Option<&str>,
    budget_secs: Option<u64>,
    pretty: bool,
) -> Result<ExitCode> {
    if budget_secs.is_some() {
        config.generator.budget_secs = budget_secs;
    }
    let (bytes, mime) = read_document(file, mime).await?;
    let generator = StudyKitGenerator::from_config(&config).await;

    let cancel = CancelSignal::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, cancelling");
            on_interrupt.cancel();
        }
    });

    let kit = match study_kit_from_document(&generator, bytes, &mime, &config.extraction, Some(&cancel)).await {
        Ok(kit) => kit,
        Err(PipelineError::Aborted(_)) => {
            eprintln!("cancelled");
            return Ok(ExitCode::from(EXIT_INTERRUPTED));
        }
        Err(e) => {
            return Err(e).with_context(|| format!("could not generate a study kit for {}", file.display()));
        }
    };

    info!(
        quiz = kit.quiz.len(),
        flashcards = kit.flashcards.len(),
        degraded = kit.is_degraded(),
        "done"
    );
    let out = if pretty {
        serde_json::to_string_pretty(&kit)?
    } else {
        serde_json::to_string(&kit)?
    };
    println!("{out}");
    Ok(ExitCode::SUCCESS)
}
