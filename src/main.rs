//! Bilin - English/Chinese Text Translation
//!
//! This is the main entry point for the Bilin command-line shell. It wires
//! saved credentials into translation providers, keeps one of them active,
//! and dispatches translation requests to a background task so the
//! foreground never waits on network I/O.

use anyhow::Result;
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bilin::cli::{Args, Commands, KeyAction};
use bilin::config::Config;
use bilin::credentials::{CredentialStore, Credentials};
use bilin::error::BilinError;
use bilin::probe::{probe, ProbeState};
use bilin::provider::{Direction, GeminiTranslator, ProviderKind, Translator, ZhipuTranslator};
use bilin::selector::ProviderSelector;
use bilin::task::{spawn_translation, TranslationOutcome};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(args.verbose)?;

    // Load configuration
    let config = match &args.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => {
            if std::path::Path::new("bilin.toml").exists() {
                info!("Found bilin.toml in current directory, loading...");
                Config::from_file("bilin.toml")?
            } else {
                Config::default()
            }
        }
    };

    let keys_path = args
        .keys
        .clone()
        .unwrap_or_else(|| PathBuf::from("bilin_keys.json"));
    let store = CredentialStore::new(&keys_path);

    match args.command {
        Commands::Translate {
            text,
            direction,
            switch,
        } => {
            let direction = parse_direction(&direction)?;
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };
            if text.trim().is_empty() {
                anyhow::bail!("Nothing to translate: input text is empty");
            }

            let mut selector = build_selector(&config, &store)?;
            if switch {
                selector.switch();
            }
            let provider = selector.active()?;
            info!("Translating via {} ({})", provider.kind(), direction);

            let task = spawn_translation(provider, text, direction);
            match task.outcome().await {
                TranslationOutcome::Success(translation) => {
                    println!("{}", translation);
                }
                TranslationOutcome::Failure(message) => {
                    println!("Translation failed: {}", message);
                    std::process::exit(1);
                }
            }
        }
        Commands::Probe => {
            let selector = build_selector(&config, &store)?;
            let provider = selector.active()?;
            let kind = provider.kind();

            match probe(provider).await {
                ProbeState::Valid => {
                    println!("{}: credential is valid", kind);
                }
                state => {
                    // One-shot CLI: re-entry happens via `keys set`, so a
                    // failed probe maps straight to the aborted exit path.
                    let state = state.on_declined();
                    debug_assert_eq!(state, ProbeState::Aborted);
                    println!(
                        "{}: connectivity check failed. Re-enter the key with \
                         `bilin keys set` and probe again.",
                        kind
                    );
                    std::process::exit(2);
                }
            }
        }
        Commands::Keys { action } => match action {
            KeyAction::Set { gemini, zhipu } => {
                if gemini.is_none() && zhipu.is_none() {
                    anyhow::bail!("Nothing to save: pass --gemini and/or --zhipu");
                }
                store.save(&Credentials {
                    gemini_key: gemini,
                    zhipu_key: zhipu,
                })?;
                println!("Credentials saved to {}", store.path().display());
            }
            KeyAction::Show => {
                let creds = store.load();
                println!(
                    "Gemini key: {}",
                    if creds.gemini_key.is_some() { "saved" } else { "not set" }
                );
                println!(
                    "Zhipu key:  {}",
                    if creds.zhipu_key.is_some() { "saved" } else { "not set" }
                );
            }
            KeyAction::Delete => {
                store.delete()?;
                println!("Credential record deleted");
            }
        },
    }

    Ok(())
}

/// Construct a provider for every saved credential. The first configured
/// provider (Gemini, when present) becomes the active one.
fn build_selector(config: &Config, store: &CredentialStore) -> Result<ProviderSelector> {
    let creds = store.load();
    let mut selector = ProviderSelector::new();

    if let Some(key) = &creds.gemini_key {
        let client = config.build_http_client()?;
        let provider: Arc<dyn Translator> = Arc::new(GeminiTranslator::new(
            client,
            &config.gemini.endpoint,
            &config.gemini.model,
            key,
        ));
        selector.configure(provider);
    }

    if let Some(key) = &creds.zhipu_key {
        let client = config.build_http_client()?;
        let provider: Arc<dyn Translator> = Arc::new(ZhipuTranslator::new(
            client,
            &config.zhipu.endpoint,
            &config.zhipu.model,
            key,
        ));
        selector.configure(provider);
    }

    if selector.active_kind().is_none() {
        warn!("No credential found at {}", store.path().display());
        return Err(anyhow::Error::from(BilinError::NoProvider)
            .context("Save an API key first: bilin keys set --gemini <KEY> | --zhipu <KEY>"));
    }

    if selector.is_configured(ProviderKind::Gemini) && selector.is_configured(ProviderKind::Zhipu) {
        info!("Both providers configured; --switch toggles between them");
    }

    Ok(selector)
}

fn parse_direction(s: &str) -> Result<Direction> {
    Direction::parse(s).ok_or_else(|| {
        BilinError::Config(format!(
            "Invalid direction '{}'. Valid directions: en-zh, zh-en",
            s
        ))
        .into()
    })
}

/// Setup logging to both console and file
fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = PathBuf::from("logs");
    std::fs::create_dir_all(&log_dir)?;

    // Set up file appender with daily rotation
    let file_appender = rolling::daily(&log_dir, "bilin.log");
    let (non_blocking_file, _guard) = non_blocking(file_appender);
    // Keep the guard alive for the duration of the program
    std::mem::forget(_guard);

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let console_layer = fmt::layer()
        .with_target(false)
        .with_file(true)
        .with_line_number(true);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false); // No ANSI colors in file

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(console_layer)
        .with(file_layer);

    subscriber
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
