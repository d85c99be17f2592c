// ABOUTME: gut-tracker CLI - command-line front end for the GutTracker journal
// ABOUTME: Correlation analysis, AI recognition/scoring/dictation, export and provider settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # How many distinct days are recorded
//! gut-tracker days
//!
//! # Food -> symptom pairs within six hours, grouped per food
//! gut-tracker correlations --summary
//!
//! # Narrated analysis of the last 30 days
//! gut-tracker analyze
//!
//! # Recognize foods on a photo, score foods, parse a dictation
//! gut-tracker recognize lunch.jpg
//! gut-tracker fodmap leek garlic rice
//! gut-tracker voice --context symptom "strong bloating since lunch, around 7"
//!
//! # Export the journal
//! gut-tracker export --format csv --from 2024-06-01 --to 2024-06-30 --types food,symptom
//!
//! # Provider settings
//! gut-tracker settings show
//! gut-tracker settings select anthropic
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use gut_tracker::config::{AiProviderId, AppConfig};
use gut_tracker::errors::AppResult;
use gut_tracker::export::{ExportDataType, ExportFormat};
use gut_tracker::gateway::AiGateway;
use gut_tracker::llm::http_client::initialize_shared_client;
use gut_tracker::logging::LoggingConfig;
use gut_tracker::models::VoiceContext;
use gut_tracker::stores::Journal;
use tracing::debug;

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "gut-tracker",
    about = "GutTracker journal and analysis CLI",
    long_about = "Correlate meals with symptoms, query AI providers and export the food, symptom and medication journal."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Data directory override
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Show the number of distinct recorded days
    Days,

    /// List food to symptom pairs within six hours
    Correlations {
        /// Group pairs per food
        #[arg(long)]
        summary: bool,
    },

    /// Narrate the last 30 days with the selected AI provider
    Analyze,

    /// Recognize the foods on a photo
    Recognize {
        /// Image file
        image: PathBuf,

        /// MIME type (guessed from the extension when omitted)
        #[arg(long)]
        mime: Option<String>,
    },

    /// Score the FODMAP content of foods
    Fodmap {
        /// Food names
        #[arg(required = true)]
        foods: Vec<String>,
    },

    /// Parse a dictated transcript
    Voice {
        /// Journal the dictation is for (food, symptom, medication)
        #[arg(long)]
        context: VoiceContext,

        /// Transcript text
        transcript: String,
    },

    /// Export the journal
    Export {
        /// Output format (json, csv)
        #[arg(long, default_value = "json")]
        format: ExportFormat,

        /// First day, inclusive (defaults to 30 days ago)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day, inclusive (defaults to today)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Collections to include, comma-separated (defaults to all)
        #[arg(long, value_delimiter = ',')]
        types: Vec<ExportDataType>,

        /// Write to this file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// AI provider settings
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum SettingsCommand {
    /// Show the active provider and per-provider settings
    Show,

    /// Select the active provider
    Select {
        /// Provider id (openai, anthropic, gemini, ollama)
        provider: String,
    },

    /// Update one provider's credentials, model or endpoint
    Configure {
        /// Provider id
        provider: AiProviderId,

        /// API key
        #[arg(long)]
        api_key: Option<String>,

        /// Model identifier
        #[arg(long)]
        model: Option<String>,

        /// Endpoint override
        #[arg(long)]
        base_url: Option<String>,
    },
}

/// Shared state built once per invocation
pub struct AppContext {
    /// Resolved configuration
    pub config: AppConfig,
    /// Journal stores, loaded
    pub journal: Journal,
    /// Gateway over the configured provider
    pub gateway: Arc<AiGateway>,
}

impl AppContext {
    async fn load(config: AppConfig) -> Result<Self> {
        initialize_shared_client(config.http.timeout_secs, config.http.connect_timeout_secs);

        let journal = Journal::open(&config.data_dir);
        journal.load_all().await?;

        let settings = config.load_ai_settings().await?;
        debug!(provider = %settings.selected_provider, "AI settings loaded");

        Ok(Self {
            config,
            journal,
            gateway: Arc::new(AiGateway::new(settings)),
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    LoggingConfig::from_env().verbose(cli.verbose).init()?;

    let mut config = AppConfig::from_env()?;
    if let Some(data_dir) = cli.data_dir {
        config = config.with_data_dir(data_dir);
    }
    config.log_summary();

    match cli.command {
        // Settings commands work without loading the journal
        Command::Settings { action } => run_settings(&config, action).await,
        command => {
            let ctx = AppContext::load(config).await?;
            run(&ctx, command).await
        }
    }
}

async fn run_settings(config: &AppConfig, action: SettingsCommand) -> Result<()> {
    match action {
        SettingsCommand::Show => commands::settings::show(config).await,
        SettingsCommand::Select { provider } => commands::settings::select(config, &provider).await,
        SettingsCommand::Configure {
            provider,
            api_key,
            model,
            base_url,
        } => commands::settings::configure(config, provider, api_key, model, base_url).await,
    }
}

async fn run(ctx: &AppContext, command: Command) -> Result<()> {
    match command {
        Command::Days => commands::analysis::days(ctx),
        Command::Correlations { summary } => commands::analysis::correlations(ctx, summary),
        Command::Analyze => commands::analysis::analyze(ctx).await?,
        Command::Recognize { image, mime } => {
            commands::ai::recognize(ctx, &image, mime.as_deref()).await?;
        }
        Command::Fodmap { foods } => commands::ai::fodmap(ctx, &foods).await?,
        Command::Voice {
            context,
            transcript,
        } => commands::ai::voice(ctx, &transcript, context).await?,
        Command::Export {
            format,
            from,
            to,
            types,
            output,
        } => commands::export::run(ctx, format, from, to, &types, output.as_deref()).await?,
        Command::Settings { action } => run_settings(&ctx.config, action).await?,
    }
    Ok(())
}
