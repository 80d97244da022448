use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use newsmorph::config::Settings;
use newsmorph::error::{Error, NewsmorphErrorTrait};

mod commands;

#[derive(Parser)]
#[command(
    name = "newsmorph",
    version,
    about = "News crawler with a morphological tagging pipeline",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (TOML)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format; overrides the settings file
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Discover and parse articles from the configured seed pages
    Crawl {
        /// Crawler config (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Dataset directory
        #[arg(short, long)]
        assets: Option<PathBuf>,
    },

    /// Run morphological tagging over a crawled dataset
    Process {
        /// Dataset directory
        #[arg(short, long)]
        assets: Option<PathBuf>,
    },

    /// Report dataset consistency
    Check {
        /// Dataset directory
        #[arg(short, long)]
        assets: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load(cli.settings.as_deref())?;

    // Initialize tracing/logging
    let format = cli
        .log_format
        .map(LogFormat::as_str)
        .unwrap_or(&settings.logging.format);
    setup_tracing(format, &settings.logging.level, cli.verbose)?;

    tracing::info!("newsmorph starting");

    if let Err(e) = run(cli.command, &settings).await {
        if let Some(err) = e.chain().find_map(|cause| cause.downcast_ref::<Error>()) {
            tracing::error!(
                category = %err.category(),
                recoverable = err.is_recoverable(),
                "Command failed"
            );
        }
        return Err(e);
    }

    tracing::info!("newsmorph completed successfully");
    Ok(())
}

async fn run(command: Commands, settings: &Settings) -> Result<()> {
    match command {
        Commands::Crawl { config, assets } => {
            tracing::info!(config = ?config, assets = ?assets, "Starting crawl command");
            commands::crawl(settings, config, assets).await?;
        }

        Commands::Process { assets } => {
            tracing::info!(assets = ?assets, "Starting process command");
            commands::process(settings, assets).await?;
        }

        Commands::Check { assets, json } => {
            tracing::info!(assets = ?assets, json, "Starting check command");
            commands::check(settings, assets, json)?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("newsmorph=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_new(format!("newsmorph={level},warn"))?
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
