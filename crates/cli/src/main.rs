//! FoodPrint Forecast CLI
//!
//! Drives the page controller from a terminal: upload a fridge image,
//! contribute avoided emissions, and show the community leaderboard.
//!
//! Copyright (c) 2025 Michael A Wright

mod terminal;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use foodprint_client::{ClientConfig, HttpBackend};
use foodprint_core::{EmissionResults, Locale, PageController};
use std::path::PathBuf;
use terminal::{read_image, TerminalPage};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "foodprint")]
#[command(about = "Fridge analysis, recipes and avoided emissions from the terminal", long_about = None)]
struct Cli {
    /// Base URL of the analysis server
    #[arg(long, env = "FOODPRINT_BASE_URL", default_value = "http://127.0.0.1:5000")]
    base_url: String,

    /// Request timeout in seconds (none by default)
    #[arg(long)]
    timeout: Option<u64>,

    /// Display language: en or id
    #[arg(long, default_value = "en")]
    lang: Locale,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a fridge image and print the analysis
    Upload {
        /// Image file; without one an empty field is sent
        image: Option<PathBuf>,

        /// Contribute the resulting emissions to the leaderboard
        #[arg(long)]
        contribute: bool,

        /// Username for the contribution (prompted otherwise)
        #[arg(short, long)]
        username: Option<String>,
    },

    /// Contribute saved emission results to the leaderboard
    Contribute {
        #[arg(short, long)]
        username: String,

        /// JSON file holding the emission results of an earlier upload
        #[arg(short, long)]
        emissions: PathBuf,
    },

    /// Print the community leaderboard
    Leaderboard,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let backend = HttpBackend::new(ClientConfig {
        base_url: cli.base_url,
        timeout_secs: cli.timeout,
    })?;
    let messages = cli.lang.messages();

    match cli.command {
        Commands::Upload {
            image,
            contribute,
            username,
        } => {
            let image = image.as_deref().map(read_image).transpose()?;
            let controller =
                PageController::new(backend, TerminalPage::new(image, username), messages);

            controller.handle_upload_submit().await;

            if contribute {
                match controller.page().take_contribute_target() {
                    Some(emissions) => controller.handle_contribute_click(&emissions).await,
                    None => tracing::warn!("no analysis to contribute"),
                }
            }
        }
        Commands::Contribute {
            username,
            emissions,
        } => {
            let text = std::fs::read_to_string(&emissions)
                .with_context(|| format!("Failed to read {}", emissions.display()))?;
            let emissions: EmissionResults =
                serde_json::from_str(&text).context("Invalid emission results")?;

            let controller = PageController::new(backend, TerminalPage::new(None, None), messages);
            controller.contribute(&username, &emissions).await;
        }
        Commands::Leaderboard => {
            let controller = PageController::new(backend, TerminalPage::new(None, None), messages);
            controller.initialize().await;
        }
    }

    Ok(())
}
