use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use smoothscroll_core::FileStore;

mod commands;

#[derive(Parser)]
#[command(name = "smoothscroll")]
#[command(author, version, about = "Cursor centering and smooth scrolling for document editors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (defaults to ~/.config/smoothscroll/settings.toml)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an event script against a simulated editor and print the scroll trace
    Replay {
        /// JSON script file
        script: PathBuf,
        /// Pace wait steps in real time
        #[arg(long)]
        realtime: bool,
        /// Print the trace as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the scrollbar stylesheet for the current settings
    Css,
    /// Inspect or change settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Show every setting
    Show,
    /// Print a single setting
    Get {
        key: String,
    },
    /// Change a single setting
    Set {
        key: String,
        value: String,
    },
    /// Restore the defaults
    Reset,
    /// Open the preferences panel
    Edit,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    let store = match cli.settings {
        Some(path) => FileStore::new(path),
        None => FileStore::at_default_path(),
    };

    match cli.command {
        Commands::Replay {
            script,
            realtime,
            json,
        } => commands::replay::run(&store, &script, realtime, json).await,
        Commands::Css => commands::css::run(&store).await,
        Commands::Settings { action } => match action {
            SettingsAction::Show => commands::settings::show(&store).await,
            SettingsAction::Get { key } => commands::settings::get(&store, &key).await,
            SettingsAction::Set { key, value } => {
                commands::settings::set(&store, &key, &value).await
            }
            SettingsAction::Reset => commands::settings::reset(&store).await,
            SettingsAction::Edit => commands::edit::run(&store).await,
        },
    }
}
