//! Taxwise - terminal tax assistant
//!
#![doc = "Main entry point for the Taxwise application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use taxwise::cli::{Cli, Commands};
use taxwise::commands;
use taxwise::config::Config;
use taxwise::settings::{JsonFileStore, KeyValueStore, MemoryStore, SettingsManager};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Settings are loaded once and shared by every screen
    let store: Box<dyn KeyValueStore> = match JsonFileStore::from_config(&config.storage) {
        Ok(store) => {
            tracing::debug!("Using settings store at {}", store.path().display());
            Box::new(store)
        }
        Err(e) => {
            tracing::warn!("Settings store unavailable, changes will not persist: {}", e);
            Box::new(MemoryStore::new())
        }
    };
    let mut settings_manager = SettingsManager::load(store);
    let settings = *settings_manager.settings();

    // Execute command
    match cli.command {
        None => {
            commands::landing::show_landing(&settings);
            Ok(())
        }
        Some(Commands::Chat { provider, ask }) => {
            if let Some(p) = &provider {
                tracing::debug!("Using provider override: {}", p);
            }
            match ask {
                Some(question) => {
                    commands::chat::ask_once(config, provider, settings, &question).await?
                }
                None => commands::chat::run_chat(config, provider, settings, None).await?,
            }
            Ok(())
        }
        Some(Commands::Calc {
            income,
            dependents,
            filing_status,
        }) => {
            commands::calc::handle_calc(&income, dependents, filing_status.into(), &settings)?;
            Ok(())
        }
        Some(Commands::Info { search, faq, ask }) => {
            commands::info::handle_info(config, settings, search, faq, ask).await?;
            Ok(())
        }
        Some(Commands::Settings { command }) => {
            commands::settings::handle_settings(&mut settings_manager, command)?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// `RUST_LOG` wins over the default level; `--verbose` raises the default to
/// debug. Logs go to stderr so command output stays clean.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "taxwise=debug" } else { "taxwise=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
