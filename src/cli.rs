//! Command-line interface definition for Taxwise
//!
//! This module defines the CLI structure using clap's derive API. Each
//! subcommand corresponds to one screen of the assistant; running the binary
//! without a subcommand shows the landing screen.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Taxwise - terminal tax assistant
///
/// Ask tax questions, estimate a flat-rate tax bill, and browse common tax
/// topics from the terminal.
#[derive(Parser, Debug, Clone)]
#[command(name = "taxwise")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the settings store location
    #[arg(long, env = "TAXWISE_STORAGE_PATH")]
    pub storage_path: Option<PathBuf>,

    /// Command to execute (omit to show the landing screen)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for Taxwise
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat with the tax assistant
    Chat {
        /// Override the provider from config (groq, offline)
        #[arg(short, long)]
        provider: Option<String>,

        /// Send a single question, print the reply, and exit
        #[arg(short, long)]
        ask: Option<String>,
    },

    /// Estimate tax with the simplified flat-rate calculator
    Calc {
        /// Annual income (accepts `$` and thousands separators)
        #[arg(short, long, allow_hyphen_values = true)]
        income: String,

        /// Number of dependents
        #[arg(short, long, default_value_t = 0)]
        dependents: u32,

        /// Filing status
        #[arg(short, long, value_enum, default_value_t = FilingStatusArg::Single)]
        filing_status: FilingStatusArg,
    },

    /// Browse the tax information hub
    Info {
        /// Only show topics matching this search text
        #[arg(short, long)]
        search: Option<String>,

        /// Show the frequently asked questions
        #[arg(long)]
        faq: bool,

        /// Open a chat seeded with a question about this topic
        #[arg(long)]
        ask: Option<String>,
    },

    /// View or change persisted settings
    Settings {
        /// Settings subcommand
        #[command(subcommand)]
        command: Option<SettingsCommand>,
    },
}

/// Settings subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SettingsCommand {
    /// Show current settings
    Show,

    /// Change a single setting
    Set {
        /// Setting name (darkMode, verbosityLevel, colorTheme,
        /// preferredCalculationMethod, notifications)
        key: String,

        /// New value
        value: String,
    },

    /// Restore all settings to their defaults
    Reset,
}

/// Filing status accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilingStatusArg {
    /// Single filer
    Single,
    /// Married filing jointly
    Married,
    /// Head of household
    HeadOfHousehold,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            storage_path: None,
            command: None,
        }
    }
}
