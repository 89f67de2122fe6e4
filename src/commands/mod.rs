/*!
Command handlers for the CLI

Each subcommand maps to one screen of the assistant:

- `landing`: overview shown when no subcommand is given
- `chat`: interactive chat (or a single `--ask` question)
- `calc`: flat-rate tax estimate
- `info`: tax information hub
- `settings`: view and change persisted settings
*/

use crate::chat::{ChatSession, Resolution, ResponseResolver};
use crate::config::Config;
use crate::error::Result;
use crate::providers::create_provider;
use crate::settings::{ColorTheme, Settings};
use colored::{Color, Colorize};

// Special commands parser for the chat REPL
pub mod special_commands;

// Flat-rate calculator screen
pub mod calc;

// Information hub screen
pub mod info;

// Settings screen
pub mod settings;

/// Terminal colour for a theme
pub fn theme_color(theme: ColorTheme) -> Color {
    match theme {
        ColorTheme::Blue => Color::Blue,
        ColorTheme::Green => Color::Green,
        ColorTheme::Neutral => Color::White,
    }
}

/// Print a boxed screen title in the theme colour
pub(crate) fn print_banner(title: &str, theme: ColorTheme) {
    let line = "═".repeat(62);
    println!("\n{}", format!("╔{}╗", line).color(theme_color(theme)));
    println!(
        "{}",
        format!("║{:^62}║", title).color(theme_color(theme)).bold()
    );
    println!("{}\n", format!("╚{}╝", line).color(theme_color(theme)));
}

/// System instruction for a session, adjusted for the verbosity setting
pub fn system_prompt_for(config: &Config, settings: &Settings) -> String {
    match settings.verbosity_level.prompt_hint() {
        Some(hint) => format!("{} {}", config.chat.system_prompt.trim_end(), hint),
        None => config.chat.system_prompt.clone(),
    }
}

/// Build a chat session from configuration and settings
///
/// # Arguments
///
/// * `config` - Global configuration
/// * `provider_name` - Optional override for the configured provider
/// * `settings` - Current user settings
///
/// # Errors
///
/// Returns error if the provider type is unknown or its client cannot be
/// created
pub fn build_session(
    config: &Config,
    provider_name: Option<&str>,
    settings: &Settings,
) -> Result<ChatSession> {
    let provider_type = provider_name.unwrap_or(&config.provider.provider_type);
    let provider = create_provider(provider_type, &config.provider)?;
    tracing::debug!(provider = provider.name(), "Chat provider ready");
    let resolver = ResponseResolver::with_system_prompt(provider, system_prompt_for(config, settings));
    Ok(ChatSession::new(resolver))
}

// Chat command handler
pub mod chat {
    //! Interactive chat handler.
    //!
    //! Runs a readline loop that sends each line to a [`ChatSession`] and
    //! prints the reply. Lines starting with `/` are chat commands.

    use super::*;
    use crate::chat::conversation::{Message, Role};
    use crate::chat::session::SUGGESTED_QUESTIONS;
    use crate::chat::ReplySource;
    use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start interactive chat
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration
    /// * `provider_name` - Optional override for the configured provider
    /// * `settings` - Current user settings
    /// * `opening` - Optional question sent before the first prompt
    pub async fn run_chat(
        config: Config,
        provider_name: Option<String>,
        settings: Settings,
        opening: Option<String>,
    ) -> Result<()> {
        tracing::info!("Starting interactive chat");

        let session = build_session(&config, provider_name.as_deref(), &settings)?;
        let mut rl = DefaultEditor::new()?;

        print_welcome_banner(&session, &settings);

        if let Some(question) = opening {
            println!("{} {}\n", prompt_label(&settings), question);
            send(&session, &question, &settings).await;
        }

        loop {
            match rl.readline(&prompt_label(&settings)) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    match parse_special_command(trimmed) {
                        Ok(SpecialCommand::Exit) => break,
                        Ok(SpecialCommand::Help) => {
                            print_help();
                            continue;
                        }
                        Ok(SpecialCommand::Clear) => {
                            match session.clear() {
                                Ok(()) => {
                                    println!("{}\n", "Conversation cleared.".green());
                                    if let Some(welcome) = session.snapshot().first() {
                                        print_message(welcome, &settings);
                                    }
                                }
                                Err(e) => eprintln!("{}\n", e.to_string().red()),
                            }
                            continue;
                        }
                        Ok(SpecialCommand::History) => {
                            print_history(&session.snapshot(), &settings);
                            continue;
                        }
                        Ok(SpecialCommand::ShowStatus) => {
                            print_status_display(&session);
                            continue;
                        }
                        Ok(SpecialCommand::ListSuggestions) => {
                            print_suggestions();
                            continue;
                        }
                        Ok(SpecialCommand::AskSuggestion(index)) => {
                            let question = SUGGESTED_QUESTIONS[index];
                            rl.add_history_entry(question)?;
                            println!("{} {}\n", prompt_label(&settings), question);
                            send(&session, question, &settings).await;
                            continue;
                        }
                        Ok(SpecialCommand::None) => {}
                        Err(e) => {
                            eprintln!("{}\n", e.to_string().red());
                            continue;
                        }
                    }

                    rl.add_history_entry(trimmed)?;
                    send(&session, trimmed, &settings).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    /// Ask a single question, print the reply, and return
    pub async fn ask_once(
        config: Config,
        provider_name: Option<String>,
        settings: Settings,
        question: &str,
    ) -> Result<()> {
        let session = build_session(&config, provider_name.as_deref(), &settings)?;
        if let Some(resolution) = session.submit(question).await? {
            print_resolution(&resolution, session.error().as_deref(), &settings);
        }
        Ok(())
    }

    async fn send(session: &ChatSession, text: &str, settings: &Settings) {
        match session.submit(text).await {
            Ok(Some(resolution)) => {
                print_resolution(&resolution, session.error().as_deref(), settings)
            }
            Ok(None) => {}
            Err(e) => eprintln!("{}\n", e.to_string().yellow()),
        }
    }

    fn prompt_label(settings: &Settings) -> String {
        "You>"
            .color(theme_color(settings.color_theme))
            .bold()
            .to_string()
    }

    /// Print an assistant reply and, if enabled, the session notice
    fn print_resolution(
        resolution: &Resolution,
        notice: Option<&str>,
        settings: &Settings,
    ) {
        print_message(&resolution.message, settings);
        if settings.notifications && resolution.source != ReplySource::Remote {
            if let Some(notice) = notice {
                println!("{}\n", notice.yellow());
            }
        }
    }

    fn print_message(message: &Message, settings: &Settings) {
        let label = match message.role {
            Role::User => "You".bold(),
            Role::Assistant => "Assistant".color(theme_color(settings.color_theme)).bold(),
        };
        if message.is_error {
            println!("{}: {}\n", label, message.content.red());
        } else {
            println!("{}: {}\n", label, message.content);
        }
    }

    fn print_history(messages: &[Message], settings: &Settings) {
        println!();
        for message in messages {
            print!(
                "{} ",
                format!("[{}]", message.timestamp.format("%H:%M:%S")).dimmed()
            );
            print_message(message, settings);
        }
    }

    fn print_suggestions() {
        println!("\n{}", "Suggested questions".bold());
        for (i, question) in SUGGESTED_QUESTIONS.iter().enumerate() {
            println!("  {}. {}", i + 1, question);
        }
        println!("\nType {} to ask one.\n", "/suggest <N>".cyan());
    }

    /// Display the welcome banner at the start of interactive chat
    fn print_welcome_banner(session: &ChatSession, settings: &Settings) {
        print_banner("Tax Assistant Chat - Welcome!", settings.color_theme);
        let model = session
            .provider_model()
            .unwrap_or_else(|| "built-in tax guide".to_string());
        println!("Provider: {} ({})", session.provider_name().cyan(), model);
        println!("Type '/help' for available commands, 'exit' to quit\n");
        if let Some(welcome) = session.snapshot().first() {
            print_message(welcome, settings);
        }
    }

    /// Display status information about the current session
    fn print_status_display(session: &ChatSession) {
        println!("\n{}", "Session Status".bold());
        println!("Provider:          {}", session.provider_name());
        println!(
            "Model:             {}",
            session.provider_model().unwrap_or_else(|| "-".to_string())
        );
        println!("Conversation Size: {} messages", session.len());
        println!(
            "Last Notice:       {}",
            session.error().unwrap_or_else(|| "none".to_string())
        );
        println!();
    }
}

// Landing screen
pub mod landing {
    //! Overview shown when no subcommand is given.

    use super::*;

    /// Features listed on the landing screen with the command that opens each
    pub const FEATURES: &[(&str, &str, &str)] = &[
        (
            "AI-Powered Chat",
            "Get instant answers to your tax questions with our intelligent tax assistant.",
            "taxwise chat",
        ),
        (
            "Tax Calculator",
            "Estimate your taxes from your income and number of dependents.",
            "taxwise calc --income <AMOUNT>",
        ),
        (
            "Information Hub",
            "Explore tax topics, find answers to common questions, and learn about important tax concepts.",
            "taxwise info",
        ),
        (
            "Settings",
            "Customize your tax assistant experience with these preferences.",
            "taxwise settings",
        ),
    ];

    /// Print the landing screen
    pub fn show_landing(settings: &Settings) {
        print_banner("Tax Assistant", settings.color_theme);
        println!(
            "Our AI-powered assistant provides personalized tax help for individuals and small businesses.\n"
        );
        for (title, description, command) in FEATURES {
            println!("{}", title.color(theme_color(settings.color_theme)).bold());
            println!("  {}", description);
            println!("  {}\n", command.cyan());
        }
    }
}
