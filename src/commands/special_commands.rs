//! Special commands parser for interactive chat
//!
//! Commands are prefixed with `/` and are case-insensitive. `exit` and
//! `quit` are accepted without the prefix. Anything else is a question for
//! the assistant.

use crate::chat::session::SUGGESTED_QUESTIONS;
use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },
}

/// Special commands that can be executed during interactive chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Display help information
    Help,

    /// Reset the conversation to the welcome message
    Clear,

    /// Print the conversation so far
    History,

    /// Show provider, model, and conversation state
    ShowStatus,

    /// List the suggested starter questions
    ListSuggestions,

    /// Ask the suggested question with this zero-based index
    AskSuggestion(usize),

    /// Exit the interactive session
    Exit,

    /// Not a special command; send the input to the assistant
    None,
}

/// Parse a user input string into a special command
///
/// # Errors
///
/// Returns `CommandError::UnknownCommand` if input starts with "/" but is not
/// a known command, and `CommandError::UnsupportedArgument` for a bad
/// `/suggest` index.
///
/// # Examples
///
/// ```
/// use taxwise::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// assert_eq!(parse_special_command("/clear").unwrap(), SpecialCommand::Clear);
/// assert_eq!(parse_special_command("QUIT").unwrap(), SpecialCommand::Exit);
/// assert_eq!(
///     parse_special_command("/suggest 2").unwrap(),
///     SpecialCommand::AskSuggestion(1)
/// );
/// assert_eq!(
///     parse_special_command("what is a W-2?").unwrap(),
///     SpecialCommand::None
/// );
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if !trimmed.starts_with('/') && lower != "exit" && lower != "quit" {
        return Ok(SpecialCommand::None);
    }

    match lower.as_str() {
        "exit" | "quit" | "/exit" | "/quit" => Ok(SpecialCommand::Exit),
        "/help" | "/?" => Ok(SpecialCommand::Help),
        "/clear" | "/new" => Ok(SpecialCommand::Clear),
        "/history" => Ok(SpecialCommand::History),
        "/status" => Ok(SpecialCommand::ShowStatus),
        "/suggest" | "/suggestions" => Ok(SpecialCommand::ListSuggestions),
        input if input.starts_with("/suggest ") => {
            let arg = input["/suggest ".len()..].trim();
            match arg.parse::<usize>() {
                Ok(n) if (1..=SUGGESTED_QUESTIONS.len()).contains(&n) => {
                    Ok(SpecialCommand::AskSuggestion(n - 1))
                }
                _ => Err(CommandError::UnsupportedArgument {
                    command: "/suggest".to_string(),
                    arg: arg.to_string(),
                }),
            }
        }
        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

/// Print help for the interactive chat commands
pub fn print_help() {
    use colored::Colorize;

    println!("\n{}", "Chat commands".bold());
    println!("  {}            Show this help", "/help".cyan());
    println!(
        "  {}           Start over from the welcome message",
        "/clear".cyan()
    );
    println!("  {}         Show the conversation so far", "/history".cyan());
    println!(
        "  {}          Show provider and session status",
        "/status".cyan()
    );
    println!(
        "  {}         List suggested questions",
        "/suggest".cyan()
    );
    println!(
        "  {}     Ask suggested question N (1-{})",
        "/suggest <N>".cyan(),
        SUGGESTED_QUESTIONS.len()
    );
    println!("  {}      Leave the chat", "exit | quit".cyan());
    println!("\nAnything else is sent to the assistant.\n");
}
