//! Information hub screen

use crate::commands::{chat, print_banner, theme_color};
use crate::config::Config;
use crate::error::Result;
use crate::info_hub::{self, TopicMatch, CATEGORIES, FAQS, RESOURCES};
use crate::settings::Settings;
use colored::Colorize;
use prettytable::{format, row, Table};

/// Message shown when a search finds nothing
pub const NO_RESULTS: &str =
    "No results found. Try different keywords or check out our categories below.";

/// Handle the info command
///
/// With `ask`, opens a chat seeded with a question about that topic. With
/// `search`, lists matching topics before the categories. With `faq`, lists
/// the frequently asked questions instead of the categories.
pub async fn handle_info(
    config: Config,
    settings: Settings,
    search: Option<String>,
    faq: bool,
    ask: Option<String>,
) -> Result<()> {
    if let Some(topic) = ask {
        let name = info_hub::find_topic(&topic)
            .map(|m| m.topic.name.to_string())
            .unwrap_or(topic);
        tracing::info!(topic = %name, "Opening chat about topic");
        let prompt = info_hub::ask_about_prompt(&name);
        return chat::run_chat(config, None, settings, Some(prompt)).await;
    }

    print_banner("Tax Information Hub", settings.color_theme);

    if let Some(query) = search.as_deref() {
        print_search_results(query, &info_hub::search_topics(query));
    }

    if faq {
        print_faqs(&settings);
    } else {
        print_categories(&settings);
        print_resources();
    }

    println!(
        "Use {} to ask the assistant about a topic.\n",
        "taxwise info --ask \"<topic>\"".cyan()
    );
    Ok(())
}

fn print_search_results(query: &str, matches: &[TopicMatch]) {
    println!(
        "{}",
        format!("Search Results for \"{}\" ({})", query.trim(), matches.len()).bold()
    );
    if matches.is_empty() {
        println!("{}\n", NO_RESULTS.yellow());
        return;
    }
    search_table(matches).printstd();
    println!();
}

/// Table of search matches
pub fn search_table(matches: &[TopicMatch]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(row!["Topic".bold(), "Description".bold(), "Category".bold()]);
    for m in matches {
        table.add_row(row![m.topic.name.cyan(), m.topic.description, m.category]);
    }
    table
}

fn print_categories(settings: &Settings) {
    for category in CATEGORIES {
        println!(
            "{}",
            category
                .title
                .color(theme_color(settings.color_theme))
                .bold()
        );
        for topic in category.topics {
            println!("  {} - {}", topic.name, topic.description.dimmed());
        }
        println!();
    }
}

fn print_faqs(settings: &Settings) {
    println!("{}\n", "Frequently Asked Questions".bold());
    for (i, faq) in FAQS.iter().enumerate() {
        println!(
            "{}",
            format!("{}. {}", i + 1, faq.question)
                .color(theme_color(settings.color_theme))
                .bold()
        );
        println!("   {}\n", faq.answer);
    }
}

fn print_resources() {
    println!("{}", "Educational Resources".bold());
    for resource in RESOURCES {
        println!("  {} - {}", resource.title, resource.description.dimmed());
    }
    println!();
}
