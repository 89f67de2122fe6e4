use crate::cli::SettingsCommand;
use crate::commands::print_banner;
use crate::error::Result;
use crate::settings::{SettingKey, Settings, SettingsManager};
use colored::Colorize;
use prettytable::{format, row, Table};

/// Notice shown under the settings table
pub const DATA_USAGE_NOTICE: &str = "This application doesn't store your personal tax \
information. Only these preferences are saved locally, and your data isn't sent anywhere \
except when you chat with the AI assistant.";

/// Handle settings commands
pub fn handle_settings(
    manager: &mut SettingsManager,
    command: Option<SettingsCommand>,
) -> Result<()> {
    match command.unwrap_or(SettingsCommand::Show) {
        SettingsCommand::Show => {
            print_banner("Application Settings", manager.settings().color_theme);
            settings_table(manager.settings()).printstd();
            println!();
            println!("{}\n", DATA_USAGE_NOTICE.dimmed());
            println!(
                "Use {} to change a setting.\n",
                "taxwise settings set <KEY> <VALUE>".cyan()
            );
        }
        SettingsCommand::Set { key, value } => {
            let key: SettingKey = key.parse()?;
            let settings = manager.update(key, &value)?;
            println!(
                "{}",
                format!("Updated {} = {}", key, settings.value_of(key)).green()
            );
        }
        SettingsCommand::Reset => {
            manager.reset()?;
            println!("{}", "Settings restored to defaults.".green());
        }
    }

    Ok(())
}

/// Table of every setting with its current value and allowed values
pub fn settings_table(settings: &Settings) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(row![
        "Key".bold(),
        "Setting".bold(),
        "Value".bold(),
        "Options".bold()
    ]);
    for key in SettingKey::ALL {
        table.add_row(row![
            key.as_str().cyan(),
            key.label(),
            settings.value_of(key),
            options_for(key, settings)
        ]);
    }
    table
}

fn options_for(key: SettingKey, settings: &Settings) -> String {
    match key {
        SettingKey::DarkMode | SettingKey::Notifications => "true | false".to_string(),
        SettingKey::VerbosityLevel => format!(
            "low | medium | high ({})",
            settings.verbosity_level.description()
        ),
        SettingKey::ColorTheme => "blue | green | neutral".to_string(),
        SettingKey::PreferredCalculationMethod => format!(
            "standard | itemized ({})",
            settings.preferred_calculation_method.description()
        ),
    }
}
