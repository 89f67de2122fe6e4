use crate::calculator::{compute_tax, parse_income, FilingStatus, TaxEstimate};
use crate::commands::{print_banner, theme_color};
use crate::error::Result;
use crate::settings::Settings;
use colored::Colorize;
use prettytable::{format, row, Table};

/// Note printed under every estimate
pub const DISCLAIMER: &str = "This is a simplified flat-rate estimate (15% of income less \
$2,000 per dependent). Real tax liability depends on brackets, deductions, and credits.";

/// Handle the calculator command
///
/// `income` is the raw argument text; `$` and thousands separators are
/// accepted.
pub fn handle_calc(
    income: &str,
    dependents: u32,
    filing_status: FilingStatus,
    settings: &Settings,
) -> Result<()> {
    let income = parse_income(income)?;
    let estimate = compute_tax(income, dependents)?.rounded();
    tracing::debug!(income, dependents, %filing_status, "Computed tax estimate");

    print_banner("Simple Tax Calculator", settings.color_theme);
    estimate_table(income, dependents, filing_status, &estimate).printstd();
    println!();
    println!(
        "{} {} ({})",
        "Calculation method:".bold(),
        settings.preferred_calculation_method,
        settings.preferred_calculation_method.description()
    );
    println!(
        "{}\n",
        format!("Take-home pay: ${:.2}", estimate.take_home)
            .color(theme_color(settings.color_theme))
            .bold()
    );
    println!("{}\n", DISCLAIMER.dimmed());
    Ok(())
}

/// Build the result table for an estimate
pub fn estimate_table(
    income: f64,
    dependents: u32,
    filing_status: FilingStatus,
    estimate: &TaxEstimate,
) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.add_row(row!["Annual income", format!("${:.2}", income)]);
    table.add_row(row!["Filing status", filing_status]);
    table.add_row(row!["Dependents", dependents]);
    table.add_row(row!["Estimated tax", format!("${:.2}", estimate.tax)]);
    table.add_row(row!["Effective rate", format!("{:.2}%", estimate.effective_rate)]);
    table.add_row(row!["Take-home", format!("${:.2}", estimate.take_home)]);
    table
}
