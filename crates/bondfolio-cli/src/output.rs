//! Output formatting utilities.

use colored::Colorize;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use bondfolio_analytics::{SummaryField, SummaryUnit};
use bondfolio_core::Currency;

use crate::cli::OutputFormat;

/// Formats and prints output based on the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
        OutputFormat::Minimal => print_minimal(data),
    }
}

/// Prints a single serializable value.
pub fn print_single<T: Serialize>(data: &T, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table | OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
        OutputFormat::Minimal => {
            println!("{}", serde_json::to_string(data)?);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.serialize(data)?;
            wtr.flush()?;
        }
    }
    Ok(())
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
    Ok(())
}

/// Prints data as JSON.
fn print_json<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints minimal output (first value only).
fn print_minimal<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    if let Some(first) = data.first() {
        println!("{}", serde_json::to_string(first)?);
    }
    Ok(())
}

/// Rounds half away from zero and formats with exactly `dp` decimals.
///
/// Values a `Decimal` cannot hold (NaN, infinities, huge magnitudes) fall
/// back to plain float formatting.
pub fn format_fixed(value: f64, dp: u32) -> String {
    match Decimal::from_f64(value) {
        Some(d) => {
            let rounded = d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.prec$}", rounded, prec = dp as usize)
        }
        None => format!("{:.prec$}", value, prec = dp as usize),
    }
}

/// Formats a decimal rate as a percentage with four decimals.
pub fn format_percent(rate: f64) -> String {
    match Decimal::from_f64(rate) {
        Some(d) => {
            let pct = (d * dec!(100))
                .round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.4}%", pct)
        }
        None => format!("{:.4}%", rate * 100.0),
    }
}

/// Formats a money amount with the currency symbol and two decimals.
pub fn format_amount(value: f64, currency: Currency) -> String {
    format!("{} {}", currency.symbol(), format_fixed(value, 2))
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a key-value pair formatted as percentage.
    pub fn from_percent(key: impl Into<String>, rate: f64) -> Self {
        Self::new(key, format_percent(rate))
    }

    /// Creates a key-value pair formatted as a money amount.
    pub fn from_amount(key: impl Into<String>, value: f64, currency: Currency) -> Self {
        Self::new(key, format_amount(value, currency))
    }

    /// Formats one valuation summary field.
    pub fn from_summary(field: &SummaryField, currency: Currency) -> Self {
        match field.unit {
            SummaryUnit::Amount => Self::from_amount(field.label, field.value, currency),
            SummaryUnit::Percent => Self::from_percent(field.label, field.value),
            SummaryUnit::Years => {
                Self::new(field.label, format!("{} years", format_fixed(field.value, 4)))
            }
            SummaryUnit::Plain => Self::new(field.label, format_fixed(field.value, 4)),
        }
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}
