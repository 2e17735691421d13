//! Output formatting utilities.

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

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

/// Prints a single serialisable value as pretty JSON.
pub fn print_json_value<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
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
    print_json_value(data)
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

/// Formats a money amount.
pub fn format_money(value: f64) -> String {
    format!("{:.2}", value)
}

/// Formats a decimal rate as a percentage string.
pub fn format_rate(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

/// Formats a value already in percent.
pub fn format_pct(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Formats an optional figure, `n/a` when absent.
pub fn format_opt<T>(value: Option<T>, fmt: impl Fn(T) -> String) -> String {
    value.map_or_else(|| "n/a".to_string(), fmt)
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
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

    /// Creates a key-value pair from a money amount.
    pub fn money(key: impl Into<String>, value: f64) -> Self {
        Self::new(key, format_money(value))
    }

    /// Creates a key-value pair from a decimal rate.
    pub fn rate(key: impl Into<String>, rate: f64) -> Self {
        Self::new(key, format_rate(rate))
    }
}

/// Prints key-value rows; in table mode under a header unless `quiet`.
pub fn print_key_values(
    title: &str,
    rows: &[KeyValue],
    format: OutputFormat,
    quiet: bool,
) -> anyhow::Result<()> {
    if format == OutputFormat::Table && !quiet {
        print_header(title);
    }
    print_output(rows, format)
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}
