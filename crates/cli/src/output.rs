//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use estimator_lib::{CostRange, Level, Severity};
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Pretty-print any serializable value
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a rounded table, or a notice when there are no rows
pub fn print_table<T: Tabled>(rows: Vec<T>, empty_message: &str) {
    if rows.is_empty() {
        println!("{}", empty_message.yellow());
        return;
    }
    println!("{}", Table::new(rows).with(Style::rounded()));
}

/// Print a bold section title with an underline
pub fn print_header(title: &str) {
    println!("{}", title.bold());
    println!("{}", "=".repeat(60));
}

pub fn print_subheader(title: &str) {
    println!("{}", title.bold());
    println!("{}", "-".repeat(60));
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Whole dollars with thousands separators, e.g. `$12,345`
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}")
}

/// Compact dollars for large exposures, e.g. `$12.3K`, `$1.2M`
pub fn format_compact(amount: f64) -> String {
    let abs = amount.abs();
    if abs >= 1_000_000.0 {
        format!("${:.1}M", amount / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("${:.1}K", amount / 1_000.0)
    } else {
        format!("${:.0}", amount)
    }
}

/// `$low - $high`
pub fn format_range(range: &CostRange) -> String {
    format!("{} - {}", format_currency(range.low), format_currency(range.high))
}

pub fn format_compact_range(range: &CostRange) -> String {
    format!("{} - {}", format_compact(range.low), format_compact(range.high))
}

/// Fraction in `[0, 1]` as a percentage
pub fn format_share(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}

pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{:.0}h", hours)
    } else {
        format!("{:.1}h", hours)
    }
}

/// Color a severity label
pub fn color_severity(severity: Severity) -> String {
    let label = severity.as_str().to_uppercase();
    match severity {
        Severity::Critical => label.red().bold().to_string(),
        Severity::High => label.red().to_string(),
        Severity::Medium => label.yellow().to_string(),
        Severity::Low => label.normal().to_string(),
    }
}

/// Color an effort or risk label (lower is better)
pub fn color_level(level: Level) -> String {
    let label = level.to_string();
    match level {
        Level::Low => label.green().to_string(),
        Level::Medium => label.yellow().to_string(),
        Level::High => label.red().to_string(),
    }
}

/// Color a waste score in `[0, 100]`
pub fn color_waste(score: f64) -> String {
    let formatted = format!("{:.0}", score);
    if score > 70.0 {
        formatted.red().to_string()
    } else if score > 30.0 {
        formatted.yellow().to_string()
    } else {
        formatted.green().to_string()
    }
}
