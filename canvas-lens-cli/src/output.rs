//! Output rendering: pretty JSON or tabled tables.

use chrono::{DateTime, Utc};
use colored::Colorize;
use is_terminal::IsTerminal;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::error::{CliError, CliResult};
use crate::exit_codes::EXIT_ERROR;

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::from_error(e, EXIT_ERROR))?;
    println!("{json}");
    Ok(())
}

/// Print rows as a table, or a placeholder message when there are none.
pub fn print_table<R: Tabled>(rows: Vec<R>, empty_message: &str) {
    if rows.is_empty() {
        if std::io::stdout().is_terminal() {
            println!("{}", empty_message.dimmed());
        } else {
            println!("{empty_message}");
        }
        return;
    }

    let mut table = Table::new(rows);
    table.with(Style::modern());
    println!("{table}");
}

/// Print a section header before a table.
pub fn print_header(title: &str) {
    if std::io::stdout().is_terminal() {
        println!("{}", title.bold());
    } else {
        println!("{title}");
    }
}

/// Render an optional timestamp as a local-free `YYYY-MM-DD HH:MM`, or a
/// dash when absent.
pub fn format_date(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(date) => date.format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

/// Render an optional score, or a dash when ungraded.
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(score) => format!("{score:.1}"),
        None => "-".to_string(),
    }
}

/// Render optional points.
pub fn format_points(points: Option<f64>) -> String {
    match points {
        Some(points) => format!("{points:.0}"),
        None => "-".to_string(),
    }
}

/// Yes/no marker for boolean columns.
pub fn check_mark(value: bool) -> String {
    if value { "yes" } else { "no" }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_render_compact_or_dash() {
        let date: DateTime<Utc> = "2024-03-04T23:59:00Z".parse().unwrap();
        assert_eq!(format_date(Some(date)), "2024-03-04 23:59");
        assert_eq!(format_date(None), "-");
    }

    #[test]
    fn scores_and_points_render_with_fixed_precision() {
        assert_eq!(format_score(Some(17.25)), "17.2");
        assert_eq!(format_score(None), "-");
        assert_eq!(format_points(Some(20.0)), "20");
    }
}
