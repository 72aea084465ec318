//! Text rendering for quote tables, the watchlist and price history.
//!
//! Column layout of the comparison table is a stable output format:
//! ticker (8), name (32), price (12), change cell, market cap in billions.

use crate::application::quotes::QuoteBatch;
use crate::application::watchlist::{AddOutcome, RemoveOutcome};
use crate::cli::style::{Role, Theme};
use crate::domain::entities::price_series::PriceSeries;
use crate::domain::entities::quote_record::QuoteRecord;
use crate::domain::entities::watchlist::Watchlist;
use crate::domain::values::direction::Direction;
use crate::domain::values::symbol::Symbol;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;

const TABLE_WIDTH: usize = 90;
const LIST_WIDTH: usize = 50;
const SPARK_WIDTH: usize = 60;
const SPARK_BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// "November 29, 2025 at 02:30 PM"
pub fn format_timestamp<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    now.format("%B %d, %Y at %I:%M %p").to_string()
}

pub fn render_comparison<Tz: TimeZone>(
    records: &[QuoteRecord],
    now: &DateTime<Tz>,
    theme: &Theme,
) -> String
where
    Tz::Offset: Display,
{
    let header = format!(
        "{:<8} {:<30} {:<12} {:<22} {:<15}",
        "Ticker", "Company", "Price", "Change", "Market Cap"
    );
    let mut lines = vec![
        format!("Updated: {}", format_timestamp(now)),
        theme.rule('=', TABLE_WIDTH),
        theme.paint(Role::Heading, "Stock Dashboard - Multi-Stock Comparison"),
        theme.rule('=', TABLE_WIDTH),
        theme.bold(&header),
        "-".repeat(TABLE_WIDTH),
    ];
    lines.extend(records.iter().map(|record| render_row(record, theme)));
    lines.push(theme.rule('=', TABLE_WIDTH));
    lines.join("\n")
}

pub fn render_row(record: &QuoteRecord, theme: &Theme) -> String {
    let price = record
        .current_price()
        .map(|p| format!("{p:.2}"))
        .unwrap_or_else(|| "N/A".to_string());
    let change = format!(
        "{} $ {:<+6.2} ( {:>+6.2}%)",
        record.direction().glyph(),
        record.change(),
        record.percent_change()
    );
    format!(
        "{:<8}{:<32}{:<12}{}    ${:>6.1}B",
        record.symbol().as_str(),
        record.display_name(),
        price,
        theme.paint(record.direction().into(), &change),
        record.market_cap() / 1e9
    )
}

/// Per-symbol failures followed by the table, or the no-data message.
pub fn render_batch<Tz: TimeZone>(batch: &QuoteBatch, now: &DateTime<Tz>, theme: &Theme) -> String
where
    Tz::Offset: Display,
{
    let mut lines: Vec<String> = batch
        .failures
        .iter()
        .map(|failure| {
            let line = format!("Error fetching {}: {}", failure.symbol, failure.error);
            theme.paint(Role::Error, &line)
        })
        .collect();
    if batch.is_empty() {
        lines.push(theme.paint(Role::Error, "No valid stocks data found."));
    } else {
        lines.push(String::new());
        lines.push(render_comparison(&batch.records, now, theme));
    }
    lines.join("\n")
}

pub fn render_watchlist(watchlist: &Watchlist, theme: &Theme) -> String {
    if watchlist.is_empty() {
        return theme.paint(Role::Warning, "Your watchlist is empty!");
    }
    let mut lines = vec![
        theme.rule('=', LIST_WIDTH),
        theme.paint(Role::Heading, "Your Watchlist"),
        theme.rule('=', LIST_WIDTH),
    ];
    lines.extend(
        watchlist
            .symbols()
            .iter()
            .enumerate()
            .map(|(i, symbol)| format!("{}. {symbol}", i + 1)),
    );
    lines.push(theme.rule('=', LIST_WIDTH));
    lines.join("\n")
}

fn join(symbols: &[Symbol]) -> String {
    symbols
        .iter()
        .map(Symbol::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn render_add_outcome(outcome: &AddOutcome, theme: &Theme) -> String {
    let mut lines = Vec::new();
    if !outcome.added.is_empty() {
        lines.push(theme.paint(
            Role::Success,
            &format!("Added to watchlist: {}", join(&outcome.added)),
        ));
    }
    if !outcome.already_present.is_empty() {
        lines.push(theme.paint(
            Role::Warning,
            &format!("Already in watchlist: {}", join(&outcome.already_present)),
        ));
    }
    lines.join("\n")
}

pub fn render_remove_outcome(outcome: &RemoveOutcome, theme: &Theme) -> String {
    let mut lines = Vec::new();
    if !outcome.removed.is_empty() {
        lines.push(theme.paint(
            Role::Success,
            &format!("Removed from watchlist: {}", join(&outcome.removed)),
        ));
    }
    if !outcome.not_found.is_empty() {
        lines.push(theme.paint(
            Role::Warning,
            &format!("Not in watchlist: {}", join(&outcome.not_found)),
        ));
    }
    lines.join("\n")
}

pub fn render_history(series: &PriceSeries, theme: &Theme) -> String {
    let title = format!("{} - {} daily closes", series.symbol, series.period);
    let mut lines = vec![
        theme.rule('=', LIST_WIDTH),
        theme.paint(Role::Heading, &title),
        theme.rule('=', LIST_WIDTH),
        theme.bold(&format!("{:<12} {:>12}", "Date", "Close")),
    ];
    lines.extend(
        series
            .points
            .iter()
            .map(|point| format!("{:<12} {:>12.2}", point.date.format("%Y-%m-%d"), point.close)),
    );
    lines.push("-".repeat(LIST_WIDTH));

    if let Some(summary) = series.summary() {
        let direction = Direction::from_change(summary.change);
        let change = format!(
            "{} {:+.2} ({:+.2}%)",
            direction.glyph(),
            summary.change,
            summary.percent_change
        );
        lines.push(format!(
            "High {:.2}  Low {:.2}  {}",
            summary.high,
            summary.low,
            theme.paint(direction.into(), &change)
        ));
    }
    let closes: Vec<f64> = series.points.iter().map(|p| p.close).collect();
    lines.push(sparkline(&closes, SPARK_WIDTH));
    lines.push(theme.rule('=', LIST_WIDTH));
    lines.join("\n")
}

/// One-line bar chart of `values`, sampled down to at most `width` bars.
pub fn sparkline(values: &[f64], width: usize) -> String {
    if values.is_empty() || width == 0 {
        return String::new();
    }
    let sampled: Vec<f64> = if values.len() > width {
        (0..width).map(|i| values[i * values.len() / width]).collect()
    } else {
        values.to_vec()
    };

    let low = sampled.iter().cloned().fold(f64::MAX, f64::min);
    let high = sampled.iter().cloned().fold(f64::MIN, f64::max);
    let top = SPARK_BARS.len() - 1;

    sampled
        .iter()
        .map(|v| {
            if high <= low {
                SPARK_BARS[top / 2]
            } else {
                let idx = ((v - low) / (high - low) * top as f64).round() as usize;
                SPARK_BARS[idx.min(top)]
            }
        })
        .collect()
}
