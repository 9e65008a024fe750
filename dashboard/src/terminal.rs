//! Plain-text rendering of the dashboard view.

use std::fmt::Write;

use crossterm::style::{Color, Stylize};
use shared::view::{Cell, Tone};
use shared::{DashboardView, PollState, Route};

pub fn tone_color(tone: Tone) -> Option<Color> {
    match tone {
        Tone::Plain => None,
        Tone::Success => Some(Color::Green),
        Tone::Danger => Some(Color::Red),
        Tone::Warning => Some(Color::Yellow),
        Tone::Info => Some(Color::Cyan),
        Tone::Muted => Some(Color::DarkGrey),
    }
}

fn paint(text: &str, tone: Tone, color: bool) -> String {
    match tone_color(tone) {
        Some(c) if color => text.with(c).to_string(),
        _ => text.to_string(),
    }
}

fn plain(text: &str) -> Cell {
    Cell {
        text: text.to_string(),
        tone: Tone::Plain,
    }
}

/// Header links for protected pages; the active one is bracketed.
pub fn header(active: Route) -> String {
    let links: Vec<String> = Route::NAVIGATION
        .iter()
        .map(|route| {
            if *route == active {
                format!("[{}]", route.path())
            } else {
                route.path().to_string()
            }
        })
        .collect();
    format!("Trading Dashboard | {} | logout | q", links.join(" "))
}

pub fn error_banner(message: &str, color: bool) -> String {
    format!("{} {}", paint("Error:", Tone::Danger, color), message)
}

/// Header and banner for a page that has no data yet.
pub fn render_empty(poll: &PollState, color: bool) -> String {
    let mut out = String::new();
    push_header(&mut out, poll, color);
    out
}

pub fn render(view: &DashboardView, poll: &PollState, color: bool) -> String {
    let mut out = String::new();
    push_header(&mut out, poll, color);

    for table in view.signal_tables() {
        section(&mut out, table.title);
        if table.rows.is_empty() {
            empty(&mut out, table.empty_message(), color);
            continue;
        }
        let rows = table
            .rows
            .iter()
            .map(|row| {
                vec![
                    plain(&row.coin),
                    row.price.clone(),
                    row.strength.clone(),
                    row.st_level.clone(),
                    plain(&row.timeframe),
                ]
            })
            .collect();
        grid(&mut out, &["Coin", "Price", "Strength", "ST Level", "TF"], rows, color);
    }

    section(&mut out, &format!("Scanned Coins ({})", view.scanned_coins.len()));
    if view.scanned_coins.is_empty() {
        empty(&mut out, DashboardView::NO_COINS, color);
    } else {
        let _ = writeln!(out, "  {}", view.scanned_coins.join(", "));
    }

    section(&mut out, &format!("Open Positions ({})", view.positions.len()));
    if view.positions.is_empty() {
        empty(&mut out, DashboardView::NO_POSITIONS, color);
    } else {
        let rows = view
            .positions
            .iter()
            .map(|row| {
                vec![
                    plain(&row.order_number),
                    plain(&row.coin),
                    plain(&row.timeframe),
                    row.entry.clone(),
                    row.current.clone(),
                    row.profit.clone(),
                    row.sl.clone(),
                    row.targets.clone(),
                    plain(&row.duration),
                ]
            })
            .collect();
        grid(
            &mut out,
            &["#", "Coin", "TF", "Entry", "Current", "Profit", "SL", "TP1 / TP2 / TP3", "Duration"],
            rows,
            color,
        );
    }

    section(&mut out, "Order History");
    if view.history.is_empty() {
        empty(&mut out, DashboardView::NO_HISTORY, color);
    } else {
        let rows = view
            .history
            .iter()
            .map(|row| {
                vec![
                    plain(&row.order_number),
                    plain(&row.coin),
                    plain(&row.timeframe),
                    row.entry.clone(),
                    row.exit.clone(),
                    row.profit.clone(),
                    row.reason.clone(),
                    plain(&row.duration),
                ]
            })
            .collect();
        grid(
            &mut out,
            &["#", "Coin", "TF", "Entry", "Exit", "Profit", "Reason", "Duration"],
            rows,
            color,
        );
    }

    out
}

fn push_header(out: &mut String, poll: &PollState, color: bool) {
    let _ = writeln!(out, "{}", header(Route::Dashboard));
    if let Some(updated) = poll.last_updated {
        let _ = writeln!(out, "Last updated {}", updated.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    if let Some(message) = &poll.error {
        let _ = writeln!(out, "{}", error_banner(message, color));
    }
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}", title);
}

fn empty(out: &mut String, message: &str, color: bool) {
    let _ = writeln!(out, "  {}", paint(message, Tone::Muted, color));
}

/// Left-aligned columns sized to their widest cell. Widths come from the
/// unstyled text.
fn grid(out: &mut String, headers: &[&str], rows: Vec<Vec<Cell>>, color: bool) {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.text.chars().count());
        }
    }

    let line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{:<width$}", h, width = *w))
        .collect();
    let _ = writeln!(out, "  {}", line.join("  ").trim_end());

    for row in rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| {
                let pad = w.saturating_sub(cell.text.chars().count());
                format!("{}{}", paint(&cell.text, cell.tone, color), " ".repeat(pad))
            })
            .collect();
        let _ = writeln!(out, "  {}", line.join("  ").trim_end());
    }
}
