//! Presentational mapping from a snapshot to table rows.
//!
//! Pure functions only: one row per input record, formatted text plus a
//! tone that the terminal and HTML renderers map to their own styling.

use crate::models::{DashboardSnapshot, OrderRecord, Position, Signal, SignalType};

pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Success,
    Danger,
    Warning,
    Info,
    Muted,
}

impl Tone {
    pub fn css_class(&self) -> &'static str {
        match self {
            Tone::Plain => "",
            Tone::Success => "text-success",
            Tone::Danger => "text-danger",
            Tone::Warning => "text-warning",
            Tone::Info => "text-info",
            Tone::Muted => "text-muted",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub tone: Tone,
}

impl Cell {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Plain)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignalRow {
    pub coin: String,
    pub link: String,
    pub price: Cell,
    pub strength: Cell,
    pub st_level: Cell,
    pub timeframe: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionRow {
    pub order_number: String,
    pub coin: String,
    pub link: String,
    pub timeframe: String,
    pub entry: Cell,
    pub current: Cell,
    pub profit: Cell,
    pub sl: Cell,
    pub targets: Cell,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    pub order_number: String,
    pub coin: String,
    pub link: String,
    pub timeframe: String,
    pub entry: Cell,
    pub exit: Cell,
    pub profit: Cell,
    pub reason: Cell,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignalTable {
    pub title: &'static str,
    pub kind: SignalType,
    pub rows: Vec<SignalRow>,
}

impl SignalTable {
    pub fn empty_message(&self) -> &'static str {
        match self.kind {
            SignalType::Buy => "No buy signals available",
            SignalType::Sell => "No sell signals available",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub buy: SignalTable,
    pub sell: SignalTable,
    pub scanned_coins: Vec<String>,
    pub positions: Vec<PositionRow>,
    pub history: Vec<HistoryRow>,
}

impl DashboardView {
    pub const NO_COINS: &'static str = "No coins scanned";
    pub const NO_POSITIONS: &'static str = "No open positions";
    pub const NO_HISTORY: &'static str = "No order history";

    pub fn from_snapshot(snapshot: &DashboardSnapshot) -> Self {
        Self {
            buy: SignalTable {
                title: "Buy Signals",
                kind: SignalType::Buy,
                rows: signal_rows(&snapshot.buy_signals, SignalType::Buy),
            },
            sell: SignalTable {
                title: "Sell Signals",
                kind: SignalType::Sell,
                rows: signal_rows(&snapshot.sell_signals, SignalType::Sell),
            },
            scanned_coins: snapshot.scanned_coins.clone(),
            positions: position_rows(&snapshot.open_positions),
            history: history_rows(&snapshot.order_history),
        }
    }

    pub fn signal_tables(&self) -> [&SignalTable; 2] {
        [&self.buy, &self.sell]
    }
}

pub fn signal_rows(signals: &[Signal], kind: SignalType) -> Vec<SignalRow> {
    let price_tone = match kind {
        SignalType::Buy => Tone::Success,
        SignalType::Sell => Tone::Danger,
    };

    signals
        .iter()
        .map(|signal| SignalRow {
            coin: signal.coin.clone(),
            link: signal.tradingview_url.clone(),
            price: Cell::new(signal.price.clone(), price_tone),
            strength: match signal.strength {
                Some(v) => Cell::plain(format!("{:.2}", v)),
                None => Cell::new(NOT_AVAILABLE, Tone::Muted),
            },
            st_level: Cell::new(signal.st_level.clone(), Tone::Muted),
            timeframe: signal.timeframe.clone(),
        })
        .collect()
}

pub fn position_rows(positions: &[Position]) -> Vec<PositionRow> {
    positions
        .iter()
        .map(|p| PositionRow {
            order_number: p.order_number.to_string(),
            coin: p.coin.clone(),
            link: p.tradingview_url.clone(),
            timeframe: p.timeframe.clone(),
            entry: Cell::new(format_price(p.entry_price), Tone::Info),
            current: match p.current_price {
                Some(v) => Cell::new(format_price(v), Tone::Info),
                None => Cell::new(NOT_AVAILABLE, Tone::Muted),
            },
            profit: profit_cell(p.profit_pct),
            sl: Cell::new(format_price(p.sl), Tone::Danger),
            targets: Cell::new(
                format!(
                    "{} / {} / {}",
                    format_price(p.tp1),
                    format_price(p.tp2),
                    format_price(p.tp3)
                ),
                Tone::Success,
            ),
            duration: p.duration.clone(),
        })
        .collect()
}

pub fn history_rows(orders: &[OrderRecord]) -> Vec<HistoryRow> {
    orders
        .iter()
        .map(|o| HistoryRow {
            order_number: o.order_number.to_string(),
            coin: o.coin.clone(),
            link: o.tradingview_url.clone(),
            timeframe: o.timeframe.clone(),
            entry: Cell::plain(format_price(o.entry_price)),
            exit: match o.exit_price {
                Some(v) => Cell::plain(format_price(v)),
                None => Cell::new(NOT_AVAILABLE, Tone::Muted),
            },
            profit: profit_cell(o.profit_pct),
            reason: Cell::new(o.exit_reason.clone(), exit_reason_tone(&o.exit_reason)),
            duration: o.duration.clone(),
        })
        .collect()
}

pub fn format_price(value: f64) -> String {
    format!("{:.4}", value)
}

/// Positive profit is a success, zero or negative a loss.
pub fn profit_cell(profit_pct: Option<f64>) -> Cell {
    match profit_pct {
        Some(p) if p > 0.0 => Cell::new(format!("{:.2}%", p), Tone::Success),
        Some(p) => Cell::new(format!("{:.2}%", p), Tone::Danger),
        None => Cell::new(NOT_AVAILABLE, Tone::Muted),
    }
}

pub fn exit_reason_tone(reason: &str) -> Tone {
    let reason = reason.to_lowercase();
    if reason.contains("tp") {
        Tone::Success
    } else if reason.contains("sl") {
        Tone::Danger
    } else {
        Tone::Warning
    }
}
