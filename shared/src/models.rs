use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{DashboardError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalType {
    Buy,
    Sell,
}

impl SignalType {
    pub fn label(&self) -> &'static str {
        match self {
            SignalType::Buy => "BUY",
            SignalType::Sell => "SELL",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub coin: String,
    /// Pre-formatted by the backend ("50000.0000"); numbers are formatted on decode.
    #[serde(deserialize_with = "display_string")]
    pub price: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub strength: Option<f64>,
    #[serde(deserialize_with = "display_string")]
    pub st_level: String,
    pub timeframe: String,
    pub tradingview_url: String,
    /// Not sent by every backend version; filled from the list the signal
    /// arrived in when missing.
    #[serde(default)]
    pub signal_type: Option<SignalType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub order_number: i64,
    pub coin: String,
    pub entry_price: f64,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub profit_pct: Option<f64>,
    pub sl: f64,
    pub tp1: f64,
    pub tp2: f64,
    pub tp3: f64,
    pub duration: String,
    /// Older backends leave this out of positions and orders.
    #[serde(default = "not_available")]
    pub timeframe: String,
    pub tradingview_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_number: i64,
    pub coin: String,
    pub entry_price: f64,
    #[serde(default)]
    pub exit_price: Option<f64>,
    #[serde(default)]
    pub profit_pct: Option<f64>,
    pub exit_reason: String,
    pub duration: String,
    #[serde(default = "not_available")]
    pub timeframe: String,
    pub tradingview_url: String,
}

/// One complete dashboard payload. Never mutated after decode; each poll
/// replaces it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub buy_signals: Vec<Signal>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sell_signals: Vec<Signal>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub scanned_coins: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub open_positions: Vec<Position>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub order_history: Vec<OrderRecord>,
}

impl DashboardSnapshot {
    /// Decode and validate a payload from the dashboard endpoint.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        let mut snapshot: DashboardSnapshot = serde_json::from_slice(body).map_err(|e| {
            DashboardError::RequestFailed(format!("Invalid dashboard data: {}", e))
        })?;

        for signal in snapshot.buy_signals.iter_mut() {
            signal.signal_type.get_or_insert(SignalType::Buy);
        }
        for signal in snapshot.sell_signals.iter_mut() {
            signal.signal_type.get_or_insert(SignalType::Sell);
        }

        Ok(snapshot)
    }
}

/// Login / register request body.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remember: Option<bool>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("remember", &self.remember)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

fn not_available() -> String {
    "N/A".to_string()
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn display_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n
            .as_f64()
            .map(|v| format!("{:.4}", v))
            .unwrap_or_else(|| n.to_string())),
        Value::Null => Ok("N/A".to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(value.filter(|v| v.is_finite()))
}
