//! In-process mock of the dashboard backend.
//!
//! Mirrors the real backend's contract: `GET /` needs the session cookie,
//! `POST /login` sets it, `POST /register` answers with `{message}` on
//! failure and `GET /logout` expires the cookie and redirects to login.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use shared::ApiClient;
use tokio::sync::watch;

pub const SESSION_COOKIE: &str = "session=test-session";
pub const USERNAME: &str = "alice";
pub const PASSWORD: &str = "secret1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardMode {
    /// 200 with the snapshot when the session cookie is present, else 401.
    RequireSession,
    /// 200 regardless of cookies.
    AlwaysOk,
    Unauthorized,
    ServerError,
    RedirectToLogin,
}

pub struct MockState {
    pub dashboard_hits: AtomicUsize,
    pub login_hits: AtomicUsize,
    pub register_hits: AtomicUsize,
    pub logout_hits: AtomicUsize,
    pub mode: Mutex<DashboardMode>,
    pub snapshot: Mutex<Value>,
    pub login_delay: Mutex<Duration>,
}

impl MockState {
    pub fn set_mode(&self, mode: DashboardMode) {
        *self.mode.lock().unwrap() = mode;
    }

    pub fn set_login_delay(&self, delay: Duration) {
        *self.login_delay.lock().unwrap() = delay;
    }

    pub fn dashboard_hits(&self) -> usize {
        self.dashboard_hits.load(Ordering::SeqCst)
    }

    pub fn login_hits(&self) -> usize {
        self.login_hits.load(Ordering::SeqCst)
    }

    pub fn register_hits(&self) -> usize {
        self.register_hits.load(Ordering::SeqCst)
    }
}

pub struct MockBackend {
    pub base_url: String,
    pub state: Arc<MockState>,
}

impl MockBackend {
    pub async fn start(mode: DashboardMode) -> Self {
        let state = Arc::new(MockState {
            dashboard_hits: AtomicUsize::new(0),
            login_hits: AtomicUsize::new(0),
            register_hits: AtomicUsize::new(0),
            logout_hits: AtomicUsize::new(0),
            mode: Mutex::new(mode),
            snapshot: Mutex::new(sample_snapshot()),
            login_delay: Mutex::new(Duration::ZERO),
        });

        let app = Router::new()
            .route("/", get(dashboard))
            .route("/login", post(login))
            .route("/register", post(register))
            .route("/logout", get(logout))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::with_timeout(self.base_url.clone(), Duration::from_secs(5)).unwrap()
    }
}

/// The example payload: two buy signals, one sell signal, three coins,
/// one open position and two closed orders.
pub fn sample_snapshot() -> Value {
    json!({
        "buy_signals": [
            {"coin": "BTC/USDT", "price": "50000.0000", "strength": 3, "st_level": "49000.0000",
             "timeframe": "15m", "tradingview_url": "https://www.tradingview.com/chart/?symbol=BINANCE:BTCUSDT&interval=15"},
            {"coin": "ETH/USDT", "price": "3000.0000", "strength": 2, "st_level": "2950.0000",
             "timeframe": "1h", "tradingview_url": "https://www.tradingview.com/chart/?symbol=BINANCE:ETHUSDT&interval=60"}
        ],
        "sell_signals": [
            {"coin": "SOL/USDT", "price": "150.0000", "strength": 1, "st_level": "155.0000",
             "timeframe": "5m", "tradingview_url": "https://www.tradingview.com/chart/?symbol=BINANCE:SOLUSDT&interval=5"}
        ],
        "scanned_coins": ["BTC/USDT", "ETH/USDT", "SOL/USDT"],
        "open_positions": [
            {"order_number": 1, "coin": "BTC", "entry_price": 50000, "current_price": 51000, "profit_pct": 2.0,
             "sl": 49000, "tp1": 51000, "tp2": 52000, "tp3": 53000, "duration": "2h", "timeframe": "15m",
             "tradingview_url": "https://www.tradingview.com/chart/?symbol=BINANCE:BTCUSDT&interval=15"}
        ],
        "order_history": [
            {"order_number": 10, "coin": "ETH", "entry_price": 2900, "exit_price": 3000, "profit_pct": 3.45,
             "exit_reason": "TP1", "duration": "6h", "timeframe": "1h", "tradingview_url": "https://www.tradingview.com/"},
            {"order_number": 11, "coin": "SOL", "entry_price": 160, "exit_price": null, "profit_pct": null,
             "exit_reason": "SL", "duration": "1h", "timeframe": "5m", "tradingview_url": "https://www.tradingview.com/"}
        ]
    })
}

/// Wait until the watched value satisfies `predicate`, failing the test
/// after a few seconds.
pub async fn wait_until<T, F>(rx: &mut watch::Receiver<T>, predicate: F) -> T
where
    T: Clone,
    F: FnMut(&T) -> bool,
{
    let value = tokio::time::timeout(Duration::from_secs(5), rx.wait_for(predicate))
        .await
        .expect("timed out waiting for state")
        .expect("state channel closed before condition was met");
    (*value).clone()
}

fn has_session(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.split(';').any(|c| c.trim() == SESSION_COOKIE))
}

async fn dashboard(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.dashboard_hits.fetch_add(1, Ordering::SeqCst);
    let mode = *state.mode.lock().unwrap();

    match mode {
        DashboardMode::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        DashboardMode::ServerError => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        DashboardMode::RedirectToLogin => {
            (StatusCode::FOUND, [(header::LOCATION, "/login")]).into_response()
        }
        DashboardMode::RequireSession if !has_session(&headers) => {
            StatusCode::UNAUTHORIZED.into_response()
        }
        _ => {
            let snapshot = state.snapshot.lock().unwrap().clone();
            Json(snapshot).into_response()
        }
    }
}

async fn login(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    state.login_hits.fetch_add(1, Ordering::SeqCst);
    let delay = *state.login_delay.lock().unwrap();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    if body["username"] == USERNAME && body["password"] == PASSWORD {
        (
            StatusCode::OK,
            [(header::SET_COOKIE, format!("{}; Path=/; HttpOnly", SESSION_COOKIE))],
            Json(json!({"success": true, "message": "Login successful"})),
        )
            .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "message": "Invalid username or password"})),
        )
            .into_response()
    }
}

async fn register(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    state.register_hits.fetch_add(1, Ordering::SeqCst);

    match body["username"].as_str() {
        Some("taken") => (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "message": "Username already exists"})),
        )
            .into_response(),
        Some("broken") => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        Some("closed") => (
            StatusCode::OK,
            Json(json!({"success": false, "message": "Registration is closed"})),
        )
            .into_response(),
        _ => (
            StatusCode::CREATED,
            Json(json!({"success": true, "message": "Registration successful"})),
        )
            .into_response(),
    }
}

async fn logout(State(state): State<Arc<MockState>>) -> Response {
    state.logout_hits.fetch_add(1, Ordering::SeqCst);
    (
        StatusCode::FOUND,
        [
            (header::SET_COOKIE, "session=; Path=/; Max-Age=0".to_string()),
            (header::LOCATION, "/login".to_string()),
        ],
    )
        .into_response()
}
