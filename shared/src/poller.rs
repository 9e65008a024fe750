//! Polling data source for the dashboard page.
//!
//! `spawn` is the page mount: it fetches immediately, then once per
//! interval. The returned [`PollHandle`] owns the task; stopping or dropping
//! it is the unmount and cancels the timer. A fetch racing the stop signal
//! is dropped, so nothing is published after unmount.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::client::ApiClient;
use crate::config::DEFAULT_POLL_INTERVAL_MS;
use crate::error::DashboardError;
use crate::models::DashboardSnapshot;
use crate::routes::Route;

/// `{data, loading, error}` as seen by the page, plus bookkeeping.
#[derive(Debug, Clone)]
pub struct PollState {
    pub data: Option<Arc<DashboardSnapshot>>,
    pub loading: bool,
    /// Stays set until the page is left.
    pub error: Option<String>,
    /// Completed fetches, successful or not.
    pub cycle: u64,
    pub last_updated: Option<DateTime<Utc>>,
    /// Set when the backend answered 401; the loop has already stopped.
    pub redirect: Option<Route>,
}

impl Default for PollState {
    fn default() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
            cycle: 0,
            last_updated: None,
            redirect: None,
        }
    }
}

pub struct PollingSource {
    client: ApiClient,
    interval: Duration,
}

impl PollingSource {
    /// A zero interval falls back to the default period.
    pub fn new(client: ApiClient, interval: Duration) -> Self {
        let interval = if interval.is_zero() {
            warn!(
                "Zero poll interval, using the default of {}ms",
                DEFAULT_POLL_INTERVAL_MS
            );
            Duration::from_millis(DEFAULT_POLL_INTERVAL_MS)
        } else {
            interval
        };
        Self { client, interval }
    }

    pub fn spawn(self) -> PollHandle {
        let (state_tx, state_rx) = watch::channel(PollState::default());
        let (stop_tx, stop_rx) = watch::channel(false);
        let task = tokio::spawn(self.run(state_tx, stop_rx));

        PollHandle {
            state: state_rx,
            stop: stop_tx,
            task: Some(task),
        }
    }

    async fn run(self, state: watch::Sender<PollState>, mut stop: watch::Receiver<bool>) {
        // Fetches run one after another inside this task, so a slow
        // response can never land on top of a newer one. Ticks missed
        // while a fetch is pending are skipped rather than bunched up.
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!("Polling dashboard every {:?}", self.interval);

        loop {
            tokio::select! {
                biased;
                _ = stop.changed() => break,
                _ = ticker.tick() => {}
            }

            let result = tokio::select! {
                biased;
                _ = stop.changed() => break,
                result = self.client.fetch_snapshot() => result,
            };

            match result {
                Ok(snapshot) => {
                    let snapshot = Arc::new(snapshot);
                    state.send_modify(|s| {
                        s.cycle += 1;
                        debug!(
                            "Poll cycle {}: {} buy / {} sell signals, {} open positions, {} orders",
                            s.cycle,
                            snapshot.buy_signals.len(),
                            snapshot.sell_signals.len(),
                            snapshot.open_positions.len(),
                            snapshot.order_history.len()
                        );
                        s.data = Some(snapshot);
                        s.loading = false;
                        s.last_updated = Some(Utc::now());
                    });
                }
                Err(DashboardError::AuthRequired) => {
                    info!("Dashboard returned 401, abandoning polling");
                    state.send_modify(|s| {
                        s.loading = false;
                        s.redirect = Some(Route::Login);
                    });
                    break;
                }
                Err(e) => {
                    warn!("Dashboard poll failed: {}", e);
                    state.send_modify(|s| {
                        s.cycle += 1;
                        s.error = Some(e.to_string());
                        s.loading = false;
                    });
                }
            }
        }

        debug!("Polling loop finished");
    }
}

pub struct PollHandle {
    state: watch::Receiver<PollState>,
    stop: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    pub fn subscribe(&self) -> watch::Receiver<PollState> {
        self.state.clone()
    }

    pub fn current(&self) -> PollState {
        self.state.borrow().clone()
    }

    /// Cancel the timer. Idempotent.
    pub fn stop(&self) {
        // Errors only when the loop already ended.
        let _ = self.stop.send(true);
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map(|t| t.is_finished()).unwrap_or(true)
    }

    /// Stop and wait for the poll task to exit.
    pub async fn shutdown(mut self) {
        self.stop();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("Poll task ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
