//! The protected dashboard page. Mounting it starts the poller; every way
//! out of the page goes through `PollHandle::shutdown`.

use anyhow::Result;
use chrono::{DateTime, Utc};
use shared::{write_report, DashboardReport, DashboardView, PollHandle, PollState, PollingSource, Route};
use tracing::{debug, warn};

use super::{logout, parse_input, Input};
use crate::app::Navigation;
use crate::state::AppState;
use crate::terminal;

pub async fn mount(state: &AppState) -> Result<Navigation> {
    let handle = PollingSource::new(state.client.clone(), state.config.poll_interval).spawn();
    let next = run(state, &handle).await;
    handle.shutdown().await;
    debug!("Dashboard unmounted");
    next
}

async fn run(state: &AppState, handle: &PollHandle) -> Result<Navigation> {
    let mut rx = handle.subscribe();
    let mut input = state.input().await;
    let mut reported: Option<DateTime<Utc>> = None;
    let mut polling = true;

    show(state, &handle.current(), &mut reported);

    loop {
        tokio::select! {
            changed = rx.changed(), if polling => {
                if changed.is_err() {
                    // Poll task ended without a redirect; keep serving commands.
                    polling = false;
                    continue;
                }
                let poll = rx.borrow_and_update().clone();
                if let Some(target) = poll.redirect {
                    return Ok(Navigation::To(target));
                }
                show(state, &poll, &mut reported);
            }
            line = input.next_line() => {
                let Some(line) = line? else {
                    return Ok(Navigation::Exit);
                };
                match parse_input(&line) {
                    Input::Navigate(next) => return Ok(next),
                    Input::Logout => return Ok(logout(state).await),
                    Input::Empty => {
                        show(state, &handle.current(), &mut reported);
                        if handle.is_finished() {
                            state.say(format!("Polling stopped. Open {} again to resume.", Route::Dashboard));
                        }
                    }
                    Input::Unknown(command) => state.say(format!("Unknown command: {}", command)),
                }
            }
        }
    }
}

/// Print the current state and refresh the HTML report when a new
/// snapshot arrived since the last write.
fn show(state: &AppState, poll: &PollState, reported: &mut Option<DateTime<Utc>>) {
    let color = state.color;
    let Some(snapshot) = &poll.data else {
        if poll.loading {
            state.say("Loading dashboard...");
        } else {
            state.say(terminal::render_empty(poll, color));
        }
        return;
    };

    let view = DashboardView::from_snapshot(snapshot);
    state.clear_screen();
    state.say(terminal::render(&view, poll, color));

    let (Some(path), Some(updated)) = (&state.config.html_report_path, poll.last_updated) else {
        return;
    };
    if *reported == Some(updated) {
        return;
    }
    let report = DashboardReport::new(&view, updated, poll.error.as_deref());
    match write_report(path, &report) {
        Ok(()) => *reported = Some(updated),
        Err(e) => warn!("Failed to write dashboard report: {:#}", e),
    }
}
