pub mod dashboard;
pub mod home;
pub mod login;
pub mod placeholder;
pub mod register;

use std::ops::ControlFlow;

use anyhow::Result;
use shared::Route;
use tracing::warn;

use crate::app::Navigation;
use crate::state::AppState;

/// A command typed at a page prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Navigate(Navigation),
    Logout,
    Empty,
    Unknown(String),
}

pub fn parse_input(line: &str) -> Input {
    match line.trim() {
        "" => Input::Empty,
        "q" | "quit" | "exit" => Input::Navigate(Navigation::Exit),
        "logout" => Input::Logout,
        other => match Route::from_path(other) {
            Some(route) => Input::Navigate(Navigation::To(route)),
            None => Input::Unknown(other.to_string()),
        },
    }
}

/// Read one form field. With `allow_navigation`, a route path typed
/// instead of a value leaves the page. End of input exits.
pub async fn read_field(
    state: &AppState,
    label: &str,
    allow_navigation: bool,
) -> Result<ControlFlow<Navigation, String>> {
    let Some(line) = state.prompt(label).await? else {
        return Ok(ControlFlow::Break(Navigation::Exit));
    };

    if allow_navigation && line.trim().starts_with('/') {
        if let Some(route) = Route::from_path(&line) {
            return Ok(ControlFlow::Break(Navigation::To(route)));
        }
    }
    Ok(ControlFlow::Continue(line))
}

/// Clear the server session and go to the login page. A failed logout
/// request still navigates.
pub async fn logout(state: &AppState) -> Navigation {
    if let Err(e) = state.client.logout().await {
        warn!("Logout request failed: {}", e);
    }
    state.say("Logged out.");
    Navigation::To(Route::Login)
}
