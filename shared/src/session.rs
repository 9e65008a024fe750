//! Session guard for protected pages.
//!
//! Every protected page runs its own check on entry; the result is never
//! cached between navigations.

use tracing::{info, warn};

use crate::client::ApiClient;
use crate::error::DashboardError;
use crate::routes::Route;

pub const LOADING_PLACEHOLDER: &str = "Loading...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    /// Check in flight; render the placeholder only.
    Pending,
    Authenticated,
    /// Not authenticated; render nothing and navigate.
    Redirect(Route),
}

impl GuardState {
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            GuardState::Pending => Some(LOADING_PLACEHOLDER),
            _ => None,
        }
    }

    pub fn may_render(&self) -> bool {
        matches!(self, GuardState::Authenticated)
    }
}

pub struct SessionGuard;

impl SessionGuard {
    /// One check, no retry. Anything other than a 2xx from the backend root
    /// sends the visitor to the login page.
    pub async fn check(client: &ApiClient) -> GuardState {
        match client.check_session().await {
            Ok(()) => GuardState::Authenticated,
            Err(DashboardError::AuthRequired) => {
                info!("Session not authenticated, redirecting to {}", Route::Login);
                GuardState::Redirect(Route::Login)
            }
            Err(e) => {
                warn!("Session check failed ({}), redirecting to {}", e, Route::Login);
                GuardState::Redirect(Route::Login)
            }
        }
    }
}
