//! Error taxonomy shared by the guard, the poller and the auth forms.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// 401 (or a redirect to the login page). Handled by navigating to
    /// `/login`, never shown as a banner.
    #[error("authentication required")]
    AuthRequired,

    /// Network failure, non-2xx status or a body that does not decode.
    #[error("{0}")]
    RequestFailed(String),

    /// A client-side form check failed; no request was sent.
    #[error("{0}")]
    ValidationFailed(String),

    #[error("a submission is already in progress")]
    SubmissionInFlight,

    #[error("configuration error: {0}")]
    Config(String),
}

impl DashboardError {
    pub fn is_auth_required(&self) -> bool {
        matches!(self, DashboardError::AuthRequired)
    }

    /// Text for the inline error banner. `None` for errors that are handled
    /// by navigation instead.
    pub fn banner(&self) -> Option<String> {
        match self {
            DashboardError::AuthRequired => None,
            other => Some(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        if err.status() == Some(reqwest::StatusCode::UNAUTHORIZED) {
            return DashboardError::AuthRequired;
        }
        DashboardError::RequestFailed(err.to_string())
    }
}
