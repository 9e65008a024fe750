//! HTTP client for the dashboard backend.
//!
//! The session lives in the client's cookie jar: `login` stores the cookie
//! the backend sets and every later request sends it back. Clones share
//! the same jar.

use std::time::Duration;

use reqwest::header::{ACCEPT, LOCATION};
use reqwest::{redirect, Response, StatusCode};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{DashboardError, Result};
use crate::models::{AuthResponse, Credentials, DashboardSnapshot};

const DASHBOARD_FETCH_FAILED: &str = "Failed to fetch dashboard data";
const LOGIN_FAILED: &str = "Invalid credentials";
const REGISTER_FAILED: &str = "Registration failed";

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_timeout(config.api_base_url.clone(), config.request_timeout)
    }

    pub fn with_timeout(base_url: String, timeout: Duration) -> Result<Self> {
        // Redirects are not followed: a protected endpoint that bounces to
        // the login page must be seen as "not authenticated".
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .timeout(timeout)
            .build()
            .map_err(|e| DashboardError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// One credentialed GET to the backend root. Only the status matters.
    pub async fn check_session(&self) -> Result<()> {
        let response = self
            .client
            .get(self.endpoint("/"))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        if requires_auth(&response) {
            return Err(DashboardError::AuthRequired);
        }
        if !response.status().is_success() {
            return Err(DashboardError::RequestFailed(format!(
                "Session check failed with status {}",
                response.status()
            )));
        }
        Ok(())
    }

    pub async fn fetch_snapshot(&self) -> Result<DashboardSnapshot> {
        let response = self
            .client
            .get(self.endpoint("/"))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        if requires_auth(&response) {
            return Err(DashboardError::AuthRequired);
        }
        if !response.status().is_success() {
            warn!("Dashboard endpoint returned {}", response.status());
            return Err(DashboardError::RequestFailed(DASHBOARD_FETCH_FAILED.to_string()));
        }

        let body = response.bytes().await?;
        debug!("Fetched dashboard payload ({} bytes)", body.len());
        DashboardSnapshot::from_json(&body)
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse> {
        self.post_credentials("/login", credentials, LOGIN_FAILED).await
    }

    pub async fn register(&self, credentials: &Credentials) -> Result<AuthResponse> {
        let body = Credentials {
            remember: None,
            ..credentials.clone()
        };
        self.post_credentials("/register", &body, REGISTER_FAILED).await
    }

    /// Clears the server-side session. The backend answers with a redirect,
    /// so any status is accepted.
    pub async fn logout(&self) -> Result<()> {
        let response = self.client.get(self.endpoint("/logout")).send().await?;
        debug!("Logout returned {}", response.status());
        Ok(())
    }

    async fn post_credentials(
        &self,
        path: &str,
        credentials: &Credentials,
        fallback: &str,
    ) -> Result<AuthResponse> {
        let response = self
            .client
            .post(self.endpoint(path))
            .header(ACCEPT, "application/json")
            .json(credentials)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let parsed = serde_json::from_str::<AuthResponse>(&text);

        if !status.is_success() {
            let message = parsed
                .ok()
                .and_then(|r| r.message)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string());
            warn!("POST {} failed with {}: {}", path, status, message);
            return Err(DashboardError::RequestFailed(message));
        }

        match parsed {
            Ok(body) if body.success == Some(false) => {
                let message = body
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| fallback.to_string());
                warn!("POST {} answered {} with success=false: {}", path, status, message);
                Err(DashboardError::RequestFailed(message))
            }
            Ok(body) => Ok(body),
            Err(e) => {
                debug!("POST {} succeeded with a non-JSON body: {}", path, e);
                Ok(AuthResponse::default())
            }
        }
    }
}

/// 401, or a redirect whose target is the login page.
fn requires_auth(response: &Response) -> bool {
    if response.status() == StatusCode::UNAUTHORIZED {
        return true;
    }
    response.status().is_redirection()
        && response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(is_login_location)
            .unwrap_or(false)
}

fn is_login_location(location: &str) -> bool {
    let path = location.split(['?', '#']).next().unwrap_or_default();
    path.trim_end_matches('/').ends_with("/login")
}
