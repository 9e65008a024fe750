//! Login and registration forms.
//!
//! Validation runs before any request is built; a form that fails it never
//! reaches the network. [`AuthForms`] allows one submission in flight.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

use crate::client::ApiClient;
use crate::error::{DashboardError, Result};
use crate::models::Credentials;
use crate::routes::Route;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_USERNAME_LEN: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub remember: bool,
}

impl LoginForm {
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(DashboardError::ValidationFailed("Username is required".into()));
        }
        if self.password.is_empty() {
            return Err(DashboardError::ValidationFailed("Password is required".into()));
        }
        Ok(())
    }

    fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            remember: self.remember.then_some(true),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    /// Checks, in order: passwords match, username length, password length.
    pub fn validate(&self) -> Result<()> {
        if self.password != self.confirm_password {
            return Err(DashboardError::ValidationFailed("Passwords do not match".into()));
        }
        if self.username.trim().chars().count() < MIN_USERNAME_LEN {
            return Err(DashboardError::ValidationFailed(format!(
                "Username must be at least {} characters",
                MIN_USERNAME_LEN
            )));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DashboardError::ValidationFailed(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(())
    }

    fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            remember: None,
        }
    }
}

pub struct AuthForms {
    client: ApiClient,
    pending: AtomicBool,
}

impl AuthForms {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            pending: AtomicBool::new(false),
        }
    }

    /// True while a submission is waiting on the backend (submit disabled).
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    /// Returns the route to navigate to on success.
    pub async fn submit_login(&self, form: &LoginForm) -> Result<Route> {
        form.validate()?;
        let _guard = self.begin()?;

        let credentials = form.credentials();
        self.client.login(&credentials).await?;
        info!("User {} logged in", credentials.username);
        Ok(Route::Dashboard)
    }

    pub async fn submit_register(&self, form: &RegisterForm) -> Result<Route> {
        form.validate()?;
        let _guard = self.begin()?;

        let credentials = form.credentials();
        self.client.register(&credentials).await?;
        info!("User {} registered", credentials.username);
        Ok(Route::Login)
    }

    fn begin(&self) -> Result<PendingGuard<'_>> {
        if self
            .pending
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(DashboardError::SubmissionInFlight);
        }
        Ok(PendingGuard { flag: &self.pending })
    }
}

/// Clears the in-flight flag when the submission finishes or is dropped.
struct PendingGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
