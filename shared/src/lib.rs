pub mod client;
pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod poller;
pub mod routes;
pub mod session;
pub mod templates;
pub mod view;

pub use client::ApiClient;
pub use config::{Config, LogFormat};
pub use error::{DashboardError, Result};
pub use forms::{AuthForms, LoginForm, RegisterForm};
pub use models::*;
pub use poller::{PollHandle, PollState, PollingSource};
pub use routes::Route;
pub use session::{GuardState, SessionGuard};
pub use templates::{write_report, DashboardReport};
pub use view::DashboardView;
