use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use shared::{Config, LogFormat, LoginForm, RegisterForm, Route};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;
mod pages;
mod state;
mod terminal;

#[cfg(test)]
#[path = "../../shared/tests/common/mod.rs"]
mod mock_backend;

use crate::app::Prefill;
use crate::state::AppState;

#[derive(Parser, Debug)]
#[command(
    name = "freqdash",
    about = "Terminal client for the trading-signal dashboard",
    version
)]
struct Cli {
    /// Backend root, overrides API_BASE.
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Dashboard refresh period in milliseconds, overrides POLL_INTERVAL_MS.
    #[arg(long, global = true)]
    poll_interval_ms: Option<u64>,

    /// Also write an HTML report after every poll, overrides HTML_REPORT_PATH.
    #[arg(long, global = true)]
    html_report: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the navigation loop at ROUTE.
    Open {
        #[arg(default_value = "/")]
        route: String,
    },
    /// Submit the login form, then continue in the navigation loop.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        remember: bool,
    },
    /// Submit the registration form, then continue in the navigation loop.
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        confirm_password: Option<String>,
    },
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(api_base) = &self.api_base {
            config.api_base_url = api_base.clone();
        }
        if let Some(ms) = self.poll_interval_ms {
            config.poll_interval = std::time::Duration::from_millis(ms);
        }
        if let Some(path) = &self.html_report {
            config.html_report_path = Some(path.clone());
        }
    }
}

impl Command {
    /// First route to mount and the form values to submit there.
    fn start(self) -> Result<(Route, Option<Prefill>)> {
        match self {
            Command::Open { route } => {
                let route = Route::from_path(&route).ok_or_else(|| anyhow!("Unknown route '{}'", route))?;
                Ok((route, None))
            }
            Command::Login {
                username,
                password,
                remember,
            } => Ok((
                Route::Login,
                Some(Prefill::Login(LoginForm {
                    username,
                    password: password.unwrap_or_default(),
                    remember,
                })),
            )),
            Command::Register {
                username,
                password,
                confirm_password,
            } => Ok((
                Route::Register,
                Some(Prefill::Register(RegisterForm {
                    username,
                    password: password.unwrap_or_default(),
                    confirm_password: confirm_password.unwrap_or_default(),
                })),
            )),
        }
    }
}

fn init_tracing(format: LogFormat) {
    // Rendered pages own stdout; logs go to stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.with_target(false).init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Flags override the environment; only the merged result is checked.
    let mut config = Config::from_env();
    cli.apply(&mut config);
    config.validate()?;

    init_tracing(config.log_format);
    info!(
        "Starting freqdash against {} (poll every {:?})",
        config.api_base_url, config.poll_interval
    );

    let (start, prefill) = cli.command.start()?;
    let state = AppState::new(config)?;

    // Dropping the loop on Ctrl-C unmounts the current page, which stops
    // any running poller.
    tokio::select! {
        result = app::run(&state, start, prefill) => result?,
        _ = tokio::signal::ctrl_c() => info!("Interrupted, shutting down"),
    }

    info!("freqdash stopped");
    Ok(())
}
