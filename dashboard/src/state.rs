use std::fmt::Display;
use std::io::Write;
use std::sync::PoisonError;

use anyhow::Result;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use crossterm::tty::IsTty;
use shared::{ApiClient, AuthForms, Config};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::sync::{Mutex, MutexGuard};
use tracing::warn;

pub type InputLines = Lines<Box<dyn AsyncBufRead + Unpin + Send>>;
pub type Output = Box<dyn Write + Send>;

/// Shared by every page. The HTTP client's cookie jar is the session.
pub struct AppState {
    pub config: Config,
    pub client: ApiClient,
    pub forms: AuthForms,
    /// Styled output and screen clearing; only on a terminal.
    pub color: bool,
    input: Mutex<InputLines>,
    output: std::sync::Mutex<Output>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let color = std::io::stdout().is_tty();
        Self::with_io(
            config,
            Box::new(BufReader::new(tokio::io::stdin())),
            Box::new(std::io::stdout()),
            color,
        )
    }

    pub fn with_io(
        config: Config,
        input: Box<dyn AsyncBufRead + Unpin + Send>,
        output: Output,
        color: bool,
    ) -> Result<Self> {
        let client = ApiClient::new(&config)?;
        tracing::info!("HTTP client ready for {}", client.base_url());

        Ok(AppState {
            forms: AuthForms::new(client.clone()),
            client,
            config,
            color,
            input: Mutex::new(input.lines()),
            output: std::sync::Mutex::new(output),
        })
    }

    fn output(&self) -> std::sync::MutexGuard<'_, Output> {
        self.output.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write one line to the page output.
    pub fn say(&self, text: impl Display) {
        let mut out = self.output();
        if let Err(e) = writeln!(out, "{}", text).and_then(|_| out.flush()) {
            warn!("Failed to write output: {}", e);
        }
    }

    /// Wipe the screen before a full redraw.
    pub fn clear_screen(&self) {
        if !self.color {
            return;
        }
        let mut out = self.output();
        if let Err(e) = queue!(out, Clear(ClearType::All), MoveTo(0, 0)).and_then(|_| out.flush()) {
            warn!("Failed to clear screen: {}", e);
        }
    }

    /// Print `label` and read one line. `None` at end of input.
    pub async fn prompt(&self, label: &str) -> Result<Option<String>> {
        {
            let mut out = self.output();
            write!(out, "{}", label)?;
            out.flush()?;
        }
        let line = self.input.lock().await.next_line().await?;
        Ok(line)
    }

    /// Exclusive access to the input for pages that read commands while
    /// other work is running.
    pub async fn input(&self) -> MutexGuard<'_, InputLines> {
        self.input.lock().await
    }
}
