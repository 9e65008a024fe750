use std::path::Path;

use anyhow::{Context, Result};
use askama::Template;
use chrono::{DateTime, Utc};

use crate::view::DashboardView;

/// Static HTML rendering of the dashboard, rewritten after every poll.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardReport<'a> {
    pub view: &'a DashboardView,
    pub generated_at: String,
    pub error: Option<&'a str>,
}

impl<'a> DashboardReport<'a> {
    pub fn new(view: &'a DashboardView, updated: DateTime<Utc>, error: Option<&'a str>) -> Self {
        Self {
            view,
            generated_at: updated.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            error,
        }
    }
}

/// Render and replace `path` in one step so a reader never sees a
/// half-written file.
pub fn write_report(path: &Path, report: &DashboardReport<'_>) -> Result<()> {
    let html = report.render().context("Failed to render dashboard report")?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create report directory {:?}", dir))?;
    }

    let tmp = path.with_extension("html.tmp");
    std::fs::write(&tmp, html).with_context(|| format!("Failed to write {:?}", tmp))?;
    std::fs::rename(&tmp, path).with_context(|| format!("Failed to move report into {:?}", path))?;

    tracing::debug!("Dashboard report written to {:?}", path);
    Ok(())
}
