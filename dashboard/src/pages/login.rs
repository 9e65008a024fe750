use std::ops::ControlFlow;

use anyhow::Result;
use shared::{LoginForm, Route};
use tracing::debug;

use super::read_field;
use crate::app::Navigation;
use crate::state::AppState;
use crate::terminal;

pub async fn mount(state: &AppState, prefill: Option<LoginForm>) -> Result<Navigation> {
    state.say("");
    state.say("== Login ==");
    state.say(format!("Type {} to create an account.", Route::Register));

    let mut prefill = prefill;
    loop {
        // A prefilled form keeps its remember flag; a typed one is asked.
        let ask_remember = prefill.is_none();
        let form = match fill(state, prefill.take().unwrap_or_default(), ask_remember).await? {
            ControlFlow::Continue(form) => form,
            ControlFlow::Break(next) => return Ok(next),
        };

        debug!("Submitting login for {}", form.username.trim());
        match state.forms.submit_login(&form).await {
            Ok(next) => {
                state.say("Login successful.");
                return Ok(Navigation::To(next));
            }
            Err(e) => {
                if let Some(message) = e.banner() {
                    state.say(terminal::error_banner(&message, state.color));
                }
            }
        }
    }
}

/// Prompt for whatever the form is still missing.
async fn fill(
    state: &AppState,
    mut form: LoginForm,
    ask_remember: bool,
) -> Result<ControlFlow<Navigation, LoginForm>> {
    if form.username.trim().is_empty() {
        match read_field(state, "Username: ", true).await? {
            ControlFlow::Continue(value) => form.username = value,
            ControlFlow::Break(next) => return Ok(ControlFlow::Break(next)),
        }
    }
    if form.password.is_empty() {
        match read_field(state, "Password: ", false).await? {
            ControlFlow::Continue(value) => form.password = value,
            ControlFlow::Break(next) => return Ok(ControlFlow::Break(next)),
        }
    }
    if ask_remember {
        match read_field(state, "Remember me? [y/N]: ", false).await? {
            ControlFlow::Continue(value) => form.remember = is_yes(&value),
            ControlFlow::Break(next) => return Ok(ControlFlow::Break(next)),
        }
    }
    Ok(ControlFlow::Continue(form))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
