use std::ops::ControlFlow;

use anyhow::Result;
use shared::forms::MIN_PASSWORD_LEN;
use shared::{RegisterForm, Route};

use super::read_field;
use crate::app::Navigation;
use crate::state::AppState;
use crate::terminal;

pub async fn mount(state: &AppState, prefill: Option<RegisterForm>) -> Result<Navigation> {
    state.say("");
    state.say("== Register ==");
    state.say(format!(
        "Passwords need at least {} characters. Type {} if you already have an account.",
        MIN_PASSWORD_LEN,
        Route::Login
    ));

    let mut prefill = prefill;
    loop {
        let form = match fill(state, prefill.take().unwrap_or_default()).await? {
            ControlFlow::Continue(form) => form,
            ControlFlow::Break(next) => return Ok(next),
        };

        match state.forms.submit_register(&form).await {
            Ok(next) => {
                state.say("Registration successful. Please log in.");
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

async fn fill(state: &AppState, mut form: RegisterForm) -> Result<ControlFlow<Navigation, RegisterForm>> {
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
    if form.confirm_password.is_empty() {
        match read_field(state, "Confirm password: ", false).await? {
            ControlFlow::Continue(value) => form.confirm_password = value,
            ControlFlow::Break(next) => return Ok(ControlFlow::Break(next)),
        }
    }
    Ok(ControlFlow::Continue(form))
}
