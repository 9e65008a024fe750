//! Navigation loop: one page mounted at a time.

use anyhow::Result;
use shared::{GuardState, LoginForm, RegisterForm, Route, SessionGuard};
use tracing::{debug, info_span, Instrument};
use uuid::Uuid;

use crate::pages;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    To(Route),
    Exit,
}

/// Form values handed to the first page mounted.
#[derive(Debug)]
pub enum Prefill {
    Login(LoginForm),
    Register(RegisterForm),
}

impl Prefill {
    fn into_login(self) -> Option<LoginForm> {
        match self {
            Prefill::Login(form) => Some(form),
            _ => None,
        }
    }

    fn into_register(self) -> Option<RegisterForm> {
        match self {
            Prefill::Register(form) => Some(form),
            _ => None,
        }
    }
}

pub async fn run(state: &AppState, start: Route, mut prefill: Option<Prefill>) -> Result<()> {
    let mut route = start;

    loop {
        let instance = Uuid::new_v4();
        let span = info_span!("page", route = %route, %instance);
        let next = mount(state, route, prefill.take()).instrument(span).await?;

        match next {
            Navigation::To(target) => {
                debug!("Navigating {} -> {}", route, target);
                route = target;
            }
            Navigation::Exit => return Ok(()),
        }
    }
}

async fn mount(state: &AppState, route: Route, prefill: Option<Prefill>) -> Result<Navigation> {
    if route.is_protected() {
        if let Some(placeholder) = GuardState::Pending.placeholder() {
            state.say(placeholder);
        }
        match SessionGuard::check(&state.client).await {
            guard if guard.may_render() => {}
            GuardState::Redirect(target) => return Ok(Navigation::To(target)),
            _ => return Ok(Navigation::To(Route::Login)),
        }
    }

    match route {
        Route::Home => pages::home::mount(state).await,
        Route::Login => pages::login::mount(state, prefill.and_then(Prefill::into_login)).await,
        Route::Register => {
            pages::register::mount(state, prefill.and_then(Prefill::into_register)).await
        }
        Route::Dashboard => pages::dashboard::mount(state).await,
        other => pages::placeholder::mount(state, other).await,
    }
}
