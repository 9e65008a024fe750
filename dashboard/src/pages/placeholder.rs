//! Header destinations that have no page yet.

use anyhow::Result;
use shared::Route;

use super::{logout, parse_input, Input};
use crate::app::Navigation;
use crate::state::AppState;
use crate::terminal;

pub async fn mount(state: &AppState, route: Route) -> Result<Navigation> {
    state.say("");
    state.say(terminal::header(route));
    state.say(format!("{} is not available yet.", route.title()));

    loop {
        let Some(line) = state.prompt("> ").await? else {
            return Ok(Navigation::Exit);
        };
        match parse_input(&line) {
            Input::Navigate(next) => return Ok(next),
            Input::Logout => return Ok(logout(state).await),
            Input::Empty => {}
            Input::Unknown(command) => state.say(format!("Unknown command: {}", command)),
        }
    }
}
