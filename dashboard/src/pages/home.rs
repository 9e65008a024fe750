use anyhow::Result;
use shared::Route;

use super::{parse_input, Input};
use crate::app::Navigation;
use crate::state::AppState;

pub async fn mount(state: &AppState) -> Result<Navigation> {
    state.say("");
    state.say(format!("Trading signal dashboard at {}", state.client.base_url()));
    for route in [Route::Login, Route::Register, Route::Dashboard] {
        state.say(format!("  {:<12} {}", route.path(), route.title()));
    }
    state.say(format!("  {:<12} Quit", "q"));

    loop {
        let Some(line) = state.prompt("> ").await? else {
            return Ok(Navigation::Exit);
        };
        match parse_input(&line) {
            Input::Navigate(next) => return Ok(next),
            Input::Empty => {}
            Input::Logout | Input::Unknown(_) => state.say(format!("Unknown command: {}", line.trim())),
        }
    }
}
