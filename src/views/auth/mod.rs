mod login_view;
mod register_view;

pub use login_view::*;
pub use register_view::*;

use wasm_bindgen::prelude::*;
use crate::state::{AppState, AuthRoute};
use crate::views::shared::{set_button_busy, update_message_line};

/// Refresh error/notice lines and the submit button without rebuilding the
/// form, so typed values survive
pub fn update_auth_messages(state: &AppState) -> Result<(), JsValue> {
    update_message_line(AUTH_ERROR_ID, state.auth.get_error().as_deref())?;
    update_message_line(AUTH_NOTICE_ID, state.auth.get_notice().as_deref())?;
    let (idle, busy) = match state.auth.get_route() {
        AuthRoute::Login => ("Login", "Logging in..."),
        AuthRoute::Register => ("Register", "Registering..."),
    };
    set_button_busy(AUTH_SUBMIT_ID, state.auth.get_loading(), idle, busy)
}
