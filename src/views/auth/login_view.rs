// ============================================================================
// LOGIN VIEW
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{append_child, field_value, on_click, on_submit, ElementBuilder};
use crate::state::AppState;
use crate::viewmodels::AuthViewModel;
use crate::views::shared::{labelled_input, message_line};

pub const AUTH_ERROR_ID: &str = "auth-error";
pub const AUTH_NOTICE_ID: &str = "auth-notice";
pub const AUTH_SUBMIT_ID: &str = "auth-submit";

const EMAIL_ID: &str = "login-email";
const PASSWORD_ID: &str = "login-password";

pub fn render_login(state: &AppState) -> Result<Element, JsValue> {
    log::debug!("🎬 [AUTH] render_login");

    let screen = ElementBuilder::new("div")?
        .class("auth-screen")
        .build();

    let container = ElementBuilder::new("div")?
        .class("auth-container")
        .build();

    let title = ElementBuilder::new("h1")?
        .text("Purchase Requests")
        .build();

    let subtitle = ElementBuilder::new("p")?
        .class("auth-subtitle")
        .text("Sign in to continue")
        .build();

    let form = ElementBuilder::new("form")?
        .class("auth-form")
        .attr("novalidate", "")?
        .build();

    let (email_group, _) = labelled_input(EMAIL_ID, "Email", "email", "you@example.org", "")?;
    let (password_group, _) = labelled_input(PASSWORD_ID, "Password", "password", "Password", "")?;

    let error = message_line(AUTH_ERROR_ID, "auth-error", state.auth.get_error().as_deref())?;
    let notice = message_line(AUTH_NOTICE_ID, "auth-notice", state.auth.get_notice().as_deref())?;

    let submit = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .id(AUTH_SUBMIT_ID)?
        .class("btn-primary")
        .text(if state.auth.get_loading() { "Logging in..." } else { "Login" })
        .flag("disabled", state.auth.get_loading())?
        .build();

    {
        let state = state.clone();
        on_submit(&form, move || {
            if state.auth.get_loading() {
                return;
            }
            let email = field_value(EMAIL_ID);
            let password = field_value(PASSWORD_ID);
            let state = state.clone();
            spawn_local(async move {
                // Outcome is already stored in AuthState
                let _ = AuthViewModel::new().login(&state, &email, &password).await;
            });
        })?;
    }

    let switch = ElementBuilder::new("p")?
        .class("auth-switch")
        .text("Don't have an account? ")
        .build();
    let register_link = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-link")
        .text("Register")
        .build();
    {
        let state = state.clone();
        on_click(&register_link, move |_| state.show_register())?;
    }
    append_child(&switch, &register_link)?;

    append_child(&form, &email_group)?;
    append_child(&form, &password_group)?;
    append_child(&form, &error)?;
    append_child(&form, &notice)?;
    append_child(&form, &submit)?;

    append_child(&container, &title)?;
    append_child(&container, &subtitle)?;
    append_child(&container, &form)?;
    append_child(&container, &switch)?;
    append_child(&screen, &container)?;

    Ok(screen)
}
