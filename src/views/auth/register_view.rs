// ============================================================================
// REGISTER VIEW
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{append_child, field_value, on_click, on_submit, ElementBuilder};
use crate::state::AppState;
use crate::viewmodels::auth_viewmodel::RegistrationInput;
use crate::viewmodels::AuthViewModel;
use crate::views::auth::{AUTH_ERROR_ID, AUTH_NOTICE_ID, AUTH_SUBMIT_ID};
use crate::views::shared::{labelled_input, message_line};

const NAME_ID: &str = "register-name";
const EMAIL_ID: &str = "register-email";
const PASSWORD_ID: &str = "register-password";
const CONFIRM_ID: &str = "register-confirm";

pub fn render_register(state: &AppState) -> Result<Element, JsValue> {
    log::debug!("🎬 [AUTH] render_register");

    let screen = ElementBuilder::new("div")?
        .class("auth-screen")
        .build();

    let container = ElementBuilder::new("div")?
        .class("auth-container")
        .build();

    let title = ElementBuilder::new("h1")?
        .text("Create an account")
        .build();

    let form = ElementBuilder::new("form")?
        .class("auth-form")
        .attr("novalidate", "")?
        .build();

    let (name_group, _) = labelled_input(NAME_ID, "Full name", "text", "Your name", "")?;
    let (email_group, _) = labelled_input(EMAIL_ID, "Email", "email", "you@example.org", "")?;
    let (password_group, _) =
        labelled_input(PASSWORD_ID, "Password", "password", "At least 6 characters, letters and numbers", "")?;
    let (confirm_group, _) = labelled_input(CONFIRM_ID, "Confirm password", "password", "Repeat password", "")?;

    let error = message_line(AUTH_ERROR_ID, "auth-error", state.auth.get_error().as_deref())?;
    let notice = message_line(AUTH_NOTICE_ID, "auth-notice", state.auth.get_notice().as_deref())?;

    let submit = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .id(AUTH_SUBMIT_ID)?
        .class("btn-primary")
        .text(if state.auth.get_loading() { "Registering..." } else { "Register" })
        .flag("disabled", state.auth.get_loading())?
        .build();

    {
        let state = state.clone();
        on_submit(&form, move || {
            if state.auth.get_loading() {
                return;
            }
            let input = RegistrationInput {
                name: field_value(NAME_ID),
                email: field_value(EMAIL_ID),
                password: field_value(PASSWORD_ID),
                confirm_password: field_value(CONFIRM_ID),
            };
            let state = state.clone();
            spawn_local(async move {
                let _ = AuthViewModel::new().register(&state, &input).await;
            });
        })?;
    }

    let switch = ElementBuilder::new("p")?
        .class("auth-switch")
        .text("Already have an account? ")
        .build();
    let login_link = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-link")
        .text("Back to login")
        .build();
    {
        let state = state.clone();
        on_click(&login_link, move |_| state.show_login())?;
    }
    append_child(&switch, &login_link)?;

    append_child(&form, &name_group)?;
    append_child(&form, &email_group)?;
    append_child(&form, &password_group)?;
    append_child(&form, &confirm_group)?;
    append_child(&form, &error)?;
    append_child(&form, &notice)?;
    append_child(&form, &submit)?;

    append_child(&container, &title)?;
    append_child(&container, &form)?;
    append_child(&container, &switch)?;
    append_child(&screen, &container)?;

    Ok(screen)
}
