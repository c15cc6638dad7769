// ============================================================================
// PR FORM VIEW - "New purchase request" overlay
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{
    append_child, event_target_value, on_change, on_click, on_input, on_submit, set_attribute, set_flag,
    ElementBuilder,
};
use crate::models::{Department, Location, PrField};
use crate::state::AppState;
use crate::viewmodels::{DashboardViewModel, PrFormViewModel};
use crate::views::shared::{labelled_input, labelled_select, message_line, set_button_busy, update_message_line};

const FORM_ERROR_ID: &str = "pr-form-error";
const FORM_SUBMIT_ID: &str = "pr-form-submit";
const SUBMIT_TEXT: &str = "Save PR";
const SUBMITTING_TEXT: &str = "Saving...";

pub fn render_pr_form(state: &AppState) -> Result<Element, JsValue> {
    log::debug!("🎬 [FORM] render_pr_form");
    let draft = state.form.get_draft();

    let overlay = ElementBuilder::new("div")?
        .class("modal-overlay")
        .build();

    let modal = ElementBuilder::new("div")?
        .class("modal pr-form-modal")
        .attr("role", "dialog")?
        .build();

    let title = ElementBuilder::new("h2")?
        .text("New Purchase Request")
        .build();

    let form = ElementBuilder::new("form")?
        .class("pr-form")
        .attr("novalidate", "")?
        .build();

    let (uprn_group, uprn) = labelled_input("pr-uprn", "UPRN", "text", "Project reference", &draft.uprn)?;
    bind_input(&uprn, state, PrField::Uprn)?;

    let locations: Vec<(&str, &str)> = Location::ALL.iter().map(|l| (l.key(), l.label())).collect();
    let (location_group, location) =
        labelled_select("pr-location", "Location", "Select location", &locations, &draft.location)?;
    bind_change(&location, state, PrField::Location)?;

    let departments: Vec<(&str, &str)> = Department::ALL.iter().map(|d| (d.key(), d.label())).collect();
    let (department_group, department) =
        labelled_select("pr-department", "Department", "Select department", &departments, &draft.department)?;
    bind_change(&department, state, PrField::Department)?;

    let (amount_group, amount) =
        labelled_input("pr-amount", "Estimated Amount (USD)", "number", "0", &draft.estimated_amount)?;
    set_attribute(&amount, "min", "0")?;
    set_attribute(&amount, "step", "any")?;
    bind_input(&amount, state, PrField::EstimatedAmount)?;

    let (requester_group, requester) = labelled_input("pr-requester", "Requester", "text", "", &draft.requester)?;
    set_flag(&requester, "readonly", true)?;

    let (date_group, date) = labelled_input("pr-date", "Date", "date", "", &draft.date)?;
    bind_change(&date, state, PrField::Date)?;

    let error = message_line(FORM_ERROR_ID, "form-error", state.form.get_error().as_deref())?;

    let cancel = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-secondary")
        .text("Cancel")
        .build();
    {
        let state = state.clone();
        on_click(&cancel, move |_| DashboardViewModel::new().close_form(&state))?;
    }

    let submitting = state.form.is_submitting();
    let submit = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .id(FORM_SUBMIT_ID)?
        .class("btn-primary")
        .text(if submitting { SUBMITTING_TEXT } else { SUBMIT_TEXT })
        .flag("disabled", submitting)?
        .build();

    {
        let state = state.clone();
        on_submit(&form, move || {
            let state = state.clone();
            spawn_local(async move {
                let today = chrono::Local::now().date_naive();
                // Errors are stored in PrFormState for the overlay to show
                let _ = PrFormViewModel::new().submit(&state, today).await;
            });
        })?;
    }

    let actions = ElementBuilder::new("div")?
        .class("form-actions")
        .child(cancel)?
        .child(submit)?
        .build();

    for group in [uprn_group, location_group, department_group, amount_group, requester_group, date_group] {
        append_child(&form, &group)?;
    }
    append_child(&form, &error)?;
    append_child(&form, &actions)?;

    append_child(&modal, &title)?;
    append_child(&modal, &form)?;
    append_child(&overlay, &modal)?;
    Ok(overlay)
}

/// Refresh the error line and submit button in place
pub fn update_pr_form_status(state: &AppState) -> Result<(), JsValue> {
    update_message_line(FORM_ERROR_ID, state.form.get_error().as_deref())?;
    set_button_busy(FORM_SUBMIT_ID, state.form.is_submitting(), SUBMIT_TEXT, SUBMITTING_TEXT)
}

// Draft edits do not notify: the inputs already show the value
fn bind_input(element: &Element, state: &AppState, field: PrField) -> Result<(), JsValue> {
    let state = state.clone();
    on_input(element, move |e| state.form.set_field(field, event_target_value(&e)))
}

fn bind_change(element: &Element, state: &AppState, field: PrField) -> Result<(), JsValue> {
    let state = state.clone();
    on_change(element, move |e| state.form.set_field(field, event_target_value(&e)))
}
