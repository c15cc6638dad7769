// ============================================================================
// FORM FIELDS - Labelled inputs and message lines shared by the screens
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, get_element_by_id, set_attribute, set_flag, set_text_content, ElementBuilder};

/// `<div class="form-group"><label/><input/></div>`, returns (group, input)
pub fn labelled_input(
    id: &str,
    label_text: &str,
    input_type: &str,
    placeholder: &str,
    value: &str,
) -> Result<(Element, Element), JsValue> {
    let group = ElementBuilder::new("div")?
        .class("form-group")
        .build();

    let label = ElementBuilder::new("label")?
        .attr("for", id)?
        .text(label_text)
        .build();

    let input = ElementBuilder::new("input")?
        .class("form-input")
        .attr("type", input_type)?
        .attr("id", id)?
        .attr("name", id)?
        .attr("placeholder", placeholder)?
        .attr("value", value)?
        .build();

    append_child(&group, &label)?;
    append_child(&group, &input)?;
    Ok((group, input))
}

/// `<select>` with a blank first option and `(value, text)` choices
pub fn labelled_select(
    id: &str,
    label_text: &str,
    blank_text: &str,
    choices: &[(&str, &str)],
    selected: &str,
) -> Result<(Element, Element), JsValue> {
    let group = ElementBuilder::new("div")?
        .class("form-group")
        .build();

    let label = ElementBuilder::new("label")?
        .attr("for", id)?
        .text(label_text)
        .build();

    let select = ElementBuilder::new("select")?
        .class("form-input")
        .attr("id", id)?
        .attr("name", id)?
        .build();

    let blank = ElementBuilder::new("option")?
        .attr("value", "")?
        .text(blank_text)
        .flag("selected", selected.is_empty())?
        .build();
    append_child(&select, &blank)?;

    for (value, text) in choices {
        let option = ElementBuilder::new("option")?
            .attr("value", value)?
            .text(text)
            .flag("selected", *value == selected)?
            .build();
        append_child(&select, &option)?;
    }

    append_child(&group, &label)?;
    append_child(&group, &select)?;
    Ok((group, select))
}

/// Message paragraph, hidden while empty
pub fn message_line(id: &str, class: &str, text: Option<&str>) -> Result<Element, JsValue> {
    let line = ElementBuilder::new("p")?
        .class(class)
        .id(id)?
        .build();
    fill_message(&line, text)?;
    Ok(line)
}

/// Refresh a message line in place. Err when it is not on the page.
pub fn update_message_line(id: &str, text: Option<&str>) -> Result<(), JsValue> {
    let line = get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str("Message line not found, needs full render"))?;
    fill_message(&line, text)
}

fn fill_message(line: &Element, text: Option<&str>) -> Result<(), JsValue> {
    let text = text.unwrap_or_default();
    set_text_content(line, text);
    set_flag(line, "hidden", text.is_empty())
}

/// Busy state of a submit button
pub fn set_button_busy(id: &str, busy: bool, idle_text: &str, busy_text: &str) -> Result<(), JsValue> {
    let button = get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str("Button not found, needs full render"))?;
    set_text_content(&button, if busy { busy_text } else { idle_text });
    set_flag(&button, "disabled", busy)?;
    set_attribute(&button, "aria-busy", if busy { "true" } else { "false" })
}
