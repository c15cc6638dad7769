// ============================================================================
// APP VIEW - Picks the top-level screen
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::state::{ActiveView, AppState};
use crate::views::auth::{render_login, render_register};
use crate::views::dashboard::render_dashboard;

pub fn render_app(state: &AppState) -> Result<Element, JsValue> {
    match state.active_view() {
        ActiveView::Login => render_login(state),
        ActiveView::Register => render_register(state),
        ActiveView::Dashboard => render_dashboard(state),
    }
}
