// ============================================================================
// APP - Owns the root element and the application state
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::dom::{append_child, get_element_by_id, set_inner_html};
use crate::services::SessionStore;
use crate::state::{ActiveView, AppState, IncrementalUpdate, LoadStatus};
use crate::viewmodels::DashboardViewModel;
use crate::views::auth::update_auth_messages;
use crate::views::dashboard::update_pr_table;
use crate::views::pr_form::update_pr_form_status;
use crate::views::render_app;

pub struct App {
    state: AppState,
    root: Element,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app")
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let state = AppState::new(SessionStore::local());
        if state.session.is_logged_in() {
            log::info!("💾 [APP] Session restored for '{}'", state.session.display_name());
        }

        // Batch updates fired from the same tick into one DOM pass
        state.subscribe_to_changes(move |update_type| {
            use gloo_timers::callback::Timeout;
            Timeout::new(0, move || {
                crate::rerender_app_with_type(update_type);
            })
            .forget();
        });

        Ok(Self { state, root })
    }

    /// Full render of the active screen
    pub fn render(&mut self) -> Result<(), JsValue> {
        log::debug!("🎬 [APP] render {:?}", self.state.active_view());
        set_inner_html(&self.root, "");
        let view = render_app(&self.state)?;
        append_child(&self.root, &view)?;
        self.load_dashboard_if_needed();
        Ok(())
    }

    /// First fetch after login or on startup with a stored session
    fn load_dashboard_if_needed(&self) {
        if self.state.active_view() != ActiveView::Dashboard
            || self.state.dashboard.get_status() != LoadStatus::Idle
        {
            return;
        }
        self.state.dashboard.set_status(LoadStatus::Loading);
        let state = self.state.clone();
        spawn_local(async move {
            DashboardViewModel::new().refresh(&state).await;
        });
    }

    /// Update one region in place. Err means the region is not on the page
    /// and a full render is needed.
    pub fn update_incremental(&self, update_type: IncrementalUpdate) -> Result<(), JsValue> {
        match update_type {
            IncrementalUpdate::PrTable => update_pr_table(&self.state),
            IncrementalUpdate::PrForm => update_pr_form_status(&self.state),
            IncrementalUpdate::AuthMessages => update_auth_messages(&self.state),
        }
    }
}
