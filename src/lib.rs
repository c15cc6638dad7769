// ============================================================================
// PURCHASE REQUESTS PWA - RUST + WASM, MVVM
// ============================================================================
// - Views: functions that build DOM (no logic)
// - ViewModels: UI logic, generic over the PrBackend seam
// - Services: HTTP, storage, code generation, CSV download
// - State: Rc<RefCell> cells + change subscribers
// - Models: wire types and form drafts
// ============================================================================

mod app;
pub mod config;
mod dom;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
mod utils;
pub mod viewmodels;
mod views;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use crate::app::App;
use crate::config::CONFIG;
use crate::state::UpdateType;

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    if CONFIG.is_logging_enabled() {
        wasm_logger::init(wasm_logger::Config::default());
    }
    log::info!("🚀 [APP] Purchase Requests ({})", CONFIG.environment);
    log::info!("🔧 [APP] Backend: {}", CONFIG.backend_url());

    let mut app = App::new()?;
    app.render()?;

    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    Ok(())
}

/// Full re-render
pub fn rerender_app() {
    rerender_app_with_type(UpdateType::FullRender);
}

/// Apply a state change to the DOM
pub fn rerender_app_with_type(update_type: UpdateType) {
    APP.with(|app_cell| {
        let needs_full_render = match update_type {
            UpdateType::FullRender => true,
            UpdateType::Incremental(inc_type) => match app_cell.borrow().as_ref() {
                Some(app) => match app.update_incremental(inc_type) {
                    Ok(()) => false,
                    Err(e) => {
                        log::debug!("🔄 [APP] {:?} fell back to full render: {:?}", inc_type, e);
                        true
                    }
                },
                None => {
                    log::warn!("⚠️ [APP] Update before initialisation");
                    false
                }
            },
        };

        if needs_full_render {
            if let Some(app) = app_cell.borrow_mut().as_mut() {
                if let Err(e) = app.render() {
                    log::error!("❌ [APP] Render failed: {:?}", e);
                }
            }
        }
    });
}

/// Re-render from JavaScript
#[wasm_bindgen]
pub fn rerender_app_wasm() {
    rerender_app();
}
