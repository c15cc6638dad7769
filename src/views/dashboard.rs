// ============================================================================
// DASHBOARD VIEW - Header, filters, PR table, pagination, "+" button
// ============================================================================
// The table section has its own id so list updates replace only that
// subtree; the filter inputs keep focus while the user types.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::config::CONFIG;
use crate::dom::{
    append_child, event_target_value, get_element_by_id, on_change, on_click, on_input, set_attribute,
    set_inner_html, ElementBuilder,
};
use crate::models::{Department, FilterField, Location, PurchaseRequest};
use crate::services::export_service::download_csv;
use crate::state::{AppState, LoadStatus};
use crate::viewmodels::DashboardViewModel;
use crate::views::pr_form::render_pr_form;
use crate::views::shared::{labelled_input, labelled_select};

const TABLE_SECTION_ID: &str = "pr-table-section";
const COLUMNS: [&str; 7] = ["Code", "Department", "Location", "Requester", "Estimated Amount", "UPRN", "Date"];
const EMPTY_MESSAGE: &str = "No purchase requests found.";

pub fn render_dashboard(state: &AppState) -> Result<Element, JsValue> {
    log::debug!("🎬 [DASHBOARD] render_dashboard");

    let screen = ElementBuilder::new("div")?
        .class("dashboard")
        .build();

    append_child(&screen, &render_header(state)?)?;

    if let Some(code) = state.form.get_last_code() {
        let notice = ElementBuilder::new("p")?
            .class("dashboard-notice")
            .text(&format!("Purchase request {} submitted.", code))
            .build();
        append_child(&screen, &notice)?;
    }

    append_child(&screen, &render_filters(state)?)?;

    let section = ElementBuilder::new("section")?
        .class("pr-table-section")
        .id(TABLE_SECTION_ID)?
        .build();
    fill_table_section(&section, state)?;
    append_child(&screen, &section)?;

    let fab = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-fab")
        .attr("aria-label", "New purchase request")?
        .text("+")
        .build();
    {
        let state = state.clone();
        on_click(&fab, move |_| DashboardViewModel::new().open_form(&state))?;
    }
    append_child(&screen, &fab)?;

    if state.dashboard.is_form_open() {
        append_child(&screen, &render_pr_form(state)?)?;
    }

    Ok(screen)
}

/// Rebuild only the table section
pub fn update_pr_table(state: &AppState) -> Result<(), JsValue> {
    let section = get_element_by_id(TABLE_SECTION_ID)
        .ok_or_else(|| JsValue::from_str("PR table not found, needs full render"))?;
    set_inner_html(&section, "");
    fill_table_section(&section, state)
}

fn render_header(state: &AppState) -> Result<Element, JsValue> {
    let header = ElementBuilder::new("header")?
        .class("dashboard-header")
        .build();

    let title = ElementBuilder::new("h1")?
        .text("Purchase Requests")
        .build();

    let name = state.session.display_name();
    let welcome = ElementBuilder::new("span")?
        .class("welcome")
        .text(&if name.is_empty() { "Welcome".to_string() } else { format!("Welcome, {}", name) })
        .build();

    let export = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-secondary")
        .text("Export CSV")
        .build();
    {
        let state = state.clone();
        on_click(&export, move |_| {
            let state = state.clone();
            spawn_local(async move {
                if let Ok(bytes) = DashboardViewModel::new().export_csv(&state).await {
                    if let Err(e) = download_csv(&bytes) {
                        log::error!("❌ [DASHBOARD] Could not save CSV: {:?}", e);
                    }
                }
            });
        })?;
    }

    let logout = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-secondary")
        .text("Logout")
        .build();
    {
        let state = state.clone();
        on_click(&logout, move |_| state.logout())?;
    }

    let actions = ElementBuilder::new("div")?
        .class("header-actions")
        .child(welcome)?
        .child(export)?
        .child(logout)?
        .build();

    append_child(&header, &title)?;
    append_child(&header, &actions)?;
    Ok(header)
}

fn render_filters(state: &AppState) -> Result<Element, JsValue> {
    let filters = state.dashboard.get_filters();
    let bar = ElementBuilder::new("div")?
        .class("filters-bar")
        .build();

    let departments: Vec<(&str, &str)> = Department::ALL.iter().map(|d| (d.key(), d.label())).collect();
    let (department_group, department) =
        labelled_select("filter-department", "Department", "All departments", &departments, &filters.department)?;
    filter_on_change(&department, state, FilterField::Department)?;

    let locations: Vec<(&str, &str)> = Location::ALL.iter().map(|l| (l.key(), l.label())).collect();
    let (location_group, location) =
        labelled_select("filter-location", "Location", "All locations", &locations, &filters.location)?;
    filter_on_change(&location, state, FilterField::Location)?;

    // One pending refresh shared by both text filters
    let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));

    let (requester_group, requester) =
        labelled_input("filter-requester", "Requester", "text", "Requester", &filters.requester)?;
    filter_on_input(&requester, state, FilterField::Requester, pending.clone())?;

    let (search_group, search) =
        labelled_input("filter-search", "Search", "search", "Code, UPRN or requester", &filters.search)?;
    filter_on_input(&search, state, FilterField::Search, pending)?;

    append_child(&bar, &department_group)?;
    append_child(&bar, &location_group)?;
    append_child(&bar, &requester_group)?;
    append_child(&bar, &search_group)?;
    Ok(bar)
}

/// Selects apply immediately
fn filter_on_change(select: &Element, state: &AppState, field: FilterField) -> Result<(), JsValue> {
    let state = state.clone();
    on_change(select, move |e| {
        let value = event_target_value(&e);
        let state = state.clone();
        spawn_local(async move {
            DashboardViewModel::new().set_filter(&state, field, &value).await;
        });
    })
}

/// Text filters are stored on every keystroke and fetched after a pause
fn filter_on_input(
    input: &Element,
    state: &AppState,
    field: FilterField,
    pending: Rc<RefCell<Option<Timeout>>>,
) -> Result<(), JsValue> {
    let state = state.clone();
    on_input(input, move |e| {
        let value = event_target_value(&e);
        if !DashboardViewModel::new().update_filter(&state, field, &value) {
            return;
        }
        let state = state.clone();
        // Replacing the handle cancels the previous timer
        *pending.borrow_mut() = Some(Timeout::new(CONFIG.dashboard.filter_debounce_ms, move || {
            spawn_local(async move {
                DashboardViewModel::new().refresh(&state).await;
            });
        }));
    })
}

fn fill_table_section(section: &Element, state: &AppState) -> Result<(), JsValue> {
    match state.dashboard.get_status() {
        LoadStatus::Loading => {
            let loading = ElementBuilder::new("p")?
                .class("table-status")
                .text("Loading purchase requests...")
                .build();
            append_child(section, &loading)?;
        }
        LoadStatus::Failed(message) => {
            let error = ElementBuilder::new("p")?
                .class("table-error")
                .text(&message)
                .build();
            append_child(section, &error)?;
        }
        LoadStatus::Idle | LoadStatus::Populated => {}
    }

    append_child(section, &render_table(state)?)?;
    append_child(section, &render_pagination(state)?)?;
    Ok(())
}

fn render_table(state: &AppState) -> Result<Element, JsValue> {
    let table = ElementBuilder::new("table")?
        .class("pr-table")
        .build();

    let head_row = create_row("th", &COLUMNS)?;
    let thead = ElementBuilder::new("thead")?
        .child(head_row)?
        .build();

    let tbody = ElementBuilder::new("tbody")?.build();
    let prs = state.dashboard.get_prs();
    if prs.is_empty() && !state.dashboard.is_loading() {
        let cell = ElementBuilder::new("td")?
            .class("empty-row")
            .attr("colspan", &COLUMNS.len().to_string())?
            .text(EMPTY_MESSAGE)
            .build();
        let row = ElementBuilder::new("tr")?
            .child(cell)?
            .build();
        append_child(&tbody, &row)?;
    }
    for pr in &prs {
        append_child(&tbody, &render_row(pr)?)?;
    }

    append_child(&table, &thead)?;
    append_child(&table, &tbody)?;
    Ok(table)
}

fn render_row(pr: &PurchaseRequest) -> Result<Element, JsValue> {
    let department = Department::from_key(&pr.department)
        .map(|d| d.label().to_string())
        .unwrap_or_else(|| pr.department.clone());
    let location = Location::from_key(&pr.location)
        .map(|l| l.label().to_string())
        .unwrap_or_else(|| pr.location.clone());
    let amount = pr.display_amount();
    let date = pr.display_date();

    let row = create_row(
        "td",
        &[
            pr.code.as_str(),
            department.as_str(),
            location.as_str(),
            pr.requester.as_str(),
            amount.as_str(),
            pr.uprn.as_str(),
            date.as_str(),
        ],
    )?;
    if let Some(id) = &pr.id {
        set_attribute(&row, "data-id", id)?;
    }
    Ok(row)
}

fn create_row(cell_tag: &str, cells: &[&str]) -> Result<Element, JsValue> {
    let row = ElementBuilder::new("tr")?.build();
    for text in cells {
        let cell = ElementBuilder::new(cell_tag)?
            .text(text)
            .build();
        append_child(&row, &cell)?;
    }
    Ok(row)
}

fn render_pagination(state: &AppState) -> Result<Element, JsValue> {
    let pagination = state.dashboard.get_pagination();
    let busy = state.dashboard.is_loading();

    let prev = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-page")
        .text("Prev")
        .flag("disabled", busy || !pagination.can_prev())?
        .build();
    {
        let state = state.clone();
        on_click(&prev, move |_| {
            let state = state.clone();
            spawn_local(async move {
                DashboardViewModel::new().prev_page(&state).await;
            });
        })?;
    }

    let label = ElementBuilder::new("span")?
        .class("page-label")
        .text(&pagination.label())
        .build();

    let next = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-page")
        .text("Next")
        .flag("disabled", busy || !pagination.can_next())?
        .build();
    {
        let state = state.clone();
        on_click(&next, move |_| {
            let state = state.clone();
            spawn_local(async move {
                DashboardViewModel::new().next_page(&state).await;
            });
        })?;
    }

    Ok(ElementBuilder::new("div")?
        .class("pagination")
        .child(prev)?
        .child(label)?
        .child(next)?
        .build())
}
