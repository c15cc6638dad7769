// ============================================================================
// DASHBOARD VIEWMODEL - Listing, paging, filters, export
// ============================================================================
// Every list fetch takes a ticket from the dashboard's RequestSequencer.
// Only the latest ticket may write its result into state, so a slow
// response for an old page or filter never overwrites a newer one.
// ============================================================================

use crate::config::CONFIG;
use crate::error::AppError;
use crate::models::{FilterField, ListQuery, PrPage};
use crate::services::{ApiClient, PrBackend};
use crate::state::{AppState, IncrementalUpdate, LoadStatus, UpdateType};

pub struct DashboardViewModel<B: PrBackend = ApiClient> {
    backend: B,
    page_size: u32,
}

impl DashboardViewModel<ApiClient> {
    pub fn new() -> Self {
        Self::with_backend(ApiClient::new(), CONFIG.dashboard.page_size)
    }
}

impl Default for DashboardViewModel<ApiClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: PrBackend> DashboardViewModel<B> {
    pub fn with_backend(backend: B, page_size: u32) -> Self {
        Self {
            backend,
            page_size: page_size.max(1),
        }
    }

    /// Query for the current page and filters
    pub fn current_query(&self, state: &AppState) -> ListQuery {
        ListQuery {
            page: state.dashboard.get_pagination().page,
            limit: self.page_size,
            filters: state.dashboard.get_filters(),
        }
    }

    /// Mark the table as loading and reserve a ticket for the request
    pub fn begin_fetch(&self, state: &AppState) -> (u64, ListQuery) {
        let ticket = state.dashboard.sequencer.issue();
        let query = self.current_query(state);
        state.dashboard.set_status(LoadStatus::Loading);
        notify_table(state);
        (ticket, query)
    }

    /// Write a list result into state. Returns false when the ticket is stale.
    pub fn apply_fetch(&self, state: &AppState, ticket: u64, result: Result<PrPage, AppError>) -> bool {
        if !state.dashboard.sequencer.is_current(ticket) {
            log::debug!("⏭️ [DASHBOARD] Discarding stale list response #{}", ticket);
            return false;
        }

        match result {
            Ok(page) => {
                log::info!(
                    "📋 [DASHBOARD] {} PRs on page {}/{}",
                    page.items.len(),
                    state.dashboard.get_pagination().page,
                    page.total_pages
                );
                state.dashboard.apply_page(page.items, page.total_pages);
                notify_table(state);
            }
            Err(e) if e.is_unauthorized() => {
                state.expire_session();
            }
            Err(e) => {
                log::error!("❌ [DASHBOARD] {}", e);
                state.dashboard.set_status(LoadStatus::Failed(e.to_string()));
                notify_table(state);
            }
        }
        true
    }

    /// Fetch the current page with the current filters.
    ///
    /// A page beyond the returned page count comes back empty while the
    /// cursor is clamped to the last page, so that page is fetched once more.
    pub async fn refresh(&self, state: &AppState) -> bool {
        let (ticket, query) = self.begin_fetch(state);
        let token = state.session.token();
        let result = self.backend.list_prs(token.as_deref(), &query).await;
        let out_of_range = matches!(&result, Ok(page) if page.items.is_empty() && query.page > page.total_pages);

        let applied = self.apply_fetch(state, ticket, result);
        if !applied || !out_of_range {
            return applied;
        }

        log::debug!(
            "↩️ [DASHBOARD] Page {} out of range, loading page {}",
            query.page,
            state.dashboard.get_pagination().page
        );
        let (ticket, query) = self.begin_fetch(state);
        let result = self.backend.list_prs(token.as_deref(), &query).await;
        self.apply_fetch(state, ticket, result)
    }

    /// Jump to a page. Out-of-range or same-page requests do nothing.
    pub async fn go_to_page(&self, state: &AppState, page: u32) -> bool {
        let pagination = state.dashboard.get_pagination();
        if page < 1 || page > pagination.total_pages || page == pagination.page {
            return false;
        }
        state.dashboard.set_page(page);
        self.refresh(state).await
    }

    pub async fn prev_page(&self, state: &AppState) -> bool {
        match state.dashboard.get_pagination().prev() {
            Some(page) => self.go_to_page(state, page).await,
            None => false,
        }
    }

    pub async fn next_page(&self, state: &AppState) -> bool {
        match state.dashboard.get_pagination().next() {
            Some(page) => self.go_to_page(state, page).await,
            None => false,
        }
    }

    /// Store a filter value without fetching. Any change resets to page 1.
    pub fn update_filter(&self, state: &AppState, field: FilterField, value: &str) -> bool {
        let changed = state.dashboard.filters.borrow_mut().set(field, value);
        if changed {
            state.dashboard.set_page(1);
        }
        changed
    }

    /// Store a filter value and refetch when it changed
    pub async fn set_filter(&self, state: &AppState, field: FilterField, value: &str) -> bool {
        if !self.update_filter(state, field, value) {
            return false;
        }
        self.refresh(state).await
    }

    /// Server-generated CSV. Failures are logged and returned, never shown
    /// as a blocking error.
    pub async fn export_csv(&self, state: &AppState) -> Result<Vec<u8>, AppError> {
        let token = state.session.token();
        match self.backend.export_csv(token.as_deref()).await {
            Ok(bytes) => {
                log::info!("📤 [DASHBOARD] CSV export ready ({} bytes)", bytes.len());
                Ok(bytes)
            }
            Err(e) if e.is_unauthorized() => {
                state.expire_session();
                Err(e)
            }
            Err(e) => {
                log::error!("❌ [DASHBOARD] CSV export failed: {}", e);
                Err(e)
            }
        }
    }

    pub fn open_form(&self, state: &AppState) {
        state.form.set_error(None);
        state.dashboard.set_form_open(true);
        state.notify_subscribers();
    }

    pub fn close_form(&self, state: &AppState) {
        state.form.set_error(None);
        state.dashboard.set_form_open(false);
        state.notify_subscribers();
    }
}

fn notify_table(state: &AppState) {
    state.notify_subscribers_with_type(UpdateType::Incremental(IncrementalUpdate::PrTable));
}
