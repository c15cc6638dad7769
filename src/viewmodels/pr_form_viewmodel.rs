// ============================================================================
// PR FORM VIEWMODEL - Submit a new purchase request
// ============================================================================

use chrono::NaiveDate;
use crate::config::CONFIG;
use crate::error::AppError;
use crate::models::PurchaseRequest;
use crate::services::code_generator::generate_code;
use crate::services::{ApiClient, PrBackend};
use crate::state::{AppState, IncrementalUpdate, UpdateType};
use crate::viewmodels::DashboardViewModel;

pub struct PrFormViewModel<B: PrBackend + Clone = ApiClient> {
    backend: B,
    page_size: u32,
}

impl PrFormViewModel<ApiClient> {
    pub fn new() -> Self {
        Self::with_backend(ApiClient::new(), CONFIG.dashboard.page_size)
    }
}

impl Default for PrFormViewModel<ApiClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: PrBackend + Clone> PrFormViewModel<B> {
    pub fn with_backend(backend: B, page_size: u32) -> Self {
        Self { backend, page_size }
    }

    /// Validate the draft, create the PR and refresh the list.
    ///
    /// Invalid drafts never reach the backend. On success the draft is
    /// cleared (requester re-seeded), the overlay closes and the current
    /// page is refetched. On failure the overlay stays open with the error.
    pub async fn submit(&self, state: &AppState, today: NaiveDate) -> Result<PurchaseRequest, AppError> {
        if state.form.is_submitting() {
            log::debug!("⏳ [FORM] Submit ignored, request in flight");
            return Err(AppError::Validation("A submission is already in progress.".to_string()));
        }

        let draft = state.form.get_draft();
        let new_pr = match draft.validate(today, |location, department| {
            generate_code(location.key(), department.key())
        }) {
            Ok(pr) => pr,
            Err(e) => {
                log::warn!("⚠️ [FORM] {}", e);
                state.form.set_error(Some(e.to_string()));
                notify_form(state);
                return Err(e);
            }
        };

        state.form.set_error(None);
        state.form.set_submitting(true);
        notify_form(state);
        log::info!("📨 [FORM] Submitting {}", new_pr.code);

        let token = state.session.token();
        let result = self.backend.create_pr(token.as_deref(), &new_pr).await;

        // Logout or re-login while the request was in flight: the form and
        // dashboard already belong to another session
        if state.session.token() != token {
            log::debug!("⏭️ [FORM] Session changed during submit of {}, result dropped", new_pr.code);
            return result;
        }

        match result {
            Ok(created) => {
                log::info!("✅ [FORM] Created {}", new_pr.code);
                state.form.reset(&state.session.display_name());
                state.form.set_last_code(Some(new_pr.code.clone()));
                state.dashboard.set_form_open(false);
                state.notify_subscribers();

                DashboardViewModel::with_backend(self.backend.clone(), self.page_size)
                    .refresh(state)
                    .await;
                Ok(created)
            }
            Err(e) if e.is_unauthorized() => {
                state.form.set_submitting(false);
                state.expire_session();
                Err(e)
            }
            Err(e) => {
                log::error!("❌ [FORM] {}", e);
                state.form.set_submitting(false);
                state.form.set_error(Some(e.to_string()));
                notify_form(state);
                Err(e)
            }
        }
    }
}

fn notify_form(state: &AppState) {
    state.notify_subscribers_with_type(UpdateType::Incremental(IncrementalUpdate::PrForm));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pr_form::{PrField, MISSING_FIELDS_MESSAGE};
    use crate::models::{Department, Location, PrPage};
    use crate::services::backend::mock::{Call, MockBackend};
    use crate::services::session_store::SessionStore;
    use crate::state::ActiveView;
    use regex::Regex;
    use tokio_test::block_on;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn open_form() -> AppState {
        let session = SessionStore::in_memory();
        session.set_session("t1", "Ana");
        let state = AppState::new(session);
        state.dashboard.set_form_open(true);
        state
    }

    fn fill(state: &AppState) {
        state.form.set_field(PrField::Uprn, "U-77".to_string());
        state.form.set_field(PrField::Location, "Hasakeh".to_string());
        state.form.set_field(PrField::Department, "WASH".to_string());
        state.form.set_field(PrField::EstimatedAmount, "250.5".to_string());
    }

    #[test]
    fn empty_draft_makes_no_call() {
        let backend = MockBackend::new();
        let vm = PrFormViewModel::with_backend(backend.clone(), 10);
        let state = open_form();

        let result = block_on(vm.submit(&state, today()));
        assert_eq!(result, Err(AppError::Validation(MISSING_FIELDS_MESSAGE.to_string())));
        assert_eq!(backend.call_count(), 0);
        assert_eq!(state.form.get_error().as_deref(), Some(MISSING_FIELDS_MESSAGE));
        assert!(state.dashboard.is_form_open());
    }

    #[test]
    fn success_closes_overlay_and_refetches() {
        let backend = MockBackend::new();
        backend.push_list(Ok(PrPage { items: vec![], total_pages: 1 }));
        let vm = PrFormViewModel::with_backend(backend.clone(), 10);
        let state = open_form();
        fill(&state);

        let created = block_on(vm.submit(&state, today())).unwrap();

        let calls = backend.calls();
        assert_eq!(calls.len(), 2);
        match &calls[0] {
            Call::CreatePr { token, pr } => {
                assert_eq!(token.as_deref(), Some("t1"));
                assert_eq!(pr.location, Location::Hasakeh);
                assert_eq!(pr.department, Department::Wash);
                assert_eq!(pr.requester, "Ana");
                assert_eq!(pr.date, today());
                assert!(Regex::new(r"^SY-HK-WSH-\d{4}$").unwrap().is_match(&pr.code));
            }
            other => panic!("unexpected call {:?}", other),
        }
        assert!(matches!(calls[1], Call::ListPrs { .. }));

        assert!(!state.dashboard.is_form_open());
        assert_eq!(state.form.get_last_code(), Some(created.code));
        let draft = state.form.get_draft();
        assert_eq!(draft.uprn, "");
        assert_eq!(draft.requester, "Ana");
        assert!(!state.form.is_submitting());
    }

    #[test]
    fn backend_failure_keeps_overlay_open() {
        let backend = MockBackend::new();
        backend.push_create(Err(AppError::Request {
            status: Some(500),
            message: "Failed to submit purchase request.".to_string(),
        }));
        let vm = PrFormViewModel::with_backend(backend.clone(), 10);
        let state = open_form();
        fill(&state);

        assert!(block_on(vm.submit(&state, today())).is_err());
        assert!(state.dashboard.is_form_open());
        assert_eq!(state.form.get_error().as_deref(), Some("Failed to submit purchase request."));
        assert_eq!(state.form.get_draft().uprn, "U-77");
        assert_eq!(backend.call_count(), 1);
    }

    /// Backend that logs the user out while the create request is pending
    #[derive(Clone)]
    struct LogoutDuringCreate {
        state: AppState,
        inner: MockBackend,
    }

    #[async_trait::async_trait(?Send)]
    impl PrBackend for LogoutDuringCreate {
        async fn login(&self, email: &str, password: &str) -> Result<crate::models::LoginResponse, AppError> {
            self.inner.login(email, password).await
        }

        async fn register(
            &self,
            name: &str,
            email: &str,
            password: &str,
        ) -> Result<crate::models::RegisterResponse, AppError> {
            self.inner.register(name, email, password).await
        }

        async fn create_pr(
            &self,
            token: Option<&str>,
            pr: &crate::models::NewPurchaseRequest,
        ) -> Result<PurchaseRequest, AppError> {
            self.state.logout();
            self.inner.create_pr(token, pr).await
        }

        async fn list_prs(&self, token: Option<&str>, query: &crate::models::ListQuery) -> Result<PrPage, AppError> {
            self.inner.list_prs(token, query).await
        }

        async fn export_csv(&self, token: Option<&str>) -> Result<Vec<u8>, AppError> {
            self.inner.export_csv(token).await
        }
    }

    #[test]
    fn logout_during_submit_leaves_login_clean() {
        let state = open_form();
        fill(&state);
        let inner = MockBackend::new();
        let backend = LogoutDuringCreate { state: state.clone(), inner: inner.clone() };
        let vm = PrFormViewModel::with_backend(backend, 10);

        assert!(block_on(vm.submit(&state, today())).is_ok());

        assert_eq!(state.active_view(), ActiveView::Login);
        assert_eq!(state.auth.get_error(), None);
        assert_eq!(state.form.get_last_code(), None);
        assert_eq!(state.form.get_draft().requester, "");
        assert!(!state.form.is_submitting());
        assert!(inner.list_calls().is_empty());
    }

    #[test]
    fn unauthorized_create_ends_session() {
        let backend = MockBackend::new();
        backend.push_create(Err(AppError::Unauthorized));
        let vm = PrFormViewModel::with_backend(backend, 10);
        let state = open_form();
        fill(&state);

        assert_eq!(block_on(vm.submit(&state, today())), Err(AppError::Unauthorized));
        assert_eq!(state.active_view(), ActiveView::Login);
        assert!(!state.dashboard.is_form_open());
    }
}
