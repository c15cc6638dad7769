// ============================================================================
// APP STATE - Root state, owns the session lifecycle
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::services::session_store::SessionStore;
use crate::state::{AuthRoute, AuthState, DashboardState, PrFormState};

/// DOM update requested after a state change
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateType {
    /// Only part of the page changed
    Incremental(IncrementalUpdate),
    /// Re-render everything (login/logout, screen switch, overlay open/close)
    FullRender,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IncrementalUpdate {
    /// Table rows, pagination bar, loading/error banner
    PrTable,
    /// Error line and submit button of the PR overlay
    PrForm,
    /// Error / notice lines of the login and register screens
    AuthMessages,
}

/// Top-level view
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveView {
    Login,
    Register,
    Dashboard,
}

type Subscriber = Rc<dyn Fn(UpdateType)>;

/// Global application state
#[derive(Clone)]
pub struct AppState {
    pub session: SessionStore,
    pub auth: AuthState,
    pub dashboard: DashboardState,
    pub form: PrFormState,
    pub change_subscribers: Rc<RefCell<Vec<Subscriber>>>,
}

impl AppState {
    pub fn new(session: SessionStore) -> Self {
        let state = Self {
            session,
            auth: AuthState::new(),
            dashboard: DashboardState::new(),
            form: PrFormState::new(),
            change_subscribers: Rc::new(RefCell::new(Vec::new())),
        };
        state.form.reset(&state.session.display_name());
        state
    }

    /// Decide the top-level view from the session
    pub fn active_view(&self) -> ActiveView {
        if self.session.is_logged_in() {
            return ActiveView::Dashboard;
        }
        match self.auth.get_route() {
            AuthRoute::Login => ActiveView::Login,
            AuthRoute::Register => ActiveView::Register,
        }
    }

    /// Start a session after a successful login
    pub fn init_session(&self, token: &str, display_name: &str) {
        self.session.set_session(token, display_name);
        self.auth.set_error(None);
        self.auth.set_notice(None);
        self.auth.set_loading(false);
        self.dashboard.reset();
        self.form.reset(display_name);
        log::info!("✅ [APP] Logged in as '{}'", display_name);
        self.notify_subscribers();
    }

    /// Explicit logout
    pub fn logout(&self) {
        log::info!("👋 [APP] Logout");
        self.end_session(None);
    }

    /// Token rejected by the backend: back to Login with an explanation
    pub fn expire_session(&self) {
        log::warn!("⚠️ [APP] Session rejected by backend, returning to login");
        self.end_session(Some("Your session has expired. Please log in again.".to_string()));
    }

    fn end_session(&self, message: Option<String>) {
        self.session.clear_session();
        self.dashboard.reset();
        self.form.reset("");
        self.form.set_last_code(None);
        self.auth.set_route(AuthRoute::Login);
        self.auth.set_notice(None);
        self.auth.set_error(message);
        self.notify_subscribers();
    }

    pub fn show_register(&self) {
        self.auth.set_notice(None);
        self.auth.set_route(AuthRoute::Register);
        self.notify_subscribers();
    }

    pub fn show_login(&self) {
        self.auth.set_route(AuthRoute::Login);
        self.notify_subscribers();
    }

    /// Subscribe to state changes
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn(UpdateType) + 'static,
    {
        self.change_subscribers.borrow_mut().push(Rc::new(callback));
    }

    pub fn notify_subscribers(&self) {
        self.notify_subscribers_with_type(UpdateType::FullRender);
    }

    pub fn notify_subscribers_with_type(&self, update_type: UpdateType) {
        // Snapshot so a callback may subscribe without a double borrow
        let subscribers: Vec<Subscriber> = self.change_subscribers.borrow().clone();
        for callback in subscribers {
            callback(update_type);
        }
    }
}
