// ============================================================================
// AUTH STATE - Login / Register screen state
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

/// Which auth screen is shown while logged out
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthRoute {
    Login,
    Register,
}

/// Authentication screen state
#[derive(Clone)]
pub struct AuthState {
    pub route: Rc<RefCell<AuthRoute>>,
    pub loading: Rc<RefCell<bool>>,
    pub error: Rc<RefCell<Option<String>>>,
    /// Positive feedback, e.g. "Registration successful"
    pub notice: Rc<RefCell<Option<String>>>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            route: Rc::new(RefCell::new(AuthRoute::Login)),
            loading: Rc::new(RefCell::new(false)),
            error: Rc::new(RefCell::new(None)),
            notice: Rc::new(RefCell::new(None)),
        }
    }

    pub fn get_route(&self) -> AuthRoute {
        *self.route.borrow()
    }

    /// Switch screen, dropping messages from the previous one
    pub fn set_route(&self, route: AuthRoute) {
        *self.route.borrow_mut() = route;
        self.set_error(None);
        self.set_loading(false);
    }

    pub fn get_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn set_loading(&self, loading: bool) {
        *self.loading.borrow_mut() = loading;
    }

    pub fn get_error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    pub fn set_error(&self, error: Option<String>) {
        *self.error.borrow_mut() = error;
    }

    pub fn get_notice(&self) -> Option<String> {
        self.notice.borrow().clone()
    }

    pub fn set_notice(&self, notice: Option<String>) {
        *self.notice.borrow_mut() = notice;
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new()
    }
}
