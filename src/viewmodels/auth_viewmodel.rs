// ============================================================================
// AUTH VIEWMODEL - Login / registration logic
// ============================================================================
// Validates credentials locally, calls the backend, and writes the outcome
// into AppState. The views only read AuthState back.
// ============================================================================

use crate::error::AppError;
use crate::services::{ApiClient, PrBackend};
use crate::state::{AppState, AuthRoute, IncrementalUpdate, UpdateType};

pub const LOGIN_FIELDS_MESSAGE: &str = "Please fill in both email and password.";
pub const REGISTER_FIELDS_MESSAGE: &str = "All fields are required.";
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match.";
pub const WEAK_PASSWORD_MESSAGE: &str =
    "Password must be at least 6 characters and include letters and numbers.";
pub const REGISTER_SUCCESS_MESSAGE: &str = "Registration successful! You can now log in.";

const MIN_PASSWORD_LEN: usize = 6;

/// Values of the registration form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// At least 6 characters, one ASCII letter and one digit
pub fn password_is_strong(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
}

pub fn validate_login(email: &str, password: &str) -> Result<(), AppError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AppError::Validation(LOGIN_FIELDS_MESSAGE.to_string()));
    }
    Ok(())
}

/// First failing rule wins: required fields, match, strength
pub fn validate_registration(input: &RegistrationInput) -> Result<(), AppError> {
    if input.name.trim().is_empty()
        || input.email.trim().is_empty()
        || input.password.is_empty()
        || input.confirm_password.is_empty()
    {
        return Err(AppError::Validation(REGISTER_FIELDS_MESSAGE.to_string()));
    }
    if input.password != input.confirm_password {
        return Err(AppError::Validation(PASSWORD_MISMATCH_MESSAGE.to_string()));
    }
    if !password_is_strong(&input.password) {
        return Err(AppError::Validation(WEAK_PASSWORD_MESSAGE.to_string()));
    }
    Ok(())
}

pub struct AuthViewModel<B: PrBackend = ApiClient> {
    backend: B,
}

impl AuthViewModel<ApiClient> {
    pub fn new() -> Self {
        Self::with_backend(ApiClient::new())
    }
}

impl Default for AuthViewModel<ApiClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: PrBackend> AuthViewModel<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    /// Log in and start the session. Errors are also left in `state.auth`.
    pub async fn login(&self, state: &AppState, email: &str, password: &str) -> Result<(), AppError> {
        if let Err(e) = validate_login(email, password) {
            show_error(state, &e);
            return Err(e);
        }

        set_busy(state);
        log::info!("🔐 [AUTH] Logging in {}", email.trim());

        match self.backend.login(email.trim(), password).await {
            Ok(response) => {
                log::info!("✅ [AUTH] Login accepted");
                state.init_session(&response.token, &response.user.name);
                Ok(())
            }
            Err(e) => {
                log::warn!("❌ [AUTH] Login failed: {}", e);
                show_error(state, &e);
                Err(e)
            }
        }
    }

    /// Create an account. On success the notice holds the backend message
    /// and the user stays on the Register screen until they switch to Login.
    pub async fn register(&self, state: &AppState, input: &RegistrationInput) -> Result<(), AppError> {
        state.auth.set_notice(None);
        if let Err(e) = validate_registration(input) {
            show_error(state, &e);
            return Err(e);
        }

        set_busy(state);
        log::info!("📝 [AUTH] Registering {}", input.email.trim());

        match self
            .backend
            .register(input.name.trim(), input.email.trim(), &input.password)
            .await
        {
            Ok(response) => {
                let message = response
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| REGISTER_SUCCESS_MESSAGE.to_string());
                log::info!("✅ [AUTH] Registration accepted");
                state.auth.set_loading(false);
                state.auth.set_notice(Some(message));
                // Rebuild the form so the inputs come back empty
                if state.auth.get_route() == AuthRoute::Register {
                    state.notify_subscribers();
                }
                Ok(())
            }
            Err(e) => {
                log::warn!("❌ [AUTH] Registration failed: {}", e);
                show_error(state, &e);
                Err(e)
            }
        }
    }
}

fn set_busy(state: &AppState) {
    state.auth.set_error(None);
    state.auth.set_loading(true);
    state.notify_subscribers_with_type(UpdateType::Incremental(IncrementalUpdate::AuthMessages));
}

fn show_error(state: &AppState, error: &AppError) {
    state.auth.set_loading(false);
    state.auth.set_error(Some(error.to_string()));
    state.notify_subscribers_with_type(UpdateType::Incremental(IncrementalUpdate::AuthMessages));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LoginResponse, RegisterResponse, User};
    use crate::services::backend::mock::{Call, MockBackend};
    use crate::services::session_store::SessionStore;
    use crate::state::ActiveView;
    use tokio_test::block_on;

    fn input(password: &str, confirm: &str) -> RegistrationInput {
        RegistrationInput {
            name: "Ana".to_string(),
            email: "a@b.com".to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn password_strength_rule() {
        assert!(!password_is_strong("abc"));
        assert!(!password_is_strong("abcdef"));
        assert!(!password_is_strong("123456"));
        assert!(password_is_strong("abc123"));
    }

    #[test]
    fn registration_rules_in_order() {
        let empty = RegistrationInput::default();
        assert_eq!(
            validate_registration(&empty),
            Err(AppError::Validation(REGISTER_FIELDS_MESSAGE.to_string()))
        );
        assert_eq!(
            validate_registration(&input("abc123", "abc124")),
            Err(AppError::Validation(PASSWORD_MISMATCH_MESSAGE.to_string()))
        );
        assert_eq!(
            validate_registration(&input("abc", "abc")),
            Err(AppError::Validation(WEAK_PASSWORD_MESSAGE.to_string()))
        );
        assert_eq!(validate_registration(&input("abc123", "abc123")), Ok(()));
    }

    #[test]
    fn weak_password_never_reaches_backend() {
        let backend = MockBackend::new();
        let vm = AuthViewModel::with_backend(backend.clone());
        let state = AppState::new(SessionStore::in_memory());

        let result = block_on(vm.register(&state, &input("abc", "abc")));
        assert!(result.is_err());
        assert_eq!(backend.call_count(), 0);
        assert_eq!(state.auth.get_error().as_deref(), Some(WEAK_PASSWORD_MESSAGE));
    }

    #[test]
    fn strong_password_is_sent() {
        let backend = MockBackend::new();
        backend.push_register(Ok(RegisterResponse { message: Some("Welcome".to_string()) }));
        let vm = AuthViewModel::with_backend(backend.clone());
        let state = AppState::new(SessionStore::in_memory());
        state.show_register();

        block_on(vm.register(&state, &input("abc123", "abc123"))).unwrap();
        assert_eq!(
            backend.calls(),
            vec![Call::Register {
                name: "Ana".to_string(),
                email: "a@b.com".to_string(),
                password: "abc123".to_string(),
            }]
        );
        assert_eq!(state.auth.get_notice().as_deref(), Some("Welcome"));
        assert!(!state.session.is_logged_in());
    }

    #[test]
    fn register_falls_back_to_default_notice() {
        let backend = MockBackend::new();
        let vm = AuthViewModel::with_backend(backend);
        let state = AppState::new(SessionStore::in_memory());

        block_on(vm.register(&state, &input("abc123", "abc123"))).unwrap();
        assert_eq!(state.auth.get_notice().as_deref(), Some(REGISTER_SUCCESS_MESSAGE));
    }

    #[test]
    fn rejected_registration_shows_backend_message() {
        let backend = MockBackend::new();
        backend.push_register(Err(AppError::Auth("Email already registered".to_string())));
        let vm = AuthViewModel::with_backend(backend.clone());
        let state = AppState::new(SessionStore::in_memory());
        state.show_register();

        let result = block_on(vm.register(&state, &input("abc123", "abc123")));
        assert_eq!(result, Err(AppError::Auth("Email already registered".to_string())));
        assert_eq!(state.auth.get_error().as_deref(), Some("Email already registered"));
        assert_eq!(state.auth.get_notice(), None);
        assert!(!state.auth.get_loading());
        assert_eq!(state.active_view(), ActiveView::Register);
        assert_eq!(backend.call_count(), 1);
    }

    #[test]
    fn empty_login_is_blocked_locally() {
        let backend = MockBackend::new();
        let vm = AuthViewModel::with_backend(backend.clone());
        let state = AppState::new(SessionStore::in_memory());

        assert!(block_on(vm.login(&state, "a@b.com", "")).is_err());
        assert_eq!(backend.call_count(), 0);
        assert_eq!(state.auth.get_error().as_deref(), Some(LOGIN_FIELDS_MESSAGE));
    }

    #[test]
    fn login_persists_session_and_shows_dashboard() {
        let backend = MockBackend::new();
        backend.push_login(Ok(LoginResponse {
            token: "t1".to_string(),
            user: User { name: "Ana".to_string() },
        }));
        let vm = AuthViewModel::with_backend(backend);
        let session = SessionStore::in_memory();
        let state = AppState::new(session.clone());

        block_on(vm.login(&state, "a@b.com", "pw")).unwrap();

        let stored = session.get_session().unwrap();
        assert_eq!(stored.token, "t1");
        assert_eq!(stored.display_name.as_deref(), Some("Ana"));
        assert_eq!(state.active_view(), ActiveView::Dashboard);
        assert_eq!(state.form.get_draft().requester, "Ana");
    }

    #[test]
    fn rejected_login_shows_backend_message() {
        let backend = MockBackend::new();
        backend.push_login(Err(AppError::Auth("Invalid credentials".to_string())));
        let vm = AuthViewModel::with_backend(backend);
        let state = AppState::new(SessionStore::in_memory());

        assert!(block_on(vm.login(&state, "a@b.com", "nope")).is_err());
        assert_eq!(state.auth.get_error().as_deref(), Some("Invalid credentials"));
        assert!(!state.auth.get_loading());
        assert_eq!(state.active_view(), ActiveView::Login);
    }

    #[test]
    fn logout_after_login_clears_both_keys() {
        let backend = MockBackend::new();
        let vm = AuthViewModel::with_backend(backend);
        let session = SessionStore::in_memory();
        let state = AppState::new(session.clone());

        block_on(vm.login(&state, "a@b.com", "pw")).unwrap();
        state.logout();
        assert_eq!(session.get_session(), None);
        assert_eq!(session.token(), None);
        assert_eq!(session.display_name(), "");
        assert_eq!(state.active_view(), ActiveView::Login);
    }
}
