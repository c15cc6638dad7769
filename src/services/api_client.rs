// ============================================================================
// API CLIENT - HTTP only (stateless)
// ============================================================================
// No business logic here: build the request, attach the bearer token,
// map non-2xx responses onto AppError.
// ============================================================================

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use crate::config::CONFIG;
use crate::error::AppError;
use crate::models::{
    ErrorBody, ListQuery, ListResponse, LoginRequest, LoginResponse, NewPurchaseRequest, PrPage,
    PurchaseRequest, RegisterRequest, RegisterResponse,
};
use crate::services::backend::PrBackend;
use crate::utils::constants::{AUTH_LOGIN_PATH, AUTH_REGISTER_PATH, PR_EXPORT_CSV_PATH, PR_LIST_PATH};

const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";
const REGISTER_FAILED: &str = "Registration failed. Please try again.";
const CREATE_FAILED: &str = "Failed to submit purchase request.";
const LIST_FAILED: &str = "Failed to fetch Purchase Requests.";

/// API client - HTTP communication only
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    create_path: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_base_url(CONFIG.backend_url(), &CONFIG.pr_create_path)
    }

    pub fn with_base_url(base_url: &str, create_path: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            create_path: create_path.to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn list_url(&self, query: &ListQuery) -> String {
        format!("{}?{}", self.url(PR_LIST_PATH), query.to_query_string())
    }

    async fn read_body(response: &Response) -> String {
        response.text().await.unwrap_or_default()
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Failure on /auth/*: backend message when present, otherwise `fallback`
pub fn auth_failure(status: u16, body: &str, fallback: &str) -> AppError {
    let message = ErrorBody::message_from(body).unwrap_or_else(|| fallback.to_string());
    log::warn!("⚠️ [API] Auth rejected (HTTP {}): {}", status, message);
    AppError::Auth(message)
}

/// Failure on /api/pr*: 401/403 drop the session, anything else is a RequestError
pub fn request_failure(status: u16, body: &str, fallback: &str) -> AppError {
    if status == 401 || status == 403 {
        log::warn!("⚠️ [API] Token rejected (HTTP {})", status);
        return AppError::Unauthorized;
    }
    let message = ErrorBody::message_from(body).unwrap_or_else(|| fallback.to_string());
    log::error!("❌ [API] HTTP {}: {}", status, message);
    AppError::Request { status: Some(status), message }
}

/// Record from a 2xx create response. The PR is already stored at this
/// point, so an empty or unreadable body falls back to the submitted fields.
fn created_record(body: &str, pr: &NewPurchaseRequest) -> PurchaseRequest {
    if body.trim().is_empty() {
        return PurchaseRequest::from(pr);
    }
    match serde_json::from_str::<PurchaseRequest>(body) {
        Ok(created) if !created.code.is_empty() => created,
        Ok(_) => PurchaseRequest::from(pr),
        Err(e) => {
            log::warn!("⚠️ [API] Unreadable create response for {}: {}", pr.code, e);
            PurchaseRequest::from(pr)
        }
    }
}

fn require_token(token: Option<&str>) -> Result<String, AppError> {
    match token.map(str::trim) {
        Some(t) if !t.is_empty() => Ok(format!("Bearer {}", t)),
        _ => {
            log::warn!("⚠️ [API] No token found, request not sent");
            Err(AppError::Unauthorized)
        }
    }
}

#[async_trait(?Send)]
impl PrBackend for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AppError> {
        let url = self.url(AUTH_LOGIN_PATH);
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        log::info!("🔐 [API] Login for {}", email);

        let response = Request::post(&url)
            .json(&body)
            .map_err(AppError::parse)?
            .send()
            .await
            .map_err(AppError::network)?;

        if !response.ok() {
            let text = Self::read_body(&response).await;
            return Err(auth_failure(response.status(), &text, LOGIN_FAILED));
        }

        response.json::<LoginResponse>().await.map_err(AppError::parse)
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> Result<RegisterResponse, AppError> {
        let url = self.url(AUTH_REGISTER_PATH);
        let body = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };

        log::info!("📝 [API] Register {}", email);

        let response = Request::post(&url)
            .json(&body)
            .map_err(AppError::parse)?
            .send()
            .await
            .map_err(AppError::network)?;

        if !response.ok() {
            let text = Self::read_body(&response).await;
            return Err(auth_failure(response.status(), &text, REGISTER_FAILED));
        }

        // Some backends answer 201 with an empty body
        let text = Self::read_body(&response).await;
        if text.trim().is_empty() {
            return Ok(RegisterResponse::default());
        }
        serde_json::from_str(&text).map_err(AppError::parse)
    }

    async fn create_pr(&self, token: Option<&str>, pr: &NewPurchaseRequest) -> Result<PurchaseRequest, AppError> {
        let bearer = require_token(token)?;
        let url = self.url(&self.create_path);

        log::info!("📤 [API] Creating PR {} ({})", pr.code, pr.uprn);

        let response = Request::post(&url)
            .header("Authorization", &bearer)
            .json(pr)
            .map_err(AppError::parse)?
            .send()
            .await
            .map_err(AppError::network)?;

        if !response.ok() {
            let text = Self::read_body(&response).await;
            return Err(request_failure(response.status(), &text, CREATE_FAILED));
        }

        let text = Self::read_body(&response).await;
        let created = created_record(&text, pr);
        log::info!("✅ [API] PR created: {}", created.code);
        Ok(created)
    }

    async fn list_prs(&self, token: Option<&str>, query: &ListQuery) -> Result<PrPage, AppError> {
        let bearer = require_token(token)?;
        let url = self.list_url(query);

        log::debug!("📋 [API] GET {}", url);

        let response = Request::get(&url)
            .header("Authorization", &bearer)
            .send()
            .await
            .map_err(AppError::network)?;

        if !response.ok() {
            let text = Self::read_body(&response).await;
            return Err(request_failure(response.status(), &text, LIST_FAILED));
        }

        let list = response.json::<ListResponse>().await.map_err(AppError::parse)?;
        let page = list.into_page(query);
        log::info!("✅ [API] {} PRs on page {}/{}", page.items.len(), query.page, page.total_pages);
        Ok(page)
    }

    async fn export_csv(&self, token: Option<&str>) -> Result<Vec<u8>, AppError> {
        let bearer = require_token(token).map_err(|_| AppError::Export("not logged in".to_string()))?;
        let url = self.url(PR_EXPORT_CSV_PATH);

        log::info!("📥 [API] Exporting CSV");

        let response = Request::get(&url)
            .header("Authorization", &bearer)
            .send()
            .await
            .map_err(|e| AppError::Export(e.to_string()))?;

        if !response.ok() {
            return Err(AppError::Export(format!(
                "HTTP {}: {}",
                response.status(),
                response.status_text()
            )));
        }

        response.binary().await.map_err(|e| AppError::Export(e.to_string()))
    }
}
