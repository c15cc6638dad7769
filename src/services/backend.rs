// ============================================================================
// BACKEND TRAIT - What the view models need from the PR API
// ============================================================================

use async_trait::async_trait;
use crate::error::AppError;
use crate::models::{ListQuery, LoginResponse, NewPurchaseRequest, PrPage, PurchaseRequest, RegisterResponse};

/// PR backend operations. Every call is one-shot, no retries.
#[async_trait(?Send)]
pub trait PrBackend {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AppError>;

    async fn register(&self, name: &str, email: &str, password: &str) -> Result<RegisterResponse, AppError>;

    /// Requires a bearer token; `None` fails with `Unauthorized` before any request
    async fn create_pr(&self, token: Option<&str>, pr: &NewPurchaseRequest) -> Result<PurchaseRequest, AppError>;

    async fn list_prs(&self, token: Option<&str>, query: &ListQuery) -> Result<PrPage, AppError>;

    /// Raw CSV bytes generated server-side
    async fn export_csv(&self, token: Option<&str>) -> Result<Vec<u8>, AppError>;
}
