pub mod auth;
pub mod listing;
pub mod pr_form;
pub mod purchase_request;
pub mod session;

pub use auth::{ErrorBody, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, User};
pub use listing::{FilterField, ListQuery, ListResponse, Pagination, PrFilters, PrPage};
pub use pr_form::{PrField, PrFormDraft};
pub use purchase_request::{Department, Location, NewPurchaseRequest, PurchaseRequest};
pub use session::Session;
