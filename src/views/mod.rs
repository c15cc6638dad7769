pub mod app;
pub mod auth;
pub mod dashboard;
pub mod pr_form;
pub mod shared;

pub use app::render_app;
