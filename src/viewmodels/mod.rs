pub mod auth_viewmodel;
pub mod dashboard_viewmodel;
pub mod pr_form_viewmodel;

pub use auth_viewmodel::AuthViewModel;
pub use dashboard_viewmodel::DashboardViewModel;
pub use pr_form_viewmodel::PrFormViewModel;
