pub mod backend;
pub mod api_client;
pub mod session_store;
pub mod code_generator;
pub mod export_service;

pub use backend::PrBackend;
pub use api_client::ApiClient;
pub use session_store::SessionStore;
