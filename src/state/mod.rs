// ============================================================================
// STATE MODULE - State management with Rc<RefCell> + change notifications
// ============================================================================

pub mod request_sequencer;
pub mod auth_state;
pub mod dashboard_state;
pub mod form_state;
pub mod app_state;

pub use request_sequencer::*;
pub use auth_state::*;
pub use dashboard_state::*;
pub use form_state::*;
pub use app_state::*;
