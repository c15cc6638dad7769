// ============================================================================
// DOM MODULE - Raw DOM helpers used by the views
// ============================================================================

pub mod element;
pub mod builder;
pub mod events;

pub use element::*;
pub use builder::*;
pub use events::*;
