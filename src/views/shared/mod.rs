pub mod form_fields;

pub use form_fields::*;
