//! Helper functions for page rendering
//!
//! Date parsing/formatting and small HTML builders shared by the views.

mod date;
mod html;

pub use date::*;
pub use html::*;
