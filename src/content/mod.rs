//! Content module - post model, normalization and markdown rendering

mod markdown;
mod normalize;
mod post;

pub use markdown::{is_diagram_url, MarkdownRenderer};
pub use normalize::normalize;
pub use post::{sort_newest_first, Post};
