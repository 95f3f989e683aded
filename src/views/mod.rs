//! Views - fetch-and-render state machines for the two pages
//!
//! Each view starts in [`ViewState::Loading`], issues one store read and
//! settles in either [`ViewState::Ready`] or [`ViewState::Error`].

mod detail;
mod list;

pub use detail::{DetailView, RequestToken};
pub use list::ListView;

use crate::config::ReaderConfig;
use crate::content::MarkdownRenderer;
use crate::error::FetchError;
use crate::templates::LinkStyle;

/// Lifecycle of a single view
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Error(FetchError),
    Ready(T),
}

impl<T> ViewState<T> {
    fn from_result(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(value) => ViewState::Ready(value),
            Err(err) => ViewState::Error(err),
        }
    }
}

/// Everything a view needs to render itself
#[derive(Clone, Copy)]
pub struct ViewContext<'a> {
    pub config: &'a ReaderConfig,
    pub markdown: &'a MarkdownRenderer,
    pub links: LinkStyle,
}

impl<'a> ViewContext<'a> {
    /// Context for server-routed pages
    pub fn new(config: &'a ReaderConfig, markdown: &'a MarkdownRenderer) -> Self {
        Self {
            config,
            markdown,
            links: LinkStyle::Absolute,
        }
    }

    /// Same context with a different link style
    pub fn with_links(self, links: LinkStyle) -> Self {
        Self { links, ..self }
    }
}

/// Shown while a fetch is outstanding
const LOADING_HTML: &str = r#"<div class="loading">loading...</div>"#;
