//! Post detail view

use super::{ViewContext, ViewState, LOADING_HTML};
use crate::content::{normalize, Post};
use crate::error::FetchError;
use crate::helpers::{audio_tag, html_escape, link_to, time_tag};
use crate::store::PostStore;
use crate::templates;

const BACK_LINK_TEXT: &str = "← back to posts";

/// Ticket for one outstanding fetch.
///
/// Only the ticket from the latest navigation may settle the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// A single post, keyed by the id in the current path
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    id: Option<i64>,
    generation: u64,
    state: ViewState<Post>,
}

impl DetailView {
    /// A view that has not been navigated anywhere yet
    pub fn new() -> Self {
        Self {
            id: None,
            generation: 0,
            state: ViewState::Loading,
        }
    }

    /// Enter the view for `id`: fetch the post and settle
    pub async fn load(store: &dyn PostStore, id: i64) -> Self {
        let mut view = Self::new();
        let token = view.navigate(id);
        view.resolve(token, store.get_post(id).await);
        view
    }

    /// A view for a path whose id is not a number
    pub fn not_found() -> Self {
        Self {
            id: None,
            generation: 0,
            state: ViewState::Error(FetchError::NotFound),
        }
    }

    /// Point the view at `id`, re-entering `Loading`.
    ///
    /// Earlier tokens become stale.
    pub fn navigate(&mut self, id: i64) -> RequestToken {
        self.id = Some(id);
        self.generation += 1;
        self.state = ViewState::Loading;
        RequestToken(self.generation)
    }

    /// Settle with a fetch outcome.
    ///
    /// Returns `false` and leaves the view untouched when `token` was
    /// issued before the latest navigation.
    pub fn resolve(&mut self, token: RequestToken, result: Result<Post, FetchError>) -> bool {
        if token.0 != self.generation {
            tracing::debug!(
                "Discarding stale response (token {}, current {})",
                token.0,
                self.generation
            );
            return false;
        }

        if let Err(err) = &result {
            tracing::warn!("Failed to load post {:?}: {}", self.id, err);
        }
        self.state = ViewState::from_result(result);
        true
    }

    /// Id of the current navigation
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn state(&self) -> &ViewState<Post> {
        &self.state
    }

    /// Render the view body
    pub fn render(&self, ctx: &ViewContext) -> String {
        let post = match &self.state {
            ViewState::Loading => return LOADING_HTML.to_string(),
            ViewState::Error(_) => {
                return format!(
                    "<div class=\"error\">\n<p>post not found</p>\n{}\n</div>",
                    link_to(&ctx.links.home(), BACK_LINK_TEXT, Some("back-link"))
                )
            }
            ViewState::Ready(post) => post,
        };

        let content = ctx.markdown.render(&normalize(&post.content));
        let tz = ctx.config.tz();

        let mut html = format!(
            r#"<article class="blog-post">
{}
<header class="post-header">
<h1>{}</h1>
{}
</header>
<div class="post-content">
{}</div>
"#,
            link_to(&ctx.links.home(), BACK_LINK_TEXT, Some("back-link")),
            html_escape(&post.title),
            time_tag(&post.created_at, &tz, &ctx.config.date_format),
            content
        );

        if let Some(audio) = post.audio() {
            html.push_str(&format!(
                "<div class=\"audio-section\">\n<h3>listen</h3>\n{}\n</div>\n",
                audio_tag(audio)
            ));
        }

        html.push_str("</article>");
        html
    }

    /// Render the complete HTML document
    pub fn render_page(&self, ctx: &ViewContext) -> String {
        let title = match &self.state {
            ViewState::Ready(post) => Some(post.title.as_str()),
            _ => None,
        };
        templates::layout(ctx.config, ctx.links, title, &self.render(ctx))
    }
}

impl Default for DetailView {
    fn default() -> Self {
        Self::new()
    }
}
