//! Post list view

use super::{ViewContext, ViewState, LOADING_HTML};
use crate::content::Post;
use crate::error::FetchError;
use crate::helpers::{html_escape, time_tag};
use crate::store::PostStore;
use crate::templates;

/// The list of all posts, newest first
#[derive(Debug, Clone, PartialEq)]
pub struct ListView {
    state: ViewState<Vec<Post>>,
}

impl ListView {
    /// A view that has not received its posts yet
    pub fn new() -> Self {
        Self {
            state: ViewState::Loading,
        }
    }

    /// Enter the view: fetch all posts and settle
    pub async fn load(store: &dyn PostStore) -> Self {
        let mut view = Self::new();
        view.apply(store.list_posts().await);
        view
    }

    /// Settle the view with a fetch outcome
    pub fn apply(&mut self, result: Result<Vec<Post>, FetchError>) {
        if let Err(err) = &result {
            tracing::warn!("Failed to load posts: {}", err);
        }
        self.state = ViewState::from_result(result);
    }

    pub fn state(&self) -> &ViewState<Vec<Post>> {
        &self.state
    }

    /// Render the view body
    pub fn render(&self, ctx: &ViewContext) -> String {
        let posts = match &self.state {
            ViewState::Loading => return LOADING_HTML.to_string(),
            ViewState::Error(err) => {
                return format!(
                    r#"<div class="error">error: {}</div>"#,
                    html_escape(&err.to_string())
                )
            }
            ViewState::Ready(posts) => posts,
        };

        let mut html = format!(
            r#"<div class="blog-list">
<header class="site-header">
<h1>{}</h1>
<p class="tagline">{}</p>
</header>
<main class="posts">
"#,
            html_escape(&ctx.config.title),
            html_escape(&ctx.config.tagline)
        );

        if posts.is_empty() {
            html.push_str("<p class=\"no-posts\">no posts yet</p>\n");
        }

        let tz = ctx.config.tz();
        for post in posts {
            html.push_str(&format!(
                r#"<article class="post-preview">
<a href="{}">
<h2>{}</h2>
{}
<p class="excerpt">{}</p>
</a>
</article>
"#,
                html_escape(&ctx.links.post(post.id)),
                html_escape(&post.title),
                time_tag(&post.created_at, &tz, &ctx.config.date_format),
                html_escape(&post.excerpt(ctx.config.excerpt_length))
            ));
        }

        html.push_str("</main>\n</div>");
        html
    }

    /// Render the complete HTML document
    pub fn render_page(&self, ctx: &ViewContext) -> String {
        templates::layout(ctx.config, ctx.links, None, &self.render(ctx))
    }
}

impl Default for ListView {
    fn default() -> Self {
        Self::new()
    }
}
