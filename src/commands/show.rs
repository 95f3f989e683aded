//! Render a single post to stdout

use anyhow::Result;

use crate::views::{DetailView, ViewContext, ViewState};
use crate::Reader;

/// Render the detail page for `id`
pub async fn render(reader: &Reader, id: i64) -> Result<String> {
    let view = DetailView::load(reader.store.as_ref(), id).await;
    if let ViewState::Error(err) = view.state() {
        anyhow::bail!("post {}: {}", id, err);
    }

    let markdown = reader.markdown_renderer();
    let ctx = ViewContext::new(&reader.config, &markdown);
    Ok(view.render_page(&ctx))
}

/// Print the detail page for `id`
pub async fn run(reader: &Reader, id: i64) -> Result<()> {
    println!("{}", render(reader, id).await?);
    Ok(())
}
