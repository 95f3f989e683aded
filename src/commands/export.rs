//! Export a static snapshot of the reader

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::templates::{LinkStyle, STYLESHEET, STYLESHEET_PATH};
use crate::views::{DetailView, ListView, ViewContext, ViewState};
use crate::Reader;

/// Write the list page, every detail page and the stylesheet to `out_dir`.
///
/// Pages link to each other with relative URLs, so the snapshot works
/// opened from disk or hosted under any path prefix.
pub async fn run(reader: &Reader, out_dir: &Path) -> Result<usize> {
    let start = std::time::Instant::now();

    let list = ListView::load(reader.store.as_ref()).await;
    let posts = match list.state() {
        ViewState::Ready(posts) => posts.clone(),
        ViewState::Error(err) => anyhow::bail!("failed to load posts: {}", err),
        ViewState::Loading => Vec::new(),
    };

    let markdown = reader.markdown_renderer();
    let ctx = ViewContext::new(&reader.config, &markdown);
    let root = ctx.with_links(LinkStyle::Relative { depth: 0 });
    // post/{id}/index.html
    let nested = ctx.with_links(LinkStyle::Relative { depth: 2 });

    fs::create_dir_all(out_dir)?;
    fs::write(out_dir.join("index.html"), list.render_page(&root))?;

    let stylesheet = out_dir.join(STYLESHEET_PATH.trim_start_matches('/'));
    if let Some(parent) = stylesheet.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&stylesheet, STYLESHEET)?;

    for post in &posts {
        let mut view = DetailView::new();
        let token = view.navigate(post.id);
        view.resolve(token, Ok(post.clone()));

        let dir = out_dir.join("post").join(post.id.to_string());
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("index.html"), view.render_page(&nested))?;
        tracing::debug!("Exported post {} to {:?}", post.id, dir);
    }

    tracing::info!(
        "Exported {} posts to {:?} in {:?}",
        posts.len(),
        out_dir,
        start.elapsed()
    );

    Ok(posts.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReaderConfig;
    use crate::content::Post;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_export_writes_pages() {
        let dir = tempfile::tempdir().unwrap();
        let reader = Reader::with_store(
            ReaderConfig::default(),
            dir.path().to_path_buf(),
            Arc::new(MemoryStore::new(vec![
                Post::new(1, "One", "first", "2024-01-01T00:00:00Z"),
                Post::new(2, "Two", "second", "2024-01-02T00:00:00Z"),
            ])),
        );
        let out = dir.path().join("public");

        let count = run(&reader, &out).await.unwrap();
        assert_eq!(count, 2);

        let index = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(index.contains("<h2>Two</h2>"));
        let post = fs::read_to_string(out.join("post/1/index.html")).unwrap();
        assert!(post.contains("<p>first</p>"));
        assert!(out.join("assets/style.css").exists());
    }

    #[tokio::test]
    async fn test_export_links_are_relative() {
        let dir = tempfile::tempdir().unwrap();
        let reader = Reader::with_store(
            ReaderConfig::default(),
            dir.path().to_path_buf(),
            Arc::new(MemoryStore::new(vec![Post::new(
                1,
                "One",
                "first",
                "2024-01-01T00:00:00Z",
            )])),
        );
        let out = dir.path().join("public");
        run(&reader, &out).await.unwrap();

        let index = fs::read_to_string(out.join("index.html")).unwrap();
        assert!(index.contains(r#"href="./assets/style.css""#));
        assert!(index.contains(r#"<a href="./post/1/index.html">"#));
        assert!(!index.contains(r#"href="/"#));

        let post = fs::read_to_string(out.join("post/1/index.html")).unwrap();
        assert!(post.contains(r#"href="../../assets/style.css""#));
        assert!(post.contains(r#"<a href="../../index.html" class="back-link">"#));
        assert!(!post.contains(r#"href="/"#));

        // every relative link resolves inside the snapshot
        assert!(out.join("post/1").join("../../assets/style.css").exists());
        assert!(out.join("post/1").join("../../index.html").exists());
    }
}
