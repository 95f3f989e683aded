//! HTTP server exposing the list and detail pages

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::ReaderConfig;
use crate::content::MarkdownRenderer;
use crate::error::FetchError;
use crate::store::PostStore;
use crate::templates::{self, LinkStyle, STYLESHEET, STYLESHEET_PATH};
use crate::views::{DetailView, ListView, ViewContext, ViewState};
use crate::Reader;

/// Server state, shared read-only between requests
pub struct AppState {
    config: ReaderConfig,
    markdown: MarkdownRenderer,
    store: Arc<dyn PostStore>,
}

impl AppState {
    pub fn new(config: ReaderConfig, markdown: MarkdownRenderer, store: Arc<dyn PostStore>) -> Self {
        Self {
            config,
            markdown,
            store,
        }
    }

    /// Build the state for a reader
    pub fn from_reader(reader: &Reader) -> Self {
        Self::new(
            reader.config.clone(),
            reader.markdown_renderer(),
            reader.store.clone(),
        )
    }

    fn view_context(&self) -> ViewContext<'_> {
        ViewContext::new(&self.config, &self.markdown)
    }
}

/// Build the router for the navigation surface
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(list_handler))
        .route("/post/:id", get(detail_handler))
        .route(STYLESHEET_PATH, get(stylesheet_handler))
        .route("/healthz", get(|| async { "ok" }))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(reader: &Reader, ip: &str, port: u16, open: bool) -> Result<()> {
    let state = Arc::new(AppState::from_reader(reader));
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// `GET /`
async fn list_handler(State(state): State<Arc<AppState>>) -> Response {
    let view = ListView::load(state.store.as_ref()).await;
    let status = match view.state() {
        ViewState::Error(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    };
    (status, Html(view.render_page(&state.view_context()))).into_response()
}

/// `GET /post/:id`
async fn detail_handler(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Response {
    let view = match raw_id.parse::<i64>() {
        Ok(id) => DetailView::load(state.store.as_ref(), id).await,
        Err(_) => {
            tracing::debug!("Non-numeric post id {:?}", raw_id);
            DetailView::not_found()
        }
    };

    let status = match view.state() {
        ViewState::Error(FetchError::NotFound) => StatusCode::NOT_FOUND,
        ViewState::Error(FetchError::FetchFailed(_)) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    };
    (status, Html(view.render_page(&state.view_context()))).into_response()
}

async fn stylesheet_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}

async fn fallback_handler(State(state): State<Arc<AppState>>) -> Response {
    let body = templates::layout(
        &state.config,
        LinkStyle::Absolute,
        Some("not found"),
        r#"<div class="error"><p>page not found</p><a href="/" class="back-link">← back to posts</a></div>"#,
    );
    (StatusCode::NOT_FOUND, Html(body)).into_response()
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
