//! blog-reader: a small blog reader backed by a hosted posts table
//!
//! Posts are read from a Supabase (PostgREST) table, their markdown is
//! cleaned and rendered to HTML, and the result is served as two pages:
//! the post list and the post detail page.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod server;
pub mod store;
pub mod templates;
pub mod views;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use content::MarkdownRenderer;
use store::{MemoryStore, PostStore, SupabaseStore};

/// The main reader application
#[derive(Clone)]
pub struct Reader {
    /// Reader configuration
    pub config: config::ReaderConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Injected posts store
    pub store: Arc<dyn PostStore>,
}

impl Reader {
    /// Create a reader from a directory.
    ///
    /// Loads `_config.yml` when present, applies environment overrides and
    /// connects to Supabase, unless a JSON fixture is given, in which case
    /// posts are served from memory.
    pub fn new<P: AsRef<Path>>(base_dir: P, fixture: Option<&Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            config::ReaderConfig::load(&config_path)?
        } else {
            config::ReaderConfig::default()
        };
        config.apply_env();

        let store: Arc<dyn PostStore> = match fixture {
            Some(path) => {
                let path = if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    base_dir.join(path)
                };
                tracing::info!("Serving posts from fixture {:?}", path);
                Arc::new(MemoryStore::from_json_file(&path)?)
            }
            None => {
                if config.supabase_url.is_empty() || config.supabase_anon_key.is_empty() {
                    tracing::warn!(
                        "Supabase URL or anon key is not configured; fetches will fail"
                    );
                }
                Arc::new(SupabaseStore::from_config(&config))
            }
        };

        Ok(Self::with_store(config, base_dir, store))
    }

    /// Create a reader around an already constructed store
    pub fn with_store(
        config: config::ReaderConfig,
        base_dir: PathBuf,
        store: Arc<dyn PostStore>,
    ) -> Self {
        Self {
            config,
            base_dir,
            store,
        }
    }

    /// Build the markdown renderer described by the configuration
    pub fn markdown_renderer(&self) -> MarkdownRenderer {
        MarkdownRenderer::from_config(&self.config.highlight)
    }
}
