//! In-memory posts store, used for fixtures and offline rendering

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs;
use std::path::Path;

use super::PostStore;
use crate::content::{sort_newest_first, Post};
use crate::error::FetchError;

/// Posts held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    posts: Vec<Post>,
}

impl MemoryStore {
    /// Create a store from a list of posts
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    /// Load posts from a JSON array, as exported from the posts table
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("reading fixture {:?}", path))?;
        let posts: Vec<Post> = serde_json::from_str(&content)
            .with_context(|| format!("parsing fixture {:?}", path))?;
        tracing::debug!("Loaded {} posts from {:?}", posts.len(), path);
        Ok(Self::new(posts))
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn list_posts(&self) -> Result<Vec<Post>, FetchError> {
        let mut posts = self.posts.clone();
        sort_newest_first(&mut posts);
        Ok(posts)
    }

    async fn get_post(&self, id: i64) -> Result<Post, FetchError> {
        self.posts
            .iter()
            .find(|post| post.id == id)
            .cloned()
            .ok_or(FetchError::NotFound)
    }
}
