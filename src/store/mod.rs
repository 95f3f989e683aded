//! Posts store - typed reads against the `posts` resource

mod memory;
mod supabase;

use async_trait::async_trait;

use crate::content::Post;
use crate::error::FetchError;

pub use memory::MemoryStore;
pub use supabase::SupabaseStore;

/// Read-only access to posts.
///
/// Each call is a single round trip: no retries, no caching.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// All posts, newest `created_at` first
    async fn list_posts(&self) -> Result<Vec<Post>, FetchError>;

    /// Exactly one post by id, or [`FetchError::NotFound`]
    async fn get_post(&self, id: i64) -> Result<Post, FetchError>;
}
