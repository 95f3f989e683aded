//! Supabase (PostgREST) posts store

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;

use super::PostStore;
use crate::config::ReaderConfig;
use crate::content::Post;
use crate::error::FetchError;

/// Table holding the posts
const POSTS_TABLE: &str = "posts";

/// Media type asking PostgREST for exactly one object instead of an array
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// PostgREST error code for "single object requested, zero or many rows"
const NO_SINGLE_ROW: &str = "PGRST116";

/// Error body returned by PostgREST
#[derive(Debug, Default, Deserialize)]
struct ApiError {
    message: Option<String>,
    code: Option<String>,
}

/// Posts store backed by a Supabase project's REST endpoint
#[derive(Debug, Clone)]
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseStore {
    /// Create a store for a project URL and public (anon) key
    pub fn new(base_url: &str, anon_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        }
    }

    /// Create from the reader configuration
    pub fn from_config(config: &ReaderConfig) -> Self {
        Self::new(&config.supabase_url, &config.supabase_anon_key)
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, POSTS_TABLE)
    }

    fn select(&self, query: &[(&str, String)]) -> RequestBuilder {
        self.client
            .get(self.table_url())
            .query(query)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }
}

#[async_trait]
impl PostStore for SupabaseStore {
    async fn list_posts(&self) -> Result<Vec<Post>, FetchError> {
        tracing::debug!("Fetching all posts from {}", self.table_url());

        let response = self
            .select(&[
                ("select", "*".to_string()),
                ("order", "created_at.desc".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        Ok(response.json::<Vec<Post>>().await?)
    }

    async fn get_post(&self, id: i64) -> Result<Post, FetchError> {
        tracing::debug!("Fetching post {} from {}", id, self.table_url());

        let response = self
            .select(&[("select", "*".to_string()), ("id", format!("eq.{}", id))])
            .header(ACCEPT, SINGLE_OBJECT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        Ok(response.json::<Post>().await?)
    }
}

/// Turn a non-success response into a fetch error
async fn error_from_response(response: Response) -> FetchError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let api_error: ApiError = serde_json::from_str(&body).unwrap_or_default();

    if status == StatusCode::NOT_ACCEPTABLE || api_error.code.as_deref() == Some(NO_SINGLE_ROW) {
        return FetchError::NotFound;
    }

    let message = match api_error.message {
        Some(message) => message,
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => status.to_string(),
    };

    tracing::warn!("Posts store returned {}: {}", status, message);
    FetchError::FetchFailed(message)
}
