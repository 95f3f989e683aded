//! Post model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::helpers::parse_timestamp;

/// Suffix appended to truncated excerpts
const ELLIPSIS: &str = "...";

/// A blog post as stored in the `posts` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Stable identifier
    pub id: i64,

    /// Post title
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,

    /// Raw markdown content, possibly carrying generation artifacts
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,

    /// Optional narrated audio
    #[serde(default)]
    pub audio_url: Option<String>,

    /// Optional raw diagram markup (stored, not rendered)
    #[serde(default)]
    pub diagram_svg: Option<String>,

    /// Creation timestamp as returned by the store
    #[serde(default, deserialize_with = "null_as_empty")]
    pub created_at: String,
}

impl Post {
    /// Create a post with empty optional fields
    pub fn new(id: i64, title: &str, content: &str, created_at: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            content: content.to_string(),
            audio_url: None,
            diagram_svg: None,
            created_at: created_at.to_string(),
        }
    }

    /// Parsed creation time
    pub fn created(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    /// Preview of the raw content: the first `limit` characters, with an
    /// ellipsis only when the content is longer than that.
    pub fn excerpt(&self, limit: usize) -> String {
        let mut chars = self.content.char_indices();
        match chars.nth(limit) {
            Some((cut, _)) => format!("{}{}", &self.content[..cut], ELLIPSIS),
            None => self.content.clone(),
        }
    }

    /// Audio URL, ignoring blank values
    pub fn audio(&self) -> Option<&str> {
        self.audio_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Sort posts newest first by `created_at`.
///
/// Unparseable timestamps sort after every parseable one.
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| {
        (b.created(), &b.created_at).cmp(&(a.created(), &a.created_at))
    });
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_with_content(content: &str) -> Post {
        Post::new(1, "t", content, "2024-01-01T00:00:00Z")
    }

    #[test]
    fn test_excerpt_boundary() {
        let exact = "a".repeat(200);
        assert_eq!(post_with_content(&exact).excerpt(200), exact);

        let long = "b".repeat(201);
        let excerpt = post_with_content(&long).excerpt(200);
        assert_eq!(excerpt, format!("{}...", "b".repeat(200)));
    }

    #[test]
    fn test_excerpt_counts_characters() {
        let content = "é".repeat(201);
        let excerpt = post_with_content(&content).excerpt(200);
        assert_eq!(excerpt.chars().count(), 203);
        assert!(excerpt.ends_with("é..."));
    }

    #[test]
    fn test_deserialize_supabase_row() {
        let json = r#"{
            "id": 42,
            "title": "Hello",
            "content": null,
            "audio_url": "https://cdn.example.com/42.mp3",
            "diagram_svg": null,
            "created_at": "2024-03-01T12:00:00.123456+00:00"
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.id, 42);
        assert_eq!(post.content, "");
        assert_eq!(post.audio(), Some("https://cdn.example.com/42.mp3"));
        assert!(post.diagram_svg.is_none());
        assert!(post.created().is_some());
    }

    #[test]
    fn test_blank_audio_is_absent() {
        let mut post = post_with_content("x");
        post.audio_url = Some("  ".to_string());
        assert_eq!(post.audio(), None);
    }

    #[test]
    fn test_sort_newest_first() {
        let mut posts = vec![
            Post::new(1, "T1", "", "2024-01-01T00:00:00Z"),
            Post::new(3, "T3", "", "2024-03-01T00:00:00Z"),
            Post::new(9, "broken", "", "garbage"),
            Post::new(2, "T2", "", "2024-02-01 00:00:00+00"),
        ];
        sort_newest_first(&mut posts);
        let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 2, 1, 9]);
    }
}
