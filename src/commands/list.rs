//! List posts

use anyhow::Result;

use crate::helpers::display_date;
use crate::Reader;

/// Print every post, newest first
pub async fn run(reader: &Reader) -> Result<()> {
    let posts = reader.store.list_posts().await?;
    let tz = reader.config.tz();

    println!("Posts ({}):", posts.len());
    for post in posts {
        println!(
            "  {} - {} [{}]",
            display_date(&post.created_at, &tz, "YYYY-MM-DD"),
            post.title,
            post.id
        );
    }

    Ok(())
}
