//! Page shell and embedded stylesheet
//!
//! The reader has a single layout; views render their body and wrap it
//! here.

use crate::config::ReaderConfig;
use crate::helpers::html_escape;

/// Stylesheet served at [`STYLESHEET_PATH`]
pub const STYLESHEET: &str = include_str!("style.css");

/// URL path of the stylesheet
pub const STYLESHEET_PATH: &str = "/assets/style.css";

/// How pages link to each other and to the stylesheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStyle {
    /// Root-absolute URLs, as routed by the server
    Absolute,
    /// File-relative URLs for a page `depth` directories below the
    /// snapshot root, usable from any prefix or `file://`
    Relative { depth: usize },
}

impl LinkStyle {
    fn prefix(&self) -> String {
        match self {
            LinkStyle::Absolute => "/".to_string(),
            LinkStyle::Relative { depth: 0 } => "./".to_string(),
            LinkStyle::Relative { depth } => "../".repeat(*depth),
        }
    }

    /// URL of the post list
    pub fn home(&self) -> String {
        match self {
            LinkStyle::Absolute => "/".to_string(),
            LinkStyle::Relative { .. } => format!("{}index.html", self.prefix()),
        }
    }

    /// URL of a post's detail page
    pub fn post(&self, id: i64) -> String {
        match self {
            LinkStyle::Absolute => format!("/post/{}", id),
            LinkStyle::Relative { .. } => format!("{}post/{}/index.html", self.prefix(), id),
        }
    }

    /// URL of the stylesheet
    pub fn stylesheet(&self) -> String {
        format!("{}{}", self.prefix(), STYLESHEET_PATH.trim_start_matches('/'))
    }
}

/// Wrap a rendered view body in the HTML document shell
pub fn layout(
    config: &ReaderConfig,
    links: LinkStyle,
    page_title: Option<&str>,
    body: &str,
) -> String {
    let title = match page_title {
        Some(page_title) => format!("{} | {}", page_title, config.title),
        None => config.title.clone(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<meta name="description" content="{description}">
<link rel="stylesheet" href="{stylesheet}">
</head>
<body>
<div class="app">
{body}
</div>
</body>
</html>
"#,
        title = html_escape(&title),
        description = html_escape(&config.tagline),
        stylesheet = html_escape(&links.stylesheet()),
        body = body
    )
}
