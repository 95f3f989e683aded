//! HTML helper functions

/// Escape text for use in element content or a quoted attribute
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Generate an internal anchor tag
///
/// # Examples
/// ```ignore
/// link_to("/", "← back to posts", Some("back-link"))
/// // -> <a href="/" class="back-link">← back to posts</a>
/// ```
pub fn link_to(path: &str, text: &str, class: Option<&str>) -> String {
    let class_attr = class
        .map(|c| format!(r#" class="{}""#, html_escape(c)))
        .unwrap_or_default();
    format!(
        r#"<a href="{}"{}>{}</a>"#,
        html_escape(path),
        class_attr,
        html_escape(text)
    )
}

/// Generate an audio player element
pub fn audio_tag(src: &str) -> String {
    format!(
        r#"<audio controls src="{}">your browser does not support the audio element.</audio>"#,
        html_escape(src)
    )
}
