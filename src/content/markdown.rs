//! Markdown rendering with presentational element mapping

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{styled_line_to_highlighted_html, IncludeBackground};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::config::HighlightConfig;
use crate::helpers::html_escape;

/// URL fragments of the hosted diagram renderer
const DIAGRAM_HOSTS: [&str; 2] = ["mermaid.ink/svg/", "mermaid.ink/img/"];

/// Alt text for diagram links without link text
const DIAGRAM_ALT: &str = "Diagram";

/// Markdown renderer for post bodies
pub struct MarkdownRenderer {
    highlighter: Option<Highlighter>,
}

struct Highlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

/// Element whose inner events are collected as plain text
enum Capture {
    Image { src: String },
    Diagram { src: String },
    CodeBlock { lang: Option<String> },
}

impl MarkdownRenderer {
    /// Create a renderer without syntax highlighting
    pub fn new() -> Self {
        Self { highlighter: None }
    }

    /// Create from the highlight configuration
    pub fn from_config(config: &HighlightConfig) -> Self {
        if !config.enable {
            return Self::new();
        }

        let mut theme_set = ThemeSet::load_defaults();
        let theme = match theme_set.themes.remove(&config.theme) {
            Some(theme) => theme,
            None => {
                tracing::warn!(
                    "Unknown highlight theme {:?}, highlighting disabled",
                    config.theme
                );
                return Self::new();
            }
        };

        Self {
            highlighter: Some(Highlighter {
                syntax_set: SyntaxSet::load_defaults_newlines(),
                theme,
            }),
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut capture: Option<Capture> = None;
        let mut captured = String::new();
        let mut depth = 0usize;

        for event in parser {
            if let Some(active) = &capture {
                match event {
                    Event::Text(text) | Event::Code(text) => captured.push_str(&text),
                    Event::SoftBreak | Event::HardBreak => captured.push('\n'),
                    Event::Start(_) => depth += 1,
                    Event::End(_) if depth > 0 => depth -= 1,
                    Event::End(_) => {
                        let rendered = self.render_capture(active, &captured);
                        events.push(Event::Html(CowStr::from(rendered)));
                        capture = None;
                        captured.clear();
                    }
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::Image { dest_url, .. }) => {
                    capture = Some(Capture::Image {
                        src: dest_url.to_string(),
                    });
                }
                Event::Start(Tag::Link { dest_url, .. }) if is_diagram_url(&dest_url) => {
                    capture = Some(Capture::Diagram {
                        src: dest_url.to_string(),
                    });
                }
                Event::Start(Tag::Link { dest_url, .. }) => {
                    events.push(Event::Html(CowStr::from(format!(
                        r#"<a href="{}" target="_blank" rel="noopener noreferrer">"#,
                        html_escape(&dest_url)
                    ))));
                }
                Event::End(TagEnd::Link) => {
                    events.push(Event::Html(CowStr::Borrowed("</a>")));
                }
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(|lang| lang.to_string()),
                        CodeBlockKind::Indented => None,
                    };
                    capture = Some(Capture::CodeBlock { lang });
                }
                Event::Code(code) => {
                    events.push(Event::Html(CowStr::from(format!(
                        r#"<code class="inline-code">{}</code>"#,
                        html_escape(&code)
                    ))));
                }
                Event::Start(Tag::Heading { level, .. }) => {
                    let source = level as usize;
                    events.push(Event::Html(CowStr::from(format!(
                        r#"<h{} class="content-h{}">"#,
                        demote(source),
                        source
                    ))));
                }
                Event::End(TagEnd::Heading(level)) => {
                    events.push(Event::Html(CowStr::from(format!(
                        "</h{}>\n",
                        demote(level as usize)
                    ))));
                }
                Event::Start(Tag::BlockQuote { .. }) => {
                    events.push(Event::Html(CowStr::Borrowed(
                        "<blockquote class=\"content-quote\">\n",
                    )));
                }
                Event::End(TagEnd::BlockQuote { .. }) => {
                    events.push(Event::Html(CowStr::Borrowed("</blockquote>\n")));
                }
                Event::Start(Tag::List(None)) => {
                    events.push(Event::Html(CowStr::Borrowed(
                        "<ul class=\"content-list\">\n",
                    )));
                }
                Event::Start(Tag::List(Some(start))) => {
                    let start_attr = if start == 1 {
                        String::new()
                    } else {
                        format!(r#" start="{}""#, start)
                    };
                    events.push(Event::Html(CowStr::from(format!(
                        "<ol class=\"content-list ordered\"{}>\n",
                        start_attr
                    ))));
                }
                Event::End(TagEnd::List(ordered)) => {
                    let close = if ordered { "</ol>\n" } else { "</ul>\n" };
                    events.push(Event::Html(CowStr::Borrowed(close)));
                }
                // Embedded HTML is shown as text, never injected
                Event::Html(raw) | Event::InlineHtml(raw) => {
                    events.push(Event::Text(raw));
                }
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    fn render_capture(&self, capture: &Capture, text: &str) -> String {
        match capture {
            Capture::Image { src } => figure_image("content-image", src, text, true),
            Capture::Diagram { src } => {
                let alt = if text.is_empty() { DIAGRAM_ALT } else { text };
                figure_image("mermaid-diagram", src, alt, false)
            }
            Capture::CodeBlock { lang } => self.code_block(text, lang.as_deref()),
        }
    }

    /// Render a fenced or indented code block, keeping the language class
    fn code_block(&self, code: &str, lang: Option<&str>) -> String {
        let class_attr = lang
            .map(|lang| format!(r#" class="language-{}""#, html_escape(lang)))
            .unwrap_or_default();

        let body = match (&self.highlighter, lang) {
            (Some(highlighter), Some(lang)) => highlighter
                .highlight(code, lang)
                .unwrap_or_else(|| html_escape(code)),
            _ => html_escape(code),
        };

        format!(
            "<pre class=\"code-block\"><code{}>{}</code></pre>\n",
            class_attr, body
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Highlight with inline styles; `None` for unknown languages or errors
    fn highlight(&self, code: &str, lang: &str) -> Option<String> {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))?;

        let mut lines = HighlightLines::new(syntax, &self.theme);
        let mut output = String::new();
        for line in LinesWithEndings::from(code) {
            let regions = lines.highlight_line(line, &self.syntax_set).ok()?;
            let html = styled_line_to_highlighted_html(&regions[..], IncludeBackground::No).ok()?;
            output.push_str(&html);
        }
        Some(output)
    }
}

/// Whether a link points at the hosted diagram renderer
pub fn is_diagram_url(url: &str) -> bool {
    DIAGRAM_HOSTS.iter().any(|host| url.contains(host))
}

/// Content headings sit one level below the page title, capped at h6
fn demote(level: usize) -> usize {
    (level + 1).min(6)
}

fn figure_image(class: &str, src: &str, alt: &str, caption: bool) -> String {
    let mut figure = format!(
        r#"<figure class="{}"><img src="{}" alt="{}" loading="lazy" />"#,
        class,
        html_escape(src),
        html_escape(alt)
    );
    if caption && !alt.is_empty() {
        figure.push_str(&format!("<figcaption>{}</figcaption>", html_escape(alt)));
    }
    figure.push_str("</figure>");
    figure
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.");
        assert!(html.contains(r#"<h2 class="content-h1">Hello World</h2>"#));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_heading_demotion() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("## Two\n\n### Three\n\n###### Six");
        assert!(html.contains(r#"<h3 class="content-h2">Two</h3>"#));
        assert!(html.contains(r#"<h4 class="content-h3">Three</h4>"#));
        assert!(html.contains(r#"<h6 class="content-h6">Six</h6>"#));
        assert!(!html.contains("<h1"));
    }

    #[test]
    fn test_image_with_caption() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("![A cat](https://img.example.com/cat.png)");
        assert!(html.contains(
            r#"<figure class="content-image"><img src="https://img.example.com/cat.png" alt="A cat" loading="lazy" /><figcaption>A cat</figcaption></figure>"#
        ));
    }

    #[test]
    fn test_image_without_alt_has_no_caption() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("![](https://img.example.com/cat.png)");
        assert!(html.contains(r#"alt="" loading="lazy" />"#));
        assert!(!html.contains("<figcaption>"));
    }

    #[test]
    fn test_diagram_link_becomes_image() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("[Flow](https://mermaid.ink/svg/abc123)");
        assert!(html.contains(
            r#"<figure class="mermaid-diagram"><img src="https://mermaid.ink/svg/abc123" alt="Flow" loading="lazy" /></figure>"#
        ));
        assert!(!html.contains("<a "));
    }

    #[test]
    fn test_diagram_link_without_text() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("[](https://mermaid.ink/img/abc123)");
        assert!(html.contains(r#"alt="Diagram""#));
        assert!(html.contains(r#"class="mermaid-diagram""#));
    }

    #[test]
    fn test_external_link() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("Read [the docs](https://example.com/docs?a=1&b=2).");
        assert!(html.contains(
            r#"<a href="https://example.com/docs?a=1&amp;b=2" target="_blank" rel="noopener noreferrer">the docs</a>"#
        ));
    }

    #[test]
    fn test_inline_and_block_code() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("Use `a < b` here.\n\n```rust\nfn main() {}\n```");
        assert!(html.contains(r#"<code class="inline-code">a &lt; b</code>"#));
        assert!(html.contains(
            "<pre class=\"code-block\"><code class=\"language-rust\">fn main() {}\n</code></pre>"
        ));
    }

    #[test]
    fn test_code_block_without_language() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```\nplain\n```");
        assert!(html.contains("<pre class=\"code-block\"><code>plain\n</code></pre>"));
    }

    #[test]
    fn test_highlighted_code_keeps_language_class() {
        let renderer = MarkdownRenderer::from_config(&HighlightConfig {
            enable: true,
            ..Default::default()
        });
        let html = renderer.render("```rust\nfn main() {}\n```");
        assert!(html.contains(r#"<pre class="code-block"><code class="language-rust">"#));
        assert!(html.contains("<span style="));
    }

    #[test]
    fn test_block_elements_get_classes() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("> quoted\n\n- one\n- two\n\n3. three\n4. four");
        assert!(html.contains("<blockquote class=\"content-quote\">"));
        assert!(html.contains("<ul class=\"content-list\">"));
        assert!(html.contains("<ol class=\"content-list ordered\" start=\"3\">"));
        assert!(html.contains("<li>one</li>"));
    }

    #[test]
    fn test_tables_and_strikethrough() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~");
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_is_diagram_url() {
        assert!(is_diagram_url("https://mermaid.ink/svg/abc"));
        assert!(is_diagram_url("https://mermaid.ink/img/abc?type=png"));
        assert!(!is_diagram_url("https://mermaid.ink/"));
        assert!(!is_diagram_url("https://example.com/svg/abc"));
    }
}
