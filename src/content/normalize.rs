//! Content normalization applied before markdown parsing
//!
//! Upstream generation sometimes leaves tool-call metadata and a sign-off
//! line embedded in post bodies. These passes strip them. Order matters:
//! the line catch-all also removes what the exact pattern would, plus
//! near-misses. Removing one artifact can expose another, so the passes
//! repeat until the text stops changing.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `[{'type': 'text', 'text': '...', 'id': '...'}]`, either quote style
    static ref METADATA_BLOCK: Regex = Regex::new(
        r#"\[\{['"]type['"]:\s*['"]text['"],\s*['"]text['"]:\s*['"][^'"]*['"],\s*['"]id['"]:\s*['"][^'"]*['"]\}\]"#
    )
    .expect("valid metadata block regex");

    /// Any line mentioning `[{` ... type ... text ... id ... `}]`
    static ref METADATA_LINE: Regex =
        Regex::new(r"(?mR)^.*\[\{.*type.*text.*id.*\}\].*$").expect("valid metadata line regex");

    /// Trailing sign-off left by the writer
    static ref SIGN_OFF: Regex =
        Regex::new(r"(?i)\n*I have written the blog\.?\s*$").expect("valid sign-off regex");
}

/// Strip generation artifacts from post content
pub fn normalize(content: &str) -> String {
    let mut current = clean_once(content);
    loop {
        // Every pass only removes text, so this terminates.
        let next = clean_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_once(content: &str) -> String {
    let cleaned = METADATA_BLOCK.replace_all(content, "");
    let cleaned = METADATA_LINE.replace_all(&cleaned, "");
    let cleaned = SIGN_OFF.replace(&cleaned, "");
    cleaned.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_inline_metadata_block() {
        let content = "See the chart [{'type': 'text', 'text': 'https://example.com/a.png', 'id': 'toolu_01'}] above.";
        let cleaned = normalize(content);
        assert!(!cleaned.contains("[{"));
        assert!(!cleaned.contains("toolu_01"));
    }

    #[test]
    fn test_removes_double_quoted_metadata_block() {
        let content = "# Title\n\n[{\"type\": \"text\", \"text\": \"done\", \"id\": \"abc\"}]\n\nBody.";
        assert_eq!(normalize(content), "# Title\n\n\n\nBody.");
    }

    #[test]
    fn test_removes_malformed_metadata_line() {
        let content = "Intro\n[{\\'type\\': \\'text\\', \\'text\\': \\'x\\', \\'id\\': \\'y\\'}]\nOutro";
        assert_eq!(normalize(content), "Intro\n\nOutro");
    }

    #[test]
    fn test_line_catch_all_is_broad() {
        let content = "keep\nprefix [{ type of text with an id }] suffix\nkeep too";
        assert_eq!(normalize(content), "keep\n\nkeep too");
    }

    #[test]
    fn test_keeps_unrelated_brackets() {
        let content = "Arrays like [{a: 1}] are fine.\nSo is [this](link).";
        assert_eq!(normalize(content), content);
    }

    #[test]
    fn test_strips_trailing_sign_off() {
        for ending in [
            "I have written the blog",
            "I have written the blog.",
            "i HAVE written THE blog.  \n\n",
        ] {
            let content = format!("Some post body.\n\n{}", ending);
            assert_eq!(normalize(&content), "Some post body.");
        }
    }

    #[test]
    fn test_sign_off_only_at_end() {
        let content = "I have written the blog.\n\nThen I wrote more.";
        assert_eq!(normalize(content), content);
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(normalize("\n\n  hello world \n"), "hello world");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "first\r\n[{'type': 'text', 'text': 'x', 'id': 'y'} ]}]\r\nlast";
        assert_eq!(normalize(content), "first\r\n\r\nlast");
    }

    #[test]
    fn test_repeated_sign_off() {
        let content = "Body.\n\nI have written the blog.\nI have written the blog.";
        assert_eq!(normalize(content), "Body.");
    }

    #[test]
    fn test_block_split_across_lines_is_removed() {
        let content = format!(
            "[{{'type':\n'text',\n{}\n'text': 'u', 'id': 'v'}}]\nkeep",
            "[{'type': 'text', 'text': 'x', 'id': 'y'}]"
        );
        assert_eq!(normalize(&content), "keep");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "# Post\n\nBody [{'type': 'text', 'text': 'u', 'id': 'i'}] text.\n\nI have written the blog.\n",
            "  plain content  ",
            "line one\n[{ type text id }]\nline three\n\n",
            "Body.\n\nI have written the blog.\nI have written the blog.",
            "[{'type':\n'text',\n[{'type': 'text', 'text': 'x', 'id': 'y'}]\n'text': 'u', 'id': 'v'}]\nkeep",
            "",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once);
        }
    }
}
