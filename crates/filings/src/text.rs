//! Plain-text reduction of EDGAR HTML documents.
//!
//! Filing primary documents are HTML; the summarization pipeline wants raw
//! text. This is a regex reduction, not an HTML parser: script/style blocks
//! and comments are dropped, block-level tags become newlines, remaining
//! tags become spaces, common entities are decoded, and whitespace runs are
//! collapsed.

use edgar_core::{AppError, AppResult};
use regex::Regex;

fn compile(pattern: &str) -> AppResult<Regex> {
    Regex::new(pattern)
        .map_err(|e| AppError::Filings(format!("Failed to compile regex {:?}: {}", pattern, e)))
}

/// Reduce an HTML document to plain text.
pub fn html_to_text(html: &str) -> AppResult<String> {
    let script_re = compile(r"(?is)<script\b[^>]*>.*?</script>")?;
    let style_re = compile(r"(?is)<style\b[^>]*>.*?</style>")?;
    let comment_re = compile(r"(?s)<!--.*?-->")?;
    let block_re = compile(r"(?i)</?(p|div|tr|table|h[1-6]|li|ul|ol)\b[^>]*>|<br\s*/?>")?;
    let tag_re = compile(r"(?s)<[^>]*>")?;

    let text = script_re.replace_all(html, " ");
    let text = style_re.replace_all(&text, " ");
    let text = comment_re.replace_all(&text, " ");
    let text = block_re.replace_all(&text, "\n");
    let text = tag_re.replace_all(&text, " ");

    let text = decode_entities(&text)?;
    collapse_whitespace(&text)
}

/// Decode the entities that actually occur in EDGAR filings.
fn decode_entities(text: &str) -> AppResult<String> {
    let decoded = text
        .replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&");

    // Numeric character references, decimal form
    let numeric_re = compile(r"&#(\d+);")?;
    let decoded = numeric_re.replace_all(&decoded, |caps: &regex::Captures| {
        caps[1]
            .parse::<u32>()
            .ok()
            .and_then(char::from_u32)
            .map(|c| c.to_string())
            .unwrap_or_default()
    });

    Ok(decoded.into_owned())
}

/// Collapse horizontal whitespace runs and blank-line runs.
fn collapse_whitespace(text: &str) -> AppResult<String> {
    let spaces_re = compile(r"[ \t\u{a0}]+")?;
    let edges_re = compile(r" *\n *")?;
    let blank_re = compile(r"\n{3,}")?;

    let text = spaces_re.replace_all(text, " ");
    let text = edges_re.replace_all(&text, "\n");
    let text = blank_re.replace_all(&text, "\n\n");

    Ok(text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tags_and_scripts() {
        let html = "<html><head><script>var x = 1;</script><style>p {}</style></head>\
                    <body><p>Item 1C. <b>Cybersecurity</b></p><p>Risk management.</p></body></html>";
        let text = html_to_text(html).unwrap();

        assert!(text.contains("Item 1C. Cybersecurity"));
        assert!(text.contains("Risk management."));
        assert!(!text.contains("var x"));
        assert!(!text.contains('<'));
    }

    #[test]
    fn test_block_tags_become_newlines() {
        let html = "<p>first</p><p>second</p>";
        let text = html_to_text(html).unwrap();
        assert_eq!(text, "first\n\nsecond");
    }

    #[test]
    fn test_entity_decoding() {
        let html = "<p>AT&amp;T &#8212; &quot;security&quot;&nbsp;program</p>";
        let text = html_to_text(html).unwrap();
        assert_eq!(text, "AT&T \u{2014} \"security\" program");
    }

    #[test]
    fn test_comments_removed() {
        let html = "before<!-- hidden note -->after";
        let text = html_to_text(html).unwrap();
        assert_eq!(text, "before after");
    }

    #[test]
    fn test_whitespace_collapse() {
        let html = "<div>a</div>\n\n\n\n<div>b</div>   c";
        let text = html_to_text(html).unwrap();
        assert!(!text.contains("\n\n\n"));
        assert!(!text.contains("  "));
    }
}
