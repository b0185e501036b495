//! HTML generation: the markdown rewrite pipeline and its helpers.

pub mod escape;
pub mod highlight;
pub mod markdown;

pub use escape::{escape_attr, escape_html};
pub use highlight::{highlight_html, highlight_text};
pub use markdown::render;

/// Strips tags from rendered HTML, yielding the plain text used for search
/// matching and list snippets.
///
/// Decodes the five entities `escape_html` produces so snippets read as the
/// author wrote them. Tag-aware in the same single-pass style as the
/// highlighter: anything between `<` and the matching `>` is dropped.
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut chars = html.chars();

    while let Some(c) = chars.next() {
        if c == '<' {
            for t in chars.by_ref() {
                if t == '>' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }

    decode_entities(&out)
}

fn decode_entities(s: &str) -> String {
    // Only the entities our own escaper emits; anything else passes through.
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Plain text of an article body: render the dialect, then strip the tags.
///
/// Deterministic given the raw source, so callers may invoke it freely
/// without coordinating with the store's rendered-HTML cache.
pub fn plain_text(raw: &str) -> String {
    strip_tags(&markdown::render(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_tags_removes_markup() {
        assert_eq!(strip_tags("<p>Hello <strong>world</strong></p>"), "Hello world");
    }

    #[test]
    fn strip_tags_decodes_escaped_entities() {
        assert_eq!(strip_tags("<p>a &amp; b &lt;c&gt;</p>"), "a & b <c>");
    }

    #[test]
    fn strip_tags_plain_text_passthrough() {
        assert_eq!(strip_tags("no markup here"), "no markup here");
    }

    #[test]
    fn plain_text_flattens_rendered_body() {
        let text = plain_text("# Title\n\nBody with **bold** words");
        assert_eq!(text, "Title\n\nBody with bold words");
    }
}
