//! Search-term highlighting over rendered HTML.
//!
//! Matching substrings are wrapped in `<span class="highlight">` inside
//! text nodes only. The HTML is walked as a tag/text token stream — never a
//! raw string replace — so tag names, attribute values, and the raw
//! contents of `<script>`/`<style>` are never rewritten. Matches never span
//! a tag boundary: each text run between tags is searched independently.
//!
//! Matching is ASCII-case-insensitive. `to_ascii_lowercase` is byte-length
//! preserving, so match offsets in the lowered copy map 1:1 onto the
//! original text and the match is emitted in its original case.

const OPEN_MARK: &str = "<span class=\"highlight\">";
const CLOSE_MARK: &str = "</span>";

/// Tags whose raw content must pass through untouched.
const RAW_CONTENT_TAGS: &[&str] = &["script", "style"];

/// Wraps every match of `query` in a plain-text string.
///
/// The worker behind [`highlight_html`]; also usable directly on text that
/// carries no markup.
pub fn highlight_text(text: &str, query: &str) -> String {
    let needle = query.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return text.to_string();
    }

    let hay = text.to_ascii_lowercase();
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;

    while let Some(found) = hay[pos..].find(&needle) {
        let start = pos + found;
        let end = start + needle.len();
        out.push_str(&text[pos..start]);
        out.push_str(OPEN_MARK);
        out.push_str(&text[start..end]);
        out.push_str(CLOSE_MARK);
        pos = end;
    }
    out.push_str(&text[pos..]);
    out
}

/// Wraps every match of `query` in the text nodes of `html`.
pub fn highlight_html(html: &str, query: &str) -> String {
    if query.trim().is_empty() {
        return html.to_string();
    }

    let lower = html.to_ascii_lowercase();
    let bytes = html.as_bytes();
    let mut out = String::with_capacity(html.len() + 64);
    let mut i = 0;

    while i < html.len() {
        if bytes[i] == b'<' {
            // Copy the tag through its closing '>'.
            let tag_end = lower[i..].find('>').map(|j| i + j + 1).unwrap_or(html.len());
            let tag = &lower[i..tag_end];
            out.push_str(&html[i..tag_end]);
            i = tag_end;

            // Raw-content elements: copy everything up to the closing tag
            // verbatim, highlighting nothing.
            if let Some(name) = RAW_CONTENT_TAGS.iter().copied().find(|&n| tag_opens(tag, n)) {
                let close = format!("</{name}");
                match lower[i..].find(&close) {
                    Some(j) => {
                        out.push_str(&html[i..i + j]);
                        i += j;
                    }
                    None => {
                        out.push_str(&html[i..]);
                        i = html.len();
                    }
                }
            }
        } else {
            let text_end = lower[i..].find('<').map(|j| i + j).unwrap_or(html.len());
            out.push_str(&highlight_text(&html[i..text_end], query));
            i = text_end;
        }
    }

    out
}

/// True when `tag` (lowercased, including the leading `<`) opens `name`.
fn tag_opens(tag: &str, name: &str) -> bool {
    let Some(body) = tag.strip_prefix('<') else {
        return false;
    };
    body.starts_with(name)
        && matches!(
            body.as_bytes().get(name.len()),
            Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'>') | None
        )
}
