//! Accessibility pass over final page HTML.
//!
//! Two guarantees from the render contract: every image carries an `alt`
//! attribute (an empty one is inserted when missing), and heading levels
//! that skip more than one step are diagnosed. Heading skips are
//! warning-only — the markup is not rewritten.

/// A heading jump of more than one level, e.g. `h1` straight to `h3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingSkip {
    pub from: u8,
    pub to: u8,
}

/// Applies the accessibility pass: alt-attribute repair plus heading
/// diagnostics.
pub fn apply(html: &str) -> String {
    for skip in audit_headings(html) {
        tracing::warn!(
            from = format!("h{}", skip.from),
            to = format!("h{}", skip.to),
            "Heading level skipped"
        );
    }
    ensure_img_alt(html)
}

/// Inserts `alt=""` into any `<img>` tag that lacks the attribute.
pub fn ensure_img_alt(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        let (before, tag_start) = rest.split_at(open);
        out.push_str(before);

        let Some(close) = tag_start.find('>') else {
            out.push_str(tag_start);
            return out;
        };
        let tag = &tag_start[..=close];

        if is_img_tag(tag) && !tag.to_ascii_lowercase().contains("alt=") {
            // Insert before the closing '>' (or '/>').
            let insert_at = if tag.ends_with("/>") { tag.len() - 2 } else { tag.len() - 1 };
            out.push_str(tag[..insert_at].trim_end());
            out.push_str(" alt=\"\"");
            out.push_str(&tag[insert_at..]);
        } else {
            out.push_str(tag);
        }
        rest = &tag_start[close + 1..];
    }

    out.push_str(rest);
    out
}

fn is_img_tag(tag: &str) -> bool {
    let lower = tag.to_ascii_lowercase();
    lower.starts_with("<img") && matches!(lower.as_bytes().get(4), Some(b' ') | Some(b'>') | Some(b'/') | Some(b'\t'))
}

/// Finds heading-level jumps greater than one (e.g. `h1` → `h3`) in
/// document order.
pub fn audit_headings(html: &str) -> Vec<HeadingSkip> {
    let lower = html.to_ascii_lowercase();
    let mut skips = Vec::new();
    let mut last_level: u8 = 0;
    let mut rest = lower.as_str();

    while let Some(open) = rest.find('<') {
        rest = &rest[open + 1..];
        let bytes = rest.as_bytes();
        if bytes.first() == Some(&b'h') {
            if let Some(&digit) = bytes.get(1) {
                if (b'1'..=b'6').contains(&digit)
                    && matches!(bytes.get(2), Some(b'>') | Some(b' ') | Some(b'\t'))
                {
                    let level = digit - b'0';
                    if last_level != 0 && level > last_level + 1 {
                        skips.push(HeadingSkip { from: last_level, to: level });
                    }
                    last_level = level;
                }
            }
        }
    }

    skips
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_alt_is_inserted_empty() {
        let html = ensure_img_alt("<img src=\"x.png\" class=\"article-image\">");
        assert_eq!(html, "<img src=\"x.png\" class=\"article-image\" alt=\"\">");
    }

    #[test]
    fn existing_alt_is_untouched() {
        let src = "<img src=\"x.png\" alt=\"Logo\">";
        assert_eq!(ensure_img_alt(src), src);
    }

    #[test]
    fn self_closing_img_keeps_its_slash() {
        let html = ensure_img_alt("<img src=\"x.png\"/>");
        assert_eq!(html, "<img src=\"x.png\" alt=\"\"/>");
    }

    #[test]
    fn non_img_tags_pass_through() {
        let src = "<imgine></imgine><p>img</p>";
        assert_eq!(ensure_img_alt(src), src);
    }

    #[test]
    fn multiple_images_all_repaired() {
        let html = ensure_img_alt("<img src=\"a\"><p>x</p><img src=\"b\" alt=\"ok\"><img src=\"c\">");
        assert_eq!(html.matches("alt=").count(), 3);
        assert_eq!(html.matches("alt=\"\"").count(), 2);
    }

    #[test]
    fn heading_skip_is_detected() {
        let skips = audit_headings("<h1>a</h1><h3>b</h3>");
        assert_eq!(skips, vec![HeadingSkip { from: 1, to: 3 }]);
    }

    #[test]
    fn stepwise_headings_are_clean() {
        assert!(audit_headings("<h1>a</h1><h2>b</h2><h3>c</h3>").is_empty());
    }

    #[test]
    fn descending_headings_are_clean() {
        assert!(audit_headings("<h3>a</h3><h1>b</h1><h2>c</h2>").is_empty());
    }

    #[test]
    fn first_heading_never_counts_as_skip() {
        assert!(audit_headings("<h3>deep start</h3>").is_empty());
    }

    #[test]
    fn apply_repairs_and_returns_html() {
        let html = apply("<h1>t</h1><img src=\"x\">");
        assert!(html.contains("alt=\"\""));
        assert!(html.contains("<h1>t</h1>"));
    }
}
