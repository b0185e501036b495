//! Constrained markdown-to-HTML renderer.
//!
//! `render` is a pure function over a small fixed dialect: fenced code
//! blocks, images, three heading levels, line blockquotes, horizontal
//! rules, unordered lists, links (external, internal, article references),
//! bold/italic, and paragraph wrapping. General markdown compliance is
//! explicitly out of scope.
//!
//! The rules are applied in a fixed order. Order matters twice over: later
//! rules must not corrupt earlier output (paragraph wrapping skips lines
//! that already carry markup), and earlier rules must not swallow syntax
//! meant for later rules (bold runs before italic so `**` never parses as
//! two `*`). Fenced code blocks are lifted out into placeholder tokens
//! before any other rule runs and restored last, so nothing inside a fence
//! is ever reinterpreted.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::escape::escape_attr;

/// Marker for extracted code blocks. U+001A never appears in the supported
/// dialect, so placeholder tokens are inert for every rewrite rule.
const CODE_MARK: char = '\u{1A}';

static FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(\w+)?\n(.*?)```").expect("fence pattern"));
static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").expect("image pattern"));
static H1: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+(.+)$").expect("h1 pattern"));
static H2: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^##[ \t]+(.+)$").expect("h2 pattern"));
static H3: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^###[ \t]+(.+)$").expect("h3 pattern"));
static BLOCKQUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^>[ \t]+(.+)$").expect("blockquote pattern"));
static HRULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^---[ \t]*$").expect("rule pattern"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link pattern"));
static ARTICLE_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\d+):([^\]]+)\]").expect("article ref pattern"));
static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("bold pattern"));
static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*]+)\*").expect("italic pattern"));

/// Renders raw article source into semantic HTML.
///
/// Pure and deterministic: no external state, same output for same input.
pub fn render(raw: &str) -> String {
    let (text, blocks) = extract_code_blocks(raw);

    let text = replace_images(&text);
    let text = replace_headings(&text);
    let text = replace_blockquotes(&text);
    let text = replace_rules(&text);
    let text = wrap_list_runs(&text);
    let text = replace_links(&text);
    let text = replace_article_refs(&text);
    let text = replace_bold(&text);
    let text = replace_italic(&text);
    let text = wrap_paragraphs(&text);

    restore_code_blocks(&text, &blocks)
}

/// Rule 1: fenced code blocks.
///
/// Replaces each ```` ```lang\ncode\n``` ```` span with a placeholder token
/// and returns the rendered `<pre><code>` elements separately. Content is
/// inserted verbatim (trimmed), tagged with a `language-*` class when a
/// language is given.
fn extract_code_blocks(raw: &str) -> (String, Vec<String>) {
    let mut blocks = Vec::new();
    let text = FENCE
        .replace_all(raw, |caps: &Captures<'_>| {
            let lang_class = caps
                .get(1)
                .map(|l| format!(" class=\"language-{}\"", l.as_str()))
                .unwrap_or_default();
            let code = caps.get(2).map(|c| c.as_str()).unwrap_or_default().trim();
            blocks.push(format!("<pre><code{lang_class}>{code}</code></pre>"));
            format!("{CODE_MARK}{}{CODE_MARK}", blocks.len() - 1)
        })
        .into_owned();
    (text, blocks)
}

fn restore_code_blocks(text: &str, blocks: &[String]) -> String {
    let mut out = text.to_string();
    for (i, block) in blocks.iter().enumerate() {
        out = out.replace(&format!("{CODE_MARK}{i}{CODE_MARK}"), block);
    }
    out
}

/// Rule 2: images. Runs before paragraph wrapping so an image line is never
/// wrapped in `<p>`. The `alt` attribute is always emitted, even when empty.
fn replace_images(text: &str) -> String {
    IMAGE
        .replace_all(text, |caps: &Captures<'_>| {
            format!(
                "<img src=\"{}\" alt=\"{}\" class=\"article-image\">",
                escape_attr(&caps[2]),
                escape_attr(&caps[1]),
            )
        })
        .into_owned()
}

/// Rule 3: headings `#`, `##`, `###` at line start. Deeper `#` sequences are
/// not recognized and fall through to paragraph wrapping.
fn replace_headings(text: &str) -> String {
    let text = H1.replace_all(text, "<h1>$1</h1>");
    let text = H2.replace_all(&text, "<h2>$1</h2>");
    H3.replace_all(&text, "<h3>$1</h3>").into_owned()
}

/// Rule 4: blockquotes, line by line. Adjacent quote lines stay separate
/// elements; there is no multi-line block merging.
fn replace_blockquotes(text: &str) -> String {
    BLOCKQUOTE
        .replace_all(text, "<blockquote>$1</blockquote>")
        .into_owned()
}

/// Rule 5: a line that is exactly `---` becomes a horizontal rule.
fn replace_rules(text: &str) -> String {
    HRULE.replace_all(text, "<hr>").into_owned()
}

/// Rule 6: unordered lists.
///
/// Consecutive `- ` lines merge into one `<ul>`. A run ends at the first
/// non-list line; the closing `</ul>` is emitted on its own line so the
/// terminating line is processed by the remaining rules like any other.
/// An unterminated run at end of input is closed implicitly.
fn wrap_list_runs(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut in_list = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if let Some(item) = trimmed.strip_prefix("- ") {
            if !in_list {
                out.push("<ul>".to_string());
                in_list = true;
            }
            out.push(format!("<li>{item}</li>"));
        } else {
            if in_list {
                out.push("</ul>".to_string());
                in_list = false;
            }
            out.push(line.to_string());
        }
    }
    if in_list {
        out.push("</ul>".to_string());
    }

    out.join("\n")
}

/// Rule 7a: inline links. External targets (`http://`/`https://`) open in a
/// new tab and carry the external-link marker class; everything else is an
/// internal link.
fn replace_links(text: &str) -> String {
    LINK.replace_all(text, |caps: &Captures<'_>| {
        let label = &caps[1];
        let url = &caps[2];
        if url.starts_with("http://") || url.starts_with("https://") {
            format!(
                "<a href=\"{}\" class=\"external-link\" target=\"_blank\" rel=\"noopener\">{label}</a>",
                escape_attr(url),
            )
        } else {
            format!("<a href=\"{}\" class=\"article-link\">{label}</a>", escape_attr(url))
        }
    })
    .into_owned()
}

/// Rule 7b: article references `[id:title]`. The numeric id rides along as
/// data for the router, distinguishing these from generic links.
fn replace_article_refs(text: &str) -> String {
    ARTICLE_REF
        .replace_all(text, |caps: &Captures<'_>| {
            let id = &caps[1];
            format!(
                "<a href=\"?article={id}\" class=\"article-link\" data-article-id=\"{id}\">{}</a>",
                &caps[2],
            )
        })
        .into_owned()
}

/// Rule 8: bold, which must run before italic so paired `**` is never
/// parsed as two italic markers.
fn replace_bold(text: &str) -> String {
    BOLD.replace_all(text, "<strong>$1</strong>").into_owned()
}

fn replace_italic(text: &str) -> String {
    ITALIC.replace_all(text, "<em>$1</em>").into_owned()
}

/// Rule 9: paragraph wrapping. Any remaining non-empty line that does not
/// already start with markup (or a code placeholder) is wrapped in `<p>`;
/// empty lines produce nothing.
fn wrap_paragraphs(text: &str) -> String {
    text.lines()
        .map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('<') || trimmed.starts_with(CODE_MARK) {
                line.to_string()
            } else {
                format!("<p>{line}</p>")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
