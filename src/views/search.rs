//! Search over the corpus and the search-results page.

use crate::content::Article;
use crate::render;
use crate::render::escape::escape_html;
use crate::render::highlight::highlight_html;

/// Characters of context kept on each side of the first match.
const SNIPPET_RADIUS: usize = 40;

/// Snippet used when only the title matched.
const TITLE_MATCH_SNIPPET: &str = "Match found in title";

/// One search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub id: u32,
    pub title: String,
    /// Plain-text context around the first content match, ellipsized on
    /// truncated sides; a fixed placeholder for title-only matches.
    pub snippet: String,
    pub title_match: bool,
}

/// Case-insensitive substring search over title and plain-text content.
///
/// Title matches rank before content-only matches; within each group the
/// store's id-ascending order is preserved. Callers must not invoke this
/// with a blank query — the router treats blank input as a no-op.
pub fn search(all: &[Article], query: &str) -> Vec<SearchHit> {
    let needle = query.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut hits = Vec::new();
    for article in all {
        let title_match = article.title.to_ascii_lowercase().contains(&needle);

        let text = render::plain_text(&article.content);
        let content_match = text.to_ascii_lowercase().find(&needle);

        if !title_match && content_match.is_none() {
            continue;
        }

        let snippet = match content_match {
            Some(at) => snippet_around(&text, at, needle.len()),
            None => TITLE_MATCH_SNIPPET.to_string(),
        };

        hits.push(SearchHit {
            id: article.id,
            title: article.title.clone(),
            snippet,
            title_match,
        });
    }

    // Stable: id order is preserved within each group.
    hits.sort_by_key(|h| !h.title_match);
    hits
}

/// Extracts a window of [`SNIPPET_RADIUS`] characters around a match,
/// ellipsized on the side(s) that were truncated. The match itself is kept
/// in its original case. Offsets stay on character boundaries.
fn snippet_around(text: &str, match_start: usize, match_len: usize) -> String {
    let begin = step_chars_back(text, match_start, SNIPPET_RADIUS);
    let end = step_chars_forward(text, match_start + match_len, SNIPPET_RADIUS);

    let mut snippet = text[begin..end].trim().to_string();
    if begin > 0 {
        snippet = format!("...{snippet}");
    }
    if end < text.len() {
        snippet.push_str("...");
    }
    snippet
}

fn step_chars_back(text: &str, mut idx: usize, count: usize) -> usize {
    for _ in 0..count {
        if idx == 0 {
            break;
        }
        idx -= 1;
        while idx > 0 && !text.is_char_boundary(idx) {
            idx -= 1;
        }
    }
    idx
}

fn step_chars_forward(text: &str, mut idx: usize, count: usize) -> usize {
    for _ in 0..count {
        if idx >= text.len() {
            break;
        }
        idx += 1;
        while idx < text.len() && !text.is_char_boundary(idx) {
            idx += 1;
        }
    }
    idx
}

/// Renders the search-results page, then wraps query matches in its text
/// nodes. Highlighting walks the markup structurally, so titles and
/// snippets light up while hrefs and attributes stay untouched.
pub fn render_results(hits: &[SearchHit], query: &str) -> String {
    let plural = if hits.len() == 1 { "" } else { "s" };
    let mut html = format!(
        "<div class=\"search-results-container\">\
         <div class=\"search-results-header\">\
         <h1>Search Results for \"{}\"</h1>\
         <p>{} result{plural} found</p>\
         </div>",
        escape_html(query),
        hits.len(),
    );

    if hits.is_empty() {
        html.push_str(&format!(
            "<div class=\"search-no-results\">\
             <p>No results found for \"{}\"</p>\
             <p>Try different keywords or check your spelling.</p>\
             </div>",
            escape_html(query),
        ));
    } else {
        html.push_str("<div class=\"search-results-list\">");
        for hit in hits {
            html.push_str(&format!(
                "<div class=\"search-result-item\">\
                 <h2><a href=\"?article={id}\" data-id=\"{id}\" class=\"search-result-link\">{title}</a></h2>\
                 <p class=\"search-result-snippet\">{snippet}</p>\
                 </div>",
                id = hit.id,
                title = escape_html(&hit.title),
                snippet = escape_html(&hit.snippet),
            ));
        }
        html.push_str("</div>");
    }

    html.push_str(
        "<button class=\"clear-search-button\" data-action=\"clear-search\">Clear Search</button>\
         </div>",
    );

    highlight_html(&html, query)
}
