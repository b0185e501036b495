//! Single-article view: header chrome, rendered body, prev/next navigation.

use crate::content::Article;
use crate::render::escape::escape_html;

use super::{category_chip, tag_chip};

/// Composes the full article page from an already-rendered body.
///
/// Pure given its inputs, but depends on the full article list for neighbor
/// lookups — the caller awaits the loaded set before invoking. Neighbor
/// links appear when `id - 1` / `id + 1` fall inside the corpus; otherwise
/// an empty placeholder div preserves the layout. A neighbor whose record
/// cannot be resolved still gets a link, labeled `"{series} #{id}"`.
pub fn build(article: &Article, all: &[Article], body: &str, series: &str) -> String {
    let mut html = format!(
        "<div class=\"article\">\
         <div class=\"article-header\">\
         <h1 class=\"article-title\">{title}</h1>\
         <div class=\"article-meta\">\
         <span class=\"article-date\">{date}</span>\
         <span class=\"article-author\">{author}</span>\
         </div>",
        title = escape_html(&article.title),
        date = escape_html(&article.date),
        author = escape_html(&article.author),
    );

    html.push_str("<div class=\"article-categories\"><span class=\"article-category-label\">Categories:</span>");
    for category in &article.categories {
        html.push_str(&category_chip(category));
    }
    html.push_str("</div><div class=\"article-tags\">");
    for tag in &article.tags {
        html.push_str(&tag_chip(tag));
    }
    html.push_str("</div></div>");

    html.push_str("<div class=\"article-content\">");
    html.push_str(body);
    html.push_str("</div>");

    html.push_str("<div class=\"article-nav\">");
    html.push_str(&nav_slot(article.id.checked_sub(1).filter(|&p| p >= 1), all, series, true));
    let max_id = all.iter().map(|a| a.id).max().unwrap_or(0);
    let next = (article.id < max_id).then_some(article.id + 1);
    html.push_str(&nav_slot(next, all, series, false));
    html.push_str("</div></div>");

    html
}

/// One side of the prev/next block. `None` yields the empty layout
/// placeholder.
fn nav_slot(id: Option<u32>, all: &[Article], series: &str, prev: bool) -> String {
    let class = if prev { "article-nav-prev" } else { "article-nav-next" };
    let Some(id) = id else {
        return format!("<div class=\"{class}\"></div>");
    };

    let title = all
        .iter()
        .find(|a| a.id == id)
        .map(|a| a.title.clone())
        .unwrap_or_else(|| format!("{series} #{id}"));
    let label = if prev { "Previous" } else { "Next" };

    format!(
        "<div class=\"{class}\">\
         <a href=\"?article={id}\" class=\"article-link\" data-article-id=\"{id}\">{label}: {}</a>\
         </div>",
        escape_html(&title),
    )
}
