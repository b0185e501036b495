//! Filtered, paged article lists and their pagination controls.

use std::collections::BTreeSet;

use crate::content::Article;
use crate::render;
use crate::render::escape::escape_html;

use super::{category_chip, tag_chip};

/// Articles per page when no configuration overrides it.
pub const DEFAULT_PAGE_SIZE: usize = 4;

/// Characters of plain-text snippet shown per list entry.
const LIST_SNIPPET_LEN: usize = 200;

/// Maximum numbered buttons in the pagination window.
const MAX_PAGE_BUTTONS: usize = 5;

/// One page of a larger list.
#[derive(Debug, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// The clamped page number actually shown, 1-based.
    pub page: usize,
    /// Always at least 1, even for an empty list.
    pub total_pages: usize,
}

/// Slices one page out of `items`, clamping `page` into `[1, total_pages]`.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_pages = items.len().div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * page_size;
    let end = (start + page_size).min(items.len());
    Page {
        items: &items[start.min(items.len())..end],
        page,
        total_pages,
    }
}

/// Exact, case-sensitive category membership filter.
pub fn filter_by_category<'a>(all: &'a [Article], name: &str) -> Vec<&'a Article> {
    all.iter().filter(|a| a.in_category(name)).collect()
}

/// Exact, case-sensitive tag membership filter.
pub fn filter_by_tag<'a>(all: &'a [Article], name: &str) -> Vec<&'a Article> {
    all.iter().filter(|a| a.has_tag(name)).collect()
}

/// Renders one page of an article list.
///
/// `total_count` is the size of the whole (filtered) list, not the page.
/// Entries the reader has opened before carry the `read` decoration.
pub fn render_page(
    page: &Page<'_, &Article>,
    total_count: usize,
    heading: &str,
    read: &BTreeSet<u32>,
) -> String {
    let mut html = format!(
        "<div class=\"articles-list-container\">\
         <h1 class=\"articles-list-title\">{}</h1>\
         <div class=\"articles-list-info\">\
         <p class=\"articles-list-count\">\
         <span class=\"count-total\">{total_count}</span> articles total, showing page \
         <span class=\"count-page\">{}</span> of \
         <span class=\"count-total-pages\">{}</span>\
         </p></div>",
        escape_html(heading),
        page.page,
        page.total_pages,
    );

    if page.items.is_empty() {
        html.push_str("<p class=\"no-articles\">No articles found.</p>");
    } else {
        html.push_str("<div class=\"articles-list\">");
        for article in page.items {
            html.push_str(&list_item(article, read.contains(&article.id)));
        }
        html.push_str("</div>");

        if page.total_pages > 1 {
            html.push_str(&pagination_controls(page.page, page.total_pages));
        }
    }

    html.push_str("</div>");
    html
}

fn list_item(article: &Article, is_read: bool) -> String {
    let read_class = if is_read { " read" } else { "" };
    let snippet = list_snippet(&article.content);

    let mut html = format!(
        "<div class=\"article-list-item{read_class}\">\
         <h2><a href=\"?article={id}\" data-id=\"{id}\" class=\"article-list-link{read_class}\">{title}</a></h2>\
         <div class=\"article-list-meta\">\
         <span class=\"article-list-date\">{date}</span>\
         <span class=\"article-list-author\">{author}</span>\
         </div>",
        id = article.id,
        title = escape_html(&article.title),
        date = escape_html(&article.date),
        author = escape_html(&article.author),
    );

    html.push_str("<div class=\"article-list-categories\">");
    for category in &article.categories {
        html.push_str(&category_chip(category));
    }
    html.push_str("</div><div class=\"article-list-tags\">");
    for tag in &article.tags {
        html.push_str(&tag_chip(tag));
    }
    html.push_str("</div>");

    html.push_str(&format!(
        "<p class=\"article-list-snippet\">{}</p>\
         <a href=\"?article={id}\" data-id=\"{id}\" class=\"read-more-link\">Read More</a>\
         </div>",
        escape_html(&snippet),
        id = article.id,
    ));

    html
}

/// Plain-text preview of an article body, truncated to a fixed length on a
/// character boundary.
fn list_snippet(raw: &str) -> String {
    let text = render::plain_text(raw);
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut snippet: String = text.chars().take(LIST_SNIPPET_LEN).collect();
    snippet = snippet.trim().to_string();
    snippet.push_str("...");
    snippet
}

/// Numbered pagination controls: prev/next arrows (disabled at the bounds)
/// and a window of at most [`MAX_PAGE_BUTTONS`] page numbers, with ellipsis
/// and first/last links when the window does not reach the ends.
pub fn pagination_controls(page: usize, total_pages: usize) -> String {
    let mut start = page.saturating_sub(MAX_PAGE_BUTTONS / 2).max(1);
    let end = (start + MAX_PAGE_BUTTONS - 1).min(total_pages);
    if end - start + 1 < MAX_PAGE_BUTTONS {
        start = end.saturating_sub(MAX_PAGE_BUTTONS - 1).max(1);
    }

    let mut html = String::from("<div class=\"pagination\">");

    let prev_disabled = if page == 1 { " pagination-disabled" } else { "" };
    html.push_str(&format!(
        "<div class=\"pagination-item pagination-prev{prev_disabled}\">\
         <a href=\"?page={}\" class=\"pagination-link{prev_disabled}\" data-page=\"{}\" aria-label=\"Previous page\">&laquo;</a>\
         </div>",
        page.saturating_sub(1).max(1),
        page.saturating_sub(1),
    ));

    if start > 1 {
        html.push_str(
            "<div class=\"pagination-item\">\
             <a href=\"?page=1\" class=\"pagination-link\" data-page=\"1\">1</a>\
             </div>",
        );
        if start > 2 {
            html.push_str("<div class=\"pagination-item pagination-ellipsis\">...</div>");
        }
    }

    for i in start..=end {
        let active = if i == page { " active" } else { "" };
        html.push_str(&format!(
            "<div class=\"pagination-item\">\
             <a href=\"?page={i}\" class=\"pagination-link{active}\" data-page=\"{i}\">{i}</a>\
             </div>"
        ));
    }

    if end < total_pages {
        if end < total_pages - 1 {
            html.push_str("<div class=\"pagination-item pagination-ellipsis\">...</div>");
        }
        html.push_str(&format!(
            "<div class=\"pagination-item\">\
             <a href=\"?page={total_pages}\" class=\"pagination-link\" data-page=\"{total_pages}\">{total_pages}</a>\
             </div>"
        ));
    }

    let next_disabled = if page == total_pages { " pagination-disabled" } else { "" };
    html.push_str(&format!(
        "<div class=\"pagination-item pagination-next{next_disabled}\">\
         <a href=\"?page={}\" class=\"pagination-link{next_disabled}\" data-page=\"{}\" aria-label=\"Next page\">&raquo;</a>\
         </div>",
        (page + 1).min(total_pages),
        page + 1,
    ));

    html.push_str("</div>");
    html
}
