//! The sidebar article menu, decorated with read state.

use std::collections::BTreeSet;

use crate::content::ArticleIndex;
use crate::render::escape::escape_html;

/// Renders the article menu from the lightweight index.
///
/// Entries the reader has opened carry the `read` class; the entry matching
/// the active article (if any) carries `active`. Read decorations are
/// monotonic — they only ever appear, never disappear, across renders.
pub fn render_menu(index: &ArticleIndex, read: &BTreeSet<u32>, active: Option<u32>) -> String {
    if index.articles.is_empty() {
        return "<ul id=\"article-menu\"><li class=\"error-message\">No articles found</li></ul>"
            .to_string();
    }

    let mut html = String::from("<ul id=\"article-menu\">");
    for summary in &index.articles {
        let li_class = if active == Some(summary.id) { " class=\"active\"" } else { "" };
        let read_class = if read.contains(&summary.id) { " read" } else { "" };
        html.push_str(&format!(
            "<li{li_class}><a href=\"?article={id}\" data-id=\"{id}\" class=\"article-link{read_class}\">{title}</a></li>",
            id = summary.id,
            title = escape_html(&summary.title),
        ));
    }
    html.push_str("</ul>");
    html
}
