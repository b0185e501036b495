//! The categories overview page: every category with its article count and
//! a short preview of recent entries.

use std::collections::BTreeMap;

use crate::content::Article;
use crate::render::escape::{escape_attr, escape_html};

use super::home::recent_articles;

/// Preview entries shown per category card.
const PREVIEW_LIMIT: usize = 3;

/// Groups articles by category name, alphabetically.
pub fn group_by_category<'a>(all: &'a [Article]) -> BTreeMap<&'a str, Vec<&'a Article>> {
    let mut groups: BTreeMap<&str, Vec<&Article>> = BTreeMap::new();
    for article in all {
        for category in &article.categories {
            groups.entry(category.as_str()).or_default().push(article);
        }
    }
    groups
}

/// Renders the categories overview page.
pub fn render_overview(all: &[Article]) -> String {
    let mut html = String::from(
        "<div class=\"categories-page\">\
         <div class=\"page-header\">\
         <h1>Article Categories</h1>\
         <p class=\"page-intro\">Browse articles organized by category. \
         Click any category to view all of its articles.</p>\
         </div>\
         <div class=\"categories-grid\">",
    );

    for (category, members) in group_by_category(all) {
        let count = members.len();
        let plural = if count == 1 { "" } else { "s" };
        let owned: Vec<Article> = members.iter().map(|a| (*a).clone()).collect();
        let preview = recent_articles(&owned, PREVIEW_LIMIT);

        html.push_str(&format!(
            "<div class=\"category-card\" data-category=\"{attr}\">\
             <div class=\"category-header\">\
             <h2 class=\"category-title\">\
             <a href=\"?category={attr}\" class=\"category-link\" data-category=\"{attr}\">{name}</a>\
             </h2>\
             <span class=\"category-count\">{count} article{plural}</span>\
             </div>\
             <div class=\"category-preview\"><h4>Recent Articles:</h4>\
             <ul class=\"category-articles-preview\">",
            attr = escape_attr(category),
            name = escape_html(category),
        ));

        for article in &preview {
            html.push_str(&format!(
                "<li><a href=\"?article={id}\" class=\"article-preview-link\" data-id=\"{id}\">{title}</a>\
                 <span class=\"article-date\">{date}</span></li>",
                id = article.id,
                title = escape_html(&article.title),
                date = escape_html(&article.date),
            ));
        }

        if count > PREVIEW_LIMIT {
            html.push_str(&format!(
                "<li class=\"show-more\">\
                 <a href=\"?category={attr}\" class=\"category-link\" data-category=\"{attr}\">\
                 View all {count} articles</a></li>",
                attr = escape_attr(category),
            ));
        }

        html.push_str("</ul></div></div>");
    }

    html.push_str("</div></div>");
    html
}
