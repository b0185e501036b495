//! The home (welcome) page with its recent-articles block.

use crate::content::Article;
use crate::render::escape::escape_html;

/// Most-recent-first ordering: parsed display dates descending, articles
/// with unparseable dates last, ties broken by id ascending.
pub fn recent_articles<'a>(all: &'a [Article], limit: usize) -> Vec<&'a Article> {
    let mut sorted: Vec<&Article> = all.iter().collect();
    sorted.sort_by(|a, b| {
        b.published()
            .cmp(&a.published())
            .then_with(|| a.id.cmp(&b.id))
    });
    sorted.truncate(limit);
    sorted
}

/// Renders the welcome page.
pub fn render_home(all: &[Article], site_name: &str, recent_limit: usize) -> String {
    let site = escape_html(site_name);
    let mut html = format!(
        "<div class=\"welcome-message\">\
         <h1>Welcome to {site}</h1>\
         <div class=\"project-description\">\
         <p>{site} is a knowledge-sharing site of short, focused technical articles.</p>\
         <p>Select an article from the menu to begin reading, or browse by category.</p>\
         <p><a href=\"?page=all-articles\" id=\"all-articles-link\" class=\"btn-primary\">Browse All Articles</a></p>\
         </div>\
         <div class=\"recent-articles\"><h3>Recent Articles</h3>"
    );

    let recent = recent_articles(all, recent_limit);
    if recent.is_empty() {
        html.push_str("<p class=\"no-articles\">No articles yet.</p>");
    } else {
        html.push_str("<ul class=\"recent-articles-list\">");
        for article in recent {
            html.push_str(&format!(
                "<li><a href=\"?article={id}\" class=\"recent-article-link\" data-id=\"{id}\">\
                 <div class=\"recent-article-title\">{title}</div>\
                 <div class=\"recent-article-meta\"><span class=\"recent-article-date\">{date}</span></div>\
                 </a></li>",
                id = article.id,
                title = escape_html(&article.title),
                date = escape_html(&article.date),
            ));
        }
        html.push_str("</ul>");
    }

    html.push_str("</div></div>");
    html
}
