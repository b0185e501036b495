//! View builders: pure functions from data to page HTML.
//!
//! Each builder returns the markup for the single content surface; nothing
//! here touches the store or the session. Category and tag chips are
//! emitted keyboard-reachable (`tabindex`/`role`) because they are
//! interactive non-link elements.

pub mod article;
pub mod categories;
pub mod home;
pub mod list;
pub mod menu;
pub mod search;

use crate::render::escape::{escape_attr, escape_html};

/// Inline empty state for an unknown article id. Not fatal: the rest of the
/// page (menu, search, theme) stays operable.
pub fn not_found(id: u32) -> String {
    format!(
        "<div class=\"error-message\">Article {id} not found.</div>\
         <p><a href=\"?page=all-articles\" class=\"article-link\">Browse all articles</a></p>"
    )
}

pub(crate) fn category_chip(name: &str) -> String {
    format!(
        "<span class=\"article-category\" data-category=\"{}\" tabindex=\"0\" role=\"button\">{}</span>",
        escape_attr(name),
        escape_html(name),
    )
}

pub(crate) fn tag_chip(name: &str) -> String {
    format!(
        "<span class=\"article-tag\" data-tag=\"{}\" tabindex=\"0\" role=\"button\">{}</span>",
        escape_attr(name),
        escape_html(name),
    )
}
