//! Article record types shared by the data-source client, the embedded
//! fallback dataset, and the store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single content record with metadata and markdown-like body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Positive, unique, dense (1..N). Defines default ordering and
    /// prev/next adjacency.
    pub id: u32,
    pub title: String,
    /// Display string (e.g. "May 21, 2025"); also parsed for recency sort.
    pub date: String,
    pub author: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Raw markdown-like source. Immutable once loaded; rendered HTML is
    /// derived and cached by the store.
    pub content: String,
}

impl Article {
    /// Exact, case-sensitive category membership, independent of the order
    /// categories were listed in.
    pub fn in_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c == name)
    }

    /// Exact, case-sensitive tag membership.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t == name)
    }

    /// The display date parsed for "most recent" ordering.
    ///
    /// Returns `None` for unparseable dates; callers sort those last.
    pub fn published(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%B %d, %Y").ok()
    }

    /// The lightweight summary for index/menu use.
    pub fn summary(&self) -> ArticleSummary {
        ArticleSummary {
            id: self.id,
            filename: format!("article-{}.json", self.id),
            title: self.title.clone(),
            date: self.date.clone(),
            author: self.author.clone(),
            categories: self.categories.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// Lightweight article summary: everything a list or menu needs without
/// loading the full body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub id: u32,
    /// Resource name the full record is addressed by.
    pub filename: String,
    pub title: String,
    pub date: String,
    pub author: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// The index resource enumerating all articles.
///
/// Invariant: every id present here has a corresponding full [`Article`]
/// obtainable on demand, agreeing on id, title, date, author, categories
/// and tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleIndex {
    pub articles: Vec<ArticleSummary>,
}
