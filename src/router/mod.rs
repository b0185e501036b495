//! URL-driven view state and browser-style history.
//!
//! The URL is the source of truth on reload: every [`ViewState`] is
//! reconstructible from a query string alone, and serializes back to a
//! canonical query string. History entries store the `ViewState` itself, so
//! back/forward restores a view without re-parsing the URL.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// The mutually exclusive page modes the session can render.
///
/// Exactly one is active at a time; transitions are driven by explicit user
/// actions or back/forward navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewState {
    Home,
    Article(u32),
    Search(String),
    Category(String),
    Tag(String),
    CategoriesOverview,
    ArticleList(usize),
}

impl ViewState {
    /// Parses a query string (with or without the leading `?`).
    ///
    /// Resolution priority, first present parameter wins:
    /// `article > search > category > tag > page=categories >
    /// page=all-articles > page=<n>`. A value that fails to parse (a
    /// non-numeric article id, a blank search, a zero page) is skipped and
    /// resolution falls through to the next parameter. No parameters means
    /// Home.
    pub fn parse(query: &str) -> ViewState {
        let query = query.trim_start_matches('?');

        let mut article = None;
        let mut search = None;
        let mut category = None;
        let mut tag = None;
        let mut page = None;

        // First occurrence of each key wins, matching URLSearchParams::get.
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "article" if article.is_none() => article = Some(value.into_owned()),
                "search" if search.is_none() => search = Some(value.into_owned()),
                "category" if category.is_none() => category = Some(value.into_owned()),
                "tag" if tag.is_none() => tag = Some(value.into_owned()),
                "page" if page.is_none() => page = Some(value.into_owned()),
                _ => {}
            }
        }

        if let Some(id) = article.and_then(|v| v.parse::<u32>().ok()).filter(|&id| id > 0) {
            return ViewState::Article(id);
        }
        if let Some(q) = search.filter(|q| !q.trim().is_empty()) {
            return ViewState::Search(q.trim().to_string());
        }
        if let Some(c) = category.filter(|c| !c.is_empty()) {
            return ViewState::Category(c);
        }
        if let Some(t) = tag.filter(|t| !t.is_empty()) {
            return ViewState::Tag(t);
        }
        match page.as_deref() {
            Some("categories") => return ViewState::CategoriesOverview,
            Some("all-articles") => return ViewState::ArticleList(1),
            Some(n) => {
                if let Some(n) = n.parse::<usize>().ok().filter(|&n| n > 0) {
                    return ViewState::ArticleList(n);
                }
            }
            None => {}
        }

        ViewState::Home
    }

    /// The canonical query string for this state; Home is the bare path.
    pub fn to_query(&self) -> String {
        fn pair(key: &str, value: &str) -> String {
            let encoded = form_urlencoded::Serializer::new(String::new())
                .append_pair(key, value)
                .finish();
            format!("?{encoded}")
        }

        match self {
            ViewState::Home => String::new(),
            ViewState::Article(id) => format!("?article={id}"),
            ViewState::Search(q) => pair("search", q),
            ViewState::Category(c) => pair("category", c),
            ViewState::Tag(t) => pair("tag", t),
            ViewState::CategoriesOverview => "?page=categories".to_string(),
            ViewState::ArticleList(1) => "?page=all-articles".to_string(),
            ViewState::ArticleList(n) => format!("?page={n}"),
        }
    }
}

/// Browser-style history over [`ViewState`] entries.
///
/// Each entry is the state object itself — sufficient to reconstruct the
/// view without re-parsing a URL. Pushing truncates any forward entries,
/// exactly as `history.pushState` does.
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<ViewState>,
    cursor: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a new entry, dropping anything forward of the cursor.
    pub fn push(&mut self, state: ViewState) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(state);
        self.cursor = self.entries.len() - 1;
    }

    /// Replaces the current entry (initial load, clamped redirects).
    pub fn replace(&mut self, state: ViewState) {
        if self.entries.is_empty() {
            self.entries.push(state);
            self.cursor = 0;
        } else {
            self.entries[self.cursor] = state;
        }
    }

    pub fn current(&self) -> Option<&ViewState> {
        self.entries.get(self.cursor)
    }

    /// Moves back one entry. Returns `None` (without moving) when no prior
    /// state is recorded.
    pub fn back(&mut self) -> Option<&ViewState> {
        if self.cursor == 0 || self.entries.is_empty() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Moves forward one entry, if one exists.
    pub fn forward(&mut self) -> Option<&ViewState> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
