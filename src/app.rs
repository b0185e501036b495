//! The single-page session.
//!
//! Owns the active [`ViewState`], the history stack, the persisted
//! read-state/theme, and the one content surface. Every render is tagged
//! with a generation counter captured before its suspension points; a
//! render that resolves after a newer navigation fails the generation check
//! at commit time and is silently discarded. That check is what guarantees
//! the surface is only ever mutated by the render that owns the active
//! view — no locking needed on a cooperative event loop.

use std::sync::Arc;

use crate::accessibility;
use crate::config::Config;
use crate::content::ContentStore;
use crate::router::{History, ViewState};
use crate::share::{self, Clipboard, CopyFeedback};
use crate::state::{StateStore, Theme};
use crate::views;

/// Result of building one view, ready to commit to the surface.
#[derive(Debug)]
pub struct ViewOutput {
    pub html: String,
    pub title: String,
    /// Article id to record as read when this output commits.
    pub mark_read: Option<u32>,
}

/// How a navigation interacts with the history stack.
enum HistoryOp {
    /// User action: push a new entry, truncating forward history.
    Push,
    /// Initial load or redirect: overwrite the current entry.
    Replace,
    /// Back/forward traversal: the stack already moved.
    None,
}

pub struct Session {
    store: Arc<ContentStore>,
    state: StateStore,
    config: Config,
    history: History,
    active: ViewState,
    generation: u64,
    surface_html: String,
    page_title: String,
}

impl Session {
    pub fn new(store: Arc<ContentStore>, state: StateStore, config: Config) -> Self {
        let page_title = format!("{} - Articles", config.site_name);
        Self {
            store,
            state,
            config,
            history: History::new(),
            active: ViewState::Home,
            generation: 0,
            surface_html: String::new(),
            page_title,
        }
    }

    /// Initial load: parse the URL query, render the resulting view, and
    /// seed history with a replace (reload must not grow the stack).
    pub async fn start(&mut self, query: &str) {
        let state = ViewState::parse(query);
        self.render_state(state, HistoryOp::Replace).await;
    }

    /// Explicit user action targeting a new view: menu click, search
    /// submit, pagination click, category/tag click.
    pub async fn navigate(&mut self, target: ViewState) {
        self.render_state(target, HistoryOp::Push).await;
    }

    /// Browser back. With no prior entry recorded, the home view is shown.
    pub async fn back(&mut self) {
        match self.history.back().cloned() {
            Some(state) => self.render_state(state, HistoryOp::None).await,
            None => self.render_state(ViewState::Home, HistoryOp::Replace).await,
        }
    }

    /// Browser forward; a no-op at the newest entry.
    pub async fn forward(&mut self) {
        if let Some(state) = self.history.forward().cloned() {
            self.render_state(state, HistoryOp::None).await;
        }
    }

    async fn render_state(&mut self, state: ViewState, op: HistoryOp) {
        let generation = self.begin(state.clone(), op);
        let output = self.build_view(&state).await;
        self.commit(generation, output);
    }

    /// Claims a navigation: sets the active state, syncs history, and
    /// returns the generation token the eventual [`commit`](Self::commit)
    /// must present.
    pub fn begin_navigation(&mut self, target: ViewState) -> u64 {
        self.begin(target, HistoryOp::Push)
    }

    fn begin(&mut self, state: ViewState, op: HistoryOp) -> u64 {
        self.generation += 1;
        self.active = state.clone();
        match op {
            HistoryOp::Push => self.history.push(state),
            HistoryOp::Replace => self.history.replace(state),
            HistoryOp::None => {}
        }
        self.generation
    }

    /// Commits a built view to the content surface.
    ///
    /// Returns false — leaving the surface untouched — when a newer
    /// navigation superseded this render while it was suspended. On commit,
    /// entering an article records its id into read-state (once per
    /// distinct id) and the page title updates.
    pub fn commit(&mut self, generation: u64, output: ViewOutput) -> bool {
        if generation != self.generation {
            tracing::debug!(
                expected = self.generation,
                got = generation,
                "Ignoring stale render (generation mismatch)"
            );
            return false;
        }

        if let Some(id) = output.mark_read {
            if self.state.mark_read(id) {
                tracing::debug!(id, "Article recorded as read");
            }
        }

        self.surface_html = accessibility::apply(&output.html);
        self.page_title = output.title;
        true
    }

    /// Builds the page for a view state. Pure with respect to session
    /// mutation: suspension points here are the store's load/fetch paths.
    pub async fn build_view(&self, state: &ViewState) -> ViewOutput {
        let site = &self.config.site_name;

        match state {
            ViewState::Home => {
                let all = self.store.load_all().await;
                ViewOutput {
                    html: views::home::render_home(all, site, self.config.recent_limit),
                    title: format!("{site} - Articles"),
                    mark_read: None,
                }
            }

            ViewState::Article(id) => match self.store.get_by_id(*id).await {
                Some(article) => {
                    // Neighbor links need the full list resident.
                    let all = self.store.load_all().await;
                    let body = self.store.rendered_html(&article);
                    let mut html =
                        views::article::build(&article, all, &body, &self.config.series_name);

                    // Share block sits between the body and the prev/next nav.
                    let links = share::share_links(&state.to_query(), &article.title);
                    let buttons = share::share_buttons_html(&links);
                    match html.rfind("<div class=\"article-nav\">") {
                        Some(at) => html.insert_str(at, &buttons),
                        None => html.push_str(&buttons),
                    }

                    ViewOutput {
                        title: format!("{} - {site}", article.title),
                        mark_read: Some(article.id),
                        html,
                    }
                }
                None => ViewOutput {
                    html: views::not_found(*id),
                    title: format!("{site} - Articles"),
                    mark_read: None,
                },
            },

            ViewState::Search(query) => {
                let all = self.store.load_all().await;
                let hits = views::search::search(all, query);
                ViewOutput {
                    html: views::search::render_results(&hits, query),
                    title: format!("Search: {query} - {site}"),
                    mark_read: None,
                }
            }

            ViewState::Category(name) => {
                let all = self.store.load_all().await;
                let filtered = views::list::filter_by_category(all, name);
                self.list_output(&filtered, 1, &format!("Articles in Category: {name}"))
            }

            ViewState::Tag(name) => {
                let all = self.store.load_all().await;
                let filtered = views::list::filter_by_tag(all, name);
                self.list_output(&filtered, 1, &format!("Articles Tagged: {name}"))
            }

            ViewState::CategoriesOverview => {
                let all = self.store.load_all().await;
                ViewOutput {
                    html: views::categories::render_overview(all),
                    title: format!("Categories - {site}"),
                    mark_read: None,
                }
            }

            ViewState::ArticleList(page) => {
                let all = self.store.load_all().await;
                let refs: Vec<_> = all.iter().collect();
                let mut output = self.list_output(&refs, *page, "All Articles");
                output.title = format!("All Articles - {site}");
                output
            }
        }
    }

    fn list_output(
        &self,
        filtered: &[&crate::content::Article],
        page: usize,
        heading: &str,
    ) -> ViewOutput {
        let page = views::list::paginate(filtered, page, self.config.page_size);
        ViewOutput {
            html: views::list::render_page(&page, filtered.len(), heading, self.state.read_ids()),
            title: format!("{heading} - {}", self.config.site_name),
            mark_read: None,
        }
    }

    /// The sidebar menu for the current corpus, decorated with read state
    /// and the active article.
    pub async fn menu_html(&self) -> String {
        let index = self.store.index().await;
        let active = match &self.active {
            ViewState::Article(id) => Some(*id),
            _ => None,
        };
        views::menu::render_menu(&index, self.state.read_ids(), active)
    }

    /// Current page URL, origin-relative: the canonical query string of the
    /// active view (empty for home). Hosts prepend their origin.
    pub fn page_url(&self) -> String {
        self.active.to_query()
    }

    /// Copies the current page URL via the host clipboard; failures become
    /// transient feedback, never errors.
    pub fn copy_current_url(&self, clipboard: &mut dyn Clipboard) -> CopyFeedback {
        share::copy_page_url(clipboard, &self.page_url())
    }

    pub fn active(&self) -> &ViewState {
        &self.active
    }

    pub fn surface_html(&self) -> &str {
        &self.surface_html
    }

    pub fn page_title(&self) -> &str {
        &self.page_title
    }

    pub fn theme(&self) -> Theme {
        self.state.theme()
    }

    /// Flips and persists the theme, returning the new variant.
    pub fn toggle_theme(&mut self) -> Theme {
        self.state.toggle_theme()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StateStore;
    use tempfile::TempDir;

    fn session() -> (Session, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(ContentStore::new(reqwest::Client::new(), None));
        let state = StateStore::load(dir.path().join("state.json"), false);
        (Session::new(store, state, Config::default()), dir)
    }

    #[tokio::test]
    async fn start_with_no_params_shows_home() {
        let (mut session, _dir) = session();
        session.start("").await;
        assert_eq!(session.active(), &ViewState::Home);
        assert!(session.surface_html().contains("Welcome to Gazette"));
        assert_eq!(session.page_title(), "Gazette - Articles");
        assert_eq!(session.history_len(), 1);
    }

    #[tokio::test]
    async fn article_route_renders_and_marks_read() {
        let (mut session, _dir) = session();
        session.start("?article=2").await;

        assert!(session.surface_html().contains("Zero Trust in Practice"));
        assert!(session.page_title().starts_with("Gazette #2"));

        let menu = session.menu_html().await;
        assert!(menu.contains("article-link read"));
        assert_eq!(menu.matches("article-link read").count(), 1);
    }

    #[tokio::test]
    async fn entering_an_article_twice_records_it_once() {
        let (mut session, dir) = session();
        session.start("?article=3").await;
        session.navigate(ViewState::Home).await;
        session.navigate(ViewState::Article(3)).await;

        let reloaded = StateStore::load(dir.path().join("state.json"), false);
        assert_eq!(reloaded.read_ids().iter().copied().collect::<Vec<_>>(), vec![3]);
    }

    #[tokio::test]
    async fn back_with_no_prior_state_restores_home() {
        let (mut session, _dir) = session();
        session.start("?article=2").await;
        session.back().await;

        assert_eq!(session.active(), &ViewState::Home);
        assert!(session.surface_html().contains("Welcome to Gazette"));
    }

    #[tokio::test]
    async fn back_restores_encoded_history_entry() {
        let (mut session, _dir) = session();
        session.start("").await;
        session.navigate(ViewState::Article(2)).await;
        session.navigate(ViewState::CategoriesOverview).await;

        session.back().await;
        assert_eq!(session.active(), &ViewState::Article(2));
        assert!(session.surface_html().contains("Zero Trust in Practice"));

        session.forward().await;
        assert_eq!(session.active(), &ViewState::CategoriesOverview);
    }

    #[tokio::test]
    async fn stale_render_is_discarded() {
        let (mut session, _dir) = session();
        session.start("").await;

        // A slow article render begins...
        let stale_gen = session.begin_navigation(ViewState::Article(2));
        let stale_output = session.build_view(&ViewState::Article(2)).await;

        // ...but the user navigates away before it resolves.
        session.navigate(ViewState::CategoriesOverview).await;
        let surface_before = session.surface_html().to_string();

        assert!(!session.commit(stale_gen, stale_output));
        assert_eq!(session.surface_html(), surface_before);
        assert_eq!(session.active(), &ViewState::CategoriesOverview);
    }

    #[tokio::test]
    async fn rendering_a_state_is_idempotent() {
        let (mut session, _dir) = session();
        session.navigate(ViewState::Search("zero trust".to_string())).await;
        let first = session.surface_html().to_string();

        session.navigate(ViewState::Search("zero trust".to_string())).await;
        assert_eq!(session.surface_html(), first);
    }

    #[tokio::test]
    async fn unknown_article_shows_inline_not_found() {
        let (mut session, dir) = session();
        session.start("?article=999").await;

        assert!(session.surface_html().contains("Article 999 not found"));
        assert_eq!(session.page_title(), "Gazette - Articles");

        // The miss is not recorded as read.
        let reloaded = StateStore::load(dir.path().join("state.json"), false);
        assert!(reloaded.read_ids().is_empty());

        // The rest of the session stays operable.
        session.navigate(ViewState::Home).await;
        assert!(session.surface_html().contains("Welcome"));
    }

    #[tokio::test]
    async fn category_route_filters_case_sensitively() {
        let (mut session, _dir) = session();
        session.start("?category=Security").await;
        assert!(session.surface_html().contains("Articles in Category: Security"));
        assert!(session.surface_html().contains("article-list-item"));

        session.navigate(ViewState::Category("security".to_string())).await;
        assert!(session.surface_html().contains("No articles found."));
    }

    #[tokio::test]
    async fn list_route_paginates_and_clamps() {
        let (mut session, _dir) = session();
        session.start("?page=all-articles").await;
        assert!(session.surface_html().contains("<span class=\"count-page\">1</span>"));
        assert_eq!(session.page_title(), "All Articles - Gazette");

        // Out-of-range page clamps to the last page (6 articles, size 4 => 2 pages).
        session.navigate(ViewState::ArticleList(99)).await;
        assert!(session.surface_html().contains("<span class=\"count-page\">2</span>"));
    }

    #[tokio::test]
    async fn article_page_carries_share_block_before_nav() {
        let (mut session, _dir) = session();
        session.start("?article=2").await;
        let html = session.surface_html();

        let share_at = html.find("social-share-container").unwrap();
        let nav_at = html.find("<div class=\"article-nav\">").unwrap();
        assert!(share_at < nav_at);
        assert!(html.contains("twitter.com/intent/tweet"));
        // The share URL carries the encoded page URL.
        assert!(html.contains("url=%3Farticle%3D2"));
    }

    #[tokio::test]
    async fn every_image_on_the_surface_has_alt() {
        let (mut session, _dir) = session();
        // Article 1 opens with an image.
        session.start("?article=1").await;
        let html = session.surface_html();
        for (i, _) in html.match_indices("<img") {
            let tag_end = html[i..].find('>').map(|j| i + j).unwrap();
            assert!(html[i..tag_end].contains("alt="), "img without alt at {i}");
        }
    }

    #[tokio::test]
    async fn copy_url_reflects_active_view() {
        struct Recorder(Option<String>);
        impl Clipboard for Recorder {
            fn write_text(&mut self, text: &str) -> Result<(), share::ClipboardError> {
                self.0 = Some(text.to_string());
                Ok(())
            }
        }

        let (mut session, _dir) = session();
        session.start("?article=2").await;

        let mut clip = Recorder(None);
        let feedback = session.copy_current_url(&mut clip);
        assert_eq!(feedback.outcome(), share::CopyOutcome::Copied);
        assert_eq!(clip.0.as_deref(), Some("?article=2"));
    }

    #[tokio::test]
    async fn theme_toggle_round_trips() {
        let (mut session, dir) = session();
        assert_eq!(session.theme(), Theme::Light);
        assert_eq!(session.toggle_theme(), Theme::Dark);

        let reloaded = StateStore::load(dir.path().join("state.json"), false);
        assert_eq!(reloaded.theme(), Theme::Dark);
    }
}
