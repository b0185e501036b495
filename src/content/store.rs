//! The content store: owns the loaded corpus and its caching/fallback
//! policy.
//!
//! Loading is memoized — the corpus is fetched at most once per process and
//! every caller sees the same id-sorted view regardless of the completion
//! order of the underlying concurrent fetches. Failures degrade silently to
//! the embedded dataset; the outcome is recorded as an explicit
//! [`ContentSource`] so fallback activation stays observable.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use futures::stream::{self, StreamExt};
use lru::LruCache;
use tokio::sync::OnceCell;

use super::{fallback, fetch};
use super::types::{Article, ArticleIndex};
use crate::render;

/// Bound on concurrent per-article fetches during the bulk load.
const FETCH_CONCURRENCY: usize = 8;

/// Capacity of the rendered-HTML cache. Corpora are small; this is a
/// safety bound, not a tuning knob.
const RENDERED_CACHE_CAP: NonZeroUsize = match NonZeroUsize::new(64) {
    Some(n) => n,
    None => unreachable!(),
};

/// Where the loaded corpus came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    /// Loaded from the primary data source (individual records may still
    /// have used embedded fallbacks).
    Remote,
    /// The primary source was unreachable or malformed; the whole corpus is
    /// the embedded dataset.
    Fallback,
}

struct Corpus {
    articles: Vec<Article>,
    source: ContentSource,
}

/// Owns the article corpus, its load-once cache, and the per-article
/// rendered-HTML cache.
pub struct ContentStore {
    client: reqwest::Client,
    /// Primary data source base URL. `None` means there is no reachable
    /// source at all (the embedded dataset is used directly).
    base_url: Option<String>,
    corpus: OnceCell<Corpus>,
    rendered: Mutex<LruCache<u32, Arc<str>>>,
}

impl ContentStore {
    pub fn new(client: reqwest::Client, base_url: Option<String>) -> Self {
        Self {
            client,
            base_url,
            corpus: OnceCell::new(),
            rendered: Mutex::new(LruCache::new(RENDERED_CACHE_CAP)),
        }
    }

    async fn corpus(&self) -> &Corpus {
        self.corpus.get_or_init(|| self.load_corpus()).await
    }

    /// Loads the full corpus once. Idempotent: later calls return the same
    /// cached sequence without re-fetching.
    ///
    /// Results are sorted ascending by id regardless of arrival order, and
    /// this never fails: any unreachable or malformed source degrades to
    /// the embedded dataset with a diagnostic log entry.
    pub async fn load_all(&self) -> &[Article] {
        &self.corpus().await.articles
    }

    /// Whether the loaded corpus came from the primary source or the
    /// embedded fallback.
    pub async fn source(&self) -> ContentSource {
        self.corpus().await.source
    }

    /// The lightweight index over the loaded corpus, id-ascending.
    pub async fn index(&self) -> ArticleIndex {
        ArticleIndex {
            articles: self.load_all().await.iter().map(Article::summary).collect(),
        }
    }

    /// Resolves one article by id.
    ///
    /// Prefers the freshest individually-addressable record, then the
    /// bulk-loaded record, then the embedded dataset, returning `None` only
    /// when all three miss.
    pub async fn get_by_id(&self, id: u32) -> Option<Article> {
        if let Some(base) = &self.base_url {
            match fetch::fetch_article_by_id(&self.client, base, id).await {
                Ok(article) => return Some(article),
                Err(e) => {
                    tracing::debug!(id, error = %e, "Individual article fetch missed, using loaded set");
                }
            }
        }

        if let Some(article) = self.load_all().await.iter().find(|a| a.id == id) {
            return Some(article.clone());
        }

        fallback::article_by_id(id)
    }

    /// Rendered body HTML for an article, generated on first use and cached
    /// for the process lifetime. Raw content is immutable once loaded, so
    /// the cache never needs invalidation.
    pub fn rendered_html(&self, article: &Article) -> Arc<str> {
        let mut cache = match self.rendered.lock() {
            Ok(guard) => guard,
            // A panic while rendering poisons the lock; rendering is pure,
            // so the cached entries are still valid.
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(html) = cache.get(&article.id) {
            return Arc::clone(html);
        }

        let html: Arc<str> = Arc::from(render::render(&article.content));
        cache.put(article.id, Arc::clone(&html));
        html
    }

    async fn load_corpus(&self) -> Corpus {
        let Some(base) = self.base_url.clone() else {
            tracing::info!("No data source configured, using embedded articles");
            return Corpus {
                articles: fallback::articles(),
                source: ContentSource::Fallback,
            };
        };

        let index = match fetch::fetch_index(&self.client, &base).await {
            Ok(index) => index,
            Err(e) => {
                tracing::warn!(error = %e, "Index fetch failed, falling back to embedded articles");
                return Corpus {
                    articles: fallback::articles(),
                    source: ContentSource::Fallback,
                };
            }
        };

        // Fetch article bodies concurrently, then sort after the gather:
        // completion order carries no meaning.
        let mut articles: Vec<Article> = stream::iter(index.articles)
            .map(|summary| {
                let client = self.client.clone();
                let base = base.clone();
                async move {
                    match fetch::fetch_article(&client, &base, &summary.filename).await {
                        Ok(article) => Some(article),
                        Err(e) => {
                            tracing::warn!(
                                id = summary.id,
                                error = %e,
                                "Article fetch failed, trying embedded fallback"
                            );
                            fallback::article_by_id(summary.id)
                        }
                    }
                }
            })
            .buffer_unordered(FETCH_CONCURRENCY)
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .flatten()
            .collect();

        articles.sort_by_key(|a| a.id);
        tracing::info!(count = articles.len(), "Articles loaded from data source");

        Corpus {
            articles,
            source: ContentSource::Remote,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn index_body(ids: &[u32]) -> String {
        let entries: Vec<String> = ids
            .iter()
            .map(|id| {
                format!(
                    r#"{{"id":{id},"filename":"article-{id}.json","title":"Remote {id}","date":"May 2{id}, 2025","author":"A","categories":[],"tags":[]}}"#
                )
            })
            .collect();
        format!(r#"{{"articles":[{}]}}"#, entries.join(","))
    }

    fn article_body(id: u32) -> String {
        format!(
            r#"{{"id":{id},"title":"Remote {id}","date":"May 2{id}, 2025","author":"A","categories":[],"tags":[],"content":"Body {id}"}}"#
        )
    }

    async fn mock_source(ids: &[u32]) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/index.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(index_body(ids)))
            .mount(&server)
            .await;
        for &id in ids {
            Mock::given(method("GET"))
                .and(path(format!("/article-{id}.json")))
                .respond_with(ResponseTemplate::new(200).set_body_string(article_body(id)))
                .mount(&server)
                .await;
        }
        server
    }

    #[tokio::test]
    async fn load_all_sorts_by_id_regardless_of_index_order() {
        let server = mock_source(&[3, 1, 2]).await;
        let store = ContentStore::new(reqwest::Client::new(), Some(server.uri()));

        let all = store.load_all().await;
        let ids: Vec<u32> = all.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(store.source().await, ContentSource::Remote);
    }

    #[tokio::test]
    async fn load_all_is_memoized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/index.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(index_body(&[1])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/article-1.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(article_body(1)))
            .expect(1)
            .mount(&server)
            .await;

        let store = ContentStore::new(reqwest::Client::new(), Some(server.uri()));
        let first = store.load_all().await.len();
        let second = store.load_all().await.len();
        assert_eq!(first, second);
        // Mock expectations verify no re-fetch happened on drop.
    }

    #[tokio::test]
    async fn unreachable_index_falls_back_silently() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let store = ContentStore::new(reqwest::Client::new(), Some(server.uri()));
        let all = store.load_all().await;
        assert!(!all.is_empty());
        assert_eq!(store.source().await, ContentSource::Fallback);
    }

    #[tokio::test]
    async fn failed_article_uses_embedded_record() {
        // Index lists articles 1 and 2; only article 2 is served.
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/index.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(index_body(&[1, 2])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/article-2.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(article_body(2)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/article-1.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let store = ContentStore::new(reqwest::Client::new(), Some(server.uri()));
        let all = store.load_all().await;
        let ids: Vec<u32> = all.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2]);
        // Article 1 is the embedded record, article 2 the remote one.
        assert_eq!(all[0].title, "Gazette #1");
        assert_eq!(all[1].title, "Remote 2");
        assert_eq!(store.source().await, ContentSource::Remote);
    }

    #[tokio::test]
    async fn no_source_means_embedded_corpus() {
        let store = ContentStore::new(reqwest::Client::new(), None);
        let all = store.load_all().await;
        assert!(!all.is_empty());
        assert_eq!(store.source().await, ContentSource::Fallback);
    }

    #[tokio::test]
    async fn get_by_id_prefers_fresh_record() {
        let server = mock_source(&[1]).await;
        let store = ContentStore::new(reqwest::Client::new(), Some(server.uri()));

        let article = store.get_by_id(1).await.unwrap();
        assert_eq!(article.title, "Remote 1");
    }

    #[tokio::test]
    async fn get_by_id_falls_back_to_embedded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let store = ContentStore::new(reqwest::Client::new(), Some(server.uri()));
        // Corpus is the fallback set; id 3 resolves from it.
        let article = store.get_by_id(3).await.unwrap();
        assert_eq!(article.id, 3);

        assert!(store.get_by_id(999).await.is_none());
    }

    #[tokio::test]
    async fn rendered_html_is_cached_per_article() {
        let store = ContentStore::new(reqwest::Client::new(), None);
        let article = fallback::article_by_id(2).unwrap();

        let first = store.rendered_html(&article);
        let second = store.rendered_html(&article);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(first.contains("<h1>Zero Trust in Practice</h1>"));
    }

    #[tokio::test]
    async fn index_matches_full_records() {
        let store = ContentStore::new(reqwest::Client::new(), None);
        let index = store.index().await;
        let all = store.load_all().await;
        assert_eq!(index.articles.len(), all.len());
        for (s, a) in index.articles.iter().zip(all) {
            assert_eq!(s.id, a.id);
            assert_eq!(s.title, a.title);
        }
    }
}
