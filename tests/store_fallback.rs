//! Content store lifecycle: deterministic ordering, fallback observability,
//! and the freshest-first lookup priority.

use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gazette::content::{ContentSource, ContentStore};

fn article_json(id: u32, title: &str) -> String {
    format!(
        r#"{{"id":{id},"title":"{title}","date":"May 21, 2025","author":"A","categories":[],"tags":[],"content":"Body {id}"}}"#
    )
}

fn index_json(ids: &[u32]) -> String {
    let entries: Vec<String> = ids
        .iter()
        .map(|id| {
            format!(
                r#"{{"id":{id},"filename":"article-{id}.json","title":"Remote {id}","date":"May 21, 2025","author":"A","categories":[],"tags":[]}}"#
            )
        })
        .collect();
    format!(r#"{{"articles":[{}]}}"#, entries.join(","))
}

async fn serve_index(server: &MockServer, ids: &[u32]) {
    Mock::given(method("GET"))
        .and(path("/index.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(index_json(ids)))
        .mount(server)
        .await;
}

async fn serve_article(server: &MockServer, id: u32, title: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/article-{id}.json")))
        .respond_with(ResponseTemplate::new(200).set_body_string(article_json(id, title)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn corpus_is_id_sorted_for_any_index_order() {
    let server = MockServer::start().await;
    serve_index(&server, &[5, 2, 4, 1, 3]).await;
    for id in 1..=5 {
        serve_article(&server, id, &format!("Remote {id}")).await;
    }

    let store = ContentStore::new(reqwest::Client::new(), Some(server.uri()));
    let ids: Vec<u32> = store.load_all().await.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(store.source().await, ContentSource::Remote);
}

#[tokio::test]
async fn index_and_full_records_agree() {
    let server = MockServer::start().await;
    serve_index(&server, &[1, 2]).await;
    serve_article(&server, 1, "Remote 1").await;
    serve_article(&server, 2, "Remote 2").await;

    let store = ContentStore::new(reqwest::Client::new(), Some(server.uri()));
    let index = store.index().await;

    for summary in &index.articles {
        let full = store.get_by_id(summary.id).await.unwrap();
        assert_eq!(summary.id, full.id);
        assert_eq!(summary.title, full.title);
        assert_eq!(summary.date, full.date);
        assert_eq!(summary.author, full.author);
        assert_eq!(summary.categories, full.categories);
        assert_eq!(summary.tags, full.tags);
    }
}

#[tokio::test]
async fn get_by_id_prefers_the_freshest_individual_record() {
    let server = MockServer::start().await;
    serve_index(&server, &[1]).await;
    serve_article(&server, 1, "Stale Title").await;

    let store = ContentStore::new(reqwest::Client::new(), Some(server.uri()));
    assert_eq!(store.load_all().await[0].title, "Stale Title");

    // The source updates after the bulk load; an individual lookup sees it.
    server.reset().await;
    serve_article(&server, 1, "Fresh Title").await;

    let article = store.get_by_id(1).await.unwrap();
    assert_eq!(article.title, "Fresh Title");

    // The bulk-loaded view stays memoized and id-sorted.
    assert_eq!(store.load_all().await[0].title, "Stale Title");
}

#[tokio::test]
async fn get_by_id_falls_back_to_bulk_then_embedded() {
    let server = MockServer::start().await;
    serve_index(&server, &[1]).await;
    serve_article(&server, 1, "Bulk Only").await;

    let store = ContentStore::new(reqwest::Client::new(), Some(server.uri()));
    store.load_all().await;

    // Individual fetches start failing: the bulk record answers.
    server.reset().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert_eq!(store.get_by_id(1).await.unwrap().title, "Bulk Only");
    // Not in the bulk set, but within the embedded corpus.
    assert_eq!(store.get_by_id(4).await.unwrap().id, 4);
    // Nowhere at all.
    assert!(store.get_by_id(999).await.is_none());
}

#[tokio::test]
async fn malformed_index_activates_fallback() {
    // Malformed payloads are treated exactly like unreachable sources.
    for body in [r#"{"unexpected": true}"#, "<html>not json</html>"] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/index.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let store = ContentStore::new(reqwest::Client::new(), Some(server.uri()));
        assert_eq!(store.source().await, ContentSource::Fallback, "body: {body}");
        assert!(!store.load_all().await.is_empty());
    }
}

#[tokio::test]
async fn record_outside_embedded_range_is_dropped_not_fatal() {
    let server = MockServer::start().await;
    serve_index(&server, &[1, 100]).await;
    serve_article(&server, 1, "Remote 1").await;
    Mock::given(method("GET"))
        .and(path("/article-100.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let store = ContentStore::new(reqwest::Client::new(), Some(server.uri()));
    let ids: Vec<u32> = store.load_all().await.iter().map(|a| a.id).collect();
    // Id 100 has no remote record and no embedded stand-in; it is dropped.
    assert_eq!(ids, vec![1]);
    assert_eq!(store.source().await, ContentSource::Remote);
}
