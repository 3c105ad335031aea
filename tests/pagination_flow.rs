//! End-to-end pagination flow against a mock WordPress REST endpoint

use serde_json::json;
use wp_collection::{Collection, FetchOptions, StaticNonce};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn page_of(ids: &[u64], total_pages: u32, total: u64) -> ResponseTemplate {
    let records: Vec<_> = ids
        .iter()
        .map(|id| json!({"id": id, "title": format!("post {id}")}))
        .collect();
    ResponseTemplate::new(200)
        .insert_header("x-wp-totalpages", total_pages.to_string().as_str())
        .insert_header("x-wp-total", total.to_string().as_str())
        .set_body_json(records)
}

#[tokio::test]
async fn walks_a_listing_page_by_page() {
    let server = MockServer::start().await;
    let endpoint = format!("{}/wp-json/wp/v2/posts", server.uri());

    for (page, ids) in [(1u32, [1u64, 2]), (2, [3, 4]), (3, [5, 6])] {
        Mock::given(method("GET"))
            .and(path("/wp-json/wp/v2/posts"))
            .and(header("X-WP-Nonce", "a1b2c3d4"))
            .and(query_param("page", page.to_string().as_str()))
            .respond_with(page_of(&ids, 3, 6))
            .expect(1)
            .mount(&server)
            .await;
    }

    let mut posts = Collection::builder(endpoint.as_str())
        .nonce(StaticNonce::new("a1b2c3d4"))
        .build()
        .unwrap();

    // page 1 explicitly, then walk forward until the listing is exhausted
    posts.fetch(FetchOptions::new().page(1)).await.unwrap();
    assert_eq!(posts.state().current_page(), Some(1));
    assert_eq!(posts.state().total_pages(), Some(3));
    assert_eq!(posts.state().total_objects(), Some(6));

    let mut rounds = 0;
    while let Some(received) = posts.fetch_more(None).await.unwrap() {
        assert_eq!(received, 2);
        rounds += 1;
    }

    assert_eq!(rounds, 2);
    assert_eq!(posts.len(), 6);
    assert_eq!(posts.has_more(), Some(false));

    let ids: Vec<u64> = posts.members().iter().map(|m| m["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
}

#[tokio::test]
async fn page_three_example() {
    let server = MockServer::start().await;
    let endpoint = format!("{}/wp-json/wp/v2/posts", server.uri());

    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/posts"))
        .and(query_param("page", "3"))
        .respond_with(page_of(&[41, 42], 5, 97))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wp-json/wp/v2/posts"))
        .and(query_param("page", "4"))
        .respond_with(page_of(&[43, 44], 5, 97))
        .expect(1)
        .mount(&server)
        .await;

    let mut posts = Collection::builder(endpoint.as_str()).build().unwrap();

    posts.fetch(FetchOptions::new().page(3)).await.unwrap();
    assert_eq!(posts.state().current_page(), Some(3));
    assert_eq!(posts.state().total_pages(), Some(5));
    assert_eq!(posts.state().total_objects(), Some(97));
    assert_eq!(posts.has_more(), Some(true));

    // the forward fetch lands on page 4
    posts.fetch_more(None).await.unwrap();
    assert_eq!(posts.state().current_page(), Some(4));
    assert_eq!(posts.len(), 4);
}
