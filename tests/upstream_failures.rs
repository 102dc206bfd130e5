//! End-to-end behavior of the proxy against healthy and failing upstreams.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use book_proxy::catalog::CURATED_TOPICS;
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_search_forwards_params_and_normalizes() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorded = seen.clone();
    let upstream = common::start_programmable_upstream(move |params| {
        let recorded = recorded.clone();
        async move {
            let body = common::volumes_page(&params["q"], 2);
            recorded.lock().unwrap().push(params);
            (200, body)
        }
    })
    .await;
    let (proxy, shutdown) = common::start_proxy(&upstream, |_| {}).await;

    let body: Value = common::client()
        .get(format!("http://{}/api/search?q=dune&startIndex=5&maxResults=2", proxy))
        .send()
        .await
        .expect("Proxy unreachable")
        .json()
        .await
        .unwrap();

    assert_eq!(body["total"], 1000);
    assert_eq!(body["query"], "dune");
    assert!(body.get("error").is_none());
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], "dune#0");
    assert_eq!(items[0]["thumbnail"], "http://img/small");
    assert_eq!(items[0]["infoLink"], "http://books/canonical");
    assert_eq!(items[0]["categories"], json!([]));
    assert_eq!(items[0]["rating"], Value::Null);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0]["q"], "dune");
    assert_eq!(seen[0]["startIndex"], "5");
    assert_eq!(seen[0]["maxResults"], "2");

    shutdown.trigger();
}

#[tokio::test]
async fn test_search_upstream_500_degrades() {
    let upstream =
        common::start_programmable_upstream(|_| async { (500, "Internal Server Error".to_string()) }).await;
    let (proxy, shutdown) = common::start_proxy(&upstream, |_| {}).await;

    let res = common::client()
        .get(format!("http://{}/api/search?q=dune", proxy))
        .send()
        .await
        .expect("Proxy unreachable");
    assert_eq!(res.status(), 200);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["total"], 0);
    assert_eq!(body["items"], json!([]));
    assert_eq!(body["query"], "dune");
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("500"), "unexpected error: {}", error);

    shutdown.trigger();
}

#[tokio::test]
async fn test_search_malformed_body_degrades() {
    let upstream = common::start_programmable_upstream(|_| async { (200, "<html>nope</html>".to_string()) }).await;
    let (proxy, shutdown) = common::start_proxy(&upstream, |_| {}).await;

    let body: Value = common::client()
        .get(format!("http://{}/api/search?q=dune", proxy))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["total"], 0);
    assert!(body["error"].as_str().unwrap().contains("malformed"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_search_missing_fields_default() {
    let upstream = common::start_programmable_upstream(|_| async { (200, "{}".to_string()) }).await;
    let (proxy, shutdown) = common::start_proxy(&upstream, |_| {}).await;

    let body: Value = common::client()
        .get(format!("http://{}/api/search?q=nothing", proxy))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body, json!({ "total": 0, "items": [], "query": "nothing" }));

    shutdown.trigger();
}

#[tokio::test]
async fn test_search_upstream_timeout_degrades() {
    let upstream = common::start_programmable_upstream(|_| async {
        tokio::time::sleep(Duration::from_secs(3)).await;
        (200, common::volumes_page("late", 1))
    })
    .await;
    let (proxy, shutdown) = common::start_proxy(&upstream, |config| {
        config.upstream.timeout_secs = 1;
    })
    .await;

    let body: Value = common::client()
        .get(format!("http://{}/api/search?q=dune", proxy))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["total"], 0);
    assert!(body["error"].as_str().unwrap().contains("timed out"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_search_unreachable_upstream_degrades() {
    let upstream = common::unreachable_upstream().await;
    let (proxy, shutdown) = common::start_proxy(&upstream, |_| {}).await;

    let body: Value = common::client()
        .get(format!("http://{}/api/search?q=dune", proxy))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["total"], 0);
    assert_eq!(body["items"], json!([]));
    assert!(!body["error"].as_str().unwrap().is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn test_max_results_bounds_checked_before_upstream() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();
    let upstream = common::start_programmable_upstream(move |params| {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            (200, common::volumes_page(&params["q"], 1))
        }
    })
    .await;
    let (proxy, shutdown) = common::start_proxy(&upstream, |_| {}).await;
    let client = common::client();

    for (max_results, expected) in [(1, 200u16), (40, 200), (0, 422), (41, 422)] {
        let res = client
            .get(format!("http://{}/api/search?q=dune&maxResults={}", proxy, max_results))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), expected, "maxResults={}", max_results);
    }

    assert_eq!(calls.load(Ordering::SeqCst), 2, "rejected requests must not reach upstream");

    shutdown.trigger();
}

#[tokio::test]
async fn test_recommendations_survive_one_failing_topic() {
    let failing = CURATED_TOPICS[1].q;
    let upstream = common::start_programmable_upstream(move |params| async move {
        if params["q"] == failing {
            (503, "Service Unavailable".to_string())
        } else {
            assert_eq!(params.get("maxResults").map(String::as_str), Some("6"));
            assert!(!params.contains_key("startIndex"));
            (200, common::volumes_page(&params["q"], 6))
        }
    })
    .await;
    let (proxy, shutdown) = common::start_proxy(&upstream, |_| {}).await;

    let body: Value = common::client()
        .get(format!("http://{}/api/recommendations", proxy))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let sections = body["sections"].as_array().unwrap();
    assert_eq!(sections.len(), CURATED_TOPICS.len());
    for (section, topic) in sections.iter().zip(CURATED_TOPICS.iter()) {
        assert_eq!(section["title"], topic.title);
        assert_eq!(section["q"], topic.q);
        let items = section["items"].as_array().unwrap();
        if topic.q == failing {
            assert!(items.is_empty());
        } else {
            assert_eq!(items.len(), 6);
            assert_eq!(items[0]["id"], format!("{}#0", topic.q));
        }
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_recommendations_with_upstream_down() {
    let upstream = common::unreachable_upstream().await;
    let (proxy, shutdown) = common::start_proxy(&upstream, |_| {}).await;

    let res = common::client()
        .get(format!("http://{}/api/recommendations", proxy))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let body: Value = res.json().await.unwrap();
    let sections = body["sections"].as_array().unwrap();
    assert_eq!(sections.len(), 6);
    assert!(sections.iter().all(|s| s["items"] == json!([])));

    shutdown.trigger();
}
