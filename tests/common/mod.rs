//! Shared utilities for integration testing.

use std::collections::HashMap;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{extract::Query, http::StatusCode, routing::get, Router};
use book_proxy::config::ProxyConfig;
use book_proxy::http::HttpServer;
use book_proxy::lifecycle::Shutdown;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Start a programmable mock of the volumes endpoint on an ephemeral port.
///
/// `f` receives the request's query parameters and returns status and body.
/// Returns the URL to use as `upstream.base_url`.
pub async fn start_programmable_upstream<F, Fut>(f: F) -> String
where
    F: Fn(HashMap<String, String>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let f = Arc::new(f);
    let app = Router::new().route(
        "/volumes",
        get(move |Query(params): Query<HashMap<String, String>>| {
            let f = f.clone();
            async move {
                let (status, body) = f(params).await;
                (StatusCode::from_u16(status).unwrap(), body)
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    format!("http://{}/volumes", addr)
}

/// A URL on which nothing is listening.
pub async fn unreachable_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/volumes", addr)
}

/// Start the proxy against `upstream_url`; returns its address and shutdown handle.
pub async fn start_proxy(upstream_url: &str, tweak: impl FnOnce(&mut ProxyConfig)) -> (SocketAddr, Shutdown) {
    let mut config = ProxyConfig::default();
    config.upstream.base_url = upstream_url.to_string();
    tweak(&mut config);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    config.listener.bind_address = addr.to_string();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(20))
        .build()
        .unwrap()
}

/// Upstream page with `count` volumes whose ids are derived from `q`.
pub fn volumes_page(q: &str, count: usize) -> String {
    let items: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "id": format!("{}#{}", q, i),
                "volumeInfo": {
                    "title": format!("Book {}", i),
                    "authors": ["Author"],
                    "imageLinks": { "smallThumbnail": "http://img/small" },
                    "canonicalVolumeLink": "http://books/canonical"
                }
            })
        })
        .collect();
    json!({ "kind": "books#volumes", "totalItems": 1000, "items": items }).to_string()
}
