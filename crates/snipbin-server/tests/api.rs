use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use snipbin_server::service::SnippetService;
use snipbin_server::state::AppState;
use snipbin_storage::MemoryRepository;

fn test_app() -> Router {
    let service = SnippetService::new(Arc::new(MemoryRepository::new()));
    snipbin_server::app(AppState::new(service), None)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };

    let resp = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn end_to_end_lifecycle() {
    let app = test_app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/snippets",
        Some(json!({
            "title": "t",
            "code": "print('x')",
            "language": "python",
            "tags": ["demo"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();
    // creation echoes the stored (encoded) form
    assert_eq!(created["code"], "cHJpbnQoJ3gnKQ==");
    assert!(created.get("expiresAt").is_none());
    assert!(created["createdAt"].is_string());

    let (status, fetched) = send(&app, Method::GET, &format!("/api/snippets/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["code"], "print('x')");
    assert_eq!(fetched["language"], "python");
    assert_eq!(fetched["tags"], json!(["demo"]));

    let (status, listed) = send(&app, Method::GET, "/api/snippets?language=py", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(listed.as_array().unwrap().iter().any(|s| s["id"] == id.as_str()));

    let (status, body) = send(&app, Method::DELETE, &format!("/api/snippets/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Snippet deleted successfully");

    let (status, body) = send(&app, Method::GET, &format!("/api/snippets/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Snippet not found");
}

#[tokio::test]
async fn missing_fields_are_bad_request() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/snippets",
        Some(json!({ "title": "only a title" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing required fields: code, language");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = test_app();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/snippets")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_id_is_bad_request() {
    let app = test_app();
    for method in [Method::GET, Method::DELETE] {
        let (status, body) = send(&app, method, "/api/snippets/xyz", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid ID");
    }
    let (status, _) = send(&app, Method::PUT, "/api/snippets/xyz", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn legacy_expires_in_field_is_honoured() {
    let app = test_app();
    let (status, created) = send(
        &app,
        Method::POST,
        "/api/snippets",
        Some(json!({
            "title": "gone",
            "code": "x",
            "language": "go",
            "expiresIn": 0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created["expiresAt"].is_string());
    let id = created["id"].as_str().unwrap().to_string();

    let (_, listed) = send(&app, Method::GET, "/api/snippets", None).await;
    assert_eq!(listed, json!([]));

    let (status, _) = send(&app, Method::GET, &format!("/api/snippets/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/snippets/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn update_is_partial() {
    let app = test_app();
    let (_, created) = send(
        &app,
        Method::POST,
        "/api/snippets",
        Some(json!({
            "title": "old",
            "code": "body",
            "language": "rust",
            "tags": ["a"]
        })),
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/snippets/{id}"),
        Some(json!({ "title": "new" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "new");
    assert_eq!(updated["code"], created["code"]);
    assert_eq!(updated["language"], "rust");
    assert_eq!(updated["tags"], json!(["a"]));

    let missing = uuid::Uuid::now_v7();
    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/snippets/{missing}"),
        Some(json!({ "title": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_query_parameters_are_applied() {
    let app = test_app();
    for (title, language, tags) in [
        ("one", "Go", json!(["go", "cli"])),
        ("two", "Go", json!(["go", "web"])),
        ("three", "Rust", json!(["cli"])),
    ] {
        send(
            &app,
            Method::POST,
            "/api/snippets",
            Some(json!({ "title": title, "code": "x", "language": language, "tags": tags })),
        )
        .await;
    }

    let titles = |v: &Value| -> Vec<String> {
        v.as_array()
            .unwrap()
            .iter()
            .map(|s| s["title"].as_str().unwrap().to_string())
            .collect()
    };

    let (_, body) = send(&app, Method::GET, "/api/snippets?language=go&tags=Go,%20CLI", None).await;
    assert_eq!(titles(&body), vec!["one"]);

    let (_, body) = send(&app, Method::GET, "/api/snippets?sort=title&order=desc", None).await;
    assert_eq!(titles(&body), vec!["two", "three", "one"]);

    let (_, body) = send(&app, Method::GET, "/api/snippets?page=2&limit=2", None).await;
    assert_eq!(titles(&body), vec!["three"]);

    let (status, body) = send(&app, Method::GET, "/api/snippets?tags=go&tags=cli", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["one"]);

    let (status, body) = send(&app, Method::GET, "/api/snippets?page=-1&limit=abc&sort=nope", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["one", "two", "three"]);
}

#[tokio::test]
async fn health_and_fallback() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, Method::GET, "/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
}
