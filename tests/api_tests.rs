//! API integration tests

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use bookshelf_server::{api, AppConfig, AppState};

fn app() -> Router {
    api::create_router(AppState::new(AppConfig::default()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.expect("Failed to send request");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response")
    };
    (status, body)
}

fn full_book(name: &str, page_count: i64, read_page: i64, reading: bool) -> Value {
    json!({
        "name": name,
        "year": 2010,
        "author": "John Doe",
        "summary": "Lorem ipsum dolor sit amet",
        "publisher": "Dicoding Indonesia",
        "pageCount": page_count,
        "readPage": read_page,
        "reading": reading
    })
}

async fn add(app: &Router, body: Value) -> String {
    let (status, body) = send(app, Method::POST, "/books", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["bookId"].as_str().expect("No book id").to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["books"], 0);
}

#[tokio::test]
async fn test_add_finished_book() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({"name": "Dicoding", "pageCount": 100, "readPage": 100})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Book added successfully");
    let id = body["data"]["bookId"].as_str().unwrap();
    assert_eq!(id.len(), 16);
    assert!(body["data"].get("finished").is_none());

    let (status, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["book"]["finished"], true);
    assert_eq!(body["data"]["book"]["insertedAt"], body["data"]["book"]["updatedAt"]);
}

#[tokio::test]
async fn test_add_without_name() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({"pageCount": 100, "readPage": 10})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Failed to add book. Please provide the book name");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_add_read_page_over_page_count() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(full_book("Dicoding", 100, 200, false)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert_eq!(
        body["message"],
        "Failed to add book. readPage must not be greater than pageCount"
    );

    let (_, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(body["data"]["books"], json!([]));
}

#[tokio::test]
async fn test_add_malformed_payload() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({"name": "A", "pageCount": "many"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request payload"));
}

#[tokio::test]
async fn test_list_projection_in_insertion_order() {
    let app = app();
    let a = add(&app, json!({"name": "A", "publisher": "P1"})).await;
    let b = add(&app, json!({"name": "B"})).await;

    let (status, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert!(body.get("message").is_none());
    assert_eq!(
        body["data"]["books"],
        json!([
            {"id": a, "name": "A", "publisher": "P1"},
            {"id": b, "name": "B", "publisher": null}
        ])
    );
}

#[tokio::test]
async fn test_list_filters() {
    let app = app();
    add(&app, full_book("Belajar Rust", 100, 20, true)).await;
    add(&app, full_book("Belajar Go", 100, 100, false)).await;
    add(&app, full_book("Clean Code", 100, 100, true)).await;

    let count = |body: &Value| body["data"]["books"].as_array().unwrap().len();

    let (_, body) = send(&app, Method::GET, "/books?name=BELAJAR", None).await;
    assert_eq!(count(&body), 2);

    let (_, body) = send(&app, Method::GET, "/books?name=belajar&reading=1", None).await;
    assert_eq!(count(&body), 1);
    assert_eq!(body["data"]["books"][0]["name"], "Belajar Rust");

    let (_, body) = send(&app, Method::GET, "/books?reading=0", None).await;
    assert_eq!(count(&body), 1);

    let (_, body) = send(&app, Method::GET, "/books?finished=1", None).await;
    assert_eq!(count(&body), 2);

    let (_, body) = send(&app, Method::GET, "/books?finished=0&reading=1", None).await;
    assert_eq!(count(&body), 1);

    let (status, body) = send(&app, Method::GET, "/books?reading=yes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(count(&body), 0);
}

#[tokio::test]
async fn test_list_repeated_filter_keeps_last_value() {
    let app = app();
    add(&app, json!({"name": "Alpha"})).await;
    add(&app, json!({"name": "Beta"})).await;

    let (status, body) = send(&app, Method::GET, "/books?name=alpha&name=beta", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    let books = body["data"]["books"].as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["name"], "Beta");
}

#[tokio::test]
async fn test_list_hex_flag_filter() {
    let app = app();
    add(&app, json!({"name": "A", "reading": true})).await;
    add(&app, json!({"name": "B", "reading": false})).await;

    let (status, body) = send(&app, Method::GET, "/books?reading=0x1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["books"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["books"][0]["name"], "A");
}

#[tokio::test]
async fn test_add_accepts_numeric_reading() {
    let app = app();
    add(&app, json!({"name": "A", "reading": 1})).await;

    let (_, body) = send(&app, Method::GET, "/books?reading=1", None).await;
    assert_eq!(body["data"]["books"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_get_unknown_book() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/books/xxxxx", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Book not found");
}

#[tokio::test]
async fn test_update_book() {
    let app = app();
    let id = add(&app, full_book("C", 50, 10, false)).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/books/{}", id),
        Some(full_book("C2", 50, 50, true)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Book updated successfully");

    let (_, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    let book = &body["data"]["book"];
    assert_eq!(book["id"], id.as_str());
    assert_eq!(book["name"], "C2");
    assert_eq!(book["readPage"], 50);
    assert_eq!(book["reading"], true);
    assert_eq!(book["finished"], false);
}

#[tokio::test]
async fn test_update_invalid_payload_keeps_record() {
    let app = app();
    let id = add(&app, full_book("C", 50, 10, false)).await;
    let (_, before) = send(&app, Method::GET, &format!("/books/{}", id), None).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/books/{}", id),
        Some(full_book("C2", 50, 60, false)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert_eq!(
        body["message"],
        "Failed to update book. readPage must not be greater than pageCount"
    );

    let (_, after) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_update_unknown_id_reports_validation_first() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/books/missing",
        Some(json!({"pageCount": 10, "readPage": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Failed to update book. Please provide the book name");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/books/missing",
        Some(full_book("C", 50, 10, false)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Failed to update book. Id not found");
}

#[tokio::test]
async fn test_delete_twice() {
    let app = app();
    let id = add(&app, json!({"name": "A"})).await;
    let uri = format!("/books/{}", id);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Book deleted successfully");

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Failed to delete book. Id not found");

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/shelves", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Resource not found");
}

#[tokio::test]
async fn test_wrong_method_on_known_route() {
    let app = app();
    let (status, body) = send(&app, Method::PATCH, "/books", None).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Method not allowed");
}
