//! API integration tests
//!
//! Starts the router on an ephemeral port and exercises it with reqwest.

use bookshelf_server::{api, AppState};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

async fn start_server() -> String {
    let app = api::create_router(AppState::new());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn book(name: &str, page_count: u32, read_page: u32, reading: bool) -> Value {
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

/// Helper to create a book and return its id
async fn create(client: &Client, base: &str, body: Value) -> String {
    let response = client
        .post(format!("{}/books", base))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    body["data"]["bookId"].as_str().expect("No book ID").to_string()
}

async fn get_json(client: &Client, url: String) -> (StatusCode, Value) {
    let response = client.get(url).send().await.expect("Failed to send request");
    let status = response.status();
    (status, response.json().await.expect("Failed to parse response"))
}

#[tokio::test]
async fn test_health_check() {
    let base = start_server().await;
    let (status, body) = get_json(&Client::new(), format!("{}/health", base)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["books"], 0);
}

#[tokio::test]
async fn test_create_book() {
    let base = start_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/books", base))
        .json(&book("Buku A", 100, 25, false))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Buku berhasil ditambahkan");
    assert_eq!(body["data"]["bookId"].as_str().unwrap().len(), 16);
}

#[tokio::test]
async fn test_create_book_without_name() {
    let base = start_server().await;
    let client = Client::new();

    let mut payload = book("x", 100, 25, false);
    payload.as_object_mut().unwrap().remove("name");
    let response = client
        .post(format!("{}/books", base))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body,
        json!({"status": "fail", "message": "Gagal menambahkan buku. Mohon isi nama buku"})
    );
}

#[tokio::test]
async fn test_create_book_with_page_overflow() {
    let base = start_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/books", base))
        .json(&book("Buku A", 100, 101, false))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "fail");
    assert_eq!(
        body["message"],
        "Gagal menambahkan buku. readPage tidak boleh lebih besar dari pageCount"
    );
}

#[tokio::test]
async fn test_create_book_with_malformed_body() {
    let base = start_server().await;
    let response = Client::new()
        .post(format!("{}/books", base))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "fail");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_list_books_with_filters() {
    let base = start_server().await;
    let client = Client::new();

    let finished = create(&client, &base, book("A", 100, 100, false)).await;
    let reading = create(&client, &base, book("B", 100, 50, true)).await;
    create(&client, &base, book("Harry Potter", 300, 10, false)).await;

    let (status, body) = get_json(&client, format!("{}/books", base)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    let books = body["data"]["books"].as_array().unwrap();
    assert_eq!(books.len(), 3);
    assert_eq!(books[0]["id"], finished.as_str());
    assert_eq!(
        books[0].as_object().unwrap().keys().collect::<Vec<_>>(),
        vec!["id", "name", "publisher"]
    );

    let (_, body) = get_json(&client, format!("{}/books?finished=1", base)).await;
    let books = body["data"]["books"].as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["name"], "A");

    let (_, body) = get_json(&client, format!("{}/books?reading=1", base)).await;
    let books = body["data"]["books"].as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["id"], reading.as_str());

    let (_, body) = get_json(&client, format!("{}/books?name=har", base)).await;
    let books = body["data"]["books"].as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["name"], "Harry Potter");

    let (_, body) = get_json(&client, format!("{}/books?reading=0&finished=0", base)).await;
    assert_eq!(body["data"]["books"].as_array().unwrap().len(), 1);

    let (_, body) = get_json(&client, format!("{}/books?reading=yes", base)).await;
    assert_eq!(body["data"]["books"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_list_books_with_repeated_parameter() {
    let base = start_server().await;
    let client = Client::new();

    create(&client, &base, book("Harry Potter", 300, 10, false)).await;
    create(&client, &base, book("Dune", 412, 0, false)).await;

    let (status, body) = get_json(&client, format!("{}/books?name=HARRY&name=dune", base)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    let books = body["data"]["books"].as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["name"], "Harry Potter");
}

#[tokio::test]
async fn test_get_book() {
    let base = start_server().await;
    let client = Client::new();
    let id = create(&client, &base, book("Buku A", 100, 100, true)).await;

    let (status, body) = get_json(&client, format!("{}/books/{}", base, id)).await;
    assert_eq!(status, StatusCode::OK);
    let stored = &body["data"]["book"];
    assert_eq!(stored["id"], id.as_str());
    assert_eq!(stored["name"], "Buku A");
    assert_eq!(stored["year"], 2010);
    assert_eq!(stored["author"], "John Doe");
    assert_eq!(stored["pageCount"], 100);
    assert_eq!(stored["readPage"], 100);
    assert_eq!(stored["finished"], true);
    assert_eq!(stored["reading"], true);
    assert_eq!(stored["insertedAt"], stored["updatedAt"]);

    let (status, body) = get_json(&client, format!("{}/books/unknown", base)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"status": "fail", "message": "Buku tidak ditemukan"}));
}

#[tokio::test]
async fn test_update_book() {
    let base = start_server().await;
    let client = Client::new();
    let id = create(&client, &base, book("Buku A", 100, 10, true)).await;

    let response = client
        .put(format!("{}/books/{}", base, id))
        .json(&book("Buku A Revisi", 200, 200, false))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({"status": "success", "message": "Buku berhasil diperbarui"}));

    let (_, body) = get_json(&client, format!("{}/books/{}", base, id)).await;
    let stored = &body["data"]["book"];
    assert_eq!(stored["name"], "Buku A Revisi");
    assert_eq!(stored["pageCount"], 200);
    assert_eq!(stored["finished"], true);
    assert_eq!(stored["reading"], false);
}

#[tokio::test]
async fn test_update_book_failures() {
    let base = start_server().await;
    let client = Client::new();
    let id = create(&client, &base, book("Buku A", 100, 10, true)).await;

    let cases = [
        (
            format!("{}/books/{}", base, id),
            json!({"pageCount": 10, "readPage": 1}),
            StatusCode::BAD_REQUEST,
            "Gagal memperbarui buku. Mohon isi nama buku",
        ),
        (
            format!("{}/books/{}", base, id),
            book("Buku A", 10, 11, false),
            StatusCode::BAD_REQUEST,
            "Gagal memperbarui buku. readPage tidak boleh lebih besar dari pageCount",
        ),
        (
            format!("{}/books/unknown", base),
            book("Buku A", 10, 1, false),
            StatusCode::NOT_FOUND,
            "Gagal memperbarui buku. Id tidak ditemukan",
        ),
        // Payload is validated before the id is resolved
        (
            format!("{}/books/unknown", base),
            book("", 10, 1, false),
            StatusCode::BAD_REQUEST,
            "Gagal memperbarui buku. Mohon isi nama buku",
        ),
    ];

    for (url, payload, expected_status, expected_message) in cases {
        let response = client
            .put(url)
            .json(&payload)
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), expected_status);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["status"], "fail");
        assert_eq!(body["message"], expected_message);
    }

    let (_, body) = get_json(&client, format!("{}/books/{}", base, id)).await;
    assert_eq!(body["data"]["book"]["readPage"], 10);
}

#[tokio::test]
async fn test_delete_book() {
    let base = start_server().await;
    let client = Client::new();
    let id = create(&client, &base, book("Buku A", 100, 10, true)).await;

    let response = client
        .delete(format!("{}/books/{}", base, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({"status": "success", "message": "Buku berhasil dihapus"}));

    let (status, _) = get_json(&client, format!("{}/books/{}", base, id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let response = client
        .delete(format!("{}/books/{}", base, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Buku gagal dihapus. Id tidak ditemukan");
}

#[tokio::test]
async fn test_openapi_document() {
    let base = start_server().await;
    let (status, body) = get_json(&Client::new(), format!("{}/api-docs/openapi.json", base)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/books"].is_object());
    assert!(body["paths"]["/books/{id}"].is_object());
}
