//! API integration tests

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{send, test_app};

#[tokio::test]
async fn test_health_check() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, "GET", "/api/v1/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/books"].is_object());
    assert!(body["paths"]["/borrowings/{id}/return"].is_object());
}

#[tokio::test]
async fn test_borrow_and_return_scenario() {
    let app = test_app().await;

    let (status, book) = send(
        &app,
        "POST",
        "/api/v1/books",
        Some(json!({
            "title": "Dune",
            "author": "Herbert",
            "isbn": "111",
            "quantity": 1
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let book_id = book["id"].as_i64().expect("No book ID");

    let (_, availability) = send(&app, "GET", &format!("/api/v1/books/{}", book_id), None).await;
    assert_eq!(availability["available_copies"], 1);

    let (status, alice) = send(
        &app,
        "POST",
        "/api/v1/members",
        Some(json!({ "name": "Alice", "email": "a@x.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let alice_id = alice["id"].as_i64().expect("No member ID");

    let (_, bob) = send(
        &app,
        "POST",
        "/api/v1/members",
        Some(json!({ "name": "Bob", "email": "b@x.com", "phone": "555-0100" })),
    )
    .await;
    let bob_id = bob["id"].as_i64().expect("No member ID");

    let (status, record) = send(
        &app,
        "POST",
        "/api/v1/borrowings",
        Some(json!({ "book_id": book_id, "member_id": alice_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(record["returned"], false);
    let record_id = record["id"].as_i64().expect("No record ID");

    let (_, availability) = send(&app, "GET", &format!("/api/v1/books/{}", book_id), None).await;
    assert_eq!(availability["available_copies"], 0);

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/borrowings",
        Some(json!({ "book_id": book_id, "member_id": bob_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "ItemNotAvailable");
    assert_eq!(body["message"], "Book is not available");

    let (status, borrowings) = send(&app, "GET", "/api/v1/borrowings", None).await;
    assert_eq!(status, StatusCode::OK);
    let borrowings = borrowings.as_array().expect("borrowings array");
    assert_eq!(borrowings.len(), 1);
    assert_eq!(borrowings[0]["title"], "Dune");
    assert_eq!(borrowings[0]["author"], "Herbert");
    assert_eq!(borrowings[0]["member_name"], "Alice");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/borrowings/{}/return", record_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "returned");
    assert_eq!(body["already_returned"], false);
    assert!(body["record"]["returned_date"].is_string());

    let (_, availability) = send(&app, "GET", &format!("/api/v1/books/{}", book_id), None).await;
    assert_eq!(availability["available_copies"], 1);

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/v1/borrowings/{}/return", record_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["already_returned"], true);

    let (_, borrowings) = send(&app, "GET", "/api/v1/borrowings", None).await;
    assert_eq!(borrowings.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_list_books_includes_unborrowed_books() {
    let app = test_app().await;

    for (title, quantity) in [("Dune", 2), ("Emma", 4)] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/books",
            Some(json!({ "title": title, "author": "Someone", "quantity": quantity })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, books) = send(&app, "GET", "/api/v1/books", None).await;
    assert_eq!(status, StatusCode::OK);
    let books = books.as_array().expect("books array");
    assert_eq!(books.len(), 2);
    assert_eq!(books[0]["available_copies"], 2);
    assert_eq!(books[1]["available_copies"], 4);
    assert_eq!(books[1]["outstanding"], 0);
}

#[tokio::test]
async fn test_add_book_defaults_quantity_to_one() {
    let app = test_app().await;

    let (status, book) = send(
        &app,
        "POST",
        "/api/v1/books",
        Some(json!({ "title": "Dune", "author": "Herbert" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(book["quantity"], 1);
    assert!(book["isbn"].is_null());
}

#[tokio::test]
async fn test_duplicate_isbn_is_conflict() {
    let app = test_app().await;
    let payload = json!({ "title": "Dune", "author": "Herbert", "isbn": "111" });

    let (status, _) = send(&app, "POST", "/api/v1/books", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/api/v1/books", Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Book with this ISBN already exists");

    let (_, books) = send(&app, "GET", "/api/v1/books", None).await;
    assert_eq!(books.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let app = test_app().await;
    let payload = json!({ "name": "Alice", "email": "a@x.com" });

    let (status, member) = send(&app, "POST", "/api/v1/members", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(member["join_date"].is_string());

    let (status, body) = send(&app, "POST", "/api/v1/members", Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Member with this email already exists");

    let (_, members) = send(&app, "GET", "/api/v1/members", None).await;
    assert_eq!(members.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_invalid_book_is_bad_request() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/books",
        Some(json!({ "title": "", "author": "Herbert", "quantity": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
async fn test_unknown_resources_are_not_found() {
    let app = test_app().await;

    let (status, _) = send(&app, "GET", "/api/v1/books/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", "/api/v1/members/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", "/api/v1/members/1/borrowings", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "POST", "/api/v1/borrowings/1/return", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchItem");

    let (_, book) = send(
        &app,
        "POST",
        "/api/v1/books",
        Some(json!({ "title": "Dune", "author": "Herbert" })),
    )
    .await;
    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/borrowings",
        Some(json!({ "book_id": book["id"], "member_id": 99 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 5);
    assert_eq!(body["error"], "NoSuchItem");
    assert_eq!(body["message"], "Member with id 99 not found");

    let (_, availability) = send(
        &app,
        "GET",
        &format!("/api/v1/books/{}", book["id"]),
        None,
    )
    .await;
    assert_eq!(availability["available_copies"], 1);
}

#[tokio::test]
async fn test_get_member_and_their_borrowings() {
    let app = test_app().await;

    let (_, book) = send(
        &app,
        "POST",
        "/api/v1/books",
        Some(json!({ "title": "Dune", "author": "Herbert", "quantity": 2 })),
    )
    .await;
    let (_, alice) = send(
        &app,
        "POST",
        "/api/v1/members",
        Some(json!({ "name": "Alice", "email": "a@x.com" })),
    )
    .await;
    let alice_id = alice["id"].as_i64().expect("No member ID");

    let (status, member) = send(&app, "GET", &format!("/api/v1/members/{}", alice_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(member["email"], "a@x.com");

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/borrowings",
        Some(json!({ "book_id": book["id"], "member_id": alice_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, loans) = send(
        &app,
        "GET",
        &format!("/api/v1/members/{}/borrowings", alice_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let loans = loans.as_array().expect("loans array");
    assert_eq!(loans.len(), 1);
    assert_eq!(loans[0]["is_overdue"], false);
}
