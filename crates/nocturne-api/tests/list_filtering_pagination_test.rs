//! Listing filter, sort, and pagination behavior through the HTTP surface.

mod common;

use axum::http::StatusCode;
use serde_json::Value;

use common::{get, seed_note, seed_user, send, test_app, TestApp};
use nocturne_core::User;

fn titles(body: &Value) -> Vec<String> {
    body["notes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap().to_string())
        .collect()
}

async fn seeded_app() -> (TestApp, User, User) {
    let app = test_app().await;
    let ada = seed_user(&app, "Ada").await;
    let bob = seed_user(&app, "Bob").await;

    seed_note(&app, &ada, "Rust tips", "<p>borrowck</p>", &["rust", "tips"], true, 4).await;
    seed_note(&app, &ada, "Shopping", "<p>eggs</p>", &["errands"], false, 3).await;
    seed_note(&app, &bob, "Go tips", "<p>goroutines</p>", &["go", "tips"], true, 2).await;
    seed_note(&app, &bob, "Banana bread", "<p><b>recipe</b></p>", &["baking"], true, 1).await;
    (app, ada, bob)
}

#[tokio::test]
async fn test_anonymous_listing_is_public_only_updated_at_desc() {
    let (app, _, _) = seeded_app().await;
    let (status, body) = get(&app.router, "/api/notes").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["Banana bread", "Go tips", "Rust tips"]);
    assert_eq!(body["pagination"]["total"], 3);
    assert_eq!(body["pagination"]["current"], 1);
    assert_eq!(body["pagination"]["limit"], 10);
}

#[tokio::test]
async fn test_own_scope_lists_private_notes_too() {
    let (app, ada, _) = seeded_app().await;

    let (status, body) = send(
        &app.router,
        "GET",
        &format!("/api/notes?author={}", ada.id),
        Some(ada.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["Shopping", "Rust tips"]);

    // scoped further to private only
    let (_, body) = send(
        &app.router,
        "GET",
        &format!("/api/notes?author={}&isPublic=false", ada.id),
        Some(ada.id),
        None,
    )
    .await;
    assert_eq!(titles(&body), vec!["Shopping"]);
}

#[tokio::test]
async fn test_foreign_scope_is_narrowed_to_public() {
    let (app, ada, bob) = seeded_app().await;

    // anonymous
    let (status, body) = get(&app.router, &format!("/api/notes?author={}", ada.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["Rust tips"]);

    // another authenticated user
    let (_, body) = send(
        &app.router,
        "GET",
        &format!("/api/notes?author={}", ada.id),
        Some(bob.id),
        None,
    )
    .await;
    assert_eq!(titles(&body), vec!["Rust tips"]);
}

#[tokio::test]
async fn test_foreign_private_listing_is_forbidden() {
    let (app, _, bob) = seeded_app().await;

    let (status, _) = get(&app.router, "/api/notes?isPublic=false").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app.router,
        "GET",
        "/api/notes?isPublic=false",
        Some(bob.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_pagination_metadata_on_25_notes() {
    let app = test_app().await;
    let ada = seed_user(&app, "Ada").await;
    for i in 0..25 {
        seed_note(&app, &ada, &format!("note {:02}", i), "<p>c</p>", &[], true, i).await;
    }

    let (status, body) = get(&app.router, "/api/notes?page=3&limit=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notes"].as_array().unwrap().len(), 5);
    assert_eq!(body["pagination"]["current"], 3);
    assert_eq!(body["pagination"]["pages"], 3);
    assert_eq!(body["pagination"]["total"], 25);
    assert_eq!(body["pagination"]["limit"], 10);
}

#[tokio::test]
async fn test_out_of_range_page_is_empty_not_an_error() {
    let (app, _, _) = seeded_app().await;
    let (status, body) = get(&app.router, "/api/notes?page=9").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["notes"].as_array().unwrap().is_empty());
    assert_eq!(body["pagination"]["total"], 3);
}

#[tokio::test]
async fn test_limit_and_page_bounds_are_validated() {
    let app = test_app().await;

    let (status, body) = get(&app.router, "/api/notes?limit=101").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "limit");

    let (status, body) = get(&app.router, "/api/notes?page=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "page");
}

#[tokio::test]
async fn test_unknown_sort_field_is_validated() {
    let app = test_app().await;
    let (status, body) = get(&app.router, "/api/notes?sortBy=priority").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "sortBy");

    let (status, body) = get(&app.router, "/api/notes?sortOrder=sideways").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "sortOrder");
}

#[tokio::test]
async fn test_title_sort_is_case_insensitive() {
    let app = test_app().await;
    let ada = seed_user(&app, "Ada").await;
    seed_note(&app, &ada, "Banana", "<p>c</p>", &[], true, 2).await;
    seed_note(&app, &ada, "apple", "<p>c</p>", &[], true, 1).await;
    seed_note(&app, &ada, "Cherry", "<p>c</p>", &[], true, 0).await;

    let (_, body) = get(&app.router, "/api/notes?sortBy=title&sortOrder=asc").await;
    assert_eq!(titles(&body), vec!["apple", "Banana", "Cherry"]);
}

#[tokio::test]
async fn test_tags_filter_has_or_semantics() {
    let (app, _, _) = seeded_app().await;
    let (_, body) = get(&app.router, "/api/notes?tags=rust,go").await;
    assert_eq!(titles(&body), vec!["Go tips", "Rust tips"]);
}

#[tokio::test]
async fn test_search_matches_title_content_and_author_name() {
    let (app, _, _) = seeded_app().await;

    let (_, body) = get(&app.router, "/api/notes?search=bread").await;
    assert_eq!(titles(&body), vec!["Banana bread"]);

    let (_, body) = get(&app.router, "/api/notes?search=goroutines").await;
    assert_eq!(titles(&body), vec!["Go tips"]);

    let (_, body) = get(&app.router, "/api/notes?search=bob").await;
    assert_eq!(titles(&body), vec!["Banana bread", "Go tips"]);

    // markup in the opaque content is searchable as-is
    let (_, body) = get(&app.router, "/api/notes?search=%3Cb%3E").await;
    assert_eq!(titles(&body), vec!["Banana bread"]);
}

#[tokio::test]
async fn test_empty_search_behaves_as_absent() {
    let (app, _, _) = seeded_app().await;
    let (_, with_empty) = get(&app.router, "/api/notes?search=").await;
    let (_, without) = get(&app.router, "/api/notes").await;
    assert_eq!(titles(&with_empty), titles(&without));
}

#[tokio::test]
async fn test_malformed_identity_header_is_rejected() {
    let app = test_app().await;
    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/notes")
        .header("x-user-id", "not-a-uuid")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
