use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};
use uuid::Uuid;

use quill_core::domain::{Author, AuthorDraft};
use quill_shared::{ErrorResponse, ValidationErrorResponse};

use super::configure_routes;
use crate::middleware::identity::AUTHOR_ID_HEADER;
use crate::observability::{REQUEST_ID_HEADER, RequestIdMiddleware};
use crate::state::AppState;

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .app_data(web::Data::new($state.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

async fn seed_author(state: &AppState, name: &str) -> Author {
    let draft = AuthorDraft {
        name: name.to_string(),
    };
    state.authors.insert(Author::new(draft)).await.unwrap()
}

fn post_body(title: &str, category: &str) -> Value {
    json!({ "title": title, "category": category, "text": "One\n\nTwo" })
}

macro_rules! create_post_as {
    ($app:expr, $author:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri("/posts")
            .insert_header((AUTHOR_ID_HEADER, $author.to_string()))
            .set_json($body)
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        created
    }};
}

fn id_of(value: &Value) -> String {
    value["id"].as_str().unwrap().to_string()
}

#[actix_web::test]
async fn test_health_and_request_id() {
    let state = AppState::in_memory(None);
    let app = init_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key(REQUEST_ID_HEADER));
    let health: Value = test::read_body_json(resp).await;
    assert_eq!(health["status"], "ok");
    assert_eq!(health["storage"], "memory");

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header((REQUEST_ID_HEADER, "req-42"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.headers().get(REQUEST_ID_HEADER).unwrap(), "req-42");
}

#[actix_web::test]
async fn test_post_lifecycle() {
    let state = AppState::in_memory(None);
    let author = seed_author(&state, "Ada").await;
    let app = init_app!(state);

    let created = create_post_as!(app, author.id, post_body("First", "FiCtIoN"));
    assert_eq!(created["category"], "fiction");
    assert_eq!(created["isPublished"], false);
    assert_eq!(created["commentCount"], 0);
    assert_eq!(created["author"], author.id.to_string());
    assert_eq!(created["text"], json!(["One", "Two"]));
    let id = id_of(&created);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri(&format!("/posts/{id}")).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Value = test::read_body_json(resp).await;
    assert_eq!(fetched["title"], "First");

    let req = test::TestRequest::put()
        .uri(&format!("/posts/{id}"))
        .set_json(json!({ "title": "Renamed" }))
        .to_request();
    let edited: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(edited["title"], "Renamed");
    assert_eq!(edited["category"], "fiction");
    assert_eq!(edited["text"], json!(["One", "Two"]));
    assert_eq!(edited["timestamp"], created["timestamp"]);

    let resp = test::call_service(
        &app,
        test::TestRequest::delete().uri(&format!("/posts/{id}")).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let deleted: Value = test::read_body_json(resp).await;
    assert_eq!(deleted["title"], "Renamed");

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri(&format!("/posts/{id}")).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.message, "Post not found");
}

#[actix_web::test]
async fn test_posts_listed_newest_first() {
    let state = AppState::in_memory(None);
    let author = seed_author(&state, "Ada").await;
    let app = init_app!(state);

    create_post_as!(app, author.id, post_body("Older", "food"));
    create_post_as!(app, author.id, post_body("Newer", "travel"));

    let posts: Vec<Value> =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/posts").to_request())
            .await;
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0]["title"], "Newer");
}

#[actix_web::test]
async fn test_invalid_post_is_reported_and_not_stored() {
    let state = AppState::in_memory(None);
    let author = seed_author(&state, "Ada").await;
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/posts")
        .insert_header((AUTHOR_ID_HEADER, author.id.to_string()))
        .set_json(json!({ "title": "   ", "category": "poetry", "text": "Body" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: ValidationErrorResponse = test::read_body_json(resp).await;
    let fields: Vec<&str> = body.errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["title", "category"]);
    assert_eq!(body.errors[0].message, "Title must not be empty");

    assert!(state.posts.find_all().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_malformed_ids_are_rejected() {
    let state = AppState::in_memory(None);
    let author = seed_author(&state, "Ada").await;
    let app = init_app!(state);
    let commenter = author.id;

    // Bodiless PUTs too: the id is checked before the body is read.
    let requests = vec![
        test::TestRequest::get().uri("/posts/not-an-id"),
        test::TestRequest::put().uri("/posts/not-an-id"),
        test::TestRequest::delete().uri("/posts/not-an-id"),
        test::TestRequest::patch().uri("/posts/not-an-id?publish=true"),
        test::TestRequest::get().uri("/comments/not-an-id"),
        test::TestRequest::put().uri("/comments/not-an-id"),
        test::TestRequest::delete().uri("/comments/not-an-id"),
        test::TestRequest::get().uri("/authors/not-an-id"),
        test::TestRequest::get().uri("/posts/not-an-id/comments"),
        test::TestRequest::get().uri("/comments?postID=not-an-id"),
        test::TestRequest::post()
            .uri(&format!("/posts/not-an-id/comments?commenterID={commenter}"))
            .set_json(json!({ "text": "hi" })),
        test::TestRequest::post()
            .uri(&format!("/comments?postID=not-an-id&commenterID={commenter}"))
            .set_json(json!({ "text": "hi" })),
    ];

    for req in requests {
        let req = req.to_request();
        let target = format!("{} {}", req.method(), req.uri());
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{target}");
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body, ErrorResponse::invalid_id(), "{target}");
    }
}

#[actix_web::test]
async fn test_unknown_ids_are_not_found() {
    let state = AppState::in_memory(None);
    let app = init_app!(state);
    let missing = Uuid::new_v4();

    let requests = vec![
        test::TestRequest::get().uri(&format!("/posts/{missing}")),
        test::TestRequest::put()
            .uri(&format!("/posts/{missing}"))
            .set_json(json!({ "title": "Nope" })),
        test::TestRequest::patch().uri(&format!("/posts/{missing}?publish=true")),
        test::TestRequest::delete().uri(&format!("/posts/{missing}")),
        test::TestRequest::get().uri(&format!("/comments/{missing}")),
        test::TestRequest::put()
            .uri(&format!("/comments/{missing}"))
            .set_json(json!({ "text": "Nope" })),
        test::TestRequest::delete().uri(&format!("/comments/{missing}")),
        test::TestRequest::get().uri(&format!("/authors/{missing}")),
    ];

    for req in requests {
        let req = req.to_request();
        let target = format!("{} {}", req.method(), req.uri());
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{target}");
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert!(body.message.ends_with("not found"), "{target}");
    }
}

#[actix_web::test]
async fn test_publish_toggle() {
    let state = AppState::in_memory(None);
    let author = seed_author(&state, "Ada").await;
    let app = init_app!(state);

    let id = id_of(&create_post_as!(app, author.id, post_body("Draft", "science")));

    let req = test::TestRequest::patch()
        .uri(&format!("/posts/{id}?publish=true"))
        .to_request();
    let post: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(post["isPublished"], true);

    let req = test::TestRequest::patch()
        .uri(&format!("/posts/{id}?publish=maybe"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.message, "publish must be \"true\" or \"false\"");

    // Repeated keys fail query parsing and still answer with `{ message }`.
    let req = test::TestRequest::patch()
        .uri(&format!("/posts/{id}?publish=true&publish=false"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert!(!body.message.is_empty());

    let req = test::TestRequest::patch()
        .uri(&format!("/posts/{id}?publish=false"))
        .to_request();
    let post: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(post["isPublished"], false);
}

#[actix_web::test]
async fn test_post_without_identity() {
    let state = AppState::in_memory(None);
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/posts")
        .set_json(post_body("Anonymous", "opinion"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let default_author = Uuid::new_v4();
    let state = AppState::in_memory(Some(default_author));
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/posts")
        .set_json(post_body("Defaulted", "opinion"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let post: Value = test::read_body_json(resp).await;
    assert_eq!(post["author"], default_author.to_string());
}

#[actix_web::test]
async fn test_comment_counts_follow_create_and_delete() {
    let state = AppState::in_memory(None);
    let author = seed_author(&state, "Ada").await;
    let reader = seed_author(&state, "Grace").await;
    let app = init_app!(state);

    let post_id = id_of(&create_post_as!(app, author.id, post_body("Talk", "technology")));

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{post_id}/comments?commenterID={}", reader.id))
        .set_json(json!({ "text": "  Nice post  " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let comment: Value = test::read_body_json(resp).await;
    assert_eq!(comment["text"], "Nice post");
    assert_eq!(comment["commenter"]["name"], "Grace");
    let comment_id = id_of(&comment);

    let post: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri(&format!("/posts/{post_id}")).to_request(),
    )
    .await;
    assert_eq!(post["commentCount"], 1);

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/comments/{comment_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let post: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri(&format!("/posts/{post_id}")).to_request(),
    )
    .await;
    assert_eq!(post["commentCount"], 0);
}

#[actix_web::test]
async fn test_invalid_comment_leaves_count_alone() {
    let state = AppState::in_memory(None);
    let author = seed_author(&state, "Ada").await;
    let app = init_app!(state);

    let post_id = id_of(&create_post_as!(app, author.id, post_body("Quiet", "lifestyle")));

    let req = test::TestRequest::post()
        .uri(&format!("/comments?postID={post_id}&commenterID={}", author.id))
        .set_json(json!({ "text": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: ValidationErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.errors[0].message, "Comment must not be empty");

    let post = state
        .posts
        .find_by_id(post_id.parse().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(post.comment_count, 0);
    assert!(state.comments.find_filtered(Default::default()).await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_script_only_text_is_rejected() {
    let state = AppState::in_memory(None);
    let author = seed_author(&state, "Ada").await;
    let app = init_app!(state);

    let post_id = id_of(&create_post_as!(app, author.id, post_body("Safe", "science")));

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{post_id}/comments?commenterID={}", author.id))
        .set_json(json!({ "text": "<script>alert(1)</script>" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: ValidationErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.errors.len(), 1);
    assert_eq!(body.errors[0].message, "Comment must not be empty");

    let req = test::TestRequest::post()
        .uri("/posts")
        .insert_header((AUTHOR_ID_HEADER, author.id.to_string()))
        .set_json(json!({ "title": "T", "category": "food", "text": "<script>x()</script>" }))
        .to_request();
    let body: ValidationErrorResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.errors[0].field, "text");
    assert_eq!(body.errors[0].message, "Text must not be empty");

    assert_eq!(state.posts.find_all().await.unwrap().len(), 1);
    assert!(state.comments.find_filtered(Default::default()).await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_comment_on_missing_post_is_partial_failure() {
    let state = AppState::in_memory(None);
    let author = seed_author(&state, "Ada").await;
    let app = init_app!(state);
    let missing = Uuid::new_v4();

    let req = test::TestRequest::post()
        .uri(&format!("/comments?postID={missing}&commenterID={}", author.id))
        .set_json(json!({ "text": "Hello?" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body, ErrorResponse::database_update_failed());

    // The insert is not rolled back
    let comments: Vec<Value> = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/comments?postID={missing}"))
            .to_request(),
    )
    .await;
    assert_eq!(comments.len(), 1);
}

#[actix_web::test]
async fn test_comment_filters_and_edit() {
    let state = AppState::in_memory(None);
    let ada = seed_author(&state, "Ada").await;
    let grace = seed_author(&state, "Grace").await;
    let app = init_app!(state);

    let first = id_of(&create_post_as!(app, ada.id, post_body("One", "food")));
    let second = id_of(&create_post_as!(app, ada.id, post_body("Two", "food")));

    for (post, commenter) in [(&first, ada.id), (&first, grace.id), (&second, grace.id)] {
        let req = test::TestRequest::post()
            .uri(&format!("/comments?postID={post}&commenterID={commenter}"))
            .set_json(json!({ "text": "hi" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let all: Vec<Value> =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/comments").to_request())
            .await;
    assert_eq!(all.len(), 3);

    let on_first: Vec<Value> = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/posts/{first}/comments"))
            .to_request(),
    )
    .await;
    assert_eq!(on_first.len(), 2);

    let by_grace_on_first: Vec<Value> = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/comments?postID={first}&commenterID={}", grace.id))
            .to_request(),
    )
    .await;
    assert_eq!(by_grace_on_first.len(), 1);
    assert_eq!(by_grace_on_first[0]["commenter"], json!({ "name": "Grace" }));

    let comment_id = id_of(&by_grace_on_first[0]);
    let req = test::TestRequest::put()
        .uri(&format!("/comments/{comment_id}"))
        .set_json(json!({ "text": "edited" }))
        .to_request();
    let edited: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(edited["text"], "edited");
    assert_eq!(edited["post"], first);
}

#[actix_web::test]
async fn test_comment_create_requires_commenter() {
    let state = AppState::in_memory(None);
    let author = seed_author(&state, "Ada").await;
    let app = init_app!(state);

    let post_id = id_of(&create_post_as!(app, author.id, post_body("Open", "travel")));

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{post_id}/comments"))
        .set_json(json!({ "text": "who am I" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_author_create_and_duplicate() {
    let state = AppState::in_memory(None);
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/authors")
        .set_json(json!({ "name": " Ada " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let author: Value = test::read_body_json(resp).await;
    assert_eq!(author["name"], "Ada");

    let fetched: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/authors/{}", id_of(&author)))
            .to_request(),
    )
    .await;
    assert_eq!(fetched, author);

    let req = test::TestRequest::post()
        .uri("/authors")
        .set_json(json!({ "name": "Ada" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri("/authors")
        .set_json(json!({ "name": "" }))
        .to_request();
    let body: ValidationErrorResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.errors[0].message, "Name must not be empty");
}

#[actix_web::test]
async fn test_malformed_json_body() {
    let state = AppState::in_memory(None);
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/authors")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
