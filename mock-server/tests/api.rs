use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, AppState, ListEnvelope};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes: bytes::Bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- list ---

#[tokio::test]
async fn list_posts_defaults_to_data_envelope() {
    let resp = app().oneshot(get("/post")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
    assert_eq!(body["totalItems"], 5);
}

#[tokio::test]
async fn list_posts_paginates() {
    let resp = app().oneshot(get("/post?limit=2&offset=1")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    let page = body["data"].as_array().unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0]["id"], "2");
    assert_eq!(page[1]["id"], 3);
}

#[tokio::test]
async fn list_posts_offset_past_end_is_empty() {
    let resp = app().oneshot(get("/post?limit=20&offset=100")).await.unwrap();
    let body = body_json(resp).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn list_posts_bad_query_returns_400_with_messages() {
    let resp = app().oneshot(get("/post?limit=abc")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = body_json(resp).await;
    assert_eq!(body["statusCode"], 400);
    assert!(body["message"].is_array());
}

#[tokio::test]
async fn list_posts_in_every_envelope() {
    let records = vec![json!({"id": 1, "title": "A"})];
    let cases = [
        (ListEnvelope::Array, None),
        (ListEnvelope::Data, Some("data")),
        (ListEnvelope::Posts, Some("posts")),
        (ListEnvelope::Items, Some("items")),
    ];
    for (envelope, key) in cases {
        let resp = app_with(AppState::new(records.clone(), envelope))
            .oneshot(get("/post"))
            .await
            .unwrap();
        let body = body_json(resp).await;
        let list = match key {
            Some(key) => &body[key],
            None => &body,
        };
        assert_eq!(list, &json!([{"id": 1, "title": "A"}]), "{envelope:?}");
    }
}

// --- get ---

#[tokio::test]
async fn get_post_by_numeric_and_string_id() {
    let resp = app().oneshot(get("/post/1")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["title"], "The Importance of Regular Exercise");

    let resp = app().oneshot(get("/post/2")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["user"], "Dr. Omar Khalid");
}

#[tokio::test]
async fn get_post_not_found() {
    let resp = app().oneshot(get("/post/999")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body = body_json(resp).await;
    assert_eq!(body["message"], "Post not found");
    assert_eq!(body["statusCode"], 404);
}

// --- categories ---

#[tokio::test]
async fn list_categories_wraps_in_data() {
    let resp = app().oneshot(get("/category")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    let categories = body["data"].as_array().unwrap();
    assert_eq!(categories.len(), 3);
    assert_eq!(categories[1]["name"], "Nutrition");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let resp = app().oneshot(get("/posts")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
