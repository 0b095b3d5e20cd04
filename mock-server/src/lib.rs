//! Stand-in for the blog backend.
//!
//! Serves `/post`, `/post/{id}` and `/category` from fixed JSON records. The
//! records are deliberately heterogeneous (numeric and string ids, nested or
//! flat authors and categories, bare filenames and absolute image URLs) and
//! the list envelope is configurable, matching what the real backend has
//! shipped over time.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::debug;

/// How `GET /post` wraps its records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListEnvelope {
    /// `[ ... ]`
    Array,
    /// `{ "data": [ ... ], "totalItems": n }`
    #[default]
    Data,
    /// `{ "posts": [ ... ] }`
    Posts,
    /// `{ "items": [ ... ] }`
    Items,
}

impl ListEnvelope {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "array" => Some(Self::Array),
            "data" => Some(Self::Data),
            "posts" => Some(Self::Posts),
            "items" => Some(Self::Items),
            _ => None,
        }
    }

    fn wrap(self, records: Vec<Value>, total: usize) -> Value {
        match self {
            Self::Array => Value::Array(records),
            Self::Data => json!({ "data": records, "totalItems": total }),
            Self::Posts => json!({ "posts": records }),
            Self::Items => json!({ "items": records }),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    posts: Arc<Vec<Value>>,
    categories: Arc<Vec<Value>>,
    envelope: ListEnvelope,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(seed_posts(), ListEnvelope::default())
    }
}

impl AppState {
    pub fn new(posts: Vec<Value>, envelope: ListEnvelope) -> Self {
        Self {
            posts: Arc::new(posts),
            categories: Arc::new(seed_categories()),
            envelope,
        }
    }
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

pub fn app() -> Router {
    app_with(AppState::default())
}

pub fn app_with(state: AppState) -> Router {
    Router::new()
        .route("/post", get(list_posts))
        .route("/post/{id}", get(get_post))
        .route("/category", get(list_categories))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(state)).await
}

/// Error body in the backend's format.
fn error_body(status: StatusCode, message: Value) -> (StatusCode, Json<Value>) {
    (
        status,
        Json(json!({ "message": message, "statusCode": status.as_u16() })),
    )
}

async fn list_posts(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let Query(query) = query.map_err(|_| {
        error_body(
            StatusCode::BAD_REQUEST,
            json!(["limit must be a number", "offset must be a number"]),
        )
    })?;
    let limit = query.limit.unwrap_or(20);
    let offset = query.offset.unwrap_or(0);
    debug!(limit, offset, envelope = ?state.envelope, "list posts");

    let page: Vec<Value> = state.posts.iter().skip(offset).take(limit).cloned().collect();
    Ok(Json(state.envelope.wrap(page, state.posts.len())))
}

async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    debug!(%id, "get post");
    state
        .posts
        .iter()
        .find(|post| id_matches(post, &id))
        .cloned()
        .map(Json)
        .ok_or_else(|| error_body(StatusCode::NOT_FOUND, json!("Post not found")))
}

async fn list_categories(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "data": state.categories.as_slice(), "message": "Categories retrieved" }))
}

fn id_matches(post: &Value, id: &str) -> bool {
    match post.get("id") {
        Some(Value::String(s)) => s == id,
        Some(Value::Number(n)) => n.to_string() == id,
        _ => false,
    }
}

/// Records in every shape the client has to tolerate.
pub fn seed_posts() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "title": "The Importance of Regular Exercise",
            "content": "Regular exercise is one of the most important things you can do for your health. It has many benefits, including improving your overall health and fitness, and reducing your risk for many chronic diseases.",
            "image": "exercise.jpg",
            "createdAt": "2025-10-15T08:30:00.000Z",
            "user": { "id": 4, "username": "salmasri" },
            "category": { "id": 1, "name": "Health & Wellness", "color": "#4CAF50" },
            "views": 1245,
            "tags": ["exercise", "fitness", "health"]
        }),
        json!({
            "id": "2",
            "title": "Nutrition Tips for a Healthy Lifestyle",
            "content": "Good nutrition is an important part of leading a healthy lifestyle.",
            "image": "/static/nutrition.png",
            "created_at": "2025-10-10 09:00:00",
            "user": "Dr. Omar Khalid",
            "category": "Nutrition",
            "readers": 987
        }),
        json!({
            "id": 3,
            "title": "Understanding Mental Health",
            "content": "",
            "image": "https://images.example.org/mental-health.jpg",
            "date": "2025-10-05",
            "author": "Dr. Leila Hassan",
            "category": { "name": "Mental Health" },
            "tags": "mental health"
        }),
        json!({ "bad": true }),
        json!({
            "id": 5,
            "createdAt": "not a date"
        }),
    ]
}

pub fn seed_categories() -> Vec<Value> {
    vec![
        json!({ "id": 1, "name": "Health & Wellness", "color": "#4CAF50" }),
        json!({ "id": 2, "name": "Nutrition", "color": "#2196F3" }),
        json!({ "id": 3, "name": "Mental Health" }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_names_parse() {
        assert_eq!(ListEnvelope::parse("array"), Some(ListEnvelope::Array));
        assert_eq!(ListEnvelope::parse(" Items "), Some(ListEnvelope::Items));
        assert_eq!(ListEnvelope::parse("results"), None);
    }

    #[test]
    fn wrap_uses_named_array() {
        let records = vec![json!({"id": 1})];
        assert_eq!(ListEnvelope::Array.wrap(records.clone(), 1), json!([{"id": 1}]));
        assert_eq!(
            ListEnvelope::Data.wrap(records.clone(), 7),
            json!({"data": [{"id": 1}], "totalItems": 7})
        );
        assert_eq!(ListEnvelope::Posts.wrap(records.clone(), 1)["posts"][0]["id"], 1);
        assert_eq!(ListEnvelope::Items.wrap(records, 1)["items"][0]["id"], 1);
    }

    #[test]
    fn ids_match_numbers_and_strings() {
        assert!(id_matches(&json!({"id": 1}), "1"));
        assert!(id_matches(&json!({"id": "2"}), "2"));
        assert!(!id_matches(&json!({"id": 1}), "01"));
        assert!(!id_matches(&json!({"bad": true}), "1"));
    }

    #[test]
    fn seed_contains_an_unusable_record() {
        let posts = seed_posts();
        assert_eq!(posts.len(), 5);
        assert!(posts.iter().any(|p| p.get("id").is_none()));
    }
}
