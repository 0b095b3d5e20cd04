//! Stateless HTTP request builder and response parser for the blog API.
//!
//! # Design
//! `ArticleClient` holds only its configuration and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the round-trip, so the core stays
//! deterministic and free of I/O.
//!
//! List parsing isolates failures per record: unusable records are logged
//! and dropped. Single-record parsing has nothing to salvage and fails.

use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::envelope;
use crate::error::{ApiError, GENERIC_FAILURE_MESSAGE};
use crate::http::{HttpRequest, HttpResponse};
use crate::normalize::{self, RecordOutcome};
use crate::types::{Article, Category, Pagination};

/// Synchronous, stateless client for the blog API.
#[derive(Debug, Clone)]
pub struct ArticleClient {
    config: ClientConfig,
    base: Url,
}

impl ArticleClient {
    /// Fails with `InvalidConfig` when the base URL cannot carry a path.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        config.validate()?;
        let base = Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidConfig(format!("{}: {e}", config.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidConfig(format!(
                "{} cannot carry a path",
                config.base_url
            )));
        }
        Ok(Self { config, base })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `GET /post?limit=&offset=`
    pub fn build_list_articles(&self, page: Pagination) -> HttpRequest {
        let mut url = self.endpoint(&["post"]);
        url.query_pairs_mut()
            .append_pair("limit", &page.limit.to_string())
            .append_pair("offset", &page.offset.to_string());
        HttpRequest::get_json(url.into())
    }

    /// `GET /post/{id}`; the id is percent-encoded as one path segment.
    pub fn build_get_article(&self, id: &str) -> HttpRequest {
        HttpRequest::get_json(self.endpoint(&["post", id]).into())
    }

    /// `GET /category`
    pub fn build_list_categories(&self) -> HttpRequest {
        HttpRequest::get_json(self.endpoint(&["category"]).into())
    }

    pub fn parse_list_articles(&self, response: HttpResponse) -> Result<Vec<Article>, ApiError> {
        let body = json_body(&response)?;
        let (envelope, records) = envelope::unwrap_records(&body);
        if envelope.is_none() {
            warn!("unexpected post list format, expected an array of posts");
        }

        let mut articles = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            match normalize::parse_record(record, &self.config) {
                RecordOutcome::Valid(article) => articles.push(article),
                RecordOutcome::Skip(reason) => {
                    warn!(index, %reason, "skipping invalid blog post record");
                }
            }
        }

        debug!(
            envelope = envelope.unwrap_or("none"),
            received = records.len(),
            mapped = articles.len(),
            "mapped blog posts"
        );
        Ok(articles)
    }

    pub fn parse_get_article(&self, response: HttpResponse) -> Result<Article, ApiError> {
        check_status(&response)?;
        if response.body.trim().is_empty() {
            return Err(ApiError::NotFoundOrInvalid("empty response body".to_string()));
        }
        let body = decode(&response.body)?;
        if !body.is_object() {
            return Err(ApiError::NotFoundOrInvalid(format!(
                "expected an object, got {}",
                kind(&body)
            )));
        }
        Ok(normalize::normalize(&body, &self.config))
    }

    pub fn parse_list_categories(&self, response: HttpResponse) -> Result<Vec<Category>, ApiError> {
        let body = json_body(&response)?;
        let (_, records) = envelope::unwrap_records(&body);
        let categories: Vec<Category> = records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| {
                let category = normalize::normalize_category(record);
                if category.is_none() {
                    warn!(index, "skipping invalid category record");
                }
                category
            })
            .collect();
        debug!(count = categories.len(), "mapped categories");
        Ok(categories)
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // cannot_be_a_base was rejected in new(), so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Map a non-2xx status to `ApiError::Http` carrying the server's message.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Http {
        status: response.status,
        message: error_message(&response.body),
    })
}

/// The `message` field of an error body. Validation errors send an array of
/// messages, which are joined.
pub fn error_message(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let message = parsed.as_ref().and_then(|v| v.get("message")).and_then(|m| match m {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        _ => None,
    });
    message.unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string())
}

fn json_body(response: &HttpResponse) -> Result<Value, ApiError> {
    check_status(response)?;
    decode(&response.body)
}

fn decode(body: &str) -> Result<Value, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
