//! Maps untrusted backend records onto `Article` / `Category`.
//!
//! # Design
//! Records arrive as arbitrary JSON. Every field is resolved through an
//! ordered fallback and degrades to a fixed default when it is missing,
//! mistyped or unparsable, so `normalize` is total over `serde_json::Value`.
//! `parse_record` is the one place that decides whether a record is usable
//! at all; list parsing drops `Skip` outcomes instead of failing the batch.
//!
//! Character counts (summary, read time) are in `char`s, never bytes.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::config::ClientConfig;
use crate::types::{Article, Category};

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_SUMMARY: &str = "No summary available";
pub const DEFAULT_AUTHOR: &str = "Anonymous";
pub const DEFAULT_CATEGORY: &str = "Uncategorized";
pub const DEFAULT_CATEGORY_COLOR: &str = "#666666";

/// Summary length before the ellipsis is appended.
pub const SUMMARY_CHARS: usize = 150;
/// Characters per minute of reading.
pub const CHARS_PER_MINUTE: usize = 1000;

/// Directory the backend serves bare image filenames from.
const UPLOADS_PATH: &str = "/uploads/posts/";

/// Source fields holding the publication date, in priority order.
const DATE_FIELDS: [&str; 3] = ["createdAt", "created_at", "date"];

/// Source fields holding the view counter, in priority order.
const READER_FIELDS: [&str; 2] = ["views", "readers"];

/// Result of validating one untrusted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Valid(Article),
    Skip(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The record is not a JSON object (null, string, number, array...).
    NotAnObject,
    /// No string or numeric `id` could be read.
    MissingId,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotAnObject => write!(f, "record is not an object"),
            SkipReason::MissingId => write!(f, "record has no usable id"),
        }
    }
}

/// Validate and normalize one record from a post listing.
pub fn parse_record(record: &Value, config: &ClientConfig) -> RecordOutcome {
    if !record.is_object() {
        return RecordOutcome::Skip(SkipReason::NotAnObject);
    }
    let article = normalize(record, config);
    if article.id.is_empty() {
        return RecordOutcome::Skip(SkipReason::MissingId);
    }
    RecordOutcome::Valid(article)
}

/// Best-effort mapping of any JSON value to an `Article`. Never fails.
pub fn normalize(record: &Value, config: &ClientConfig) -> Article {
    let empty = Map::new();
    let fields = record.as_object().unwrap_or(&empty);

    let content = non_empty_str(fields.get("content")).unwrap_or_default().to_string();
    let (category, category_color) = resolve_category(fields.get("category"));

    Article {
        id: resolve_id(fields.get("id")),
        title: non_empty_str(fields.get("title"))
            .unwrap_or(DEFAULT_TITLE)
            .to_string(),
        summary: summarize(&content),
        image: resolve_image(fields.get("image"), config),
        date: resolve_date(fields),
        author: resolve_author(fields),
        read_time: read_time(&content),
        category,
        category_color,
        readers: resolve_readers(fields),
        tags: resolve_tags(fields.get("tags")),
        content,
    }
}

/// Normalize one entry of the category listing. `None` when the entry is
/// not an object or has no usable id.
pub fn normalize_category(record: &Value) -> Option<Category> {
    let fields = record.as_object()?;
    let id = resolve_id(fields.get("id"));
    if id.is_empty() {
        return None;
    }
    Some(Category {
        id,
        name: non_empty_str(fields.get("name"))
            .unwrap_or(DEFAULT_CATEGORY)
            .to_string(),
        color: non_empty_str(fields.get("color"))
            .unwrap_or(DEFAULT_CATEGORY_COLOR)
            .to_string(),
    })
}

/// First `SUMMARY_CHARS` characters of `content`, with `...` appended only
/// when something was cut.
pub fn summarize(content: &str) -> String {
    if content.is_empty() {
        return DEFAULT_SUMMARY.to_string();
    }
    match content.char_indices().nth(SUMMARY_CHARS) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

pub fn read_time(content: &str) -> String {
    let minutes = content.chars().count().div_ceil(CHARS_PER_MINUTE);
    format!("{minutes} min")
}

/// Turn an image reference into an absolute URL.
///
/// - `http://…` / `https://…` pass through.
/// - `/path` is served from the API origin.
/// - anything else is a filename under `/uploads/posts/`.
pub fn resolve_image(image: Option<&Value>, config: &ClientConfig) -> String {
    match non_empty_str(image) {
        None => config.placeholder_image.clone(),
        Some(url) if has_http_scheme(url) => url.to_string(),
        Some(path) if path.starts_with('/') => format!("{}{path}", config.base_url),
        Some(file) => format!("{}{UPLOADS_PATH}{file}", config.base_url),
    }
}

fn has_http_scheme(url: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

fn resolve_id(id: Option<&Value>) -> String {
    match id {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => number_to_string(n),
        _ => String::new(),
    }
}

/// Integral floats render without a fractional part (`7.0` -> `"7"`).
fn number_to_string(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

fn resolve_date(fields: &Map<String, Value>) -> String {
    let Some(raw) = DATE_FIELDS
        .iter()
        .filter_map(|name| fields.get(*name))
        .find(|value| is_truthy(value))
    else {
        return String::new();
    };
    match parse_timestamp(raw) {
        Some(instant) => instant.format("%Y-%m-%d").to_string(),
        None => {
            debug!("unparsable post date {raw}");
            String::new()
        }
    }
}

/// Accepts RFC 3339, RFC 2822, naive `YYYY-MM-DD[T ]HH:MM:SS[.f]` (read as
/// UTC), bare dates (`2025-10-15`, `Oct 15, 2025`), and numbers as epoch
/// milliseconds.
fn parse_timestamp(raw: &Value) -> Option<DateTime<Utc>> {
    match raw {
        Value::Number(n) => {
            let millis = n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))?;
            DateTime::from_timestamp_millis(millis)
        }
        Value::String(s) => parse_timestamp_str(s.trim()),
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
        return Some(instant.with_timezone(&Utc));
    }
    if let Ok(instant) = DateTime::parse_from_rfc2822(s) {
        return Some(instant.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    ["%Y-%m-%d", "%b %d, %Y", "%B %d, %Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `user` as a string (even an empty one), then `user.username`, then
/// `author`.
fn resolve_author(fields: &Map<String, Value>) -> String {
    let user = fields.get("user");
    if let Some(name) = user.and_then(Value::as_str) {
        return name.to_string();
    }
    if let Some(name) = non_empty_str(user.and_then(|u| u.get("username"))) {
        return name.to_string();
    }
    non_empty_str(fields.get("author"))
        .unwrap_or(DEFAULT_AUTHOR)
        .to_string()
}

fn resolve_category(category: Option<&Value>) -> (String, String) {
    let (name, color) = match category {
        Some(Value::String(name)) => (name.as_str(), DEFAULT_CATEGORY_COLOR),
        Some(Value::Object(fields)) => (
            non_empty_str(fields.get("name")).unwrap_or(DEFAULT_CATEGORY),
            non_empty_str(fields.get("color")).unwrap_or(DEFAULT_CATEGORY_COLOR),
        ),
        _ => (DEFAULT_CATEGORY, DEFAULT_CATEGORY_COLOR),
    };
    (name.to_string(), color.to_string())
}

/// First positive count among `views` and `readers`.
fn resolve_readers(fields: &Map<String, Value>) -> u64 {
    READER_FIELDS
        .iter()
        .filter_map(|name| fields.get(*name))
        .filter_map(as_count)
        .find(|count| *count > 0)
        .unwrap_or(0)
}

fn as_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f > 0.0).map(|f| f.round() as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// String elements of an array-shaped `tags`; anything else yields no tags.
fn resolve_tags(tags: Option<&Value>) -> Vec<String> {
    match tags {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// JSON truthiness: null, false, 0 and "" are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
