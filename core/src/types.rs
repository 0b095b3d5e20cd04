//! Client-side domain types.
//!
//! # Design
//! `Article` and `Category` are output-only: the only code that builds them
//! is the normalizer, which fills every field. They serialize with camelCase
//! names, the shape the presentation layer renders.

use serde::{Deserialize, Serialize};

/// A normalized blog post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub image: String,
    /// `YYYY-MM-DD`, or empty when the source date was unusable.
    pub date: String,
    pub author: String,
    pub read_time: String,
    pub category: String,
    pub category_color: String,
    pub readers: u64,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A normalized post category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String,
}

/// Query parameters for the post listing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u32,
    pub offset: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: 20,
            offset: 0,
        }
    }
}

impl Pagination {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn article_serializes_camel_case() {
        let article = Article {
            id: "1".to_string(),
            title: "T".to_string(),
            summary: "S".to_string(),
            content: "S".to_string(),
            image: "http://x/y.png".to_string(),
            date: "2025-10-15".to_string(),
            author: "Dr. Sarah".to_string(),
            read_time: "1 min".to_string(),
            category: "Nutrition".to_string(),
            category_color: "#2196F3".to_string(),
            readers: 12,
            tags: vec!["diet".to_string()],
        };
        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["readTime"], "1 min");
        assert_eq!(json["categoryColor"], "#2196F3");
        assert!(json.get("read_time").is_none());
    }

    #[test]
    fn pagination_defaults() {
        assert_eq!(Pagination::default(), Pagination::new(20, 0));
    }
}
