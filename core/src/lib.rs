//! Client core for the health organization's blog API.
//!
//! # Overview
//! Turns the backend's loosely typed post records into normalized
//! [`Article`] values. Requests are built and responses parsed without
//! touching the network (host-does-IO pattern); [`ArticleService`] pairs the
//! client with a [`Transport`] for callers that want a one-call fetch.
//!
//! # Design
//! - [`normalize`] is total: missing or mistyped fields fall back to
//!   defaults, so one bad field never blocks rendering a list.
//! - List parsing drops unusable records (logged via `tracing`) instead of
//!   failing the batch; single-record parsing fails with a typed
//!   [`ApiError`].
//! - The base origin lives in [`ClientConfig`] and is injected at
//!   construction.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod normalize;
pub mod search;
pub mod service;
pub mod transport;
pub mod types;

pub use client::ArticleClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use normalize::{normalize, parse_record, RecordOutcome, SkipReason};
pub use search::search_articles;
pub use service::ArticleService;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use transport::Transport;
pub use types::{Article, Category, Pagination};
