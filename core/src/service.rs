//! Article fetch service: one request per call, executed through a
//! [`Transport`], parsed by [`ArticleClient`].
//!
//! There is no retry, caching or cancellation. A retry is the caller
//! invoking the same operation again.

use tracing::{debug, warn};

use crate::client::ArticleClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{Article, Category, Pagination};

pub struct ArticleService<T> {
    client: ArticleClient,
    transport: T,
}

impl<T: Transport> ArticleService<T> {
    pub fn new(config: ClientConfig, transport: T) -> Result<Self, ApiError> {
        Ok(Self {
            client: ArticleClient::new(config)?,
            transport,
        })
    }

    pub fn client(&self) -> &ArticleClient {
        &self.client
    }

    /// One page of articles. Unusable records are dropped; only transport,
    /// status and JSON failures are errors.
    pub fn list_articles(&self, page: Pagination) -> Result<Vec<Article>, ApiError> {
        let request = self.client.build_list_articles(page);
        debug!(url = %request.url, "fetching blog posts");
        self.transport
            .execute(&request)
            .and_then(|response| self.client.parse_list_articles(response))
            .inspect_err(|e| warn!("error fetching blogs: {e}"))
    }

    pub fn get_article_by_id(&self, id: &str) -> Result<Article, ApiError> {
        let request = self.client.build_get_article(id);
        debug!(id, url = %request.url, "fetching blog post");
        self.transport
            .execute(&request)
            .and_then(|response| self.client.parse_get_article(response))
            .inspect_err(|e| warn!("error fetching blog with id {id}: {e}"))
    }

    pub fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let request = self.client.build_list_categories();
        self.transport
            .execute(&request)
            .and_then(|response| self.client.parse_list_categories(response))
            .inspect_err(|e| warn!("error fetching categories: {e}"))
    }
}

#[cfg(feature = "ureq")]
impl ArticleService<crate::transport::UreqTransport> {
    /// Service over the blocking `ureq` transport.
    pub fn with_ureq(config: ClientConfig) -> Result<Self, ApiError> {
        Self::new(config, crate::transport::UreqTransport::new())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::http::{HttpRequest, HttpResponse};

    /// Serves one canned response and records every requested URL.
    struct Canned {
        status: u16,
        body: &'static str,
        seen: RefCell<Vec<String>>,
    }

    impl Canned {
        fn new(status: u16, body: &'static str) -> Self {
            Self {
                status,
                body,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for Canned {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.borrow_mut().push(request.url.clone());
            Ok(HttpResponse::new(self.status, self.body))
        }
    }

    fn service(canned: Canned) -> ArticleService<Canned> {
        ArticleService::new(ClientConfig::new("http://mock.test"), canned).unwrap()
    }

    fn seen(service: &ArticleService<Canned>) -> Vec<String> {
        service.transport.seen.borrow().clone()
    }

    #[test]
    fn list_articles_issues_one_paginated_get() {
        let svc = service(Canned::new(
            200,
            r#"{"posts":[{"id":1,"title":"A"},{"id":2,"title":"B"}]}"#,
        ));
        let articles = svc.list_articles(Pagination::new(2, 4)).unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(seen(&svc), vec!["http://mock.test/post?limit=2&offset=4"]);
    }

    #[test]
    fn list_articles_survives_bad_records() {
        let svc = service(Canned::new(200, r#"{"data":[{"id":1,"title":"A"},{"bad":true}]}"#));
        let articles = svc.list_articles(Pagination::default()).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "A");
    }

    #[test]
    fn get_article_by_id_propagates_404() {
        let svc = service(Canned::new(404, r#"{"message":"Post not found"}"#));
        let err = svc.get_article_by_id("77").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(seen(&svc), vec!["http://mock.test/post/77"]);
    }

    #[test]
    fn transport_failure_propagates() {
        let failing = |_: &HttpRequest| -> Result<HttpResponse, ApiError> {
            Err(ApiError::Transport("connection refused".to_string()))
        };
        let service = ArticleService::new(ClientConfig::default(), failing).unwrap();
        let err = service.list_articles(Pagination::default()).unwrap_err();
        assert_eq!(err, ApiError::Transport("connection refused".to_string()));
    }

    #[test]
    fn list_categories_uses_category_endpoint() {
        let svc = service(Canned::new(200, r#"{"data":[{"id":1,"name":"Nutrition"}]}"#));
        let categories = svc.list_categories().unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(seen(&svc), vec!["http://mock.test/category"]);
    }
}
