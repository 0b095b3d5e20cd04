//! C-ABI wrapper around `healthfeed-core`.
//!
//! # Overview
//! Exposes the blog API client through `extern "C"` functions so the mobile
//! host can build requests, run them on its own networking stack, and hand
//! the responses back for normalization into articles and categories.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Per-operation `build_*` / `parse_*` mirrors the core API 1:1.
//! - A single `FfiResult` envelope with `FfiDataTag` + `void* data`
//!   conveys success payloads and errors uniformly.
//! - The C caller owns all returned pointers and must call the matching
//!   `healthfeed_free_*` function to release them.

pub mod types;

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::catch_unwind;

use healthfeed_core::{ArticleClient, ClientConfig, HttpResponse, Pagination};

use types::*;

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Box a client built from `config`, or null if the config is rejected.
fn new_client(config: ClientConfig) -> *mut FfiArticleClient {
    match ArticleClient::new(config) {
        Ok(client) => Box::into_raw(Box::new(FfiArticleClient { inner: client })),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Create a new client bound to `base_url`.
///
/// A null `base_url` takes the origin from `HEALTHFEED_BASE_URL`, falling
/// back to `http://localhost:3000`. Returns null if `base_url` is not UTF-8,
/// not an http(s) URL, or if an internal panic occurs. The caller must free
/// the returned pointer with `healthfeed_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn healthfeed_client_new(base_url: *const c_char) -> *mut FfiArticleClient {
    catch_unwind(|| {
        if base_url.is_null() {
            return new_client(ClientConfig::from_env());
        }
        let Ok(url) = unsafe { CStr::from_ptr(base_url) }.to_str() else {
            return std::ptr::null_mut();
        };
        new_client(ClientConfig::new(url))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Create a new client from a JSON configuration document such as
/// `{"baseUrl": "...", "placeholderImage": "..."}`. Missing keys take
/// defaults.
///
/// Returns null if `config_json` is null, not UTF-8, malformed, or names a
/// non-http(s) origin.
#[unsafe(no_mangle)]
pub extern "C" fn healthfeed_client_from_json(
    config_json: *const c_char,
) -> *mut FfiArticleClient {
    catch_unwind(|| {
        if config_json.is_null() {
            return std::ptr::null_mut();
        }
        let Ok(raw) = unsafe { CStr::from_ptr(config_json) }.to_str() else {
            return std::ptr::null_mut();
        };
        match ClientConfig::from_json(raw) {
            Ok(config) => new_client(config),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `healthfeed_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn healthfeed_client_free(client: *mut FfiArticleClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Build the request for one page of articles.
///
/// Returns null if `client` is null.
/// The caller must free the returned pointer with `healthfeed_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn healthfeed_build_list_articles(
    client: *const FfiArticleClient,
    limit: u32,
    offset: u32,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let req = client.inner.build_list_articles(Pagination::new(limit, offset));
        FfiHttpRequest::from_core(req)
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build the request for a single article.
///
/// Returns null if `client` or `id` is null, or if `id` is not UTF-8.
#[unsafe(no_mangle)]
pub extern "C" fn healthfeed_build_get_article(
    client: *const FfiArticleClient,
    id: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || id.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let Ok(id) = unsafe { CStr::from_ptr(id) }.to_str() else {
            return std::ptr::null_mut();
        };
        FfiHttpRequest::from_core(client.inner.build_get_article(id))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build the request for the category listing.
///
/// Returns null if `client` is null.
#[unsafe(no_mangle)]
pub extern "C" fn healthfeed_build_list_categories(
    client: *const FfiArticleClient,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_list_categories())
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null body is an
/// empty body.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() {
        String::new()
    } else {
        unsafe { CStr::from_ptr(resp.body) }
            .to_string_lossy()
            .into_owned()
    };
    HttpResponse::new(resp.status, body)
}

/// Shared null checks and panic guard for every parse function.
fn parse_with(
    fn_name: &str,
    client: *const FfiArticleClient,
    response: *const FfiHttpResponse,
    parse: impl FnOnce(&ArticleClient, HttpResponse) -> *mut FfiResult + std::panic::UnwindSafe,
) -> *mut FfiResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiResult::null_arg("client");
        }
        if response.is_null() {
            return FfiResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        parse(&client.inner, ffi_response_to_core(resp))
    })
    .unwrap_or_else(|_| FfiResult::panic(&format!("panic in {fn_name}")))
}

/// Parse a post-list response.
///
/// Returns a result with `data_tag = ArticleList` on success. Records that
/// cannot be normalized are left out of the list, not reported as errors.
#[unsafe(no_mangle)]
pub extern "C" fn healthfeed_parse_list_articles(
    client: *const FfiArticleClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse_with("healthfeed_parse_list_articles", client, response, |client, resp| {
        match client.parse_list_articles(resp) {
            Ok(articles) => FfiResult::ok_article_list(articles),
            Err(e) => FfiResult::from_error(e),
        }
    })
}

/// Parse a single-post response.
///
/// Returns a result with `data_tag = Article` on success.
#[unsafe(no_mangle)]
pub extern "C" fn healthfeed_parse_get_article(
    client: *const FfiArticleClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse_with("healthfeed_parse_get_article", client, response, |client, resp| {
        match client.parse_get_article(resp) {
            Ok(article) => FfiResult::ok_article(article),
            Err(e) => FfiResult::from_error(e),
        }
    })
}

/// Parse a category-list response.
///
/// Returns a result with `data_tag = CategoryList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn healthfeed_parse_list_categories(
    client: *const FfiArticleClient,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    parse_with("healthfeed_parse_list_categories", client, response, |client, resp| {
        match client.parse_list_categories(resp) {
            Ok(categories) => FfiResult::ok_category_list(categories),
            Err(e) => FfiResult::from_error(e),
        }
    })
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `healthfeed_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn healthfeed_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        unsafe {
            free_c_string(req.url);
            for h in from_raw_slice(req.headers, req.headers_len) {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    });
}

/// Free an `FfiResult` returned by any `healthfeed_parse_*` function.
/// Safe to call with null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn healthfeed_free_result(result: *mut FfiResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        unsafe { free_c_string(result.error_message) };
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::Article => unsafe {
                let article = Box::from_raw(result.data as *mut FfiArticle);
                article.free_fields();
            },
            FfiDataTag::ArticleList => unsafe {
                let list = Box::from_raw(result.data as *mut FfiArticleList);
                for article in from_raw_slice(list.items, list.len) {
                    article.free_fields();
                }
            },
            FfiDataTag::CategoryList => unsafe {
                let list = Box::from_raw(result.data as *mut FfiCategoryList);
                for category in from_raw_slice(list.items, list.len) {
                    category.free_fields();
                }
            },
            FfiDataTag::None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
