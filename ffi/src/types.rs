//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, pointer + length instead of `Vec`, and
//! tagged enums with explicit discriminants. Arrays handed to C are boxed
//! slices, so length and capacity always agree when they come back to be
//! freed. Conversion functions live here to keep `lib.rs` focused on the
//! `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use healthfeed_core::{ApiError, Article, Category, HttpMethod};

/// Opaque handle to an `ArticleClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiArticleClient {
    pub(crate) inner: healthfeed_core::ArticleClient,
}

// ---------------------------------------------------------------------------
// Allocation helpers
// ---------------------------------------------------------------------------

/// Hand a Rust string to C. Interior NUL bytes are dropped rather than
/// failing the whole conversion.
pub(crate) fn c_string(s: String) -> *mut c_char {
    let s = if s.contains('\0') { s.replace('\0', "") } else { s };
    CString::new(s).unwrap_or_default().into_raw()
}

/// Reclaim a string produced by `c_string`. Null is ignored.
///
/// # Safety
/// `ptr` must be null or come from `c_string` and not have been freed.
pub(crate) unsafe fn free_c_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// Leak a vector as pointer + length. Empty vectors become null.
pub(crate) fn into_raw_slice<T>(items: Vec<T>) -> (*mut T, u32) {
    if items.is_empty() {
        return (std::ptr::null_mut(), 0);
    }
    let len = items.len() as u32;
    let ptr = Box::into_raw(items.into_boxed_slice()) as *mut T;
    (ptr, len)
}

/// Reclaim a slice produced by `into_raw_slice`.
///
/// # Safety
/// `ptr`/`len` must come from `into_raw_slice` and not have been freed.
pub(crate) unsafe fn from_raw_slice<T>(ptr: *mut T, len: u32) -> Vec<T> {
    if ptr.is_null() || len == 0 {
        return Vec::new();
    }
    Box::from_raw(std::ptr::slice_from_raw_parts_mut(ptr, len as usize)).into_vec()
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `healthfeed_build_*` functions. The C caller executes the
/// request and passes the response back through `healthfeed_parse_*`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: healthfeed_core::HttpRequest) -> *mut Self {
        let headers: Vec<FfiHeader> = req
            .headers
            .into_iter()
            .map(|(k, v)| FfiHeader {
                key: c_string(k),
                value: c_string(v),
            })
            .collect();
        let (headers, headers_len) = into_raw_slice(headers);

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url: c_string(req.url),
            headers,
            headers_len,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing an HTTP request,
/// then passes a pointer to a `healthfeed_parse_*` function. The FFI layer
/// reads but does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiResult`.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Http = 1,
    NotFoundOrInvalid = 2,
    Transport = 3,
    Deserialization = 4,
    InvalidConfig = 5,
    Panic = 6,
    NullArg = 7,
}

/// Tag that tells `healthfeed_free_result` what `FfiResult::data` points to.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    Article = 1,
    ArticleList = 2,
    CategoryList = 3,
}

/// A normalized article exposed to C. Every string is non-null.
#[repr(C)]
pub struct FfiArticle {
    pub id: *mut c_char,
    pub title: *mut c_char,
    pub summary: *mut c_char,
    pub content: *mut c_char,
    pub image: *mut c_char,
    pub date: *mut c_char,
    pub author: *mut c_char,
    pub read_time: *mut c_char,
    pub category: *mut c_char,
    pub category_color: *mut c_char,
    pub readers: u64,
    pub tags: *mut *mut c_char,
    pub tags_len: u32,
}

impl FfiArticle {
    fn from_core(article: Article) -> Self {
        let tags: Vec<*mut c_char> = article.tags.into_iter().map(c_string).collect();
        let (tags, tags_len) = into_raw_slice(tags);
        FfiArticle {
            id: c_string(article.id),
            title: c_string(article.title),
            summary: c_string(article.summary),
            content: c_string(article.content),
            image: c_string(article.image),
            date: c_string(article.date),
            author: c_string(article.author),
            read_time: c_string(article.read_time),
            category: c_string(article.category),
            category_color: c_string(article.category_color),
            readers: article.readers,
            tags,
            tags_len,
        }
    }

    /// Free the owned fields (but not the struct itself).
    ///
    /// # Safety
    /// Must be called at most once, on an article built by `from_core`.
    pub(crate) unsafe fn free_fields(&self) {
        for ptr in [
            self.id,
            self.title,
            self.summary,
            self.content,
            self.image,
            self.date,
            self.author,
            self.read_time,
            self.category,
            self.category_color,
        ] {
            free_c_string(ptr);
        }
        for tag in from_raw_slice(self.tags, self.tags_len) {
            free_c_string(tag);
        }
    }
}

/// A list of articles exposed to C.
#[repr(C)]
pub struct FfiArticleList {
    pub items: *mut FfiArticle,
    pub len: u32,
}

/// A category exposed to C.
#[repr(C)]
pub struct FfiCategory {
    pub id: *mut c_char,
    pub name: *mut c_char,
    pub color: *mut c_char,
}

impl FfiCategory {
    fn from_core(category: Category) -> Self {
        FfiCategory {
            id: c_string(category.id),
            name: c_string(category.name),
            color: c_string(category.color),
        }
    }

    /// # Safety
    /// Must be called at most once, on a category built by `from_core`.
    pub(crate) unsafe fn free_fields(&self) {
        free_c_string(self.id);
        free_c_string(self.name);
        free_c_string(self.color);
    }
}

/// A list of categories exposed to C.
#[repr(C)]
pub struct FfiCategoryList {
    pub items: *mut FfiCategory,
    pub len: u32,
}

/// Result envelope for all parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the parsed payload (tagged by `data_tag`).
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `data` is null.
#[repr(C)]
pub struct FfiResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut std::ffi::c_void,
}

impl FfiResult {
    fn ok(data_tag: FfiDataTag, data: *mut std::ffi::c_void) -> *mut Self {
        Box::into_raw(Box::new(FfiResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            data_tag,
            data,
        }))
    }

    fn err(error_code: FfiErrorCode, http_status: u16, message: String) -> *mut Self {
        Box::into_raw(Box::new(FfiResult {
            error_code,
            error_message: c_string(message),
            http_status,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        }))
    }

    /// Build a success result carrying a single `FfiArticle`.
    pub(crate) fn ok_article(article: Article) -> *mut Self {
        let article = Box::new(FfiArticle::from_core(article));
        Self::ok(FfiDataTag::Article, Box::into_raw(article) as *mut std::ffi::c_void)
    }

    /// Build a success result carrying an `FfiArticleList`.
    pub(crate) fn ok_article_list(articles: Vec<Article>) -> *mut Self {
        let items: Vec<FfiArticle> = articles.into_iter().map(FfiArticle::from_core).collect();
        let (items, len) = into_raw_slice(items);
        let list = Box::new(FfiArticleList { items, len });
        Self::ok(FfiDataTag::ArticleList, Box::into_raw(list) as *mut std::ffi::c_void)
    }

    /// Build a success result carrying an `FfiCategoryList`.
    pub(crate) fn ok_category_list(categories: Vec<Category>) -> *mut Self {
        let items: Vec<FfiCategory> = categories.into_iter().map(FfiCategory::from_core).collect();
        let (items, len) = into_raw_slice(items);
        let list = Box::new(FfiCategoryList { items, len });
        Self::ok(FfiDataTag::CategoryList, Box::into_raw(list) as *mut std::ffi::c_void)
    }

    /// Build an error result from an `ApiError`.
    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let code = match &err {
            ApiError::Http { .. } => FfiErrorCode::Http,
            ApiError::NotFoundOrInvalid(_) => FfiErrorCode::NotFoundOrInvalid,
            ApiError::Transport(_) => FfiErrorCode::Transport,
            ApiError::Deserialization(_) => FfiErrorCode::Deserialization,
            ApiError::InvalidConfig(_) => FfiErrorCode::InvalidConfig,
        };
        Self::err(code, err.status().unwrap_or(0), err.to_string())
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::err(FfiErrorCode::NullArg, 0, format!("null argument: {name}"))
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::err(FfiErrorCode::Panic, 0, msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    #[test]
    fn c_string_drops_interior_nul() {
        let ptr = c_string("a\0b".to_string());
        assert_eq!(unsafe { CStr::from_ptr(ptr) }.to_str().unwrap(), "ab");
        unsafe { free_c_string(ptr) };
    }

    #[test]
    fn raw_slice_round_trip() {
        let (ptr, len) = into_raw_slice(vec![1u32, 2, 3]);
        assert_eq!(len, 3);
        assert_eq!(unsafe { from_raw_slice(ptr, len) }, vec![1, 2, 3]);

        let (ptr, len) = into_raw_slice(Vec::<u32>::new());
        assert!(ptr.is_null());
        assert_eq!(len, 0);
    }
}
