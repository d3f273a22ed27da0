//! # HTTP layer
//!
//! Requests travel through a stack of [`Transport`] implementations:
//!
//! ```text
//! ApiClient (verb helpers, failure logging)
//!     ↓
//! ResponseGuard (401 teardown + login navigation, 403/404/5xx diagnostics)
//!     ↓
//! BearerAuth (Authorization header from the session)
//!     ↓
//! ReqwestTransport (base URL, Accept header, body encoding)
//! ```
//!
//! Every layer is a plain decorator over the one below it, so each can be
//! exercised on its own against a fake transport.

mod client;
mod middleware;
mod transport;

use async_trait::async_trait;
use reqwest::{
    Method, StatusCode,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

pub use client::ApiClient;
pub use middleware::{BearerAuth, LOGIN_VIEW, Navigator, NoopNavigator, ResponseGuard};
pub use transport::ReqwestTransport;

use crate::error::ApiError;

/// Request body and the encoding it goes out with.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
    #[default]
    Empty,
    /// `multipart/form-data`, the client default.
    Form(Value),
    /// `application/json`, used where a call overrides the default.
    Json(Value),
}

/// One call to the API, as it travels down the transport stack.
///
/// Layers may add headers (see [`BearerAuth`]) but never rewrite the path or
/// body. The path is relative to the configured base URL; a leading `/` is
/// allowed and does not drop the base URL's own path prefix.
///
/// # Example
///
/// ```
/// let request = ApiRequest::new(Method::GET, "/users")
///     .query(&[("page", "2".to_string())]);
/// ```
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the base URL. May carry its own query string.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Body,
}

impl ApiRequest {
    /// Creates a request with no query pairs, headers or body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: Body::Empty,
        }
    }

    /// Appends query pairs.
    ///
    /// They are URL-encoded and added after any query string already written
    /// into the path, so `"/stats?month=2024-03"` plus `[("page", "2")]`
    /// goes out as `?month=2024-03&page=2`.
    ///
    /// # Arguments
    ///
    /// * `pairs` - Name/value pairs, sent in the given order
    pub fn query(mut self, pairs: &[(&str, String)]) -> Self {
        self.query
            .extend(pairs.iter().map(|(k, v)| (k.to_string(), v.clone())));
        self
    }

    /// Sets the body and with it the encoding ([`Body::Form`] or [`Body::Json`]).
    pub fn body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    /// Sets a header, replacing any previous value under `name`.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// A response that reached the client, whatever its status.
///
/// The body is kept as text so that callers can decode it into the type they
/// expect with [`json`](Self::json) or inspect it loosely with
/// [`value`](Self::value).
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Decodes the body into `T`.
    ///
    /// # Returns
    ///
    /// - `Ok(T)` - The decoded body
    /// - `Err(ApiError::Decode)` - The body is not JSON or does not match `T`
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Body as loose JSON; `Null` when empty or not JSON.
    pub fn value(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

/// Something that can carry an [`ApiRequest`] to the server.
///
/// Implementations return `Ok` for every response that arrived, whatever its
/// status; turning statuses into errors is the job of [`ResponseGuard`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        (**self).send(request).await
    }
}
