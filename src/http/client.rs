use std::sync::Arc;

use reqwest::{Method, Url};
use serde_json::Value;

use super::{
    ApiRequest, ApiResponse, BearerAuth, Body, Navigator, ReqwestTransport, ResponseGuard,
    Transport,
};
use crate::{error::ApiError, session::Session};

/// Shared entry point for every remote call.
///
/// The verb helpers add nothing but a diagnostic: a failing call is logged
/// with its verb and path and the original error is handed back untouched.
/// Cloning is cheap; clones share the same transport stack.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Builds the full stack over a real HTTP transport.
    pub fn new(
        base_url: Url,
        session: Session,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(base_url)?;
        Ok(Self::layered(transport, session, navigator))
    }

    /// Wraps `transport` with bearer injection and the response guard.
    pub fn layered<T: Transport + 'static>(
        transport: T,
        session: Session,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let authed = BearerAuth::new(transport, session.clone());
        Self::from_transport(ResponseGuard::new(authed, session, navigator))
    }

    /// Uses `transport` as is, without adding any layer.
    pub fn from_transport<T: Transport + 'static>(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Sends a GET request.
    ///
    /// # Arguments
    ///
    /// * `path` - Path below the base URL, optionally with its own query string
    /// * `query` - Extra query pairs appended after any inline query
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing:
    /// - `Ok(ApiResponse)` - A 2xx response
    /// - `Err(ApiError)` - Network failure, session storage failure or a
    ///   non-2xx status; 401 has already ended the session at this point
    ///
    /// # Example
    ///
    /// ```
    /// let response = client.get("/users", &[("page", "2".to_string())]).await?;
    /// ```
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<ApiResponse, ApiError> {
        self.dispatch(ApiRequest::new(Method::GET, path).query(query))
            .await
    }

    /// Sends a POST request with `data` as multipart form fields.
    ///
    /// Nested objects and arrays are flattened into `key[child]` and `key[]`
    /// fields. With `None` no body is sent.
    ///
    /// # Arguments
    ///
    /// * `path` - Path below the base URL
    /// * `data` - A JSON object, or `None`
    pub async fn post(&self, path: &str, data: Option<Value>) -> Result<ApiResponse, ApiError> {
        self.dispatch(ApiRequest::new(Method::POST, path).body(form(data)))
            .await
    }

    /// Sends a PUT request. PUT always sends `data` as a JSON body.
    pub async fn put(&self, path: &str, data: Option<Value>) -> Result<ApiResponse, ApiError> {
        let body = data.map(Body::Json).unwrap_or_default();
        self.dispatch(ApiRequest::new(Method::PUT, path).body(body))
            .await
    }

    /// Sends a PATCH request, encoded like [`post`](Self::post).
    pub async fn patch(&self, path: &str, data: Option<Value>) -> Result<ApiResponse, ApiError> {
        self.dispatch(ApiRequest::new(Method::PATCH, path).body(form(data)))
            .await
    }

    /// Sends a DELETE request without a body.
    pub async fn delete(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.dispatch(ApiRequest::new(Method::DELETE, path)).await
    }

    async fn dispatch(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let verb = request.method.clone();
        let path = request.path.clone();

        self.transport
            .send(request)
            .await
            .inspect_err(|e| tracing::error!(%verb, %path, error = %e, "request failed"))
    }
}

fn form(data: Option<Value>) -> Body {
    data.map(Body::Form).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use reqwest::StatusCode;
    use serde_json::json;

    use super::*;

    struct Scripted {
        seen: Mutex<Vec<ApiRequest>>,
    }

    #[async_trait]
    impl Transport for Scripted {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
            let path = request.path.clone();
            self.seen.lock().unwrap().push(request);
            if path == "/broken" {
                Err(ApiError::Server {
                    status: 503,
                    message: "maintenance".into(),
                })
            } else {
                Ok(ApiResponse::new(StatusCode::OK, "{}"))
            }
        }
    }

    fn scripted() -> Arc<Scripted> {
        Arc::new(Scripted {
            seen: Mutex::new(Vec::new()),
        })
    }

    #[tokio::test]
    async fn verbs_pick_method_and_encoding() {
        let transport = scripted();
        let client = ApiClient::from_transport(Arc::clone(&transport));

        client.get("/me", &[]).await.unwrap();
        client.post("/shifts", Some(json!({"a": 1}))).await.unwrap();
        client.put("/shifts/1", Some(json!({"a": 2}))).await.unwrap();
        client.patch("/shifts/1", None).await.unwrap();
        client.delete("/shifts/1").await.unwrap();

        let seen = transport.seen.lock().unwrap();
        let methods: Vec<_> = seen.iter().map(|r| r.method.clone()).collect();
        assert_eq!(
            methods,
            vec![Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE]
        );
        assert_eq!(seen[1].body, Body::Form(json!({"a": 1})));
        assert_eq!(seen[2].body, Body::Json(json!({"a": 2})));
        assert_eq!(seen[3].body, Body::Empty);
    }

    #[tokio::test]
    async fn failures_come_back_unchanged() {
        let client = ApiClient::from_transport(scripted());

        let err = client.get("/broken", &[]).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Server { status: 503, ref message } if message == "maintenance"
        ));
    }
}
