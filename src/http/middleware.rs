use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderValue};

use super::{ApiRequest, ApiResponse, Transport};
use crate::{error::ApiError, session::Session};

/// View the host shows for signing in.
pub const LOGIN_VIEW: &str = "/login";

/// Host-side navigation hook.
///
/// The HTTP layer never navigates by itself. When a session ends it asks the
/// host where it currently is and, unless that is already the login view,
/// tells it to go there.
pub trait Navigator: Send + Sync {
    fn current_view(&self) -> String;
    fn navigate(&self, view: &str);
}

/// Navigator for hosts with no notion of views.
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn current_view(&self) -> String {
        LOGIN_VIEW.to_string()
    }

    fn navigate(&self, _view: &str) {}
}

/// Attaches `Authorization: Bearer <token>` when the session holds a token.
///
/// If the session cannot be read the request is not sent and the storage
/// error is returned instead.
pub struct BearerAuth<T> {
    inner: T,
    session: Session,
}

impl<T: Transport> BearerAuth<T> {
    pub fn new(inner: T, session: Session) -> Self {
        Self { inner, session }
    }
}

#[async_trait]
impl<T: Transport> Transport for BearerAuth<T> {
    async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        if let Some(token) = self.session.token().await? {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| ApiError::Request(format!("token is not a valid header: {e}")))?;
            request.headers.insert(AUTHORIZATION, value);
        }

        self.inner.send(request).await
    }
}

/// Turns failure statuses into [`ApiError`]s and applies the session policy.
///
/// - 401 clears the token and cached profile, then navigates to
///   [`LOGIN_VIEW`] unless the host is already there.
/// - 403, 404 and 5xx are logged.
///
/// The error is returned to the caller in every case.
pub struct ResponseGuard<T> {
    inner: T,
    session: Session,
    navigator: Arc<dyn Navigator>,
}

impl<T: Transport> ResponseGuard<T> {
    pub fn new(inner: T, session: Session, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            inner,
            session,
            navigator,
        }
    }

    async fn end_session(&self) {
        if let Err(e) = self.session.clear().await {
            tracing::warn!(error = %e, "failed to clear session after 401");
        }

        if self.navigator.current_view() != LOGIN_VIEW {
            self.navigator.navigate(LOGIN_VIEW);
        }
    }
}

#[async_trait]
impl<T: Transport> Transport for ResponseGuard<T> {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let path = request.path.clone();
        let response = self.inner.send(request).await?;
        let status = response.status;

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            401 => self.end_session().await,
            403 => tracing::error!(%path, "access denied: insufficient permissions"),
            404 => tracing::error!(%path, "resource not found"),
            s if s >= 500 => tracing::error!(%path, status = s, "server error"),
            _ => {}
        }

        Err(ApiError::from_status(status, &response.body))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use reqwest::{Method, StatusCode};

    use super::*;
    use crate::types::{Role, User};

    /// Records every request and answers with a fixed status.
    struct Recorder {
        status: StatusCode,
        seen: Mutex<Vec<ApiRequest>>,
    }

    impl Recorder {
        fn new(status: StatusCode) -> Arc<Self> {
            Arc::new(Self {
                status,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn last_auth(&self) -> Option<String> {
            let seen = self.seen.lock().unwrap();
            seen.last()
                .and_then(|r| r.headers.get(AUTHORIZATION))
                .map(|v| v.to_str().unwrap().to_string())
        }
    }

    #[async_trait]
    impl Transport for Recorder {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
            self.seen.lock().unwrap().push(request);
            Ok(ApiResponse::new(self.status, r#"{"message":"nope"}"#))
        }
    }

    struct RecordingNavigator {
        view: String,
        visits: Mutex<Vec<String>>,
    }

    impl RecordingNavigator {
        fn at(view: &str) -> Arc<Self> {
            Arc::new(Self {
                view: view.into(),
                visits: Mutex::new(Vec::new()),
            })
        }
    }

    impl Navigator for RecordingNavigator {
        fn current_view(&self) -> String {
            self.view.clone()
        }

        fn navigate(&self, view: &str) {
            self.visits.lock().unwrap().push(view.to_string());
        }
    }

    fn user() -> User {
        User {
            id: 1,
            first_name: "Moussa".into(),
            last_name: "Traoré".into(),
            name: None,
            email: None,
            role: Role::Manager,
            department: None,
            avatar: None,
        }
    }

    #[tokio::test]
    async fn bearer_header_carries_stored_token() {
        let session = Session::in_memory();
        session.start("secret-token", &user()).await.unwrap();
        let inner = Recorder::new(StatusCode::OK);
        let auth = BearerAuth::new(Arc::clone(&inner), session);

        auth.send(ApiRequest::new(Method::GET, "/me")).await.unwrap();
        assert_eq!(inner.last_auth().as_deref(), Some("Bearer secret-token"));
    }

    #[tokio::test]
    async fn no_token_means_no_header() {
        let inner = Recorder::new(StatusCode::OK);
        let auth = BearerAuth::new(Arc::clone(&inner), Session::in_memory());

        auth.send(ApiRequest::new(Method::GET, "/me")).await.unwrap();
        assert_eq!(inner.last_auth(), None);
    }

    #[tokio::test]
    async fn unauthorized_clears_session_and_navigates_once() {
        let session = Session::in_memory();
        session.start("expired", &user()).await.unwrap();
        let navigator = RecordingNavigator::at("/shift");
        let guard = ResponseGuard::new(
            Recorder::new(StatusCode::UNAUTHORIZED),
            session.clone(),
            navigator.clone(),
        );

        let err = guard
            .send(ApiRequest::new(Method::GET, "/shifts"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Unauthorized { .. }));
        assert_eq!(session.token().await.unwrap(), None);
        assert_eq!(session.user().await.unwrap(), None);
        assert_eq!(*navigator.visits.lock().unwrap(), vec![LOGIN_VIEW.to_string()]);
    }

    #[tokio::test]
    async fn unauthorized_on_login_view_does_not_navigate() {
        let session = Session::in_memory();
        session.start("expired", &user()).await.unwrap();
        let navigator = RecordingNavigator::at(LOGIN_VIEW);
        let guard = ResponseGuard::new(
            Recorder::new(StatusCode::UNAUTHORIZED),
            session.clone(),
            navigator.clone(),
        );

        let _ = guard.send(ApiRequest::new(Method::POST, "/login")).await;
        assert!(navigator.visits.lock().unwrap().is_empty());
        assert_eq!(session.token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn other_failures_keep_session() {
        for status in [
            StatusCode::FORBIDDEN,
            StatusCode::NOT_FOUND,
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::BAD_REQUEST,
        ] {
            let session = Session::in_memory();
            session.start("still-valid", &user()).await.unwrap();
            let navigator = RecordingNavigator::at("/leaves");
            let guard =
                ResponseGuard::new(Recorder::new(status), session.clone(), navigator.clone());

            let err = guard
                .send(ApiRequest::new(Method::GET, "/leaves"))
                .await
                .unwrap_err();

            assert_eq!(err.status(), Some(status.as_u16()));
            assert_eq!(session.token().await.unwrap().as_deref(), Some("still-valid"));
            assert!(navigator.visits.lock().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn success_passes_through() {
        let guard = ResponseGuard::new(
            Recorder::new(StatusCode::CREATED),
            Session::in_memory(),
            Arc::new(NoopNavigator),
        );
        let response = guard
            .send(ApiRequest::new(Method::POST, "/shifts"))
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::CREATED);
    }
}
