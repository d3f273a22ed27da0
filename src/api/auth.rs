use serde::Deserialize;

use super::payload;
use crate::{
    endpoints::Endpoint,
    error::ApiError,
    http::{ApiClient, ApiResponse},
    session::Session,
    types::{Credentials, PasswordChange, User},
};

/// Token and profile returned by `POST /login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginOutcome {
    #[serde(alias = "access_token")]
    pub token: String,
    pub user: User,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MeBody {
    Wrapped { user: User },
    Bare(User),
}

#[derive(Clone)]
pub struct AuthApi {
    client: ApiClient,
    session: Session,
}

impl AuthApi {
    pub fn new(client: ApiClient, session: Session) -> Self {
        Self { client, session }
    }

    /// Signs in and stores the returned token and profile.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome, ApiError> {
        // a sign-in replaces the stored session, so an unreadable one must not block it
        if let Err(ApiError::Decode(e)) = self.session.token().await {
            tracing::warn!(error = %e, "resetting unreadable session before login");
            self.session.clear().await?;
        }

        let response = self
            .client
            .post(Endpoint::Login.path(), Some(payload(credentials)?))
            .await?;
        let outcome: LoginOutcome = response.json()?;

        self.session.start(&outcome.token, &outcome.user).await?;
        tracing::debug!(user = outcome.user.id, role = %outcome.user.role, "session started");
        Ok(outcome)
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<ApiResponse, ApiError> {
        self.client
            .post(Endpoint::ChangePassword.path(), Some(payload(change)?))
            .await
    }

    /// Signs out. The local session is dropped even if the server call fails.
    pub async fn logout(&self) -> Result<ApiResponse, ApiError> {
        let result = self.client.post(Endpoint::Logout.path(), None).await;
        self.session.clear().await?;
        result
    }

    /// Fetches the signed-in user and refreshes the cached profile.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        let response = self.client.get(Endpoint::CurrentUser.path(), &[]).await?;
        let user = match response.json::<MeBody>()? {
            MeBody::Wrapped { user } | MeBody::Bare(user) => user,
        };

        self.session.cache_user(&user).await?;
        Ok(user)
    }
}
