//! Client-side session state.
//!
//! The session is the bearer token plus a cached copy of the signed-in user's
//! profile. Both live in a [`SessionStore`] under fixed keys. The token is the
//! only thing that proves authentication; the cached profile is used for
//! navigation filtering and is never trusted for anything else.
//!
//! A [`Session`] is an explicit handle passed to the HTTP layer at
//! construction. Nothing in the crate reads session state from a global.

mod store;

use std::sync::Arc;

pub use store::{FileSessionStore, MemorySessionStore, SessionStore};

use crate::{error::ApiError, types::User};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    pub async fn token(&self) -> Result<Option<String>, ApiError> {
        Ok(self
            .store
            .get(TOKEN_KEY)
            .await?
            .filter(|t| !t.is_empty()))
    }

    pub async fn is_authenticated(&self) -> Result<bool, ApiError> {
        Ok(self.token().await?.is_some())
    }

    /// Returns the cached profile. An unreadable profile is treated as absent.
    pub async fn user(&self) -> Result<Option<User>, ApiError> {
        let Some(raw) = self.store.get(USER_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable cached user profile");
                Ok(None)
            }
        }
    }

    /// Records a successful login.
    pub async fn start(&self, token: &str, user: &User) -> Result<(), ApiError> {
        self.store.set(TOKEN_KEY, token).await?;
        self.cache_user(user).await
    }

    pub async fn cache_user(&self, user: &User) -> Result<(), ApiError> {
        let json = serde_json::to_string(user)?;
        self.store.set(USER_KEY, &json).await
    }

    /// Removes both the token and the cached profile.
    pub async fn clear(&self) -> Result<(), ApiError> {
        self.store.remove(TOKEN_KEY).await?;
        self.store.remove(USER_KEY).await
    }
}
