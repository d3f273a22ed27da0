//! # CLI Module
//!
//! Command implementations behind the `rhcli` binary. Each command builds a
//! [`Context`] (configured client over the on-disk session), calls one façade
//! operation and renders the result as a table or pretty-printed JSON.
//!
//! ## Command Categories
//!
//! - **Session**: [`login`], [`logout`], [`me`], [`change_password`], [`menu`]
//! - **Shifts**: [`list_shifts`], [`add_shift`], [`edit_shift`], [`delete_shift`]
//! - **Management**: departments, staff, permissions, leaves, attendance,
//!   weekly days off and statistics (see [`manager`])
//! - **Self-service**: the employee's own attendance, leaves and permission
//!   requests (see [`employee`])
//!
//! ## Session expiry
//!
//! The terminal has no login page to redirect to. When the API answers 401
//! the stored session is wiped and [`TerminalNavigator`] tells the user to
//! run `rhcli login` again.

mod auth;
pub mod employee;
pub mod manager;
mod menu;
mod shifts;

use std::sync::Arc;

pub use auth::{change_password, login, logout, me};
pub use menu::menu;
pub use shifts::{add_shift, delete_shift, edit_shift, list_shifts};

use crate::{
    api::{AuthApi, EmployeeApi, ManagerApi},
    config, error,
    http::{ApiClient, LOGIN_VIEW, Navigator},
    session::{FileSessionStore, Session},
    warning,
};

/// Reports session expiry on the terminal.
pub struct TerminalNavigator {
    view: String,
}

impl TerminalNavigator {
    pub fn new(view: impl Into<String>) -> Self {
        Self { view: view.into() }
    }
}

impl Navigator for TerminalNavigator {
    fn current_view(&self) -> String {
        self.view.clone()
    }

    fn navigate(&self, view: &str) {
        if view == LOGIN_VIEW {
            warning!("Session expirée ou invalide. Reconnectez-vous avec `rhcli login`.");
        }
    }
}

/// Everything a command needs to talk to the API.
pub struct Context {
    pub session: Session,
    pub client: ApiClient,
}

impl Context {
    /// Builds the context for a command running as `view`.
    ///
    /// Exits the program if the API base URL is missing or invalid.
    pub fn for_view(view: &str) -> Self {
        let base_url = match config::api_base_url() {
            Ok(url) => url,
            Err(e) => error!("{}. Add it to the environment or the rhcli .env file.", e),
        };

        let store = FileSessionStore::new(config::session_path());
        let session = Session::new(Arc::new(store));
        let navigator = Arc::new(TerminalNavigator::new(view));

        match ApiClient::new(base_url, session.clone(), navigator) {
            Ok(client) => Self { session, client },
            Err(e) => error!("Cannot build HTTP client. Err: {}", e),
        }
    }

    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.client.clone(), self.session.clone())
    }

    pub fn manager(&self) -> ManagerApi {
        ManagerApi::new(self.client.clone())
    }

    pub fn employee(&self) -> EmployeeApi {
        EmployeeApi::new(self.client.clone())
    }
}
