//! # Role-scoped API façades
//!
//! Each façade groups the remote operations one kind of user performs and
//! composes [`ApiClient`](crate::http::ApiClient) with the endpoint registry.
//! Calls are independent request/response exchanges; the only state a
//! façade touches is the session, and only [`AuthApi`] does that.
//!
//! - [`AuthApi`] - login, logout, password change, current user
//! - [`ManagerApi`] - departments, staff, permissions, leaves, attendance,
//!   weekly days off, statistics and shifts
//! - [`EmployeeApi`] - the signed-in employee's own attendance, leaves and
//!   permission requests

mod auth;
mod employee;
mod manager;

use serde::Serialize;
use serde_json::Value;

pub use auth::AuthApi;
pub use employee::EmployeeApi;
pub use manager::{DEFAULT_EMPLOYEES_PER_PAGE, DEFAULT_LEAVES_PER_PAGE, ManagerApi};

use crate::error::ApiError;

fn payload<B: Serialize + ?Sized>(data: &B) -> Result<Value, ApiError> {
    Ok(serde_json::to_value(data)?)
}
