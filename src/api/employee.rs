use serde::Serialize;

use super::payload;
use crate::{
    endpoints::{month_query, summary_query},
    error::ApiError,
    http::{ApiClient, ApiResponse},
    types::SummaryFilter,
};

/// Self-service operations of the signed-in employee.
#[derive(Clone)]
pub struct EmployeeApi {
    client: ApiClient,
}

impl EmployeeApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// The signed-in employee's attendance summary (`GET /attendances/my-summary`).
    ///
    /// # Arguments
    ///
    /// * `filter` - Period, date and paging; absent values are left out of the query
    pub async fn my_attendance_summary(
        &self,
        filter: &SummaryFilter,
    ) -> Result<ApiResponse, ApiError> {
        self.client
            .get(&format!("/attendances/my-summary{}", summary_query(filter)), &[])
            .await
    }

    /// Submits a leave request (`POST /request-leaves`, multipart form).
    ///
    /// # Returns
    ///
    /// - `Ok(ApiResponse)` - The request was recorded
    /// - `Err(ApiError::Validation)` - Field errors to show next to the form
    pub async fn request_leave<B: Serialize + ?Sized>(
        &self,
        data: &B,
    ) -> Result<ApiResponse, ApiError> {
        self.client.post("/request-leaves", Some(payload(data)?)).await
    }

    /// The employee's own leaves.
    pub async fn my_leaves(&self) -> Result<ApiResponse, ApiError> {
        self.client.get("/leaves/me", &[]).await
    }

    /// Submits a permission request (`POST /permissions`).
    pub async fn request_permission<B: Serialize + ?Sized>(
        &self,
        data: &B,
    ) -> Result<ApiResponse, ApiError> {
        self.client.post("/permissions", Some(payload(data)?)).await
    }

    /// The employee's own permissions, optionally for one `YYYY-MM` month.
    pub async fn my_permissions(&self, month: Option<&str>) -> Result<ApiResponse, ApiError> {
        self.client
            .get(&format!("/my-permissions{}", month_query(month)), &[])
            .await
    }
}
