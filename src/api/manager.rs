use serde::Serialize;

use super::payload;
use crate::{
    endpoints::{Endpoint, month_query, summary_query},
    error::ApiError,
    http::{ApiClient, ApiResponse},
    types::{ShiftPayload, SummaryFilter},
};

/// Page size of the staff list.
pub const DEFAULT_EMPLOYEES_PER_PAGE: u32 = 6;
/// Page size of the leave requests list.
pub const DEFAULT_LEAVES_PER_PAGE: u32 = 5;

fn page_query(page: u32, per_page: u32) -> [(&'static str, String); 2] {
    [("page", page.to_string()), ("per_page", per_page.to_string())]
}

/// Operations available to admin, HR and manager roles.
#[derive(Clone)]
pub struct ManagerApi {
    client: ApiClient,
}

impl ManagerApi {
    /// Wraps a configured client; the session policy lives in the client stack.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    // departments

    /// Lists departments (`GET /departments`).
    pub async fn departments(&self) -> Result<ApiResponse, ApiError> {
        self.client.get(Endpoint::Departments.path(), &[]).await
    }

    /// Fetches one department (`GET /departments/{id}`).
    pub async fn department(&self, id: u64) -> Result<ApiResponse, ApiError> {
        self.client.get(&Endpoint::Departments.item(id), &[]).await
    }

    /// Updates a department with a JSON body (`PUT /departments/{id}`).
    ///
    /// # Arguments
    ///
    /// * `id` - Department id
    /// * `data` - Any serializable object; its fields are sent as is
    ///
    /// # Returns
    ///
    /// - `Ok(ApiResponse)` - The server's answer, usually the updated department
    /// - `Err(ApiError::Validation)` - The server rejected one or more fields
    /// - `Err(ApiError)` - Any other failure
    pub async fn update_department<B: Serialize + ?Sized>(
        &self,
        id: u64,
        data: &B,
    ) -> Result<ApiResponse, ApiError> {
        self.client
            .put(&Endpoint::Departments.item(id), Some(payload(data)?))
            .await
    }

    /// Deletes a department (`DELETE /departments/{id}`).
    pub async fn delete_department(&self, id: u64) -> Result<ApiResponse, ApiError> {
        self.client.delete(&Endpoint::Departments.item(id)).await
    }

    // staff

    /// Creates a staff member (`POST /users`, multipart form).
    ///
    /// # Arguments
    ///
    /// * `data` - Serializable object; arrays are sent as repeated `key[]` fields
    pub async fn add_employee<B: Serialize + ?Sized>(
        &self,
        data: &B,
    ) -> Result<ApiResponse, ApiError> {
        self.client.post("/users", Some(payload(data)?)).await
    }

    /// Lists staff one page at a time (`GET /users?page=..&per_page=..`).
    ///
    /// # Arguments
    ///
    /// * `page` - 1-based page number
    /// * `per_page` - Page size, [`DEFAULT_EMPLOYEES_PER_PAGE`] on the staff screen
    pub async fn employees(&self, page: u32, per_page: u32) -> Result<ApiResponse, ApiError> {
        self.client.get("/users", &page_query(page, per_page)).await
    }

    // permissions

    /// Lists permission requests awaiting a decision.
    pub async fn permissions(&self) -> Result<ApiResponse, ApiError> {
        self.client.get("/permissions", &[]).await
    }

    /// Approves a permission request (`POST /permissions/{id}/approve`).
    pub async fn approve_permission(&self, id: u64) -> Result<ApiResponse, ApiError> {
        self.client
            .post(&format!("/permissions/{id}/approve"), None)
            .await
    }

    /// Rejects a permission request (`POST /permissions/{id}/reject`).
    pub async fn reject_permission(&self, id: u64) -> Result<ApiResponse, ApiError> {
        self.client
            .post(&format!("/permissions/{id}/reject"), None)
            .await
    }

    // leaves

    /// Lists leave requests one page at a time (`GET /leaves`).
    ///
    /// # Arguments
    ///
    /// * `page` - 1-based page number
    /// * `per_page` - Page size, [`DEFAULT_LEAVES_PER_PAGE`] on the leaves screen
    pub async fn requested_leaves(&self, page: u32, per_page: u32) -> Result<ApiResponse, ApiError> {
        self.client.get("/leaves", &page_query(page, per_page)).await
    }

    /// Approves a leave request.
    pub async fn approve_leave(&self, id: u64) -> Result<ApiResponse, ApiError> {
        self.client.post(&format!("/leaves/{id}/approve"), None).await
    }

    /// Rejects a leave request.
    pub async fn reject_leave(&self, id: u64) -> Result<ApiResponse, ApiError> {
        self.client.post(&format!("/leaves/{id}/reject"), None).await
    }

    // attendance

    /// Staff attendance summary (`GET /attendances/summary`).
    ///
    /// Filters are rendered by [`summary_query`]: only the present ones, in a
    /// fixed order, each followed by `&`.
    ///
    /// # Example
    ///
    /// ```
    /// let filter = SummaryFilter { period: Some("monthly".into()), page: Some(2), ..Default::default() };
    /// // GET /attendances/summary?period=monthly&page=2&
    /// let summary = manager.attendance_summary(&filter).await?;
    /// ```
    pub async fn attendance_summary(&self, filter: &SummaryFilter) -> Result<ApiResponse, ApiError> {
        self.client
            .get(&format!("/attendances/summary{}", summary_query(filter)), &[])
            .await
    }

    /// Asks the server to fill missing attendance records (`POST /attendances/auto-fill`).
    pub async fn fill_attendances<B: Serialize + ?Sized>(
        &self,
        data: &B,
    ) -> Result<ApiResponse, ApiError> {
        self.client
            .post("/attendances/auto-fill", Some(payload(data)?))
            .await
    }

    // weekly days off

    /// Staff who can be given a weekly day off.
    pub async fn employees_for_day_off(&self) -> Result<ApiResponse, ApiError> {
        self.client.get("/user-for-day-offs", &[]).await
    }

    /// Assigns a weekly day off (`POST /weekly-day-offs`).
    pub async fn add_day_off<B: Serialize + ?Sized>(
        &self,
        data: &B,
    ) -> Result<ApiResponse, ApiError> {
        self.client.post("/weekly-day-offs", Some(payload(data)?)).await
    }

    /// Lists the assigned weekly days off.
    pub async fn day_offs(&self) -> Result<ApiResponse, ApiError> {
        self.client.get("/weekly-day-offs", &[]).await
    }

    /// Removes a weekly day off (`DELETE /weekly-day-offs/{id}`).
    pub async fn delete_day_off(&self, id: u64) -> Result<ApiResponse, ApiError> {
        self.client.delete(&format!("/weekly-day-offs/{id}")).await
    }

    // statistics

    /// Monthly statistics (`GET /monthly-stats`).
    ///
    /// # Arguments
    ///
    /// * `month` - `YYYY-MM`; `None` or an empty string lets the server pick the
    ///   current month
    pub async fn monthly_stats(&self, month: Option<&str>) -> Result<ApiResponse, ApiError> {
        self.client
            .get(&format!("/monthly-stats{}", month_query(month)), &[])
            .await
    }

    /// Monthly attendance summary; `month` behaves as in [`monthly_stats`](Self::monthly_stats).
    pub async fn monthly_attendance_summary(
        &self,
        month: Option<&str>,
    ) -> Result<ApiResponse, ApiError> {
        self.client
            .get(
                &format!("/monthly-attendance-summary{}", month_query(month)),
                &[],
            )
            .await
    }

    /// Who is present, absent or on leave today (`GET /todaySituation`).
    pub async fn today_situation(&self) -> Result<ApiResponse, ApiError> {
        self.client.get("/todaySituation", &[]).await
    }

    // shifts

    /// Same listing as [`shifts`](Self::shifts), used by staff screens.
    pub async fn employee_shifts(&self) -> Result<ApiResponse, ApiError> {
        self.client.get("/shifts", &[]).await
    }

    /// Lists work shifts (`GET /shifts`).
    ///
    /// The body is `{"success": true, "shifts": [...]}`; [`ShiftBoard`](crate::shifts::ShiftBoard)
    /// decodes it.
    pub async fn shifts(&self) -> Result<ApiResponse, ApiError> {
        self.client.get("/shifts", &[]).await
    }

    /// Creates a shift (`POST /shifts`, multipart form).
    pub async fn create_shift(&self, shift: &ShiftPayload) -> Result<ApiResponse, ApiError> {
        self.client.post("/shifts", Some(payload(shift)?)).await
    }

    /// Updates a shift (`PUT /shifts/{id}`, JSON body).
    pub async fn update_shift(&self, id: u64, shift: &ShiftPayload) -> Result<ApiResponse, ApiError> {
        self.client
            .put(&format!("/shifts/{id}"), Some(payload(shift)?))
            .await
    }

    /// Deletes a shift (`DELETE /shifts/{id}`).
    pub async fn delete_shift(&self, id: u64) -> Result<ApiResponse, ApiError> {
        self.client.delete(&format!("/shifts/{id}")).await
    }
}
