//! Endpoint registry and query-string helpers.
//!
//! Only the shared endpoints are registered here; role façades build the
//! rest of their paths inline.

use crate::types::SummaryFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    ChangePassword,
    Logout,
    CurrentUser,
    Departments,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Login => "/login",
            Endpoint::ChangePassword => "/update-password",
            Endpoint::Logout => "/logout",
            Endpoint::CurrentUser => "/me",
            Endpoint::Departments => "/departments",
        }
    }

    /// Path of a single item below a collection endpoint.
    pub fn item(&self, id: u64) -> String {
        format!("{}/{id}", self.path())
    }
}

/// Renders attendance filters as `?period=..&date=..&page=..&per_page=..&`.
///
/// Each present filter is followed by `&`, in that fixed order, so the
/// result keeps a trailing separator; the API accepts it. Empty strings and
/// zero page values count as absent. With no filters the result is a bare
/// `?`.
pub fn summary_query(filter: &SummaryFilter) -> String {
    let mut query = String::from("?");

    if let Some(period) = filter.period.as_deref().filter(|p| !p.is_empty()) {
        query.push_str(&format!("period={period}&"));
    }
    if let Some(date) = filter.date.as_deref().filter(|d| !d.is_empty()) {
        query.push_str(&format!("date={date}&"));
    }
    if let Some(page) = filter.page.filter(|p| *p > 0) {
        query.push_str(&format!("page={page}&"));
    }
    if let Some(per_page) = filter.per_page.filter(|p| *p > 0) {
        query.push_str(&format!("per_page={per_page}&"));
    }

    query
}

/// `?month=<month>` when a month is given, nothing otherwise.
pub fn month_query(month: Option<&str>) -> String {
    match month.filter(|m| !m.is_empty()) {
        Some(m) => format!("?month={m}"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_paths() {
        assert_eq!(Endpoint::Login.path(), "/login");
        assert_eq!(Endpoint::ChangePassword.path(), "/update-password");
        assert_eq!(Endpoint::CurrentUser.path(), "/me");
        assert_eq!(Endpoint::Departments.item(4), "/departments/4");
    }

    #[test]
    fn summary_query_keeps_order_and_skips_missing() {
        let filter = SummaryFilter {
            period: Some("monthly".into()),
            page: Some(2),
            ..Default::default()
        };
        assert_eq!(summary_query(&filter), "?period=monthly&page=2&");
    }

    #[test]
    fn summary_query_with_every_filter() {
        let filter = SummaryFilter {
            period: Some("daily".into()),
            date: Some("2025-03-01".into()),
            page: Some(1),
            per_page: Some(20),
        };
        assert_eq!(
            summary_query(&filter),
            "?period=daily&date=2025-03-01&page=1&per_page=20&"
        );
    }

    #[test]
    fn summary_query_treats_empty_and_zero_as_absent() {
        let filter = SummaryFilter {
            period: Some(String::new()),
            page: Some(0),
            ..Default::default()
        };
        assert_eq!(summary_query(&filter), "?");
    }

    #[test]
    fn month_query_only_when_present() {
        assert_eq!(month_query(Some("2025-02")), "?month=2025-02");
        assert_eq!(month_query(None), "");
        assert_eq!(month_query(Some("")), "");
    }
}
