use std::fmt;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Rh,
    Manager,
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Rh => "rh",
            Role::Manager => "manager",
            Role::Employee => "employee",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile of the signed-in user, cached next to the session token.
///
/// The API sends `first_name` and `last_name`; some endpoints also send a
/// single `name`. Every name field is optional on the wire, use
/// [`User::display_name`] to show one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl User {
    /// `"First Last"`, falling back to `name`, then to `#id`.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if !full.is_empty() {
            return full.to_string();
        }
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("#{}", self.id),
        }
    }

    /// Initials shown in place of a missing avatar (`"AD"`).
    pub fn initials(&self) -> String {
        [&self.first_name, &self.last_name]
            .iter()
            .filter_map(|part| part.trim().chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordChange {
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftKind {
    #[default]
    Morning,
    Evening,
}

impl ShiftKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftKind::Morning => "morning",
            ShiftKind::Evening => "evening",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    pub id: u64,
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: ShiftKind,
    pub start_time: String,
    pub end_time: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Body sent when creating or updating a shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftPayload {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: ShiftKind,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Tabled)]
pub struct ShiftTableRow {
    pub id: u64,
    pub name: String,
    #[tabled(rename = "type")]
    pub kind: String,
    pub start: String,
    pub end: String,
}

#[derive(Tabled)]
pub struct NavTableRow {
    pub label: String,
    pub command: String,
}

/// Filters accepted by the attendance summary endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryFilter {
    pub period: Option<String>,
    pub date: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_deserializes_from_api_shape() {
        let json = r#"{
            "id": 3,
            "name": "08H00 - 16H00",
            "label": "Horaire 08:00 - 16:00",
            "type": "evening",
            "start_time": "08:00:00",
            "end_time": "16:00:00",
            "created_at": null,
            "updated_at": "2025-01-02T10:00:00Z"
        }"#;
        let shift: Shift = serde_json::from_str(json).unwrap();
        assert_eq!(shift.kind, ShiftKind::Evening);
        assert_eq!(shift.created_at, None);
    }

    #[test]
    fn payload_uses_type_key() {
        let payload = ShiftPayload {
            name: "n".into(),
            label: "l".into(),
            kind: ShiftKind::Morning,
            start_time: "09:00".into(),
            end_time: "17:00".into(),
        };
        let value = serde_json::to_value(payload).unwrap();
        assert_eq!(value["type"], "morning");
    }

    #[test]
    fn user_deserializes_from_split_names() {
        let user: User = serde_json::from_str(
            r#"{"id": 1, "first_name": "Awa", "last_name": "Diallo", "role": "rh", "avatar": null}"#,
        )
        .unwrap();
        assert_eq!(user.display_name(), "Awa Diallo");
        assert_eq!(user.initials(), "AD");
        assert_eq!(user.name, None);
    }

    #[test]
    fn display_name_falls_back() {
        let user: User =
            serde_json::from_str(r#"{"id": 9, "name": "Moussa Traoré", "role": "manager"}"#)
                .unwrap();
        assert_eq!(user.display_name(), "Moussa Traoré");
        assert_eq!(user.initials(), "");

        let anonymous: User = serde_json::from_str(r#"{"id": 4, "role": "employee"}"#).unwrap();
        assert_eq!(anonymous.display_name(), "#4");
    }

    #[test]
    fn role_round_trips_lowercase() {
        let role: Role = serde_json::from_str("\"rh\"").unwrap();
        assert_eq!(role, Role::Rh);
        assert_eq!(role.to_string(), "rh");
    }
}
