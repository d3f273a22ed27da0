//! Work shift management.
//!
//! Shift names and labels are derived from the start and end times, never
//! typed by the user. [`ShiftBoard`] keeps the last fetched list and
//! re-fetches it after every successful change.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveTime;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::{
    api::ManagerApi,
    error::ApiError,
    http::ApiResponse,
    types::{Shift, ShiftKind, ShiftPayload},
};

pub const SAVE_FAILED: &str = "Erreur lors de la sauvegarde de l'horaire";
pub const DELETE_FAILED: &str = "Erreur lors de la suppression";
pub const LOAD_FAILED: &str = "Erreur lors du chargement des horaires";

/// Fields the server may reject on a shift form, in display priority.
const FORM_FIELDS: [&str; 2] = ["start_time", "end_time"];

#[derive(Debug, thiserror::Error)]
pub enum ShiftError {
    #[error("Veuillez sélectionner une heure de début et une heure de fin")]
    MissingTimes,

    #[error("another shift operation is still in progress")]
    Busy,

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ShiftError {
    /// Message for the shift form, preferring server field errors.
    pub fn form_message(&self, fallback: &str) -> String {
        match self {
            ShiftError::Api(e) => e.form_message(&FORM_FIELDS, fallback),
            other => other.to_string(),
        }
    }
}

/// `"09:00"`, `"17:30"` -> `"09H00 - 17H30"`.
pub fn generate_name(start: &str, end: &str) -> String {
    let start_h = format_time(start).replacen(':', "H", 1);
    let end_h = format_time(end).replacen(':', "H", 1);
    format!("{start_h} - {end_h}")
}

/// Trims a stored `HH:MM:SS` down to `HH:MM`.
pub fn format_time(time: &str) -> String {
    time.get(..5).unwrap_or(time).to_string()
}

pub fn kind_label(kind: ShiftKind) -> &'static str {
    match kind {
        ShiftKind::Morning => "Matin",
        ShiftKind::Evening => "Soir",
    }
}

/// What the user filled in on the shift form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShiftDraft {
    pub start_time: String,
    pub end_time: String,
    pub kind: ShiftKind,
}

impl ShiftDraft {
    pub fn new(start_time: impl Into<String>, end_time: impl Into<String>, kind: ShiftKind) -> Self {
        Self {
            start_time: start_time.into(),
            end_time: end_time.into(),
            kind,
        }
    }

    /// Prefill for editing an existing shift.
    pub fn from_shift(shift: &Shift) -> Self {
        Self::new(
            format_time(&shift.start_time),
            format_time(&shift.end_time),
            shift.kind,
        )
    }

    /// True when both times parse and the end is not after the start.
    ///
    /// Such shifts are accepted (overnight shifts may be intended); callers
    /// only flag them.
    pub fn ends_before_start(&self) -> bool {
        let parse = |t: &str| NaiveTime::parse_from_str(&format_time(t), "%H:%M").ok();
        match (parse(&self.start_time), parse(&self.end_time)) {
            (Some(start), Some(end)) => end <= start,
            _ => false,
        }
    }

    pub fn payload(&self) -> Result<ShiftPayload, ShiftError> {
        let start = self.start_time.trim();
        let end = self.end_time.trim();
        if start.is_empty() || end.is_empty() {
            return Err(ShiftError::MissingTimes);
        }

        Ok(ShiftPayload {
            name: generate_name(start, end),
            label: format!("Horaire {start} - {end}"),
            kind: self.kind,
            start_time: start.to_string(),
            end_time: end.to_string(),
        })
    }
}

/// Extracts the list from `{"success": true, "shifts": [...]}`.
fn shifts_from(response: &ApiResponse) -> Result<Option<Vec<Shift>>, ApiError> {
    let body = response.value();
    if body["success"] != Value::Bool(true) || !body["shifts"].is_array() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_value(body["shifts"].clone())?))
}

/// Current shift list plus the operations that change it.
///
/// Save and delete are guarded by an in-flight flag: a second call while one
/// is pending fails with [`ShiftError::Busy`] instead of being sent.
pub struct ShiftBoard {
    api: ManagerApi,
    shifts: RwLock<Vec<Shift>>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when dropped.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ShiftBoard {
    pub fn new(api: ManagerApi) -> Self {
        Self {
            api,
            shifts: RwLock::new(Vec::new()),
            in_flight: AtomicBool::new(false),
        }
    }

    pub async fn shifts(&self) -> Vec<Shift> {
        self.shifts.read().await.clone()
    }

    /// Initial fetch. An unexpected body leaves the board empty.
    pub async fn load(&self) -> Result<Vec<Shift>, ShiftError> {
        let response = self.api.shifts().await?;
        let shifts = shifts_from(&response)?.unwrap_or_default();
        *self.shifts.write().await = shifts.clone();
        Ok(shifts)
    }

    /// Creates a shift, or updates `editing` when given, then refreshes.
    pub async fn save(
        &self,
        draft: &ShiftDraft,
        editing: Option<u64>,
    ) -> Result<ShiftPayload, ShiftError> {
        let payload = draft.payload()?;
        let _guard = self.begin()?;

        match editing {
            Some(id) => self.api.update_shift(id, &payload).await?,
            None => self.api.create_shift(&payload).await?,
        };
        tracing::debug!(name = %payload.name, ?editing, "shift saved");

        self.refresh().await?;
        Ok(payload)
    }

    /// Deletes a confirmed shift, then refreshes.
    pub async fn delete(&self, id: u64) -> Result<(), ShiftError> {
        let _guard = self.begin()?;

        self.api.delete_shift(id).await?;
        tracing::debug!(id, "shift deleted");

        self.refresh().await?;
        Ok(())
    }

    fn begin(&self) -> Result<InFlight<'_>, ShiftError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map(|_| InFlight(&self.in_flight))
            .map_err(|_| ShiftError::Busy)
    }

    /// Replaces the list only when the server answers with one.
    async fn refresh(&self) -> Result<(), ApiError> {
        let response = self.api.shifts().await?;
        if let Some(shifts) = shifts_from(&response)? {
            *self.shifts.write().await = shifts;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_from_times() {
        assert_eq!(generate_name("09:00", "17:30"), "09H00 - 17H30");
        assert_eq!(generate_name("08:00:00", "16:00:00"), "08H00 - 16H00");
    }

    #[test]
    fn time_display_drops_seconds() {
        assert_eq!(format_time("08:00:00"), "08:00");
        assert_eq!(format_time("7:5"), "7:5");
    }

    #[test]
    fn kind_labels() {
        assert_eq!(kind_label(ShiftKind::Morning), "Matin");
        assert_eq!(kind_label(ShiftKind::Evening), "Soir");
    }

    #[test]
    fn payload_requires_both_times() {
        let draft = ShiftDraft::new("09:00", "", ShiftKind::Morning);
        assert!(matches!(draft.payload(), Err(ShiftError::MissingTimes)));
    }

    #[test]
    fn payload_derives_name_and_label() {
        let payload = ShiftDraft::new("09:00", "17:30", ShiftKind::Evening)
            .payload()
            .unwrap();
        assert_eq!(payload.name, "09H00 - 17H30");
        assert_eq!(payload.label, "Horaire 09:00 - 17:30");
        assert_eq!(payload.kind, ShiftKind::Evening);
    }

    #[test]
    fn reversed_times_are_flagged_not_rejected() {
        let draft = ShiftDraft::new("22:00", "06:00", ShiftKind::Evening);
        assert!(draft.ends_before_start());
        assert!(draft.payload().is_ok());
        assert!(!ShiftDraft::new("06:00", "14:00", ShiftKind::Morning).ends_before_start());
    }

    #[test]
    fn edit_prefill_trims_seconds() {
        let shift = Shift {
            id: 2,
            name: "08H00 - 16H00".into(),
            label: "Horaire 08:00 - 16:00".into(),
            kind: ShiftKind::Morning,
            start_time: "08:00:00".into(),
            end_time: "16:00:00".into(),
            created_at: None,
            updated_at: None,
        };
        let draft = ShiftDraft::from_shift(&shift);
        assert_eq!(draft.start_time, "08:00");
        assert_eq!(draft.end_time, "16:00");
    }
}
