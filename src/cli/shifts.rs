use tabled::Table;

use crate::{
    cli::Context,
    error, info,
    shifts::{
        DELETE_FAILED, LOAD_FAILED, SAVE_FAILED, ShiftBoard, ShiftDraft, format_time, kind_label,
    },
    success,
    types::{Shift, ShiftKind, ShiftTableRow},
    utils, warning,
};

const VIEW: &str = "/shift";

fn board() -> ShiftBoard {
    ShiftBoard::new(Context::for_view(VIEW).manager())
}

fn print_shifts(shifts: Vec<Shift>) {
    if shifts.is_empty() {
        info!("Aucun horaire défini.");
        return;
    }

    let rows: Vec<ShiftTableRow> = shifts
        .into_iter()
        .map(|s| ShiftTableRow {
            id: s.id,
            name: s.name,
            kind: kind_label(s.kind).to_string(),
            start: format_time(&s.start_time),
            end: format_time(&s.end_time),
        })
        .collect();
    println!("{}", Table::new(rows));
}

fn flag_reversed(draft: &ShiftDraft) {
    if draft.ends_before_start() {
        warning!(
            "L'heure de fin ({}) n'est pas après l'heure de début ({}).",
            draft.end_time,
            draft.start_time
        );
    }
}

pub async fn list_shifts() {
    let board = board();
    let pb = utils::spinner("Chargement des horaires...");
    let result = board.load().await;
    pb.finish_and_clear();

    match result {
        Ok(shifts) => print_shifts(shifts),
        Err(e) => error!("{}", e.form_message(LOAD_FAILED)),
    }
}

pub async fn add_shift(start: String, end: String, kind: ShiftKind) {
    let board = board();
    let draft = ShiftDraft::new(start, end, kind);
    flag_reversed(&draft);

    match board.save(&draft, None).await {
        Ok(payload) => {
            success!("Horaire \"{}\" ajouté avec succès !", payload.name);
            print_shifts(board.shifts().await);
        }
        Err(e) => error!("{}", e.form_message(SAVE_FAILED)),
    }
}

/// Edits a shift; omitted values keep the current ones.
pub async fn edit_shift(
    id: u64,
    start: Option<String>,
    end: Option<String>,
    kind: Option<ShiftKind>,
) {
    let board = board();
    let current = match board.load().await {
        Ok(shifts) => shifts.into_iter().find(|s| s.id == id),
        Err(e) => error!("{}", e.form_message(LOAD_FAILED)),
    };
    let Some(current) = current else {
        error!("Horaire #{} introuvable.", id);
    };

    let mut draft = ShiftDraft::from_shift(&current);
    if let Some(start) = start {
        draft.start_time = start;
    }
    if let Some(end) = end {
        draft.end_time = end;
    }
    if let Some(kind) = kind {
        draft.kind = kind;
    }
    flag_reversed(&draft);

    match board.save(&draft, Some(id)).await {
        Ok(payload) => {
            success!("Horaire \"{}\" mis à jour avec succès !", payload.name);
            print_shifts(board.shifts().await);
        }
        Err(e) => error!("{}", e.form_message(SAVE_FAILED)),
    }
}

pub async fn delete_shift(id: u64, yes: bool) {
    let board = board();
    let shift = match board.load().await {
        Ok(shifts) => shifts.into_iter().find(|s| s.id == id),
        Err(e) => error!("{}", e.form_message(LOAD_FAILED)),
    };
    let name = shift.map(|s| s.name).unwrap_or_else(|| format!("#{id}"));

    if !yes && !utils::confirm(&format!("Supprimer l'horaire \"{name}\" ?")) {
        info!("Suppression annulée.");
        return;
    }

    match board.delete(id).await {
        Ok(()) => {
            success!("Horaire \"{}\" supprimé avec succès !", name);
            print_shifts(board.shifts().await);
        }
        Err(e) => error!("{}", e.form_message(DELETE_FAILED)),
    }
}
