//! Commands for admin, HR and manager roles.
//!
//! Responses are shown as pretty-printed JSON: these screens mostly relay
//! server-side reports whose shape the client does not interpret.

use crate::{
    api::ManagerApi,
    cli::Context,
    error::ApiError,
    http::ApiResponse,
    info, success,
    types::SummaryFilter,
    utils::{self, Field},
};

fn manager(view: &str) -> ManagerApi {
    Context::for_view(view).manager()
}

fn show(result: Result<ApiResponse, ApiError>, failure: &str) {
    match result {
        Ok(response) => utils::print_json(&response),
        Err(e) => crate::error!("{}: {}", failure, e),
    }
}

fn done(result: Result<ApiResponse, ApiError>, message: &str, failure: &str) {
    match result {
        Ok(_) => success!("{}", message),
        Err(e) => crate::error!("{}", e.form_message(&[], failure)),
    }
}

pub async fn departments(id: Option<u64>) {
    let api = manager("/departments");
    let result = match id {
        Some(id) => api.department(id).await,
        None => api.departments().await,
    };
    show(result, "Impossible de charger les départements");
}

pub async fn update_department(id: u64, fields: Vec<Field>) {
    let data = utils::fields_to_value(&fields);
    let result = manager("/departments").update_department(id, &data).await;
    done(result, "Département mis à jour.", "Échec de la mise à jour");
}

pub async fn delete_department(id: u64, yes: bool) {
    if !yes && !utils::confirm(&format!("Supprimer le département #{id} ?")) {
        info!("Suppression annulée.");
        return;
    }
    let result = manager("/departments").delete_department(id).await;
    done(result, "Département supprimé.", "Échec de la suppression");
}

pub async fn employees(page: u32, per_page: u32) {
    let result = manager("/employees").employees(page, per_page).await;
    show(result, "Impossible de charger le personnel");
}

pub async fn add_employee(fields: Vec<Field>) {
    let data = utils::fields_to_value(&fields);
    let result = manager("/employees").add_employee(&data).await;
    done(result, "Employé ajouté.", "Échec de l'ajout");
}

pub async fn permissions() {
    let result = manager("/permission").permissions().await;
    show(result, "Impossible de charger les permissions");
}

pub async fn approve_permission(id: u64) {
    let result = manager("/permission").approve_permission(id).await;
    done(result, "Permission approuvée.", "Échec de l'approbation");
}

pub async fn reject_permission(id: u64) {
    let result = manager("/permission").reject_permission(id).await;
    done(result, "Permission rejetée.", "Échec du rejet");
}

pub async fn leaves(page: u32, per_page: u32) {
    let result = manager("/leaves").requested_leaves(page, per_page).await;
    show(result, "Impossible de charger les congés");
}

pub async fn approve_leave(id: u64) {
    let result = manager("/leaves").approve_leave(id).await;
    done(result, "Congé approuvé.", "Échec de l'approbation");
}

pub async fn reject_leave(id: u64) {
    let result = manager("/leaves").reject_leave(id).await;
    done(result, "Congé rejeté.", "Échec du rejet");
}

pub async fn attendance_summary(filter: SummaryFilter) {
    let result = manager("/attendance").attendance_summary(&filter).await;
    show(result, "Impossible de charger les présences");
}

pub async fn fill_attendances(fields: Vec<Field>) {
    let data = utils::fields_to_value(&fields);
    let pb = utils::spinner("Remplissage des présences...");
    let result = manager("/attendance").fill_attendances(&data).await;
    pb.finish_and_clear();
    done(result, "Présences remplies.", "Échec du remplissage");
}

pub async fn day_offs() {
    let result = manager("/days_off").day_offs().await;
    show(result, "Impossible de charger les jours de repos");
}

pub async fn day_off_candidates() {
    let result = manager("/days_off").employees_for_day_off().await;
    show(result, "Impossible de charger le personnel");
}

pub async fn add_day_off(fields: Vec<Field>) {
    let data = utils::fields_to_value(&fields);
    let result = manager("/days_off").add_day_off(&data).await;
    done(result, "Jour de repos ajouté.", "Échec de l'ajout");
}

pub async fn delete_day_off(id: u64, yes: bool) {
    if !yes && !utils::confirm(&format!("Supprimer le jour de repos #{id} ?")) {
        info!("Suppression annulée.");
        return;
    }
    let result = manager("/days_off").delete_day_off(id).await;
    done(result, "Jour de repos supprimé.", "Échec de la suppression");
}

pub async fn monthly_stats(month: Option<String>) {
    let result = manager("/reports").monthly_stats(month.as_deref()).await;
    show(result, "Impossible de charger les statistiques");
}

pub async fn monthly_summary(month: Option<String>) {
    let result = manager("/reports")
        .monthly_attendance_summary(month.as_deref())
        .await;
    show(result, "Impossible de charger le récapitulatif");
}

pub async fn today() {
    let result = manager("/manager-dashboard").today_situation().await;
    show(result, "Impossible de charger la situation du jour");
}
