//! Self-service commands for the signed-in employee.

use crate::{
    api::EmployeeApi,
    cli::Context,
    error, success,
    types::SummaryFilter,
    utils::{self, Field},
};

fn employee(view: &str) -> EmployeeApi {
    Context::for_view(view).employee()
}

pub async fn my_attendance(filter: SummaryFilter) {
    match employee("/employee-attendance")
        .my_attendance_summary(&filter)
        .await
    {
        Ok(response) => utils::print_json(&response),
        Err(e) => error!("Impossible de charger vos présences: {}", e),
    }
}

pub async fn request_leave(fields: Vec<Field>) {
    let data = utils::fields_to_value(&fields);
    match employee("/employee-leaves").request_leave(&data).await {
        Ok(_) => success!("Demande de congé envoyée."),
        Err(e) => error!("{}", e.form_message(&[], "Échec de la demande")),
    }
}

pub async fn my_leaves() {
    match employee("/employee-leaves").my_leaves().await {
        Ok(response) => utils::print_json(&response),
        Err(e) => error!("Impossible de charger vos congés: {}", e),
    }
}

pub async fn request_permission(fields: Vec<Field>) {
    let data = utils::fields_to_value(&fields);
    match employee("/employee-permissions")
        .request_permission(&data)
        .await
    {
        Ok(_) => success!("Demande de permission envoyée."),
        Err(e) => error!("{}", e.form_message(&[], "Échec de la demande")),
    }
}

pub async fn my_permissions(month: Option<String>) {
    match employee("/employee-permissions")
        .my_permissions(month.as_deref())
        .await
    {
        Ok(response) => utils::print_json(&response),
        Err(e) => error!("Impossible de charger vos permissions: {}", e),
    }
}
