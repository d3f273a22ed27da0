use tabled::Table;

use crate::{
    cli::Context,
    error, info,
    navigation::{items_for, role_title},
    types::NavTableRow,
    warning,
};

/// Lists the destinations the signed-in user's role can reach.
pub async fn menu() {
    let ctx = Context::for_view("/menu");
    let user = match ctx.session.user().await {
        Ok(user) => user,
        Err(e) => error!("Cannot read session. Err: {}", e),
    };

    let Some(user) = user else {
        warning!("Non connecté. Lancez `rhcli login`.");
        return;
    };

    info!("{} - {}", user.display_name(), role_title(user.role));
    let rows: Vec<NavTableRow> = items_for(Some(&user))
        .into_iter()
        .map(|item| NavTableRow {
            label: item.label.to_string(),
            command: format!("rhcli {}", item.command),
        })
        .collect();

    println!("{}", Table::new(rows));
}
