use crate::{
    cli::Context,
    config, error, info,
    http::LOGIN_VIEW,
    navigation::role_title,
    success,
    types::{Credentials, PasswordChange},
    utils, warning,
};

pub async fn login(login: String, password: Option<String>) {
    let password = match password {
        Some(p) => p,
        None => match utils::prompt_line("Mot de passe") {
            Ok(p) => p,
            Err(e) => error!("Cannot read password. Err: {}", e),
        },
    };

    let ctx = Context::for_view(LOGIN_VIEW);
    let pb = utils::spinner("Connexion...");
    let result = ctx.auth().login(&Credentials { login, password }).await;
    pb.finish_and_clear();

    match result {
        Ok(outcome) => success!(
            "Bienvenue {} ({})",
            outcome.user.display_name(),
            role_title(outcome.user.role)
        ),
        Err(e) => error!("Login failed. Err: {}", e),
    }
}

pub async fn logout() {
    let ctx = Context::for_view("/logout");
    let result = ctx.auth().logout().await;
    let cleared = matches!(ctx.session.is_authenticated().await, Ok(false));

    match (result, cleared) {
        (Ok(_), _) => success!("Déconnecté."),
        (Err(e), true) => {
            warning!("Server logout failed, local session removed anyway. Err: {}", e)
        }
        (Err(e), false) => error!(
            "Logout failed and the local session could not be removed ({}). Err: {}",
            config::session_path().display(),
            e
        ),
    }
}

pub async fn me() {
    let ctx = Context::for_view("/profile");
    match ctx.auth().current_user().await {
        Ok(user) => {
            let initials = user.initials();
            info!("{} (#{})", user.display_name(), user.id);
            info!("Rôle: {}", role_title(user.role));
            if let Some(email) = user.email {
                info!("Email: {}", email);
            }
            if let Some(department) = user.department {
                info!("Département: {}", department);
            }
            match user.avatar {
                Some(avatar) => {
                    let base = config::storage_base_url();
                    info!("Avatar: {}", config::storage_url(base.as_deref(), &avatar));
                }
                None if !initials.is_empty() => info!("Avatar: {}", initials),
                None => {}
            }
        }
        Err(e) => error!("Cannot load profile. Err: {}", e),
    }
}

pub async fn change_password(password: String) {
    let ctx = Context::for_view("/profile");
    match ctx.auth().change_password(&PasswordChange { password }).await {
        Ok(_) => success!("Mot de passe mis à jour."),
        Err(e) => error!(
            "{}",
            e.form_message(&["password"], "Impossible de changer le mot de passe")
        ),
    }
}
