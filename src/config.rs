//! Configuration management for rhcli.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Variables already present in the
//! environment are never overwritten by the file.
//!
//! | Variable              | Required | Meaning                                   |
//! |-----------------------|----------|-------------------------------------------|
//! | `RH_API_BASE_URL`     | yes      | Base URL of the HR REST API               |
//! | `RH_STORAGE_BASE_URL` | no       | Base URL for uploaded files (avatars...)  |
//! | `RH_SESSION_FILE`     | no       | Where the session token and user live     |

use std::{env, path::PathBuf};

use reqwest::Url;

use crate::error::ApiError;

const APP_DIR: &str = "rhcli";

/// Loads environment variables from `<local data dir>/rhcli/.env`.
///
/// Creates the directory if needed. A missing `.env` file is not an error,
/// since every value can also be supplied through the real environment.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file exists
/// but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = app_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Returns the API base URL from `RH_API_BASE_URL`.
///
/// A trailing slash is appended when missing so relative joins keep the
/// configured path prefix (`https://host/api` + `shifts` -> `/api/shifts`).
pub fn api_base_url() -> Result<Url, ApiError> {
    let raw = env::var("RH_API_BASE_URL")
        .map_err(|_| ApiError::Config("RH_API_BASE_URL must be set".into()))?;
    parse_base_url(&raw)
}

/// Returns the storage base URL from `RH_STORAGE_BASE_URL`, if configured.
pub fn storage_base_url() -> Option<String> {
    env::var("RH_STORAGE_BASE_URL")
        .ok()
        .filter(|v| !v.trim().is_empty())
}

/// Resolves a stored file path (an avatar, say) against the storage base URL.
/// Absolute URLs pass through unchanged.
pub fn storage_url(base: Option<&str>, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    match base {
        Some(base) => format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        ),
        None => path.to_string(),
    }
}

/// Returns the session file path, `RH_SESSION_FILE` or the data dir default.
pub fn session_path() -> PathBuf {
    match env::var("RH_SESSION_FILE") {
        Ok(p) if !p.trim().is_empty() => PathBuf::from(p),
        _ => app_dir().join("session.json"),
    }
}

pub fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Url::parse(&normalized).map_err(|e| ApiError::Config(format!("invalid base url {raw}: {e}")))
}

fn app_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let url = parse_base_url("http://127.0.0.1:8000/api").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/");
        assert_eq!(url.join("shifts").unwrap().path(), "/api/shifts");
    }

    #[test]
    fn storage_paths_join_the_base() {
        assert_eq!(
            storage_url(Some("http://h/storage/"), "/avatars/a.png"),
            "http://h/storage/avatars/a.png"
        );
        assert_eq!(storage_url(None, "avatars/a.png"), "avatars/a.png");
        assert_eq!(
            storage_url(Some("http://h/storage"), "https://cdn/a.png"),
            "https://cdn/a.png"
        );
    }

    #[test]
    fn invalid_base_url_is_config_error() {
        assert!(matches!(
            parse_base_url("not a url"),
            Err(ApiError::Config(_))
        ));
    }
}
