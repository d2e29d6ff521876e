use std::env;

use reqwest::Url;

use crate::error::ApiError;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_SESSION_DB: &str = "sqlite://timetable-session.db";

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_base_url: Url,
    pub session_db_url: String,
}

impl ClientConfig {
    pub fn new(api_base_url: &str, session_db_url: impl Into<String>) -> Result<Self, ApiError> {
        let trimmed = api_base_url.trim().trim_end_matches('/');
        let api_base_url = Url::parse(trimmed)
            .map_err(|e| ApiError::Config(format!("Invalid TIMETABLE_API_URL {:?}: {}", trimmed, e)))?;
        if api_base_url.cannot_be_a_base() {
            return Err(ApiError::Config(format!(
                "TIMETABLE_API_URL must be an http(s) base url, got {:?}",
                trimmed
            )));
        }

        Ok(Self {
            api_base_url,
            session_db_url: session_db_url.into(),
        })
    }

    /// Reads `.env` (if any) and then the process environment.
    pub fn new_from_env() -> Result<Self, ApiError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApiError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("TIMETABLE_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let session_db = lookup("TIMETABLE_SESSION_DB")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SESSION_DB.to_string());

        Self::new(&api_url, session_db)
    }
}
