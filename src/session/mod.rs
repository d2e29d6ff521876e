pub mod sqlite;

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::ApiError;

pub use sqlite::SqliteSessionStore;

/// Well-known storage key the bearer token lives under.
pub const TOKEN_KEY: &str = "auth_token";

/// Owner of the persisted bearer token. At most one token exists at a time;
/// `set` replaces it wholesale and `clear` is idempotent.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self) -> Result<Option<String>, ApiError>;
    async fn set(&self, token: &str) -> Result<(), ApiError>;
    async fn clear(&self) -> Result<(), ApiError>;
}

/// Process-local store. Loses the token on restart.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        // a poisoned lock still holds a valid Option
        self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self) -> Result<Option<String>, ApiError> {
        Ok(self.slot().clone())
    }

    async fn set(&self, token: &str) -> Result<(), ApiError> {
        *self.slot() = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), ApiError> {
        self.slot().take();
        Ok(())
    }
}
