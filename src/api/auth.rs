use serde_json::Value;
use tracing::info;

use crate::dispatcher::{ApiRequest, RequestDispatcher};
use crate::error::ApiError;
use crate::models::{Credentials, LoginResponse, RegisterRequest};

#[derive(Clone)]
pub struct AuthApi {
    dispatcher: RequestDispatcher,
}

impl AuthApi {
    pub fn new(dispatcher: RequestDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Exchanges credentials for a bearer token. On success the token
    /// replaces whatever the session store held; on failure the store is
    /// untouched.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let request = ApiRequest::post("/auth/login").with_body(credentials)?;
        let payload = self.dispatcher.login(request).await?;
        info!("logged in as {}", credentials.username);
        Ok(LoginResponse::from(payload))
    }

    pub async fn register(&self, registration: &RegisterRequest) -> Result<Value, ApiError> {
        let request = ApiRequest::post("/auth/register").with_body(registration)?;
        self.dispatcher.send(request).await
    }

    /// Drops the local session. No request is made and no logout event is
    /// published.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.dispatcher.session().clear().await?;
        info!("logged out");
        Ok(())
    }

    pub async fn is_authenticated(&self) -> Result<bool, ApiError> {
        Ok(self.dispatcher.session().get().await?.is_some())
    }
}
