use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::models::auth::credential;
use crate::session::SessionStore;
use crate::signal::LogoutSignal;

/// One call against the timetable API. Built per call, never persisted.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub endpoint: String,
    pub body: Option<Value>,
    pub headers: HeaderMap,
}

impl ApiRequest {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            body: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(Method::PUT, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    pub fn with_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Overrides win over the defaults the dispatcher sets. Repeating a
    /// name sends every value.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }
}

/// Issues authenticated requests and classifies their outcome.
///
/// A 401 clears the session store and publishes on the logout signal before
/// the error is returned. Any other non-2xx becomes
/// [`ApiError::RequestFailed`] and leaves the session alone.
#[derive(Clone)]
pub struct RequestDispatcher {
    client: Client,
    base_url: Url,
    session: Arc<dyn SessionStore>,
    signal: LogoutSignal,
}

impl RequestDispatcher {
    pub fn new(
        base_url: Url,
        session: Arc<dyn SessionStore>,
        signal: LogoutSignal,
    ) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, base_url, session, signal))
    }

    pub fn with_client(
        client: Client,
        base_url: Url,
        session: Arc<dyn SessionStore>,
        signal: LogoutSignal,
    ) -> Self {
        Self {
            client,
            base_url,
            session,
            signal,
        }
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    pub fn signal(&self) -> &LogoutSignal {
        &self.signal
    }

    fn url_for(&self, endpoint: &str) -> Result<Url, ApiError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = endpoint.trim_start_matches('/');
        Url::parse(&format!("{}/{}", base, path))
            .map_err(|e| ApiError::Config(format!("Invalid endpoint {:?}: {}", endpoint, e)))
    }

    pub async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let token = self.session.get().await?;
        let (status, body) = self.execute(&request, token.as_deref()).await?;

        if status == StatusCode::UNAUTHORIZED {
            warn!("{} {} rejected with 401, clearing session", request.method, request.endpoint);
            if let Err(e) = self.session.clear().await {
                warn!("failed to clear session after 401: {}", e);
            }
            self.signal.publish();
            return Err(ApiError::unauthorized(&body));
        }

        Self::classify(&request, status, &body)
    }

    pub async fn send_as<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let payload = self.send(request).await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Sends without a bearer token and stores the returned credential.
    ///
    /// Failures, 401 included, surface as [`ApiError::RequestFailed`] with
    /// the real status; no session exists yet so nothing is cleared or
    /// broadcast.
    pub async fn login(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let (status, body) = self.execute(&request, None).await?;
        let payload = Self::classify(&request, status, &body).map_err(|e| match e {
            ApiError::Unauthorized { message } => ApiError::RequestFailed {
                status: StatusCode::UNAUTHORIZED.as_u16(),
                message,
            },
            other => other,
        })?;

        if let Some(token) = credential(&payload) {
            self.session.set(token).await?;
            debug!("login succeeded, session token stored");
        } else {
            warn!("login response carried no token, session left unchanged");
        }

        Ok(payload)
    }

    async fn execute(
        &self,
        request: &ApiRequest,
        token: Option<&str>,
    ) -> Result<(StatusCode, Vec<u8>), ApiError> {
        let url = self.url_for(&request.endpoint)?;

        let headers = Self::request_headers(token, &request.headers)?;

        debug!(
            "{} {} (authenticated: {})",
            request.method,
            url,
            token.is_some()
        );

        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .headers(headers);
        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();
        Ok((status, body))
    }

    /// Bearer credential and JSON content type, then the caller's overrides.
    /// An overridden name drops the default and keeps all override values.
    fn request_headers(token: Option<&str>, overrides: &HeaderMap) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| ApiError::Config(format!("Stored token is not a valid header: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for name in overrides.keys() {
            headers.remove(name);
        }
        for (name, value) in overrides.iter() {
            headers.append(name.clone(), value.clone());
        }
        Ok(headers)
    }

    fn classify(request: &ApiRequest, status: StatusCode, body: &[u8]) -> Result<Value, ApiError> {
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::unauthorized(body));
        }

        if !status.is_success() {
            let err = ApiError::request_failed(status.as_u16(), body);
            warn!("{} {} failed: {}", request.method, request.endpoint, err);
            return Err(err);
        }

        if body.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(body)?)
    }
}
