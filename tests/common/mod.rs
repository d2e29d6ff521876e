#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use reqwest::Url;
use serde_json::Value;

use timetable_client::{ApiClient, LogoutSignal, MemorySessionStore, SessionStore};

/// What the mock API saw for one request.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct MockState {
    routes: Mutex<HashMap<String, (u16, String)>>,
    seen: Mutex<Vec<SeenRequest>>,
}

/// In-process stand-in for the timetable API. Routes are keyed
/// `"METHOD /path"`; anything unknown answers 404.
pub struct MockApi {
    pub base_url: Url,
    state: Arc<MockState>,
}

impl MockApi {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("Failed to bind mock api");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock api crashed");
        });

        Self {
            base_url: Url::parse(&format!("http://{}", addr)).expect("valid url"),
            state,
        }
    }

    pub fn respond(&self, route: &str, status: u16, body: &str) -> &Self {
        self.state
            .routes
            .lock()
            .unwrap()
            .insert(route.to_string(), (status, body.to_string()));
        self
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.state.seen.lock().unwrap().clone()
    }

    pub fn last(&self) -> SeenRequest {
        self.seen().last().cloned().expect("no request reached the mock api")
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    state.seen.lock().unwrap().push(SeenRequest {
        method: method.to_string(),
        path: path.clone(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
    });

    let key = format!("{} {}", method, path);
    let (status, body) = state
        .routes
        .lock()
        .unwrap()
        .get(&key)
        .cloned()
        .unwrap_or((404, r#"{"error":"not found"}"#.to_string()));

    let status = StatusCode::from_u16(status).expect("valid status");
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// Counts logout notifications.
pub fn count_logouts(signal: &LogoutSignal) -> Arc<AtomicUsize> {
    let hits = Arc::new(AtomicUsize::new(0));
    let h = hits.clone();
    signal.subscribe(move |_| {
        h.fetch_add(1, Ordering::SeqCst);
    });
    hits
}

pub fn client_for(api: &MockApi, session: Arc<MemorySessionStore>) -> ApiClient {
    let session: Arc<dyn SessionStore> = session;
    ApiClient::new(api.base_url.clone(), session, LogoutSignal::new()).expect("Failed to build client")
}
