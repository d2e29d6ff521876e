mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde_json::json;

use timetable_client::models::{Credentials, GenerateRequest, Subject};
use timetable_client::{
    ApiClient, ApiRequest, ErrorKind, LogoutSignal, MemorySessionStore, SessionStore,
    SqliteSessionStore,
};

use common::{MockApi, client_for, count_logouts};

fn credentials() -> Credentials {
    Credentials {
        username: "registrar".to_string(),
        password: "s3cret".to_string(),
    }
}

#[tokio::test]
async fn test_login_then_requests_carry_bearer_token() {
    let api = MockApi::start().await;
    api.respond("POST /auth/login", 200, r#"{"token":"abc123","user":{"role":"admin"}}"#)
        .respond("GET /api/rooms", 200, r#"[{"number":"101","type":"Lab","capacity":30}]"#);

    let session = Arc::new(MemorySessionStore::new());
    let client = client_for(&api, session.clone());

    let response = client.auth().login(&credentials()).await.expect("login failed");
    assert_eq!(response.token(), Some("abc123"));
    assert_eq!(session.get().await.unwrap().as_deref(), Some("abc123"));

    let login_request = api.last();
    assert_eq!(login_request.authorization, None);
    assert_eq!(
        login_request.body,
        Some(json!({"username": "registrar", "password": "s3cret"}))
    );

    let rooms = client.rooms().get_all().await.expect("rooms failed");
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].number().as_deref(), Some("101"));
    assert_eq!(api.last().authorization.as_deref(), Some("Bearer abc123"));
}

#[tokio::test]
async fn test_login_never_sends_stale_token() {
    let api = MockApi::start().await;
    api.respond("POST /auth/login", 200, r#"{"access_token":"fresh"}"#);

    let session = Arc::new(MemorySessionStore::with_token("stale"));
    let client = client_for(&api, session.clone());

    client.auth().login(&credentials()).await.unwrap();
    assert_eq!(api.last().authorization, None);
    assert_eq!(session.get().await.unwrap().as_deref(), Some("fresh"));
}

#[tokio::test]
async fn test_unauthenticated_request_is_still_attempted() {
    let api = MockApi::start().await;
    api.respond("GET /api/time-slots/active", 200, r#"[{"period":1,"name":"08:00"}]"#)
        .respond("GET /api/subjects", 403, r#"{"error":"forbidden"}"#);

    let session = Arc::new(MemorySessionStore::new());
    let client = client_for(&api, session.clone());

    let slots = client.time_slots().active().await.expect("slots failed");
    assert_eq!(slots[0].period().as_deref(), Some("1"));
    let seen = api.last();
    assert_eq!(seen.authorization, None);
    assert_eq!(seen.content_type.as_deref(), Some("application/json"));

    let err = client.subjects().get_all().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequestFailed);
    assert_eq!(err.status(), Some(403));
}

#[tokio::test]
async fn test_expired_token_clears_session_and_broadcasts_once() {
    let api = MockApi::start().await;
    api.respond("GET /api/lecturers/L1", 401, r#"{"error":"token expired"}"#);

    let session = Arc::new(MemorySessionStore::with_token("expired"));
    let client = client_for(&api, session.clone());
    let logouts = count_logouts(client.logout_signal());
    let mut listener = client.logout_signal().listen();

    let err = client.lecturers().get_by_id("L1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.message(), "token expired");

    assert_eq!(api.last().authorization.as_deref(), Some("Bearer expired"));
    assert_eq!(session.get().await.unwrap(), None);
    assert_eq!(logouts.load(Ordering::SeqCst), 1);
    assert!(listener.try_recv().is_ok());
}

#[tokio::test]
async fn test_unauthorized_without_body_uses_generic_message() {
    let api = MockApi::start().await;
    api.respond("GET /api/programs", 401, "");

    let session = Arc::new(MemorySessionStore::with_token("t"));
    let client = client_for(&api, session.clone());

    let err = client.programs().get_all().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert_eq!(err.message(), "Authentication required");
    assert_eq!(session.get().await.unwrap(), None);
}

#[tokio::test]
async fn test_concurrent_unauthorized_calls_settle_consistently() {
    let api = MockApi::start().await;
    api.respond("GET /api/rooms", 401, r#"{"error":"revoked"}"#)
        .respond("GET /api/subjects", 401, r#"{"error":"revoked"}"#);

    let session = Arc::new(MemorySessionStore::with_token("revoked"));
    let client = client_for(&api, session.clone());
    let logouts = count_logouts(client.logout_signal());

    let rooms = client.rooms();
    let subjects = client.subjects();
    let (a, b) = tokio::join!(rooms.get_all(), subjects.get_all());

    assert_eq!(a.unwrap_err().kind(), ErrorKind::Unauthorized);
    assert_eq!(b.unwrap_err().kind(), ErrorKind::Unauthorized);
    assert_eq!(session.get().await.unwrap(), None);
    // one notification per rejected call
    assert_eq!(logouts.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_request_failure_leaves_session_untouched() {
    let api = MockApi::start().await;
    api.respond("POST /api/subjects", 400, r#"{"error":"duplicate code"}"#)
        .respond("DELETE /api/rooms/101", 500, "upstream exploded");

    let session = Arc::new(MemorySessionStore::with_token("abc123"));
    let client = client_for(&api, session.clone());
    let logouts = count_logouts(client.logout_signal());

    let subject = Subject::new("CS101", "Intro to Programming").with("hours_per_week", 4);
    let err = client.subjects().create(&subject).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequestFailed);
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.message(), "duplicate code");
    assert_eq!(
        api.last().body,
        Some(json!({"code": "CS101", "title": "Intro to Programming", "hours_per_week": 4}))
    );

    let err = client.rooms().delete("101").await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.message(), "Request failed with status 500");

    assert_eq!(session.get().await.unwrap().as_deref(), Some("abc123"));
    assert_eq!(logouts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_generate_resolves_with_payload_verbatim() {
    let api = MockApi::start().await;
    api.respond("POST /api/timetable/generate", 202, r#"{"job_id":"t9"}"#);

    let session = Arc::new(MemorySessionStore::with_token("abc123"));
    let client = client_for(&api, session);

    let job = client
        .timetable()
        .generate(&GenerateRequest::for_term("2025-1"))
        .await
        .expect("generate failed");
    assert_eq!(job.job_id().as_deref(), Some("t9"));
    assert_eq!(job.as_value(), &json!({"job_id": "t9"}));
    assert_eq!(api.last().body, Some(json!({"term": "2025-1"})));

    let raw = client
        .dispatcher()
        .send(ApiRequest::post("/api/timetable/generate").with_body(&json!({"term": "2025-1"})).unwrap())
        .await
        .unwrap();
    assert_eq!(raw, json!({"job_id": "t9"}));
}

#[tokio::test]
async fn test_login_failure_keeps_existing_session() {
    let api = MockApi::start().await;
    api.respond("POST /auth/login", 401, r#"{"error":"bad credentials"}"#);

    let session = Arc::new(MemorySessionStore::with_token("previous"));
    let client = client_for(&api, session.clone());
    let logouts = count_logouts(client.logout_signal());

    let err = client.auth().login(&credentials()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequestFailed);
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.message(), "bad credentials");

    assert_eq!(session.get().await.unwrap().as_deref(), Some("previous"));
    assert_eq!(logouts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_login_without_token_leaves_store_unchanged() {
    let api = MockApi::start().await;
    api.respond("POST /auth/login", 200, r#"{"message":"check your email"}"#);

    let session = Arc::new(MemorySessionStore::new());
    let client = client_for(&api, session.clone());

    let response = client.auth().login(&credentials()).await.unwrap();
    assert_eq!(response.token(), None);
    assert_eq!(response.get("message"), Some(&json!("check your email")));
    assert_eq!(session.get().await.unwrap(), None);
}

#[tokio::test]
async fn test_login_response_with_both_token_fields() {
    let api = MockApi::start().await;
    let body = r#"{"token":"new","access_token":"other","user":{"id":1}}"#;
    api.respond("POST /auth/login", 200, body);

    let session = Arc::new(MemorySessionStore::with_token("old"));
    let client = client_for(&api, session.clone());

    let response = client.auth().login(&credentials()).await.expect("login failed");
    assert_eq!(response.token(), Some("new"));
    assert_eq!(response.user(), Some(&json!({"id": 1})));
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        serde_json::from_str::<serde_json::Value>(body).unwrap()
    );
    assert_eq!(session.get().await.unwrap().as_deref(), Some("new"));
}

#[tokio::test]
async fn test_login_with_empty_body_succeeds_without_storing() {
    let api = MockApi::start().await;
    api.respond("POST /auth/login", 200, "");

    let session = Arc::new(MemorySessionStore::with_token("old"));
    let client = client_for(&api, session.clone());

    let response = client.auth().login(&credentials()).await.expect("login failed");
    assert_eq!(response.token(), None);
    assert_eq!(response.as_value(), &serde_json::Value::Null);
    assert_eq!(session.get().await.unwrap().as_deref(), Some("old"));
}

#[tokio::test]
async fn test_failed_login_never_replaces_stored_token() {
    let api = MockApi::start().await;
    api.respond("POST /auth/login", 500, r#"{"token":"leaked"}"#);

    let session = Arc::new(MemorySessionStore::with_token("old"));
    let client = client_for(&api, session.clone());

    let err = client.auth().login(&credentials()).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(session.get().await.unwrap().as_deref(), Some("old"));

    // a 2xx that is not JSON fails before anything is stored
    api.respond("POST /auth/login", 200, "token=new");
    let err = client.auth().login(&credentials()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
    assert_eq!(session.get().await.unwrap().as_deref(), Some("old"));
}

#[tokio::test]
async fn test_logout_always_clears() {
    let api = MockApi::start().await;
    let session = Arc::new(MemorySessionStore::with_token("abc123"));
    let client = client_for(&api, session.clone());
    let logouts = count_logouts(client.logout_signal());

    client.auth().logout().await.unwrap();
    assert!(!client.auth().is_authenticated().await.unwrap());

    client.auth().logout().await.unwrap();
    assert_eq!(session.get().await.unwrap(), None);
    assert_eq!(logouts.load(Ordering::SeqCst), 0);
    assert!(api.seen().is_empty());
}

#[tokio::test]
async fn test_header_overrides_win() {
    let api = MockApi::start().await;
    api.respond("POST /api/import/rooms", 200, r#"{"imported":2}"#);

    let session = Arc::new(MemorySessionStore::new());
    let client = client_for(&api, session);

    let request = ApiRequest::post("/api/import/rooms")
        .with_body(&json!([{"number": "101"}, {"number": "102"}]))
        .unwrap()
        .with_header(CONTENT_TYPE, HeaderValue::from_static("application/vnd.timetable+json"));
    let payload = client.dispatcher().send(request).await.unwrap();

    assert_eq!(payload, json!({"imported": 2}));
    assert_eq!(
        api.last().content_type.as_deref(),
        Some("application/vnd.timetable+json")
    );
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    // grab a free port, then close it
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let session: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::with_token("abc123"));
    let client = ApiClient::new(
        format!("http://{}", addr).parse().unwrap(),
        session.clone(),
        LogoutSignal::new(),
    )
    .unwrap();

    let err = client.rooms().get_all().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.status(), None);
    assert_eq!(session.get().await.unwrap().as_deref(), Some("abc123"));
}

#[tokio::test]
async fn test_sqlite_session_round_trip_through_client() {
    let api = MockApi::start().await;
    api.respond("POST /auth/login", 200, r#"{"token":"abc123"}"#)
        .respond("GET /api/canonical-groups/g1", 401, r#"{"error":"token expired"}"#);

    let store = SqliteSessionStore::connect("sqlite::memory:").await.unwrap();
    let session: Arc<dyn SessionStore> = Arc::new(store);
    let client = ApiClient::new(api.base_url.clone(), session.clone(), LogoutSignal::new()).unwrap();

    client.auth().login(&credentials()).await.unwrap();
    assert_eq!(session.get().await.unwrap().as_deref(), Some("abc123"));

    let err = client.canonical_groups().get_by_id("g1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert_eq!(session.get().await.unwrap(), None);
}
