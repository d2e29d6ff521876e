pub mod api;
pub mod client;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod models;
pub mod session;
pub mod signal;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use dispatcher::{ApiRequest, RequestDispatcher};
pub use error::{ApiError, ErrorKind};
pub use session::{MemorySessionStore, SessionStore, SqliteSessionStore};
pub use signal::{LogoutEvent, LogoutSignal, Subscription};
