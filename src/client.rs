use std::sync::Arc;

use reqwest::Url;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::api::{
    AuthApi, CanonicalGroupsApi, ImportApi, LecturersApi, ProgramsApi, ReportsApi, ResourceClient,
    RoomSpecializationsApi, RoomsApi, SubjectsApi, TimeSlotsApi, TimetableApi,
};
use crate::config::ClientConfig;
use crate::dispatcher::RequestDispatcher;
use crate::error::ApiError;
use crate::session::{SessionStore, SqliteSessionStore};
use crate::signal::LogoutSignal;

/// Entry point for the application: one per process, shared by every page.
#[derive(Clone)]
pub struct ApiClient {
    dispatcher: RequestDispatcher,
}

impl ApiClient {
    pub fn new(
        base_url: Url,
        session: Arc<dyn SessionStore>,
        signal: LogoutSignal,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            dispatcher: RequestDispatcher::new(base_url, session, signal)?,
        })
    }

    /// Opens the durable session store named by the config.
    pub async fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let session = SqliteSessionStore::connect(&config.session_db_url).await?;
        info!(
            "timetable api at {}, session store {}",
            config.api_base_url, config.session_db_url
        );
        Self::new(config.api_base_url.clone(), Arc::new(session), LogoutSignal::new())
    }

    pub fn dispatcher(&self) -> &RequestDispatcher {
        &self.dispatcher
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        self.dispatcher.session()
    }

    pub fn logout_signal(&self) -> &LogoutSignal {
        self.dispatcher.signal()
    }

    /// CRUD client for a collection without a dedicated facade.
    pub fn resource<T>(&self, base_path: impl Into<String>) -> ResourceClient<T>
    where
        T: Serialize + DeserializeOwned,
    {
        ResourceClient::new(self.dispatcher.clone(), base_path)
    }

    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.dispatcher.clone())
    }

    pub fn subjects(&self) -> SubjectsApi {
        self.resource("/api/subjects")
    }

    pub fn lecturers(&self) -> LecturersApi {
        self.resource("/api/lecturers")
    }

    pub fn rooms(&self) -> RoomsApi {
        RoomsApi::new(self.dispatcher.clone())
    }

    pub fn programs(&self) -> ProgramsApi {
        ProgramsApi::new(self.dispatcher.clone())
    }

    pub fn timetable(&self) -> TimetableApi {
        TimetableApi::new(self.dispatcher.clone())
    }

    pub fn canonical_groups(&self) -> CanonicalGroupsApi {
        CanonicalGroupsApi::new(self.dispatcher.clone())
    }

    pub fn reports(&self) -> ReportsApi {
        ReportsApi::new(self.dispatcher.clone())
    }

    pub fn import(&self) -> ImportApi {
        ImportApi::new(self.dispatcher.clone())
    }

    pub fn room_specializations(&self) -> RoomSpecializationsApi {
        self.resource("/api/room-specializations")
    }

    pub fn time_slots(&self) -> TimeSlotsApi {
        TimeSlotsApi::new(self.dispatcher.clone())
    }
}
