use serde_json::Value;

use super::join_path;
use crate::dispatcher::{ApiRequest, RequestDispatcher};
use crate::error::ApiError;

pub const REPORTS_PATH: &str = "/api/reports";

/// Read-only aggregate views of a generated timetable.
#[derive(Clone)]
pub struct ReportsApi {
    dispatcher: RequestDispatcher,
}

impl ReportsApi {
    pub fn new(dispatcher: RequestDispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn timetable(&self, timetable_id: &str) -> Result<Value, ApiError> {
        self.fetch(&[timetable_id]).await
    }

    pub async fn lecturer_workload(&self, timetable_id: &str) -> Result<Value, ApiError> {
        self.fetch(&[timetable_id, "lecturer-workload"]).await
    }

    pub async fn room_utilization(&self, timetable_id: &str) -> Result<Value, ApiError> {
        self.fetch(&[timetable_id, "room-utilization"]).await
    }

    async fn fetch(&self, segments: &[&str]) -> Result<Value, ApiError> {
        self.dispatcher
            .send(ApiRequest::get(join_path(REPORTS_PATH, segments)?))
            .await
    }
}
