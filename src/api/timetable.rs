use serde_json::Value;

use super::join_path;
use crate::dispatcher::{ApiRequest, RequestDispatcher};
use crate::error::ApiError;
use crate::models::{GenerateRequest, GenerationJob, GenerationProgress, Timetable};

pub const TIMETABLE_PATH: &str = "/api/timetable";

/// Generation runs server side as an asynchronous job; this facade only
/// starts it, polls it and fetches the results.
#[derive(Clone)]
pub struct TimetableApi {
    dispatcher: RequestDispatcher,
}

impl TimetableApi {
    pub fn new(dispatcher: RequestDispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerationJob, ApiError> {
        let request = ApiRequest::post(join_path(TIMETABLE_PATH, &["generate"])?).with_body(request)?;
        self.dispatcher.send_as(request).await
    }

    pub async fn get_progress(&self, term: &str) -> Result<GenerationProgress, ApiError> {
        self.dispatcher
            .send_as(ApiRequest::get(join_path(TIMETABLE_PATH, &["progress", term])?))
            .await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Timetable, ApiError> {
        self.dispatcher
            .send_as(ApiRequest::get(join_path(TIMETABLE_PATH, &[id])?))
            .await
    }

    pub async fn list(&self) -> Result<Vec<Timetable>, ApiError> {
        self.dispatcher
            .send_as(ApiRequest::get(join_path(TIMETABLE_PATH, &["list"])?))
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<Value, ApiError> {
        self.dispatcher
            .send(ApiRequest::delete(join_path(TIMETABLE_PATH, &[id])?))
            .await
    }
}
