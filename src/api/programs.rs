use std::ops::Deref;

use serde::Serialize;
use serde_json::{Value, json};

use super::ResourceClient;
use crate::dispatcher::{ApiRequest, RequestDispatcher};
use crate::error::ApiError;
use crate::models::Program;

pub const PROGRAMS_PATH: &str = "/api/programs";

#[derive(Clone)]
pub struct ProgramsApi {
    resource: ResourceClient<Program>,
}

impl ProgramsApi {
    pub fn new(dispatcher: RequestDispatcher) -> Self {
        Self {
            resource: ResourceClient::new(dispatcher, PROGRAMS_PATH),
        }
    }

    pub async fn search<C: Serialize + ?Sized>(&self, criteria: &C) -> Result<Vec<Program>, ApiError> {
        let request = ApiRequest::post(self.resource.path(&["search"])?).with_body(criteria)?;
        self.resource.dispatcher().send_as(request).await
    }

    pub async fn get_statistics(&self) -> Result<Value, ApiError> {
        self.resource
            .dispatcher()
            .send(ApiRequest::get(self.resource.path(&["statistics"])?))
            .await
    }

    /// Attaches subjects (courses) to a program.
    pub async fn add_courses(&self, program_id: &str, course_ids: &[&str]) -> Result<Value, ApiError> {
        let request = ApiRequest::post(self.resource.path(&[program_id, "subjects"])?)
            .with_body(&json!({ "courses": course_ids }))?;
        self.resource.dispatcher().send(request).await
    }

    pub async fn remove_course(&self, program_id: &str, course_id: &str) -> Result<Value, ApiError> {
        self.resource
            .dispatcher()
            .send(ApiRequest::delete(
                self.resource.path(&[program_id, "subjects", course_id])?,
            ))
            .await
    }
}

impl Deref for ProgramsApi {
    type Target = ResourceClient<Program>;

    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}
