use serde::Serialize;
use serde_json::Value;

use super::join_path;
use crate::dispatcher::{ApiRequest, RequestDispatcher};
use crate::error::ApiError;

pub const IMPORT_PATH: &str = "/api/import";

/// Bulk ingestion. Payloads are forwarded raw; the server validates them.
#[derive(Clone)]
pub struct ImportApi {
    dispatcher: RequestDispatcher,
}

impl ImportApi {
    pub fn new(dispatcher: RequestDispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn lecturers<D: Serialize + ?Sized>(&self, data: &D) -> Result<Value, ApiError> {
        self.ingest("lecturers", data).await
    }

    pub async fn subjects<D: Serialize + ?Sized>(&self, data: &D) -> Result<Value, ApiError> {
        self.ingest("subjects", data).await
    }

    pub async fn rooms<D: Serialize + ?Sized>(&self, data: &D) -> Result<Value, ApiError> {
        self.ingest("rooms", data).await
    }

    pub async fn programs<D: Serialize + ?Sized>(&self, data: &D) -> Result<Value, ApiError> {
        self.ingest("programs", data).await
    }

    pub async fn canonical_groups<D: Serialize + ?Sized>(&self, data: &D) -> Result<Value, ApiError> {
        self.ingest("canonical-groups", data).await
    }

    async fn ingest<D: Serialize + ?Sized>(&self, entity: &str, data: &D) -> Result<Value, ApiError> {
        let request = ApiRequest::post(join_path(IMPORT_PATH, &[entity])?).with_body(data)?;
        self.dispatcher.send(request).await
    }
}
