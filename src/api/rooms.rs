use std::ops::Deref;

use serde::Serialize;
use serde_json::Value;

use super::ResourceClient;
use crate::dispatcher::{ApiRequest, RequestDispatcher};
use crate::error::ApiError;
use crate::models::Room;

pub const ROOMS_PATH: &str = "/api/rooms";

/// Rooms keyed by room number, plus server-side search and statistics.
#[derive(Clone)]
pub struct RoomsApi {
    resource: ResourceClient<Room>,
}

impl RoomsApi {
    pub fn new(dispatcher: RequestDispatcher) -> Self {
        Self {
            resource: ResourceClient::new(dispatcher, ROOMS_PATH),
        }
    }

    pub async fn search<C: Serialize + ?Sized>(&self, criteria: &C) -> Result<Vec<Room>, ApiError> {
        let request = ApiRequest::post(self.resource.path(&["search"])?).with_body(criteria)?;
        self.resource.dispatcher().send_as(request).await
    }

    pub async fn get_statistics(&self) -> Result<Value, ApiError> {
        self.resource
            .dispatcher()
            .send(ApiRequest::get(self.resource.path(&["statistics"])?))
            .await
    }
}

impl Deref for RoomsApi {
    type Target = ResourceClient<Room>;

    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}
