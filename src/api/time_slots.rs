use std::ops::Deref;

use super::ResourceClient;
use crate::dispatcher::{ApiRequest, RequestDispatcher};
use crate::error::ApiError;
use crate::models::TimeSlot;

pub const TIME_SLOTS_PATH: &str = "/api/time-slots";

/// Time slots are addressed by period.
#[derive(Clone)]
pub struct TimeSlotsApi {
    resource: ResourceClient<TimeSlot>,
}

impl TimeSlotsApi {
    pub fn new(dispatcher: RequestDispatcher) -> Self {
        Self {
            resource: ResourceClient::new(dispatcher, TIME_SLOTS_PATH),
        }
    }

    pub async fn active(&self) -> Result<Vec<TimeSlot>, ApiError> {
        self.resource
            .dispatcher()
            .send_as(ApiRequest::get(self.resource.path(&["active"])?))
            .await
    }
}

impl Deref for TimeSlotsApi {
    type Target = ResourceClient<TimeSlot>;

    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}
