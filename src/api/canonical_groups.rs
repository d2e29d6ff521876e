use std::ops::Deref;

use super::ResourceClient;
use crate::dispatcher::{ApiRequest, RequestDispatcher};
use crate::error::ApiError;
use crate::models::{CanonicalGroup, Subject};

pub const CANONICAL_GROUPS_PATH: &str = "/api/canonical-groups";

#[derive(Clone)]
pub struct CanonicalGroupsApi {
    resource: ResourceClient<CanonicalGroup>,
}

impl CanonicalGroupsApi {
    pub fn new(dispatcher: RequestDispatcher) -> Self {
        Self {
            resource: ResourceClient::new(dispatcher, CANONICAL_GROUPS_PATH),
        }
    }

    /// Subjects belonging to the group.
    pub async fn subjects(&self, group_id: &str) -> Result<Vec<Subject>, ApiError> {
        self.resource
            .dispatcher()
            .send_as(ApiRequest::get(self.resource.path(&[group_id, "subjects"])?))
            .await
    }
}

impl Deref for CanonicalGroupsApi {
    type Target = ResourceClient<CanonicalGroup>;

    fn deref(&self) -> &Self::Target {
        &self.resource
    }
}
