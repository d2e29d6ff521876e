use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::opaque_entity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Bearer credential in a login payload: `token`, else `access_token`.
/// Empty strings count as absent.
pub(crate) fn credential(payload: &Value) -> Option<&str> {
    ["token", "access_token"]
        .iter()
        .find_map(|key| payload.get(*key).and_then(Value::as_str).filter(|t| !t.is_empty()))
}

opaque_entity!(LoginResponse);

impl LoginResponse {
    pub fn token(&self) -> Option<&str> {
        credential(self.as_value())
    }

    pub fn user(&self) -> Option<&Value> {
        self.get("user")
    }
}
