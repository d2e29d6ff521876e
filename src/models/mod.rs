//! Transport shapes for the timetable API.
//!
//! Entities are thin views over the JSON the server sent: they deserialize
//! from any value, serialize back to the same JSON value, and only
//! interpret fields when an accessor is called.

/// Renders a string or number field as text; identifiers come as either.
pub(crate) fn text_of(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

macro_rules! opaque_entity {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(serde_json::Value);

        impl $name {
            pub fn as_value(&self) -> &serde_json::Value {
                &self.0
            }

            pub fn into_value(self) -> serde_json::Value {
                self.0
            }

            pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
                self.0.get(field)
            }

            pub fn str_field(&self, field: &str) -> Option<&str> {
                self.0.get(field).and_then(serde_json::Value::as_str)
            }

            pub fn text_field(&self, field: &str) -> Option<String> {
                self.0.get(field).and_then($crate::models::text_of)
            }

            /// Sets `field`, turning a non-object payload into an object first.
            pub fn with(mut self, field: &str, value: impl Into<serde_json::Value>) -> Self {
                if !self.0.is_object() {
                    self.0 = serde_json::Value::Object(serde_json::Map::new());
                }
                if let serde_json::Value::Object(map) = &mut self.0 {
                    map.insert(field.to_string(), value.into());
                }
                self
            }
        }

        impl From<serde_json::Value> for $name {
            fn from(value: serde_json::Value) -> Self {
                Self(value)
            }
        }

        impl From<$name> for serde_json::Value {
            fn from(entity: $name) -> Self {
                entity.0
            }
        }
    };
}

pub(crate) use opaque_entity;

pub mod auth;
pub mod lecturer;
pub mod program;
pub mod room;
pub mod subject;
pub mod time_slot;
pub mod timetable;

/// Fields the client does not model.
pub type Extra = serde_json::Map<String, serde_json::Value>;

pub use auth::{Credentials, LoginResponse, RegisterRequest};
pub use lecturer::{Lecturer, LecturerRole};
pub use program::{CanonicalGroup, Program};
pub use room::{Room, RoomSpecialization, RoomType};
pub use subject::Subject;
pub use time_slot::TimeSlot;
pub use timetable::{GenerateRequest, GenerationJob, GenerationProgress, Timetable};
