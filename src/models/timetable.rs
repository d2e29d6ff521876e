use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Extra, opaque_entity};

/// Body of a generation request; built by the caller, never decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub term: String,
    #[serde(flatten)]
    pub extra: Extra,
}

impl GenerateRequest {
    pub fn for_term(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            extra: Extra::new(),
        }
    }
}

opaque_entity!(
    /// Acknowledgement of a generation job started on the server.
    GenerationJob
);

impl GenerationJob {
    pub fn job_id(&self) -> Option<String> {
        self.text_field("job_id")
    }
}

opaque_entity!(GenerationProgress);

impl GenerationProgress {
    pub fn term(&self) -> Option<&str> {
        self.str_field("term")
    }

    pub fn status(&self) -> Option<&str> {
        self.str_field("status")
    }

    pub fn progress(&self) -> Option<f64> {
        self.get("progress").and_then(Value::as_f64)
    }

    pub fn message(&self) -> Option<&str> {
        self.str_field("message")
    }
}

opaque_entity!(
    /// A generated timetable. Entries are opaque to the client.
    Timetable
);

impl Timetable {
    pub fn id(&self) -> Option<String> {
        self.text_field("id")
    }

    pub fn term(&self) -> Option<&str> {
        self.str_field("term")
    }

    pub fn created_at(&self) -> Option<&str> {
        self.str_field("created_at")
    }

    pub fn entries(&self) -> &[Value] {
        self.get("entries")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
