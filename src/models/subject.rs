use serde_json::json;

use super::opaque_entity;

opaque_entity!(
    /// A subject taught under a parent course.
    Subject
);

impl Subject {
    pub fn new(code: &str, title: &str) -> Self {
        Self::from(json!({ "code": code, "title": title }))
    }

    pub fn id(&self) -> Option<String> {
        self.text_field("id")
    }

    pub fn code(&self) -> Option<&str> {
        self.str_field("code")
    }

    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    pub fn hours_per_week(&self) -> Option<u64> {
        self.get("hours_per_week").and_then(serde_json::Value::as_u64)
    }

    pub fn course_id(&self) -> Option<String> {
        self.text_field("course_id")
    }
}
