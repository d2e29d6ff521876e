use super::opaque_entity;

opaque_entity!(
    /// A named period. The period may arrive as a name or a number.
    TimeSlot
);

impl TimeSlot {
    pub fn period(&self) -> Option<String> {
        self.text_field("period")
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn start_time(&self) -> Option<&str> {
        self.str_field("start_time")
    }

    pub fn end_time(&self) -> Option<&str> {
        self.str_field("end_time")
    }

    pub fn is_active(&self) -> Option<bool> {
        self.get("is_active").and_then(serde_json::Value::as_bool)
    }
}
