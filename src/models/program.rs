use serde_json::Value;

use super::opaque_entity;

fn string_list(value: Option<&Value>) -> Vec<&str> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

opaque_entity!(Program);

impl Program {
    pub fn id(&self) -> Option<String> {
        self.text_field("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn code(&self) -> Option<&str> {
        self.str_field("code")
    }

    pub fn subjects(&self) -> Vec<&str> {
        string_list(self.get("subjects"))
    }
}

opaque_entity!(
    /// Named bundle of subjects shared across programs.
    CanonicalGroup
);

impl CanonicalGroup {
    pub fn id(&self) -> Option<String> {
        self.text_field("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn subjects(&self) -> Vec<&str> {
        string_list(self.get("subjects"))
    }
}
