use super::opaque_entity;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LecturerRole {
    Professor,
    Lecturer,
    Assistant,
    Other(String),
}

impl LecturerRole {
    pub fn as_str(&self) -> &str {
        match self {
            LecturerRole::Professor => "Professor",
            LecturerRole::Lecturer => "Lecturer",
            LecturerRole::Assistant => "Assistant",
            LecturerRole::Other(raw) => raw,
        }
    }
}

impl From<&str> for LecturerRole {
    fn from(raw: &str) -> Self {
        match raw {
            "Professor" => LecturerRole::Professor,
            "Lecturer" => LecturerRole::Lecturer,
            "Assistant" => LecturerRole::Assistant,
            other => LecturerRole::Other(other.to_string()),
        }
    }
}

opaque_entity!(Lecturer);

impl Lecturer {
    pub fn id(&self) -> Option<String> {
        self.text_field("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn role(&self) -> Option<LecturerRole> {
        self.str_field("role").map(LecturerRole::from)
    }

    pub fn specializations(&self) -> Vec<&str> {
        self.get("specializations")
            .and_then(serde_json::Value::as_array)
            .map(|items| items.iter().filter_map(serde_json::Value::as_str).collect())
            .unwrap_or_default()
    }

    pub fn max_hours_per_week(&self) -> Option<u64> {
        self.get("max_hours_per_week").and_then(serde_json::Value::as_u64)
    }

    /// Weekly availability grid, untouched.
    pub fn availability(&self) -> Option<&serde_json::Value> {
        self.get("availability")
    }
}
