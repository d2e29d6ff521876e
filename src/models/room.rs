use super::opaque_entity;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomType {
    LectureHall,
    Lab,
    Classroom,
    Theory,
    Other(String),
}

impl RoomType {
    pub fn as_str(&self) -> &str {
        match self {
            RoomType::LectureHall => "Lecture Hall",
            RoomType::Lab => "Lab",
            RoomType::Classroom => "Classroom",
            RoomType::Theory => "Theory",
            RoomType::Other(raw) => raw,
        }
    }
}

impl From<&str> for RoomType {
    fn from(raw: &str) -> Self {
        match raw {
            "Lecture Hall" => RoomType::LectureHall,
            "Lab" => RoomType::Lab,
            "Classroom" => RoomType::Classroom,
            "Theory" => RoomType::Theory,
            other => RoomType::Other(other.to_string()),
        }
    }
}

opaque_entity!(
    /// Rooms are addressed by their number rather than a generated id.
    Room
);

impl Room {
    pub fn number(&self) -> Option<String> {
        self.text_field("number")
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn room_type(&self) -> Option<RoomType> {
        self.str_field("type").map(RoomType::from)
    }

    pub fn capacity(&self) -> Option<u64> {
        self.get("capacity").and_then(serde_json::Value::as_u64)
    }

    pub fn specialization(&self) -> Option<&str> {
        self.str_field("specialization")
    }

    pub fn is_available(&self) -> Option<bool> {
        self.get("is_available").and_then(serde_json::Value::as_bool)
    }
}

opaque_entity!(RoomSpecialization);

impl RoomSpecialization {
    pub fn id(&self) -> Option<String> {
        self.text_field("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn description(&self) -> Option<&str> {
        self.str_field("description")
    }
}
