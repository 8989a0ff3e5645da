use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error};
use std::fmt;

/// Line-event kind (tipo). Legacy wire strings: "Incidencia" and
/// "Tarea/Limpieza".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Incident,
    Task,
}

impl EventKind {
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Incident => "Incidencia",
            EventKind::Task => "Tarea/Limpieza",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "Incidencia" => Some(EventKind::Incident),
            "Tarea/Limpieza" => Some(EventKind::Task),
            _ => None,
        }
    }

    /// Helper: convert CLI input (English or legacy Spanish, any case).
    pub fn from_input(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "incident" | "incidencia" => Some(EventKind::Incident),
            "task" | "cleaning" | "tarea" | "limpieza" | "tarea/limpieza" => Some(EventKind::Task),
            _ => None,
        }
    }

    pub fn is_incident(&self) -> bool {
        matches!(self, EventKind::Incident)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for EventKind {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for EventKind {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(de)?;
        EventKind::from_label(&raw)
            .ok_or_else(|| D::Error::custom(format!("unknown event kind: {raw}")))
    }
}
