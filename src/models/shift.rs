use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error};
use std::fmt;

/// Work shift (turno). Stored on disk and on the mirror with the legacy
/// labels so existing files and sheets keep matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shift {
    Morning,   // 1 (mañana)
    Afternoon, // 2 (tarde)
    Night,     // 3 (noche)
}

impl Shift {
    pub fn label(&self) -> &'static str {
        match self {
            Shift::Morning => "1 (mañana)",
            Shift::Afternoon => "2 (tarde)",
            Shift::Night => "3 (noche)",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "1 (mañana)" => Some(Shift::Morning),
            "2 (tarde)" => Some(Shift::Afternoon),
            "3 (noche)" => Some(Shift::Night),
            _ => None,
        }
    }

    /// Helper: convert CLI input (number or name, any case).
    pub fn from_input(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "1" | "manana" | "mañana" | "morning" => Some(Shift::Morning),
            "2" | "tarde" | "afternoon" => Some(Shift::Afternoon),
            "3" | "noche" | "night" => Some(Shift::Night),
            other => Shift::from_label(other),
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Shift {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Shift {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(de)?;
        Shift::from_label(&raw).ok_or_else(|| D::Error::custom(format!("unknown shift: {raw}")))
    }
}
