//! Item type model.

use serde::{Deserialize, Serialize};

use super::Identified;

/// A type shared by rooms, sessions, events and content items.
///
/// The duration is what one content item of this type takes on stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemType {
    /// Unique type identifier.
    pub id: String,
    /// Display name (matched case-insensitively by several rules).
    #[serde(default)]
    pub name: String,
    /// Duration of one content item of this type, in minutes. May be fractional.
    #[serde(default)]
    pub duration: f64,
}

impl ItemType {
    /// Creates a type.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        duration_min: impl Into<f64>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration: duration_min.into(),
        }
    }

    /// Duration of one content item of this type, rounded to whole ms.
    #[inline]
    pub fn duration_ms(&self) -> i64 {
        (self.duration * 60_000.0).round() as i64
    }
}

impl Identified for ItemType {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_ms() {
        assert_eq!(ItemType::new("T1", "Paper", 20).duration_ms(), 1_200_000);
    }

    #[test]
    fn test_fractional_minutes() {
        let t: ItemType =
            serde_json::from_str(r#"{"id": "t", "name": "Lightning", "duration": 7.5}"#).unwrap();
        assert_eq!(t.duration_ms(), 450_000);

        let t: ItemType = serde_json::from_str(r#"{"id": "t", "duration": 20}"#).unwrap();
        assert_eq!(t.duration_ms(), 1_200_000);
    }
}
