//! Policy configuration.
//!
//! A [`PolicyConfig`] describes the condition set and item ordering as data.
//! Every field is defaulted, so an empty configuration yields the reference
//! conference policy.
//!
//! ```toml
//! generic_slot_type = "SESSION"
//! type_order = ["course", "workshop", "paper"]
//! tie_breaker = "by_id"
//!
//! [[conditions]]
//! name = "cell_empty"
//! priority = 0
//! applies_to = "all"
//! ```

use std::path::Path;

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::conditions::{Applicability, EXCLUDED_SESSION_TYPES, GENERIC_SLOT_TYPE};
use crate::error::Result;
use crate::ordering::rules::CONFERENCE_TYPE_ORDER;
use crate::ordering::TieBreaker;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "TIMETABLE_";

/// Scheduling policy as data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Slot type tag accepted by every session type.
    #[serde(default = "default_generic_slot_type")]
    pub generic_slot_type: String,

    /// Session type names kept out of session cells.
    #[serde(default = "default_excluded_session_types")]
    pub excluded_session_types: Vec<String>,

    /// Session type names, highest precedence first.
    #[serde(default = "default_type_order")]
    pub type_order: Vec<String>,

    /// Condition list replacing the reference one.
    #[serde(default)]
    pub conditions: Option<Vec<ConditionConfig>>,

    /// Tie-breaking after all ordering rules.
    #[serde(default)]
    pub tie_breaker: TieBreaker,
}

/// One entry of a configured condition list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionConfig {
    /// Built-in condition name.
    pub name: String,

    /// 0 = mandatory; higher = relaxed earlier.
    #[serde(default)]
    pub priority: u32,

    /// Item kinds governed.
    #[serde(default = "default_applies_to")]
    pub applies_to: Applicability,
}

impl ConditionConfig {
    /// Creates an entry.
    pub fn new(name: impl Into<String>, priority: u32, applies_to: Applicability) -> Self {
        Self {
            name: name.into(),
            priority,
            applies_to,
        }
    }
}

fn default_generic_slot_type() -> String {
    GENERIC_SLOT_TYPE.to_owned()
}

fn default_excluded_session_types() -> Vec<String> {
    EXCLUDED_SESSION_TYPES.iter().map(|s| (*s).to_owned()).collect()
}

fn default_type_order() -> Vec<String> {
    CONFERENCE_TYPE_ORDER.iter().map(|s| (*s).to_owned()).collect()
}

const fn default_applies_to() -> Applicability {
    Applicability::All
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            generic_slot_type: default_generic_slot_type(),
            excluded_session_types: default_excluded_session_types(),
            type_order: default_type_order(),
            conditions: None,
            tie_breaker: TieBreaker::default(),
        }
    }
}

impl PolicyConfig {
    /// Loads configuration.
    ///
    /// Sources, later overriding earlier:
    /// 1. Default values
    /// 2. The TOML file at `path`, if given
    /// 3. Environment variables with the `TIMETABLE_` prefix
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        Self::extract(figment.merge(Env::prefixed(ENV_PREFIX)))
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        Self::extract(Figment::new().merge(Toml::string(content)))
    }

    fn extract(figment: Figment) -> Result<Self> {
        figment.extract().map_err(|e| Box::new(e).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimetableError;

    #[test]
    fn test_empty_config_is_reference() {
        let config = PolicyConfig::from_toml("").unwrap();
        assert_eq!(config, PolicyConfig::default());
        assert_eq!(config.generic_slot_type, "SESSION");
        assert_eq!(config.type_order[3], "sig");
        assert!(config.conditions.is_none());
        assert_eq!(config.tie_breaker, TieBreaker::Stable);
    }

    #[test]
    fn test_partial_override() {
        let config = PolicyConfig::from_toml(
            r#"
            type_order = ["paper", "workshop"]
            tie_breaker = "by_id"

            [[conditions]]
            name = "cell_empty"

            [[conditions]]
            name = "room_type_compatible"
            priority = 3
            applies_to = "sessions"
            "#,
        )
        .unwrap();

        assert_eq!(config.type_order, vec!["paper", "workshop"]);
        assert_eq!(config.tie_breaker, TieBreaker::ById);
        assert_eq!(config.excluded_session_types.len(), 4);
        assert_eq!(
            config.conditions.unwrap(),
            vec![
                ConditionConfig::new("cell_empty", 0, Applicability::All),
                ConditionConfig::new("room_type_compatible", 3, Applicability::Sessions),
            ]
        );
    }

    #[test]
    fn test_bad_value_is_config_error() {
        let err = PolicyConfig::from_toml(r#"tie_breaker = "random""#).unwrap_err();
        assert!(matches!(err, TimetableError::Config(_)));
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("TIMETABLE_GENERIC_SLOT_TYPE", "TALK");
            let config = PolicyConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.generic_slot_type, "TALK");
            assert_eq!(config.type_order.len(), 6);
            Ok(())
        });
    }

    #[test]
    fn test_load_from_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("policy.toml", r#"excluded_session_types = ["plenary"]"#)?;
            let config =
                PolicyConfig::load(Some(Path::new("policy.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.excluded_session_types, vec!["plenary"]);
            Ok(())
        });
    }
}
