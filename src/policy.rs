//! Scheduling policy: the condition set plus the item ordering.
//!
//! The autoscheduler only talks to a [`Policy`]; any [`Condition`] or
//! [`OrderingRule`](crate::ordering::OrderingRule) implementation can be
//! plugged in through it.
//!
//! [`Condition`]: crate::conditions::Condition

use tracing::debug;

use crate::conditions::{rules, ConditionSet};
use crate::config::PolicyConfig;
use crate::error::{Result, TimetableError};
use crate::ordering::{rules as ordering_rules, RuleEngine};

/// Conditions and ordering used by one scheduling run.
#[derive(Debug, Clone, Default)]
pub struct Policy {
    /// Prioritized compatibility conditions.
    pub conditions: ConditionSet,
    /// Item ordering.
    pub ordering: RuleEngine,
}

impl Policy {
    /// Creates a policy from parts.
    pub fn new(conditions: ConditionSet, ordering: RuleEngine) -> Self {
        Self {
            conditions,
            ordering,
        }
    }

    /// The reference conference policy.
    pub fn conference() -> Self {
        Self::new(ConditionSet::conference(), RuleEngine::conference())
    }

    /// Builds a policy from configuration.
    ///
    /// # Errors
    /// [`TimetableError::UnknownCondition`] for a condition name that is not
    /// built in.
    pub fn from_config(config: &PolicyConfig) -> Result<Self> {
        let mut conditions = ConditionSet::new();
        match &config.conditions {
            Some(entries) => {
                for entry in entries {
                    let condition = rules::builtin(
                        &entry.name,
                        &config.generic_slot_type,
                        &config.excluded_session_types,
                    )
                    .ok_or_else(|| TimetableError::UnknownCondition(entry.name.clone()))?;
                    conditions.push(condition, entry.priority, entry.applies_to);
                }
            }
            None => {
                for (name, priority, applies_to) in ConditionSet::conference().describe() {
                    let condition = rules::builtin(
                        name,
                        &config.generic_slot_type,
                        &config.excluded_session_types,
                    )
                    .ok_or_else(|| TimetableError::UnknownCondition(name.to_string()))?;
                    conditions.push(condition, priority, applies_to);
                }
            }
        }

        let ordering = RuleEngine::new()
            .with_rule(ordering_rules::EventsFirst)
            .with_rule(ordering_rules::SessionTypePrecedence::new(&config.type_order))
            .with_rule(ordering_rules::ShortestDuration)
            .with_final_tie_breaker(config.tie_breaker);

        debug!(
            conditions = conditions.len(),
            max_priority = conditions.max_priority(),
            "policy built from configuration"
        );
        Ok(Self::new(conditions, ordering))
    }
}
