//! Rule engine for item ordering.
//!
//! Applies rules in sequence: a later rule only decides between items the
//! earlier rules tie on. Items still tied after every rule keep their
//! relative input order unless a final tie-breaker says otherwise.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;

use super::{rules, OrderingRule, RuleScore};
use crate::error::Result;
use crate::models::{ItemRef, ScheduleContext};

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreaker {
    /// Keep input (collection) order.
    #[default]
    Stable,
    /// Lexicographic by item id.
    ById,
}

/// A composable, sequential rule engine over schedulable items.
///
/// # Example
/// ```
/// use u_timetable::ordering::{rules, RuleEngine, TieBreaker};
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::EventsFirst)
///     .with_final_tie_breaker(TieBreaker::ById);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn OrderingRule>>,
    tie_breaker: TieBreaker,
    epsilon: f64,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::Stable,
            epsilon: 1e-9,
        }
    }

    /// The reference conference ordering.
    ///
    /// Events before sessions, sessions by type precedence, then shorter
    /// items before longer ones.
    pub fn conference() -> Self {
        Self::new()
            .with_rule(rules::EventsFirst)
            .with_rule(rules::SessionTypePrecedence::conference())
            .with_rule(rules::ShortestDuration)
    }

    /// Adds a rule after the existing ones.
    pub fn with_rule<R: OrderingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Names of the configured rules, in order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Sorts items (stable), first-to-attempt first.
    ///
    /// Every rule is evaluated once per item before sorting.
    pub fn sort(&self, items: &[ItemRef], ctx: &ScheduleContext) -> Result<Vec<ItemRef>> {
        let scores = items
            .iter()
            .map(|&item| self.evaluate(item, ctx))
            .collect::<Result<Vec<_>>>()?;

        let mut indices: Vec<usize> = (0..items.len()).collect();
        indices.sort_by(|&a, &b| {
            self.compare_sequential(&scores[a], &scores[b])
                .then_with(|| self.break_tie(items[a], items[b], ctx))
        });
        Ok(indices.into_iter().map(|i| items[i]).collect())
    }

    /// Unscheduled items of the context, in attempt order.
    pub fn order_unscheduled(&self, ctx: &ScheduleContext) -> Result<Vec<ItemRef>> {
        self.sort(&ctx.unscheduled_refs(), ctx)
    }

    /// Scores from each rule for one item.
    pub fn evaluate(&self, item: ItemRef, ctx: &ScheduleContext) -> Result<Vec<RuleScore>> {
        let view = ctx.item(item);
        self.rules.iter().map(|r| r.evaluate(view, ctx)).collect()
    }

    fn compare_sequential(&self, a: &[RuleScore], b: &[RuleScore]) -> Ordering {
        for (score_a, score_b) in a.iter().zip(b) {
            if (score_a - score_b).abs() > self.epsilon {
                return score_a.partial_cmp(score_b).unwrap_or(Ordering::Equal);
            }
        }
        Ordering::Equal
    }

    fn break_tie(&self, a: ItemRef, b: ItemRef, ctx: &ScheduleContext) -> Ordering {
        match self.tie_breaker {
            TieBreaker::Stable => Ordering::Equal,
            TieBreaker::ById => ctx.item(a).id().cmp(ctx.item(b).id()),
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::conference;
    use crate::models::{Event, Session};

    fn ids(ctx: &ScheduleContext, order: &[ItemRef]) -> Vec<String> {
        order.iter().map(|&r| ctx.item(r).id().to_string()).collect()
    }

    #[test]
    fn test_conference_order() {
        let ctx = conference()
            .with_session(
                Session::new("paper-long")
                    .with_type("paper")
                    .with_content("P1")
                    .with_content("P2"),
            )
            .with_session(Session::new("untyped"))
            .with_session(Session::new("course").with_type("course").with_content("K1"))
            .with_session(Session::new("paper-short").with_type("paper").with_content("P3"))
            .with_session(Session::new("workshop").with_type("workshop").with_content("W1"))
            .with_event(Event::new("reception").with_content("X1"))
            .with_event(Event::new("tour"));

        let order = RuleEngine::conference().order_unscheduled(&ctx).unwrap();
        assert_eq!(
            ids(&ctx, &order),
            vec!["tour", "reception", "course", "workshop", "paper-short", "paper-long", "untyped"]
        );
    }

    #[test]
    fn test_scheduled_items_are_left_out() {
        let ctx = conference()
            .with_session(Session::new("done").scheduled_at("R1", "T1"))
            .with_session(Session::new("todo"));
        let order = RuleEngine::conference().order_unscheduled(&ctx).unwrap();
        assert_eq!(ids(&ctx, &order), vec!["todo"]);
    }

    #[test]
    fn test_stable_ties_keep_collection_order() {
        let ctx = conference()
            .with_session(Session::new("b").with_type("paper").with_content("P1"))
            .with_session(Session::new("a").with_type("paper").with_content("P2"));
        let order = RuleEngine::conference().order_unscheduled(&ctx).unwrap();
        assert_eq!(ids(&ctx, &order), vec!["b", "a"]);
    }

    #[test]
    fn test_by_id_tie_breaker() {
        let ctx = conference()
            .with_session(Session::new("b").with_type("paper").with_content("P1"))
            .with_session(Session::new("a").with_type("paper").with_content("P2"));
        let engine = RuleEngine::conference().with_final_tie_breaker(TieBreaker::ById);
        let order = engine.order_unscheduled(&ctx).unwrap();
        assert_eq!(ids(&ctx, &order), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_engine_keeps_input_order() {
        let ctx = conference()
            .with_session(Session::new("x"))
            .with_event(Event::new("y"));
        let order = RuleEngine::new().order_unscheduled(&ctx).unwrap();
        assert_eq!(ids(&ctx, &order), vec!["x", "y"]);
    }

    #[test]
    fn test_evaluate_scores() {
        let ctx = conference()
            .with_session(Session::new("S").with_type("workshop").with_content("W1"));
        let scores = RuleEngine::conference().evaluate(ItemRef::Session(0), &ctx).unwrap();
        assert_eq!(scores.len(), 3);
        assert!((scores[0] - 1.0).abs() < 1e-10); // session
        assert!((scores[1] - 4.0).abs() < 1e-10); // workshop position
        assert!((scores[2] - 3_600_000.0).abs() < 1e-10);
    }

    #[test]
    fn test_unknown_content_fails_the_sort() {
        let ctx = conference().with_session(Session::new("S").with_content("ghost"));
        assert!(RuleEngine::conference().order_unscheduled(&ctx).is_err());
    }
}
