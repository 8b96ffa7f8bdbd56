use std::borrow::Borrow;

use tracing::debug;

use super::derived::DerivedFields;
use super::operators::OperatorRegistry;
use super::resolver::FieldResolver;
use crate::model::{Applicant, LoanApplication, Rule};

/// Evaluates rule lists against one applicant/application pair.
///
/// Stateless apart from its operator registry, which is only read.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    registry: OperatorRegistry,
}

impl RuleEngine {
    pub fn new(registry: OperatorRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &OperatorRegistry {
        &self.registry
    }

    /// Return the enabled rules whose condition holds, in priority order.
    ///
    /// Every enabled rule is evaluated independently. A rule naming an unknown
    /// field or operator is skipped; a literal that does not parse as the
    /// field's type simply does not trigger.
    pub fn evaluate_rules<'r>(
        &self,
        application: &LoanApplication,
        applicant: &Applicant,
        derived: &DerivedFields,
        rules: &'r [Rule],
    ) -> Vec<&'r Rule> {
        let resolver = FieldResolver::new(derived, applicant, application);
        let mut triggered = Vec::new();

        for rule in enabled_rules(rules) {
            let Some(value) = resolver.resolve(&rule.field) else {
                debug!(rule_id = rule.id, field = %rule.field, "skipping rule: unknown field");
                continue;
            };

            let Some(operator) = self.registry.lookup(&rule.operator) else {
                debug!(
                    rule_id = rule.id,
                    operator = %rule.operator,
                    "skipping rule: unknown operator"
                );
                continue;
            };

            let fired = operator.evaluate(Some(&value), &rule.rule_value);
            debug!(
                rule_id = rule.id,
                condition = %rule.condition(),
                actual = %value,
                fired,
                "evaluated rule"
            );

            if fired {
                triggered.push(rule);
            }
        }

        triggered
    }
}

/// Sum of risk points over the triggered rules. No clamping: scores may be
/// negative or exceed 100.
pub fn calculate_risk_score<R: Borrow<Rule>>(triggered: &[R]) -> i32 {
    triggered
        .iter()
        .fold(0i32, |score, rule| score.saturating_add(rule.borrow().risk_points))
}

/// Enabled rules sorted ascending by priority. The sort is stable, so rules
/// sharing a priority keep their input order.
pub fn enabled_rules(rules: &[Rule]) -> Vec<&Rule> {
    let mut enabled: Vec<&Rule> = rules.iter().filter(|rule| rule.enabled).collect();
    enabled.sort_by_key(|rule| rule.priority);
    enabled
}

/// Enabled rules with `priority <= max_priority`, in priority order.
pub fn high_priority_enabled_rules(rules: &[Rule], max_priority: u32) -> Vec<&Rule> {
    enabled_rules(rules)
        .into_iter()
        .filter(|rule| rule.priority <= max_priority)
        .collect()
}

/// Rules targeting `field`, in input order.
pub fn rules_for_field<'r>(rules: &'r [Rule], field: &str) -> Vec<&'r Rule> {
    rules.iter().filter(|rule| rule.field == field).collect()
}

pub fn find_rule(rules: &[Rule], id: u64) -> Option<&Rule> {
    rules.iter().find(|rule| rule.id == id)
}

/// Listing filter over a rule set. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleFilter {
    pub id: Option<u64>,
    pub field: Option<String>,
    pub enabled_only: bool,
    pub max_priority: Option<u32>,
}

impl RuleFilter {
    /// Matching rules. Enabled-only and priority filters return evaluation
    /// order; otherwise input order is kept.
    pub fn apply<'r>(&self, rules: &'r [Rule]) -> Vec<&'r Rule> {
        if let Some(id) = self.id {
            return find_rule(rules, id)
                .filter(|rule| self.matches_rest(rule))
                .into_iter()
                .collect();
        }

        let selected = match (self.max_priority, self.enabled_only) {
            (Some(max), _) => high_priority_enabled_rules(rules, max),
            (None, true) => enabled_rules(rules),
            (None, false) => rules.iter().collect(),
        };

        match &self.field {
            Some(field) => {
                let for_field = rules_for_field(rules, field);
                selected
                    .into_iter()
                    .filter(|rule| for_field.iter().any(|r| std::ptr::eq(*r, *rule)))
                    .collect()
            }
            None => selected,
        }
    }

    fn matches_rest(&self, rule: &Rule) -> bool {
        let enabled_ok = !(self.enabled_only || self.max_priority.is_some()) || rule.enabled;
        let priority_ok = self.max_priority.map_or(true, |max| rule.priority <= max);
        let field_ok = self.field.as_ref().map_or(true, |field| &rule.field == field);
        enabled_ok && priority_ok && field_ok
    }
}
