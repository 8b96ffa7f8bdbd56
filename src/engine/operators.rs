use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use super::value::FieldValue;

/// Comparison operator a rule applies between a field and its literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
}

impl Operator {
    pub const ALL: [Operator; 10] = [
        Operator::Equals,
        Operator::NotEquals,
        Operator::GreaterThan,
        Operator::GreaterThanOrEqual,
        Operator::LessThan,
        Operator::LessThanOrEqual,
        Operator::Contains,
        Operator::NotContains,
        Operator::StartsWith,
        Operator::EndsWith,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Operator::Equals => "EQUALS",
            Operator::NotEquals => "NOT_EQUALS",
            Operator::GreaterThan => "GREATER_THAN",
            Operator::GreaterThanOrEqual => "GREATER_THAN_OR_EQUAL",
            Operator::LessThan => "LESS_THAN",
            Operator::LessThanOrEqual => "LESS_THAN_OR_EQUAL",
            Operator::Contains => "CONTAINS",
            Operator::NotContains => "NOT_CONTAINS",
            Operator::StartsWith => "STARTS_WITH",
            Operator::EndsWith => "ENDS_WITH",
        }
    }

    /// Evaluate `field <op> literal`.
    ///
    /// Fails safe: an absent field, a literal that does not parse as the
    /// field's type, or an operator that is undefined for the field's type
    /// all yield `false`.
    pub fn evaluate(self, field: Option<&FieldValue>, literal: &str) -> bool {
        let Some(field) = field else {
            return false;
        };

        match self {
            Operator::Equals => equals_literal(field, literal).unwrap_or(false),
            Operator::NotEquals => equals_literal(field, literal).is_some_and(|eq| !eq),
            Operator::GreaterThan => compare_literal(field, literal).is_some_and(Ordering::is_gt),
            Operator::GreaterThanOrEqual => {
                compare_literal(field, literal).is_some_and(Ordering::is_ge)
            }
            Operator::LessThan => compare_literal(field, literal).is_some_and(Ordering::is_lt),
            Operator::LessThanOrEqual => {
                compare_literal(field, literal).is_some_and(Ordering::is_le)
            }
            Operator::Contains => field.as_text().is_some_and(|s| s.contains(literal)),
            Operator::NotContains => field.as_text().is_some_and(|s| !s.contains(literal)),
            Operator::StartsWith => field.as_text().is_some_and(|s| s.starts_with(literal)),
            Operator::EndsWith => field.as_text().is_some_and(|s| s.ends_with(literal)),
        }
    }
}

fn equals_literal(field: &FieldValue, literal: &str) -> Option<bool> {
    field.coerce_literal(literal).map(|expected| *field == expected)
}

fn compare_literal(field: &FieldValue, literal: &str) -> Option<Ordering> {
    field
        .coerce_literal(literal)
        .and_then(|expected| field.compare(&expected))
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Operator code -> evaluator table.
///
/// Built once and only read afterwards, so one registry can be shared by any
/// number of concurrent evaluations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorRegistry {
    evaluators: BTreeMap<&'static str, Operator>,
}

impl OperatorRegistry {
    /// An empty registry. Every lookup misses until operators are registered.
    pub fn empty() -> Self {
        Self {
            evaluators: BTreeMap::new(),
        }
    }

    /// Registry holding every known operator.
    pub fn standard() -> Self {
        Self::with_operators(Operator::ALL)
    }

    pub fn with_operators(operators: impl IntoIterator<Item = Operator>) -> Self {
        let mut registry = Self::empty();
        for operator in operators {
            registry.register(operator);
        }
        registry
    }

    /// Register an operator under its code. Returns the previous entry, if any.
    pub fn register(&mut self, operator: Operator) -> Option<Operator> {
        self.evaluators.insert(operator.code(), operator)
    }

    /// Look up an operator by its exact code. Unknown codes return `None`.
    pub fn lookup(&self, code: &str) -> Option<Operator> {
        self.evaluators.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.evaluators.contains_key(code)
    }

    /// Registered codes in sorted order.
    pub fn codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.evaluators.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.evaluators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evaluators.is_empty()
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
