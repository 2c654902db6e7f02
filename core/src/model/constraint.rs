#![deny(missing_docs)]

//! # Constraints
//!
//! Leaf value validators attached to a [`Parameter`](super::Parameter).
//!
//! Every evaluator is total: a value of the wrong JSON type evaluates to
//! `false` instead of failing.

use regex::Regex;
use serde_json::{json, Number, Value as JsonValue};
use std::collections::HashSet;
use std::fmt;

const MULTIPLE_OF_EPSILON: f64 = 1e-9;

/// A compiled `pattern` constraint.
///
/// The source text is kept so that the constraint can be rendered back and
/// compared. An invalid expression never matches.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Option<Regex>,
}

impl Pattern {
    /// Compiles a pattern. Compilation failures are kept as a never-matching pattern.
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let regex = Regex::new(&source).ok();
        Self { source, regex }
    }

    /// The pattern as declared.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether `text` contains a match.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.as_ref().is_some_and(|re| re.is_match(text))
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern({:?})", self.source)
    }
}

/// A single validation rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// `value <= bound`
    Maximum(f64),
    /// `value >= bound`
    Minimum(f64),
    /// `value < bound`
    ExclusiveMaximum(f64),
    /// `value > bound`
    ExclusiveMinimum(f64),
    /// String (char count) or array length `<= bound`.
    MaxLength(u64),
    /// String (char count) or array length `>= bound`.
    MinLength(u64),
    /// The string contains a match of the expression.
    Pattern(Pattern),
    /// Array length `<= bound`.
    MaxItems(u64),
    /// Array length `>= bound`.
    MinItems(u64),
    /// When `true`, array elements are pairwise distinct.
    UniqueItems(bool),
    /// The value equals one of the members.
    Enum(Vec<JsonValue>),
    /// `value % divisor == 0` within floating point tolerance.
    MultipleOf(f64),
}

impl Constraint {
    /// Builds the constraint matching a JSON-Schema keyword.
    ///
    /// Returns `None` for unknown keywords and for values of the wrong shape.
    /// `exclusiveMaximum`/`exclusiveMinimum` are not handled here because
    /// they qualify a sibling keyword; see `from_exclusive_flag`.
    pub fn from_keyword(keyword: &str, value: &JsonValue) -> Option<Self> {
        let constraint = match keyword {
            "maximum" => Constraint::Maximum(value.as_f64()?),
            "minimum" => Constraint::Minimum(value.as_f64()?),
            "maxLength" => Constraint::MaxLength(value.as_u64()?),
            "minLength" => Constraint::MinLength(value.as_u64()?),
            "pattern" => Constraint::Pattern(Pattern::new(value.as_str()?)),
            "maxItems" => Constraint::MaxItems(value.as_u64()?),
            "minItems" => Constraint::MinItems(value.as_u64()?),
            "uniqueItems" => Constraint::UniqueItems(value.as_bool()?),
            "enum" => Constraint::Enum(value.as_array()?.clone()),
            "multipleOf" => Constraint::MultipleOf(value.as_f64()?),
            _ => return None,
        };
        Some(constraint)
    }

    /// Builds an exclusive bound from a Swagger 2.0 boolean flag and its sibling bound.
    ///
    /// `keyword` is `exclusiveMaximum` or `exclusiveMinimum`. The flag must be
    /// `true` and the sibling (`maximum`/`minimum`) numeric.
    pub fn from_exclusive_flag(
        keyword: &str,
        flag: &JsonValue,
        sibling: Option<&JsonValue>,
    ) -> Option<Self> {
        if flag.as_bool() != Some(true) {
            return None;
        }
        let bound = sibling?.as_f64()?;
        match keyword {
            "exclusiveMaximum" => Some(Constraint::ExclusiveMaximum(bound)),
            "exclusiveMinimum" => Some(Constraint::ExclusiveMinimum(bound)),
            _ => None,
        }
    }

    /// The JSON-Schema keyword of this constraint.
    pub fn name(&self) -> &'static str {
        match self {
            Constraint::Maximum(_) => "maximum",
            Constraint::Minimum(_) => "minimum",
            Constraint::ExclusiveMaximum(_) => "exclusiveMaximum",
            Constraint::ExclusiveMinimum(_) => "exclusiveMinimum",
            Constraint::MaxLength(_) => "maxLength",
            Constraint::MinLength(_) => "minLength",
            Constraint::Pattern(_) => "pattern",
            Constraint::MaxItems(_) => "maxItems",
            Constraint::MinItems(_) => "minItems",
            Constraint::UniqueItems(_) => "uniqueItems",
            Constraint::Enum(_) => "enum",
            Constraint::MultipleOf(_) => "multipleOf",
        }
    }

    /// Checks `value` against the rule. Never panics.
    pub fn evaluate(&self, value: &JsonValue) -> bool {
        match self {
            Constraint::Maximum(bound) => numeric(value).is_some_and(|v| v <= *bound),
            Constraint::Minimum(bound) => numeric(value).is_some_and(|v| v >= *bound),
            Constraint::ExclusiveMaximum(bound) => numeric(value).is_some_and(|v| v < *bound),
            Constraint::ExclusiveMinimum(bound) => numeric(value).is_some_and(|v| v > *bound),
            Constraint::MaxLength(bound) => length(value).is_some_and(|len| len <= *bound),
            Constraint::MinLength(bound) => length(value).is_some_and(|len| len >= *bound),
            Constraint::Pattern(pattern) => value.as_str().is_some_and(|s| pattern.is_match(s)),
            Constraint::MaxItems(bound) => item_count(value).is_some_and(|len| len <= *bound),
            Constraint::MinItems(bound) => item_count(value).is_some_and(|len| len >= *bound),
            Constraint::UniqueItems(false) => true,
            Constraint::UniqueItems(true) => value.as_array().is_some_and(|items| {
                let mut seen = HashSet::new();
                items.iter().all(|item| seen.insert(item.to_string()))
            }),
            Constraint::Enum(members) => members.iter().any(|m| json_eq(m, value)),
            Constraint::MultipleOf(divisor) => numeric(value).is_some_and(|v| {
                if *divisor == 0.0 {
                    return false;
                }
                let ratio = v / divisor;
                (ratio - ratio.round()).abs() < MULTIPLE_OF_EPSILON
            }),
        }
    }

    /// Renders the constraint as a JSON-Schema fragment, e.g. `{"minimum": 3}`.
    ///
    /// Exclusive bounds render in Swagger 2.0 form:
    /// `{"maximum": 5, "exclusiveMaximum": true}`.
    pub fn to_constraint_object(&self) -> JsonValue {
        match self {
            Constraint::Maximum(v) => json!({ "maximum": number(*v) }),
            Constraint::Minimum(v) => json!({ "minimum": number(*v) }),
            Constraint::ExclusiveMaximum(v) => {
                json!({ "maximum": number(*v), "exclusiveMaximum": true })
            }
            Constraint::ExclusiveMinimum(v) => {
                json!({ "minimum": number(*v), "exclusiveMinimum": true })
            }
            Constraint::MaxLength(v) => json!({ "maxLength": v }),
            Constraint::MinLength(v) => json!({ "minLength": v }),
            Constraint::Pattern(p) => json!({ "pattern": p.as_str() }),
            Constraint::MaxItems(v) => json!({ "maxItems": v }),
            Constraint::MinItems(v) => json!({ "minItems": v }),
            Constraint::UniqueItems(v) => json!({ "uniqueItems": v }),
            Constraint::Enum(members) => json!({ "enum": members }),
            Constraint::MultipleOf(v) => json!({ "multipleOf": number(*v) }),
        }
    }
}

/// Numeric view of a value. `NaN` and non-numbers fail closed.
fn numeric(value: &JsonValue) -> Option<f64> {
    value.as_f64().filter(|v| !v.is_nan())
}

fn length(value: &JsonValue) -> Option<u64> {
    match value {
        JsonValue::String(s) => Some(s.chars().count() as u64),
        JsonValue::Array(items) => Some(items.len() as u64),
        _ => None,
    }
}

fn item_count(value: &JsonValue) -> Option<u64> {
    value.as_array().map(|items| items.len() as u64)
}

/// Renders a bound as an integer when it has no fractional part.
fn number(v: f64) -> JsonValue {
    if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        JsonValue::Number(Number::from(v as i64))
    } else {
        Number::from_f64(v).map_or(JsonValue::Null, JsonValue::Number)
    }
}

/// Equality that treats `1` and `1.0` as the same number.
pub(crate) fn json_eq(a: &JsonValue, b: &JsonValue) -> bool {
    match (a, b) {
        (JsonValue::Number(x), JsonValue::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(Constraint::Maximum(5.0).evaluate(&json!(5)));
        assert!(!Constraint::Maximum(5.0).evaluate(&json!(5.5)));
        assert!(!Constraint::ExclusiveMaximum(5.0).evaluate(&json!(5)));
        assert!(Constraint::Minimum(3.0).evaluate(&json!(3)));
        assert!(Constraint::ExclusiveMinimum(3.0).evaluate(&json!(3.01)));
    }

    #[test]
    fn test_wrong_types_fail_closed() {
        assert!(!Constraint::Maximum(5.0).evaluate(&json!("4")));
        assert!(!Constraint::MinLength(1).evaluate(&json!(12)));
        assert!(!Constraint::Pattern(Pattern::new("^a")).evaluate(&json!(null)));
        assert!(!Constraint::MaxItems(2).evaluate(&json!({"a": 1})));
        assert!(!Constraint::MultipleOf(2.0).evaluate(&json!(true)));
        assert!(!Constraint::UniqueItems(true).evaluate(&json!("abc")));
    }

    #[test]
    fn test_lengths_count_chars() {
        assert!(Constraint::MaxLength(3).evaluate(&json!("été")));
        assert!(Constraint::MinLength(2).evaluate(&json!([1, 2])));
        assert!(!Constraint::MinLength(3).evaluate(&json!("ab")));
    }

    #[test]
    fn test_pattern() {
        let c = Constraint::Pattern(Pattern::new("^[a-z]+$"));
        assert!(c.evaluate(&json!("abc")));
        assert!(!c.evaluate(&json!("ab1")));

        let broken = Constraint::Pattern(Pattern::new("(unclosed"));
        assert!(!broken.evaluate(&json!("(unclosed")));
        assert_eq!(
            broken.to_constraint_object(),
            json!({ "pattern": "(unclosed" })
        );
    }

    #[test]
    fn test_items() {
        assert!(Constraint::MaxItems(2).evaluate(&json!([1, 2])));
        assert!(!Constraint::MinItems(3).evaluate(&json!([1, 2])));
        assert!(Constraint::UniqueItems(true).evaluate(&json!([1, 2, "1"])));
        assert!(!Constraint::UniqueItems(true).evaluate(&json!([{"a": 1}, {"a": 1}])));
        assert!(Constraint::UniqueItems(false).evaluate(&json!([1, 1])));
    }

    #[test]
    fn test_enum_numeric_equality() {
        let c = Constraint::Enum(vec![json!(1), json!("two")]);
        assert!(c.evaluate(&json!(1.0)));
        assert!(c.evaluate(&json!("two")));
        assert!(!c.evaluate(&json!("1")));
    }

    #[test]
    fn test_multiple_of_tolerance() {
        let c = Constraint::MultipleOf(0.1);
        assert!(c.evaluate(&json!(0.3)));
        assert!(!c.evaluate(&json!(0.35)));
        assert!(!Constraint::MultipleOf(0.0).evaluate(&json!(0)));
    }

    #[test]
    fn test_from_keyword() {
        assert_eq!(
            Constraint::from_keyword("minimum", &json!(3)),
            Some(Constraint::Minimum(3.0))
        );
        assert_eq!(Constraint::from_keyword("minimum", &json!("3")), None);
        assert_eq!(Constraint::from_keyword("x-custom", &json!(3)), None);
    }

    #[test]
    fn test_exclusive_flag() {
        assert_eq!(
            Constraint::from_exclusive_flag("exclusiveMaximum", &json!(true), Some(&json!(10))),
            Some(Constraint::ExclusiveMaximum(10.0))
        );
        assert_eq!(
            Constraint::from_exclusive_flag("exclusiveMaximum", &json!(false), Some(&json!(10))),
            None
        );
        assert_eq!(
            Constraint::from_exclusive_flag("exclusiveMinimum", &json!(true), None),
            None
        );
    }

    #[test]
    fn test_constraint_objects() {
        assert_eq!(
            Constraint::Minimum(3.0).to_constraint_object(),
            json!({ "minimum": 3 })
        );
        assert_eq!(
            Constraint::MultipleOf(0.5).to_constraint_object(),
            json!({ "multipleOf": 0.5 })
        );
        assert_eq!(
            Constraint::ExclusiveMinimum(1.0).to_constraint_object(),
            json!({ "minimum": 1, "exclusiveMinimum": true })
        );
    }
}
