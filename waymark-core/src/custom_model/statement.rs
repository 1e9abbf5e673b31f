//! Conditional statements adjusting speed and priority.
//!
//! A statement serialises as a two-entry JSON object pairing a keyword with
//! its condition and an operation with its value:
//!
//! ```json
//! {"if": "surface == DIRT", "multiply_by": "0.7"}
//! ```

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Branch keyword of a [`Statement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// Opens a conditional block.
    If,
    /// Continues a block when earlier branches did not match.
    ElseIf,
    /// Closes a block; its condition is always empty.
    Else,
}

impl Keyword {
    /// The JSON key for this keyword.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::If => "if",
            Self::ElseIf => "else_if",
            Self::Else => "else",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "if" => Some(Self::If),
            "else_if" => Some(Self::ElseIf),
            "else" => Some(Self::Else),
            _ => None,
        }
    }
}

/// Operation applied to the matched value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Cap the value at the given expression.
    Limit,
    /// Multiply the value by the given expression.
    Multiply,
    /// Add the given expression to the value.
    Add,
}

impl Op {
    /// The JSON key for this operation.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Limit => "limit_to",
            Self::Multiply => "multiply_by",
            Self::Add => "add",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "limit_to" => Some(Self::Limit),
            "multiply_by" => Some(Self::Multiply),
            "add" => Some(Self::Add),
            _ => None,
        }
    }
}

/// One rule of a custom model.
///
/// # Examples
///
/// ```
/// use waymark_core::{Op, Statement};
///
/// let rule = Statement::if_then("road_class == MOTORWAY", Op::Limit, "80");
/// let json = serde_json::to_string(&rule)?;
/// assert_eq!(json, r#"{"if":"road_class == MOTORWAY","limit_to":"80"}"#);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Statement {
    /// Branch keyword.
    pub keyword: Keyword,
    /// Boolean expression evaluated by the service. Empty for `else`.
    pub condition: String,
    /// Operation to apply when the condition holds.
    pub op: Op,
    /// Expression the operation uses, kept as text.
    pub value: String,
}

impl Statement {
    /// An `if` statement.
    #[must_use]
    pub fn if_then(condition: impl Into<String>, op: Op, value: impl Into<String>) -> Self {
        Self {
            keyword: Keyword::If,
            condition: condition.into(),
            op,
            value: value.into(),
        }
    }

    /// An `else_if` statement.
    #[must_use]
    pub fn else_if_then(condition: impl Into<String>, op: Op, value: impl Into<String>) -> Self {
        Self {
            keyword: Keyword::ElseIf,
            condition: condition.into(),
            op,
            value: value.into(),
        }
    }

    /// An `else` statement.
    #[must_use]
    pub fn else_then(op: Op, value: impl Into<String>) -> Self {
        Self {
            keyword: Keyword::Else,
            condition: String::new(),
            op,
            value: value.into(),
        }
    }
}

impl Serialize for Statement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.keyword.name(), &self.condition)?;
        map.serialize_entry(self.op.name(), &self.value)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for Statement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(StatementVisitor)
    }
}

struct StatementVisitor;

impl<'de> Visitor<'de> for StatementVisitor {
    type Value = Statement;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a statement object with one keyword and one operation")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut branch: Option<(Keyword, String)> = None;
        let mut operation: Option<(Op, String)> = None;

        while let Some(key) = access.next_key::<String>()? {
            if let Some(keyword) = Keyword::from_name(&key) {
                if branch.is_some() {
                    return Err(de::Error::custom("statement has more than one keyword"));
                }
                let condition: ScalarText = access.next_value()?;
                branch = Some((keyword, condition.0));
            } else if let Some(op) = Op::from_name(&key) {
                if operation.is_some() {
                    return Err(de::Error::custom("statement has more than one operation"));
                }
                let value: ScalarText = access.next_value()?;
                operation = Some((op, value.0));
            } else {
                return Err(de::Error::unknown_field(
                    &key,
                    &["if", "else_if", "else", "limit_to", "multiply_by", "add"],
                ));
            }
        }

        let Some((keyword, condition)) = branch else {
            return Err(de::Error::custom("statement is missing if, else_if or else"));
        };
        let Some((op, value)) = operation else {
            return Err(de::Error::custom(
                "statement is missing limit_to, multiply_by or add",
            ));
        };
        Ok(Statement {
            keyword,
            condition,
            op,
            value,
        })
    }
}

/// Accepts strings, numbers, booleans and `null` and keeps their text form.
///
/// The service accepts `"multiply_by": 0.5` as readily as `"0.5"`.
struct ScalarText(String);

impl<'de> Deserialize<'de> for ScalarText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Null => Ok(Self(String::new())),
            serde_json::Value::String(text) => Ok(Self(text)),
            serde_json::Value::Number(number) => Ok(Self(number.to_string())),
            serde_json::Value::Bool(flag) => Ok(Self(flag.to_string())),
            other => Err(de::Error::custom(format!(
                "expected a scalar statement value, found {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Statement::if_then("surface == DIRT", Op::Multiply, "0.7"), r#"{"if":"surface == DIRT","multiply_by":"0.7"}"#)]
    #[case(Statement::else_if_then("road_environment == FERRY", Op::Add, "5"), r#"{"else_if":"road_environment == FERRY","add":"5"}"#)]
    #[case(Statement::else_then(Op::Limit, "30"), r#"{"else":"","limit_to":"30"}"#)]
    fn writes_keyword_and_operation(#[case] statement: Statement, #[case] expected: &str) {
        let encoded = serde_json::to_string(&statement).expect("serialise statement");
        assert_eq!(encoded, expected);
    }

    #[rstest]
    fn reads_operation_before_keyword_and_numeric_value() {
        let statement: Statement =
            serde_json::from_str(r#"{"multiply_by": 0.5, "if": "max_speed > 50"}"#)
                .expect("deserialise statement");
        assert_eq!(
            statement,
            Statement::if_then("max_speed > 50", Op::Multiply, "0.5")
        );
    }

    #[rstest]
    #[case(r#"{"if":"true"}"#)]
    #[case(r#"{"limit_to":"10"}"#)]
    #[case(r#"{"if":"true","else":"","limit_to":"10"}"#)]
    #[case(r#"{"if":"true","limit_to":"10","divide_by":"2"}"#)]
    fn rejects_malformed_statements(#[case] json: &str) {
        assert!(serde_json::from_str::<Statement>(json).is_err());
    }
}
