use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::path::DocumentPath;
use super::token::Token;

/// Time value indexing samples
///
/// Totally ordered through `f64::total_cmp`, so it can key an ordered map.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeCode(f64);

impl TimeCode {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialEq for TimeCode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TimeCode {}

impl PartialOrd for TimeCode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeCode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<f64> for TimeCode {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for TimeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Payload stored in a field
///
/// Values are copied in and out of the store and never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    Token(Token),
    Path(DocumentPath),
    TokenList(Vec<Token>),
    PathList(Vec<DocumentPath>),
    Dictionary(BTreeMap<String, Value>),
    TimeSamples(BTreeMap<TimeCode, Value>),
}

impl Value {
    /// Short type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::Token(_) => "token",
            Value::Path(_) => "path",
            Value::TokenList(_) => "token list",
            Value::PathList(_) => "path list",
            Value::Dictionary(_) => "dictionary",
            Value::TimeSamples(_) => "time samples",
        }
    }

    pub fn as_dictionary(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    pub fn as_time_samples(&self) -> Option<&BTreeMap<TimeCode, Value>> {
        match self {
            Value::TimeSamples(samples) => Some(samples),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

/// Kind of a spec in the document hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecType {
    PseudoRoot,
    Prim,
    Attribute,
    Relationship,
    VariantSet,
    Variant,
}

/// An entry pushed onto or popped from an ordered list field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChildValue {
    Token(Token),
    Path(DocumentPath),
}

impl std::fmt::Display for ChildValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChildValue::Token(token) => write!(f, "{}", token),
            ChildValue::Path(path) => write!(f, "{}", path),
        }
    }
}

/// Field data of one spec
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecData {
    pub spec_type: SpecType,
    pub fields: BTreeMap<Token, Value>,
}

impl SpecData {
    pub fn new(spec_type: SpecType) -> Self {
        Self {
            spec_type,
            fields: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_code_total_order() {
        let mut times = vec![TimeCode::new(2.5), TimeCode::new(-1.0), TimeCode::new(0.0)];
        times.sort();
        let values: Vec<f64> = times.iter().map(TimeCode::value).collect();
        assert_eq!(values, vec![-1.0, 0.0, 2.5]);
        assert_eq!(TimeCode::new(1.0), TimeCode::from(1.0));
    }

    #[test]
    fn test_value_type_names() {
        assert_eq!(Value::from(3_i64).type_name(), "int");
        assert_eq!(Value::Dictionary(BTreeMap::new()).type_name(), "dictionary");
        assert!(Value::from(true).as_dictionary().is_none());
    }
}
