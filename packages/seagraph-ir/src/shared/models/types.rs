//! Static types and literal values
//!
//! Type inference runs before IR construction; the generator only copies the
//! annotations it finds on the AST onto data nodes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Static type annotation attached to expressions and data nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaticType {
    Integer,
    Decimal,
    String,
    Boolean,
    Null,
    Void,
    Any,
}

impl StaticType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Null => "null",
            Self::Void => "void",
            Self::Any => "any",
        }
    }
}

impl fmt::Display for StaticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Literal value of a Constant node
///
/// Decimals compare and hash by bit pattern so that a value can key the
/// hashed dedup table with the same answer the linear scan gives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ConstValue {
    Integer(i64),
    Decimal(f64),
    String(String),
    Boolean(bool),
    Null,
}

impl ConstValue {
    /// Type a literal of this value has when the AST does not say otherwise
    pub fn natural_type(&self) -> StaticType {
        match self {
            Self::Integer(_) => StaticType::Integer,
            Self::Decimal(_) => StaticType::Decimal,
            Self::String(_) => StaticType::String,
            Self::Boolean(_) => StaticType::Boolean,
            Self::Null => StaticType::Null,
        }
    }
}

impl PartialEq for ConstValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Decimal(a), Self::Decimal(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Null, Self::Null) => true,
            _ => false,
        }
    }
}

impl Eq for ConstValue {}

impl Hash for ConstValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Integer(v) => v.hash(state),
            Self::Decimal(v) => v.to_bits().hash(state),
            Self::String(v) => v.hash(state),
            Self::Boolean(v) => v.hash(state),
            Self::Null => {}
        }
    }
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{}", v),
            Self::Decimal(v) => write!(f, "{}", v),
            Self::String(v) => write!(f, "{:?}", v),
            Self::Boolean(v) => write!(f, "{}", v),
            Self::Null => f.write_str("null"),
        }
    }
}
