//! Operator enumeration
//!
//! Operators take part in BinaryOp/UnaryOp identity and give those nodes
//! their labels. `Assign` never reaches the graph: the generator turns it
//! into a variable definition.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Op {
    // Arithmetic
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulus,

    // Comparison
    L,
    G,
    LE,
    GE,
    EQ,
    NE,

    // Logical
    And,
    Or,
    Not,

    // Bitwise
    BitAnd,
    BitOr,
    BitXOr,
    BitNot,
    LeftShift,
    RightShift,

    // Increment / decrement
    Inc,
    Dec,

    Assign,
}

impl Op {
    /// Operators that can appear in a unary expression
    pub fn is_unary_capable(&self) -> bool {
        matches!(
            self,
            Op::Plus | Op::Minus | Op::Not | Op::BitNot | Op::Inc | Op::Dec
        )
    }

    pub fn is_comparison(&self) -> bool {
        matches!(self, Op::L | Op::G | Op::LE | Op::GE | Op::EQ | Op::NE)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Op::Plus => "Plus",
            Op::Minus => "Minus",
            Op::Multiply => "Multiply",
            Op::Divide => "Divide",
            Op::Modulus => "Modulus",
            Op::L => "L",
            Op::G => "G",
            Op::LE => "LE",
            Op::GE => "GE",
            Op::EQ => "EQ",
            Op::NE => "NE",
            Op::And => "And",
            Op::Or => "Or",
            Op::Not => "Not",
            Op::BitAnd => "BitAnd",
            Op::BitOr => "BitOr",
            Op::BitXOr => "BitXOr",
            Op::BitNot => "BitNot",
            Op::LeftShift => "LeftShift",
            Op::RightShift => "RightShift",
            Op::Inc => "Inc",
            Op::Dec => "Dec",
            Op::Assign => "Assign",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
