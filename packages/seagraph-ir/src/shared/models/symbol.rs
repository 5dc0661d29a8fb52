//! Symbols produced by name resolution
//!
//! A `SymbolId` identifies a variable or function uniquely within a program.
//! It keys the VarProxy table, the per-flow binding tables and the IRModule.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::types::StaticType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(pub u32);

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sym#{}", self.0)
    }
}

/// A resolved variable (local or formal parameter)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VarSymbol {
    pub id: SymbolId,
    pub name: String,
    pub ty: StaticType,
}

impl VarSymbol {
    pub fn new(id: SymbolId, name: impl Into<String>, ty: StaticType) -> Self {
        Self {
            id,
            name: name.into(),
            ty,
        }
    }
}

/// A resolved function
///
/// `vars` lists every variable the function declares; the first
/// `num_params` entries are its formal parameters, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSymbol {
    pub id: SymbolId,
    pub name: String,
    pub vars: Vec<VarSymbol>,
    pub num_params: usize,
}

impl FunctionSymbol {
    pub fn new(id: SymbolId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            vars: Vec::new(),
            num_params: 0,
        }
    }

    pub fn params(&self) -> &[VarSymbol] {
        &self.vars[..self.num_params.min(self.vars.len())]
    }

    /// Parameters are never versioned: reads resolve to the Parameter node.
    pub fn is_parameter(&self, var: &VarSymbol) -> bool {
        self.params().iter().any(|p| p.id == var.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_parameter_uses_leading_vars() {
        let a = VarSymbol::new(SymbolId(1), "a", StaticType::Integer);
        let b = VarSymbol::new(SymbolId(2), "b", StaticType::Integer);
        let mut func = FunctionSymbol::new(SymbolId(0), "f");
        func.vars = vec![a.clone(), b.clone()];
        func.num_params = 1;

        assert!(func.is_parameter(&a));
        assert!(!func.is_parameter(&b));
        assert_eq!(func.params().len(), 1);
    }
}
