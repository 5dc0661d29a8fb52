//! IR module: one Graph per function

use serde::Serialize;
use std::collections::BTreeMap;

use super::graph::Graph;
use crate::shared::models::SymbolId;

/// A function's finished graph plus the name it was declared with
#[derive(Debug, Clone, Serialize)]
pub struct FunctionGraph {
    pub sym: SymbolId,
    pub name: String,
    pub graph: Graph,
}

/// Function symbol → Graph
///
/// Ordered by symbol id so iteration (and any dump built from it) does not
/// depend on the order functions finished generating.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IRModule {
    functions: BTreeMap<SymbolId, FunctionGraph>,
}

impl IRModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function's graph; a function is registered at most once.
    /// Returns the rejected entry when `sym` already has a graph.
    pub fn insert(&mut self, function: FunctionGraph) -> Result<(), FunctionGraph> {
        if self.functions.contains_key(&function.sym) {
            return Err(function);
        }
        self.functions.insert(function.sym, function);
        Ok(())
    }

    /// Move every graph of `other` into this module
    pub fn absorb(&mut self, other: IRModule) -> Result<(), FunctionGraph> {
        for (_, function) in other.functions {
            self.insert(function)?;
        }
        Ok(())
    }

    pub fn graph(&self, sym: SymbolId) -> Option<&Graph> {
        self.functions.get(&sym).map(|f| &f.graph)
    }

    /// First function declared under `name`
    pub fn graph_by_name(&self, name: &str) -> Option<&Graph> {
        self.functions
            .values()
            .find(|f| f.name == name)
            .map(|f| &f.graph)
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionGraph> {
        self.functions.values()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
