//! IR generation errors
//!
//! Two classes:
//! - user-facing: an unresolved variable reference (reported with its span)
//! - internal: the AST or the graph broke an invariant the generator relies
//!   on; these are compiler bugs and abort the current function

use thiserror::Error;

use crate::features::ir_graph::GraphError;
use crate::shared::models::Span;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    /// Read of a variable with no visible definition on some path
    #[error("unresolved variable '{name}' at {span}")]
    UnresolvedVariable { name: String, span: Span },

    /// Internal consistency violation (compiler bug)
    #[error("internal invariant violated: {expectation}")]
    InvariantViolation { expectation: String },

    #[error("nesting depth {depth} exceeds the configured limit of {limit}")]
    NestingTooDeep { depth: usize, limit: usize },

    #[error("function '{name}' was generated twice")]
    DuplicateFunction { name: String },

    #[error("graph invariant violated: {0}")]
    Graph(#[from] GraphError),
}

impl GenerationError {
    pub fn invariant(expectation: impl Into<String>) -> Self {
        Self::InvariantViolation {
            expectation: expectation.into(),
        }
    }

    /// Compiler bug rather than a problem with the input program
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::InvariantViolation { .. } | Self::Graph(_) | Self::DuplicateFunction { .. }
        )
    }
}

pub type GenerationResult<T> = Result<T, GenerationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::ir_graph::NodeId;

    #[test]
    fn test_error_classes() {
        let unresolved = GenerationError::UnresolvedVariable {
            name: "x".into(),
            span: Span::new(3, 5, 3, 6),
        };
        assert!(!unresolved.is_internal());
        assert!(unresolved.to_string().contains("'x'"));

        let nesting = GenerationError::NestingTooDeep { depth: 9, limit: 8 };
        assert!(!nesting.is_internal());

        let graph: GenerationError = GraphError::UnknownNode(NodeId(4)).into();
        assert!(graph.is_internal());
        assert!(GenerationError::invariant("left side is a variable").is_internal());
    }
}
