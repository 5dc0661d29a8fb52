//! Graph consistency errors
//!
//! Every variant is an internal invariant violation: a well-formed generator
//! never triggers one.

use thiserror::Error;

use super::node::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("node {0} does not exist in this graph")]
    UnknownNode(NodeId),

    #[error("node {0} is not a data node")]
    NotDataNode(NodeId),

    #[error("node {0} is not a control node")]
    NotControlNode(NodeId),

    #[error("node {node} ({kind}) has no forward edge to link")]
    NoForwardEdge { node: NodeId, kind: &'static str },

    #[error("forward edge of node {from} is already linked to {existing}")]
    AlreadyLinked { from: NodeId, existing: NodeId },

    #[error("node {node} already has predecessor {existing}")]
    PredecessorAlreadySet { node: NodeId, existing: NodeId },

    #[error("node {0} is not a Merge or LoopBegin")]
    NotAMerge(NodeId),

    #[error("node {0} is not an incomplete phi")]
    NotIncompletePhi(NodeId),

    #[error("control node {0} is not reachable from any Begin/Merge")]
    DetachedControl(NodeId),
}

pub type GraphResult<T> = Result<T, GraphError>;
