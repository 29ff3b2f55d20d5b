use bn_core::NodeId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("{0} is not a live node")]
    NodeNotFound(NodeId),

    #[error("{0} already has a parent; detach it first")]
    AlreadyAttached(NodeId),

    #[error("attaching {child} under {parent} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },

    #[error("the scene root cannot be detached or destroyed")]
    RootNode,
}

pub type TreeResult<T> = Result<T, TreeError>;
