//! Graph-specific error types.
//!
//! Every variant is a broken contract on the caller's side (a topology
//! generator or importer asked for something impossible). An unreachable
//! destination is not an error; path queries return `None` for it.

use ocn_core::{NodeId, PortNumber};
use thiserror::Error;

use crate::node::LinkDirection;

pub type GraphResult<T> = Result<T, GraphError>;

/// Graph construction and query errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A live node already uses this name.
    #[error("Node name {name:?} is already registered")]
    DuplicateName { name: String },

    /// The identity counter ran out of values.
    #[error("Node identity counter exhausted")]
    IdExhausted,

    /// Released a name that was never registered (or already released).
    #[error("Node name {name:?} is not registered")]
    UnknownName { name: String },

    /// An id that does not refer to a live node in this network.
    #[error("Node {id} does not exist in this network")]
    UnknownNode { id: NodeId },

    /// Tried to destroy a node that still has links.
    #[error("Node {name:?} still has {links} link(s) and cannot be removed")]
    NodeInUse { name: String, links: usize },

    /// Two links claimed the same port on one node.
    #[error("{direction} port {port} on node {node:?} is already in use")]
    PortInUse {
        node: String,
        direction: LinkDirection,
        port: PortNumber,
    },

    /// No link between the node and the requested neighbor.
    #[error("Node {node:?} has no {direction} port for {neighbor:?} (ports: [{ports}])")]
    PortNotFound {
        node: String,
        neighbor: String,
        direction: LinkDirection,
        ports: String,
    },
}
