//! ocn-graph: node/path model and all-pairs shortest paths for on-chip networks.
//!
//! Provides:
//! - Path: an immutable route with concatenation
//! - Node: direct links on numbered ports plus a lazily rebuilt path table
//! - Network: the node arena, edge insertion and path queries
//! - IdentityRegistry: unique names and ids per network
//!
//! # Example
//!
//! ```
//! use ocn_graph::Network;
//!
//! let mut net = Network::new();
//! let a = net.add_node("A", ()).unwrap();
//! let b = net.add_node("B", ()).unwrap();
//! let c = net.add_node("C", ()).unwrap();
//! net.add_direct_edge(a, b, 5).unwrap();
//! net.add_direct_edge(b, c, 3).unwrap();
//! net.add_direct_edge(a, c, 100).unwrap();
//!
//! let path = net.search(a, c).unwrap().unwrap();
//! assert_eq!(path.cost(), 8);
//! assert_eq!(path.steps(), &[b]);
//! ```

pub mod error;
pub mod network;
pub mod node;
pub mod path;
pub mod registry;
pub(crate) mod relax;

// Re-exports for ergonomics
pub use error::{GraphError, GraphResult};
pub use network::Network;
pub use node::{Link, LinkDirection, Node};
pub use path::Path;
pub use registry::IdentityRegistry;
