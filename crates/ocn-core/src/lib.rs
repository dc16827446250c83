//! ocn-core: stable foundation for the on-chip network path tools.
//!
//! Contains:
//! - ids (compact node identities handed out by the identity registry)
//! - port (per-node link slot numbers)
//! - cost (path cost arithmetic)
//! - error (shared error types)

pub mod cost;
pub mod error;
pub mod ids;
pub mod port;

// Re-exports: nice ergonomics for downstream crates
pub use cost::*;
pub use error::{OcnError, OcnResult};
pub use ids::*;
pub use port::*;
