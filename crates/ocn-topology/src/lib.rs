//! ocn-topology: producers and consumers of on-chip network graphs.
//!
//! Generators build regular topologies through the `ocn-graph` node and edge
//! API; `import` reads the line-oriented edge format; `config` loads a
//! declarative topology description; `report` renders a built network.

pub mod cmesh;
pub mod config;
pub mod crossbar;
pub mod error;
pub mod import;
pub mod mesh;
pub mod report;
pub mod site;

pub use cmesh::concentrated_mesh;
pub use config::{TopologyConfig, TopologyKind, load_config};
pub use crossbar::{crossbar, crossmesh};
pub use error::{ParsedTokens, TopologyError, TopologyResult};
pub use import::{EdgeLine, LineError, import_file, import_into, import_str, parse_edge_line};
pub use mesh::{mesh, offset_mesh};
pub use report::{ReportFormat, render};
pub use site::{GridPos, Placed, Site, grid};
