//! Declarative topology descriptions loaded from YAML or JSON.
//!
//! ```yaml
//! kind: concentrated_mesh
//! width: 4
//! height: 4
//! concentration: 2
//! link_cost: 1
//! ```

use std::path::{Path, PathBuf};

use ocn_core::{Cost, DEFAULT_LINK_COST};
use ocn_graph::Network;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{TopologyError, TopologyResult};
use crate::site::Site;
use crate::{concentrated_mesh, crossbar, crossmesh, import_file, mesh, offset_mesh};

/// Which topology to build, with its dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TopologyKind {
    Mesh {
        width: usize,
        height: usize,
    },
    OffsetMesh {
        width: usize,
        height: usize,
    },
    ConcentratedMesh {
        width: usize,
        height: usize,
        concentration: usize,
    },
    Crossbar {
        count: usize,
    },
    Crossmesh {
        width: usize,
        height: usize,
        count: usize,
    },
    /// Edge list in the line-oriented import format.
    File {
        path: PathBuf,
    },
}

/// A topology description plus the cost given to every generated link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyConfig {
    #[serde(flatten)]
    pub kind: TopologyKind,

    /// Ignored for `file`, whose lines carry their own costs.
    #[serde(default = "default_link_cost")]
    pub link_cost: Cost,
}

fn default_link_cost() -> Cost {
    DEFAULT_LINK_COST
}

impl TopologyConfig {
    pub fn new(kind: TopologyKind) -> Self {
        Self {
            kind,
            link_cost: DEFAULT_LINK_COST,
        }
    }

    pub fn with_link_cost(mut self, link_cost: Cost) -> Self {
        self.link_cost = link_cost;
        self
    }

    /// Generate or import the described network.
    pub fn build(&self) -> TopologyResult<Network<Site>> {
        let cost = self.link_cost;
        match &self.kind {
            TopologyKind::Mesh { width, height } => mesh(*width, *height, cost),
            TopologyKind::OffsetMesh { width, height } => offset_mesh(*width, *height, cost),
            TopologyKind::ConcentratedMesh {
                width,
                height,
                concentration,
            } => concentrated_mesh(*width, *height, *concentration, cost),
            TopologyKind::Crossbar { count } => crossbar(*count, cost),
            TopologyKind::Crossmesh {
                width,
                height,
                count,
            } => crossmesh(*width, *height, *count, cost),
            TopologyKind::File { path } => import_file(path),
        }
    }

    /// Resolve a relative `file` path against `base`.
    fn anchor(mut self, base: &Path) -> Self {
        if let TopologyKind::File { path } = &mut self.kind {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }
}

/// Load a topology description, choosing the format by file extension.
///
/// A relative `file` path inside the description is taken relative to the
/// description's own directory.
pub fn load_config(path: &Path) -> TopologyResult<TopologyConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: TopologyConfig = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
        Some("json") => serde_json::from_str(&content)?,
        _ => {
            return Err(TopologyError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
    };
    debug!(path = %path.display(), kind = ?config.kind, "loaded topology config");

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(config.anchor(base))
}
