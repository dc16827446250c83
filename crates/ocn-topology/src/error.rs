//! Error types for topology generation, import and rendering.

use std::fmt;
use std::path::PathBuf;

use ocn_core::OcnError;
use ocn_graph::GraphError;

pub type TopologyResult<T> = Result<T, TopologyError>;

#[derive(thiserror::Error, Debug)]
pub enum TopologyError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("{0}")]
    Core(#[from] OcnError),

    #[error("Line {line}: {reason} in {text:?} (parsed: {parsed})")]
    Import {
        line: usize,
        text: String,
        reason: &'static str,
        parsed: ParsedTokens,
    },

    #[error("Unsupported topology file format: {}", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which of the five tokens of an edge line were read before parsing stopped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParsedTokens {
    pub source: bool,
    pub source_port: bool,
    pub destination: bool,
    pub destination_port: bool,
    pub cost: bool,
}

impl ParsedTokens {
    /// Number of tokens read successfully.
    pub fn count(&self) -> usize {
        [
            self.source,
            self.source_port,
            self.destination,
            self.destination_port,
            self.cost,
        ]
        .iter()
        .filter(|&&ok| ok)
        .count()
    }
}

impl fmt::Display for ParsedTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = |ok: bool| if ok { "ok" } else { "missing" };
        write!(
            f,
            "source {}, source port {}, destination {}, destination port {}, cost {}",
            mark(self.source),
            mark(self.source_port),
            mark(self.destination),
            mark(self.destination_port),
            mark(self.cost)
        )
    }
}
