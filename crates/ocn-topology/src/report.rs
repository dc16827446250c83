//! Text renderings of a built network.

use std::io::Write;

use ocn_graph::{LinkDirection, Network};

use crate::error::TopologyResult;
use crate::site::{Placed, grid};

/// What to print about a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Every reachable pair: `"S" -> "D": COST`.
    #[default]
    Paths,
    /// Every direct link with its ports, in the import format.
    Neighbors,
    /// One node name per line.
    Nodes,
    /// Grid position of each placed router: `(x,y) -> "NAME"`.
    Grid,
    /// Graphviz digraph of the direct links.
    Dot,
}

/// Quote a node name the way the importer reads it back.
fn quoted(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push('"');
    for ch in name.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

/// Write `format` for `network` to `out`.
///
/// The path report refreshes every stale path table first, hence `&mut`.
pub fn render<P: Placed>(
    network: &mut Network<P>,
    format: ReportFormat,
    out: &mut dyn Write,
) -> TopologyResult<()> {
    match format {
        ReportFormat::Paths => {
            network.refresh_all()?;
            for node in network.nodes() {
                for path in node.known_paths() {
                    let destination = network.name_of(path.destination()).unwrap_or_default();
                    writeln!(
                        out,
                        "{} -> {}: {}",
                        quoted(node.name()),
                        quoted(destination),
                        path.cost()
                    )?;
                }
            }
        }
        ReportFormat::Neighbors => {
            for node in network.nodes() {
                for link in node.outgoing_neighbors() {
                    let neighbor = link.neighbor(LinkDirection::Outgoing);
                    let in_port = network.incoming_port(neighbor, node.id())?;
                    writeln!(
                        out,
                        "{} {} -> {} {}: {}",
                        quoted(node.name()),
                        link.port,
                        quoted(network.name_of(neighbor).unwrap_or_default()),
                        in_port,
                        link.cost()
                    )?;
                }
            }
        }
        ReportFormat::Nodes => {
            for node in network.nodes() {
                writeln!(out, "{}", node.name())?;
            }
        }
        ReportFormat::Grid => {
            for (pos, id) in grid(network) {
                writeln!(out, "{} -> {}", pos, quoted(network.name_of(id).unwrap_or_default()))?;
            }
        }
        ReportFormat::Dot => {
            writeln!(out, "digraph Network {{")?;
            writeln!(out, "  graph [ overlap=false ]")?;
            for node in network.nodes() {
                for link in node.outgoing_neighbors() {
                    let neighbor = link.neighbor(LinkDirection::Outgoing);
                    writeln!(
                        out,
                        "  {} -> {}",
                        quoted(node.name()),
                        quoted(network.name_of(neighbor).unwrap_or_default())
                    )?;
                }
            }
            writeln!(out, "}}")?;
        }
    }
    Ok(())
}
