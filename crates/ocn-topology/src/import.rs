//! Line-oriented edge list import.
//!
//! Each non-blank line that does not start with `#` describes one direct edge:
//!
//! ```text
//! "SOURCE" SRC_PORT -> "DEST" DST_PORT: COST
//! ```
//!
//! Names are double-quoted (`\"` and `\\` escapes allowed), ports are
//! non-negative integers and the cost is a non-negative integer. Nodes are
//! created the first time they are mentioned.

use std::num::{IntErrorKind, ParseIntError};
use std::path::Path;

use ocn_core::{Cost, NodeId, PortNumber, cost_from_signed};
use ocn_graph::Network;
use tracing::debug;

use crate::error::{ParsedTokens, TopologyError, TopologyResult};
use crate::site::Site;

/// One parsed edge line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeLine {
    pub source: String,
    pub source_port: PortNumber,
    pub destination: String,
    pub destination_port: PortNumber,
    pub cost: Cost,
}

/// Why a line failed, and how far parsing got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineError {
    pub reason: &'static str,
    pub parsed: ParsedTokens,
}

/// Why a numeric token could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Number {
    Missing,
    OutOfRange,
}

struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(line: &'a str) -> Self {
        Self { rest: line }
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_whitespace();
        match self.rest.strip_prefix(token) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn quoted(&mut self) -> Option<String> {
        self.skip_whitespace();
        let body: &'a str = self.rest.strip_prefix('"')?;
        let mut chars = body.char_indices();
        let mut out = String::new();
        while let Some((i, ch)) = chars.next() {
            match ch {
                '"' => {
                    self.rest = &body[i + 1..];
                    return Some(out);
                }
                '\\' => match chars.next() {
                    Some((_, escaped)) => out.push(escaped),
                    None => return None,
                },
                _ => out.push(ch),
            }
        }
        None
    }

    fn integer(&mut self) -> Result<i64, Number> {
        self.skip_whitespace();
        let len = self
            .rest
            .char_indices()
            .find(|&(i, ch)| !(ch.is_ascii_digit() || (i == 0 && ch == '-')))
            .map_or(self.rest.len(), |(i, _)| i);
        let value = self.rest[..len].parse().map_err(|err: ParseIntError| {
            match err.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Number::OutOfRange,
                _ => Number::Missing,
            }
        })?;
        self.rest = &self.rest[len..];
        Ok(value)
    }

    /// Ports are never negative; a negative value is not a port at all.
    fn port(&mut self) -> Result<PortNumber, Number> {
        let value = self.integer()?;
        if value < 0 {
            return Err(Number::Missing);
        }
        u32::try_from(value)
            .map(PortNumber)
            .map_err(|_| Number::OutOfRange)
    }

    fn at_end(&mut self) -> bool {
        self.skip_whitespace();
        self.rest.is_empty()
    }
}

/// Whether `line` carries no edge.
fn is_blank_or_comment(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Parse one line. Blank and comment lines give `Ok(None)`.
pub fn parse_edge_line(line: &str) -> Result<Option<EdgeLine>, LineError> {
    if is_blank_or_comment(line) {
        return Ok(None);
    }

    let mut parsed = ParsedTokens::default();
    let fail = |reason, parsed| Err(LineError { reason, parsed });
    let mut cursor = Cursor::new(line);

    let Some(source) = cursor.quoted() else {
        return fail("expected quoted source name", parsed);
    };
    parsed.source = true;

    let source_port = match cursor.port() {
        Ok(port) => port,
        Err(Number::Missing) => return fail("expected source port", parsed),
        Err(Number::OutOfRange) => return fail("source port out of range", parsed),
    };
    parsed.source_port = true;

    if !cursor.eat("->") {
        return fail("expected '->'", parsed);
    }

    let Some(destination) = cursor.quoted() else {
        return fail("expected quoted destination name", parsed);
    };
    parsed.destination = true;

    let destination_port = match cursor.port() {
        Ok(port) => port,
        Err(Number::Missing) => return fail("expected destination port", parsed),
        Err(Number::OutOfRange) => return fail("destination port out of range", parsed),
    };
    parsed.destination_port = true;

    if !cursor.eat(":") {
        return fail("expected ':'", parsed);
    }

    let raw_cost = match cursor.integer() {
        Ok(value) => value,
        Err(Number::Missing) => return fail("expected cost", parsed),
        Err(Number::OutOfRange) => return fail("cost out of range", parsed),
    };
    let Ok(cost) = cost_from_signed(raw_cost, "imported edge") else {
        return fail("negative cost", parsed);
    };
    parsed.cost = true;

    if !cursor.at_end() {
        return fail("unexpected trailing text", parsed);
    }

    Ok(Some(EdgeLine {
        source,
        source_port,
        destination,
        destination_port,
        cost,
    }))
}

fn node_named(network: &mut Network<Site>, name: &str) -> TopologyResult<NodeId> {
    match network.id_of(name) {
        Some(id) => Ok(id),
        None => Ok(network.add_node(name, Site::default())?),
    }
}

/// Apply every edge in `text` to `network`.
pub fn import_into(network: &mut Network<Site>, text: &str) -> TopologyResult<usize> {
    let mut edges = 0;
    for (index, line) in text.lines().enumerate() {
        let edge = parse_edge_line(line).map_err(|err| TopologyError::Import {
            line: index + 1,
            text: line.to_string(),
            reason: err.reason,
            parsed: err.parsed,
        })?;
        let Some(edge) = edge else {
            continue;
        };

        let source = node_named(network, &edge.source)?;
        let destination = node_named(network, &edge.destination)?;
        network.add_direct_edge_with_ports(
            source,
            edge.source_port,
            destination,
            edge.destination_port,
            edge.cost,
        )?;
        edges += 1;
    }
    Ok(edges)
}

/// Build a network from edge-list text.
pub fn import_str(text: &str) -> TopologyResult<Network<Site>> {
    let mut network = Network::new();
    let edges = import_into(&mut network, text)?;
    debug!(nodes = network.len(), edges, "imported edge list");
    Ok(network)
}

/// Build a network from an edge-list file.
pub fn import_file(path: &Path) -> TopologyResult<Network<Site>> {
    let text = std::fs::read_to_string(path)?;
    import_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ocn_graph::GraphError;
    use ocn_graph::Path as Route;

    #[test]
    fn parses_well_formed_line() {
        let edge = parse_edge_line(r#""X" 0 -> "Y" 1: 7"#).unwrap().unwrap();
        assert_eq!(
            edge,
            EdgeLine {
                source: "X".to_string(),
                source_port: PortNumber(0),
                destination: "Y".to_string(),
                destination_port: PortNumber(1),
                cost: 7,
            }
        );
    }

    #[test]
    fn tolerates_extra_whitespace() {
        let edge = parse_edge_line("  \"(0,0)\"   3 ->\t\"(1,0)\" 2 :  1  ")
            .unwrap()
            .unwrap();
        assert_eq!(edge.source, "(0,0)");
        assert_eq!(edge.destination_port, PortNumber(2));
        assert_eq!(edge.cost, 1);
    }

    #[test]
    fn unquotes_escapes() {
        let edge = parse_edge_line(r#""a\"b" 0 -> "c\\d" 0: 1"#).unwrap().unwrap();
        assert_eq!(edge.source, "a\"b");
        assert_eq!(edge.destination, "c\\d");
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        assert_eq!(parse_edge_line("# \"X\" 0 -> \"Y\" 1: 7"), Ok(None));
        assert_eq!(parse_edge_line("   "), Ok(None));
        assert_eq!(parse_edge_line(""), Ok(None));
    }

    #[test]
    fn reports_how_far_parsing_got() {
        let err = parse_edge_line(r#""X" 0 -> "Y" one: 7"#).unwrap_err();
        assert_eq!(err.reason, "expected destination port");
        assert_eq!(err.parsed.count(), 3);
        assert!(err.parsed.destination);
        assert!(!err.parsed.destination_port);

        let err = parse_edge_line("X 0 -> Y 1: 7").unwrap_err();
        assert_eq!(err.parsed.count(), 0);

        let err = parse_edge_line(r#""X" 0 "Y" 1: 7"#).unwrap_err();
        assert_eq!(err.reason, "expected '->'");
        assert_eq!(err.parsed.count(), 2);
    }

    #[test]
    fn rejects_negative_values() {
        let err = parse_edge_line(r#""X" 0 -> "Y" 1: -3"#).unwrap_err();
        assert_eq!(err.reason, "negative cost");
        assert_eq!(err.parsed.count(), 4);

        let err = parse_edge_line(r#""X" -1 -> "Y" 1: 3"#).unwrap_err();
        assert_eq!(err.reason, "expected source port");
    }

    #[test]
    fn oversized_numbers_are_out_of_range() {
        let err = parse_edge_line(r#""X" 0 -> "Y" 1: 99999999999999999999"#).unwrap_err();
        assert_eq!(err.reason, "cost out of range");
        assert_eq!(err.parsed.count(), 4);

        let err = parse_edge_line(r#""X" 4294967296 -> "Y" 1: 3"#).unwrap_err();
        assert_eq!(err.reason, "source port out of range");
        assert_eq!(err.parsed.count(), 1);

        let err = parse_edge_line(r#""X" 0 -> "Y" 99999999999999999999: 3"#).unwrap_err();
        assert_eq!(err.reason, "destination port out of range");
    }

    #[test]
    fn rejects_trailing_text() {
        let err = parse_edge_line(r#""X" 0 -> "Y" 1: 7 extra"#).unwrap_err();
        assert_eq!(err.reason, "unexpected trailing text");
        assert_eq!(err.parsed.count(), 5);
    }

    #[test]
    fn import_creates_nodes_and_ported_edge() {
        let mut net = import_str("\"X\" 0 -> \"Y\" 1: 7\n").unwrap();
        let x = net.id_of("X").unwrap();
        let y = net.id_of("Y").unwrap();

        assert_eq!(net.len(), 2);
        assert_eq!(net.outgoing_port(x, y).unwrap(), PortNumber(0));
        assert_eq!(net.incoming_port(y, x).unwrap(), PortNumber(1));
        assert_eq!(net.search(x, y).unwrap().map(Route::cost), Some(7));
    }

    #[test]
    fn import_error_names_the_line() {
        let text = "# header\n\"A\" 0 -> \"B\" 0: 1\n\"B\" 0 -> \"C\"\n";
        let err = import_str(text).unwrap_err();
        match err {
            TopologyError::Import { line, parsed, .. } => {
                assert_eq!(line, 3);
                assert_eq!(parsed.count(), 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn import_rejects_repeated_pair_on_explicit_ports() {
        let text = "\"X\" 0 -> \"Y\" 1: 7\n\"X\" 0 -> \"Y\" 1: 3\n";
        match import_str(text) {
            Err(TopologyError::Graph(GraphError::PortInUse { node, port, .. })) => {
                assert_eq!(node, "X");
                assert_eq!(port, PortNumber(0));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn import_rejects_port_reuse() {
        let text = "\"A\" 0 -> \"B\" 0: 1\n\"A\" 0 -> \"C\" 0: 1\n";
        assert!(matches!(import_str(text), Err(TopologyError::Graph(_))));
    }
}
