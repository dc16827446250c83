//! Nodes: identity, neighbor ports and the cached path table.

use std::collections::HashMap;
use std::fmt;

use ocn_core::{Cost, NodeId, PortNumber};

use crate::path::Path;

/// Which side of a node a link is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkDirection {
    /// Link leaves this node.
    Outgoing,
    /// Link arrives at this node.
    Incoming,
}

impl fmt::Display for LinkDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkDirection::Outgoing => f.write_str("outgoing"),
            LinkDirection::Incoming => f.write_str("incoming"),
        }
    }
}

/// A direct link attached to a node on a numbered port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub port: PortNumber,
    pub path: Path,
}

impl Link {
    /// The node on the far side of the link, as seen from `direction`.
    pub fn neighbor(&self, direction: LinkDirection) -> NodeId {
        match direction {
            LinkDirection::Outgoing => self.path.destination(),
            LinkDirection::Incoming => self.path.source(),
        }
    }

    pub fn cost(&self) -> Cost {
        self.path.cost()
    }
}

/// A router or endpoint in the network, carrying a caller-defined payload.
///
/// Nodes are created and owned by [`crate::Network`]. The path table is
/// rebuilt lazily: inserting an edge only clears `paths_valid`, and the next
/// query through the network re-derives the table.
#[derive(Debug, Clone)]
pub struct Node<P = ()> {
    pub(crate) id: NodeId,
    pub(crate) name: String,
    pub(crate) payload: P,
    pub(crate) paths_valid: bool,
    /// Best known path to every reachable node, keyed by destination.
    pub(crate) paths: HashMap<NodeId, Path>,
    pub(crate) outgoing: Vec<Link>,
    pub(crate) incoming: Vec<Link>,
}

impl<P> Node<P> {
    pub(crate) fn new(id: NodeId, name: String, payload: P) -> Self {
        Self {
            id,
            name,
            payload,
            paths_valid: true,
            paths: HashMap::new(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut P {
        &mut self.payload
    }

    pub fn into_payload(self) -> P {
        self.payload
    }

    /// Whether the path table reflects every edge inserted so far.
    pub fn is_fresh(&self) -> bool {
        self.paths_valid
    }

    /// Direct links leaving this node, in insertion order.
    pub fn outgoing_neighbors(&self) -> &[Link] {
        &self.outgoing
    }

    /// Direct links arriving at this node, in insertion order.
    pub fn incoming_neighbors(&self) -> &[Link] {
        &self.incoming
    }

    pub fn links(&self, direction: LinkDirection) -> &[Link] {
        match direction {
            LinkDirection::Outgoing => &self.outgoing,
            LinkDirection::Incoming => &self.incoming,
        }
    }

    /// Port of the outgoing link to `neighbor`, if there is one.
    pub fn port_for_outgoing(&self, neighbor: NodeId) -> Option<PortNumber> {
        self.port_for(LinkDirection::Outgoing, neighbor)
    }

    /// Port of the incoming link from `neighbor`, if there is one.
    pub fn port_for_incoming(&self, neighbor: NodeId) -> Option<PortNumber> {
        self.port_for(LinkDirection::Incoming, neighbor)
    }

    pub fn port_for(&self, direction: LinkDirection, neighbor: NodeId) -> Option<PortNumber> {
        self.link_to(direction, neighbor).map(|link| link.port)
    }

    /// Number of links on both sides.
    pub fn degree(&self) -> usize {
        self.outgoing.len() + self.incoming.len()
    }

    /// Current contents of the path table, sorted by destination.
    ///
    /// Does not refresh: only complete when [`Node::is_fresh`] holds. Go
    /// through [`crate::Network::paths`] to get an up-to-date table.
    pub fn known_paths(&self) -> Vec<&Path> {
        let mut out: Vec<&Path> = self.paths.values().collect();
        out.sort_by_key(|p| p.destination());
        out
    }

    pub(crate) fn link_to(&self, direction: LinkDirection, neighbor: NodeId) -> Option<&Link> {
        self.links(direction)
            .iter()
            .find(|link| link.neighbor(direction) == neighbor)
    }

    pub(crate) fn cached_cost(&self, destination: NodeId) -> Option<Cost> {
        self.paths.get(&destination).map(Path::cost)
    }

    /// Whether the path table holds a route to `destination`.
    pub(crate) fn reaches(&self, destination: NodeId) -> bool {
        self.paths.contains_key(&destination)
    }

    /// Install `path` if it beats the cached route to its destination.
    ///
    /// Marks only this node stale. Returns `false` when the cached route is
    /// at least as cheap.
    pub(crate) fn offer_path(&mut self, path: Path) -> bool {
        if let Some(cost) = self.cached_cost(path.destination()) {
            if cost <= path.cost() {
                return false;
            }
        }
        self.paths.insert(path.destination(), path);
        self.paths_valid = false;
        true
    }

    pub(crate) fn invalidate(&mut self) {
        self.paths_valid = false;
    }

    /// Port a new link to `neighbor` would land on.
    ///
    /// Without a request, an existing link to the same neighbor keeps its
    /// port and a new one gets the lowest free port. A requested port must be
    /// unused and the neighbor must not be linked yet. `Err` carries the
    /// rejected request.
    pub(crate) fn resolve_port(
        &self,
        direction: LinkDirection,
        neighbor: NodeId,
        requested: Option<PortNumber>,
    ) -> Result<PortNumber, PortNumber> {
        let existing = self.link_to(direction, neighbor).map(|link| link.port);
        let links = self.links(direction);
        match (requested, existing) {
            (Some(port), Some(_)) => Err(port),
            (Some(port), None) if links.iter().any(|link| link.port == port) => Err(port),
            (Some(port), None) => Ok(port),
            (None, Some(port)) => Ok(port),
            (None, None) => Ok(PortNumber::lowest_free(links.iter().map(|link| link.port))),
        }
    }

    /// Attach `path` on `port`, replacing an earlier link to the same neighbor.
    pub(crate) fn set_link(&mut self, direction: LinkDirection, port: PortNumber, path: Path) {
        let links = match direction {
            LinkDirection::Outgoing => &mut self.outgoing,
            LinkDirection::Incoming => &mut self.incoming,
        };
        let neighbor = match direction {
            LinkDirection::Outgoing => path.destination(),
            LinkDirection::Incoming => path.source(),
        };
        match links
            .iter_mut()
            .find(|link| link.neighbor(direction) == neighbor)
        {
            Some(link) => {
                link.port = port;
                link.path = path;
            }
            None => links.push(Link { port, path }),
        }
    }
}
