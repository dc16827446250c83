//! Node payload used by the generators and importer.

use std::collections::BTreeMap;
use std::fmt;

use ocn_core::NodeId;
use ocn_graph::Network;

/// Column/row of a router in a grid topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    pub x: usize,
    pub y: usize,
}

impl GridPos {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Where a node sits in its topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Site {
    /// Grid position for mesh routers; `None` for endpoints and imported nodes.
    pub grid: Option<GridPos>,
}

impl Site {
    pub fn router(x: usize, y: usize) -> Self {
        Self {
            grid: Some(GridPos::new(x, y)),
        }
    }

    pub fn endpoint() -> Self {
        Self::default()
    }
}

/// Payloads that may carry a grid position.
pub trait Placed {
    fn grid_pos(&self) -> Option<GridPos>;
}

impl Placed for Site {
    fn grid_pos(&self) -> Option<GridPos> {
        self.grid
    }
}

impl Placed for () {
    fn grid_pos(&self) -> Option<GridPos> {
        None
    }
}

/// Grid position to node, for every placed node.
pub fn grid<P: Placed>(network: &Network<P>) -> BTreeMap<GridPos, NodeId> {
    network
        .nodes()
        .filter_map(|node| node.payload().grid_pos().map(|pos| (pos, node.id())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_skips_unplaced_nodes() {
        let mut net = Network::new();
        let r = net.add_node("(1,0)", Site::router(1, 0)).unwrap();
        net.add_node("(1,0):0", Site::endpoint()).unwrap();

        let g = grid(&net);
        assert_eq!(g.len(), 1);
        assert_eq!(g[&GridPos::new(1, 0)], r);
    }

    #[test]
    fn grid_pos_display_matches_router_names() {
        assert_eq!(GridPos::new(3, 7).to_string(), "(3,7)");
    }
}
