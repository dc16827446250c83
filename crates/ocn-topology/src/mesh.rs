//! Regular and offset meshes.

use ocn_core::{Cost, NodeId, OcnError};
use ocn_graph::Network;
use tracing::debug;

use crate::error::TopologyResult;
use crate::site::{GridPos, Site};

/// Reject zero-sized dimensions.
pub(crate) fn ensure_positive(value: usize, what: &'static str) -> TopologyResult<usize> {
    if value == 0 {
        return Err(OcnError::InvalidArg { what }.into());
    }
    Ok(value)
}

/// Insert direct edges `a -> b` and `b -> a`.
pub(crate) fn link_both(
    network: &mut Network<Site>,
    a: NodeId,
    b: NodeId,
    cost: Cost,
) -> TopologyResult<()> {
    network.add_direct_edge(a, b, cost)?;
    network.add_direct_edge(b, a, cost)?;
    Ok(())
}

/// Routers of a `width` x `height` grid, created column by column.
pub(crate) struct Grid {
    width: usize,
    height: usize,
    ids: Vec<NodeId>,
}

impl Grid {
    pub(crate) fn create(
        network: &mut Network<Site>,
        width: usize,
        height: usize,
    ) -> TopologyResult<Self> {
        let width = ensure_positive(width, "mesh width")?;
        let height = ensure_positive(height, "mesh height")?;

        let mut ids = Vec::with_capacity(width * height);
        for x in 0..width {
            for y in 0..height {
                let name = GridPos::new(x, y).to_string();
                ids.push(network.add_node(name, Site::router(x, y))?);
            }
        }
        Ok(Self { width, height, ids })
    }

    pub(crate) fn at(&self, x: usize, y: usize) -> NodeId {
        self.ids[x * self.height + y]
    }

    /// Every router with its grid position.
    pub(crate) fn routers(&self) -> impl Iterator<Item = (GridPos, NodeId)> + '_ {
        (0..self.width).flat_map(move |x| {
            (0..self.height).map(move |y| (GridPos::new(x, y), self.at(x, y)))
        })
    }

    /// Link every router to its west, east, south and north neighbors.
    ///
    /// Each router inserts its own outgoing edges in that order, which fixes
    /// the port numbering.
    pub(crate) fn link_neighbors(
        &self,
        network: &mut Network<Site>,
        cost: Cost,
    ) -> TopologyResult<()> {
        for (pos, id) in self.routers() {
            let (x, y) = (pos.x, pos.y);
            let mut neighbors = Vec::with_capacity(4);
            if x > 0 {
                neighbors.push(self.at(x - 1, y));
            }
            if x + 1 < self.width {
                neighbors.push(self.at(x + 1, y));
            }
            if y > 0 {
                neighbors.push(self.at(x, y - 1));
            }
            if y + 1 < self.height {
                neighbors.push(self.at(x, y + 1));
            }
            for neighbor in neighbors {
                network.add_direct_edge(id, neighbor, cost)?;
            }
        }
        Ok(())
    }
}

/// A `width` x `height` mesh of routers named `(x,y)`.
pub fn mesh(width: usize, height: usize, cost: Cost) -> TopologyResult<Network<Site>> {
    let mut network = Network::new();
    let grid = Grid::create(&mut network, width, height)?;
    grid.link_neighbors(&mut network, cost)?;
    debug!(width, height, nodes = network.len(), "built mesh");
    Ok(network)
}

/// A mesh whose rows are each offset by one column from the row below.
///
/// On top of the regular mesh links, router `(x,y)` is linked both ways to
/// `(x+1,y+1)`.
pub fn offset_mesh(width: usize, height: usize, cost: Cost) -> TopologyResult<Network<Site>> {
    let mut network = Network::new();
    let grid = Grid::create(&mut network, width, height)?;
    grid.link_neighbors(&mut network, cost)?;

    for x in 0..grid.width.saturating_sub(1) {
        for y in 0..grid.height.saturating_sub(1) {
            link_both(&mut network, grid.at(x, y), grid.at(x + 1, y + 1), cost)?;
        }
    }
    debug!(width, height, nodes = network.len(), "built offset mesh");
    Ok(network)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn mesh_paths_cost_manhattan(
            width in 1usize..5,
            height in 1usize..5,
            cost in 1u64..6,
            from in (0usize..5, 0usize..5),
            to in (0usize..5, 0usize..5),
        ) {
            let (fx, fy) = (from.0 % width, from.1 % height);
            let (tx, ty) = (to.0 % width, to.1 % height);
            prop_assume!((fx, fy) != (tx, ty));

            let mut net = mesh(width, height, cost).unwrap();
            let a = net.id_of(&GridPos::new(fx, fy).to_string()).unwrap();
            let b = net.id_of(&GridPos::new(tx, ty).to_string()).unwrap();
            let found = net.search(a, b).unwrap().map(|p| p.cost());

            let hops = (fx.abs_diff(tx) + fy.abs_diff(ty)) as u64;
            prop_assert_eq!(found, Some(hops * cost));
        }

        #[test]
        fn offset_mesh_never_costlier_than_mesh(
            width in 1usize..4,
            height in 1usize..4,
        ) {
            let mut plain = mesh(width, height, 1).unwrap();
            let mut offset = offset_mesh(width, height, 1).unwrap();
            plain.refresh_all().unwrap();
            offset.refresh_all().unwrap();

            for node in plain.nodes() {
                let other = offset.node_by_name(node.name()).unwrap();
                for path in node.known_paths() {
                    let dest = plain.name_of(path.destination()).unwrap();
                    let dest = offset.id_of(dest).unwrap();
                    let shortcut = other
                        .known_paths()
                        .into_iter()
                        .find(|p| p.destination() == dest)
                        .map(|p| p.cost());
                    prop_assert!(shortcut.is_some_and(|c| c <= path.cost()));
                }
            }
        }
    }
}
