//! Full crossbars and meshes of crossbars.

use ocn_core::{Cost, NodeId};
use ocn_graph::Network;
use tracing::debug;

use crate::cmesh::add_endpoints;
use crate::error::TopologyResult;
use crate::mesh::{Grid, ensure_positive};
use crate::site::{GridPos, Site};

/// Insert a direct edge between every ordered pair of `members`.
fn link_all_pairs(
    network: &mut Network<Site>,
    members: &[NodeId],
    cost: Cost,
) -> TopologyResult<()> {
    for &from in members {
        for &to in members {
            if from != to {
                network.add_direct_edge(from, to, cost)?;
            }
        }
    }
    Ok(())
}

/// `count` nodes named `0..count`, each linked directly to every other.
pub fn crossbar(count: usize, cost: Cost) -> TopologyResult<Network<Site>> {
    let count = ensure_positive(count, "crossbar size")?;

    let mut network = Network::new();
    let mut members = Vec::with_capacity(count);
    for i in 0..count {
        members.push(network.add_node(i.to_string(), Site::endpoint())?);
    }
    link_all_pairs(&mut network, &members, cost)?;

    debug!(count, "built crossbar");
    Ok(network)
}

/// A `width` x `height` mesh whose routers each form a full crossbar with
/// `count` local endpoints named `(x,y):i`.
pub fn crossmesh(
    width: usize,
    height: usize,
    count: usize,
    cost: Cost,
) -> TopologyResult<Network<Site>> {
    let count = ensure_positive(count, "crossbar size")?;

    let mut network = Network::new();
    let grid = Grid::create(&mut network, width, height)?;
    grid.link_neighbors(&mut network, cost)?;

    let routers: Vec<(GridPos, NodeId)> = grid.routers().collect();
    for (pos, router) in routers {
        let mut members = vec![router];
        members.extend(add_endpoints(&mut network, pos, count)?);
        link_all_pairs(&mut network, &members, cost)?;
    }
    debug!(width, height, count, nodes = network.len(), "built crossmesh");
    Ok(network)
}
