//! Concentrated mesh: several endpoints share each mesh router.

use ocn_core::{Cost, NodeId};
use ocn_graph::Network;
use tracing::debug;

use crate::error::TopologyResult;
use crate::mesh::{Grid, ensure_positive, link_both};
use crate::site::{GridPos, Site};

/// Name of endpoint `index` attached to the router at `pos`.
pub fn endpoint_name(pos: GridPos, index: usize) -> String {
    format!("{pos}:{index}")
}

/// Create `count` endpoints for the router at `pos`.
pub(crate) fn add_endpoints(
    network: &mut Network<Site>,
    pos: GridPos,
    count: usize,
) -> TopologyResult<Vec<NodeId>> {
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        ids.push(network.add_node(endpoint_name(pos, i), Site::endpoint())?);
    }
    Ok(ids)
}

/// A `width` x `height` mesh where each router serves `concentration`
/// endpoints named `(x,y):i`, each linked only to its router.
pub fn concentrated_mesh(
    width: usize,
    height: usize,
    concentration: usize,
    cost: Cost,
) -> TopologyResult<Network<Site>> {
    let concentration = ensure_positive(concentration, "concentration")?;

    let mut network = Network::new();
    let grid = Grid::create(&mut network, width, height)?;
    grid.link_neighbors(&mut network, cost)?;

    let routers: Vec<(GridPos, NodeId)> = grid.routers().collect();
    for (pos, router) in routers {
        for endpoint in add_endpoints(&mut network, pos, concentration)? {
            link_both(&mut network, router, endpoint, cost)?;
        }
    }
    debug!(
        width,
        height,
        concentration,
        nodes = network.len(),
        "built concentrated mesh"
    );
    Ok(network)
}
