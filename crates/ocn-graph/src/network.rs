//! The node arena and its edge/query surface.

use ocn_core::{Cost, DEFAULT_LINK_COST, NodeId, PortNumber};
use tracing::{debug, error, trace, warn};

use crate::error::{GraphError, GraphResult};
use crate::node::{LinkDirection, Node};
use crate::path::Path;
use crate::registry::IdentityRegistry;
use crate::relax;

/// A set of uniquely named nodes and the direct links between them.
///
/// The network owns every node; paths and links refer to nodes by
/// [`NodeId`]. Each network carries its own [`IdentityRegistry`], so names
/// only need to be unique within one graph.
///
/// Path tables are computed lazily. Edge insertion marks the affected nodes
/// stale and [`Network::paths`] / [`Network::search`] re-derive a stale
/// table before reading it.
#[derive(Debug, Clone)]
pub struct Network<P = ()> {
    /// Slot `i` holds the node with id `i + 1`; removed nodes leave `None`.
    slots: Vec<Option<Node<P>>>,
    registry: IdentityRegistry,
}

impl<P> Default for Network<P> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            registry: IdentityRegistry::new(),
        }
    }
}

impl<P> Network<P> {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a network from `(name, payload)` pairs. Duplicate names are rejected.
    pub fn build<I, S>(nodes: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = (S, P)>,
        S: Into<String>,
    {
        let mut network = Self::new();
        for (name, payload) in nodes {
            network.add_node(name, payload)?;
        }
        Ok(network)
    }

    /// Create a node and return its id.
    pub fn add_node(&mut self, name: impl Into<String>, payload: P) -> GraphResult<NodeId> {
        let name = name.into();
        let id = self.registry.register(&name)?;
        debug_assert_eq!(id.index(), self.slots.len());
        trace!(node = %name, %id, "created node");
        self.slots.push(Some(Node::new(id, name, payload)));
        Ok(id)
    }

    /// Destroy a node that has no links, releasing its name.
    pub fn remove_node(&mut self, id: NodeId) -> GraphResult<Node<P>> {
        let node = self.node_ref(id)?;
        let name = node.name.clone();
        if node.degree() > 0 {
            return Err(GraphError::NodeInUse {
                name,
                links: node.degree(),
            });
        }
        self.registry.release(&name)?;
        debug!(node = %name, %id, "removed node");
        self.slots[id.index()]
            .take()
            .ok_or(GraphError::UnknownNode { id })
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<P>> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub fn id_of(&self, name: &str) -> Option<NodeId> {
        self.registry.lookup(name)
    }

    pub fn node_by_name(&self, name: &str) -> Option<&Node<P>> {
        self.id_of(name).and_then(|id| self.node(id))
    }

    pub fn name_of(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(Node::name)
    }

    pub fn payload_mut(&mut self, id: NodeId) -> Option<&mut P> {
        self.node_mut(id).ok().map(Node::payload_mut)
    }

    /// All live nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<P>> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    /// Insert a direct edge with the default cost.
    pub fn add_link(&mut self, source: NodeId, destination: NodeId) -> GraphResult<bool> {
        self.add_direct_edge(source, destination, DEFAULT_LINK_COST)
    }

    /// Insert a direct edge, assigning the lowest free port on each side.
    ///
    /// Returns `Ok(false)` when nothing changed: the source already knows a
    /// route to `destination` at most as expensive, or the edge is a self-loop.
    pub fn add_direct_edge(
        &mut self,
        source: NodeId,
        destination: NodeId,
        cost: Cost,
    ) -> GraphResult<bool> {
        self.insert_edge(source, None, destination, None, cost)
    }

    /// Insert a direct edge on explicit ports, as read from an imported description.
    ///
    /// Fails with [`GraphError::PortInUse`] if either port is taken or the
    /// pair is already linked. An edge no cheaper than the known route is
    /// still a no-op.
    pub fn add_direct_edge_with_ports(
        &mut self,
        source: NodeId,
        source_port: PortNumber,
        destination: NodeId,
        destination_port: PortNumber,
        cost: Cost,
    ) -> GraphResult<bool> {
        self.insert_edge(
            source,
            Some(source_port),
            destination,
            Some(destination_port),
            cost,
        )
    }

    fn insert_edge(
        &mut self,
        source: NodeId,
        source_port: Option<PortNumber>,
        destination: NodeId,
        destination_port: Option<PortNumber>,
        cost: Cost,
    ) -> GraphResult<bool> {
        let src = self.node_ref(source)?;
        let dst = self.node_ref(destination)?;

        if source == destination {
            debug!(node = %src.name, "ignoring self-loop edge");
            return Ok(false);
        }
        if let Some(known) = src.cached_cost(destination) {
            if known <= cost {
                trace!(
                    from = %src.name,
                    to = %dst.name,
                    cost,
                    known,
                    "edge is no cheaper than known route"
                );
                return Ok(false);
            }
        }

        let out_port = src
            .resolve_port(LinkDirection::Outgoing, destination, source_port)
            .map_err(|port| self.port_in_use(source, LinkDirection::Outgoing, port))?;
        let in_port = dst
            .resolve_port(LinkDirection::Incoming, source, destination_port)
            .map_err(|port| self.port_in_use(destination, LinkDirection::Incoming, port))?;

        trace!(
            from = %src.name,
            to = %dst.name,
            cost,
            %out_port,
            %in_port,
            "inserting direct edge"
        );

        let edge = Path::direct(source, destination, cost);
        let src = self.node_mut(source)?;
        src.offer_path(edge.clone());
        src.set_link(LinkDirection::Outgoing, out_port, edge.clone());
        self.node_mut(destination)?
            .set_link(LinkDirection::Incoming, in_port, edge);

        self.invalidate_upstream(source);
        Ok(true)
    }

    /// Mark stale every fresh node whose table routes through `source`.
    fn invalidate_upstream(&mut self, source: NodeId) {
        for node in self.slots.iter_mut().flatten() {
            if node.paths_valid && node.reaches(source) {
                node.invalidate();
            }
        }
    }

    fn port_in_use(&self, id: NodeId, direction: LinkDirection, port: PortNumber) -> GraphError {
        let err = GraphError::PortInUse {
            node: self.display_name(id),
            direction,
            port,
        };
        warn!(error = %err, "rejected edge");
        err
    }

    /// Bring one node's path table up to date.
    pub fn refresh(&mut self, id: NodeId) -> GraphResult<()> {
        let node = self.node_mut(id)?;
        if node.paths_valid {
            return Ok(());
        }
        let seeds: Vec<Path> = std::mem::take(&mut node.paths).into_values().collect();

        let (table, stats) = relax::derive_paths(seeds, &self.slots);

        let node = self.node_mut(id)?;
        node.paths = table;
        node.paths_valid = true;
        debug!(
            node = %node.name,
            reachable = stats.installed,
            pushed = stats.pushed,
            popped = stats.popped,
            "refreshed path table"
        );
        Ok(())
    }

    /// Bring every node's path table up to date.
    pub fn refresh_all(&mut self) -> GraphResult<()> {
        let ids: Vec<NodeId> = self.nodes().map(Node::id).collect();
        for id in ids {
            self.refresh(id)?;
        }
        Ok(())
    }

    /// Cheapest known path from `id` to every node it reaches, by destination.
    pub fn paths(&mut self, id: NodeId) -> GraphResult<Vec<&Path>> {
        self.refresh(id)?;
        Ok(self.node_ref(id)?.known_paths())
    }

    /// Cheapest path from `from` to `to`, or `None` if `to` is unreachable.
    pub fn search(&mut self, from: NodeId, to: NodeId) -> GraphResult<Option<&Path>> {
        self.refresh(from)?;
        Ok(self.node_ref(from)?.paths.get(&to))
    }

    /// Port on `node` used by its outgoing link to `neighbor`.
    pub fn outgoing_port(&self, node: NodeId, neighbor: NodeId) -> GraphResult<PortNumber> {
        self.port_for(node, LinkDirection::Outgoing, neighbor)
    }

    /// Port on `node` used by its incoming link from `neighbor`.
    pub fn incoming_port(&self, node: NodeId, neighbor: NodeId) -> GraphResult<PortNumber> {
        self.port_for(node, LinkDirection::Incoming, neighbor)
    }

    fn port_for(
        &self,
        id: NodeId,
        direction: LinkDirection,
        neighbor: NodeId,
    ) -> GraphResult<PortNumber> {
        let node = self.node_ref(id)?;
        if let Some(port) = node.port_for(direction, neighbor) {
            return Ok(port);
        }

        let ports = node
            .links(direction)
            .iter()
            .map(|link| {
                format!(
                    "{} -> {:?}",
                    link.port,
                    self.display_name(link.neighbor(direction))
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        let err = GraphError::PortNotFound {
            node: node.name.clone(),
            neighbor: self.display_name(neighbor),
            direction,
            ports,
        };
        error!(error = %err, "port lookup failed");
        Err(err)
    }

    fn display_name(&self, id: NodeId) -> String {
        self.name_of(id)
            .map(str::to_string)
            .unwrap_or_else(|| id.to_string())
    }

    fn node_ref(&self, id: NodeId) -> GraphResult<&Node<P>> {
        self.node(id).ok_or(GraphError::UnknownNode { id })
    }

    fn node_mut(&mut self, id: NodeId) -> GraphResult<&mut Node<P>> {
        self.slots
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(GraphError::UnknownNode { id })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// All-pairs minimum walk costs by Floyd-Warshall, `None` if unreachable.
    fn reference_costs(n: usize, edges: &[(usize, usize, Cost)]) -> Vec<Vec<Option<Cost>>> {
        let mut dist = vec![vec![None; n]; n];
        for &(s, d, c) in edges {
            if s != d {
                dist[s][d] = Some(dist[s][d].map_or(c, |old: Cost| old.min(c)));
            }
        }
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    if let (Some(ik), Some(kj)) = (dist[i][k], dist[k][j]) {
                        let via = ik + kj;
                        if dist[i][j].is_none_or(|old| via < old) {
                            dist[i][j] = Some(via);
                        }
                    }
                }
            }
        }
        dist
    }

    fn graph() -> impl Strategy<Value = (usize, Vec<(usize, usize, Cost)>)> {
        (2_usize..7).prop_flat_map(|n| {
            let edge = (0..n, 0..n, 0_u64..20);
            (Just(n), prop::collection::vec(edge, 0..20))
        })
    }

    fn network(n: usize) -> (Network, Vec<NodeId>) {
        let mut net = Network::new();
        let ids = (0..n)
            .map(|i| net.add_node(format!("n{i}"), ()).unwrap())
            .collect();
        (net, ids)
    }

    fn table(net: &mut Network, ids: &[NodeId]) -> Vec<Vec<Option<Cost>>> {
        ids.iter()
            .map(|&from| {
                ids.iter()
                    .map(|&to| {
                        if from == to {
                            None
                        } else {
                            net.search(from, to).unwrap().map(Path::cost)
                        }
                    })
                    .collect()
            })
            .collect()
    }

    proptest! {
        #[test]
        fn costs_match_brute_force((n, edges) in graph()) {
            let (mut net, ids) = network(n);
            for &(s, d, c) in &edges {
                net.add_direct_edge(ids[s], ids[d], c).unwrap();
            }

            let mut expected = reference_costs(n, &edges);
            for (i, row) in expected.iter_mut().enumerate() {
                row[i] = None;
            }
            prop_assert_eq!(table(&mut net, &ids), expected);
        }

        #[test]
        fn interleaved_queries_stay_consistent((n, edges) in graph()) {
            let (mut net, ids) = network(n);
            let mut previous = table(&mut net, &ids);

            for (step, &(s, d, c)) in edges.iter().enumerate() {
                net.add_direct_edge(ids[s], ids[d], c).unwrap();
                let current = table(&mut net, &ids);

                // Inserting an edge never makes a known route more expensive.
                for (old_row, new_row) in previous.iter().zip(&current) {
                    for (old, new) in old_row.iter().zip(new_row) {
                        if let Some(old) = old {
                            prop_assert!(new.is_some_and(|new| new <= *old));
                        }
                    }
                }

                let mut expected = reference_costs(n, &edges[..=step]);
                for (i, row) in expected.iter_mut().enumerate() {
                    row[i] = None;
                }
                prop_assert_eq!(&current, &expected);
                previous = current;
            }
        }

        #[test]
        fn tables_are_idempotent_and_loop_free((n, edges) in graph()) {
            let (mut net, ids) = network(n);
            for &(s, d, c) in &edges {
                net.add_direct_edge(ids[s], ids[d], c).unwrap();
            }
            for &id in &ids {
                let first: Vec<Path> = net.paths(id).unwrap().into_iter().cloned().collect();
                let second: Vec<Path> = net.paths(id).unwrap().into_iter().cloned().collect();
                prop_assert_eq!(&first, &second);
                prop_assert!(first.iter().all(|p| p.destination() != id && p.source() == id));
                for path in &first {
                    prop_assert!(!path.passes_through(id));
                }
            }
        }
    }
}
