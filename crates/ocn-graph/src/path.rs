//! Routes between two nodes.

use ocn_core::{Cost, DEFAULT_LINK_COST, NodeId, add_costs};

/// A route from `source` to `destination`.
///
/// Endpoints and steps are ids into the owning network, never owning
/// references. A path is immutable once built; concatenation produces a new
/// one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    source: NodeId,
    destination: NodeId,
    cost: Cost,
    /// Intermediate nodes in travel order. Empty for a direct link.
    steps: Vec<NodeId>,
}

impl Path {
    /// A one-hop link.
    pub fn direct(source: NodeId, destination: NodeId, cost: Cost) -> Self {
        Self::new(source, destination, Vec::new(), cost)
    }

    /// A one-hop link with the default cost.
    pub fn link(source: NodeId, destination: NodeId) -> Self {
        Self::direct(source, destination, DEFAULT_LINK_COST)
    }

    pub fn new(source: NodeId, destination: NodeId, steps: Vec<NodeId>, cost: Cost) -> Self {
        Self {
            source,
            destination,
            cost,
            steps,
        }
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn destination(&self) -> NodeId {
        self.destination
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn steps(&self) -> &[NodeId] {
        &self.steps
    }

    pub fn is_direct(&self) -> bool {
        self.steps.is_empty()
    }

    /// Starts and ends at the same node.
    pub fn is_loop(&self) -> bool {
        self.source == self.destination
    }

    /// Number of links traversed.
    pub fn hops(&self) -> usize {
        self.steps.len() + 1
    }

    /// Every node visited, endpoints included.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::once(self.source)
            .chain(self.steps.iter().copied())
            .chain(std::iter::once(self.destination))
    }

    /// Whether `id` is one of the intermediate steps.
    pub fn passes_through(&self, id: NodeId) -> bool {
        self.steps.contains(&id)
    }

    /// Follow `self`, then `that`.
    ///
    /// `that` must start where `self` ends. The result's steps are
    /// `self.steps`, then `self.destination`, then `that.steps`.
    pub fn cat(&self, that: &Path) -> Path {
        debug_assert_eq!(
            self.destination, that.source,
            "concatenated paths must share an endpoint"
        );

        let mut steps = Vec::with_capacity(self.steps.len() + 1 + that.steps.len());
        steps.extend_from_slice(&self.steps);
        steps.push(self.destination);
        steps.extend_from_slice(&that.steps);

        Path {
            source: self.source,
            destination: that.destination,
            cost: add_costs(self.cost, that.cost),
            steps,
        }
    }
}
