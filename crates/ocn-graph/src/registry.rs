//! Name to identity assignment for one network.

use std::collections::HashMap;

use ocn_core::NodeId;

use crate::error::{GraphError, GraphResult};

/// Hands out a unique [`NodeId`] per live node name.
///
/// Ids count up from 1 and are never handed out twice, even after the name
/// that held one is released. A released name may be registered again and
/// receives a fresh id.
#[derive(Debug, Clone)]
pub struct IdentityRegistry {
    ids: HashMap<String, NodeId>,
    next: Option<NodeId>,
}

impl Default for IdentityRegistry {
    fn default() -> Self {
        Self {
            ids: HashMap::new(),
            next: Some(NodeId::FIRST),
        }
    }
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry whose next id is `next`. Lets tests reach the end of the counter.
    #[cfg(test)]
    pub(crate) fn starting_at(next: NodeId) -> Self {
        Self {
            ids: HashMap::new(),
            next: Some(next),
        }
    }

    /// Claim `name` and return its new id.
    pub fn register(&mut self, name: &str) -> GraphResult<NodeId> {
        if self.ids.contains_key(name) {
            return Err(GraphError::DuplicateName {
                name: name.to_string(),
            });
        }
        let id = self.next.ok_or(GraphError::IdExhausted)?;
        self.next = id.next();
        self.ids.insert(name.to_string(), id);
        Ok(id)
    }

    /// Give `name` back. Returns the id it held.
    pub fn release(&mut self, name: &str) -> GraphResult<NodeId> {
        self.ids.remove(name).ok_or_else(|| GraphError::UnknownName {
            name: name.to_string(),
        })
    }

    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.ids.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    /// Number of live names.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
