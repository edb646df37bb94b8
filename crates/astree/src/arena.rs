use std::{
    fmt::{self, Display, Formatter},
    ops::Index,
};

use crate::{
    error::{Result, TreeError},
    node::Node,
    options::TreeOptions,
};

/// Index of a node inside a [`NodeArena`].
///
/// Indices stay valid when the arena grows; only the backing storage moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The tree root always lives in slot 0.
    pub const ROOT: NodeId = NodeId(0);

    pub const fn new(id: u32) -> NodeId {
        Self(id)
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        Self::new(id)
    }
}

impl From<NodeId> for usize {
    fn from(id: NodeId) -> Self {
        id.index()
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Renders an optional link the way the raw link dump shows it, `-1` for none.
pub(crate) fn display_link(link: Option<NodeId>) -> String {
    link.map_or_else(|| "-1".to_string(), |id| id.to_string())
}

/// Dense, growable storage for tree nodes.
///
/// The vector length is the capacity: every slot exists and is either active
/// or free. Free slots are found by scanning from index 0, and the arena
/// doubles when none is left.
#[derive(Debug, Clone)]
pub struct NodeArena {
    slots: Vec<Node>,
    max_capacity: usize,
}

impl NodeArena {
    /// Allocates `options.initial_capacity` free slots.
    pub fn new(options: TreeOptions) -> Result<Self> {
        let max_capacity = options.max_capacity.min((u32::MAX as usize).saturating_add(1));
        let capacity = options.initial_capacity.max(1);

        if capacity > max_capacity {
            return Err(TreeError::CapacityOverflow {
                capacity,
                max: max_capacity,
            });
        }

        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity)?;
        slots.resize_with(capacity, Node::default);

        Ok(Self {
            slots,
            max_capacity,
        })
    }

    /// Number of slots, active or not.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// Number of active slots.
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|node| node.active).count()
    }

    /// Returns the lowest-indexed free slot, doubling the arena if every slot is taken.
    ///
    /// The returned slot is still inactive; the caller is expected to initialize it.
    pub fn find_free_slot(&mut self) -> Result<NodeId> {
        loop {
            if let Some(index) = self.slots.iter().position(|node| !node.active) {
                return Ok(NodeId::new(index as u32));
            }

            self.grow()?;
        }
    }

    /// Doubles the number of slots. On failure the arena is left as it was.
    fn grow(&mut self) -> Result<()> {
        let capacity = self.slots.len();
        let new_capacity = capacity
            .checked_mul(2)
            .filter(|new_capacity| *new_capacity <= self.max_capacity)
            .ok_or(TreeError::CapacityOverflow {
                capacity,
                max: self.max_capacity,
            })?;

        self.slots.try_reserve_exact(new_capacity - capacity)?;
        self.slots.resize_with(new_capacity, Node::default);

        tracing::trace!(from = capacity, to = new_capacity, "grew node arena");
        Ok(())
    }

    /// Returns the slot at `id`, active or not.
    pub fn get(&self, id: NodeId) -> Result<&Node> {
        self.slots.get(id.index()).ok_or(TreeError::InvalidIndex(id))
    }

    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.slots
            .get_mut(id.index())
            .ok_or(TreeError::InvalidIndex(id))
    }

    /// Returns the node at `id`, rejecting free slots.
    pub fn get_active(&self, id: NodeId) -> Result<&Node> {
        let node = self.get(id)?;
        if node.active {
            Ok(node)
        } else {
            Err(TreeError::InactiveNode(id))
        }
    }

    pub fn get_active_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        let node = self.get_mut(id)?;
        if node.active {
            Ok(node)
        } else {
            Err(TreeError::InactiveNode(id))
        }
    }

    /// Iterates over active nodes in index order.
    pub fn iter_active(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, node)| node.active)
            .map(|(index, node)| (NodeId::new(index as u32), node))
    }

    /// Resets a slot to the free state.
    #[cfg(test)]
    pub(crate) fn release(&mut self, id: NodeId) -> Result<()> {
        *self.get_mut(id)? = Node::default();
        Ok(())
    }
}

impl Index<NodeId> for NodeArena {
    type Output = Node;

    fn index(&self, index: NodeId) -> &Self::Output {
        &self.slots[index.index()]
    }
}
