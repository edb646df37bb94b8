use crate::{
    arena::{NodeArena, NodeId},
    error::{Result, TreeError},
    node::{Node, NodeKind},
    options::TreeOptions,
};

/// An abstract syntax tree stored in a [`NodeArena`].
///
/// Slot 0 is the root, a [`NodeKind::Sequence`] node with no parent. Every
/// other node is created through [`Tree::add_child`] or
/// [`Tree::insert_parent_above_children`] and lives until the tree is dropped.
#[derive(Debug, Clone)]
pub struct Tree {
    arena: NodeArena,
}

impl Tree {
    /// Creates a tree with default sizing.
    pub fn new() -> Result<Self> {
        Self::with_options(TreeOptions::default())
    }

    pub fn with_options(options: TreeOptions) -> Result<Self> {
        let arena = NodeArena::new(options).inspect_err(|err| {
            tracing::error!(%err, "could not allocate syntax tree");
        })?;

        let mut tree = Self { arena };
        tree.initialize_slot(NodeId::ROOT, None)?;
        tree.arena.get_mut(NodeId::ROOT)?.kind = NodeKind::Sequence;

        Ok(tree)
    }

    /// Releases the backing storage. Indices obtained from this tree must not be reused.
    pub fn destroy(self) {
        tracing::trace!(capacity = self.arena.capacity(), "destroying syntax tree");
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Number of live nodes, the root included.
    pub fn len(&self) -> usize {
        self.arena.active_count()
    }

    /// Always false: the root is live for the whole life of the tree.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.arena.get_active(id)
    }

    pub fn kind(&self, id: NodeId) -> Result<&NodeKind> {
        Ok(&self.node(id)?.kind)
    }

    pub fn set_kind(&mut self, id: NodeId, kind: NodeKind) -> Result<()> {
        self.arena.get_active_mut(id)?.kind = kind;
        Ok(())
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(id)?.parent)
    }

    pub fn first_child(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(id)?.first_child)
    }

    pub fn last_child(&self, id: NodeId) -> Result<Option<NodeId>> {
        self.node(id)?;
        Ok(self.children(id).last())
    }

    /// Children of `id` from first to last. Empty for invalid or free indices.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            arena: &self.arena,
            next: self.arena.get_active(id).ok().and_then(|node| node.first_child),
            forward: true,
        }
    }

    /// Children of `id` from last to first, following `prev_sibling` links.
    pub fn children_rev(&self, id: NodeId) -> Children<'_> {
        Children {
            arena: &self.arena,
            next: self.children(id).last(),
            forward: false,
        }
    }

    /// Appends a new node to the end of `parent`'s child list and returns it.
    ///
    /// The new node's kind is [`NodeKind::Unset`]; fill it in with [`Tree::set_kind`].
    pub fn add_child(&mut self, parent: NodeId) -> Result<NodeId> {
        let first_child = self.arena.get_active(parent)?.first_child;
        let node_id = self.arena.find_free_slot()?;

        let tail = match first_child {
            None => {
                self.arena.get_mut(parent)?.first_child = Some(node_id);
                None
            }
            Some(first) => {
                let mut tail = first;
                while let Some(next) = self.arena.get(tail)?.next_sibling {
                    tail = next;
                }
                self.arena.get_mut(tail)?.next_sibling = Some(node_id);
                Some(tail)
            }
        };

        self.initialize_slot(node_id, Some(parent))?;
        self.arena.get_mut(node_id)?.prev_sibling = tail;

        Ok(node_id)
    }

    /// Same as [`Tree::add_child`], then sets the new node's kind.
    pub fn add_child_with_kind(&mut self, parent: NodeId, kind: NodeKind) -> Result<NodeId> {
        let node_id = self.add_child(parent)?;
        self.set_kind(node_id, kind)?;
        Ok(node_id)
    }

    /// Splices a new node between `parent` and its current children.
    ///
    /// Afterwards `parent` has the new node as its only child and the new node
    /// owns the whole former child list, in order, with every former child
    /// re-parented. If no slot can be claimed, `parent` keeps its children and
    /// the error is returned.
    pub fn insert_parent_above_children(&mut self, parent: NodeId) -> Result<NodeId> {
        let detached = self.arena.get_active_mut(parent)?.first_child.take();

        let node_id = match self.add_child(parent) {
            Ok(node_id) => node_id,
            Err(err) => {
                if let Ok(node) = self.arena.get_mut(parent) {
                    node.first_child = detached;
                }
                return Err(err);
            }
        };

        tracing::debug!(
            node = %node_id,
            parent = %parent,
            children = ?detached,
            "inserting node between parent and its children"
        );

        self.arena.get_mut(node_id)?.first_child = detached;

        let mut cursor = detached;
        while let Some(child) = cursor {
            let child_node = self.arena.get_mut(child)?;
            child_node.parent = Some(node_id);
            cursor = child_node.next_sibling;
        }

        Ok(node_id)
    }

    /// Marks a claimed slot live and clears its topology. The kind is left untouched.
    pub(crate) fn initialize_slot(&mut self, id: NodeId, parent: Option<NodeId>) -> Result<()> {
        let node = self.arena.get_mut(id)?;
        node.parent = parent;
        node.active = true;
        node.first_child = None;
        node.next_sibling = None;
        node.prev_sibling = None;
        Ok(())
    }

    /// Verifies the structural invariants of the tree.
    ///
    /// Returns the first violation found as [`TreeError::Corrupted`].
    pub fn check_invariants(&self) -> Result<()> {
        let corrupted = |node: NodeId, reason: &str| TreeError::Corrupted {
            node,
            reason: reason.to_string(),
        };
        let limit = self.arena.capacity();

        let root = self
            .arena
            .get_active(NodeId::ROOT)
            .map_err(|_| corrupted(NodeId::ROOT, "root is not active"))?;
        if root.parent.is_some() {
            return Err(corrupted(NodeId::ROOT, "root has a parent"));
        }

        for (id, node) in self.arena.iter_active() {
            if id != NodeId::ROOT {
                let parent = node
                    .parent
                    .ok_or_else(|| corrupted(id, "non-root node has no parent"))?;
                self.arena
                    .get_active(parent)
                    .map_err(|_| corrupted(id, "parent is not active"))?;
                if !self.children(parent).take(limit).any(|child| child == id) {
                    return Err(corrupted(id, "node is not in its parent's child list"));
                }
            }

            if let Some(first) = node.first_child {
                let child = self
                    .arena
                    .get_active(first)
                    .map_err(|_| corrupted(id, "first child is not active"))?;
                if child.prev_sibling.is_some() {
                    return Err(corrupted(first, "head of child list has a previous sibling"));
                }
            }

            if let Some(next) = node.next_sibling {
                let sibling = self
                    .arena
                    .get_active(next)
                    .map_err(|_| corrupted(id, "next sibling is not active"))?;
                if sibling.prev_sibling != Some(id) {
                    return Err(corrupted(next, "prev_sibling does not point back"));
                }
                if sibling.parent != node.parent {
                    return Err(corrupted(next, "sibling has a different parent"));
                }
            }

            if let Some(prev) = node.prev_sibling {
                let sibling = self
                    .arena
                    .get_active(prev)
                    .map_err(|_| corrupted(id, "previous sibling is not active"))?;
                if sibling.next_sibling != Some(id) {
                    return Err(corrupted(prev, "next_sibling does not point back"));
                }
            }

            let mut ancestor = node.parent;
            let mut steps = 0;
            while let Some(current) = ancestor {
                if current == id || steps > limit {
                    return Err(corrupted(id, "node is its own ancestor"));
                }
                steps += 1;
                ancestor = self.arena.get(current)?.parent;
            }
        }

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn release_slot(&mut self, id: NodeId) -> Result<()> {
        self.arena.release(id)
    }
}

/// Iterator over a sibling chain, see [`Tree::children`] and [`Tree::children_rev`].
#[derive(Debug, Clone)]
pub struct Children<'a> {
    arena: &'a NodeArena,
    next: Option<NodeId>,
    forward: bool,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let node = self.arena.get(current).ok()?;
        self.next = if self.forward {
            node.next_sibling
        } else {
            node.prev_sibling
        };
        Some(current)
    }
}
