use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::domain::node::NodeKind;

/// Data payload for one aggregate node.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Display name, unique among siblings
    pub name: String,
    /// Pre-aggregated numeric value, finite and >= 0
    pub value: f64,
    /// Optional display hint, no semantic weight
    pub color: Option<String>,
    /// Resolved role: internal, leaf, or inert
    pub kind: NodeKind,
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.value)
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct HierarchyNode {
    /// Aggregate data for this node
    pub data: NodeData,
    /// Index of parent node in the arena, None for root nodes
    pub parent: Option<Index>,
    /// Indices of child nodes, in document order
    pub children: Vec<Index>,
}

/// Arena-based immutable hierarchy of aggregate nodes.
///
/// Uses generational arena for memory-safe node references and O(1) lookups.
/// Unlike a filesystem hierarchy there can be several root nodes (the
/// top-level category row), so roots are an ordered list.
#[derive(Debug, Default)]
pub struct HierarchyModel {
    /// Arena storage for all nodes
    arena: Arena<HierarchyNode>,
    /// Indices of root nodes, in document order
    roots: Vec<Index>,
}

impl HierarchyModel {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            roots: Vec::new(),
        }
    }

    #[instrument(level = "trace", skip(self, data))]
    pub(crate) fn insert_node(&mut self, data: NodeData, parent: Option<Index>) -> Index {
        let node = HierarchyNode {
            data,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.roots.push(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&HierarchyNode> {
        self.arena.get(idx)
    }

    /// Root node indices in document order.
    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Children of a node. Missing or childless nodes yield an empty slice,
    /// never a panic.
    pub fn children_of(&self, idx: Index) -> &[Index] {
        self.get_node(idx)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Find a node by display name within a level snapshot.
    pub fn find_in_level(&self, level: &[Index], name: &str) -> Option<Index> {
        level
            .iter()
            .copied()
            .find(|&idx| self.get_node(idx).map(|n| n.data.name == name).unwrap_or(false))
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> ModelIterator {
        ModelIterator::new(self)
    }

    /// Maximum depth over all roots. Empty model has depth 0.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.roots
            .iter()
            .map(|&root| self.calculate_depth(root))
            .max()
            .unwrap_or(0)
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Collects all leaf filter nodes in the hierarchy, preorder.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<Index> {
        self.iter()
            .filter(|(_, node)| node.data.kind.is_leaf())
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Names along the ancestor chain of a node, root-first, including the
    /// node itself. Used for breadcrumb display.
    pub fn ancestry(&self, idx: Index) -> Vec<String> {
        let mut names = Vec::new();
        let mut current = Some(idx);
        while let Some(cur) = current {
            match self.get_node(cur) {
                Some(node) => {
                    names.push(node.data.name.clone());
                    current = node.parent;
                }
                None => break,
            }
        }
        names.reverse();
        names
    }
}

/// Preorder iterator over all nodes, roots left to right.
pub struct ModelIterator<'a> {
    model: &'a HierarchyModel,
    stack: Vec<Index>,
}

impl<'a> ModelIterator<'a> {
    fn new(model: &'a HierarchyModel) -> Self {
        // Push roots in reverse order for left-to-right traversal
        let stack = model.roots.iter().rev().copied().collect();
        Self { model, stack }
    }
}

impl<'a> Iterator for ModelIterator<'a> {
    type Item = (Index, &'a HierarchyNode);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.model.get_node(current_idx) {
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
