//! Search tree bookkeeping.
//!
//! The tree never owns games; branches do. It keeps aggregate counters and,
//! when tracking is enabled, an arena of node records linked parent to
//! child by `NodeId` indices. The arena sits behind a mutex so parallel
//! workers can append to it.

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Index into the node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel for "no node": the root's parent, or any node when tracking
    /// is off.
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// Record of one branch.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BranchNode {
    pub parent: NodeId,
    pub children: Vec<NodeId>,
    /// Conditional probability given the parent.
    pub weight: f64,
    /// Cumulative probability from the root.
    pub probability: f64,
    /// Id of the game this node owned.
    pub game: u64,
    pub depth: u32,
    /// Finalized into the results.
    pub terminal: bool,
}

/// Counters and optional node arena for one search run.
#[derive(Debug, Default)]
pub struct SearchTree {
    nodes: Option<Mutex<Vec<BranchNode>>>,
    clones: AtomicUsize,
    finalized: AtomicUsize,
    merged: AtomicUsize,
    levels: AtomicUsize,
    max_depth: AtomicU32,
}

impl SearchTree {
    #[must_use]
    pub fn new(track_nodes: bool) -> Self {
        Self {
            nodes: track_nodes.then(|| Mutex::new(Vec::with_capacity(1024))),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.nodes.is_some()
    }

    /// Register the root. Returns `NONE` when not tracking.
    pub fn add_root(&self, game: u64) -> NodeId {
        self.alloc(BranchNode {
            parent: NodeId::NONE,
            children: Vec::new(),
            weight: 1.0,
            probability: 1.0,
            game,
            depth: 0,
            terminal: false,
        })
    }

    /// Register a child of `parent`. Returns `NONE` when not tracking.
    pub fn add_child(&self, parent: NodeId, weight: f64, probability: f64, game: u64, depth: u32) -> NodeId {
        let Some(nodes) = &self.nodes else {
            return NodeId::NONE;
        };
        let mut nodes = nodes.lock();
        let id = NodeId::new(nodes.len() as u32);
        nodes.push(BranchNode {
            parent,
            children: Vec::new(),
            weight,
            probability,
            game,
            depth,
            terminal: false,
        });
        if let Some(parent) = nodes.get_mut(parent.0 as usize) {
            parent.children.push(id);
        }
        id
    }

    fn alloc(&self, node: BranchNode) -> NodeId {
        let Some(nodes) = &self.nodes else {
            return NodeId::NONE;
        };
        let mut nodes = nodes.lock();
        let id = NodeId::new(nodes.len() as u32);
        nodes.push(node);
        id
    }

    pub fn mark_terminal(&self, id: NodeId) {
        if let Some(nodes) = &self.nodes {
            if let Some(node) = nodes.lock().get_mut(id.0 as usize) {
                node.terminal = true;
            }
        }
    }

    /// Copy of a node record.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<BranchNode> {
        self.nodes.as_ref()?.lock().get(id.0 as usize).cloned()
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id).map(|n| n.children).unwrap_or_default()
    }

    /// Number of tracked nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.as_ref().map_or(0, |n| n.lock().len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // === Counters ===

    pub fn record_clones(&self, count: usize) {
        self.clones.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_finalized(&self) {
        self.finalized.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_merged(&self, count: usize) {
        self.merged.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_level(&self) {
        self.levels.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_depth(&self, depth: u32) {
        self.max_depth.fetch_max(depth, Ordering::Relaxed);
    }

    /// Games cloned.
    #[must_use]
    pub fn clones(&self) -> usize {
        self.clones.load(Ordering::Relaxed)
    }

    /// Terminal branches folded into results.
    #[must_use]
    pub fn finalized(&self) -> usize {
        self.finalized.load(Ordering::Relaxed)
    }

    /// Branches or outcomes absorbed into an equivalent one.
    #[must_use]
    pub fn merged(&self) -> usize {
        self.merged.load(Ordering::Relaxed)
    }

    /// Breadth-first levels processed.
    #[must_use]
    pub fn levels(&self) -> usize {
        self.levels.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn max_depth(&self) -> u32 {
        self.max_depth.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untracked_tree() {
        let tree = SearchTree::new(false);
        let root = tree.add_root(1);
        assert!(root.is_none());
        assert!(tree.add_child(root, 0.5, 0.5, 2, 1).is_none());
        assert!(tree.is_empty());
        assert!(tree.node(root).is_none());
    }

    #[test]
    fn test_tracked_links() {
        let tree = SearchTree::new(true);
        let root = tree.add_root(1);
        let a = tree.add_child(root, 0.5, 0.5, 2, 1);
        let b = tree.add_child(root, 0.5, 0.5, 3, 1);
        let c = tree.add_child(a, 0.25, 0.125, 4, 2);

        assert_eq!(root, NodeId::new(0));
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.children(root), vec![a, b]);
        assert_eq!(tree.node(c).unwrap().parent, a);
        assert!((tree.node(c).unwrap().probability - 0.125).abs() < 1e-12);

        tree.mark_terminal(c);
        assert!(tree.node(c).unwrap().terminal);
        assert!(!tree.node(b).unwrap().terminal);
    }

    #[test]
    fn test_counters() {
        let tree = SearchTree::new(false);
        tree.record_clones(4);
        tree.record_finalized();
        tree.record_merged(2);
        tree.record_level();
        tree.record_depth(3);
        tree.record_depth(1);

        assert_eq!(tree.clones(), 4);
        assert_eq!(tree.finalized(), 1);
        assert_eq!(tree.merged(), 2);
        assert_eq!(tree.levels(), 1);
        assert_eq!(tree.max_depth(), 3);
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId::new(3).to_string(), "NodeId(3)");
        assert_eq!(NodeId::NONE.to_string(), "NodeId(NONE)");
    }
}
