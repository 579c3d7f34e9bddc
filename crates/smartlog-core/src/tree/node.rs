//! Node arena for the sparse commit tree.
//!
//! Nodes live in a flat arena and refer to each other by [`NodeId`]
//! index, so the parent back-reference is a plain non-owning handle and
//! the tree never forms ownership cycles. The [`NodeStore`] memoizes one
//! node per distinct commit identity for the lifetime of the run and
//! never evicts.
//!
//! A parent/child link in this tree does **not** imply the underlying
//! commits are immediate parent/child; any number of elided commits may
//! sit between them. [`NodeStore::is_direct_child`] distinguishes the
//! two cases for rendering.

use std::collections::HashMap;

use crate::commit::{Commit, CommitId};
use crate::error::Error;

/// Arena index of a node. Valid only for the store that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A tree element wrapping an optional commit.
///
/// Only the synthetic root has no commit. Links are mutated exclusively
/// through [`NodeStore`] methods.
#[derive(Debug)]
pub struct Node {
    /// The wrapped commit; `None` only for the root.
    pub commit: Option<Commit>,
    /// Back-reference to the parent node, if connected.
    pub parent: Option<NodeId>,
    /// Child nodes in attachment order.
    pub children: Vec<NodeId>,
    /// Set when this node is known to lie on the main line. Flips to
    /// true at most once and is never cleared.
    pub is_main: bool,
}

/// Memoizing arena: at most one node per commit identity.
#[derive(Debug)]
pub struct NodeStore {
    nodes: Vec<Node>,
    by_commit: HashMap<CommitId, NodeId>,
    root: NodeId,
}

impl NodeStore {
    /// Create a store holding only the synthetic root node.
    #[must_use]
    pub fn new() -> Self {
        let root = Node {
            commit: None,
            parent: None,
            children: Vec::new(),
            is_main: false,
        };
        Self {
            nodes: vec![root],
            by_commit: HashMap::new(),
            root: NodeId(0),
        }
    }

    /// The synthetic root, universal ancestor of every connected node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// The node for `commit`, creating and memoizing it on first access.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedMergeCommit`] if the commit has more than one
    /// parent. Nothing is inserted in that case.
    pub fn get(&mut self, commit: &Commit) -> Result<NodeId, Error> {
        if let Some(&id) = self.by_commit.get(&commit.id) {
            return Ok(id);
        }
        if commit.parents.len() > 1 {
            return Err(Error::UnsupportedMergeCommit(commit.id.clone()));
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            commit: Some(commit.clone()),
            parent: None,
            children: Vec::new(),
            is_main: false,
        });
        self.by_commit.insert(commit.id.clone(), id);
        Ok(id)
    }

    /// Look up an already-created node by commit identity.
    #[must_use]
    pub fn lookup(&self, id: &CommitId) -> Option<NodeId> {
        self.by_commit.get(id).copied()
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// True iff the node is reachable from the root via parent links.
    /// The root is connected by convention.
    #[must_use]
    pub fn is_connected(&self, id: NodeId) -> bool {
        id == self.root || self.node(id).parent.is_some()
    }

    /// True iff this node's commit and its parent node's commit are also
    /// immediate parent/child in the underlying history. False for the
    /// root's children and for edges that skip elided commits.
    #[must_use]
    pub fn is_direct_child(&self, id: NodeId) -> bool {
        let node = self.node(id);
        let (Some(commit), Some(parent)) = (&node.commit, node.parent) else {
            return false;
        };
        let Some(parent_commit) = &self.node(parent).commit else {
            return false;
        };
        commit.sole_parent() == Some(&parent_commit.id)
    }

    /// Attach `child` under `parent`.
    pub fn link(&mut self, child: NodeId, parent: NodeId) {
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    /// Splice `node` between an existing `parent` and `child` pair:
    /// `parent → node → child`. A constant-time relink.
    pub fn splice(&mut self, node: NodeId, child: NodeId, parent: NodeId) {
        self.node_mut(node).parent = Some(parent);
        self.node_mut(node).children.push(child);
        let siblings = &mut self.node_mut(parent).children;
        siblings.retain(|&c| c != child);
        siblings.push(node);
        self.node_mut(child).parent = Some(node);
    }
}

impl Default for NodeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(id: &str, parents: &[&str]) -> Commit {
        Commit {
            id: CommitId::new(id),
            parents: parents.iter().map(|p| CommitId::from(*p)).collect(),
            author: "a@b".into(),
            timestamp: 0,
            message: "m".into(),
        }
    }

    #[test]
    fn get_memoizes_by_identity() {
        let mut store = NodeStore::new();
        let a = store.get(&commit("aaa", &[])).expect("node");
        let b = store.get(&commit("aaa", &[])).expect("node");
        assert_eq!(a, b);
    }

    #[test]
    fn merge_commit_is_rejected_without_mutation() {
        let mut store = NodeStore::new();
        let c = commit("merge", &["p1", "p2"]);
        let err = store.get(&c).expect_err("must reject");
        assert!(matches!(err, Error::UnsupportedMergeCommit(_)));
        assert!(store.lookup(&c.id).is_none());
    }

    #[test]
    fn root_is_connected_by_convention() {
        let store = NodeStore::new();
        assert!(store.is_connected(store.root()));
    }

    #[test]
    fn unlinked_node_is_not_connected() {
        let mut store = NodeStore::new();
        let a = store.get(&commit("aaa", &[])).expect("node");
        assert!(!store.is_connected(a));
    }

    #[test]
    fn direct_child_matches_underlying_parentage() {
        let mut store = NodeStore::new();
        let parent = store.get(&commit("p", &[])).expect("node");
        let child = store.get(&commit("c", &["p"])).expect("node");
        let skip = store.get(&commit("s", &["elsewhere"])).expect("node");
        store.link(parent, store.root());
        store.link(child, parent);
        store.link(skip, parent);

        assert!(store.is_direct_child(child));
        // Edge skips elided commits.
        assert!(!store.is_direct_child(skip));
        // The root's children are never direct.
        assert!(!store.is_direct_child(parent));
        assert!(!store.is_direct_child(store.root()));
    }

    #[test]
    fn splice_relinks_all_three_nodes() {
        let mut store = NodeStore::new();
        let root = store.root();
        let child = store.get(&commit("c", &["x"])).expect("node");
        let mid = store.get(&commit("m", &[])).expect("node");
        store.link(child, root);

        store.splice(mid, child, root);

        assert_eq!(store.node(mid).parent, Some(root));
        assert_eq!(store.node(mid).children, vec![child]);
        assert_eq!(store.node(child).parent, Some(mid));
        assert_eq!(store.node(root).children, vec![mid]);
    }
}
