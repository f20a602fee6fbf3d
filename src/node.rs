use std::{iter, ops::Index};

use crate::state::State;

/// Position of a [`Node`] in the arena of the search that created it.
pub type NodeId = usize;

/// One vertex of the search tree. Never changed once inserted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node {
    /// `g + h`, the frontier priority.
    pub f: u32,
    /// Board at this vertex.
    pub state: State,
    /// Moves made from the start.
    pub g: u32,
    /// Estimated moves left.
    pub h: u32,
    /// Tile slid to get here from the parent; `None` at the root.
    pub tile: Option<u8>,
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    pub(crate) fn root(state: State, h: u32) -> Node {
        Node {
            f: h,
            state,
            g: 0,
            h,
            tile: None,
            parent: None,
        }
    }

    pub(crate) fn child(parent: NodeId, state: State, tile: u8, g: u32, h: u32) -> Node {
        Node {
            f: g + h,
            state,
            g,
            h,
            tile: Some(tile),
            parent: Some(parent),
        }
    }
}

// parents are stored as indices into the arena, so the tree owns every node
// and the back-pointers never outlive it
#[derive(Default, Debug)]
pub(crate) struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub(crate) fn new() -> Tree {
        Tree::default()
    }

    pub(crate) fn insert(&mut self, node: Node) -> NodeId {
        debug_assert!(node.parent.map_or(true, |p| p < self.nodes.len()));
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Nodes from the root down to `id`, inclusive.
    pub(crate) fn path(&self, id: NodeId) -> Vec<Node> {
        let mut path: Vec<Node> = iter::successors(Some(id), |&ix| self.nodes[ix].parent)
            .map(|ix| self.nodes[ix])
            .collect();
        path.reverse();
        path
    }
}

impl Index<NodeId> for Tree {
    type Output = Node;
    fn index(&self, index: NodeId) -> &Self::Output {
        &self.nodes[index]
    }
}
