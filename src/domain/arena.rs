use generational_arena::{Arena, Index};
use std::fmt;
use termtree::Tree;
use tracing::instrument;

use crate::domain::mediant::mediant;
use crate::domain::node::Node;

/// Payload of a materialized tree position.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// The mediant at this position
    pub node: Node,
    /// Lower end of the segment the node bisects
    pub low: Node,
    /// Upper end of the segment the node bisects
    pub high: Node,
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.node)
    }
}

/// Position in the arena-based tree.
#[derive(Debug)]
pub struct TreeNode {
    pub data: NodeData,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Left child (toward `low`)
    pub left: Option<Index>,
    /// Right child (toward `high`)
    pub right: Option<Index>,
}

impl TreeNode {
    pub fn children(&self) -> impl Iterator<Item = Index> + '_ {
        self.left.iter().chain(self.right.iter()).copied()
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Arena-backed slice of the mediant tree between two boundary nodes.
///
/// The root is the mediant of the boundaries; every position has a left and a
/// right child down to the requested depth. Uses a generational arena for
/// O(1) lookups by index.
#[derive(Debug)]
pub struct MediantArena {
    arena: Arena<TreeNode>,
    root: Option<Index>,
}

impl Default for MediantArena {
    fn default() -> Self {
        Self::new()
    }
}

impl MediantArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Materialize `depth` levels below the segment `[low, high]`.
    ///
    /// Iterative, with an explicit stack of pending segments.
    #[instrument(level = "debug", skip_all, fields(low = %low, high = %high, depth = depth))]
    pub fn build(low: &Node, high: &Node, depth: usize) -> Self {
        let mut tree = Self::new();
        if depth == 0 {
            return tree;
        }
        let mut stack = vec![(low.clone(), high.clone(), None, Side::Left, 1usize)];

        while let Some((low, high, parent, side, level)) = stack.pop() {
            let node = mediant(&low, &high);
            let idx = tree.insert_node(
                NodeData {
                    node: node.clone(),
                    low: low.clone(),
                    high: high.clone(),
                },
                parent,
                side,
            );
            if level < depth {
                stack.push((node.clone(), high, Some(idx), Side::Right, level + 1));
                stack.push((low, node, Some(idx), Side::Left, level + 1));
            }
        }
        tree
    }

    #[instrument(level = "trace", skip(self, data))]
    fn insert_node(&mut self, data: NodeData, parent: Option<Index>, side: Side) -> Index {
        let node = TreeNode {
            data,
            parent,
            left: None,
            right: None,
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                match side {
                    Side::Left => parent.left = Some(node_idx),
                    Side::Right => parent.right = Some(node_idx),
                }
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order: each position before its children, left subtree first.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// In-order: ascending by value.
    pub fn iter_inorder(&self) -> InOrderIterator<'_> {
        InOrderIterator::new(self)
    }

    /// Index of the position holding `node`, found by descending from the root.
    pub fn find(&self, node: &Node) -> Option<Index> {
        let mut current = self.root;
        while let Some(idx) = current {
            let pos = self.get_node(idx)?;
            current = match node.cmp(&pos.data.node) {
                std::cmp::Ordering::Equal => return Some(idx),
                std::cmp::Ordering::Less => pos.left,
                std::cmp::Ordering::Greater => pos.right,
            };
        }
        None
    }

    /// Nodes from the root down to `idx`, inclusive.
    pub fn ancestry(&self, idx: Index) -> Vec<Node> {
        let mut chain = Vec::new();
        let mut current = Some(idx);
        while let Some(i) = current {
            match self.get_node(i) {
                Some(pos) => {
                    chain.push(pos.data.node.clone());
                    current = pos.parent;
                }
                None => break,
            }
        }
        chain.reverse();
        chain
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children()
                .map(|child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// All leaf positions, left to right.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<Node> {
        self.iter_inorder()
            .filter(|(_, pos)| pos.is_leaf())
            .map(|(_, pos)| pos.data.node.clone())
            .collect()
    }

    /// Render as a `termtree` (left child listed first).
    pub fn to_tree_string(&self) -> Tree<String> {
        fn build(arena: &MediantArena, idx: Index) -> Tree<String> {
            match arena.get_node(idx) {
                Some(pos) => Tree::new(pos.data.to_string())
                    .with_leaves(pos.children().map(|child| build(arena, child))),
                None => Tree::new(String::new()),
            }
        }

        match self.root {
            Some(root) => build(self, root),
            None => Tree::new("Empty tree".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Left,
    Right,
}

pub struct TreeIterator<'a> {
    arena: &'a MediantArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a MediantArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push(root);
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let current_idx = self.stack.pop()?;
        let node = self.arena.get_node(current_idx)?;
        // Push right first so the left subtree is visited first
        self.stack.extend(node.right);
        self.stack.extend(node.left);
        Some((current_idx, node))
    }
}

pub struct InOrderIterator<'a> {
    arena: &'a MediantArena,
    stack: Vec<Index>,
    current: Option<Index>,
}

impl<'a> InOrderIterator<'a> {
    fn new(arena: &'a MediantArena) -> Self {
        Self {
            arena,
            stack: Vec::new(),
            current: arena.root(),
        }
    }
}

impl<'a> Iterator for InOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(idx) = self.current {
            self.stack.push(idx);
            self.current = self.arena.get_node(idx).and_then(|n| n.left);
        }
        let idx = self.stack.pop()?;
        let node = self.arena.get_node(idx)?;
        self.current = node.right;
        Some((idx, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(m: i64, n: i64) -> Node {
        Node::new(m, n).unwrap()
    }

    #[test]
    fn given_depth_three_when_building_then_seven_positions() {
        let tree = MediantArena::build(&Node::zero(), &Node::infinity(), 3);
        assert_eq!(tree.len(), 7);
        assert_eq!(tree.depth(), 3);
        let root = tree.get_node(tree.root().unwrap()).unwrap();
        assert_eq!(root.data.node, node(1, 1));
    }

    #[test]
    fn given_tree_when_iterating_inorder_then_ascending() {
        let tree = MediantArena::build(&Node::zero(), &Node::infinity(), 3);
        let values: Vec<Node> = tree.iter_inorder().map(|(_, n)| n.data.node.clone()).collect();
        let expected = [(1, 3), (1, 2), (2, 3), (1, 1), (3, 2), (2, 1), (3, 1)]
            .iter()
            .map(|&(m, n)| node(m, n))
            .collect::<Vec<_>>();
        assert_eq!(values, expected);
        assert_eq!(tree.leaf_nodes(), vec![node(1, 3), node(2, 3), node(3, 2), node(3, 1)]);
    }

    #[test]
    fn given_tree_when_iterating_preorder_then_root_first() {
        let tree = MediantArena::build(&Node::zero(), &Node::one(), 2);
        let values: Vec<String> = tree.iter().map(|(_, n)| n.data.to_string()).collect();
        assert_eq!(values, vec!["1/2", "1/3", "2/3"]);
    }

    #[test]
    fn given_member_when_finding_then_ancestry_is_path() {
        let tree = MediantArena::build(&Node::zero(), &Node::infinity(), 4);
        let idx = tree.find(&node(3, 5)).unwrap();
        assert_eq!(tree.ancestry(idx), vec![node(1, 1), node(1, 2), node(2, 3), node(3, 5)]);
        assert!(tree.find(&node(5, 7)).is_none());
    }

    #[test]
    fn given_empty_tree_when_rendering_then_placeholder() {
        let tree = MediantArena::build(&Node::zero(), &Node::one(), 0);
        assert!(tree.is_empty());
        assert_eq!(tree.to_tree_string().to_string().trim(), "Empty tree");
    }
}
