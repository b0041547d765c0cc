//! Ordered tree of named folders and leaves.
//!
//! Nodes live in a flat arena and refer to each other through [`NodeId`]s. A node
//! knows its parent only by index, so closing a folder while decoding is a lookup
//! rather than a back-pointer and the tree never forms an ownership cycle.
//!
//! ```
//! use gear_core::Tree;
//!
//! let mut tree = Tree::new();
//! let models = tree.add_folder(tree.root(), "models")?;
//! tree.add_leaf(models, "player.bin", vec![1, 2, 3])?;
//! tree.add_leaf(tree.root(), "readme.txt", b"hi".to_vec())?;
//!
//! let names: Vec<_> = tree.leaves().map(|id| tree.path(id)).collect();
//! assert_eq!(names, ["models/player.bin", "readme.txt"]);
//! # Ok::<(), gear_core::TreeError>(())
//! ```

use std::fmt;

use crate::error::TreeError;

/// Handle to a node stored in a [`Tree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node inside the arena
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a node holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// An interior node; children are kept in insertion order
    Folder(Vec<NodeId>),

    /// A file with its raw contents
    Leaf(Vec<u8>),
}

/// A single entry of a [`Tree`]
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    parent: Option<NodeId>,
    kind: NodeKind,
}

impl Node {
    /// Name of this entry, without any folder prefix
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The folder containing this node, [`None`] for the root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Contents of the node
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Whether this node is a folder
    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder(_))
    }

    /// Children of a folder, empty for a leaf
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Folder(children) => children,
            NodeKind::Leaf(_) => &[],
        }
    }

    /// Payload of a leaf, [`None`] for a folder
    pub fn data(&self) -> Option<&[u8]> {
        match &self.kind {
            NodeKind::Folder(_) => None,
            NodeKind::Leaf(data) => Some(data),
        }
    }
}

/// Arena backed tree with a single root folder
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Create a tree holding only an empty, unnamed root folder.
    pub fn new() -> Tree {
        Tree {
            nodes: vec![Node {
                name: String::new(),
                parent: None,
                kind: NodeKind::Folder(Vec::new()),
            }],
        }
    }

    /// Handle of the root folder
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the root folder has no children
    pub fn is_empty(&self) -> bool {
        self.nodes[0].children().is_empty()
    }

    /// Look up a node
    pub fn get(&self, id: NodeId) -> Result<&Node, TreeError> {
        self.nodes.get(id.0).ok_or(TreeError::UnknownNode(id.0))
    }

    /// Insert a node named `name` holding `kind` as the last child of `parent` and
    /// return its handle.
    ///
    /// Fails when `parent` is a leaf, or when `kind` is a folder that already lists
    /// children. Children only ever join a folder through this method.
    pub fn add_child(&mut self, parent: NodeId, kind: NodeKind, name: impl Into<String>) -> Result<NodeId, TreeError> {
        let name = name.into();
        if let NodeKind::Folder(children) = &kind {
            if !children.is_empty() {
                return Err(TreeError::PrefilledFolder {
                    name,
                    children: children.len(),
                });
            }
        }

        let id = NodeId(self.nodes.len());
        match self.nodes.get_mut(parent.0).map(|n| &mut n.kind) {
            Some(NodeKind::Folder(children)) => children.push(id),
            Some(NodeKind::Leaf(_)) => return Err(TreeError::NotAFolder(parent.0)),
            None => return Err(TreeError::UnknownNode(parent.0)),
        }

        self.nodes.push(Node {
            name,
            parent: Some(parent),
            kind,
        });
        Ok(id)
    }

    /// Add an empty folder below `parent`
    pub fn add_folder(&mut self, parent: NodeId, name: impl Into<String>) -> Result<NodeId, TreeError> {
        self.add_child(parent, NodeKind::Folder(Vec::new()), name)
    }

    /// Add a leaf holding `data` below `parent`
    pub fn add_leaf(&mut self, parent: NodeId, name: impl Into<String>, data: Vec<u8>) -> Result<NodeId, TreeError> {
        self.add_child(parent, NodeKind::Leaf(data), name)
    }

    /// Children of `id` in insertion order
    pub fn children(&self, id: NodeId) -> Result<&[NodeId], TreeError> {
        Ok(self.get(id)?.children())
    }

    /// Parent of `id`, [`None`] for the root
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, TreeError> {
        Ok(self.get(id)?.parent)
    }

    /// Name of `id`
    pub fn name(&self, id: NodeId) -> Result<&str, TreeError> {
        Ok(self.get(id)?.name())
    }

    /// Whether `id` is a folder
    pub fn is_folder(&self, id: NodeId) -> Result<bool, TreeError> {
        Ok(self.get(id)?.is_folder())
    }

    /// Payload of the leaf `id`
    pub fn data(&self, id: NodeId) -> Result<&[u8], TreeError> {
        self.get(id)?.data().ok_or(TreeError::NotALeaf(id.0))
    }

    /// Mutable payload of the leaf `id`
    pub fn data_mut(&mut self, id: NodeId) -> Result<&mut Vec<u8>, TreeError> {
        match self.nodes.get_mut(id.0).map(|n| &mut n.kind) {
            Some(NodeKind::Leaf(data)) => Ok(data),
            Some(NodeKind::Folder(_)) => Err(TreeError::NotALeaf(id.0)),
            None => Err(TreeError::UnknownNode(id.0)),
        }
    }

    /// Replace the payload of the leaf `id`, returning the old one
    pub fn set_data(&mut self, id: NodeId, data: Vec<u8>) -> Result<Vec<u8>, TreeError> {
        Ok(std::mem::replace(self.data_mut(id)?, data))
    }

    /// First direct child of `parent` called `name`
    pub fn find_child(&self, parent: NodeId, name: &str) -> Result<Option<NodeId>, TreeError> {
        Ok(self
            .children(parent)?
            .iter()
            .copied()
            .find(|&child| self.nodes[child.0].name == name))
    }

    /// `/` joined names from below the root down to `id`
    pub fn path(&self, id: NodeId) -> String {
        let mut parts = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current.and_then(|c| self.nodes.get(c.0)) {
            if node.parent.is_none() {
                break;
            }
            parts.push(node.name.as_str());
            current = node.parent;
        }
        parts.reverse();
        parts.join("/")
    }

    /// Every node below the root in depth first pre-order, with its depth (1 for
    /// direct children of the root).
    pub fn walk(&self) -> impl Iterator<Item = (NodeId, usize)> + '_ {
        let mut stack: Vec<(NodeId, usize)> = self.nodes[0]
            .children()
            .iter()
            .rev()
            .map(|&c| (c, 1))
            .collect();

        std::iter::from_fn(move || {
            let (id, depth) = stack.pop()?;
            stack.extend(self.nodes[id.0].children().iter().rev().map(|&c| (c, depth + 1)));
            Some((id, depth))
        })
    }

    /// Every leaf in depth first pre-order; the order archives store files in
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.walk()
            .map(|(id, _)| id)
            .filter(|id| !self.nodes[id.0].is_folder())
    }

    /// Number of leaves in the whole tree
    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    fn subtree_eq(&self, id: NodeId, other: &Tree, other_id: NodeId) -> bool {
        let (a, b) = (&self.nodes[id.0], &other.nodes[other_id.0]);
        if a.name != b.name {
            return false;
        }

        match (&a.kind, &b.kind) {
            (NodeKind::Leaf(x), NodeKind::Leaf(y)) => x == y,
            (NodeKind::Folder(xs), NodeKind::Folder(ys)) => {
                xs.len() == ys.len()
                    && xs
                        .iter()
                        .zip(ys)
                        .all(|(&x, &y)| self.subtree_eq(x, other, y))
            }
            _ => false,
        }
    }
}

/// Trees compare by shape, names and payloads; arena positions are ignored.
impl PartialEq for Tree {
    fn eq(&self, other: &Self) -> bool {
        self.subtree_eq(self.root(), other, other.root())
    }
}

impl Eq for Tree {}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::error::TreeError;
    use crate::tree::{NodeKind, Tree};

    fn sample() -> Result<Tree, TreeError> {
        let mut tree = Tree::new();
        let a = tree.add_folder(tree.root(), "a")?;
        tree.add_leaf(a, "one", vec![1])?;
        let b = tree.add_folder(a, "b")?;
        tree.add_leaf(b, "two", vec![2, 2])?;
        tree.add_leaf(tree.root(), "three", vec![3, 3, 3])?;
        Ok(tree)
    }

    #[test]
    fn walk_is_pre_order() -> Result<(), TreeError> {
        let tree = sample()?;

        let visited = tree
            .walk()
            .map(|(id, depth)| (tree.path(id), depth))
            .collect::<Vec<_>>();

        assert_eq!(
            visited,
            vec![
                ("a".to_string(), 1),
                ("a/one".to_string(), 2),
                ("a/b".to_string(), 2),
                ("a/b/two".to_string(), 3),
                ("three".to_string(), 1),
            ]
        );
        assert_eq!(tree.leaf_count(), 3);

        Ok(())
    }

    #[test]
    fn parent_links_lead_back_to_root() -> Result<(), TreeError> {
        let tree = sample()?;
        let two = tree.leaves().nth(1).ok_or(TreeError::UnknownNode(0))?;

        let b = tree.parent(two)?.ok_or(TreeError::UnknownNode(0))?;
        assert_eq!(tree.name(b)?, "b");
        let a = tree.parent(b)?.ok_or(TreeError::UnknownNode(0))?;
        assert_eq!(tree.name(a)?, "a");
        assert_eq!(tree.parent(a)?, Some(tree.root()));
        assert_eq!(tree.parent(tree.root())?, None);

        Ok(())
    }

    #[test]
    fn leaves_cannot_hold_children() -> Result<(), TreeError> {
        let mut tree = Tree::new();
        let leaf = tree.add_leaf(tree.root(), "file", vec![])?;

        assert_eq!(
            tree.add_folder(leaf, "nested"),
            Err(TreeError::NotAFolder(leaf.index()))
        );
        assert_eq!(tree.data(tree.root()), Err(TreeError::NotALeaf(0)));

        Ok(())
    }

    #[test]
    fn equality_ignores_arena_layout() -> Result<(), TreeError> {
        let mut left = Tree::new();
        let folder = left.add_folder(left.root(), "f")?;
        left.add_leaf(left.root(), "z", vec![9])?;
        left.add_leaf(folder, "x", vec![1])?;

        let mut right = Tree::new();
        let folder = right.add_child(right.root(), NodeKind::Folder(vec![]), "f")?;
        right.add_leaf(folder, "x", vec![1])?;
        right.add_leaf(right.root(), "z", vec![9])?;

        assert_eq!(left, right);

        right.set_data(right.leaves().last().ok_or(TreeError::UnknownNode(0))?, vec![8])?;
        assert!(left != right);

        Ok(())
    }

    #[test]
    fn folders_must_start_empty() -> Result<(), TreeError> {
        let mut tree = Tree::new();
        let leaf = tree.add_leaf(tree.root(), "file", vec![1])?;

        assert_eq!(
            tree.add_child(tree.root(), NodeKind::Folder(vec![leaf]), "dup"),
            Err(TreeError::PrefilledFolder {
                name: "dup".to_string(),
                children: 1,
            })
        );
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.children(tree.root())?, [leaf]);
        assert_eq!(tree.leaf_count(), 1);

        Ok(())
    }

    #[test]
    fn find_child_by_name() -> Result<(), TreeError> {
        let tree = sample()?;

        let a = tree.find_child(tree.root(), "a")?.ok_or(TreeError::UnknownNode(0))?;
        assert!(tree.is_folder(a)?);
        assert_eq!(tree.find_child(a, "missing")?, None);

        Ok(())
    }
}
