use compact_str::CompactString;

/// Index into the arena `Vec<ChartNode>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single node of the chart hierarchy, stored in a flat arena.
/// Uses sibling-list representation: each node has `first_child` and `next_sibling`.
#[derive(Debug, Clone)]
pub struct ChartNode {
    /// Display name (platform or game title)
    pub name: CompactString,
    /// Dotted path of names from the root, e.g. `Platforms.Wii.Wii Sports`
    pub id: String,
    /// Category used for coloring; only meaningful on leaves
    pub category: Option<CompactString>,
    /// Value as given by the dataset (leaves only)
    pub value: Option<f64>,
    /// Aggregate value. For leaves: the own value. For groups: sum of children.
    pub sum: f64,
    /// Longest path down to a leaf (leaves = 0)
    pub height: u32,
    /// Depth in the tree (root = 0)
    pub depth: u32,
    /// Parent node index (None for root)
    pub parent: Option<NodeId>,
    /// First child node index (None for leaves)
    pub first_child: Option<NodeId>,
    /// Last child node index, for O(1) append
    pub last_child: Option<NodeId>,
    /// Next sibling node index (None if last child)
    pub next_sibling: Option<NodeId>,
}

impl ChartNode {
    pub fn new(name: &str, category: Option<&str>, value: Option<f64>) -> Self {
        Self {
            name: CompactString::new(name),
            id: String::new(),
            category: category.map(CompactString::new),
            value,
            sum: 0.0,
            height: 0,
            depth: 0,
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.first_child.is_none()
    }
}

/// The chart hierarchy stored as a flat arena of nodes.
///
/// Children are always pushed after their parent, so every child index is
/// greater than its parent's. Bottom-up passes rely on that.
#[derive(Debug, Clone)]
pub struct ChartTree {
    /// All nodes in contiguous memory
    pub nodes: Vec<ChartNode>,
    /// Root node index
    pub root: NodeId,
}

impl ChartTree {
    /// Create a tree holding only a root node.
    pub fn new(root_name: &str) -> Self {
        let mut root = ChartNode::new(root_name, None, None);
        root.id = root_name.to_string();

        ChartTree {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    /// Append a child under `parent`, deriving its id and depth. Returns the
    /// new node's ID, or `None` once the arena has run out of `u32` indices.
    pub fn add_child(&mut self, parent: NodeId, mut node: ChartNode) -> Option<NodeId> {
        let new_id = NodeId(u32::try_from(self.nodes.len()).ok()?);
        let parent_node = &self.nodes[parent.index()];

        node.parent = Some(parent);
        node.depth = parent_node.depth.saturating_add(1);
        node.id = format!("{}.{}", parent_node.id, node.name);
        node.next_sibling = None;
        let last_child = parent_node.last_child;

        match last_child {
            Some(last) => self.nodes[last.index()].next_sibling = Some(new_id),
            None => self.nodes[parent.index()].first_child = Some(new_id),
        }
        self.nodes[parent.index()].last_child = Some(new_id);

        self.nodes.push(node);
        Some(new_id)
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> &ChartNode {
        &self.nodes[id.index()]
    }

    /// Get a mutable node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> &mut ChartNode {
        &mut self.nodes[id.index()]
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is empty (only root).
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Iterate over children of a node.
    pub fn children(&self, parent: NodeId) -> ChildIter<'_> {
        ChildIter {
            tree: self,
            current: self.nodes[parent.index()].first_child,
        }
    }

    /// Parent-before-child traversal following the current sibling order.
    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder {
            tree: self,
            stack: vec![self.root],
        }
    }

    /// Leaves in traversal order (left to right in the sorted tree).
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.pre_order().filter(move |&id| self.get(id).is_leaf())
    }

    /// Look up a node by its dotted id.
    pub fn find(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.id == id)
            .map(|i| NodeId(i as u32))
    }
}

/// Iterator over the children of a node.
pub struct ChildIter<'a> {
    tree: &'a ChartTree,
    current: Option<NodeId>,
}

impl<'a> Iterator for ChildIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.current?;
        self.current = self.tree.nodes[id.index()].next_sibling;
        Some(id)
    }
}

/// Depth-first pre-order iterator.
pub struct PreOrder<'a> {
    tree: &'a ChartTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        let start = self.stack.len();
        self.stack.extend(self.tree.children(id));
        self.stack[start..].reverse();
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_child_appends_in_order() {
        let mut tree = ChartTree::new("Platforms");
        let wii = tree.add_child(tree.root, ChartNode::new("Wii", None, None)).unwrap();
        let ds = tree.add_child(tree.root, ChartNode::new("DS", None, None)).unwrap();

        let children: Vec<NodeId> = tree.children(tree.root).collect();
        assert_eq!(children, vec![wii, ds]);
        assert_eq!(tree.get(ds).depth, 1);
        assert_eq!(tree.get(ds).parent, Some(tree.root));
    }

    #[test]
    fn depth_saturates_on_very_deep_chains() {
        let mut tree = ChartTree::new("r");
        tree.get_mut(tree.root).depth = u32::MAX;
        let child = tree.add_child(tree.root, ChartNode::new("c", None, None)).unwrap();
        assert_eq!(tree.get(child).depth, u32::MAX);
        assert_eq!(child, NodeId(1));
    }

    #[test]
    fn ids_are_dotted_paths() {
        let mut tree = ChartTree::new("Platforms");
        let wii = tree.add_child(tree.root, ChartNode::new("Wii", None, None)).unwrap();
        let game = tree.add_child(wii, ChartNode::new("Wii Sports", Some("Sports"), Some(100.0))).unwrap();

        assert_eq!(tree.get(tree.root).id, "Platforms");
        assert_eq!(tree.get(wii).id, "Platforms.Wii");
        assert_eq!(tree.get(game).id, "Platforms.Wii.Wii Sports");
        assert_eq!(tree.find("Platforms.Wii.Wii Sports"), Some(game));
        assert_eq!(tree.find("Platforms.DS"), None);
    }

    #[test]
    fn pre_order_visits_parent_before_children() {
        let mut tree = ChartTree::new("r");
        let a = tree.add_child(tree.root, ChartNode::new("a", None, None)).unwrap();
        let b = tree.add_child(tree.root, ChartNode::new("b", None, None)).unwrap();
        let a1 = tree.add_child(a, ChartNode::new("a1", None, Some(1.0))).unwrap();
        let a2 = tree.add_child(a, ChartNode::new("a2", None, Some(1.0))).unwrap();
        let b1 = tree.add_child(b, ChartNode::new("b1", None, Some(1.0))).unwrap();

        let order: Vec<NodeId> = tree.pre_order().collect();
        assert_eq!(order, vec![tree.root, a, a1, a2, b, b1]);

        let leaves: Vec<NodeId> = tree.leaves().collect();
        assert_eq!(leaves, vec![a1, a2, b1]);
    }
}
