use std::cmp::Ordering;

use super::arena::{ChartTree, NodeId};

/// Compute aggregate values for all nodes (bottom-up).
/// After this, each group's `sum` equals the sum of all descendant leaf values.
pub fn aggregate_values(tree: &mut ChartTree) {
    // Process nodes in reverse order (children before parents) since
    // children always have higher indices than their parents in our arena.
    let len = tree.nodes.len();
    for i in (0..len).rev() {
        let node = &tree.nodes[i];

        if node.is_leaf() {
            let sum = match node.value {
                Some(v) if v.is_finite() && v >= 0.0 => v,
                other => {
                    tracing::warn!(
                        "Leaf '{}' has unusable value {:?}, counting it as 0",
                        node.id,
                        other
                    );
                    0.0
                }
            };
            tree.nodes[i].sum = sum;
            continue;
        }

        if node.value.is_some() {
            tracing::debug!("Ignoring own value on group '{}'", node.id);
        }

        let mut total = 0.0;
        let mut child = node.first_child;
        while let Some(child_id) = child {
            total += tree.nodes[child_id.index()].sum;
            child = tree.nodes[child_id.index()].next_sibling;
        }
        tree.nodes[i].sum = total;
    }
}

/// Compute subtree heights (bottom-up). Leaves are height 0.
pub fn compute_heights(tree: &mut ChartTree) {
    let len = tree.nodes.len();
    for i in (0..len).rev() {
        let mut height = 0;
        let mut child = tree.nodes[i].first_child;
        while let Some(child_id) = child {
            height = height.max(tree.nodes[child_id.index()].height.saturating_add(1));
            child = tree.nodes[child_id.index()].next_sibling;
        }
        tree.nodes[i].height = height;
    }
}

/// Sibling order: taller subtrees first, then larger aggregate values.
pub fn compare_siblings(tree: &ChartTree, a: NodeId, b: NodeId) -> Ordering {
    let (a, b) = (tree.get(a), tree.get(b));
    b.height
        .cmp(&a.height)
        .then_with(|| b.sum.total_cmp(&a.sum))
}

/// Sort the children of every group with [`compare_siblings`].
/// The sort is stable, so ties keep dataset order.
/// This re-links the sibling list without moving nodes in the arena.
pub fn sort_children(tree: &mut ChartTree) {
    let len = tree.nodes.len();
    for i in 0..len {
        if tree.nodes[i].first_child.is_none() {
            continue;
        }

        let children: Vec<NodeId> = {
            let tree: &ChartTree = tree;
            let mut children: Vec<NodeId> = tree.children(NodeId(i as u32)).collect();
            children.sort_by(|&a, &b| compare_siblings(tree, a, b));
            children
        };

        let (Some(&first), Some(&last)) = (children.first(), children.last()) else {
            continue;
        };
        tree.nodes[i].first_child = Some(first);
        tree.nodes[i].last_child = Some(last);
        for w in children.windows(2) {
            tree.nodes[w[0].index()].next_sibling = Some(w[1]);
        }
        tree.nodes[last.index()].next_sibling = None;
    }
}
