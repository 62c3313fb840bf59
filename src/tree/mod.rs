pub mod aggregate;
pub mod arena;
pub mod categories;

use self::arena::{ChartNode, ChartTree, NodeId};
use self::categories::CategorySet;
use crate::data::DatasetNode;

/// Build a ChartTree from the nested dataset.
///
/// Nodes are created parent-before-child so each one can derive its dotted id
/// from its parent's. Values are then aggregated bottom-up and every sibling
/// list is sorted (taller subtrees first, then larger values).
pub fn build_tree(dataset: &DatasetNode) -> ChartTree {
    let mut tree = ChartTree::new(&dataset.name);
    if let Some(root) = tree.nodes.first_mut() {
        root.category = dataset.category.as_deref().map(Into::into);
        root.value = dataset.value;
    }

    // Explicit stack instead of recursion; children are pushed in reverse so
    // they are created (and appended) in dataset order.
    let mut stack: Vec<(&DatasetNode, NodeId)> = dataset
        .children()
        .iter()
        .rev()
        .map(|child| (child, tree.root))
        .collect();

    while let Some((entry, parent)) = stack.pop() {
        let node = ChartNode::new(&entry.name, entry.category.as_deref(), entry.value);
        let Some(id) = tree.add_child(parent, node) else {
            tracing::warn!("Node arena is full, dropping '{}' and the rest of the dataset", entry.name);
            break;
        };
        tracing::trace!("Created node '{}'", tree.get(id).id);

        for child in entry.children().iter().rev() {
            stack.push((child, id));
        }
    }

    aggregate::aggregate_values(&mut tree);
    aggregate::compute_heights(&mut tree);
    aggregate::sort_children(&mut tree);

    let root = tree.get(tree.root);
    tracing::info!(
        "Tree built: {} nodes, height {}, total value {:.2}",
        tree.len(),
        root.height,
        root.sum
    );

    tree
}

/// Distinct leaf categories in first-occurrence order (leaf traversal order).
/// Leaves without a category are skipped.
pub fn leaf_categories(tree: &ChartTree) -> CategorySet {
    tree.leaves()
        .filter_map(|id| tree.get(id).category.as_deref())
        .collect()
}
