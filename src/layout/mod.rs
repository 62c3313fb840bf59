//! Treemap layout: assigns a rectangle to every node of a sorted, aggregated
//! [`ChartTree`].

pub mod binary;
pub mod squarify;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::tree::arena::{ChartTree, NodeId};

/// Axis-aligned box, `x0 <= x1` and `y0 <= y1` once positioned.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Bounds {
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Half-open containment test used for pointer hit-testing.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    /// Shrink by `pad` on every side. An axis that would invert collapses to its midpoint.
    fn inset(self, pad: f64) -> Self {
        let (x0, x1) = collapse(self.x0 + pad, self.x1 - pad);
        let (y0, y1) = collapse(self.y0 + pad, self.y1 - pad);
        Self { x0, y0, x1, y1 }
    }
}

fn collapse(lo: f64, hi: f64) -> (f64, f64) {
    if hi < lo {
        let mid = (lo + hi) / 2.0;
        (mid, mid)
    } else {
        (lo, hi)
    }
}

/// A positioned rectangle in the treemap layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutRect {
    pub node: NodeId,
    pub bounds: Bounds,
    pub depth: u32,
}

impl LayoutRect {
    pub fn width(&self) -> f64 {
        self.bounds.width()
    }

    pub fn height(&self) -> f64 {
        self.bounds.height()
    }
}

/// The full layout result (rects + fast lookup).
#[derive(Debug, Clone)]
pub struct Layout {
    /// One rectangle per node, parents before children
    pub rects: Vec<LayoutRect>,
    /// node → index into `rects`
    pub node_to_rect: HashMap<NodeId, usize>,
}

impl Layout {
    pub fn get(&self, node: NodeId) -> Option<&LayoutRect> {
        self.node_to_rect.get(&node).map(|&i| &self.rects[i])
    }

    /// Rectangles of the leaves, in the tree's leaf order.
    pub fn leaves<'a>(&'a self, tree: &'a ChartTree) -> impl Iterator<Item = &'a LayoutRect> + 'a {
        tree.leaves().filter_map(move |id| self.get(id))
    }
}

/// How the children of a node share its rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TileMethod {
    /// Rows grown toward a golden-ratio aspect
    #[default]
    Squarify,
    /// Balanced binary split by value
    Binary,
}

/// Configuration for treemap layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Canvas width (px)
    pub width: f64,
    /// Canvas height (px)
    pub height: f64,
    /// Gap between sibling cells (px)
    pub padding_inner: f64,
    pub tile: TileMethod,
    /// Target aspect ratio for squarified rows
    pub ratio: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 570.0,
            padding_inner: 1.0,
            tile: TileMethod::Squarify,
            ratio: squarify::GOLDEN_RATIO,
        }
    }
}

/// Compute the layout of the whole tree inside a `width × height` canvas.
///
/// Nodes are visited parent-before-child: a node's cell is first inset by half
/// the inner padding (the root is not inset), then its children are tiled into
/// that box grown back by half the padding. Siblings end up `padding_inner`
/// apart while the outermost cells stay flush with the canvas.
pub fn compute_layout(tree: &ChartTree, config: &LayoutConfig) -> Layout {
    let half_pad = config.padding_inner.max(0.0) / 2.0;
    let mut cells = vec![Bounds::default(); tree.len()];
    cells[tree.root.index()] = Bounds::new(0.0, 0.0, config.width.max(0.0), config.height.max(0.0));

    let mut rects = Vec::with_capacity(tree.len());
    let mut node_to_rect = HashMap::with_capacity(tree.len());

    for id in tree.pre_order() {
        let node = tree.get(id);
        let pad = if node.parent.is_some() { half_pad } else { 0.0 };
        let bounds = cells[id.index()].inset(pad);

        node_to_rect.insert(id, rects.len());
        rects.push(LayoutRect {
            node: id,
            bounds,
            depth: node.depth,
        });

        if node.is_leaf() {
            continue;
        }

        let inner = bounds.inset(-half_pad);
        let children: Vec<NodeId> = tree.children(id).collect();
        let values: Vec<f64> = children.iter().map(|&c| tree.get(c).sum).collect();
        let tiled = match config.tile {
            TileMethod::Squarify => squarify::squarify(&values, config.ratio, inner),
            TileMethod::Binary => binary::binary(&values, inner),
        };
        for (child, cell) in children.into_iter().zip(tiled) {
            cells[child.index()] = cell;
        }
    }

    tracing::info!(
        "Layout computed: {} rectangles in {:.0}x{:.0} ({:?})",
        rects.len(),
        config.width,
        config.height,
        config.tile
    );

    Layout { rects, node_to_rect }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DatasetNode;
    use crate::tree::build_tree;
    use proptest::prelude::*;

    const EPS: f64 = 1e-6;

    fn wii_sports() -> ChartTree {
        build_tree(&DatasetNode::group(
            "Platforms",
            vec![DatasetNode::group(
                "Wii",
                vec![DatasetNode::leaf("Wii Sports", "Sports", 100.0)],
            )],
        ))
    }

    fn overlaps(a: &Bounds, b: &Bounds) -> bool {
        a.x0 < b.x1 - EPS && b.x0 < a.x1 - EPS && a.y0 < b.y1 - EPS && b.y0 < a.y1 - EPS
    }

    #[test]
    fn bounds_containment_is_half_open() {
        let b = Bounds::new(0.0, 0.0, 10.0, 5.0);
        assert!(b.contains(0.0, 0.0));
        assert!(b.contains(9.99, 4.99));
        assert!(!b.contains(10.0, 2.0));
        assert!(!b.contains(2.0, 5.0));
        assert!(!Bounds::new(3.0, 3.0, 3.0, 3.0).contains(3.0, 3.0));
    }

    #[test]
    fn single_leaf_fills_canvas() {
        let tree = wii_sports();
        let layout = compute_layout(&tree, &LayoutConfig::default());
        let leaves: Vec<&LayoutRect> = layout.leaves(&tree).collect();
        assert_eq!(leaves.len(), 1);
        let b = leaves[0].bounds;
        assert!(b.x0.abs() < EPS && b.y0.abs() < EPS);
        assert!((b.width() - 960.0).abs() < EPS);
        assert!((b.height() - 570.0).abs() < EPS);
    }

    #[test]
    fn siblings_are_separated_by_padding() {
        let tree = build_tree(&DatasetNode::group(
            "r",
            vec![
                DatasetNode::leaf("a", "x", 1.0),
                DatasetNode::leaf("b", "x", 1.0),
            ],
        ));
        let config = LayoutConfig {
            width: 2.0 * 100.0 + 1.0,
            height: 100.0,
            ..LayoutConfig::default()
        };
        let layout = compute_layout(&tree, &config);
        let leaves: Vec<Bounds> = layout.leaves(&tree).map(|r| r.bounds).collect();
        assert_eq!(leaves.len(), 2);
        assert!((leaves[0].x0 - 0.0).abs() < EPS);
        assert!((leaves[1].x1 - 201.0).abs() < EPS);
        assert!((leaves[1].x0 - leaves[0].x1 - 1.0).abs() < EPS);
    }

    #[test]
    fn zero_value_leaf_gets_degenerate_rect() {
        let tree = build_tree(&DatasetNode::group(
            "r",
            vec![
                DatasetNode::leaf("big", "x", 10.0),
                DatasetNode::leaf("none", "x", 0.0),
            ],
        ));
        let layout = compute_layout(&tree, &LayoutConfig::default());
        let none = tree.find("r.none").unwrap();
        let rect = layout.get(none).unwrap();
        assert!(rect.width() >= 0.0 && rect.height() >= 0.0);
        assert!(rect.bounds.area() < EPS);
    }

    #[test]
    fn embedded_dataset_layout_is_deterministic() {
        let tree = build_tree(&crate::data::embedded().unwrap());
        let a = compute_layout(&tree, &LayoutConfig::default());
        let b = compute_layout(&tree, &LayoutConfig::default());
        assert_eq!(a.rects, b.rects);
    }

    fn arb_values() -> impl Strategy<Value = Vec<Vec<u32>>> {
        prop::collection::vec(prop::collection::vec(1u32..500, 1..8), 1..8)
    }

    fn tree_from(values: &[Vec<u32>]) -> ChartTree {
        let groups = values
            .iter()
            .enumerate()
            .map(|(g, leaves)| {
                let leaves = leaves
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| DatasetNode::leaf(&format!("g{g}l{i}"), "c", v as f64))
                    .collect();
                DatasetNode::group(&format!("g{g}"), leaves)
            })
            .collect();
        build_tree(&DatasetNode::group("root", groups))
    }

    proptest! {
        #[test]
        fn prop_unpadded_leaf_area_is_proportional(
            values in arb_values(),
            binary in any::<bool>(),
        ) {
            let tree = tree_from(&values);
            let config = LayoutConfig {
                padding_inner: 0.0,
                tile: if binary { TileMethod::Binary } else { TileMethod::Squarify },
                ..LayoutConfig::default()
            };
            let layout = compute_layout(&tree, &config);
            let canvas = config.width * config.height;
            let total = tree.get(tree.root).sum;

            let mut covered = 0.0;
            for rect in layout.leaves(&tree) {
                let expected = tree.get(rect.node).sum / total * canvas;
                prop_assert!((rect.bounds.area() - expected).abs() < 1e-6 * canvas);
                covered += rect.bounds.area();
            }
            prop_assert!((covered - canvas).abs() < 1e-6 * canvas);
        }

        #[test]
        fn prop_padded_leaves_stay_inside_and_apart(
            values in arb_values(),
            binary in any::<bool>(),
        ) {
            let tree = tree_from(&values);
            let config = LayoutConfig {
                tile: if binary { TileMethod::Binary } else { TileMethod::Squarify },
                ..LayoutConfig::default()
            };
            let layout = compute_layout(&tree, &config);
            let leaves: Vec<Bounds> = layout.leaves(&tree).map(|r| r.bounds).collect();
            // Cells thinner than the padding collapse to their midpoint, which
            // may sit up to half a padding outside the canvas edge.
            let slack = config.padding_inner / 2.0 + EPS;

            for (i, a) in leaves.iter().enumerate() {
                prop_assert!(a.width() >= 0.0 && a.height() >= 0.0);
                prop_assert!(a.x0 >= -slack && a.y0 >= -slack);
                prop_assert!(a.x1 <= config.width + slack && a.y1 <= config.height + slack);
                for b in &leaves[i + 1..] {
                    prop_assert!(!overlaps(a, b), "{:?} overlaps {:?}", a, b);
                }
            }
        }
    }
}
