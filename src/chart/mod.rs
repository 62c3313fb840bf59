//! The assembled chart: hierarchy, layout, colors, tiles and legend.
//!
//! [`Chart::build`] runs the whole pipeline once; every output surface (SVG,
//! HTML, the interactive viewer) reads the resulting value.

pub mod legend;

use crate::config::ChartConfig;
use crate::data::DatasetNode;
use crate::layout::{self, Bounds, Layout};
use crate::render::colors::{ColorScale, Rgb, NEUTRAL};
use crate::render::label::split_label;
use crate::tree::arena::{ChartTree, NodeId};
use crate::tree::{self, build_tree};
use crate::ui::tooltip::TooltipContent;

use legend::Legend;

/// One drawable leaf cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub node: NodeId,
    /// Dotted path from the root, e.g. `Platforms.Wii.Wii Sports`
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    /// The leaf's own value as given in the dataset
    pub value: Option<f64>,
    pub bounds: Bounds,
    pub fill: Rgb,
    /// Label lines, top to bottom
    pub label: Vec<String>,
}

impl Tile {
    pub fn width(&self) -> f64 {
        self.bounds.width()
    }

    pub fn height(&self) -> f64 {
        self.bounds.height()
    }

    /// Half-open containment test.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.bounds.contains(x, y)
    }

    pub fn tooltip_content(&self) -> TooltipContent {
        TooltipContent {
            name: self.name.clone(),
            category: self.category.clone(),
            value: self.value,
        }
    }
}

pub struct Chart {
    pub config: ChartConfig,
    pub tree: ChartTree,
    pub layout: Layout,
    pub colors: ColorScale,
    /// Leaf tiles in the sorted tree's leaf order
    pub tiles: Vec<Tile>,
    pub legend: Legend,
}

impl Chart {
    pub fn build(dataset: &DatasetNode, config: &ChartConfig) -> Self {
        let tree = build_tree(dataset);
        let layout = layout::compute_layout(&tree, &config.treemap);

        let categories = tree::leaf_categories(&tree);
        let mut colors = ColorScale::category20(config.palette_overflow);
        let legend = Legend::build(&categories, &mut colors, config.legend);

        let tiles: Vec<Tile> = layout
            .leaves(&tree)
            .map(|rect| {
                let node = tree.get(rect.node);
                let fill = match node.category.as_deref() {
                    Some(category) => colors.color(category),
                    None => NEUTRAL,
                };
                Tile {
                    node: rect.node,
                    id: node.id.clone(),
                    name: node.name.to_string(),
                    category: node.category.as_ref().map(|c| c.to_string()),
                    value: node.value,
                    bounds: rect.bounds,
                    fill,
                    label: split_label(&node.name)
                        .into_iter()
                        .map(str::to_string)
                        .collect(),
                }
            })
            .collect();

        tracing::info!(
            "Chart built: {} tiles, {} categories",
            tiles.len(),
            legend.items.len()
        );

        Self {
            config: config.clone(),
            tree,
            layout,
            colors,
            tiles,
            legend,
        }
    }

    pub fn width(&self) -> f64 {
        self.config.treemap.width
    }

    pub fn height(&self) -> f64 {
        self.config.treemap.height
    }

    pub fn tile_by_id(&self, id: &str) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id == id)
    }

    /// Aggregate value of the whole chart.
    pub fn total(&self) -> f64 {
        self.tree.get(self.tree.root).sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::colors::PaletteOverflow;

    fn wii_sports() -> DatasetNode {
        DatasetNode::group(
            "Platforms",
            vec![DatasetNode::group(
                "Wii",
                vec![DatasetNode::leaf("Wii Sports", "Sports", 100.0)],
            )],
        )
    }

    #[test]
    fn single_tile_end_to_end() {
        let chart = Chart::build(&wii_sports(), &ChartConfig::default());
        assert_eq!(chart.tiles.len(), 1);

        let tile = &chart.tiles[0];
        assert_eq!(tile.id, "Platforms.Wii.Wii Sports");
        assert!((tile.width() - 960.0).abs() < 1e-9);
        assert!((tile.height() - 570.0).abs() < 1e-9);
        assert_eq!(tile.fill.to_css(), "rgb(76, 146, 195)");
        assert_eq!(tile.label, vec!["Wii ", "Sports"]);

        let lines = tile.tooltip_content().lines();
        assert_eq!(lines[0], "Name: Wii Sports");
        assert_eq!(lines[1], "Category: Sports");
        assert_eq!(lines[2], "Value: 100");

        assert_eq!(chart.legend.items.len(), 1);
        assert_eq!(chart.legend.items[0].category, "Sports");
        assert_eq!(chart.legend.items[0].fill, tile.fill);
    }

    #[test]
    fn tiles_and_legend_share_colors() {
        let dataset = crate::data::embedded().unwrap();
        let chart = Chart::build(&dataset, &ChartConfig::default());

        assert_eq!(chart.tiles.len(), dataset.leaf_count());
        assert_eq!(chart.legend.items.len(), 18);
        for tile in &chart.tiles {
            let category = tile.category.as_deref().unwrap();
            assert_eq!(chart.colors.get(category), Some(tile.fill));
        }
        assert!(chart.tile_by_id("Video Game Sales Data Top 100.Wii.Wii Sports").is_some());
        assert!(chart.total() > 0.0);
    }

    #[test]
    fn legend_follows_first_leaf_occurrence() {
        let dataset = DatasetNode::group(
            "r",
            vec![
                DatasetNode::group("small", vec![DatasetNode::leaf("a", "B", 1.0)]),
                DatasetNode::group(
                    "big",
                    vec![
                        DatasetNode::leaf("b", "A", 5.0),
                        DatasetNode::leaf("c", "B", 4.0),
                    ],
                ),
            ],
        );
        let chart = Chart::build(&dataset, &ChartConfig::default());
        let order: Vec<&str> = chart.legend.items.iter().map(|i| i.category.as_str()).collect();
        assert_eq!(order, vec!["A", "B"]);
    }

    #[test]
    fn uncategorized_leaf_is_neutral_and_unlisted() {
        let mut orphan = DatasetNode::leaf("orphan", "", 3.0);
        orphan.category = None;
        let dataset = DatasetNode::group("r", vec![DatasetNode::leaf("a", "A", 5.0), orphan]);
        let chart = Chart::build(&dataset, &ChartConfig::default());
        let tile = chart.tile_by_id("r.orphan").unwrap();
        assert_eq!(tile.fill, NEUTRAL);
        assert_eq!(chart.legend.items.len(), 1);
    }

    #[test]
    fn neutral_overflow_policy_reaches_tiles() {
        let leaves = (0..22)
            .map(|i| DatasetNode::leaf(&format!("g{i}"), &format!("c{i}"), 100.0 - i as f64))
            .collect();
        let config = ChartConfig {
            palette_overflow: PaletteOverflow::Neutral,
            ..ChartConfig::default()
        };
        let chart = Chart::build(&DatasetNode::group("r", leaves), &config);
        assert_eq!(chart.tile_by_id("r.g21").unwrap().fill, NEUTRAL);
        assert_ne!(chart.tile_by_id("r.g0").unwrap().fill, NEUTRAL);
    }
}
