use serde::{Deserialize, Serialize};

use crate::render::colors::{ColorScale, Rgb};
use crate::tree::categories::CategorySet;

/// Legend grid geometry (px).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
    /// Width of the legend canvas; decides the column count
    pub width: f64,
    /// Translation of the item group inside the canvas
    pub offset_x: f64,
    pub offset_y: f64,
    /// Side of the square swatch
    pub rect_size: f64,
    /// Column pitch
    pub h_spacing: f64,
    /// Extra gap between rows
    pub v_spacing: f64,
    /// Label position relative to the swatch's far edge
    pub text_x_offset: f64,
    pub text_y_offset: f64,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            width: 500.0,
            offset_x: 60.0,
            offset_y: 10.0,
            rect_size: 15.0,
            h_spacing: 150.0,
            v_spacing: 10.0,
            text_x_offset: 3.0,
            text_y_offset: -2.0,
        }
    }
}

impl LegendConfig {
    /// Items per row, never less than one.
    pub fn columns(&self) -> usize {
        if self.h_spacing <= 0.0 || !self.width.is_finite() {
            return 1;
        }
        ((self.width / self.h_spacing).floor() as usize).max(1)
    }

    /// Vertical pitch of one row.
    pub fn row_pitch(&self) -> f64 {
        self.rect_size + self.v_spacing
    }
}

/// One swatch + label. `x`/`y` are relative to the translated item group.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendItem {
    pub category: String,
    pub fill: Rgb,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone)]
pub struct Legend {
    pub items: Vec<LegendItem>,
    pub columns: usize,
    pub config: LegendConfig,
}

impl Legend {
    /// Lay out one item per category, row-major, in the set's order.
    pub fn build(categories: &CategorySet, colors: &mut ColorScale, config: LegendConfig) -> Self {
        let columns = config.columns();
        let items: Vec<LegendItem> = categories
            .iter()
            .enumerate()
            .map(|(i, category)| {
                let col = (i % columns) as f64;
                let row = (i / columns) as f64;
                LegendItem {
                    category: category.to_string(),
                    fill: colors.color(category),
                    x: col * config.h_spacing,
                    y: row * config.rect_size + row * config.v_spacing,
                }
            })
            .collect();

        tracing::debug!("Legend: {} items in {} columns", items.len(), columns);

        Self {
            items,
            columns,
            config,
        }
    }

    pub fn rows(&self) -> usize {
        self.items.len().div_ceil(self.columns)
    }

    /// Canvas height needed to show every row.
    pub fn height(&self) -> f64 {
        self.config.offset_y + self.rows() as f64 * self.config.row_pitch()
    }

    /// Swatch top-left in canvas coordinates.
    pub fn swatch_origin(&self, item: &LegendItem) -> (f64, f64) {
        (self.config.offset_x + item.x, self.config.offset_y + item.y)
    }

    /// Label baseline start, relative to the item's origin.
    pub fn text_offset(&self) -> (f64, f64) {
        (
            self.config.rect_size + self.config.text_x_offset,
            self.config.rect_size + self.config.text_y_offset,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::colors::PaletteOverflow;

    fn categories(names: &[&str]) -> CategorySet {
        names.iter().copied().collect()
    }

    #[test]
    fn grid_positions_are_row_major() {
        let set = categories(&["Wii", "NES", "GB", "DS", "X360"]);
        let mut colors = ColorScale::category20(PaletteOverflow::Cycle);
        let legend = Legend::build(&set, &mut colors, LegendConfig::default());

        assert_eq!(legend.columns, 3);
        assert_eq!(legend.rows(), 2);
        let positions: Vec<(f64, f64)> = legend.items.iter().map(|i| (i.x, i.y)).collect();
        assert_eq!(
            positions,
            vec![(0.0, 0.0), (150.0, 0.0), (300.0, 0.0), (0.0, 25.0), (150.0, 25.0)]
        );
        assert_eq!(legend.items[3].category, "DS");
    }

    #[test]
    fn colors_match_the_shared_scale() {
        let set = categories(&["Wii", "NES"]);
        let mut colors = ColorScale::category20(PaletteOverflow::Cycle);
        let wii = colors.color("Wii");
        let legend = Legend::build(&set, &mut colors, LegendConfig::default());
        assert_eq!(legend.items[0].fill, wii);
        assert_eq!(colors.get("NES"), Some(legend.items[1].fill));
    }

    #[test]
    fn narrow_legend_keeps_one_column() {
        let config = LegendConfig {
            width: 100.0,
            ..LegendConfig::default()
        };
        assert_eq!(config.columns(), 1);
        let zero_pitch = LegendConfig {
            h_spacing: 0.0,
            ..LegendConfig::default()
        };
        assert_eq!(zero_pitch.columns(), 1);
    }

    #[test]
    fn height_and_text_offsets() {
        let set = categories(&["a", "b", "c", "d"]);
        let mut colors = ColorScale::category20(PaletteOverflow::Cycle);
        let legend = Legend::build(&set, &mut colors, LegendConfig::default());
        assert_eq!(legend.height(), 10.0 + 2.0 * 25.0);
        assert_eq!(legend.text_offset(), (18.0, 13.0));
        assert_eq!(legend.swatch_origin(&legend.items[3]), (60.0, 35.0));
    }

    #[test]
    fn empty_legend() {
        let mut colors = ColorScale::category20(PaletteOverflow::Cycle);
        let legend = Legend::build(&CategorySet::new(), &mut colors, LegendConfig::default());
        assert!(legend.items.is_empty());
        assert_eq!(legend.rows(), 0);
        assert_eq!(legend.height(), 10.0);
    }
}
