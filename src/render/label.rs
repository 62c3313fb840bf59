use serde::{Deserialize, Serialize};

/// Placement of the label lines inside a tile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Left inset of every line (px)
    pub x: f64,
    /// Baseline of the first line, from the tile's top edge (px)
    pub first_baseline: f64,
    pub line_height: f64,
    pub font_size: f32,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            x: 4.0,
            first_baseline: 13.0,
            line_height: 10.0,
            font_size: 10.0,
        }
    }
}

impl LabelConfig {
    /// Baseline of line `index`.
    pub fn line_y(&self, index: usize) -> f64 {
        line_y(index, self.first_baseline, self.line_height)
    }
}

/// Split a tile name into label lines at camel-case word boundaries.
///
/// A new line starts right before every ASCII uppercase letter that is not the
/// first character and is not immediately followed by another uppercase
/// letter. Separators stay attached to the preceding segment.
pub fn split_label(name: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = name.char_indices().collect();
    let mut segments = Vec::new();
    let mut start = 0;

    for (i, &(pos, c)) in chars.iter().enumerate() {
        if pos == 0 || !c.is_ascii_uppercase() {
            continue;
        }
        let next_is_upper = chars
            .get(i + 1)
            .map(|&(_, n)| n.is_ascii_uppercase())
            .unwrap_or(false);
        if !next_is_upper {
            segments.push(&name[start..pos]);
            start = pos;
        }
    }

    if start < name.len() || segments.is_empty() {
        segments.push(&name[start..]);
    }
    segments
}

/// Baseline offset of label line `index`, relative to the tile's top edge.
pub fn line_y(index: usize, first_baseline: f64, line_height: f64) -> f64 {
    first_baseline + index as f64 * line_height
}
