use serde::{Deserialize, Serialize};
use vello::peniko::Color;

use crate::tree::categories::CategorySet;

/// The classic 20-color categorical palette.
pub const CATEGORY20: [&str; 20] = [
    "#1f77b4", "#aec7e8", "#ff7f0e", "#ffbb78", "#2ca02c", "#98df8a", "#d62728", "#ff9896",
    "#9467bd", "#c5b0d5", "#8c564b", "#c49c94", "#e377c2", "#f7b6d2", "#7f7f7f", "#c7c7c7",
    "#bcbd22", "#dbdb8d", "#17becf", "#9edae5",
];

/// How far each palette color is blended toward white.
pub const FADE: f64 = 0.2;

/// Fill for categories that get no palette slot.
pub const NEUTRAL: Rgb = Rgb::new(0xcc, 0xcc, 0xcc);

/// 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Linear blend in sRGB byte space, rounded per channel.
    pub fn interpolate(self, other: Rgb, t: f64) -> Self {
        let mix = |a: u8, b: u8| {
            let v = a as f64 + (b as f64 - a as f64) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Self::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// Blend `amount` of the way toward white.
    pub fn fade(self, amount: f64) -> Self {
        self.interpolate(Rgb::WHITE, amount)
    }

    /// CSS functional notation, e.g. `rgb(76, 146, 195)`.
    pub fn to_css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to vello's peniko Color.
    pub fn to_peniko(self) -> Color {
        Color::from_rgba8(self.r, self.g, self.b, 255)
    }

    pub fn to_peniko_alpha(self, alpha: f32) -> Color {
        Color::from_rgba8(self.r, self.g, self.b, (alpha.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

/// What to do once every palette slot is taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteOverflow {
    /// Wrap around and reuse colors from the start of the palette
    #[default]
    Cycle,
    /// Give every extra category the neutral gray
    Neutral,
}

/// Ordinal category → color mapping.
///
/// Categories receive palette slots in the order they are first seen.
#[derive(Debug, Clone)]
pub struct ColorScale {
    domain: CategorySet,
    range: Vec<Rgb>,
    overflow: PaletteOverflow,
}

impl ColorScale {
    pub fn new(range: Vec<Rgb>, overflow: PaletteOverflow) -> Self {
        Self {
            domain: CategorySet::new(),
            range,
            overflow,
        }
    }

    /// The category20 palette, each color faded 20% toward white.
    pub fn category20(overflow: PaletteOverflow) -> Self {
        let range = CATEGORY20
            .iter()
            .filter_map(|hex| Rgb::from_hex(hex))
            .map(|c| c.fade(FADE))
            .collect();
        Self::new(range, overflow)
    }

    /// Color for `category`, assigning the next slot if it is new.
    pub fn color(&mut self, category: &str) -> Rgb {
        let slot = self.domain.insert(category);
        if slot == self.range.len() {
            tracing::debug!(
                "Palette exhausted at category '{}' ({:?})",
                category,
                self.overflow
            );
        }
        self.slot_color(slot)
    }

    /// Color of an already assigned category.
    pub fn get(&self, category: &str) -> Option<Rgb> {
        self.domain.position(category).map(|slot| self.slot_color(slot))
    }

    pub fn domain(&self) -> &CategorySet {
        &self.domain
    }

    fn slot_color(&self, slot: usize) -> Rgb {
        if self.range.is_empty() {
            return NEUTRAL;
        }
        match self.overflow {
            PaletteOverflow::Cycle => self.range[slot % self.range.len()],
            PaletteOverflow::Neutral => self.range.get(slot).copied().unwrap_or(NEUTRAL),
        }
    }
}
