use serde::{Deserialize, Serialize};

/// Information shown in the tooltip for one tile.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub name: String,
    pub category: Option<String>,
    pub value: Option<f64>,
}

impl TooltipContent {
    /// `Name: …`, `Category: …`, `Value: …`
    pub fn lines(&self) -> [String; 3] {
        [
            format!("Name: {}", self.name),
            format!("Category: {}", self.category.as_deref().unwrap_or("")),
            format!("Value: {}", format_value(self.value)),
        ]
    }

    /// The `data-value` attribute exposed while the tooltip is visible.
    pub fn data_value(&self) -> String {
        format_value(self.value)
    }
}

/// Plain number formatting: `100`, `82.53`. Missing values render empty.
pub fn format_value(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    /// Horizontal offset from the pointer (px)
    pub offset_x: f64,
    /// Vertical offset from the pointer (px)
    pub offset_y: f64,
    /// Opacity while visible
    pub opacity: f32,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            offset_x: 10.0,
            offset_y: -28.0,
            opacity: 0.9,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Hidden,
    Visible,
}

/// Hover tooltip: two states, driven by pointer-move and pointer-leave.
///
/// Hiding keeps the last content and position; only visibility changes.
#[derive(Debug, Clone, Default)]
pub struct Tooltip {
    config: TooltipConfig,
    visibility: Visibility,
    x: f64,
    y: f64,
    content: Option<TooltipContent>,
}

impl Tooltip {
    pub fn new(config: TooltipConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Pointer moved over a tile: show `content` next to the pointer.
    pub fn pointer_move(&mut self, content: TooltipContent, pointer_x: f64, pointer_y: f64) {
        self.visibility = Visibility::Visible;
        self.x = pointer_x + self.config.offset_x;
        self.y = pointer_y + self.config.offset_y;
        self.content = Some(content);
    }

    /// Pointer left the tile.
    pub fn pointer_leave(&mut self) {
        self.visibility = Visibility::Hidden;
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    /// Presentation opacity derived from the visibility state.
    pub fn opacity(&self) -> f32 {
        match self.visibility {
            Visibility::Visible => self.config.opacity,
            Visibility::Hidden => 0.0,
        }
    }

    /// Top-left corner of the tooltip box.
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn content(&self) -> Option<&TooltipContent> {
        self.content.as_ref()
    }

    /// `data-value` while visible.
    pub fn data_value(&self) -> Option<String> {
        match self.visibility {
            Visibility::Visible => self.content.as_ref().map(TooltipContent::data_value),
            Visibility::Hidden => None,
        }
    }

    /// Tooltip text, one line per field, while visible.
    pub fn text(&self) -> Option<String> {
        if !self.is_visible() {
            return None;
        }
        self.content.as_ref().map(|c| c.lines().join("\n"))
    }
}
