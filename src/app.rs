use std::path::Path;

use vello::Scene;

use gamesales_treemap::chart::Chart;
use gamesales_treemap::render::scene::{build_scene, canvas_size, FONT};
use gamesales_treemap::render::text::TextRenderer;
use gamesales_treemap::ui::input::{self, MouseState, PointerEvent};
use gamesales_treemap::ui::tooltip::Tooltip;

/// Top-level viewer state.
pub struct App {
    pub chart: Chart,
    pub tooltip: Tooltip,
    pub mouse: MouseState,
    pub text_renderer: TextRenderer,
    pub scene: Scene,
    /// Physical pixels per logical pixel
    pub scale_factor: f64,
    pub needs_rebuild: bool,
}

impl App {
    pub fn new(chart: Chart, font_path: Option<&Path>) -> Self {
        let mut text_renderer = TextRenderer::new();
        let loaded = match font_path {
            Some(path) => text_renderer.load_font_from_path(FONT, path),
            None => text_renderer.load_system_font(FONT),
        };
        if let Err(e) = loaded {
            tracing::warn!("No font available, labels will not be drawn: {}", e);
        }

        Self {
            tooltip: Tooltip::new(chart.config.tooltip),
            chart,
            mouse: MouseState::default(),
            text_renderer,
            scene: Scene::new(),
            scale_factor: 1.0,
            needs_rebuild: true,
        }
    }

    /// Logical window size that fits the chart and legend.
    pub fn logical_size(&self) -> (f64, f64) {
        canvas_size(&self.chart)
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        if scale_factor > 0.0 && scale_factor != self.scale_factor {
            self.scale_factor = scale_factor;
            self.needs_rebuild = true;
        }
    }

    /// Pointer moved, in physical window coordinates.
    pub fn pointer_moved(&mut self, x: f64, y: f64) -> bool {
        let event = PointerEvent::Move {
            x: x / self.scale_factor,
            y: y / self.scale_factor,
        };
        self.apply(event)
    }

    pub fn pointer_left(&mut self) -> bool {
        self.apply(PointerEvent::Leave)
    }

    fn apply(&mut self, event: PointerEvent) -> bool {
        let changed =
            input::process_pointer(event, &self.chart.tiles, &mut self.mouse, &mut self.tooltip);
        self.needs_rebuild |= changed;
        changed
    }

    /// Rebuild the vello scene if anything changed since the last frame.
    pub fn rebuild_scene(&mut self) {
        if !self.needs_rebuild {
            return;
        }
        build_scene(
            &mut self.scene,
            &self.chart,
            &self.tooltip,
            &mut self.text_renderer,
            self.scale_factor,
        );
        self.needs_rebuild = false;
    }
}
