use std::sync::Arc;

use vello::kurbo::{Affine, Rect};
use vello::peniko::{Blob, Fill, Image, ImageFormat};
use vello::Scene;

use super::colors::Rgb;
use super::text::{TextRenderResult, TextRenderer};
use crate::chart::Chart;
use crate::ui::tooltip::Tooltip;

pub const FONT: &str = "default";

/// Vertical gap between the treemap and the legend (logical px).
pub const LEGEND_GAP: f64 = 20.0;

const TEXT: Rgb = Rgb::new(0, 0, 0);
const TOOLTIP_BG: Rgb = Rgb::new(255, 255, 204);
const TOOLTIP_PAD: f64 = 6.0;
const TOOLTIP_FONT_SIZE: f32 = 12.0;
const LEGEND_FONT_SIZE: f32 = 12.0;

/// Logical size needed to show the treemap with the legend underneath.
pub fn canvas_size(chart: &Chart) -> (f64, f64) {
    (
        chart.width().max(chart.legend.config.width),
        chart.height() + LEGEND_GAP + chart.legend.height(),
    )
}

/// Build the viewer scene: tiles, labels, legend, then the tooltip on top.
///
/// Geometry is in logical pixels; `scale` maps it to the surface.
pub fn build_scene(
    scene: &mut Scene,
    chart: &Chart,
    tooltip: &Tooltip,
    text_renderer: &mut TextRenderer,
    scale: f64,
) {
    scene.reset();
    let transform = Affine::scale(scale);
    let (width, height) = canvas_size(chart);
    scene.fill(
        Fill::NonZero,
        transform,
        Rgb::WHITE.to_peniko(),
        None,
        &Rect::new(0.0, 0.0, width, height),
    );

    let labels = &chart.config.labels;
    for tile in &chart.tiles {
        let b = tile.bounds;
        scene.fill(
            Fill::NonZero,
            transform,
            tile.fill.to_peniko(),
            None,
            &Rect::new(b.x0, b.y0, b.x1, b.y1),
        );
        for (i, line) in tile.label.iter().enumerate() {
            draw_line(
                scene,
                text_renderer,
                line,
                labels.font_size,
                b.x0 + labels.x,
                b.y0 + labels.line_y(i),
                scale,
            );
        }
    }

    draw_legend(scene, chart, text_renderer, scale);

    if tooltip.is_visible() {
        draw_tooltip(scene, tooltip, text_renderer, scale);
    }
}

fn draw_legend(scene: &mut Scene, chart: &Chart, text_renderer: &mut TextRenderer, scale: f64) {
    let legend = &chart.legend;
    let top = chart.height() + LEGEND_GAP;
    let size = legend.config.rect_size;
    let (text_x, text_y) = legend.text_offset();

    for item in &legend.items {
        let (x, y) = legend.swatch_origin(item);
        let y = y + top;
        scene.fill(
            Fill::NonZero,
            Affine::scale(scale),
            item.fill.to_peniko(),
            None,
            &Rect::new(x, y, x + size, y + size),
        );
        draw_line(
            scene,
            text_renderer,
            &item.category,
            LEGEND_FONT_SIZE,
            x + text_x,
            y + text_y,
            scale,
        );
    }
}

fn draw_tooltip(scene: &mut Scene, tooltip: &Tooltip, text_renderer: &mut TextRenderer, scale: f64) {
    let Some(content) = tooltip.content() else {
        return;
    };
    let lines = content.lines();
    let opacity = tooltip.opacity();
    let line_height = TOOLTIP_FONT_SIZE as f64 * 1.4;

    let text_width = lines
        .iter()
        .filter_map(|line| {
            text_renderer.render_text(line, FONT, TOOLTIP_FONT_SIZE * scale as f32, TEXT)
        })
        .map(|r| r.width as f64 / scale)
        .fold(0.0, f64::max);

    let (x, y) = tooltip.position();
    let w = text_width + TOOLTIP_PAD * 2.0;
    let h = line_height * lines.len() as f64 + TOOLTIP_PAD * 2.0;
    scene.fill(
        Fill::NonZero,
        Affine::scale(scale),
        TOOLTIP_BG.to_peniko_alpha(opacity),
        None,
        &Rect::new(x, y, x + w, y + h),
    );

    for (i, line) in lines.iter().enumerate() {
        let baseline = y + TOOLTIP_PAD + line_height * (i as f64 + 0.8);
        draw_line(
            scene,
            text_renderer,
            line,
            TOOLTIP_FONT_SIZE,
            x + TOOLTIP_PAD,
            baseline,
            scale,
        );
    }
}

/// Draw one line of text with its baseline starting at `(x, baseline)`.
fn draw_line(
    scene: &mut Scene,
    text_renderer: &mut TextRenderer,
    text: &str,
    font_size: f32,
    x: f64,
    baseline: f64,
    scale: f64,
) {
    let Some(result) = text_renderer.render_text(text, FONT, font_size * scale as f32, TEXT) else {
        return;
    };
    let top = baseline * scale - result.ascent as f64;
    draw_text_to_scene(scene, result, x * scale, top);
}

/// Draw rendered glyphs with the line box's top-left at `(x, y)` (surface px).
fn draw_text_to_scene(scene: &mut Scene, text_result: TextRenderResult, x: f64, y: f64) {
    for glyph in text_result.glyphs {
        let glyph_image = image_from_rgba(glyph.bitmap, glyph.width as u32, glyph.height as u32);
        let transform = Affine::translate((x + glyph.x as f64, y + glyph.y as f64));
        scene.draw_image(&glyph_image, transform);
    }
}

/// Create a `peniko::Image` from an RGBA pixel buffer.
pub fn image_from_rgba(buf: Vec<u8>, width: u32, height: u32) -> Image {
    let data: Arc<dyn AsRef<[u8]> + Send + Sync> = Arc::new(buf);
    Image::new(Blob::new(data), ImageFormat::Rgba8, width, height)
}
