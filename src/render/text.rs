use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};
use fontdue::Font;

use super::colors::Rgb;

/// Rasterizes short strings into per-glyph RGBA bitmaps.
pub struct TextRenderer {
    fonts: HashMap<String, Font>,
    layout: Layout,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self {
            fonts: HashMap::new(),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }

    pub fn has_font(&self, name: &str) -> bool {
        self.fonts.contains_key(name)
    }

    pub fn load_font_from_path(&mut self, name: &str, path: &Path) -> Result<()> {
        let data =
            std::fs::read(path).with_context(|| format!("failed to read font {}", path.display()))?;
        let font = Font::from_bytes(data, fontdue::FontSettings::default())
            .map_err(|e| anyhow!("invalid font {}: {e}", path.display()))?;
        self.fonts.insert(name.to_string(), font);
        tracing::info!("Loaded text font from {}", path.display());
        Ok(())
    }

    /// Try a list of well-known font locations.
    pub fn load_system_font(&mut self, name: &str) -> Result<()> {
        let mut candidates: Vec<PathBuf> = Vec::new();

        if let Ok(windir) = std::env::var("WINDIR") {
            candidates.push(PathBuf::from(format!("{windir}\\Fonts\\segoeui.ttf")));
            candidates.push(PathBuf::from(format!("{windir}\\Fonts\\arial.ttf")));
        }
        candidates.push(PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"));
        candidates.push(PathBuf::from("/usr/share/fonts/TTF/DejaVuSans.ttf"));
        candidates.push(PathBuf::from("/usr/share/fonts/dejavu/DejaVuSans.ttf"));
        candidates.push(PathBuf::from("/System/Library/Fonts/Supplemental/Arial.ttf"));
        candidates.push(PathBuf::from("/Library/Fonts/Arial.ttf"));

        for path in candidates {
            if self.load_font_from_path(name, &path).is_ok() {
                return Ok(());
            }
        }

        Err(anyhow!("unable to load a system font from known locations"))
    }

    /// Lay out and rasterize `text`. Glyph positions are relative to the top
    /// of the line box. Returns `None` for unknown fonts or blank text.
    pub fn render_text(
        &mut self,
        text: &str,
        font_name: &str,
        font_size: f32,
        color: Rgb,
    ) -> Option<TextRenderResult> {
        let font = self.fonts.get(font_name)?;

        self.layout.reset(&LayoutSettings::default());
        self.layout.append(&[font], &TextStyle::new(text, font_size, 0));

        let mut glyphs = Vec::new();
        let mut width: f32 = 0.0;
        let mut height: f32 = 0.0;

        for glyph in self.layout.glyphs() {
            let (metrics, coverage) = font.rasterize_config(glyph.key);
            if coverage.is_empty() {
                continue;
            }

            // Coverage becomes alpha over a solid color.
            let mut bitmap = Vec::with_capacity(coverage.len() * 4);
            for &alpha in &coverage {
                bitmap.extend_from_slice(&[color.r, color.g, color.b, alpha]);
            }

            width = width.max(glyph.x + metrics.width as f32);
            height = height.max(glyph.y + metrics.height as f32);

            glyphs.push(TextGlyph {
                x: glyph.x,
                y: glyph.y,
                width: metrics.width,
                height: metrics.height,
                bitmap,
            });
        }

        if glyphs.is_empty() {
            return None;
        }

        let ascent = font
            .horizontal_line_metrics(font_size)
            .map(|m| m.ascent)
            .unwrap_or(font_size);

        Some(TextRenderResult {
            glyphs,
            width: width.ceil() as u32,
            height: height.ceil() as u32,
            ascent,
        })
    }
}

pub struct TextRenderResult {
    pub glyphs: Vec<TextGlyph>,
    pub width: u32,
    pub height: u32,
    /// Distance from the top of the line box to the baseline
    pub ascent: f32,
}

pub struct TextGlyph {
    pub x: f32,
    pub y: f32,
    pub width: usize,
    pub height: usize,
    pub bitmap: Vec<u8>, // RGBA
}
