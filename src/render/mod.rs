pub mod colors;
pub mod label;
pub mod scene;
pub mod svg;
pub mod text;

use std::num::NonZeroUsize;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use vello::util::{RenderContext, RenderSurface};
use vello::wgpu;
use vello::{AaConfig, AaSupport, RenderParams, Renderer, RendererOptions, Scene};
use winit::window::Window;

use colors::Rgb;

/// Holds all GPU rendering state for the viewer window.
pub struct RenderState {
    context: RenderContext,
    surface: RenderSurface<'static>,
    renderer: Renderer,
}

impl RenderState {
    /// Initialize the GPU rendering pipeline.
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let size = window.inner_size();
        let mut context = RenderContext::new();
        let surface = context
            .create_surface(
                window,
                size.width.max(1),
                size.height.max(1),
                wgpu::PresentMode::AutoVsync,
            )
            .await
            .map_err(|e| anyhow!("failed to create render surface: {e}"))?;

        let device = &context.devices[surface.dev_id].device;
        let renderer = Renderer::new(device, renderer_options(surface.format))
            .map_err(|e| anyhow!("failed to create vello renderer: {e}"))?;

        tracing::info!(
            "GPU surface ready: {}x{} ({:?})",
            surface.config.width,
            surface.config.height,
            surface.format
        );

        Ok(Self {
            context,
            surface,
            renderer,
        })
    }

    /// Resize the surface (call on window resize).
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize_surface(&mut self.surface, width.max(1), height.max(1));
    }

    pub fn size(&self) -> (u32, u32) {
        (self.surface.config.width, self.surface.config.height)
    }

    /// Render a scene to the surface.
    pub fn render(&mut self, scene: &Scene) -> Result<()> {
        let handle = &self.context.devices[self.surface.dev_id];
        let (width, height) = self.size();

        let surface_texture = self.surface.surface.get_current_texture()?;
        self.renderer
            .render_to_surface(
                &handle.device,
                &handle.queue,
                scene,
                &surface_texture,
                &RenderParams {
                    base_color: Rgb::WHITE.to_peniko(),
                    width,
                    height,
                    antialiasing_method: AaConfig::Msaa16,
                },
            )
            .map_err(|e| anyhow!("vello render failed: {e}"))?;

        surface_texture.present();
        Ok(())
    }
}

/// Vello renders straight into swapchain textures of `surface_format`.
fn renderer_options(surface_format: wgpu::TextureFormat) -> RendererOptions {
    RendererOptions {
        surface_format: Some(surface_format),
        use_cpu: false,
        antialiasing_support: AaSupport::all(),
        num_init_threads: NonZeroUsize::new(1),
    }
}
