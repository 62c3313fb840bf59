mod app;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use app::App;
use gamesales_treemap::chart::Chart;
use gamesales_treemap::config::ChartConfig;
use gamesales_treemap::data;
use gamesales_treemap::layout::TileMethod;
use gamesales_treemap::render::svg;
use gamesales_treemap::render::RenderState;

#[derive(Parser)]
#[command(name = "gamesales-treemap")]
#[command(about = "Treemap of the best-selling video games, grouped by platform")]
#[command(version)]
struct Cli {
    /// Dataset JSON (default: the embedded top-100 list)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Chart configuration TOML
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `gamesales_treemap=trace`
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Treemap width (px)
    #[arg(long, global = true)]
    width: Option<f64>,

    /// Treemap height (px)
    #[arg(long, global = true)]
    height: Option<f64>,

    /// Tiling method
    #[arg(long, global = true, value_enum)]
    tile: Option<TileMethod>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the treemap as SVG or as a complete HTML page
    Render {
        #[arg(short, long, value_enum, default_value_t = Format::Svg)]
        format: Format,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the legend SVG
    Legend {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the sorted hierarchy and tile rectangles
    Inspect,

    /// Open an interactive window with hover tooltips
    View {
        /// TTF/OTF font for labels (default: a system font)
        #[arg(long)]
        font: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Svg,
    Html,
}

/// winit handler for the `view` command.
struct ViewerApp {
    app: App,
    render_state: Option<RenderState>,
    window: Option<Arc<Window>>,
}

impl ViewerApp {
    fn new(app: App) -> Self {
        Self {
            app,
            render_state: None,
            window: None,
        }
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let (width, height) = self.app.logical_size();
        let attrs = WindowAttributes::default()
            .with_title(self.app.chart.config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(width, height));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                tracing::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());
        self.app.set_scale_factor(window.scale_factor());

        match pollster::block_on(RenderState::new(window.clone())) {
            Ok(state) => {
                let size = window.inner_size();
                tracing::info!(
                    "Window initialized: scale_factor={:.3}, physical_size={}x{}",
                    window.scale_factor(),
                    size.width,
                    size.height
                );
                self.render_state = Some(state);
                window.request_redraw();
            }
            Err(e) => {
                tracing::error!("Failed to initialize GPU: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(render) = &mut self.render_state {
                    render.resize(size.width, size.height);
                    self.app.needs_rebuild = true;
                    self.request_redraw();
                }
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                tracing::info!("Scale factor changed: {:.3}", scale_factor);
                self.app.set_scale_factor(scale_factor);
                self.request_redraw();
            }

            WindowEvent::CursorMoved { position, .. } => {
                if self.app.pointer_moved(position.x, position.y) {
                    self.request_redraw();
                }
            }

            WindowEvent::CursorLeft { .. } => {
                if self.app.pointer_left() {
                    self.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => {
                self.app.rebuild_scene();
                if let Some(render) = &mut self.render_state {
                    if let Err(e) = render.render(&self.app.scene) {
                        tracing::error!("Render error: {}", e);
                    }
                }
            }

            _ => {}
        }
    }
}

fn init_logging(level: &str) -> Result<()> {
    let directive = if level.contains('=') {
        level.to_string()
    } else {
        format!("gamesales_treemap={level}")
    };
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(directive.parse().context("invalid --log-level")?),
        )
        .init();
    Ok(())
}

fn load_chart(cli: &Cli) -> Result<Chart> {
    let mut config = ChartConfig::load(cli.config.as_deref())?;
    if let Some(width) = cli.width {
        config.treemap.width = width;
    }
    if let Some(height) = cli.height {
        config.treemap.height = height;
    }
    if let Some(tile) = cli.tile {
        config.treemap.tile = tile;
    }

    let dataset = data::load(cli.data.as_deref())?;
    Ok(Chart::build(&dataset, &config))
}

fn inspect(chart: &Chart) {
    let tree = &chart.tree;
    println!("=== {} ===", chart.config.title);
    for id in tree.pre_order() {
        let node = tree.get(id);
        println!(
            "{}{} (height={}, value={})",
            "  ".repeat(node.depth as usize),
            node.name,
            node.height,
            node.sum
        );
    }

    println!("\n{} tiles:", chart.tiles.len());
    for tile in &chart.tiles {
        println!(
            "  {:<60} {:>7.1},{:>6.1}  {:>6.1}x{:<6.1} {}",
            tile.id,
            tile.bounds.x0,
            tile.bounds.y0,
            tile.width(),
            tile.height(),
            tile.fill.to_hex()
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let chart = load_chart(&cli)?;

    match cli.command {
        Commands::Render { format, output } => {
            let text = match format {
                Format::Svg => svg::render_treemap_svg(&chart),
                Format::Html => svg::render_html(&chart),
            };
            svg::write_output(&text, output.as_deref())?;
        }
        Commands::Legend { output } => {
            svg::write_output(&svg::render_legend_svg(&chart), output.as_deref())?;
        }
        Commands::Inspect => inspect(&chart),
        Commands::View { font } => {
            tracing::info!("Opening viewer with {} tiles", chart.tiles.len());
            let event_loop = EventLoop::new()?;
            event_loop.set_control_flow(ControlFlow::Wait);

            let mut viewer = ViewerApp::new(App::new(chart, font.as_deref()));
            event_loop.run_app(&mut viewer)?;
        }
    }

    Ok(())
}
