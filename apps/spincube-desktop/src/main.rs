use anyhow::{Context, Result};
use clap::Parser;
use spincube_common::Viewport;
use spincube_render::{FrameRequest, FrameScheduler, RenderSurface};
use spincube_render_wgpu::WgpuBackend;
use spincube_scene::SceneConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "spincube-desktop", about = "A spinning cube in a window")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML scene config; built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial window width in logical pixels
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value = "720")]
    height: u32,

    /// Window title
    #[arg(long, default_value = "spincube")]
    title: String,
}

/// Display-refresh primitive backed by winit redraw requests.
///
/// Holds at most one pending request; it is handed back to the render
/// surface when `RedrawRequested` arrives.
#[derive(Default)]
struct RedrawScheduler {
    window: Option<Arc<Window>>,
    pending: Option<FrameRequest>,
}

impl RedrawScheduler {
    fn take(&mut self) -> Option<FrameRequest> {
        self.pending.take()
    }
}

impl FrameScheduler for RedrawScheduler {
    fn request_frame(&mut self, request: FrameRequest) {
        self.pending = Some(request);
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

struct SpinCubeApp {
    surface: RenderSurface<WgpuBackend>,
    scheduler: RedrawScheduler,
    window: Option<Arc<Window>>,
    title: String,
    initial_size: LogicalSize<u32>,
    error: Option<anyhow::Error>,
}

impl SpinCubeApp {
    fn new(config: SceneConfig, title: String, initial_size: LogicalSize<u32>) -> Self {
        Self {
            surface: RenderSurface::new(WgpuBackend::default(), config),
            scheduler: RedrawScheduler::default(),
            window: None,
            title,
            initial_size,
            error: None,
        }
    }

    fn ensure_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        if self.window.is_some() {
            return Ok(());
        }
        // Viewport is sampled once at mount, so the window keeps its size.
        let attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(self.initial_size)
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );
        self.scheduler.window = Some(Arc::clone(&window));
        self.window = Some(window);
        Ok(())
    }

    fn mount(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        self.ensure_window(event_loop)?;

        let viewport = self.window.as_ref().map_or_else(Viewport::default, |window| {
            let scale = window.scale_factor();
            let size = window.inner_size().to_logical::<f64>(scale);
            Viewport::new(size.width, size.height, scale)
        });
        let target = self
            .window
            .clone()
            .map(wgpu::SurfaceTarget::<'static>::from);

        self.surface
            .on_mount(target, viewport, &mut self.scheduler)
            .context("failed to mount render surface")?;
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        tracing::error!("{err:#}");
        self.surface.on_unmount();
        self.error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for SpinCubeApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let Err(err) = self.mount(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        // Some platforms invalidate the drawable surface while suspended.
        self.surface.on_unmount();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.surface.on_unmount();
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let Some(request) = self.scheduler.take() else {
                    return;
                };
                if let Err(err) = self.surface.on_frame(request, &mut self.scheduler) {
                    self.fail(event_loop, anyhow::Error::new(err).context("frame failed"));
                }
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.surface.on_unmount();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = match &cli.config {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SceneConfig::default(),
    };

    tracing::info!(?config, "spincube-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = SpinCubeApp::new(
        config,
        cli.title,
        LogicalSize::new(cli.width.max(1), cli.height.max(1)),
    );
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
