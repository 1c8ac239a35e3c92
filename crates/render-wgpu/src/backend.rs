use crate::gpu::WgpuRenderer;
use spincube_common::Viewport;
use spincube_render::{GraphicsBackend, RenderError};
use tracing::info;

/// Creates [`WgpuRenderer`]s on host-provided window surfaces.
///
/// Each renderer gets its own adapter, device and queue, so nothing GPU-side
/// is shared between mounts.
pub struct WgpuBackend {
    instance: wgpu::Instance,
    power_preference: wgpu::PowerPreference,
}

impl Default for WgpuBackend {
    fn default() -> Self {
        Self::new(wgpu::PowerPreference::HighPerformance)
    }
}

impl WgpuBackend {
    pub fn new(power_preference: wgpu::PowerPreference) -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        Self {
            instance,
            power_preference,
        }
    }
}

impl GraphicsBackend for WgpuBackend {
    type Surface = wgpu::SurfaceTarget<'static>;
    type Renderer = WgpuRenderer;

    fn create_renderer(
        &mut self,
        target: wgpu::SurfaceTarget<'static>,
        viewport: &Viewport,
    ) -> Result<WgpuRenderer, RenderError> {
        let surface = self
            .instance
            .create_surface(target)
            .map_err(|e| RenderError::Surface(e.to_string()))?;

        let adapter = pollster::block_on(self.instance.request_adapter(
            &wgpu::RequestAdapterOptions {
                power_preference: self.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            },
        ))
        .ok_or(RenderError::NoAdapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("spincube_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .map_err(|e| RenderError::Device(e.to_string()))?;

        let (width, height) = viewport.physical_size();
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first())
            .copied()
            .ok_or_else(|| RenderError::Surface("surface reports no formats".into()))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let adapter_info = adapter.get_info();
        info!(
            backend = adapter_info.backend.to_str(),
            adapter = %adapter_info.name,
            width,
            height,
            ?format,
            "GPU initialized"
        );

        Ok(WgpuRenderer::new(surface, device, queue, config))
    }
}
