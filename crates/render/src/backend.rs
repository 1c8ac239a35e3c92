use spincube_common::Viewport;
use spincube_scene::{
    BasicMaterial, BoxGeometry, GeometryHandle, MaterialHandle, PerspectiveCamera, Scene,
};

/// Errors surfaced by graphics backends.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("no compatible graphics adapter found")]
    NoAdapter,
    #[error("failed to create drawable surface: {0}")]
    Surface(String),
    #[error("failed to request device: {0}")]
    Device(String),
    #[error("failed to acquire frame: {0}")]
    Frame(String),
    #[error("{kind} {handle} was never uploaded")]
    MissingResource { kind: &'static str, handle: u64 },
    #[error("renderer used after dispose")]
    Disposed,
}

/// Creates renderers bound to a host-provided drawable surface.
pub trait GraphicsBackend {
    /// The drawable target handed over by the host.
    type Surface;
    type Renderer: SceneRenderer;

    /// Bind a renderer to `surface`, sized to the viewport's physical pixels.
    fn create_renderer(
        &mut self,
        surface: Self::Surface,
        viewport: &Viewport,
    ) -> Result<Self::Renderer, RenderError>;
}

/// A renderer owning GPU-side resources that must be released explicitly.
///
/// Geometry and materials are uploaded by handle; the scene refers to them by
/// the same handles when it is rendered.
pub trait SceneRenderer {
    fn upload_geometry(&mut self, handle: GeometryHandle, geometry: &BoxGeometry);

    fn upload_material(&mut self, handle: MaterialHandle, material: &BasicMaterial);

    /// Draw one frame of `scene` through `camera`.
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), RenderError>;

    /// Returns `false` if nothing was uploaded under `handle`.
    fn release_geometry(&mut self, handle: GeometryHandle) -> bool;

    /// Returns `false` if nothing was uploaded under `handle`.
    fn release_material(&mut self, handle: MaterialHandle) -> bool;

    /// Release every remaining GPU resource. Calling it twice is a no-op.
    fn dispose(&mut self);
}
