use crate::backend::{GraphicsBackend, RenderError, SceneRenderer};
use crate::frame::{FrameHandle, FrameRequest, FrameScheduler};
use glam::Vec3;
use spincube_common::{Euler, Viewport};
use spincube_scene::{
    BasicMaterial, BoxGeometry, GeometryHandle, MaterialHandle, Mesh, ObjectId, PerspectiveCamera,
    Scene, SceneConfig,
};
use tracing::{debug, info, trace};

/// Everything that exists only while a surface is mounted.
struct Mounted<R> {
    scene: Scene,
    camera: PerspectiveCamera,
    renderer: R,
    cube: ObjectId,
    geometry: GeometryHandle,
    material: MaterialHandle,
    frames: FrameHandle,
    viewport: Viewport,
    frames_rendered: u64,
}

enum SurfaceState<R> {
    Unmounted,
    Mounted(Mounted<R>),
}

/// A 3D rendering context bound to a host-owned drawable surface.
///
/// State machine: `unmounted -> mounted -> unmounted`, remountable. Mounting
/// builds a scene with one spinning cube, a camera and a renderer, then starts
/// the frame loop through the host's [`FrameScheduler`]. Unmounting cancels
/// the loop and releases the renderer, geometry and material. Dropping a
/// mounted surface unmounts it.
pub struct RenderSurface<B: GraphicsBackend> {
    backend: B,
    config: SceneConfig,
    state: SurfaceState<B::Renderer>,
    generation: u64,
}

impl<B: GraphicsBackend> RenderSurface<B> {
    pub fn new(backend: B, config: SceneConfig) -> Self {
        Self {
            backend,
            config,
            state: SurfaceState::Unmounted,
            generation: 0,
        }
    }

    /// Mount onto `surface`.
    ///
    /// Returns `Ok(false)` without touching anything when the surface is not
    /// available yet or the component is already mounted; the host retries on
    /// its next lifecycle signal.
    pub fn on_mount(
        &mut self,
        surface: Option<B::Surface>,
        viewport: Viewport,
        scheduler: &mut impl FrameScheduler,
    ) -> Result<bool, RenderError> {
        let Some(surface) = surface else {
            debug!("drawable surface not available yet, mount skipped");
            return Ok(false);
        };
        if self.is_mounted() {
            debug!(generation = self.generation, "already mounted, mount ignored");
            return Ok(false);
        }

        let mut renderer = self.backend.create_renderer(surface, &viewport)?;

        let camera = PerspectiveCamera::for_viewport(
            self.config.fov_degrees,
            &viewport,
            self.config.near,
            self.config.far,
        )
        .with_position(Vec3::new(0.0, 0.0, self.config.camera_distance));

        let geometry = GeometryHandle(0);
        let material = MaterialHandle(0);
        renderer.upload_geometry(geometry, &BoxGeometry::unit());
        renderer.upload_material(material, &BasicMaterial::new(self.config.color()));

        let mut scene = Scene::new();
        let cube = scene.add(Mesh::new(geometry, material));

        self.generation += 1;
        let frames = FrameHandle::new(self.generation);
        scheduler.request_frame(frames.request());

        info!(
            generation = self.generation,
            width = viewport.width,
            height = viewport.height,
            scale_factor = viewport.scale_factor,
            aspect = camera.aspect,
            "render surface mounted"
        );

        self.state = SurfaceState::Mounted(Mounted {
            scene,
            camera,
            renderer,
            cube,
            geometry,
            material,
            frames,
            viewport,
            frames_rendered: 0,
        });
        Ok(true)
    }

    /// Run one frame-loop iteration for `request`.
    ///
    /// The next iteration is scheduled before anything else, then the cube
    /// advances by the configured step on x and y and one frame is rendered.
    /// Requests from a cancelled or earlier mount are dropped with `Ok(false)`.
    pub fn on_frame(
        &mut self,
        request: FrameRequest,
        scheduler: &mut impl FrameScheduler,
    ) -> Result<bool, RenderError> {
        let SurfaceState::Mounted(mounted) = &mut self.state else {
            trace!(generation = request.generation(), "frame after unmount dropped");
            return Ok(false);
        };
        if !request.is_live() || request.generation() != mounted.frames.generation() {
            trace!(generation = request.generation(), "stale frame request dropped");
            return Ok(false);
        }

        scheduler.request_frame(mounted.frames.request());

        let step = self.config.rotation_step;
        if let Some(mesh) = mounted.scene.get_mut(mounted.cube) {
            mesh.rotation = mesh.rotation.advanced_by(Euler::new(step, step, 0.0));
        }

        mounted.renderer.render(&mounted.scene, &mounted.camera)?;
        mounted.frames_rendered += 1;
        trace!(frame = mounted.frames_rendered, "frame rendered");
        Ok(true)
    }

    /// Tear down the current mount. Returns `false` if nothing was mounted.
    pub fn on_unmount(&mut self) -> bool {
        let SurfaceState::Mounted(mut mounted) =
            std::mem::replace(&mut self.state, SurfaceState::Unmounted)
        else {
            return false;
        };

        mounted.frames.cancel();
        if !mounted.renderer.release_geometry(mounted.geometry) {
            debug!(handle = mounted.geometry.0, "geometry already released");
        }
        if !mounted.renderer.release_material(mounted.material) {
            debug!(handle = mounted.material.0, "material already released");
        }
        mounted.renderer.dispose();

        info!(
            generation = mounted.frames.generation(),
            frames = mounted.frames_rendered,
            "render surface unmounted"
        );
        true
    }

    pub fn is_mounted(&self) -> bool {
        matches!(self.state, SurfaceState::Mounted(_))
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Number of mounts so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn camera(&self) -> Option<&PerspectiveCamera> {
        self.mounted().map(|m| &m.camera)
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.mounted().map(|m| &m.scene)
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.mounted().map(|m| m.viewport)
    }

    pub fn renderer(&self) -> Option<&B::Renderer> {
        self.mounted().map(|m| &m.renderer)
    }

    /// Orientation of the animated cube.
    pub fn object_rotation(&self) -> Option<Euler> {
        self.mounted()
            .and_then(|m| m.scene.get(m.cube))
            .map(|mesh| mesh.rotation)
    }

    /// Frames rendered by the current mount.
    pub fn frames_rendered(&self) -> u64 {
        self.mounted().map_or(0, |m| m.frames_rendered)
    }

    fn mounted(&self) -> Option<&Mounted<B::Renderer>> {
        match &self.state {
            SurfaceState::Mounted(m) => Some(m),
            SurfaceState::Unmounted => None,
        }
    }
}

impl<B: GraphicsBackend> Drop for RenderSurface<B> {
    fn drop(&mut self) {
        self.on_unmount();
    }
}
