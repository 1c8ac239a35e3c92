use crate::backend::{GraphicsBackend, RenderError, SceneRenderer};
use spincube_common::Viewport;
use spincube_scene::{
    BasicMaterial, BoxGeometry, GeometryHandle, MaterialHandle, PerspectiveCamera, Scene,
};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::rc::Rc;
use tracing::debug;

/// Lifecycle counters shared between a [`HeadlessBackend`] and every renderer
/// it creates. They survive renderer disposal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub renderers_created: u32,
    pub renderers_disposed: u32,
    pub geometries_uploaded: u32,
    pub geometries_released: u32,
    pub materials_uploaded: u32,
    pub materials_released: u32,
    pub frames_rendered: u64,
}

/// Stand-in for a drawable surface when there is no display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessSurface {
    pub name: String,
}

impl HeadlessSurface {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Text backend: every rendered frame becomes a human-readable description.
///
/// Useful for logging and for exercising the render surface lifecycle in
/// tests without a GPU. Clones share the same counters.
#[derive(Debug, Clone, Default)]
pub struct HeadlessBackend {
    stats: Rc<RefCell<RenderStats>>,
    last_frame: Rc<RefCell<String>>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> RenderStats {
        *self.stats.borrow()
    }

    /// Text of the most recently rendered frame, empty before the first one.
    pub fn last_frame(&self) -> String {
        self.last_frame.borrow().clone()
    }
}

impl GraphicsBackend for HeadlessBackend {
    type Surface = HeadlessSurface;
    type Renderer = HeadlessRenderer;

    fn create_renderer(
        &mut self,
        surface: HeadlessSurface,
        viewport: &Viewport,
    ) -> Result<HeadlessRenderer, RenderError> {
        self.stats.borrow_mut().renderers_created += 1;
        let size = viewport.physical_size();
        debug!(
            surface = %surface.name,
            width = size.0,
            height = size.1,
            "headless renderer created"
        );
        Ok(HeadlessRenderer {
            surface,
            size,
            geometries: BTreeMap::new(),
            materials: BTreeMap::new(),
            disposed: false,
            stats: Rc::clone(&self.stats),
            last_frame: Rc::clone(&self.last_frame),
        })
    }
}

#[derive(Debug)]
pub struct HeadlessRenderer {
    surface: HeadlessSurface,
    size: (u32, u32),
    geometries: BTreeMap<GeometryHandle, (usize, usize)>,
    materials: BTreeMap<MaterialHandle, BasicMaterial>,
    disposed: bool,
    stats: Rc<RefCell<RenderStats>>,
    last_frame: Rc<RefCell<String>>,
}

impl HeadlessRenderer {
    /// Output size in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn describe(&self, scene: &Scene, camera: &PerspectiveCamera) -> Result<String, RenderError> {
        let frame = self.stats.borrow().frames_rendered + 1;
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Frame {frame} ({}x{} on {}) ===",
            self.size.0, self.size.1, self.surface.name
        );
        let _ = writeln!(
            out,
            "Camera: fov={:.0} aspect={:.3} near={} far={} pos=({:.1}, {:.1}, {:.1})",
            camera.fov_degrees,
            camera.aspect,
            camera.near,
            camera.far,
            camera.position.x,
            camera.position.y,
            camera.position.z
        );
        let _ = writeln!(out, "Objects: {}", scene.len());

        for (id, mesh) in scene.objects() {
            let (verts, indices) = *self.geometries.get(&mesh.geometry).ok_or(
                RenderError::MissingResource {
                    kind: "geometry",
                    handle: mesh.geometry.0,
                },
            )?;
            let material = self.materials.get(&mesh.material).ok_or(
                RenderError::MissingResource {
                    kind: "material",
                    handle: mesh.material.0,
                },
            )?;
            let r = mesh.rotation;
            let _ = writeln!(
                out,
                "  [{}] verts={verts} indices={indices} color=#{:06x} rot=({:.3}, {:.3}, {:.3})",
                id.0,
                material.color.to_hex(),
                r.x,
                r.y,
                r.z
            );
        }
        Ok(out)
    }
}

impl SceneRenderer for HeadlessRenderer {
    fn upload_geometry(&mut self, handle: GeometryHandle, geometry: &BoxGeometry) {
        let data = geometry.mesh_data();
        self.geometries
            .insert(handle, (data.vertex_count(), data.index_count()));
        self.stats.borrow_mut().geometries_uploaded += 1;
    }

    fn upload_material(&mut self, handle: MaterialHandle, material: &BasicMaterial) {
        self.materials.insert(handle, *material);
        self.stats.borrow_mut().materials_uploaded += 1;
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), RenderError> {
        if self.disposed {
            return Err(RenderError::Disposed);
        }
        let text = self.describe(scene, camera)?;
        *self.last_frame.borrow_mut() = text;
        self.stats.borrow_mut().frames_rendered += 1;
        Ok(())
    }

    fn release_geometry(&mut self, handle: GeometryHandle) -> bool {
        let released = self.geometries.remove(&handle).is_some();
        if released {
            self.stats.borrow_mut().geometries_released += 1;
        }
        released
    }

    fn release_material(&mut self, handle: MaterialHandle) -> bool {
        let released = self.materials.remove(&handle).is_some();
        if released {
            self.stats.borrow_mut().materials_released += 1;
        }
        released
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.geometries.clear();
        self.materials.clear();
        self.disposed = true;
        self.stats.borrow_mut().renderers_disposed += 1;
        debug!(surface = %self.surface.name, "headless renderer disposed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spincube_scene::Mesh;

    fn renderer(backend: &mut HeadlessBackend) -> HeadlessRenderer {
        backend
            .create_renderer(HeadlessSurface::new("test"), &Viewport::new(800.0, 600.0, 2.0))
            .unwrap()
    }

    #[test]
    fn renderer_sized_in_physical_pixels() {
        let mut backend = HeadlessBackend::new();
        let r = renderer(&mut backend);
        assert_eq!(r.size(), (1600, 1200));
        assert_eq!(backend.stats().renderers_created, 1);
    }

    #[test]
    fn render_describes_scene() {
        let mut backend = HeadlessBackend::new();
        let mut r = renderer(&mut backend);
        r.upload_geometry(GeometryHandle(0), &BoxGeometry::unit());
        r.upload_material(MaterialHandle(0), &BasicMaterial::default());

        let mut scene = Scene::new();
        scene.add(Mesh::new(GeometryHandle(0), MaterialHandle(0)));
        r.render(&scene, &PerspectiveCamera::default()).unwrap();

        let text = backend.last_frame();
        assert!(text.contains("Frame 1"));
        assert!(text.contains("Objects: 1"));
        assert!(text.contains("verts=24 indices=36"));
        assert!(text.contains("color=#00ff00"));
        assert_eq!(backend.stats().frames_rendered, 1);
    }

    #[test]
    fn render_with_missing_geometry_fails() {
        let mut backend = HeadlessBackend::new();
        let mut r = renderer(&mut backend);
        let mut scene = Scene::new();
        scene.add(Mesh::new(GeometryHandle(7), MaterialHandle(0)));
        let err = r.render(&scene, &PerspectiveCamera::default()).unwrap_err();
        assert!(matches!(err, RenderError::MissingResource { kind: "geometry", handle: 7 }));
    }

    #[test]
    fn release_unknown_handle_is_false() {
        let mut backend = HeadlessBackend::new();
        let mut r = renderer(&mut backend);
        assert!(!r.release_geometry(GeometryHandle(3)));
        assert!(!r.release_material(MaterialHandle(3)));
        assert_eq!(backend.stats().geometries_released, 0);
    }

    #[test]
    fn dispose_is_idempotent_and_blocks_render() {
        let mut backend = HeadlessBackend::new();
        let mut r = renderer(&mut backend);
        r.dispose();
        r.dispose();
        assert!(r.is_disposed());
        assert_eq!(backend.stats().renderers_disposed, 1);
        assert!(matches!(
            r.render(&Scene::new(), &PerspectiveCamera::default()),
            Err(RenderError::Disposed)
        ));
    }
}
