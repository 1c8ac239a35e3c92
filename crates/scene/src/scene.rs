use crate::geometry::{GeometryHandle, MaterialHandle};
use serde::{Deserialize, Serialize};
use spincube_common::Euler;
use std::collections::BTreeMap;
use tracing::debug;

/// Identifier of an object inside one scene. Never reused within that scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

/// A renderable object: geometry + material with a mutable orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub geometry: GeometryHandle,
    pub material: MaterialHandle,
    pub position: glam::Vec3,
    pub rotation: Euler,
}

impl Mesh {
    pub fn new(geometry: GeometryHandle, material: MaterialHandle) -> Self {
        Self {
            geometry,
            material,
            position: glam::Vec3::ZERO,
            rotation: Euler::ZERO,
        }
    }

    /// Model matrix from position and XYZ Euler rotation.
    pub fn model_matrix(&self) -> glam::Mat4 {
        glam::Mat4::from_rotation_translation(self.rotation.to_quat(), self.position)
    }
}

/// Mutable container of renderable objects.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: BTreeMap<ObjectId, Mesh>,
    next_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mesh and return its id.
    pub fn add(&mut self, mesh: Mesh) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.insert(id, mesh);
        debug!(object = id.0, geometry = mesh.geometry.0, material = mesh.material.0, "mesh added");
        id
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<Mesh> {
        self.objects.remove(&id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&Mesh> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Mesh> {
        self.objects.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> impl Iterator<Item = (&ObjectId, &Mesh)> {
        self.objects.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube() -> Mesh {
        Mesh::new(GeometryHandle(0), MaterialHandle(0))
    }

    #[test]
    fn add_assigns_distinct_ids() {
        let mut scene = Scene::new();
        let a = scene.add(cube());
        let b = scene.add(cube());
        assert_ne!(a, b);
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn ids_not_reused_after_remove() {
        let mut scene = Scene::new();
        let a = scene.add(cube());
        scene.remove(a);
        let b = scene.add(cube());
        assert_ne!(a, b);
        assert!(scene.get(a).is_none());
    }

    #[test]
    fn get_mut_updates_rotation() {
        let mut scene = Scene::new();
        let id = scene.add(cube());
        scene.get_mut(id).unwrap().rotation.x = 0.25;
        assert_eq!(scene.get(id).unwrap().rotation.x, 0.25);
    }

    #[test]
    fn identity_mesh_has_identity_model() {
        assert_eq!(cube().model_matrix(), glam::Mat4::IDENTITY);
    }
}
