use serde::{Deserialize, Serialize};
use spincube_common::Color;

/// A handle referencing geometry uploaded to a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GeometryHandle(pub u64);

/// A handle referencing a material uploaded to a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MaterialHandle(pub u64);

/// Axis-aligned box centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxGeometry {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Default for BoxGeometry {
    fn default() -> Self {
        Self::unit()
    }
}

/// Indexed triangle list.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u16>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }
}

impl BoxGeometry {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// 1x1x1 cube.
    pub fn unit() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    /// Four vertices per face, wound counter-clockwise seen from outside.
    pub fn mesh_data(&self) -> MeshData {
        let x = self.width * 0.5;
        let y = self.height * 0.5;
        let z = self.depth * 0.5;

        #[rustfmt::skip]
        let faces: [[[f32; 3]; 4]; 6] = [
            [[-x, -y,  z], [ x, -y,  z], [ x,  y,  z], [-x,  y,  z]], // +z
            [[ x, -y, -z], [-x, -y, -z], [-x,  y, -z], [ x,  y, -z]], // -z
            [[ x, -y,  z], [ x, -y, -z], [ x,  y, -z], [ x,  y,  z]], // +x
            [[-x, -y, -z], [-x, -y,  z], [-x,  y,  z], [-x,  y, -z]], // -x
            [[-x,  y,  z], [ x,  y,  z], [ x,  y, -z], [-x,  y, -z]], // +y
            [[-x, -y, -z], [ x, -y, -z], [ x, -y,  z], [-x, -y,  z]], // -y
        ];

        let mut positions = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for corners in faces {
            let base = positions.len() as u16;
            positions.extend_from_slice(&corners);
            indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        }

        MeshData { positions, indices }
    }
}

/// Unlit material: every fragment gets the same colour.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BasicMaterial {
    pub color: Color,
}

impl BasicMaterial {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_cube_counts() {
        let data = BoxGeometry::unit().mesh_data();
        assert_eq!(data.vertex_count(), 24);
        assert_eq!(data.index_count(), 36);
        assert!(data.indices.iter().all(|&i| (i as usize) < data.vertex_count()));
    }

    #[test]
    fn unit_cube_extents() {
        let data = BoxGeometry::unit().mesh_data();
        for p in &data.positions {
            for c in p {
                assert_eq!(c.abs(), 0.5);
            }
        }
    }

    #[test]
    fn box_respects_dimensions() {
        let data = BoxGeometry::new(2.0, 4.0, 6.0).mesh_data();
        let max_x = data.positions.iter().map(|p| p[0]).fold(f32::MIN, f32::max);
        let max_y = data.positions.iter().map(|p| p[1]).fold(f32::MIN, f32::max);
        let max_z = data.positions.iter().map(|p| p[2]).fold(f32::MIN, f32::max);
        assert_eq!((max_x, max_y, max_z), (1.0, 2.0, 3.0));
    }

    #[test]
    fn face_winding_is_counter_clockwise_from_outside() {
        let data = BoxGeometry::unit().mesh_data();
        for tri in data.indices.chunks(3) {
            let [a, b, c] =
                [tri[0], tri[1], tri[2]].map(|i| glam::Vec3::from(data.positions[i as usize]));
            // Box is centred on the origin, so the centroid points outwards.
            let outward = (a + b + c) / 3.0;
            assert!((b - a).cross(c - a).dot(outward) > 0.0);
        }
    }

    #[test]
    fn default_material_is_green() {
        assert_eq!(BasicMaterial::default().color.to_hex(), 0x00ff00);
    }
}
