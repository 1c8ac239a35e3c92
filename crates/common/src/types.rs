use glam::{EulerRot, Quat};
use std::f32::consts::TAU;
use serde::{Deserialize, Serialize};

/// Viewport dimensions sampled from the host at mount time.
///
/// `width` and `height` are logical units; `scale_factor` is the device pixel
/// density. The viewport is read once and never tracked afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scale_factor: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, scale_factor: f64) -> Self {
        Self {
            width,
            height,
            scale_factor,
        }
    }

    /// Width over height. A zero height is clamped to one.
    pub fn aspect_ratio(&self) -> f32 {
        (self.width / self.height.max(1.0)) as f32
    }

    /// Backing-store size in physical pixels, never smaller than 1x1.
    pub fn physical_size(&self) -> (u32, u32) {
        let scale = if self.scale_factor > 0.0 {
            self.scale_factor
        } else {
            1.0
        };
        let w = (self.width * scale).round().max(1.0) as u32;
        let h = (self.height * scale).round().max(1.0) as u32;
        (w, h)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0, 1.0)
    }
}

/// Orientation as Euler angles in radians, applied in XYZ order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Euler {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Euler {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn to_quat(self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.x, self.y, self.z)
    }

    /// Add `delta` per axis, keeping every angle in `0..TAU`.
    ///
    /// Angles are reduced before the add as well, so an orientation that was
    /// set far outside one turn still moves by `delta`.
    pub fn advanced_by(self, delta: Euler) -> Self {
        let step = |angle: f32, d: f32| (angle.rem_euclid(TAU) + d).rem_euclid(TAU);
        Self::new(
            step(self.x, delta.x),
            step(self.y, delta.y),
            step(self.z, delta.z),
        )
    }
}

/// Linear RGBA colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Build an opaque colour from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::rgb(channel(16), channel(8), channel(0))
    }

    /// Pack back into `0xRRGGBB`, dropping alpha.
    pub fn to_hex(self) -> u32 {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::GREEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_ratio_from_dimensions() {
        let vp = Viewport::new(800.0, 600.0, 1.0);
        assert!((vp.aspect_ratio() - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn zero_height_does_not_divide_by_zero() {
        let vp = Viewport::new(640.0, 0.0, 1.0);
        assert!(vp.aspect_ratio().is_finite());
        assert_eq!(vp.physical_size(), (640, 1));
    }

    #[test]
    fn physical_size_applies_pixel_density() {
        let vp = Viewport::new(800.0, 600.0, 2.0);
        assert_eq!(vp.physical_size(), (1600, 1200));

        let hidpi = Viewport::new(1280.0, 720.0, 1.5);
        assert_eq!(hidpi.physical_size(), (1920, 1080));
    }

    #[test]
    fn euler_zero_is_identity() {
        assert_eq!(Euler::ZERO.to_quat(), Quat::IDENTITY);
    }

    #[test]
    fn euler_single_axis_matches_axis_angle() {
        let q = Euler::new(0.0, 0.5, 0.0).to_quat();
        let expected = Quat::from_rotation_y(0.5);
        assert!(q.abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn advance_wraps_past_full_turn() {
        let e = Euler::new(TAU - 0.005, 1.0, 0.0).advanced_by(Euler::new(0.01, 0.01, 0.0));
        assert!((e.x - 0.005).abs() < 1e-5, "x = {}", e.x);
        assert!((e.y - 1.01).abs() < 1e-6);
        assert_eq!(e.z, 0.0);
    }

    #[test]
    fn advance_moves_huge_angles() {
        let before = Euler::new(524_288.0, 524_288.0, 0.0);
        let after = before.advanced_by(Euler::new(0.01, 0.01, 0.0));
        assert!((0.0..TAU).contains(&after.x));
        assert!(!after.to_quat().abs_diff_eq(before.to_quat(), 1e-4));
    }

    #[test]
    fn color_hex_round_trip() {
        let c = Color::from_hex(0x00ff00);
        assert_eq!(c, Color::GREEN);
        assert_eq!(Color::from_hex(0x336699).to_hex(), 0x336699);
    }
}
