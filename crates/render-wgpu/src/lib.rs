//! wgpu render backend.
//!
//! Draws every mesh in a scene with a flat, unlit colour taken from its
//! material. One camera uniform per frame, one model matrix per mesh.
//!
//! # Invariants
//! - Every buffer and texture created here is destroyed by `dispose`.
//! - Surface size is fixed when the renderer is created.

mod backend;
mod gpu;
mod shaders;

pub use backend::WgpuBackend;
pub use gpu::WgpuRenderer;
