//! Scene graph data model.
//!
//! Holds the CPU-side description of what gets drawn: a scene of meshes, each
//! pairing a geometry handle with a material handle and an orientation, plus
//! the perspective camera the scene is viewed through.
//!
//! # Invariants
//! - The scene stores handles only; GPU resources live in the renderer.
//! - Iteration order over objects is deterministic (BTreeMap).

pub mod camera;
pub mod config;
pub mod geometry;
pub mod scene;

pub use camera::PerspectiveCamera;
pub use config::{ConfigError, SceneConfig};
pub use geometry::{BasicMaterial, BoxGeometry, GeometryHandle, MaterialHandle, MeshData};
pub use scene::{Mesh, ObjectId, Scene};
