//! Rendering adapter: renderer-agnostic interface plus the render surface
//! lifecycle.
//!
//! A [`RenderSurface`] is handed a drawable surface on mount, builds a scene,
//! camera and renderer around it, runs a self-rescheduling frame loop and
//! tears everything down again on unmount.
//!
//! # Invariants
//! - Exactly one scene/camera/renderer triple exists per mount.
//! - Every resource acquired on mount is released exactly once on unmount.
//! - Frame requests outliving their mount never render.

mod backend;
mod frame;
mod headless;
mod surface;

pub use backend::{GraphicsBackend, RenderError, SceneRenderer};
pub use frame::{FrameHandle, FrameRequest, FrameScheduler, QueuedScheduler};
pub use headless::{HeadlessBackend, HeadlessRenderer, HeadlessSurface, RenderStats};
pub use surface::RenderSurface;
