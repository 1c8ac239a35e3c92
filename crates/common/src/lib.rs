//! Shared value types: viewport sampling, Euler orientation, colours.

mod types;

pub use types::{Color, Euler, Viewport};
