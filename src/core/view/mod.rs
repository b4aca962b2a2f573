//! View state shared by the input, scheduling and compositing layers.
//!
//! [`Viewport`] is the source of truth for what the engine renders;
//! [`PreviewTransform`] only describes how the last frame is displaced on
//! screen until the next one arrives. The two are never merged.

pub mod preview_transform;
pub mod surface_size;
pub mod viewport;

pub use preview_transform::{CssRect, PreviewTransform};
pub use surface_size::SurfaceSize;
pub use viewport::{Viewport, ViewportError};
