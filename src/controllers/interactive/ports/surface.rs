use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::view::{PreviewTransform, SurfaceSize};

/// Where composited frames end up.
///
/// `paint` receives a buffer already checked against the current size.
/// `apply_preview` is called whenever the displayed image should move without
/// new pixels, and once with the identity right after each `paint`.
pub trait Surface {
    fn paint(&mut self, buffer: &PixelBuffer);

    fn apply_preview(&mut self, transform: &PreviewTransform);

    fn resize(&mut self, size: SurfaceSize);
}
