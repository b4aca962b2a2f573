use crate::controllers::interactive::ports::surface::Surface;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::view::{PreviewTransform, SurfaceSize};
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeError {
    /// The buffer was rendered for a different surface size.
    DimensionMismatch {
        surface: SurfaceSize,
        buffer: SurfaceSize,
    },
}

impl fmt::Display for CompositeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { surface, buffer } => write!(
                f,
                "buffer is {}x{} but the surface is {}x{}",
                buffer.width, buffer.height, surface.width, surface.height
            ),
        }
    }
}

impl Error for CompositeError {}

/// Owns the preview transform and is the only place that resets it.
pub struct Compositor<S> {
    surface: S,
    size: SurfaceSize,
    preview: PreviewTransform,
}

impl<S: Surface> Compositor<S> {
    pub fn new(mut surface: S, size: SurfaceSize) -> Self {
        surface.resize(size);
        Self {
            surface,
            size,
            preview: PreviewTransform::IDENTITY,
        }
    }

    #[must_use]
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    #[must_use]
    pub fn preview(&self) -> &PreviewTransform {
        &self.preview
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Paints a finished frame and snaps the preview back to identity.
    pub fn composite(&mut self, buffer: PixelBuffer) -> Result<(), CompositeError> {
        let buffer_size = SurfaceSize::new(buffer.width(), buffer.height());
        if buffer_size != self.size {
            return Err(CompositeError::DimensionMismatch {
                surface: self.size,
                buffer: buffer_size,
            });
        }

        self.surface.paint(&buffer);
        self.preview.reset();
        self.surface.apply_preview(&self.preview);

        Ok(())
    }

    /// Moves the preview by a fraction of the surface size.
    pub fn pan_preview(&mut self, dx: f64, dy: f64) {
        self.preview.translate(dx, dy);
        self.surface.apply_preview(&self.preview);
    }

    pub fn zoom_preview(&mut self, pivot_x: f64, pivot_y: f64, factor: f64) {
        self.preview.zoom_about(pivot_x, pivot_y, factor);
        self.surface.apply_preview(&self.preview);
    }

    pub fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        self.surface.resize(size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::interactive::test_support::{RecordingSurface, SurfaceCall};

    fn compositor(width: u32, height: u32) -> Compositor<RecordingSurface> {
        Compositor::new(RecordingSurface::default(), SurfaceSize::new(width, height))
    }

    #[test]
    fn new_forwards_initial_size() {
        let compositor = compositor(800, 600);

        assert_eq!(
            compositor.surface().calls,
            vec![SurfaceCall::Resize(SurfaceSize::new(800, 600))]
        );
    }

    #[test]
    fn composite_paints_and_resets_preview() {
        let mut compositor = compositor(4, 2);
        compositor.pan_preview(0.25, 0.0);
        compositor.zoom_preview(0.5, 0.5, 2.0);

        compositor.composite(PixelBuffer::new(4, 2)).unwrap();

        assert!(compositor.preview().is_identity());
        let calls = &compositor.surface().calls;
        assert_eq!(
            calls[calls.len() - 2..],
            [
                SurfaceCall::Paint {
                    width: 4,
                    height: 2
                },
                SurfaceCall::Preview(PreviewTransform::IDENTITY),
            ]
        );
    }

    #[test]
    fn mismatched_buffer_is_discarded_and_preview_kept() {
        let mut compositor = compositor(800, 600);
        compositor.resize(SurfaceSize::new(1024, 600));
        compositor.pan_preview(0.1, -0.1);
        let preview_before = *compositor.preview();
        let calls_before = compositor.surface().calls.len();

        let result = compositor.composite(PixelBuffer::new(800, 600));

        assert_eq!(
            result,
            Err(CompositeError::DimensionMismatch {
                surface: SurfaceSize::new(1024, 600),
                buffer: SurfaceSize::new(800, 600),
            })
        );
        assert_eq!(*compositor.preview(), preview_before);
        assert_eq!(compositor.surface().calls.len(), calls_before);
        assert_eq!(compositor.surface().paints(), 0);
    }

    #[test]
    fn preview_changes_are_pushed_to_surface() {
        let mut compositor = compositor(100, 100);

        compositor.pan_preview(0.2, 0.0);

        let mut expected = PreviewTransform::IDENTITY;
        expected.translate(0.2, 0.0);
        assert_eq!(
            compositor.surface().calls.last(),
            Some(&SurfaceCall::Preview(expected))
        );
    }
}
