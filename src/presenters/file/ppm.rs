use crate::adapters::pixel_format::blit_with_preview;
use crate::controllers::interactive::ports::surface::Surface;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::view::{PreviewTransform, SurfaceSize};
use crate::storage::write_ppm::write_ppm_file;
use std::path::Path;

const BACKGROUND: [u8; 4] = [0, 0, 0, 255];

/// Headless surface that keeps the last frame and writes what would be on
/// screen to a PPM file on request.
#[derive(Debug, Default)]
pub struct PpmSurface {
    size: SurfaceSize,
    frame: Option<PixelBuffer>,
    preview: PreviewTransform,
    frames_painted: u64,
}

impl Surface for PpmSurface {
    fn paint(&mut self, buffer: &PixelBuffer) {
        self.frame = Some(buffer.clone());
        self.frames_painted += 1;
    }

    fn apply_preview(&mut self, transform: &PreviewTransform) {
        self.preview = *transform;
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
    }
}

impl PpmSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn frames_painted(&self) -> u64 {
        self.frames_painted
    }

    /// The visible image: the last frame displaced by the current preview.
    #[must_use]
    pub fn snapshot(&self) -> Option<PixelBuffer> {
        let frame = self.frame.as_ref()?;
        let mut visible = PixelBuffer::new(self.size.width, self.size.height).into_data();
        blit_with_preview(
            frame,
            &self.preview,
            &mut visible,
            self.size.width,
            self.size.height,
            BACKGROUND,
        );
        PixelBuffer::from_data(self.size.width, self.size.height, visible).ok()
    }

    /// Writes the visible image. Returns `false` if nothing has been painted.
    pub fn write(&self, filepath: impl AsRef<Path>) -> std::io::Result<bool> {
        match self.snapshot() {
            Some(image) => write_ppm_file(&image, filepath).map(|()| true),
            None => Ok(false),
        }
    }
}
