use crate::core::data::colour::Colour;
use crate::core::data::point::Point;
use std::error::Error;
use std::fmt;

pub const CHANNELS_PER_PIXEL: usize = 4;

fn dimensions_to_buffer_size(width: u32, height: u32) -> usize {
    width as usize * height as usize * CHANNELS_PER_PIXEL
}

#[derive(Debug, Clone, PartialEq)]
pub enum PixelBufferError {
    PixelOutsideBounds {
        pixel: Point,
        width: u32,
        height: u32,
    },
    BoundsMismatch {
        expected_size: usize,
        buffer_size: usize,
    },
}

impl fmt::Display for PixelBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundsMismatch {
                expected_size,
                buffer_size,
            } => {
                write!(
                    f,
                    "expected {} bytes of RGBA data but buffer holds {}",
                    expected_size, buffer_size
                )
            }
            Self::PixelOutsideBounds {
                pixel,
                width,
                height,
            } => {
                write!(
                    f,
                    "pixel at x:{}, y:{} outside of {}x{} buffer",
                    pixel.x, pixel.y, width, height
                )
            }
        }
    }
}

impl Error for PixelBufferError {}

pub type PixelBufferData = Vec<u8>;

/// Row-major RGBA pixels with straight alpha.
///
/// A buffer is moved, never shared, between the render thread and the
/// compositor.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: PixelBufferData,
}

impl PixelBuffer {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; dimensions_to_buffer_size(width, height)],
        }
    }

    pub fn from_data(
        width: u32,
        height: u32,
        data: PixelBufferData,
    ) -> Result<Self, PixelBufferError> {
        let expected_size = dimensions_to_buffer_size(width, height);

        if expected_size != data.len() {
            return Err(PixelBufferError::BoundsMismatch {
                expected_size,
                buffer_size: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn into_data(self) -> PixelBufferData {
        self.data
    }

    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.data.len()
    }

    pub fn set_pixel(&mut self, pixel: Point, colour: Colour) -> Result<(), PixelBufferError> {
        if pixel.x >= self.width || pixel.y >= self.height {
            return Err(PixelBufferError::PixelOutsideBounds {
                pixel,
                width: self.width,
                height: self.height,
            });
        }

        let index = (pixel.y as usize * self.width as usize + pixel.x as usize) * CHANNELS_PER_PIXEL;
        self.data[index..index + CHANNELS_PER_PIXEL].copy_from_slice(&colour.to_rgba());

        Ok(())
    }
}
