use crate::core::actions::cancellation::{CANCEL_CHECK_INTERVAL_PIXELS, CancelToken, Cancelled};
use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::pixel_buffer::{
    CHANNELS_PER_PIXEL, PixelBuffer, PixelBufferData, PixelBufferError,
};
use std::error::Error;
use std::fmt;

/// Error type for cancelable pixel buffer generation.
///
/// Distinguishes between processing errors and cancellation, allowing callers
/// to handle each case appropriately.
#[derive(Debug)]
pub enum GeneratePixelBufferError {
    /// The operation was cancelled before completion.
    Cancelled(Cancelled),
    /// A colour mapping error occurred.
    ColourMap(Box<dyn Error>),
    /// The input does not cover the requested dimensions.
    PixelBuffer(PixelBufferError),
}

impl fmt::Display for GeneratePixelBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled(c) => write!(f, "{}", c),
            Self::ColourMap(err) => write!(f, "colour map error: {}", err),
            Self::PixelBuffer(err) => write!(f, "pixel buffer error: {}", err),
        }
    }
}

impl Error for GeneratePixelBufferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Cancelled(c) => Some(c),
            Self::ColourMap(err) => err.source(),
            Self::PixelBuffer(err) => Some(err),
        }
    }
}

impl From<PixelBufferError> for GeneratePixelBufferError {
    fn from(err: PixelBufferError) -> Self {
        Self::PixelBuffer(err)
    }
}

/// Maps row-major values to an opaque RGBA buffer.
///
/// Checks `cancel` every [`CANCEL_CHECK_INTERVAL_PIXELS`] values. The output
/// is preallocated to `width * height * 4` bytes.
pub fn generate_pixel_buffer_cancelable<T, CMap, C>(
    input: Vec<T>,
    mapper: &CMap,
    width: u32,
    height: u32,
    cancel: &C,
) -> Result<PixelBuffer, GeneratePixelBufferError>
where
    CMap: ColourMap<T> + ?Sized,
    C: CancelToken + ?Sized,
{
    let buffer_size = width as usize * height as usize * CHANNELS_PER_PIXEL;
    let mut buffer: PixelBufferData = Vec::with_capacity(buffer_size);

    for (i, value) in input.into_iter().enumerate() {
        if i % CANCEL_CHECK_INTERVAL_PIXELS == 0 && cancel.is_cancelled() {
            return Err(GeneratePixelBufferError::Cancelled(Cancelled));
        }

        let colour = mapper
            .map(value)
            .map_err(GeneratePixelBufferError::ColourMap)?;

        buffer.extend_from_slice(&colour.to_rgba());
    }

    Ok(PixelBuffer::from_data(width, height, buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::cancellation::NeverCancel;
    use crate::core::data::colour::Colour;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Debug)]
    struct StubColourMapSuccess {}

    impl ColourMap<u8> for StubColourMapSuccess {
        fn map(&self, value: u8) -> Result<Colour, Box<dyn Error>> {
            Ok(Colour {
                r: value,
                g: value,
                b: value,
            })
        }

        fn display_name(&self) -> &str {
            "Stub Success"
        }
    }

    #[derive(Debug)]
    struct StubColourMapFailure {}

    impl ColourMap<u8> for StubColourMapFailure {
        fn map(&self, _: u8) -> Result<Colour, Box<dyn Error>> {
            Err("StubColourMapError".into())
        }

        fn display_name(&self) -> &str {
            "Stub Failure"
        }
    }

    #[test]
    fn test_generates_opaque_rgba_pixels() {
        let input: Vec<u8> = vec![1, 2, 3, 4, 5, 6];
        let mapper = StubColourMapSuccess {};

        let result =
            generate_pixel_buffer_cancelable(input, &mapper, 3, 2, &NeverCancel).unwrap();

        let expected: PixelBufferData = vec![
            1, 1, 1, 255, 2, 2, 2, 255, 3, 3, 3, 255, 4, 4, 4, 255, 5, 5, 5, 255, 6, 6, 6, 255,
        ];
        assert_eq!(result.width(), 3);
        assert_eq!(result.height(), 2);
        assert_eq!(result.data(), expected.as_slice());
    }

    #[test]
    fn test_propagates_colour_map_failure() {
        let mapper = StubColourMapFailure {};

        let result = generate_pixel_buffer_cancelable(vec![1, 2], &mapper, 2, 1, &NeverCancel);

        assert!(matches!(result, Err(GeneratePixelBufferError::ColourMap(_))));
    }

    #[test]
    fn test_input_size_mismatch_returns_err() {
        let mapper = StubColourMapSuccess {};

        let result =
            generate_pixel_buffer_cancelable(vec![1, 2, 3, 4, 5, 6], &mapper, 2, 2, &NeverCancel);

        assert!(matches!(
            result,
            Err(GeneratePixelBufferError::PixelBuffer(
                PixelBufferError::BoundsMismatch {
                    expected_size: 16,
                    buffer_size: 24
                }
            ))
        ));
    }

    #[test]
    fn test_returns_cancelled_when_token_is_cancelled() {
        let mapper = StubColourMapSuccess {};
        let cancelled = AtomicBool::new(true);
        let cancel_token = || cancelled.load(Ordering::Relaxed);

        let result = generate_pixel_buffer_cancelable(vec![1, 2], &mapper, 2, 1, &cancel_token);

        assert!(matches!(result, Err(GeneratePixelBufferError::Cancelled(_))));
    }
}
