use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;
use crate::core::fractals::mandelbrot::colour_mapping::{
    kinds::MandelbrotColourMapKinds, map::MandelbrotColourMap,
};
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub struct MandelbrotBlueWhiteGradient {
    max_iterations: u32,
}

#[derive(Debug, PartialEq, Eq)]
pub enum MandelbrotGradientError {
    IterationsExceedMax {
        iterations: u32,
        max_iterations: u32,
    },
}

impl fmt::Display for MandelbrotGradientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IterationsExceedMax {
                iterations,
                max_iterations,
            } => {
                write!(
                    f,
                    "iterations {} exceeds maximum {}",
                    iterations, max_iterations
                )
            }
        }
    }
}

impl Error for MandelbrotGradientError {}

impl ColourMap<u32> for MandelbrotBlueWhiteGradient {
    fn map(&self, iterations: u32) -> Result<Colour, Box<dyn Error>> {
        if iterations > self.max_iterations {
            return Err(Box::new(MandelbrotGradientError::IterationsExceedMax {
                iterations,
                max_iterations: self.max_iterations,
            }));
        }

        if iterations == self.max_iterations {
            return Ok(Colour::BLACK);
        }

        let t = f64::from(iterations) / f64::from(self.max_iterations);
        let u = 1.0 - t;

        let r = (9.0 * u * t * t * t * 255.0) as u8;
        let g = (15.0 * u * u * t * t * 255.0) as u8;
        let b = (8.5 * u * u * u * t * 255.0) as u8;

        Ok(Colour { r, g, b })
    }

    fn display_name(&self) -> &str {
        MandelbrotColourMapKinds::BlueWhiteGradient.display_name()
    }
}

impl MandelbrotColourMap for MandelbrotBlueWhiteGradient {
    fn kind(&self) -> MandelbrotColourMapKinds {
        MandelbrotColourMapKinds::BlueWhiteGradient
    }
}

impl MandelbrotBlueWhiteGradient {
    #[must_use]
    pub fn new(max_iterations: u32) -> Self {
        Self { max_iterations }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_returns_black_at_max_iterations() {
        let mapper = MandelbrotBlueWhiteGradient::new(100);

        assert_eq!(mapper.map(100).unwrap(), Colour::BLACK);
    }

    #[test]
    fn test_map_returns_black_at_zero_iterations() {
        let mapper = MandelbrotBlueWhiteGradient::new(100);

        assert_eq!(mapper.map(0).unwrap(), Colour::BLACK);
    }

    #[test]
    fn test_map_midpoint_gradient() {
        let mapper = MandelbrotBlueWhiteGradient::new(100);
        let colour = mapper.map(50).unwrap();

        assert_eq!(colour, Colour { r: 143, g: 239, b: 135 });
    }

    #[test]
    fn test_map_returns_error_when_iterations_exceed_max() {
        let mapper = MandelbrotBlueWhiteGradient::new(100);

        let err = mapper.map(101).unwrap_err();

        assert_eq!(err.to_string(), "iterations 101 exceeds maximum 100");
    }
}
