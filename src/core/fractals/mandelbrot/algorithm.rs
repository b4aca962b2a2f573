use std::convert::Infallible;
use std::error::Error;
use std::fmt;
use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::point::Point;

/// Escape-time Mandelbrot over a surface, using the same projection as
/// `Viewport`: the shorter axis spans `2 * scale` plane units.
#[derive(Debug, Clone, PartialEq)]
pub struct MandelbrotAlgorithm {
    width: u32,
    height: u32,
    center_x: f64,
    center_y: f64,
    scale: f64,
    max_iterations: u32,
}

#[derive(Debug, PartialEq)]
pub enum MandelbrotAlgorithmConstructorError {
    ZeroMaxIterationsError,
    InvalidScaleError { scale: f64 },
}

impl fmt::Display for MandelbrotAlgorithmConstructorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMaxIterationsError => {
                write!(f, "Maximum iterations must be greater than zero")
            }
            Self::InvalidScaleError { scale } => {
                write!(f, "Scale must be positive and finite, got {}", scale)
            }
        }
    }
}

impl Error for MandelbrotAlgorithmConstructorError {}

impl FractalAlgorithm for MandelbrotAlgorithm {
    type Success = u32;
    type Failure = Infallible;

    fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
        let (c_real, c_imag) = self.plane_coords(pixel);
        let (mut z_real, mut z_imag) = (0.0_f64, 0.0_f64);

        for iteration in 0..self.max_iterations {
            if z_real * z_real + z_imag * z_imag > 4.0 {
                return Ok(iteration);
            }
            let next_real = z_real * z_real - z_imag * z_imag + c_real;
            z_imag = 2.0 * z_real * z_imag + c_imag;
            z_real = next_real;
        }

        Ok(self.max_iterations)
    }
}

impl MandelbrotAlgorithm {
    pub fn new(
        width: u32,
        height: u32,
        center: (f64, f64),
        scale: f64,
        max_iterations: u32,
    ) -> Result<Self, MandelbrotAlgorithmConstructorError> {
        if max_iterations == 0 {
            return Err(MandelbrotAlgorithmConstructorError::ZeroMaxIterationsError);
        }

        if !(scale.is_finite() && scale > 0.0) {
            return Err(MandelbrotAlgorithmConstructorError::InvalidScaleError { scale });
        }

        Ok(Self {
            width,
            height,
            center_x: center.0,
            center_y: center.1,
            scale,
            max_iterations,
        })
    }

    #[must_use]
    pub fn plane_coords(&self, pixel: Point) -> (f64, f64) {
        let shorter = f64::from(self.width.min(self.height));
        let offset_x = (f64::from(pixel.x) - f64::from(self.width) / 2.0) / shorter;
        let offset_y = (f64::from(pixel.y) - f64::from(self.height) / 2.0) / shorter;

        (
            self.center_x + 2.0 * offset_x * self.scale,
            self.center_y + 2.0 * offset_y * self.scale,
        )
    }
}
