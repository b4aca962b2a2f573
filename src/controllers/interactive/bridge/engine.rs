use crate::core::actions::cancellation::CancelToken;
use crate::core::actions::generate_fractal::generate_fractal_parallel_rayon::{
    GenerateFractalError, generate_fractal_parallel_rayon_cancelable,
};
use crate::core::actions::generate_pixel_buffer::generate_pixel_buffer::{
    GeneratePixelBufferError, generate_pixel_buffer_cancelable,
};
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferError};
use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;
use crate::core::fractals::mandelbrot::colour_mapping::factory::mandelbrot_colour_map_factory;
use crate::core::fractals::mandelbrot::colour_mapping::kinds::MandelbrotColourMapKinds;
use crate::core::view::SurfaceSize;
use log::warn;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum EngineRenderError {
    /// No non-empty surface size has been received yet.
    NoSurface,
    Cancelled,
    Algorithm(String),
    ColourMap(String),
    PixelBuffer(PixelBufferError),
}

impl fmt::Display for EngineRenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSurface => write!(f, "no surface to render into"),
            Self::Cancelled => write!(f, "render cancelled"),
            Self::Algorithm(message) => write!(f, "algorithm error: {}", message),
            Self::ColourMap(message) => write!(f, "colour map error: {}", message),
            Self::PixelBuffer(err) => write!(f, "pixel buffer error: {}", err),
        }
    }
}

impl Error for EngineRenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::PixelBuffer(err) => Some(err),
            _ => None,
        }
    }
}

/// Stateful renderer hosted on the engine thread.
///
/// Navigation is relative: `change_view` moves the center by `delta * scale`
/// and `change_zoom` divides the scale, where `scale` is the reciprocal of the
/// controller's zoom.
pub trait RenderEngine: Send {
    fn resize(&mut self, width: u32, height: u32);

    fn change_view(&mut self, delta_x: f64, delta_y: f64);

    fn change_zoom(&mut self, factor: f64);

    fn set_max_iterations(&mut self, max_iterations: u32);

    fn render(&mut self, cancel: &dyn CancelToken) -> Result<PixelBuffer, EngineRenderError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct MandelbrotEngine {
    size: SurfaceSize,
    center_x: f64,
    center_y: f64,
    scale: f64,
    max_iterations: u32,
    colour_map: MandelbrotColourMapKinds,
}

impl MandelbrotEngine {
    #[must_use]
    pub fn new(
        center: (f64, f64),
        zoom: f64,
        max_iterations: u32,
        colour_map: MandelbrotColourMapKinds,
    ) -> Self {
        Self {
            size: SurfaceSize::default(),
            center_x: center.0,
            center_y: center.1,
            scale: 1.0 / zoom,
            max_iterations: max_iterations.max(1),
            colour_map,
        }
    }

    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        (self.center_x, self.center_y)
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[must_use]
    pub fn size(&self) -> SurfaceSize {
        self.size
    }
}

impl RenderEngine for MandelbrotEngine {
    fn resize(&mut self, width: u32, height: u32) {
        self.size = SurfaceSize::new(width, height);
    }

    fn change_view(&mut self, delta_x: f64, delta_y: f64) {
        self.center_x += delta_x * self.scale;
        self.center_y += delta_y * self.scale;
    }

    fn change_zoom(&mut self, factor: f64) {
        let scale = self.scale / factor;
        if !(factor.is_normal() && factor > 0.0 && scale.is_normal() && scale > 0.0) {
            warn!("ignoring invalid zoom factor {}", factor);
            return;
        }
        self.scale = scale;
    }

    fn set_max_iterations(&mut self, max_iterations: u32) {
        self.max_iterations = max_iterations.max(1);
    }

    fn render(&mut self, cancel: &dyn CancelToken) -> Result<PixelBuffer, EngineRenderError> {
        if self.size.is_empty() {
            return Err(EngineRenderError::NoSurface);
        }

        let SurfaceSize { width, height } = self.size;
        let algorithm = MandelbrotAlgorithm::new(
            width,
            height,
            (self.center_x, self.center_y),
            self.scale,
            self.max_iterations,
        )
        .map_err(|err| EngineRenderError::Algorithm(err.to_string()))?;

        let iterations =
            generate_fractal_parallel_rayon_cancelable(width, height, &algorithm, cancel)
                .map_err(|err| match err {
                    GenerateFractalError::Cancelled(_) => EngineRenderError::Cancelled,
                    GenerateFractalError::Algorithm(err) => {
                        EngineRenderError::Algorithm(err.to_string())
                    }
                })?;

        if cancel.is_cancelled() {
            return Err(EngineRenderError::Cancelled);
        }

        let colour_map = mandelbrot_colour_map_factory(self.colour_map, self.max_iterations);

        generate_pixel_buffer_cancelable(iterations, &*colour_map, width, height, cancel).map_err(
            |err| match err {
                GeneratePixelBufferError::Cancelled(_) => EngineRenderError::Cancelled,
                GeneratePixelBufferError::ColourMap(err) => {
                    EngineRenderError::ColourMap(err.to_string())
                }
                GeneratePixelBufferError::PixelBuffer(err) => EngineRenderError::PixelBuffer(err),
            },
        )
    }
}
