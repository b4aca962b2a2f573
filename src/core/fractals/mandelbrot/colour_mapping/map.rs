use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::fractals::mandelbrot::colour_mapping::kinds::MandelbrotColourMapKinds;

/// Colour map over escape-time iteration counts.
pub trait MandelbrotColourMap: ColourMap<u32> + Send + Sync {
    fn kind(&self) -> MandelbrotColourMapKinds;
}
