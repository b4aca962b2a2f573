use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;
use crate::core::fractals::mandelbrot::colour_mapping::{
    kinds::MandelbrotColourMapKinds, map::MandelbrotColourMap,
};
use std::error::Error;

const ESCAPED: Colour = Colour { r: 0, g: 255, b: 0 };

/// Two-tone map: escaped points are green, bounded points black.
#[derive(Debug)]
pub struct MandelbrotEscapeFlat {
    max_iterations: u32,
}

impl ColourMap<u32> for MandelbrotEscapeFlat {
    fn map(&self, iterations: u32) -> Result<Colour, Box<dyn Error>> {
        if iterations < self.max_iterations {
            Ok(ESCAPED)
        } else {
            Ok(Colour::BLACK)
        }
    }

    fn display_name(&self) -> &str {
        MandelbrotColourMapKinds::EscapeFlat.display_name()
    }
}

impl MandelbrotColourMap for MandelbrotEscapeFlat {
    fn kind(&self) -> MandelbrotColourMapKinds {
        MandelbrotColourMapKinds::EscapeFlat
    }
}

impl MandelbrotEscapeFlat {
    #[must_use]
    pub fn new(max_iterations: u32) -> Self {
        Self { max_iterations }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escaped_points_are_green() {
        let mapper = MandelbrotEscapeFlat::new(10);

        assert_eq!(mapper.map(0).unwrap(), ESCAPED);
        assert_eq!(mapper.map(9).unwrap(), ESCAPED);
    }

    #[test]
    fn bounded_points_are_black() {
        let mapper = MandelbrotEscapeFlat::new(10);

        assert_eq!(mapper.map(10).unwrap(), Colour::BLACK);
    }
}
