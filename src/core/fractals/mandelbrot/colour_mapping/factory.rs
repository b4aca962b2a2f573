use crate::core::fractals::mandelbrot::colour_mapping::{
    kinds::MandelbrotColourMapKinds,
    map::MandelbrotColourMap,
    maps::{blue_white_gradient::MandelbrotBlueWhiteGradient, escape_flat::MandelbrotEscapeFlat},
};

#[must_use]
pub fn mandelbrot_colour_map_factory(
    kind: MandelbrotColourMapKinds,
    max_iterations: u32,
) -> Box<dyn MandelbrotColourMap> {
    match kind {
        MandelbrotColourMapKinds::BlueWhiteGradient => {
            Box::new(MandelbrotBlueWhiteGradient::new(max_iterations))
        }
        MandelbrotColourMapKinds::EscapeFlat => Box::new(MandelbrotEscapeFlat::new(max_iterations)),
    }
}
