/// Pixel dimensions of the visible surface.
///
/// View units are normalised against the shorter axis: that axis always spans
/// two units, whatever the aspect ratio.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[must_use]
    pub fn shorter_side(&self) -> f64 {
        f64::from(self.width.min(self.height))
    }

    /// Converts a pixel delta into view units.
    #[must_use]
    pub fn pixels_to_view_units(&self, dx: f64, dy: f64) -> (f64, f64) {
        let shorter = self.shorter_side();
        (2.0 * dx / shorter, 2.0 * dy / shorter)
    }

    /// Offset of a pixel position from the surface center, as a fraction of
    /// the shorter side. Along the longer axis the result exceeds 0.5 at the
    /// edges, which is what keeps the plane undistorted.
    #[must_use]
    pub fn cursor_offset(&self, x: f64, y: f64) -> (f64, f64) {
        let shorter = self.shorter_side();
        (
            (x - f64::from(self.width) / 2.0) / shorter,
            (y - f64::from(self.height) / 2.0) / shorter,
        )
    }

    /// Pixel position as a fraction of each surface dimension (0..1).
    #[must_use]
    pub fn fraction_of(&self, x: f64, y: f64) -> (f64, f64) {
        (x / f64::from(self.width), y / f64::from(self.height))
    }
}
