/// Placement of the last composited image while a new one is pending.
///
/// All values are fractions of the surface: `offset_*` is the top-left corner
/// of the image and `scale_*` its size. Identity means the image exactly
/// covers the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewTransform {
    offset_x: f64,
    offset_y: f64,
    scale_x: f64,
    scale_y: f64,
}

/// Percent-based placement, the shape a CSS `left/top/width/height` box takes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CssRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for PreviewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PreviewTransform {
    pub const IDENTITY: Self = Self {
        offset_x: 0.0,
        offset_y: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
    };

    #[must_use]
    pub fn offset_x(&self) -> f64 {
        self.offset_x
    }

    #[must_use]
    pub fn offset_y(&self) -> f64 {
        self.offset_y
    }

    #[must_use]
    pub fn scale_x(&self) -> f64 {
        self.scale_x
    }

    #[must_use]
    pub fn scale_y(&self) -> f64 {
        self.scale_y
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Moves the image by a fraction of the surface size.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Scales the image by `factor` about a pivot given as a surface fraction.
    /// The image point under the pivot stays under it.
    pub fn zoom_about(&mut self, pivot_x: f64, pivot_y: f64, factor: f64) {
        self.offset_x = pivot_x - factor * (pivot_x - self.offset_x);
        self.offset_y = pivot_y - factor * (pivot_y - self.offset_y);
        self.scale_x *= factor;
        self.scale_y *= factor;
    }

    /// Only the compositor resets the preview, right after painting a frame.
    pub(crate) fn reset(&mut self) {
        *self = Self::IDENTITY;
    }

    #[must_use]
    pub fn css_rect(&self) -> CssRect {
        CssRect {
            left: self.offset_x * 100.0,
            top: self.offset_y * 100.0,
            width: self.scale_x * 100.0,
            height: self.scale_y * 100.0,
        }
    }

    /// Maps a surface fraction to the matching fraction of the source image,
    /// or `None` where the displaced image does not cover the surface.
    #[must_use]
    pub fn source_point(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let u = (x - self.offset_x) / self.scale_x;
        let v = (y - self.offset_y) / self.scale_y;

        if (0.0..1.0).contains(&u) && (0.0..1.0).contains(&v) {
            Some((u, v))
        } else {
            None
        }
    }
}
