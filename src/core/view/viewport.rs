use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportError {
    InvalidZoom { zoom: f64 },
    InvalidZoomFactor { factor: f64 },
}

impl fmt::Display for ViewportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidZoom { zoom } => {
                write!(f, "zoom must be positive and finite, got {}", zoom)
            }
            Self::InvalidZoomFactor { factor } => {
                write!(f, "zoom factor must be positive and finite, got {}", factor)
            }
        }
    }
}

impl Error for ViewportError {}

/// Subnormals are rejected too: their reciprocal overflows in `pan`.
fn is_valid_scale(value: f64) -> bool {
    value.is_normal() && value > 0.0
}

/// The authoritative mathematical view.
///
/// The shorter surface axis spans `2 / zoom` plane units around the center.
/// After construction every change is relative: pans shift the center and
/// zooms multiply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    center_x: f64,
    center_y: f64,
    zoom: f64,
    iteration_budget: u32,
}

impl Viewport {
    pub fn new(
        center_x: f64,
        center_y: f64,
        zoom: f64,
        iteration_budget: u32,
    ) -> Result<Self, ViewportError> {
        if !is_valid_scale(zoom) {
            return Err(ViewportError::InvalidZoom { zoom });
        }

        Ok(Self {
            center_x,
            center_y,
            zoom,
            iteration_budget: iteration_budget.max(1),
        })
    }

    #[must_use]
    pub fn center_x(&self) -> f64 {
        self.center_x
    }

    #[must_use]
    pub fn center_y(&self) -> f64 {
        self.center_y
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    #[must_use]
    pub fn iteration_budget(&self) -> u32 {
        self.iteration_budget
    }

    /// Shifts the center by a delta in view units.
    pub fn pan(&mut self, delta_x: f64, delta_y: f64) {
        self.center_x += delta_x / self.zoom;
        self.center_y += delta_y / self.zoom;
    }

    /// Zooms by `factor` keeping the plane point under the cursor fixed.
    ///
    /// `cursor_fx`/`cursor_fy` are offsets from the surface center as a
    /// fraction of the shorter side (see `SurfaceSize::cursor_offset`).
    pub fn zoom_toward(
        &mut self,
        cursor_fx: f64,
        cursor_fy: f64,
        factor: f64,
    ) -> Result<(), ViewportError> {
        let zoom = self.zoom * factor;
        if !(is_valid_scale(factor) && is_valid_scale(zoom)) {
            return Err(ViewportError::InvalidZoomFactor { factor });
        }

        self.pan(2.0 * cursor_fx, 2.0 * cursor_fy);
        self.zoom = zoom;
        self.pan(-2.0 * cursor_fx, -2.0 * cursor_fy);

        Ok(())
    }

    /// Stores a new iteration budget, clamped to a positive `u32`.
    pub fn resize_budget(&mut self, new_budget: i64) -> u32 {
        self.iteration_budget = new_budget.clamp(1, i64::from(u32::MAX)) as u32;
        self.iteration_budget
    }

    /// The plane coordinate shown at a cursor offset.
    #[must_use]
    pub fn plane_point(&self, cursor_fx: f64, cursor_fy: f64) -> (f64, f64) {
        (
            self.center_x + 2.0 * cursor_fx / self.zoom,
            self.center_y + 2.0 * cursor_fy / self.zoom,
        )
    }

    /// Inverse of [`Viewport::plane_point`].
    #[must_use]
    pub fn screen_offset(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x - self.center_x) * self.zoom / 2.0,
            (y - self.center_y) * self.zoom / 2.0,
        )
    }
}
