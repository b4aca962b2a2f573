use crate::controllers::interactive::scheduler::DEFAULT_DEBOUNCE;
use crate::core::fractals::mandelbrot::colour_mapping::kinds::MandelbrotColourMapKinds;
use crate::core::view::{SurfaceSize, Viewport, ViewportError};
use std::error::Error;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_ZOOM_FACTOR: f64 = 1.125;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// The wheel step must be finite and greater than one.
    InvalidZoomFactor { factor: f64 },
    ZeroDebounce,
    NonFiniteCenter { x: f64, y: f64 },
    InvalidViewport(ViewportError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidZoomFactor { factor } => {
                write!(f, "zoom factor must be finite and above 1, got {}", factor)
            }
            Self::ZeroDebounce => write!(f, "debounce window must not be zero"),
            Self::NonFiniteCenter { x, y } => {
                write!(f, "initial center ({}, {}) is not finite", x, y)
            }
            Self::InvalidViewport(err) => write!(f, "invalid initial viewport: {}", err),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidViewport(err) => Some(err),
            _ => None,
        }
    }
}

/// Startup settings for an interactive session.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerConfig {
    pub center_x: f64,
    pub center_y: f64,
    pub zoom: f64,
    pub iteration_budget: u32,
    /// Zoom multiplier for one wheel step.
    pub zoom_factor: f64,
    pub debounce: Duration,
    pub colour_map: MandelbrotColourMapKinds,
    pub surface_size: SurfaceSize,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            center_x: -0.5,
            center_y: 0.0,
            zoom: 0.8,
            iteration_budget: 256,
            zoom_factor: DEFAULT_ZOOM_FACTOR,
            debounce: DEFAULT_DEBOUNCE,
            colour_map: MandelbrotColourMapKinds::default(),
            surface_size: SurfaceSize::new(800, 600),
        }
    }
}

impl ExplorerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.zoom_factor.is_finite() && self.zoom_factor > 1.0) {
            return Err(ConfigError::InvalidZoomFactor {
                factor: self.zoom_factor,
            });
        }

        if self.debounce.is_zero() {
            return Err(ConfigError::ZeroDebounce);
        }

        self.viewport().map(|_| ())
    }

    /// The initial view described by this config.
    pub fn viewport(&self) -> Result<Viewport, ConfigError> {
        if !(self.center_x.is_finite() && self.center_y.is_finite()) {
            return Err(ConfigError::NonFiniteCenter {
                x: self.center_x,
                y: self.center_y,
            });
        }

        Viewport::new(
            self.center_x,
            self.center_y,
            self.zoom,
            self.iteration_budget,
        )
        .map_err(ConfigError::InvalidViewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ExplorerConfig::default();

        assert_eq!(config.validate(), Ok(()));
        let viewport = config.viewport().unwrap();
        assert_eq!(viewport.center_x(), -0.5);
        assert_eq!(viewport.zoom(), 0.8);
        assert_eq!(viewport.iteration_budget(), 256);
    }

    #[test]
    fn rejects_zoom_factor_at_or_below_one() {
        for factor in [1.0, 0.5, -2.0, f64::INFINITY] {
            let config = ExplorerConfig {
                zoom_factor: factor,
                ..ExplorerConfig::default()
            };

            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidZoomFactor { .. })
            ));
        }
    }

    #[test]
    fn rejects_zero_debounce() {
        let config = ExplorerConfig {
            debounce: Duration::ZERO,
            ..ExplorerConfig::default()
        };

        assert_eq!(config.validate(), Err(ConfigError::ZeroDebounce));
    }

    #[test]
    fn rejects_invalid_initial_view() {
        let config = ExplorerConfig {
            zoom: 0.0,
            ..ExplorerConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidViewport(ViewportError::InvalidZoom {
                zoom: 0.0
            }))
        );

        let config = ExplorerConfig {
            center_x: f64::NAN,
            ..ExplorerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFiniteCenter { .. })
        ));
    }
}
