use crate::controllers::interactive::events::render_event::RenderEvent;
use std::error::Error;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeError {
    /// The engine thread has terminated. Nothing is retried.
    EngineUnavailable,
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EngineUnavailable => write!(f, "render engine is unavailable"),
        }
    }
}

impl Error for BridgeError {}

/// Message-passing contract between the controller and a render engine.
///
/// State messages are fire-and-forget. `render` only requests a frame; the
/// result comes back later through `poll_event` or `wait_event`.
pub trait RenderBridge {
    fn resize(&mut self, width: u32, height: u32) -> Result<(), BridgeError>;

    fn change_view(&mut self, delta_x: f64, delta_y: f64) -> Result<(), BridgeError>;

    fn change_zoom(&mut self, factor: f64) -> Result<(), BridgeError>;

    fn set_max_iterations(&mut self, max_iterations: u32) -> Result<(), BridgeError>;

    fn render(&mut self, generation: u64) -> Result<(), BridgeError>;

    /// Every render at or below `generation` is no longer wanted.
    fn supersede(&mut self, generation: u64) -> Result<(), BridgeError>;

    fn poll_event(&mut self) -> Result<Option<RenderEvent>, BridgeError>;

    fn wait_event(&mut self, timeout: Duration) -> Result<Option<RenderEvent>, BridgeError>;
}
