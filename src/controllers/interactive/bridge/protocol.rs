/// Messages from the controller to the engine thread, handled in order.
///
/// Navigation messages are relative and mirror the controller's `Viewport`
/// updates, so the engine never needs an absolute view after startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineRequest {
    Resize { width: u32, height: u32 },
    /// Pan by a delta in view units.
    ChangeView { delta_x: f64, delta_y: f64 },
    /// Multiply the zoom by `factor`.
    ChangeZoom { factor: f64 },
    SetMaxIterations { max_iterations: u32 },
    Render { generation: u64 },
    Shutdown,
}
