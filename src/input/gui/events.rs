/// Custom user events for the GUI event loop.
#[derive(Debug, Clone)]
pub enum GuiEvent {
    /// The engine thread queued a render event.
    ///
    /// Receiving this does not redraw by itself. The handler ticks the
    /// session and requests a redraw only if a frame was composited.
    Wake,
}
