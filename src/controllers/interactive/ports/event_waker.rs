/// Nudges the UI event loop when the engine thread has something for it.
pub trait EventWaker: Send + Sync {
    fn wake(&self);
}

/// For drivers that poll on their own schedule.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopWaker;

impl EventWaker for NoopWaker {
    fn wake(&self) {}
}
