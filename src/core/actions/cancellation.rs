use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

pub const CANCEL_CHECK_INTERVAL_PIXELS: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl std::fmt::Display for Cancelled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "operation cancelled")
    }
}

impl std::error::Error for Cancelled {}

pub trait CancelToken: Send + Sync {
    fn is_cancelled(&self) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelToken for NeverCancel {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<F> CancelToken for F
where
    F: Fn() -> bool + Send + Sync,
{
    #[inline]
    fn is_cancelled(&self) -> bool {
        self()
    }
}

/// Cancels one render job once its generation has been superseded or the
/// owning worker is shutting down.
///
/// `superseded_through` is a high-water mark: every generation at or below it
/// is no longer wanted.
#[derive(Debug, Clone)]
pub struct GenerationToken {
    generation: u64,
    superseded_through: Arc<AtomicU64>,
    shutdown: Arc<AtomicBool>,
}

impl GenerationToken {
    #[must_use]
    pub fn new(
        generation: u64,
        superseded_through: Arc<AtomicU64>,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        Self {
            generation,
            superseded_through,
            shutdown,
        }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl CancelToken for GenerationToken {
    #[inline]
    fn is_cancelled(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
            || self.superseded_through.load(Ordering::Relaxed) >= self.generation
    }
}
