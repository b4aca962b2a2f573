//! Interactive viewport controller.
//!
//! Input moves the [`Viewport`](crate::core::view::Viewport) and the preview
//! immediately; the expensive render is debounced, dispatched to an engine
//! thread through a [`bridge::RenderBridge`], and composited only if it is
//! still the newest request when it comes back.
//!
//! # Architecture
//!
//! - **Input**: [`input::InputEvent`] values fed to [`session::InteractiveSession`]
//! - **Output**: the [`ports::surface::Surface`] port, painted by the compositor
//! - **Engine**: [`bridge::RenderEngine`] hosted on its own thread by
//!   [`bridge::WorkerBridge`]

pub mod bridge;
pub mod compositor;
pub mod config;
pub mod data;
pub mod errors;
pub mod events;
pub mod input;
pub mod ports;
pub mod scheduler;
pub mod session;
#[cfg(test)]
pub(crate) mod test_support;

pub use bridge::{BridgeError, MandelbrotEngine, RenderBridge, RenderEngine, WorkerBridge};
pub use compositor::{CompositeError, Compositor};
pub use config::{ConfigError, ExplorerConfig};
pub use events::render_event::RenderEvent;
pub use input::{InputError, InputEvent, PointerButton};
pub use ports::event_waker::{EventWaker, NoopWaker};
pub use ports::surface::Surface;
pub use scheduler::{Disposition, RenderScheduler, SchedulerState};
pub use session::{InteractiveSession, SessionError, TickReport};
