//! The asynchronous boundary between the controller and the render engine.

pub mod engine;
pub mod port;
pub mod protocol;
pub mod worker;

pub use engine::{EngineRenderError, MandelbrotEngine, RenderEngine};
pub use port::{BridgeError, RenderBridge};
pub use protocol::EngineRequest;
pub use worker::WorkerBridge;
