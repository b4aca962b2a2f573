mod adapters;
mod controllers;
mod core;
mod input;
mod presenters;
mod storage;

pub use controllers::cli::scripted::{
    ScriptError, ScriptStep, ScriptSummary, default_tour, run_scripted_session,
};
pub use controllers::interactive::{
    BridgeError, CompositeError, Compositor, ConfigError, Disposition, EventWaker, ExplorerConfig,
    InputError, InputEvent, InteractiveSession, MandelbrotEngine, NoopWaker, PointerButton,
    RenderBridge, RenderEngine, RenderEvent, RenderScheduler, SchedulerState, SessionError,
    Surface, TickReport, WorkerBridge,
};
pub use controllers::interactive::bridge::{EngineRenderError, EngineRequest};
pub use controllers::interactive::data::frame_data::FrameData;
pub use controllers::interactive::data::render_request::RenderRequest;
pub use controllers::interactive::errors::render::RenderError;

pub use crate::core::actions::cancellation::{CancelToken, GenerationToken, NeverCancel};
pub use crate::core::actions::generate_fractal::generate_fractal_parallel_rayon::generate_fractal_parallel_rayon_cancelable;
pub use crate::core::actions::generate_pixel_buffer::generate_pixel_buffer::generate_pixel_buffer_cancelable;
pub use crate::core::data::pixel_buffer::PixelBuffer;
pub use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;
pub use crate::core::fractals::mandelbrot::colour_mapping::factory::mandelbrot_colour_map_factory;
pub use crate::core::fractals::mandelbrot::colour_mapping::kinds::MandelbrotColourMapKinds;
pub use crate::core::view::{CssRect, PreviewTransform, SurfaceSize, Viewport, ViewportError};

pub use adapters::pixel_format::{blit_with_preview, copy_rgba_to_rgb};
pub use presenters::file::ppm::PpmSurface;
pub use storage::write_ppm::{write_ppm, write_ppm_file};

#[cfg(feature = "gui")]
pub use input::gui::commands::run_gui::RunGuiCommand;
