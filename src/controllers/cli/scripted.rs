use crate::controllers::interactive::bridge::{BridgeError, MandelbrotEngine, WorkerBridge};
use crate::controllers::interactive::config::ExplorerConfig;
use crate::controllers::interactive::input::{InputError, InputEvent, PointerButton};
use crate::controllers::interactive::ports::event_waker::NoopWaker;
use crate::controllers::interactive::session::{InteractiveSession, SessionError};
use crate::core::view::{CssRect, Viewport};
use crate::presenters::file::ppm::PpmSurface;
use log::info;
use std::error::Error;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// One step of a headless exploration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptStep {
    Input(InputEvent),
    SetIterationBudget(i64),
    /// Blocks until the next frame is composited.
    AwaitFrame,
}

#[derive(Debug)]
pub enum ScriptError {
    Session(SessionError),
    Input(InputError),
    Bridge(BridgeError),
    Io(std::io::Error),
    /// No frame arrived within the timeout.
    FrameTimeout { step: usize },
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Session(err) => write!(f, "{}", err),
            Self::Input(err) => write!(f, "{}", err),
            Self::Bridge(err) => write!(f, "{}", err),
            Self::Io(err) => write!(f, "could not write image: {}", err),
            Self::FrameTimeout { step } => write!(f, "no frame arrived at step {}", step),
        }
    }
}

impl Error for ScriptError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Session(err) => Some(err),
            Self::Input(err) => Some(err),
            Self::Bridge(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::FrameTimeout { .. } => None,
        }
    }
}

impl From<SessionError> for ScriptError {
    fn from(err: SessionError) -> Self {
        Self::Session(err)
    }
}

impl From<InputError> for ScriptError {
    fn from(err: InputError) -> Self {
        Self::Input(err)
    }
}

impl From<BridgeError> for ScriptError {
    fn from(err: BridgeError) -> Self {
        Self::Bridge(err)
    }
}

impl From<std::io::Error> for ScriptError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScriptSummary {
    pub frames_composited: Vec<u64>,
    pub viewport: Viewport,
    pub last_render_duration: Option<Duration>,
    /// Where the last frame sat on screen when the script ended.
    pub preview_box: CssRect,
    pub image_written: bool,
}

/// A short tour: wait for the first frame, zoom toward the seahorse valley,
/// drag a little and render the result.
#[must_use]
pub fn default_tour(config: &ExplorerConfig) -> Vec<ScriptStep> {
    let width = f64::from(config.surface_size.width);
    let height = f64::from(config.surface_size.height);
    let (x, y) = (width * 0.35, height * 0.4);

    let mut steps = vec![
        ScriptStep::AwaitFrame,
        ScriptStep::Input(InputEvent::PointerMoved { x, y }),
    ];
    steps.extend(std::iter::repeat_n(
        ScriptStep::Input(InputEvent::Wheel { delta_y: -1.0 }),
        6,
    ));
    steps.extend([
        ScriptStep::AwaitFrame,
        ScriptStep::Input(InputEvent::PointerDown {
            button: PointerButton::Primary,
        }),
        ScriptStep::Input(InputEvent::PointerMoved {
            x: x + width * 0.05,
            y: y + height * 0.05,
        }),
        ScriptStep::Input(InputEvent::PointerUp {
            button: PointerButton::Primary,
        }),
        ScriptStep::AwaitFrame,
    ]);
    steps
}

/// Runs `steps` against a worker-backed session and writes the visible image
/// to `output`.
pub fn run_scripted_session(
    config: &ExplorerConfig,
    steps: &[ScriptStep],
    output: impl AsRef<Path>,
    frame_timeout: Duration,
) -> Result<ScriptSummary, ScriptError> {
    let engine = MandelbrotEngine::new(
        (config.center_x, config.center_y),
        config.zoom,
        config.iteration_budget,
        config.colour_map,
    );
    let bridge = WorkerBridge::spawn(engine, Arc::new(NoopWaker));
    let mut session = InteractiveSession::new(config, PpmSurface::new(), bridge)?;
    let mut frames_composited = Vec::new();

    for (index, step) in steps.iter().enumerate() {
        match *step {
            ScriptStep::Input(event) => session.handle_input(event, Instant::now())?,
            ScriptStep::SetIterationBudget(budget) => {
                session.set_iteration_budget(budget, Instant::now())?;
            }
            ScriptStep::AwaitFrame => {
                let generation = session
                    .wait_for_frame(frame_timeout)?
                    .ok_or(ScriptError::FrameTimeout { step: index })?;
                info!(
                    "frame {} composited in {:?}",
                    generation,
                    session.last_render_duration().unwrap_or_default()
                );
                frames_composited.push(generation);
            }
        }
    }

    let output = output.as_ref();
    let image_written = session.surface().write(output)?;
    if image_written {
        info!("saved {}", output.display());
    }

    Ok(ScriptSummary {
        frames_composited,
        viewport: *session.viewport(),
        last_render_duration: session.last_render_duration(),
        preview_box: session.preview().css_rect(),
        image_written,
    })
}
