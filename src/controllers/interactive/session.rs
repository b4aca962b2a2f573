use crate::controllers::interactive::bridge::{BridgeError, RenderBridge};
use crate::controllers::interactive::compositor::Compositor;
use crate::controllers::interactive::config::{ConfigError, ExplorerConfig};
use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::events::render_event::RenderEvent;
use crate::controllers::interactive::input::{InputError, InputEvent, InputTranslator, Targets};
use crate::controllers::interactive::ports::surface::Surface;
use crate::controllers::interactive::scheduler::{Disposition, RenderScheduler, SchedulerState};
use crate::core::view::{PreviewTransform, SurfaceSize, Viewport};
use log::{debug, warn};
use std::error::Error;
use std::fmt;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionError {
    Config(ConfigError),
    Bridge(BridgeError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "configuration error: {}", err),
            Self::Bridge(err) => write!(f, "bridge error: {}", err),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Bridge(err) => Some(err),
        }
    }
}

impl From<ConfigError> for SessionError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<BridgeError> for SessionError {
    fn from(err: BridgeError) -> Self {
        Self::Bridge(err)
    }
}

/// What one [`InteractiveSession::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    pub composited: Option<u64>,
    pub render_issued: Option<u64>,
    pub engine_lost: bool,
}

/// One explorer window: view state, preview, scheduling and the engine link.
///
/// Everything here runs on the UI thread. The only other thread is the
/// engine behind `B`.
pub struct InteractiveSession<S, B> {
    viewport: Viewport,
    compositor: Compositor<S>,
    scheduler: RenderScheduler,
    translator: InputTranslator,
    bridge: B,
    last_render_duration: Option<Duration>,
    last_composited: Option<u64>,
}

impl<S, B> InteractiveSession<S, B>
where
    S: Surface,
    B: RenderBridge,
{
    pub fn new(config: &ExplorerConfig, surface: S, mut bridge: B) -> Result<Self, SessionError> {
        config.validate()?;
        let viewport = config.viewport()?;
        let size = config.surface_size;

        bridge.resize(size.width, size.height)?;
        bridge.set_max_iterations(viewport.iteration_budget())?;

        Ok(Self {
            viewport,
            compositor: Compositor::new(surface, size),
            scheduler: RenderScheduler::new(config.debounce),
            translator: InputTranslator::new(size, config.zoom_factor),
            bridge,
            last_render_duration: None,
            last_composited: None,
        })
    }

    pub fn handle_input(&mut self, event: InputEvent, now: Instant) -> Result<(), InputError> {
        let result = self.translator.handle(
            event,
            now,
            Targets {
                viewport: &mut self.viewport,
                compositor: &mut self.compositor,
                scheduler: &mut self.scheduler,
                bridge: &mut self.bridge,
            },
        );

        if let Err(InputError::Bridge(err)) = &result {
            warn!("input not forwarded: {}", err);
            self.scheduler.engine_lost();
        }
        result
    }

    /// Drains engine events, composites the live frame and fires the
    /// debounce timer if it is due.
    pub fn tick(&mut self, now: Instant) -> TickReport {
        let mut report = TickReport::default();

        loop {
            match self.bridge.poll_event() {
                Ok(Some(event)) => self.process_event(event, now, &mut report),
                Ok(None) => break,
                Err(err) => {
                    warn!("{}", err);
                    self.scheduler.engine_lost();
                    report.engine_lost = true;
                    return report;
                }
            }
        }

        match self.scheduler.poll(now, &self.viewport, &mut self.bridge) {
            Ok(request) => report.render_issued = request.map(|r| r.generation),
            Err(_) => report.engine_lost = true,
        }

        report
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// Changes the iteration cap and schedules a render with it.
    pub fn set_iteration_budget(&mut self, budget: i64, now: Instant) -> Result<u32, BridgeError> {
        let stored = self.viewport.resize_budget(budget);
        // Mid-drag the release schedules the render.
        let dragging = self.translator.is_dragging();

        let result = self.bridge.set_max_iterations(stored).and_then(|()| {
            if dragging {
                Ok(())
            } else {
                self.scheduler.begin_interaction(&mut self.bridge)
            }
        });

        match result {
            Ok(()) => {
                if !dragging {
                    self.scheduler.end_interaction(now);
                }
                Ok(stored)
            }
            Err(err) => {
                self.scheduler.engine_lost();
                Err(err)
            }
        }
    }

    /// Blocks until a frame is composited or `timeout` passes, firing the
    /// debounce timer along the way. For drivers without an event loop.
    pub fn wait_for_frame(&mut self, timeout: Duration) -> Result<Option<u64>, BridgeError> {
        let deadline = Instant::now() + timeout;

        loop {
            let now = Instant::now();
            let report = self.tick(now);
            if report.composited.is_some() {
                return Ok(report.composited);
            }
            if report.engine_lost {
                return Err(BridgeError::EngineUnavailable);
            }
            if now >= deadline {
                return Ok(None);
            }

            let wake_at = self
                .scheduler
                .next_deadline()
                .map_or(deadline, |timer| timer.min(deadline));

            match self.bridge.wait_event(wake_at.saturating_duration_since(now)) {
                Ok(Some(event)) => {
                    let mut report = TickReport::default();
                    self.process_event(event, Instant::now(), &mut report);
                    if report.composited.is_some() {
                        return Ok(report.composited);
                    }
                }
                Ok(None) => {}
                Err(err) => {
                    self.scheduler.engine_lost();
                    return Err(err);
                }
            }
        }
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn preview(&self) -> &PreviewTransform {
        self.compositor.preview()
    }

    #[must_use]
    pub fn size(&self) -> SurfaceSize {
        self.compositor.size()
    }

    #[must_use]
    pub fn scheduler_state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    #[must_use]
    pub fn last_generation(&self) -> u64 {
        self.scheduler.last_generation()
    }

    #[must_use]
    pub fn last_composited_generation(&self) -> Option<u64> {
        self.last_composited
    }

    #[must_use]
    pub fn last_render_duration(&self) -> Option<Duration> {
        self.last_render_duration
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        self.compositor.surface()
    }

    pub fn surface_mut(&mut self) -> &mut S {
        self.compositor.surface_mut()
    }

    #[must_use]
    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    fn process_event(&mut self, event: RenderEvent, now: Instant, report: &mut TickReport) {
        let Disposition::Composite(FrameData {
            generation,
            buffer,
            render_duration,
        }) = self.scheduler.handle_event(event, now)
        else {
            return;
        };

        match self.compositor.composite(buffer) {
            Ok(()) => {
                if let Some(request) = self.scheduler.last_request() {
                    let target = request.target_viewport;
                    debug!(
                        "composited render {} ({:?}) at center ({}, {}) zoom {}",
                        generation,
                        render_duration,
                        target.center_x(),
                        target.center_y(),
                        target.zoom()
                    );
                }
                self.last_render_duration = Some(render_duration);
                self.last_composited = Some(generation);
                report.composited = Some(generation);
            }
            Err(err) => debug!("discarding render {}: {}", generation, err),
        }
    }
}
