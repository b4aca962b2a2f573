use crate::controllers::interactive::bridge::{BridgeError, RenderBridge};
use crate::controllers::interactive::compositor::Compositor;
use crate::controllers::interactive::ports::surface::Surface;
use crate::controllers::interactive::scheduler::RenderScheduler;
use crate::core::view::{SurfaceSize, Viewport, ViewportError};
use std::error::Error;
use std::fmt;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other,
}

/// Raw input in surface pixels, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMoved { x: f64, y: f64 },
    PointerDown { button: PointerButton },
    PointerUp { button: PointerButton },
    /// Positive `delta_y` scrolls down, which zooms out.
    Wheel { delta_y: f64 },
    Resize { width: u32, height: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputError {
    Bridge(BridgeError),
    Viewport(ViewportError),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bridge(err) => write!(f, "bridge error: {}", err),
            Self::Viewport(err) => write!(f, "viewport error: {}", err),
        }
    }
}

impl Error for InputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Bridge(err) => Some(err),
            Self::Viewport(err) => Some(err),
        }
    }
}

impl From<BridgeError> for InputError {
    fn from(err: BridgeError) -> Self {
        Self::Bridge(err)
    }
}

impl From<ViewportError> for InputError {
    fn from(err: ViewportError) -> Self {
        Self::Viewport(err)
    }
}

/// Everything one input event may touch.
pub struct Targets<'a, S, B: ?Sized> {
    pub viewport: &'a mut Viewport,
    pub compositor: &'a mut Compositor<S>,
    pub scheduler: &'a mut RenderScheduler,
    pub bridge: &'a mut B,
}

/// Turns pointer, wheel and resize events into view changes.
///
/// Each navigation step is applied three times in lockstep: to the
/// authoritative `Viewport`, to the engine as a relative message, and to the
/// preview so the user sees it before the render lands.
#[derive(Debug, Clone)]
pub struct InputTranslator {
    size: SurfaceSize,
    zoom_factor: f64,
    cursor: Option<(f64, f64)>,
    pressed: bool,
}

impl InputTranslator {
    #[must_use]
    pub fn new(size: SurfaceSize, zoom_factor: f64) -> Self {
        Self {
            size,
            zoom_factor,
            cursor: None,
            pressed: false,
        }
    }

    #[must_use]
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    #[must_use]
    pub fn cursor(&self) -> Option<(f64, f64)> {
        self.cursor
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.pressed
    }

    pub fn handle<S, B>(
        &mut self,
        event: InputEvent,
        now: Instant,
        targets: Targets<'_, S, B>,
    ) -> Result<(), InputError>
    where
        S: Surface,
        B: RenderBridge + ?Sized,
    {
        match event {
            InputEvent::Resize { width, height } => self.resize(width, height, now, targets),
            _ if self.size.is_empty() => Ok(()),
            InputEvent::PointerMoved { x, y } => self.pointer_moved(x, y, targets),
            InputEvent::PointerDown {
                button: PointerButton::Primary,
            } => {
                self.pressed = true;
                targets.scheduler.begin_interaction(&mut *targets.bridge)?;
                Ok(())
            }
            InputEvent::PointerUp {
                button: PointerButton::Primary,
            } if self.pressed => {
                self.pressed = false;
                targets.scheduler.end_interaction(now);
                Ok(())
            }
            InputEvent::Wheel { delta_y } if !self.pressed && delta_y != 0.0 => {
                self.wheel(delta_y, now, targets)
            }
            _ => Ok(()),
        }
    }

    fn pointer_moved<S, B>(
        &mut self,
        x: f64,
        y: f64,
        targets: Targets<'_, S, B>,
    ) -> Result<(), InputError>
    where
        S: Surface,
        B: RenderBridge + ?Sized,
    {
        let previous = self.cursor.replace((x, y));

        let Some((last_x, last_y)) = previous else {
            return Ok(());
        };
        if !self.pressed {
            return Ok(());
        }

        let (px, py) = (x - last_x, y - last_y);
        if px == 0.0 && py == 0.0 {
            return Ok(());
        }

        let (view_x, view_y) = self.size.pixels_to_view_units(-px, -py);
        targets.viewport.pan(view_x, view_y);
        targets.bridge.change_view(view_x, view_y)?;

        let (preview_x, preview_y) = self.size.fraction_of(px, py);
        targets.compositor.pan_preview(preview_x, preview_y);

        Ok(())
    }

    fn wheel<S, B>(
        &mut self,
        delta_y: f64,
        now: Instant,
        targets: Targets<'_, S, B>,
    ) -> Result<(), InputError>
    where
        S: Surface,
        B: RenderBridge + ?Sized,
    {
        let factor = if delta_y > 0.0 {
            1.0 / self.zoom_factor
        } else {
            self.zoom_factor
        };

        let (x, y) = self.cursor.unwrap_or((
            f64::from(self.size.width) / 2.0,
            f64::from(self.size.height) / 2.0,
        ));
        let (fx, fy) = self.size.cursor_offset(x, y);

        targets.viewport.zoom_toward(fx, fy, factor)?;

        targets.scheduler.begin_interaction(&mut *targets.bridge)?;
        targets.bridge.change_view(2.0 * fx, 2.0 * fy)?;
        targets.bridge.change_zoom(factor)?;
        targets.bridge.change_view(-2.0 * fx, -2.0 * fy)?;

        let (pivot_x, pivot_y) = self.size.fraction_of(x, y);
        targets.compositor.zoom_preview(pivot_x, pivot_y, factor);

        targets.scheduler.end_interaction(now);

        Ok(())
    }

    fn resize<S, B>(
        &mut self,
        width: u32,
        height: u32,
        now: Instant,
        targets: Targets<'_, S, B>,
    ) -> Result<(), InputError>
    where
        S: Surface,
        B: RenderBridge + ?Sized,
    {
        self.size = SurfaceSize::new(width, height);
        targets.compositor.resize(self.size);
        targets
            .scheduler
            .resize(width, height, &mut *targets.bridge, now)?;
        Ok(())
    }
}
