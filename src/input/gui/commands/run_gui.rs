use crate::controllers::interactive::bridge::{MandelbrotEngine, WorkerBridge};
use crate::controllers::interactive::config::ExplorerConfig;
use crate::controllers::interactive::input::InputEvent;
use crate::controllers::interactive::session::InteractiveSession;
use crate::core::view::SurfaceSize;
use crate::input::gui::app::GuiApp;
use crate::input::gui::events::GuiEvent;
use crate::input::gui::translate::translate_window_event;
use crate::presenters::pixels::surface::PixelsSurface;
use crate::presenters::pixels::waker::ProxyWaker;
use log::{error, info};
use std::error::Error;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    dpi::LogicalSize,
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoopBuilder},
    window::{Window, WindowBuilder},
};

pub struct RunGuiCommand {
    config: ExplorerConfig,
}

impl RunGuiCommand {
    pub fn new(config: ExplorerConfig) -> Self {
        Self { config }
    }

    /// Opens the explorer window. Returns when the window is closed.
    pub fn execute(&self) -> Result<(), Box<dyn Error>> {
        self.config.validate()?;

        let event_loop = EventLoopBuilder::<GuiEvent>::with_user_event().build()?;
        let event_loop_proxy = event_loop.create_proxy();

        let requested = self.config.surface_size;
        let window: &'static Window = Box::leak(Box::new(
            WindowBuilder::new()
                .with_title("Fractal Viewport")
                .with_inner_size(LogicalSize::new(requested.width, requested.height))
                .with_min_inner_size(LogicalSize::new(200.0, 200.0))
                .build(&event_loop)?,
        ));

        // The session works in physical pixels.
        let inner = window.inner_size();
        let config = ExplorerConfig {
            surface_size: SurfaceSize::new(inner.width, inner.height),
            ..self.config.clone()
        };

        let surface = PixelsSurface::new(window)?;
        let engine = MandelbrotEngine::new(
            (config.center_x, config.center_y),
            config.zoom,
            config.iteration_budget,
            config.colour_map,
        );
        let bridge = WorkerBridge::spawn(engine, Arc::new(ProxyWaker::new(event_loop_proxy)));
        let session = InteractiveSession::new(&config, surface, bridge)?;
        let mut app = GuiApp::new(window, &event_loop, session, config.colour_map.display_name());
        let mut redraw_pending = true;

        info!(
            "explorer window open at {}x{}",
            config.surface_size.width, config.surface_size.height
        );

        event_loop.run(|event, elwt| {
            match event {
                Event::UserEvent(GuiEvent::Wake) => {
                    if app.tick(Instant::now()).composited.is_some() {
                        redraw_pending = true;
                    }
                }
                Event::WindowEvent {
                    ref event,
                    window_id,
                } if window_id == window.id() => {
                    let (egui_consumed, egui_repaint) = app.handle_window_event(window, event);

                    if egui_repaint {
                        redraw_pending = true;
                    }

                    match event {
                        WindowEvent::CloseRequested => {
                            elwt.exit();
                        }
                        WindowEvent::RedrawRequested => {
                            redraw_pending = false;

                            let egui_output = app.update_ui(window, Instant::now());

                            app.egui_state.handle_platform_output(
                                window,
                                egui_output.platform_output.clone(),
                            );

                            if egui_output
                                .viewport_output
                                .values()
                                .any(|v| v.repaint_delay.is_zero())
                            {
                                redraw_pending = true;
                            }

                            if let Err(e) = app.render(egui_output) {
                                error!("render error: {e}");
                                elwt.exit();
                            }
                        }
                        WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                            app.scale_factor = *scale_factor;
                            app.egui_ctx.set_pixels_per_point(*scale_factor as f32);
                            let size = window.inner_size();
                            app.handle_input(
                                InputEvent::Resize {
                                    width: size.width,
                                    height: size.height,
                                },
                                Instant::now(),
                            );
                            redraw_pending = true;
                        }
                        _ => {
                            if let Some(input) = translate_window_event(event) {
                                // Presses and wheel steps over the panel belong to egui.
                                let over_panel = egui_consumed
                                    && matches!(
                                        input,
                                        InputEvent::PointerDown { .. } | InputEvent::Wheel { .. }
                                    );
                                if !over_panel {
                                    app.handle_input(input, Instant::now());
                                    redraw_pending = true;
                                }
                            }
                        }
                    }
                }
                Event::AboutToWait => {
                    if app.tick(Instant::now()).composited.is_some() {
                        redraw_pending = true;
                    }

                    if redraw_pending {
                        window.request_redraw();
                    }

                    match app.session().next_deadline() {
                        Some(deadline) => elwt.set_control_flow(ControlFlow::WaitUntil(deadline)),
                        None => elwt.set_control_flow(ControlFlow::Wait),
                    }
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}
