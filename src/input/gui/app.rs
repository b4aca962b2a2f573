use crate::controllers::interactive::bridge::WorkerBridge;
use crate::controllers::interactive::input::InputEvent;
use crate::controllers::interactive::session::{InteractiveSession, TickReport};
use crate::input::gui::events::GuiEvent;
use crate::presenters::pixels::surface::PixelsSurface;
use egui::Context;
use egui_winit::State as EguiWinitState;
use log::warn;
use std::time::Instant;
use winit::event::WindowEvent;
use winit::event_loop::EventLoop;
use winit::window::Window;

const MAX_SLIDER_ITERATIONS: u32 = 5000;

pub type GuiSession = InteractiveSession<PixelsSurface, WorkerBridge>;

pub struct GuiApp {
    session: GuiSession,
    colour_map_name: &'static str,
    iteration_budget: u32,
    last_error_message: Option<String>,
    pub scale_factor: f64,
    pub egui_ctx: Context,
    pub egui_state: EguiWinitState,
}

impl GuiApp {
    pub fn new(
        window: &'static Window,
        event_loop: &EventLoop<GuiEvent>,
        session: GuiSession,
        colour_map_name: &'static str,
    ) -> Self {
        let scale_factor = window.scale_factor();
        let egui_ctx = Context::default();

        let egui_state = EguiWinitState::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            event_loop,
            Some(scale_factor as f32),
            None, // max_texture_side, use default
        );

        Self {
            iteration_budget: session.viewport().iteration_budget(),
            session,
            colour_map_name,
            last_error_message: None,
            scale_factor,
            egui_ctx,
            egui_state,
        }
    }

    #[must_use]
    pub fn session(&self) -> &GuiSession {
        &self.session
    }

    pub fn tick(&mut self, now: Instant) -> TickReport {
        let report = self.session.tick(now);
        if report.engine_lost {
            self.last_error_message = Some("render engine stopped".to_string());
        }
        report
    }

    pub fn handle_input(&mut self, event: InputEvent, now: Instant) {
        if let Err(err) = self.session.handle_input(event, now) {
            warn!("input {:?} failed: {}", event, err);
            self.last_error_message = Some(err.to_string());
        }
    }

    pub fn render(&mut self, egui_output: egui::FullOutput) -> Result<(), pixels::Error> {
        self.session
            .surface_mut()
            .render(egui_output, &self.egui_ctx)
    }

    pub fn update_ui(&mut self, window: &Window, now: Instant) -> egui::FullOutput {
        let raw_input = self.egui_state.take_egui_input(window);
        let mut requested_budget = self.iteration_budget;

        let viewport = *self.session.viewport();
        let size = self.session.size();
        let generation = self.session.last_composited_generation();
        let render_duration = self.session.last_render_duration();
        let state = self.session.scheduler_state();
        let preview_box = self.session.preview().css_rect();
        let colour_map_name = self.colour_map_name;
        let last_error_message = self.last_error_message.as_deref();

        let output = self.egui_ctx.run(raw_input, |ctx| {
            egui::Window::new("Debug Panel")
                .default_pos([10.0, 10.0])
                .default_size([260.0, 220.0])
                .show(ctx, |ui| {
                    ui.heading("Fractal Viewport");
                    ui.separator();

                    ui.horizontal(|ui| {
                        ui.label("Max iterations:");
                        ui.add(egui::Slider::new(
                            &mut requested_budget,
                            1..=MAX_SLIDER_ITERATIONS,
                        ));
                    });
                    ui.label(format!("Colour map: {}", colour_map_name));

                    ui.separator();
                    ui.label(format!(
                        "Center: ({:.6}, {:.6})",
                        viewport.center_x(),
                        viewport.center_y()
                    ));
                    ui.label(format!("Zoom: {:.4e}", viewport.zoom()));

                    ui.separator();
                    ui.label(format!("Window size: {}x{}", size.width, size.height));
                    ui.label(format!("Scheduler: {:?}", state));
                    ui.label(format!(
                        "Preview: left {:.1}% top {:.1}% size {:.1}% x {:.1}%",
                        preview_box.left, preview_box.top, preview_box.width, preview_box.height
                    ));
                    if let Some(generation) = generation {
                        ui.label(format!("Shown generation: {}", generation));
                    }
                    if let Some(render_duration) = render_duration {
                        ui.label(format!("Last render: {} ms", render_duration.as_millis()));
                    }
                    if let Some(message) = last_error_message {
                        ui.separator();
                        ui.colored_label(egui::Color32::LIGHT_RED, message);
                    }
                });
        });

        if requested_budget != self.iteration_budget {
            match self
                .session
                .set_iteration_budget(i64::from(requested_budget), now)
            {
                Ok(stored) => self.iteration_budget = stored,
                Err(err) => self.last_error_message = Some(err.to_string()),
            }
        }

        output
    }

    /// Returns `(consumed, repaint)` as reported by egui.
    pub fn handle_window_event(&mut self, window: &Window, event: &WindowEvent) -> (bool, bool) {
        let response = self.egui_state.on_window_event(window, event);
        (response.consumed, response.repaint)
    }
}
