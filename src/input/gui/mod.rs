//! Windowed front end for interactive exploration.
//!
//! winit supplies the window and input, pixels the framebuffer and egui the
//! control panel. All view logic lives in the interactive session.

pub mod app;
pub mod commands;
pub mod events;
pub mod translate;
