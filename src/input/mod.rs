//! Input adapters for the fractal viewport.
//!
//! Each adapter receives input from some source and feeds it to an
//! interactive session.

#[cfg(feature = "gui")]
pub mod gui;
