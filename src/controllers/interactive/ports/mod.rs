//! Port definitions for the interactive controller.
//!
//! The controller paints through [`surface::Surface`] and is woken by the
//! engine thread through [`event_waker::EventWaker`].

pub mod event_waker;
pub mod surface;
