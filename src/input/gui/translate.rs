//! Mapping from winit window events to session input.

use crate::controllers::interactive::input::{InputEvent, PointerButton};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

/// Pixel-precise wheels report roughly this many pixels per notch.
const PIXELS_PER_LINE: f64 = 40.0;

/// Converts the window events the explorer reacts to. Everything else maps
/// to `None`.
pub fn translate_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::CursorMoved { position, .. } => Some(InputEvent::PointerMoved {
            x: position.x,
            y: position.y,
        }),
        WindowEvent::MouseInput { state, button, .. } => {
            let button = pointer_button(*button);
            Some(match state {
                ElementState::Pressed => InputEvent::PointerDown { button },
                ElementState::Released => InputEvent::PointerUp { button },
            })
        }
        WindowEvent::MouseWheel { delta, .. } => Some(InputEvent::Wheel {
            delta_y: wheel_delta(*delta),
        }),
        WindowEvent::Resized(size) => Some(InputEvent::Resize {
            width: size.width,
            height: size.height,
        }),
        _ => None,
    }
}

pub fn pointer_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        MouseButton::Middle => PointerButton::Middle,
        _ => PointerButton::Other,
    }
}

/// winit reports scrolling up as positive; input expects positive to mean
/// scrolling down.
pub fn wheel_delta(delta: MouseScrollDelta) -> f64 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -f64::from(y),
        MouseScrollDelta::PixelDelta(position) => -position.y / PIXELS_PER_LINE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::{PhysicalPosition, PhysicalSize};

    #[test]
    fn test_left_button_is_primary() {
        assert_eq!(pointer_button(MouseButton::Left), PointerButton::Primary);
        assert_eq!(pointer_button(MouseButton::Right), PointerButton::Secondary);
        assert_eq!(pointer_button(MouseButton::Other(7)), PointerButton::Other);
    }

    #[test]
    fn test_scrolling_up_zooms_in() {
        assert_eq!(wheel_delta(MouseScrollDelta::LineDelta(0.0, 1.0)), -1.0);
        assert_eq!(wheel_delta(MouseScrollDelta::LineDelta(0.0, -2.0)), 2.0);
        assert_eq!(
            wheel_delta(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 80.0))),
            -2.0
        );
    }

    #[test]
    fn test_resize_is_forwarded_in_physical_pixels() {
        let event = WindowEvent::Resized(PhysicalSize::new(640, 480));

        assert_eq!(
            translate_window_event(&event),
            Some(InputEvent::Resize {
                width: 640,
                height: 480
            })
        );
    }

    #[test]
    fn test_unrelated_events_are_ignored() {
        assert_eq!(translate_window_event(&WindowEvent::CloseRequested), None);
        assert_eq!(translate_window_event(&WindowEvent::Focused(true)), None);
    }
}
