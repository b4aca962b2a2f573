use crate::controllers::interactive::ports::event_waker::EventWaker;
use crate::input::gui::events::GuiEvent;
use std::sync::Mutex;
use winit::event_loop::EventLoopProxy;

/// Posts [`GuiEvent::Wake`] into the winit event loop.
pub struct ProxyWaker {
    proxy: Mutex<EventLoopProxy<GuiEvent>>,
}

impl ProxyWaker {
    pub fn new(proxy: EventLoopProxy<GuiEvent>) -> Self {
        Self {
            proxy: Mutex::new(proxy),
        }
    }
}

impl EventWaker for ProxyWaker {
    fn wake(&self) {
        if let Ok(proxy) = self.proxy.lock() {
            // The loop has exited if this fails; nothing left to wake.
            let _ = proxy.send_event(GuiEvent::Wake);
        }
    }
}
