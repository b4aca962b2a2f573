use crate::controllers::interactive::bridge::{BridgeError, EngineRequest, RenderBridge};
use crate::controllers::interactive::events::render_event::RenderEvent;
use crate::controllers::interactive::ports::surface::Surface;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::view::{PreviewTransform, SurfaceSize};
use std::collections::VecDeque;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum BridgeCall {
    Request(EngineRequest),
    Supersede(u64),
}

/// Records every call and replays queued events.
#[derive(Debug, Default)]
pub(crate) struct MockBridge {
    pub calls: Vec<BridgeCall>,
    pub events: VecDeque<RenderEvent>,
    pub unavailable: bool,
}

impl MockBridge {
    pub fn renders(&self) -> Vec<u64> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BridgeCall::Request(EngineRequest::Render { generation }) => Some(*generation),
                _ => None,
            })
            .collect()
    }

    pub fn requests(&self) -> Vec<EngineRequest> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BridgeCall::Request(request) => Some(*request),
                BridgeCall::Supersede(_) => None,
            })
            .collect()
    }

    fn record(&mut self, call: BridgeCall) -> Result<(), BridgeError> {
        if self.unavailable {
            return Err(BridgeError::EngineUnavailable);
        }
        self.calls.push(call);
        Ok(())
    }
}

impl RenderBridge for MockBridge {
    fn resize(&mut self, width: u32, height: u32) -> Result<(), BridgeError> {
        self.record(BridgeCall::Request(EngineRequest::Resize { width, height }))
    }

    fn change_view(&mut self, delta_x: f64, delta_y: f64) -> Result<(), BridgeError> {
        self.record(BridgeCall::Request(EngineRequest::ChangeView { delta_x, delta_y }))
    }

    fn change_zoom(&mut self, factor: f64) -> Result<(), BridgeError> {
        self.record(BridgeCall::Request(EngineRequest::ChangeZoom { factor }))
    }

    fn set_max_iterations(&mut self, max_iterations: u32) -> Result<(), BridgeError> {
        self.record(BridgeCall::Request(EngineRequest::SetMaxIterations {
            max_iterations,
        }))
    }

    fn render(&mut self, generation: u64) -> Result<(), BridgeError> {
        self.record(BridgeCall::Request(EngineRequest::Render { generation }))
    }

    fn supersede(&mut self, generation: u64) -> Result<(), BridgeError> {
        self.record(BridgeCall::Supersede(generation))
    }

    fn poll_event(&mut self) -> Result<Option<RenderEvent>, BridgeError> {
        if let Some(event) = self.events.pop_front() {
            return Ok(Some(event));
        }
        if self.unavailable {
            return Err(BridgeError::EngineUnavailable);
        }
        Ok(None)
    }

    fn wait_event(&mut self, _: Duration) -> Result<Option<RenderEvent>, BridgeError> {
        self.poll_event()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SurfaceCall {
    Paint { width: u32, height: u32 },
    Preview(PreviewTransform),
    Resize(SurfaceSize),
}

#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn paints(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, SurfaceCall::Paint { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn paint(&mut self, buffer: &PixelBuffer) {
        self.calls.push(SurfaceCall::Paint {
            width: buffer.width(),
            height: buffer.height(),
        });
    }

    fn apply_preview(&mut self, transform: &PreviewTransform) {
        self.calls.push(SurfaceCall::Preview(*transform));
    }

    fn resize(&mut self, size: SurfaceSize) {
        self.calls.push(SurfaceCall::Resize(size));
    }
}
