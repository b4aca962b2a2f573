use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::errors::render::RenderError;

/// Everything the engine thread sends back to the controller.
#[derive(Debug)]
pub enum RenderEvent {
    /// The engine is up and accepting requests.
    Ready,
    Frame(FrameData),
    /// The render was superseded before it finished.
    Cancelled { generation: u64 },
    Error(RenderError),
}

impl RenderEvent {
    #[must_use]
    pub fn generation(&self) -> Option<u64> {
        match self {
            Self::Ready => None,
            Self::Frame(frame) => Some(frame.generation),
            Self::Cancelled { generation } => Some(*generation),
            Self::Error(error) => Some(error.generation),
        }
    }
}
