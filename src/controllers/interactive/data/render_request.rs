use crate::core::view::Viewport;

/// One dispatched render: the view it was issued for and its generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest {
    pub generation: u64,
    pub target_viewport: Viewport,
}
