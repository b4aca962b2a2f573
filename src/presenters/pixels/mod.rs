pub mod surface;
pub mod waker;
