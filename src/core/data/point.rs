/// A pixel position, measured from the top-left corner of the surface.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}
