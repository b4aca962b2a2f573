pub mod blue_white_gradient;
pub mod escape_flat;
