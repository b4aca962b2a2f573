//! Pixel copying helpers for presentation adapters.

use crate::core::data::pixel_buffer::{CHANNELS_PER_PIXEL, PixelBuffer};
use crate::core::view::PreviewTransform;
use rayon::prelude::*;

/// Copies RGBA pixel data to RGB, dropping alpha.
///
/// # Panics
/// Panics if `src` is not a multiple of 4 or `dst` is not exactly three
/// quarters of its length.
pub fn copy_rgba_to_rgb(src: &[u8], dst: &mut [u8]) {
    assert!(
        src.len() % 4 == 0,
        "src length {} is not a multiple of 4",
        src.len()
    );
    let expected_dst_len = (src.len() / 4) * 3;
    assert_eq!(
        dst.len(),
        expected_dst_len,
        "dst length {} does not match expected {}",
        dst.len(),
        expected_dst_len
    );

    for (src_pixel, dst_pixel) in src.chunks_exact(4).zip(dst.chunks_exact_mut(3)) {
        dst_pixel.copy_from_slice(&src_pixel[..3]);
    }
}

/// Draws `src` into an RGBA frame of `dst_width` x `dst_height`, displaced
/// by `transform`. Uncovered pixels get `background`.
///
/// Sampling is nearest-neighbour at pixel centers. With the identity transform
/// and matching sizes this is a plain copy.
///
/// # Panics
/// Panics if `dst` is not `dst_width * dst_height * 4` bytes.
pub fn blit_with_preview(
    src: &PixelBuffer,
    transform: &PreviewTransform,
    dst: &mut [u8],
    dst_width: u32,
    dst_height: u32,
    background: [u8; 4],
) {
    let row_bytes = dst_width as usize * CHANNELS_PER_PIXEL;
    assert_eq!(
        dst.len(),
        row_bytes * dst_height as usize,
        "dst length {} does not match {}x{}",
        dst.len(),
        dst_width,
        dst_height
    );

    if row_bytes == 0 {
        return;
    }

    if transform.is_identity() && src.width() == dst_width && src.height() == dst_height {
        dst.copy_from_slice(src.data());
        return;
    }

    let src_width = src.width() as usize;
    let src_height = src.height() as usize;
    let src_data = src.data();
    let width = f64::from(dst_width);
    let height = f64::from(dst_height);

    dst.par_chunks_exact_mut(row_bytes)
        .enumerate()
        .for_each(|(y, row)| {
            let fy = (y as f64 + 0.5) / height;

            for (x, pixel) in row.chunks_exact_mut(CHANNELS_PER_PIXEL).enumerate() {
                let fx = (x as f64 + 0.5) / width;

                let sample = transform.source_point(fx, fy).and_then(|(u, v)| {
                    let sx = ((u * src_width as f64) as usize).min(src_width.checked_sub(1)?);
                    let sy = ((v * src_height as f64) as usize).min(src_height.checked_sub(1)?);
                    let start = (sy * src_width + sx) * CHANNELS_PER_PIXEL;
                    src_data.get(start..start + CHANNELS_PER_PIXEL)
                });

                match sample {
                    Some(source) => pixel.copy_from_slice(source),
                    None => pixel.copy_from_slice(&background),
                }
            }
        });
}
