use crate::adapters::pixel_format::copy_rgba_to_rgb;
use crate::core::data::pixel_buffer::PixelBuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes `buffer` as a binary PPM, dropping alpha.
pub fn write_ppm<W: Write>(buffer: &PixelBuffer, mut writer: W) -> std::io::Result<()> {
    let mut rgb = vec![0; buffer.width() as usize * buffer.height() as usize * 3];
    copy_rgba_to_rgb(buffer.data(), &mut rgb);

    // P6 means binary RGB, then width, height and max colour value
    writeln!(writer, "P6")?;
    writeln!(writer, "{} {}", buffer.width(), buffer.height())?;
    writeln!(writer, "255")?;
    writer.write_all(&rgb)?;
    writer.flush()
}

/// Creates the parent directory if needed, then writes the file.
pub fn write_ppm_file(buffer: &PixelBuffer, filepath: impl AsRef<Path>) -> std::io::Result<()> {
    let filepath = filepath.as_ref();
    if let Some(parent) = filepath.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    write_ppm(buffer, BufWriter::new(File::create(filepath)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_header_and_rgb_payload() {
        let buffer = PixelBuffer::from_data(2, 1, vec![1, 2, 3, 255, 4, 5, 6, 0]).unwrap();
        let mut out = Vec::new();

        write_ppm(&buffer, &mut out).unwrap();

        let mut expected = b"P6\n2 1\n255\n".to_vec();
        expected.extend_from_slice(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_write_ppm_file_creates_missing_directories() {
        let dir = std::env::temp_dir().join(format!("fractal_viewport_ppm_{}", std::process::id()));
        let path = dir.join("nested").join("frame.ppm");
        let buffer = PixelBuffer::new(3, 2);

        write_ppm_file(&buffer, &path).unwrap();

        let written = std::fs::read(&path).unwrap();
        assert!(written.starts_with(b"P6\n3 2\n255\n"));
        assert_eq!(written.len(), b"P6\n3 2\n255\n".len() + 3 * 2 * 3);
        std::fs::remove_dir_all(dir).unwrap();
    }
}
