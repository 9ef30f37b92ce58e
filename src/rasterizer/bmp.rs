//! 24-bit BMP output
//!
//! Rows are written in buffer order (row 0 first). BMP readers treat the first
//! stored row as the bottom of the image, so buffer y grows upwards on screen.
//! Rows are not padded to 4 bytes; widths that are not a multiple of 4 produce
//! files that strict readers may reject.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::framebuffer::Framebuffer;
use crate::error::RenderError;

/// File header (14) + BITMAPINFOHEADER (40)
pub const HEADER_SIZE: u32 = 54;
const DIB_HEADER_SIZE: u32 = 40;
const BITS_PER_PIXEL: u16 = 24;

/// Header fields for a `width` x `height` image: (signed width, signed height, pixel bytes, file size)
fn header_sizes(width: usize, height: usize) -> Result<(i32, i32, u32, u32), RenderError> {
    let too_large = || RenderError::ImageTooLarge { width, height };
    let w = i32::try_from(width).map_err(|_| too_large())?;
    let h = i32::try_from(height).map_err(|_| too_large())?;
    let image_size = u32::try_from(width)
        .ok()
        .and_then(|w| w.checked_mul(u32::try_from(height).ok()?))
        .and_then(|n| n.checked_mul(3))
        .ok_or_else(too_large)?;
    let file_size = HEADER_SIZE.checked_add(image_size).ok_or_else(too_large)?;
    Ok((w, h, image_size, file_size))
}

/// Serialize the framebuffer to BMP bytes.
/// Fails with `ImageTooLarge` when a size does not fit its header field.
pub fn encode_bmp(fb: &Framebuffer) -> Result<Vec<u8>, RenderError> {
    let (width, height, image_size, file_size) = header_sizes(fb.width(), fb.height())?;

    let mut out = Vec::with_capacity(file_size as usize);

    // File header
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // Reserved
    out.extend_from_slice(&HEADER_SIZE.to_le_bytes());

    // Info header
    out.extend_from_slice(&DIB_HEADER_SIZE.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // Planes
    out.extend_from_slice(&BITS_PER_PIXEL.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // No compression
    out.extend_from_slice(&image_size.to_le_bytes());
    out.extend_from_slice(&[0u8; 16]); // Resolution and palette counts

    for color in fb.pixels() {
        out.extend_from_slice(&color.to_bgr());
    }

    Ok(out)
}

/// Encode and write the framebuffer to `path`.
///
/// Writes to a sibling `.tmp` file first and renames it into place, so a failed
/// write never leaves a partial file under the target name.
pub fn write_bmp<P: AsRef<Path>>(fb: &Framebuffer, path: P) -> Result<(), RenderError> {
    let path = path.as_ref();
    let bytes = encode_bmp(fb)?;

    let tmp = tmp_path(path);
    let result = write_and_sync(&tmp, &bytes).and_then(|_| fs::rename(&tmp, path));
    if let Err(e) = result {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }

    log::info!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

fn write_and_sync(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
