//! Lightness/chroma plane rendering.
//!
//! Every pixel is converted independently: its normalized position gives a
//! chroma and lightness, which together with the fixed hue either yield a
//! displayable sRGB color or nothing. Pixels with no displayable color stay
//! transparent black, which is how the gamut boundary shows up in the picker.

use oklch_picker_core::buffer::{PixelBuffer, Rgba, CHANNELS};
use oklch_picker_core::error::PickerError;
use oklch_picker_core::math::{pixel_to_cl, to_rgb, NormalizedPoint};
use tracing::trace;

/// The RGBA value of plane pixel `(x, y)` in a `width × height` plane at `hue`.
pub fn plane_pixel(x: usize, y: usize, width: usize, height: usize, hue: f64) -> Rgba {
    let point = NormalizedPoint::from_pixels(x as f64, y as f64, width, height);
    to_rgb(pixel_to_cl(point).with_hue(hue))
        .map(Rgba::opaque)
        .unwrap_or(Rgba::TRANSPARENT)
}

/// Renders the plane for `hue` into a new `width × height` buffer.
///
/// Returns `PickerError::InvalidDimensions` if either side is zero.
pub fn render_plane(width: usize, height: usize, hue: f64) -> Result<PixelBuffer, PickerError> {
    trace!(width, height, hue, "render_plane");
    let mut buffer = PixelBuffer::new(width, height)?;
    for (y, row) in buffer.rows_mut().enumerate() {
        for (x, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
            px.copy_from_slice(&plane_pixel(x, y, width, height, hue).to_bytes());
        }
    }
    Ok(buffer)
}
