//! Hue strip rendering.
//!
//! The strip sweeps hue from 0° at the top to 360° at the bottom at a fixed
//! lightness and chroma. A row has one color, so it is converted once and
//! copied across the row.

use oklch_picker_core::buffer::{PixelBuffer, Rgba, CHANNELS};
use oklch_picker_core::error::PickerError;
use oklch_picker_core::math::{fraction_to_hue, hue_sample_color};
use tracing::trace;

/// The color of row `y` in a strip `height` pixels tall.
pub fn hue_row_color(y: usize, height: usize) -> Rgba {
    Rgba::opaque(hue_sample_color(fraction_to_hue(y as f64 / height as f64)))
}

/// Renders the hue strip into a new `width × height` buffer.
///
/// Returns `PickerError::InvalidDimensions` if either side is zero.
pub fn render_hue_strip(width: usize, height: usize) -> Result<PixelBuffer, PickerError> {
    trace!(width, height, "render_hue_strip");
    let mut buffer = PixelBuffer::new(width, height)?;
    for (y, row) in buffer.rows_mut().enumerate() {
        let bytes = hue_row_color(y, height).to_bytes();
        row.chunks_exact_mut(CHANNELS)
            .for_each(|px| px.copy_from_slice(&bytes));
    }
    Ok(buffer)
}
