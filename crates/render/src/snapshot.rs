//! PNG export of rendered picker buffers.
//!
//! Feature-gated behind `png` (default on) so that embedders which only need
//! the raw buffers do not pull in the `image` crate.

use std::path::Path;

use oklch_picker_core::buffer::PixelBuffer;
use oklch_picker_core::error::PickerError;
use tracing::debug;

/// Writes an RGBA buffer as a PNG file.
///
/// Returns `PickerError::InvalidDimensions` if the buffer does not fit
/// `u32` dimensions, or `PickerError::Io` on encode or write failure.
pub fn write_png(buffer: &PixelBuffer, path: &Path) -> Result<(), PickerError> {
    let invalid = || PickerError::InvalidDimensions {
        width: buffer.width(),
        height: buffer.height(),
    };
    let w = u32::try_from(buffer.width()).map_err(|_| invalid())?;
    let h = u32::try_from(buffer.height()).map_err(|_| invalid())?;
    let img = image::RgbaImage::from_raw(w, h, buffer.data().to_vec())
        .ok_or_else(|| PickerError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| PickerError::Io(e.to_string()))?;
    debug!(path = %path.display(), width = w, height = h, "wrote png");
    Ok(())
}
