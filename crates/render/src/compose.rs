//! Joining the two picker surfaces into one widget-sized image.

use oklch_picker_core::buffer::{PixelBuffer, CHANNELS};
use oklch_picker_core::error::PickerError;

/// Places `plane` on the left and `hue` on the right, top-aligned.
///
/// The result is `plane.width() + hue.width()` wide and as tall as the
/// taller input; uncovered pixels stay transparent.
pub fn compose_side_by_side(
    plane: &PixelBuffer,
    hue: &PixelBuffer,
) -> Result<PixelBuffer, PickerError> {
    let width = plane.width() + hue.width();
    let height = plane.height().max(hue.height());
    let mut out = PixelBuffer::new(width, height)?;
    let stride = width * CHANNELS;
    let data = out.data_mut();
    for (left, part) in [(0, plane), (plane.width(), hue)] {
        let span = part.width() * CHANNELS;
        for y in 0..part.height() {
            let start = y * stride + left * CHANNELS;
            data[start..start + span].copy_from_slice(part.row(y));
        }
    }
    Ok(out)
}
