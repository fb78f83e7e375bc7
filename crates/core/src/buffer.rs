//! RGBA8 pixel buffers.
//!
//! A [`PixelBuffer`] stores `width * height` pixels, four bytes each, in
//! row-major order from the top row down. Renderers produce a fresh buffer
//! per frame and hand it to a surface; nothing keeps buffers across frames.

use crate::color::Srgb;
use crate::error::PickerError;

/// Bytes per RGBA8 pixel.
pub const CHANNELS: usize = 4;

/// One RGBA8 pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Quantizes a displayable color to opaque 8-bit channels with rounding.
    ///
    /// Channels are expected in `[0, 1]`; anything outside saturates.
    pub fn opaque(color: Srgb) -> Self {
        let quantize = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
        Self {
            r: quantize(color.r),
            g: quantize(color.g),
            b: quantize(color.b),
            a: 255,
        }
    }

    pub const fn to_bytes(self) -> [u8; CHANNELS] {
        [self.r, self.g, self.b, self.a]
    }

    pub const fn from_bytes(bytes: [u8; CHANNELS]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }
}

/// A width × height grid of RGBA8 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

/// Byte length of a `width × height` buffer, rejecting zero sizes and overflow.
fn byte_len(width: usize, height: usize) -> Result<usize, PickerError> {
    let invalid = PickerError::InvalidDimensions { width, height };
    if width == 0 || height == 0 {
        return Err(invalid);
    }
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or(invalid)
}

impl PixelBuffer {
    /// Creates a fully transparent buffer.
    ///
    /// Returns `PickerError::InvalidDimensions` if either dimension is zero,
    /// the byte length overflows `usize`, or the allocation fails.
    pub fn new(width: usize, height: usize) -> Result<Self, PickerError> {
        let len = byte_len(width, height)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| PickerError::InvalidDimensions { width, height })?;
        data.resize(len, 0);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wraps an existing RGBA8 byte vector.
    pub fn from_data(width: usize, height: usize, data: Vec<u8>) -> Result<Self, PickerError> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(PickerError::DimensionMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw row-major RGBA8 bytes, ready for an `ImageData`-style blit.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Bytes of row `y`. Panics if `y >= height`.
    pub fn row(&self, y: usize) -> &[u8] {
        let stride = self.width * CHANNELS;
        &self.data[y * stride..(y + 1) * stride]
    }

    /// Iterates mutable rows, top to bottom.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [u8]> {
        self.data.chunks_exact_mut(self.width * CHANNELS)
    }

    fn offset(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y * self.width + x) * CHANNELS)
    }

    /// The pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        let i = self.offset(x, y)?;
        let mut bytes = [0; CHANNELS];
        bytes.copy_from_slice(&self.data[i..i + CHANNELS]);
        Some(Rgba::from_bytes(bytes))
    }

    /// Writes the pixel at `(x, y)`. Coordinates outside the buffer are ignored.
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgba) {
        if let Some(i) = self.offset(x, y) {
            self.data[i..i + CHANNELS].copy_from_slice(&color.to_bytes());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_transparent() {
        let buf = PixelBuffer::new(3, 2).unwrap();
        assert_eq!(buf.data().len(), 3 * 2 * 4);
        assert!(buf.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn new_rejects_zero_dimensions() {
        assert!(matches!(
            PixelBuffer::new(0, 10),
            Err(PickerError::InvalidDimensions { width: 0, height: 10 })
        ));
        assert!(PixelBuffer::new(10, 0).is_err());
    }

    #[test]
    fn new_rejects_overflow() {
        assert!(PixelBuffer::new(usize::MAX, 2).is_err());
    }

    #[test]
    fn from_data_checks_length() {
        let err = PixelBuffer::from_data(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            PickerError::DimensionMismatch {
                expected: 16,
                got: 15
            }
        ));
    }

    #[test]
    fn set_and_get_pixel() {
        let mut buf = PixelBuffer::new(4, 4).unwrap();
        let c = Rgba::new(10, 20, 30, 255);
        buf.set_pixel(2, 3, c);
        assert_eq!(buf.pixel(2, 3), Some(c));
        assert_eq!(&buf.data()[(3 * 4 + 2) * 4..(3 * 4 + 2) * 4 + 4], &[10, 20, 30, 255]);
    }

    #[test]
    fn out_of_bounds_access_is_ignored() {
        let mut buf = PixelBuffer::new(2, 2).unwrap();
        buf.set_pixel(2, 0, Rgba::WHITE);
        buf.set_pixel(0, 2, Rgba::WHITE);
        assert!(buf.data().iter().all(|&b| b == 0));
        assert_eq!(buf.pixel(5, 5), None);
    }

    #[test]
    fn row_returns_one_stride() {
        let mut buf = PixelBuffer::new(3, 2).unwrap();
        buf.set_pixel(1, 1, Rgba::WHITE);
        assert_eq!(buf.row(1).len(), 12);
        assert_eq!(&buf.row(1)[4..8], &[255, 255, 255, 255]);
        assert!(buf.row(0).iter().all(|&b| b == 0));
    }

    #[test]
    fn rows_mut_yields_height_rows() {
        let mut buf = PixelBuffer::new(5, 7).unwrap();
        assert_eq!(buf.rows_mut().count(), 7);
    }

    #[test]
    fn opaque_rounds_channels() {
        let c = Rgba::opaque(Srgb {
            r: 1.0,
            g: 0.5,
            b: 0.0,
        });
        // 0.5 * 255 = 127.5 rounds away from zero.
        assert_eq!(c, Rgba::new(255, 128, 0, 255));
    }

    #[test]
    fn unallocatable_size_is_an_error() {
        // 2^52 bytes fits in usize but not in any address space.
        let err = PixelBuffer::new(1 << 40, 1 << 10).unwrap_err();
        assert!(matches!(err, PickerError::InvalidDimensions { .. }));
    }
}
