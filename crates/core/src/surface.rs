//! Raster surfaces and their 2D drawing contexts.
//!
//! The picker draws onto two surfaces through [`RasterSurface`] and
//! [`DrawingContext`]. A host backs them with whatever its platform offers; a
//! browser canvas, a window texture. [`Canvas`] is the in-memory backend
//! used by the CLI and the tests.
//!
//! Coordinates are in pixels with the origin at the top-left corner. Pixel
//! `(x, y)` covers `[x, x + 1) × [y, y + 1)` and is sampled at its center.
//! Strokes are aliased: a pixel is painted when its center lies within half
//! the line width of the outline.

use tracing::debug;

use crate::buffer::{PixelBuffer, Rgba};
use crate::error::PickerError;

/// Color and line width for outlines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f64,
}

impl Stroke {
    pub const fn new(color: Rgba, width: f64) -> Self {
        Self { color, width }
    }
}

/// The drawing operations the picker needs from a surface.
pub trait DrawingContext {
    /// Resets a rectangular region to transparent black.
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Replaces the pixels under `image`, anchored at the top-left corner.
    /// Parts of `image` beyond the surface are dropped.
    fn put_image_data(&mut self, image: &PixelBuffer);

    /// Outlines a circle.
    fn stroke_circle(&mut self, cx: f64, cy: f64, radius: f64, stroke: Stroke);

    /// Fills a circle.
    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba);

    /// Outlines a rectangle whose edges run along `x`, `x + width`, `y` and `y + height`.
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, stroke: Stroke);

    /// Fills a rectangle.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba);
}

/// A sized raster target that may or may not be able to provide a context.
pub trait RasterSurface {
    type Context: DrawingContext;

    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// Sets the pixel size. Like resizing an HTML canvas, this discards the
    /// current contents.
    fn resize(&mut self, width: usize, height: usize) -> Result<(), PickerError>;

    /// The 2D drawing context, or `None` when the surface cannot draw.
    fn context(&mut self) -> Option<&mut Self::Context>;
}

/// In-memory surface backed by a [`PixelBuffer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    buffer: PixelBuffer,
}

impl Canvas {
    /// Creates a transparent canvas.
    ///
    /// Returns `PickerError::InvalidDimensions` if either side is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, PickerError> {
        Ok(Self {
            buffer: PixelBuffer::new(width, height)?,
        })
    }

    /// Current contents.
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Paints every pixel in the bounding box whose center satisfies `hit`.
    fn paint_where(
        &mut self,
        (x0, y0, x1, y1): (f64, f64, f64, f64),
        color: Rgba,
        hit: impl Fn(f64, f64) -> bool,
    ) {
        let (cols, rows) = (self.buffer.width(), self.buffer.height());
        let Some((xs, xe)) = pixel_span(x0, x1, cols) else {
            return;
        };
        let Some((ys, ye)) = pixel_span(y0, y1, rows) else {
            return;
        };
        for py in ys..ye {
            let v = py as f64 + 0.5;
            for px in xs..xe {
                if hit(px as f64 + 0.5, v) {
                    self.buffer.set_pixel(px, py, color);
                }
            }
        }
    }
}

/// Pixel index range whose centers may fall in `[lo, hi]`, clipped to `0..len`.
fn pixel_span(lo: f64, hi: f64, len: usize) -> Option<(usize, usize)> {
    if !(lo.is_finite() && hi.is_finite()) || hi < 0.0 || lo > len as f64 {
        return None;
    }
    let start = (lo - 0.5).floor().max(0.0) as usize;
    let end = ((hi + 0.5).ceil().max(0.0) as usize).min(len);
    (start < end).then_some((start, end))
}

/// Distance from `(u, v)` to the boundary of an axis-aligned rectangle.
fn distance_to_rect_edge(u: f64, v: f64, x: f64, y: f64, w: f64, h: f64) -> f64 {
    let (left, right) = (x.min(x + w), x.max(x + w));
    let (top, bottom) = (y.min(y + h), y.max(y + h));
    let dx = (left - u).max(u - right);
    let dy = (top - v).max(v - bottom);
    if dx <= 0.0 && dy <= 0.0 {
        // Inside: nearest edge.
        (-dx).min(-dy)
    } else {
        dx.max(0.0).hypot(dy.max(0.0))
    }
}

impl DrawingContext for Canvas {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let (left, right) = (x.min(x + width), x.max(x + width));
        let (top, bottom) = (y.min(y + height), y.max(y + height));
        self.paint_where((left, top, right, bottom), Rgba::TRANSPARENT, |u, v| {
            u >= left && u < right && v >= top && v < bottom
        });
    }

    fn put_image_data(&mut self, image: &PixelBuffer) {
        let cols = image.width().min(self.buffer.width());
        let rows = image.height().min(self.buffer.height());
        let stride = self.buffer.width() * crate::buffer::CHANNELS;
        let span = cols * crate::buffer::CHANNELS;
        let dst = self.buffer.data_mut();
        for y in 0..rows {
            dst[y * stride..y * stride + span].copy_from_slice(&image.row(y)[..span]);
        }
    }

    fn stroke_circle(&mut self, cx: f64, cy: f64, radius: f64, stroke: Stroke) {
        let half = stroke.width / 2.0;
        let reach = radius.abs() + half;
        self.paint_where(
            (cx - reach, cy - reach, cx + reach, cy + reach),
            stroke.color,
            |u, v| ((u - cx).hypot(v - cy) - radius.abs()).abs() <= half,
        );
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba) {
        let r = radius.abs();
        self.paint_where((cx - r, cy - r, cx + r, cy + r), color, |u, v| {
            (u - cx).hypot(v - cy) <= r
        });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64, stroke: Stroke) {
        let half = stroke.width / 2.0;
        let (left, right) = (x.min(x + width), x.max(x + width));
        let (top, bottom) = (y.min(y + height), y.max(y + height));
        self.paint_where(
            (left - half, top - half, right + half, bottom + half),
            stroke.color,
            |u, v| distance_to_rect_edge(u, v, x, y, width, height) <= half,
        );
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba) {
        let (left, right) = (x.min(x + width), x.max(x + width));
        let (top, bottom) = (y.min(y + height), y.max(y + height));
        self.paint_where((left, top, right, bottom), color, |u, v| {
            u >= left && u < right && v >= top && v < bottom
        });
    }
}

impl RasterSurface for Canvas {
    type Context = Canvas;

    fn width(&self) -> usize {
        self.buffer.width()
    }

    fn height(&self) -> usize {
        self.buffer.height()
    }

    fn resize(&mut self, width: usize, height: usize) -> Result<(), PickerError> {
        debug!(width, height, "resizing canvas");
        self.buffer = PixelBuffer::new(width, height)?;
        Ok(())
    }

    fn context(&mut self) -> Option<&mut Canvas> {
        Some(self)
    }
}
