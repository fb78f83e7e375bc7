//! Selection overlay: a ring on the plane and a band on the hue strip.
//!
//! Markers are stroked on top of whatever the context already holds and
//! never clear it, so they must be drawn after the rendered buffers have been
//! put onto the surfaces.

use oklch_picker_core::buffer::Rgba;
use oklch_picker_core::color::OkLch;
use oklch_picker_core::math::{cl_to_pixel, hue_to_fraction, ChromaLightness};
use oklch_picker_core::surface::{DrawingContext, Stroke};

/// Geometry and colors of the selection markers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    /// Ring radius in pixels.
    pub ring_radius: f64,
    /// Subtracted from both ring center coordinates.
    pub ring_offset: f64,
    /// Ring color when the selected lightness is above one half.
    pub ring_high_lightness: Rgba,
    /// Ring color otherwise.
    pub ring_low_lightness: Rgba,
    pub band_height: f64,
    pub band_color: Rgba,
    pub line_width: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            ring_radius: 4.0,
            ring_offset: 2.0,
            ring_high_lightness: Rgba::WHITE,
            ring_low_lightness: Rgba::BLACK,
            band_height: 4.0,
            band_color: Rgba::BLACK,
            line_width: 1.0,
        }
    }
}

impl MarkerStyle {
    /// Ring stroke color for a selected lightness.
    pub fn ring_color(&self, l: f64) -> Rgba {
        if l > 0.5 {
            self.ring_high_lightness
        } else {
            self.ring_low_lightness
        }
    }

    /// Pixel center of the ring on a `plane_width × height` plane.
    pub fn ring_center(&self, color: OkLch, plane_width: usize, height: usize) -> (f64, f64) {
        let p = cl_to_pixel(ChromaLightness::from(color));
        (
            p.x * plane_width as f64 - self.ring_offset,
            p.y * height as f64 - self.ring_offset,
        )
    }

    /// Top edge of the band on a strip `height` pixels tall.
    pub fn band_top(&self, hue: f64, height: usize) -> f64 {
        hue_to_fraction(hue) * height as f64 - self.band_height / 2.0
    }
}

/// Strokes the selection ring for `color` onto the plane context.
pub fn draw_plane_marker<C: DrawingContext + ?Sized>(
    ctx: &mut C,
    color: OkLch,
    plane_width: usize,
    height: usize,
    style: &MarkerStyle,
) {
    let (cx, cy) = style.ring_center(color, plane_width, height);
    ctx.stroke_circle(
        cx,
        cy,
        style.ring_radius,
        Stroke::new(style.ring_color(color.l), style.line_width),
    );
}

/// Strokes the hue band for `hue` across the full strip width.
pub fn draw_hue_marker<C: DrawingContext + ?Sized>(
    ctx: &mut C,
    hue: f64,
    hue_width: usize,
    height: usize,
    style: &MarkerStyle,
) {
    ctx.stroke_rect(
        0.0,
        style.band_top(hue, height),
        hue_width as f64,
        style.band_height,
        Stroke::new(style.band_color, style.line_width),
    );
}
