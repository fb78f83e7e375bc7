//! Coordinate mapping between picker surfaces and OKLCh.
//!
//! The plane maps horizontal position to chroma (`0..CHROMA_MAX`) and
//! vertical position to lightness (top = 1, bottom = 0). The hue strip maps
//! vertical position to hue (`0..360`). Positions are [`NormalizedPoint`]s,
//! fractions of the surface size, so nothing here knows about pixels.

use serde::{Deserialize, Serialize};

use crate::color::{oklch_to_srgb, oklch_to_srgb_unclamped, OkLch, Srgb};

/// Chroma at the right edge of the plane.
pub const CHROMA_MAX: f64 = 0.4;

/// Lightness used for every hue strip sample.
pub const HUE_SAMPLE_LIGHTNESS: f64 = 0.8;

/// Chroma used for every hue strip sample. Low enough that `L = 0.8` stays
/// in sRGB for all hues.
pub const HUE_SAMPLE_CHROMA: f64 = 0.09;

/// A position inside a surface as fractions of its width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Normalizes a pixel offset by the surface size.
    pub fn from_pixels(x: f64, y: f64, width: usize, height: usize) -> Self {
        Self {
            x: x / width as f64,
            y: y / height as f64,
        }
    }
}

/// The two coordinates the plane controls.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChromaLightness {
    pub c: f64,
    pub l: f64,
}

impl ChromaLightness {
    /// Combines with a hue into a full color.
    pub fn with_hue(self, h: f64) -> OkLch {
        OkLch {
            l: self.l,
            c: self.c,
            h,
        }
    }
}

impl From<OkLch> for ChromaLightness {
    fn from(color: OkLch) -> Self {
        Self {
            c: color.c,
            l: color.l,
        }
    }
}

pub fn pixel_to_cl(p: NormalizedPoint) -> ChromaLightness {
    ChromaLightness {
        c: p.x * CHROMA_MAX,
        l: 1.0 - p.y,
    }
}

/// Inverse of [`pixel_to_cl`]. Does not clamp: colors outside the plane map
/// to points outside `[0, 1]`.
pub fn cl_to_pixel(cl: ChromaLightness) -> NormalizedPoint {
    NormalizedPoint {
        x: cl.c / CHROMA_MAX,
        y: 1.0 - cl.l,
    }
}

/// True iff every channel lies in `[0, 1]`, bounds included. NaN fails.
pub fn in_gamut(rgb: Srgb) -> bool {
    let inside = |v: f64| (0.0..=1.0).contains(&v);
    inside(rgb.r) && inside(rgb.g) && inside(rgb.b)
}

/// Converts to sRGB, or `None` when the color is outside the sRGB gamut.
///
/// `None` means "no color at this location"; callers leave pixels blank or
/// ignore the input rather than treating it as a failure.
pub fn to_rgb(color: OkLch) -> Option<Srgb> {
    let rgb = oklch_to_srgb_unclamped(color);
    in_gamut(rgb).then_some(rgb)
}

/// The representative color for one row of the hue strip.
pub fn hue_sample_color(h: f64) -> Srgb {
    oklch_to_srgb(OkLch {
        l: HUE_SAMPLE_LIGHTNESS,
        c: HUE_SAMPLE_CHROMA,
        h,
    })
}

/// Hue for a vertical fraction of the hue strip.
pub fn fraction_to_hue(y: f64) -> f64 {
    y * 360.0
}

/// Vertical fraction of the hue strip for a hue. Inverse of [`fraction_to_hue`].
pub fn hue_to_fraction(h: f64) -> f64 {
    h / 360.0
}

/// Wraps a hue into `[0, 360)`.
pub fn normalize_hue(h: f64) -> f64 {
    let wrapped = h.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}
