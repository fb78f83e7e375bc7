//! Color types and the OKLCh → sRGB conversion the picker is built on.
//!
//! The picker treats this module as its conversion collaborator: it converts
//! cylindrical OKLCh coordinates to RGB and reports the raw channel values,
//! including values outside `[0, 1]`. Deciding whether such a result is
//! displayable is the job of [`crate::math::to_rgb`], not of this module.
//!
//! Everything is `f64`. Conversions are free functions, as in OKLab's
//! reference formulation.

use crate::error::PickerError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// sRGB color. Channels are nominally in `[0, 1]` but unclamped results from
/// [`oklch_to_srgb_unclamped`] may fall outside that range.
///
/// Serializes as a hex string `"#rrggbb"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Linear-light RGB (sRGB primaries, no transfer curve).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// OKLab perceptual color space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OkLab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

/// OKLCh, the cylindrical form of OKLab. `h` is in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OkLch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl OkLch {
    pub const fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }
}

impl Srgb {
    /// Parses `"#rrggbb"` or `"rrggbb"`, case insensitive.
    pub fn from_hex(hex: &str) -> Result<Srgb, PickerError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(PickerError::InvalidColor(format!(
                "expected 6 hex digits, got {hex:?}"
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .map(|v| f64::from(v) / 255.0)
                .map_err(|e| PickerError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        Ok(Srgb {
            r: channel(0..2, "red")?,
            g: channel(2..4, "green")?,
            b: channel(4..6, "blue")?,
        })
    }

    /// Formats as `"#rrggbb"`, clamping and rounding each channel to 8 bits.
    pub fn to_hex(self) -> String {
        let [r, g, b] = [self.r, self.g, self.b].map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8);
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl Serialize for Srgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Srgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Srgb::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

fn srgb_component_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

// Sign-preserving below the linear toe, so negative (out-of-gamut) channels
// stay negative after encoding.
fn linear_component_to_srgb(c: f64) -> f64 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

pub fn srgb_to_linear(c: Srgb) -> LinearRgb {
    LinearRgb {
        r: srgb_component_to_linear(c.r),
        g: srgb_component_to_linear(c.g),
        b: srgb_component_to_linear(c.b),
    }
}

pub fn linear_to_srgb(c: LinearRgb) -> Srgb {
    Srgb {
        r: linear_component_to_srgb(c.r),
        g: linear_component_to_srgb(c.g),
        b: linear_component_to_srgb(c.b),
    }
}

/// Linear RGB to OKLab via the LMS cone response matrices.
pub fn linear_to_oklab(c: LinearRgb) -> OkLab {
    let l_ = 0.4122214708 * c.r + 0.5363325363 * c.g + 0.0514459929 * c.b;
    let m_ = 0.2119034982 * c.r + 0.6806995451 * c.g + 0.1073969566 * c.b;
    let s_ = 0.0883024619 * c.r + 0.2817188376 * c.g + 0.6299787005 * c.b;

    let (l_c, m_c, s_c) = (l_.cbrt(), m_.cbrt(), s_.cbrt());

    OkLab {
        l: 0.2104542553 * l_c + 0.7936177850 * m_c - 0.0040720468 * s_c,
        a: 1.9779984951 * l_c - 2.4285922050 * m_c + 0.4505937099 * s_c,
        b: 0.0259040371 * l_c + 0.7827717662 * m_c - 0.8086757660 * s_c,
    }
}

/// OKLab to linear RGB. The result is not clamped.
pub fn oklab_to_linear(c: OkLab) -> LinearRgb {
    let l_ = c.l + 0.3963377774 * c.a + 0.2158037573 * c.b;
    let m_ = c.l - 0.1055613458 * c.a - 0.0638541728 * c.b;
    let s_ = c.l - 0.0894841775 * c.a - 1.2914855480 * c.b;

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    LinearRgb {
        r: 4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s,
        g: -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s,
        b: -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s,
    }
}

/// OKLab to OKLCh. Chroma below 1e-10 reports hue 0 instead of `atan2(0, 0)`.
pub fn oklab_to_oklch(c: OkLab) -> OkLch {
    let chroma = c.a.hypot(c.b);
    let h = if chroma < 1e-10 {
        0.0
    } else {
        c.b.atan2(c.a).to_degrees().rem_euclid(360.0)
    };
    OkLch {
        l: c.l,
        c: chroma,
        h,
    }
}

pub fn oklch_to_oklab(c: OkLch) -> OkLab {
    let (sin, cos) = c.h.to_radians().sin_cos();
    OkLab {
        l: c.l,
        a: c.c * cos,
        b: c.c * sin,
    }
}

pub fn srgb_to_oklch(c: Srgb) -> OkLch {
    oklab_to_oklch(linear_to_oklab(srgb_to_linear(c)))
}

/// OKLCh to sRGB without any clamping.
///
/// Channels outside `[0, 1]` mean the color is not displayable in sRGB.
/// Non-finite input propagates as NaN channels.
pub fn oklch_to_srgb_unclamped(c: OkLch) -> Srgb {
    linear_to_srgb(oklab_to_linear(oklch_to_oklab(c)))
}

/// OKLCh to sRGB with every channel clamped to `[0, 1]`.
pub fn oklch_to_srgb(c: OkLch) -> Srgb {
    let srgb = oklch_to_srgb_unclamped(c);
    Srgb {
        r: srgb.r.clamp(0.0, 1.0),
        g: srgb.g.clamp(0.0, 1.0),
        b: srgb.b.clamp(0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-6;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn white_has_unit_lightness_and_no_chroma() {
        let lch = srgb_to_oklch(Srgb {
            r: 1.0,
            g: 1.0,
            b: 1.0,
        });
        assert!(approx_eq(lch.l, 1.0), "L: {}", lch.l);
        assert!(lch.c < 1e-6, "C: {}", lch.c);
    }

    #[test]
    fn black_converts_to_zero_channels() {
        let rgb = oklch_to_srgb_unclamped(OkLch::new(0.0, 0.0, 0.0));
        assert!(approx_eq(rgb.r, 0.0));
        assert!(approx_eq(rgb.g, 0.0));
        assert!(approx_eq(rgb.b, 0.0));
    }

    #[test]
    fn pure_red_has_hue_near_29_degrees() {
        let lch = srgb_to_oklch(Srgb {
            r: 1.0,
            g: 0.0,
            b: 0.0,
        });
        assert!((lch.h - 29.2).abs() < 1.0, "hue: {}", lch.h);
    }

    #[test]
    fn unclamped_conversion_reports_out_of_range_channels() {
        let rgb = oklch_to_srgb_unclamped(OkLch::new(0.9, 0.4, 300.0));
        let outside = [rgb.r, rgb.g, rgb.b]
            .iter()
            .any(|&v| !(0.0..=1.0).contains(&v));
        assert!(outside, "expected a channel outside [0, 1], got {rgb:?}");
    }

    #[test]
    fn unclamped_conversion_keeps_negative_channels_negative() {
        // Teal at mid lightness pushes red below zero.
        let rgb = oklch_to_srgb_unclamped(OkLch::new(0.5, 0.1, 180.0));
        assert!(rgb.r < 0.0, "r: {}", rgb.r);
    }

    #[test]
    fn clamped_conversion_stays_in_range() {
        let rgb = oklch_to_srgb(OkLch::new(0.9, 0.4, 300.0));
        for v in [rgb.r, rgb.g, rgb.b] {
            assert!((0.0..=1.0).contains(&v), "channel out of range: {v}");
        }
    }

    #[test]
    fn achromatic_hue_is_zero_not_nan() {
        let lch = oklab_to_oklch(OkLab {
            l: 0.5,
            a: 0.0,
            b: 0.0,
        });
        assert_eq!(lch.h, 0.0);
    }

    #[test]
    fn hex_parses_with_and_without_hash() {
        let a = Srgb::from_hex("#804020").unwrap();
        let b = Srgb::from_hex("804020").unwrap();
        assert_eq!(a, b);
        assert!(approx_eq(a.r, 128.0 / 255.0));
    }

    #[test]
    fn hex_rejects_bad_input() {
        assert!(Srgb::from_hex("#gggggg").is_err());
        assert!(Srgb::from_hex("#fff").is_err());
        assert!(Srgb::from_hex("").is_err());
        assert!(Srgb::from_hex("#ff00ff00").is_err());
        assert!(Srgb::from_hex("ééé").is_err());
    }

    #[test]
    fn to_hex_clamps_out_of_range() {
        let color = Srgb {
            r: 1.5,
            g: -0.1,
            b: 0.5,
        };
        assert_eq!(color.to_hex(), "#ff0080");
    }

    #[test]
    fn srgb_serializes_as_hex_string() {
        let red = Srgb {
            r: 1.0,
            g: 0.0,
            b: 0.0,
        };
        assert_eq!(serde_json::to_string(&red).unwrap(), "\"#ff0000\"");
        let back: Srgb = serde_json::from_str("\"#ff0000\"").unwrap();
        assert_eq!(back, red);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn srgb_survives_oklch_round_trip(
                r in 0.0_f64..=1.0,
                g in 0.0_f64..=1.0,
                b in 0.0_f64..=1.0,
            ) {
                let original = Srgb { r, g, b };
                let back = oklch_to_srgb_unclamped(srgb_to_oklch(original));
                prop_assert!((back.r - r).abs() < 1e-5, "r: {} vs {}", back.r, r);
                prop_assert!((back.g - g).abs() < 1e-5, "g: {} vs {}", back.g, g);
                prop_assert!((back.b - b).abs() < 1e-5, "b: {} vs {}", back.b, b);
            }

            #[test]
            fn hue_is_in_degree_range(
                l in 0.0_f64..=1.0,
                a in -0.4_f64..=0.4,
                b in -0.4_f64..=0.4,
            ) {
                let lch = oklab_to_oklch(OkLab { l, a, b });
                prop_assert!(lch.h >= 0.0 && lch.h < 360.0, "hue {}", lch.h);
            }
        }
    }
}
