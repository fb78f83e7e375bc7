//! Pixel layout of the picker widget.
//!
//! The widget is `width` pixels wide in total: the lightness/chroma plane on
//! the left and a `hue_width`-pixel hue strip on the right, both `height`
//! pixels tall.

use serde::{Deserialize, Serialize};

use crate::error::PickerError;

pub const DEFAULT_HUE_WIDTH: usize = 20;
pub const DEFAULT_HEIGHT: usize = 200;
pub const DEFAULT_WIDTH: usize = DEFAULT_HEIGHT + DEFAULT_HUE_WIDTH;
/// Largest accepted total width or height, matching common canvas limits.
pub const MAX_DIMENSION: usize = 16_384;

/// Total widget size and the share taken by the hue strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub width: usize,
    pub height: usize,
    pub hue_width: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            hue_width: DEFAULT_HUE_WIDTH,
        }
    }
}

impl Layout {
    /// Creates a validated layout.
    pub fn new(width: usize, height: usize, hue_width: usize) -> Result<Self, PickerError> {
        let layout = Self {
            width,
            height,
            hue_width,
        };
        layout.validate()?;
        Ok(layout)
    }

    /// Checks that both surfaces end up with a non-empty area no larger than
    /// [`MAX_DIMENSION`] on either side.
    pub fn validate(&self) -> Result<(), PickerError> {
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(PickerError::InvalidLayout(format!(
                "{}x{} exceeds the {MAX_DIMENSION} pixel limit",
                self.width, self.height
            )));
        }
        if self.height == 0 {
            return Err(PickerError::InvalidLayout("height must be non-zero".into()));
        }
        if self.hue_width == 0 {
            return Err(PickerError::InvalidLayout(
                "hue strip width must be non-zero".into(),
            ));
        }
        if self.hue_width >= self.width {
            return Err(PickerError::InvalidLayout(format!(
                "hue strip width {} leaves no room in total width {}",
                self.hue_width, self.width
            )));
        }
        Ok(())
    }

    /// Drawable width of the lightness/chroma plane.
    pub fn plane_width(&self) -> usize {
        self.width.saturating_sub(self.hue_width)
    }

    /// `(width, height)` of the plane surface.
    pub fn plane_size(&self) -> (usize, usize) {
        (self.plane_width(), self.height)
    }

    /// `(width, height)` of the hue strip surface.
    pub fn hue_size(&self) -> (usize, usize) {
        (self.hue_width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_plane_is_200_square() {
        let layout = Layout::default();
        assert_eq!(layout.width, 220);
        assert_eq!(layout.plane_size(), (200, 200));
        assert_eq!(layout.hue_size(), (20, 200));
    }

    #[test]
    fn new_accepts_valid_layout() {
        let layout = Layout::new(300, 150, 30).unwrap();
        assert_eq!(layout.plane_width(), 270);
    }

    #[test]
    fn new_rejects_zero_height() {
        assert!(matches!(
            Layout::new(220, 0, 20),
            Err(PickerError::InvalidLayout(_))
        ));
    }

    #[test]
    fn new_rejects_hue_strip_filling_the_widget() {
        assert!(Layout::new(20, 200, 20).is_err());
        assert!(Layout::new(10, 200, 20).is_err());
    }

    #[test]
    fn new_rejects_zero_hue_width() {
        assert!(Layout::new(220, 200, 0).is_err());
    }

    #[test]
    fn new_rejects_oversized_widget() {
        assert!(Layout::new(MAX_DIMENSION, MAX_DIMENSION, 20).is_ok());
        assert!(matches!(
            Layout::new(1_000_000_000_000_000, 200, 20),
            Err(PickerError::InvalidLayout(_))
        ));
        assert!(Layout::new(220, MAX_DIMENSION + 1, 20).is_err());
    }

    #[test]
    fn serializes_hue_width_in_camel_case() {
        let json = serde_json::to_value(Layout::default()).unwrap();
        assert_eq!(json["hueWidth"], 20);
        let back: Layout = serde_json::from_value(json).unwrap();
        assert_eq!(back, Layout::default());
    }
}
