#![deny(unsafe_code)]
//! Core types for the OKLCh picker.
//!
//! Provides the OKLCh ↔ sRGB conversion (`color`), the coordinate mapping
//! between picker surfaces and color (`math`), RGBA pixel buffers
//! (`buffer`), the raster surface abstraction with an in-memory `Canvas`
//! (`surface`), the widget `Layout`, and the string `Attributes` through
//! which hosts configure a picker.

pub mod attributes;
pub mod buffer;
pub mod color;
pub mod error;
pub mod layout;
pub mod math;
pub mod surface;

pub use attributes::{AttributeDelta, AttributeName, Attributes};
pub use buffer::{PixelBuffer, Rgba};
pub use color::{LinearRgb, OkLab, OkLch, Srgb};
pub use error::PickerError;
pub use layout::Layout;
pub use math::{ChromaLightness, NormalizedPoint};
pub use surface::{Canvas, DrawingContext, RasterSurface, Stroke};
