#![deny(unsafe_code)]
//! Rendering for the OKLCh picker.
//!
//! [`plane`] and [`hue`] turn a picker state into fresh RGBA buffers,
//! [`marker`] draws the selection overlay onto a [`DrawingContext`],
//! [`compose`] joins the two surfaces into one image, and
//! [`snapshot`] (feature `png`, on by default) writes buffers to disk.
//!
//! [`DrawingContext`]: oklch_picker_core::DrawingContext

pub mod compose;
pub mod hue;
pub mod marker;
pub mod plane;

#[cfg(feature = "png")]
pub mod snapshot;

pub use compose::compose_side_by_side;
pub use hue::render_hue_strip;
pub use marker::{draw_hue_marker, draw_plane_marker, MarkerStyle};
pub use plane::render_plane;
