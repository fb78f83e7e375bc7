#![deny(unsafe_code)]
//! The OKLCh picker widget.
//!
//! [`PickerController`] owns a plane surface and a hue surface, keeps the
//! selected color and layout in sync with the host's string attributes, and
//! turns pointer input into "color changed" notifications.

pub mod controller;
pub mod event;

pub use controller::{PickerController, PickerState};
pub use event::{ColorChange, PointerEvent, PointerKind, PointerTarget, Source, PRIMARY_BUTTON};
