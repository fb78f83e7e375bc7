//! The picker state machine.
//!
//! A [`PickerController`] starts `Uninitialized`, becomes `Attached` once it
//! is given its two surfaces, and then loops on three kinds of input:
//!
//! - external attribute changes, which re-read layout and color and re-render;
//! - pointer input on the plane, which picks chroma and lightness unless the
//!   result would fall outside sRGB, in which case the input is dropped;
//! - pointer input on the hue strip, which always picks a hue.
//!
//! Accepted picks publish the new values to the attributes as
//! [`Source::Internal`] writes, notify listeners, and re-render.

use std::fmt;
use std::mem;

use oklch_picker_core::attributes::{AttributeDelta, AttributeName, Attributes};
use oklch_picker_core::color::OkLch;
use oklch_picker_core::error::PickerError;
use oklch_picker_core::layout::Layout;
use oklch_picker_core::math::{
    fraction_to_hue, normalize_hue, pixel_to_cl, to_rgb, NormalizedPoint,
};
use oklch_picker_core::surface::{DrawingContext, RasterSurface};
use oklch_picker_render::{
    draw_hue_marker, draw_plane_marker, render_hue_strip, render_plane, MarkerStyle,
};
use tracing::{debug, trace, warn};

use crate::event::{ColorChange, PointerEvent, PointerTarget, Source};

/// The color and layout the picker currently shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickerState {
    pub color: OkLch,
    pub layout: Layout,
}

impl Default for PickerState {
    fn default() -> Self {
        Self {
            color: OkLch::default(),
            layout: Layout::default(),
        }
    }
}

enum Phase<S> {
    Uninitialized,
    Attached { plane: S, hue: S },
}

type Listener = Box<dyn FnMut(&ColorChange)>;

/// Owns the picker state and its two surfaces.
pub struct PickerController<S: RasterSurface> {
    attributes: Attributes,
    state: PickerState,
    style: MarkerStyle,
    phase: Phase<S>,
    listeners: Vec<Listener>,
    frames: u64,
}

impl<S: RasterSurface> Default for PickerController<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: RasterSurface> fmt::Debug for PickerController<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickerController")
            .field("attributes", &self.attributes)
            .field("state", &self.state)
            .field("attached", &self.is_attached())
            .field("listeners", &self.listeners.len())
            .field("frames", &self.frames)
            .finish()
    }
}

impl<S: RasterSurface> PickerController<S> {
    /// An unattached picker with no attributes set.
    pub fn new() -> Self {
        Self::with_attributes(Attributes::new())
    }

    /// An unattached picker whose attributes were set before attachment,
    /// the way markup sets them before an element connects.
    pub fn with_attributes(attributes: Attributes) -> Self {
        Self {
            attributes,
            state: PickerState::default(),
            style: MarkerStyle::default(),
            phase: Phase::Uninitialized,
            listeners: Vec::new(),
            frames: 0,
        }
    }

    /// Replaces the marker style and redraws.
    pub fn set_style(&mut self, style: MarkerStyle) {
        self.style = style;
        self.render();
    }

    /// Creates a picker for `layout` showing `color` and attaches it.
    pub fn initialize(
        layout: Layout,
        color: OkLch,
        plane: S,
        hue: S,
    ) -> Result<Self, PickerError> {
        layout.validate()?;
        let mut picker = Self::new();
        picker.write_internal(
            &AttributeDelta::new()
                .set(AttributeName::Width, layout.width.to_string())
                .set(AttributeName::Height, layout.height.to_string())
                .set(AttributeName::HueWidth, layout.hue_width.to_string())
                .set(AttributeName::L, color.l.to_string())
                .set(AttributeName::C, color.c.to_string())
                .set(AttributeName::H, color.h.to_string()),
        );
        picker.attach(plane, hue)?;
        Ok(picker)
    }

    /// Takes ownership of the surfaces, reads layout and color from the
    /// attributes, sizes the surfaces and renders.
    ///
    /// Attaching an already attached picker does nothing and drops the
    /// surfaces passed in.
    pub fn attach(&mut self, mut plane: S, mut hue: S) -> Result<(), PickerError> {
        if self.is_attached() {
            debug!("picker already attached; ignoring");
            return Ok(());
        }
        let layout = self.attributes.layout()?;
        let color = self.attributes.color(self.state.color)?;
        resize(&mut plane, &mut hue, &layout)?;
        self.state = PickerState { color, layout };
        self.phase = Phase::Attached { plane, hue };
        debug!(
            width = layout.width,
            height = layout.height,
            hue_width = layout.hue_width,
            l = color.l,
            c = color.c,
            h = color.h,
            "picker attached"
        );
        self.render();
        Ok(())
    }

    /// Releases the surfaces and returns to the unattached state. State and
    /// attributes are kept.
    pub fn detach(&mut self) -> Option<(S, S)> {
        match mem::replace(&mut self.phase, Phase::Uninitialized) {
            Phase::Attached { plane, hue } => {
                debug!("picker detached");
                Some((plane, hue))
            }
            Phase::Uninitialized => None,
        }
    }

    pub fn is_attached(&self) -> bool {
        matches!(self.phase, Phase::Attached { .. })
    }

    pub fn state(&self) -> PickerState {
        self.state
    }

    pub fn color(&self) -> OkLch {
        self.state.color
    }

    pub fn layout(&self) -> Layout {
        self.state.layout
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// `(plane, hue)` surfaces while attached.
    pub fn surfaces(&self) -> Option<(&S, &S)> {
        match &self.phase {
            Phase::Attached { plane, hue } => Some((plane, hue)),
            Phase::Uninitialized => None,
        }
    }

    /// Number of frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Registers a listener for "color changed" notifications.
    pub fn on_color_change(&mut self, listener: impl FnMut(&ColorChange) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Writes attributes on behalf of `source`.
    ///
    /// `Internal` writes only store the strings. `External` writes are
    /// validated as a whole, then layout and color are re-derived and the
    /// picker re-renders. A rejected external write leaves attributes and
    /// state untouched.
    pub fn apply_change(
        &mut self,
        delta: &AttributeDelta,
        source: Source,
    ) -> Result<(), PickerError> {
        if source == Source::Internal {
            self.write_internal(delta);
            return Ok(());
        }

        let mut next = self.attributes.clone();
        next.apply(delta);
        let derived = next
            .layout()
            .and_then(|layout| Ok((layout, next.color(self.state.color)?)));
        let (layout, color) =
            derived.inspect_err(|e| warn!(error = %e, "rejected attribute change"))?;

        if let Phase::Attached { plane, hue } = &mut self.phase {
            if layout != self.state.layout {
                resize(plane, hue, &layout)?;
            }
        }
        self.attributes = next;
        self.state = PickerState { color, layout };
        trace!(l = color.l, c = color.c, h = color.h, "applied external attribute change");
        self.render();
        Ok(())
    }

    /// Host-side attribute changes.
    pub fn apply_external_change(&mut self, delta: &AttributeDelta) -> Result<(), PickerError> {
        self.apply_change(delta, Source::External)
    }

    /// Single-attribute form of [`apply_change`](Self::apply_change).
    pub fn set_attribute(
        &mut self,
        name: AttributeName,
        value: impl Into<String>,
        source: Source,
    ) -> Result<(), PickerError> {
        self.apply_change(&AttributeDelta::new().set(name, value), source)
    }

    /// Handles a pointer event on one of the surfaces.
    ///
    /// Returns the notification that was sent, or `None` when the event was
    /// ignored: before attachment, a move without the primary button, or a
    /// plane position whose color is outside sRGB at the current hue.
    pub fn pointer(&mut self, target: PointerTarget, event: PointerEvent) -> Option<ColorChange> {
        if !self.is_attached() || !event.picks() {
            return None;
        }
        match target {
            PointerTarget::Plane => self.pick_plane(event.x, event.y),
            PointerTarget::Hue => self.pick_hue(event.y),
        }
    }

    pub fn pointer_down_plane(&mut self, x: f64, y: f64) -> Option<ColorChange> {
        self.pointer(PointerTarget::Plane, PointerEvent::down(x, y))
    }

    pub fn pointer_move_plane(&mut self, x: f64, y: f64, buttons: u16) -> Option<ColorChange> {
        self.pointer(PointerTarget::Plane, PointerEvent::moved(x, y, buttons))
    }

    pub fn pointer_down_hue(&mut self, x: f64, y: f64) -> Option<ColorChange> {
        self.pointer(PointerTarget::Hue, PointerEvent::down(x, y))
    }

    pub fn pointer_move_hue(&mut self, x: f64, y: f64, buttons: u16) -> Option<ColorChange> {
        self.pointer(PointerTarget::Hue, PointerEvent::moved(x, y, buttons))
    }

    fn pick_plane(&mut self, x: f64, y: f64) -> Option<ColorChange> {
        let (width, height) = self.state.layout.plane_size();
        let cl = pixel_to_cl(NormalizedPoint::from_pixels(x, y, width, height));
        if to_rgb(cl.with_hue(self.state.color.h)).is_none() {
            trace!(x, y, c = cl.c, l = cl.l, "plane pick outside sRGB; ignored");
            return None;
        }

        self.state.color.c = cl.c;
        self.state.color.l = cl.l;
        self.write_internal(
            &AttributeDelta::new()
                .set(AttributeName::C, cl.c.to_string())
                .set(AttributeName::L, cl.l.to_string()),
        );
        Some(self.notify_and_render())
    }

    fn pick_hue(&mut self, y: f64) -> Option<ColorChange> {
        if !y.is_finite() {
            return None;
        }
        let hue = normalize_hue(fraction_to_hue(y / self.state.layout.height as f64));
        self.state.color.h = hue;
        self.write_internal(&AttributeDelta::new().set(AttributeName::H, hue.to_string()));
        Some(self.notify_and_render())
    }

    fn write_internal(&mut self, delta: &AttributeDelta) {
        self.attributes.apply(delta);
    }

    fn notify_and_render(&mut self) -> ColorChange {
        let OkLch { l, c, h } = self.state.color;
        let change = ColorChange { l, c, h };
        trace!(l, c, h, "color changed");
        for listener in &mut self.listeners {
            listener(&change);
        }
        self.render();
        change
    }

    /// Redraws both surfaces from the current state.
    ///
    /// Does nothing before attachment or when either surface cannot provide
    /// a drawing context.
    pub fn render(&mut self) {
        let Phase::Attached { plane, hue } = &mut self.phase else {
            return;
        };
        let (Some(plane_ctx), Some(hue_ctx)) = (plane.context(), hue.context()) else {
            debug!("surface has no drawing context; skipping render");
            return;
        };

        let PickerState { color, layout } = self.state;
        let (plane_width, height) = layout.plane_size();
        let buffers = render_plane(plane_width, height, color.h)
            .and_then(|p| Ok((p, render_hue_strip(layout.hue_width, height)?)));
        let (plane_buffer, hue_buffer) = match buffers {
            Ok(buffers) => buffers,
            Err(e) => {
                warn!(error = %e, "render failed");
                return;
            }
        };

        plane_ctx.clear_rect(0.0, 0.0, plane_width as f64, height as f64);
        plane_ctx.put_image_data(&plane_buffer);
        hue_ctx.clear_rect(0.0, 0.0, layout.hue_width as f64, height as f64);
        hue_ctx.put_image_data(&hue_buffer);

        draw_plane_marker(plane_ctx, color, plane_width, height, &self.style);
        draw_hue_marker(hue_ctx, color.h, layout.hue_width, height, &self.style);

        self.frames += 1;
        debug!(frame = self.frames, plane_width, height, hue = color.h, "rendered");
    }
}

fn resize<S: RasterSurface>(
    plane: &mut S,
    hue: &mut S,
    layout: &Layout,
) -> Result<(), PickerError> {
    let (pw, ph) = layout.plane_size();
    let (hw, hh) = layout.hue_size();
    plane.resize(pw, ph)?;
    hue.resize(hw, hh)
}
