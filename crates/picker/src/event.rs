//! Inputs and outputs of the picker controller.

use serde::{Deserialize, Serialize};

/// Who is writing an attribute.
///
/// `External` writes come from the host and make the picker re-read its
/// attributes and re-render. `Internal` writes are the picker publishing its
/// own state and must not loop back into that path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    External,
    Internal,
}

/// The "color changed" notification. Always carries the full triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorChange {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

/// Which surface a pointer event landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerTarget {
    Plane,
    Hue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
}

/// Button mask value for "only the primary button is held".
pub const PRIMARY_BUTTON: u16 = 1;

/// A pointer event in surface-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f64,
    pub y: f64,
    /// Bit mask of held buttons, as in DOM `MouseEvent.buttons`.
    pub buttons: u16,
}

impl PointerEvent {
    pub fn down(x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Down,
            x,
            y,
            buttons: PRIMARY_BUTTON,
        }
    }

    pub fn moved(x: f64, y: f64, buttons: u16) -> Self {
        Self {
            kind: PointerKind::Move,
            x,
            y,
            buttons,
        }
    }

    /// Presses always pick; moves only pick while dragging with the primary
    /// button alone.
    pub fn picks(&self) -> bool {
        match self.kind {
            PointerKind::Down => true,
            PointerKind::Move => self.buttons == PRIMARY_BUTTON,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn down_always_picks() {
        let mut e = PointerEvent::down(1.0, 2.0);
        assert!(e.picks());
        e.buttons = 0;
        assert!(e.picks());
    }

    #[test]
    fn move_picks_only_with_primary_alone() {
        assert!(PointerEvent::moved(0.0, 0.0, 1).picks());
        assert!(!PointerEvent::moved(0.0, 0.0, 0).picks());
        assert!(!PointerEvent::moved(0.0, 0.0, 2).picks());
        assert!(!PointerEvent::moved(0.0, 0.0, 3).picks());
    }

    #[test]
    fn color_change_serializes_all_three_fields() {
        let json = serde_json::to_value(ColorChange {
            l: 0.5,
            c: 0.2,
            h: 10.0,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"l": 0.5, "c": 0.2, "h": 10.0}));
    }
}
