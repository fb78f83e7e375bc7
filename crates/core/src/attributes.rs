//! The picker's observable string attributes and their typed readers.
//!
//! Hosts exchange state with the picker through six string attributes:
//! `l`, `c`, `h`, `width`, `height` and `hueWidth`. Readers return the
//! supplied default when an attribute is absent or empty and reject values
//! that do not parse, so malformed input never reaches the color math as NaN.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::OkLch;
use crate::error::PickerError;
use crate::layout::{Layout, DEFAULT_HEIGHT, DEFAULT_HUE_WIDTH, DEFAULT_WIDTH};
use crate::math::normalize_hue;

/// Names of the observed attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AttributeName {
    #[serde(rename = "l")]
    L,
    #[serde(rename = "c")]
    C,
    #[serde(rename = "h")]
    H,
    #[serde(rename = "width")]
    Width,
    #[serde(rename = "height")]
    Height,
    #[serde(rename = "hueWidth")]
    HueWidth,
}

impl AttributeName {
    pub const ALL: [AttributeName; 6] = [
        AttributeName::L,
        AttributeName::C,
        AttributeName::H,
        AttributeName::Width,
        AttributeName::Height,
        AttributeName::HueWidth,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AttributeName::L => "l",
            AttributeName::C => "c",
            AttributeName::H => "h",
            AttributeName::Width => "width",
            AttributeName::Height => "height",
            AttributeName::HueWidth => "hueWidth",
        }
    }
}

impl fmt::Display for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttributeName {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AttributeName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| PickerError::UnknownAttribute(s.to_string()))
    }
}

/// A batch of attribute writes. `None` removes the attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeDelta {
    changes: Vec<(AttributeName, Option<String>)>,
}

impl AttributeDelta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a write of `value` to `name`.
    pub fn set(mut self, name: AttributeName, value: impl Into<String>) -> Self {
        self.changes.push((name, Some(value.into())));
        self
    }

    /// Adds a removal of `name`.
    pub fn remove(mut self, name: AttributeName) -> Self {
        self.changes.push((name, None));
        self
    }

    /// Parses `name=value` pairs, as given on a command line.
    pub fn parse_pairs<'a>(pairs: impl IntoIterator<Item = &'a str>) -> Result<Self, PickerError> {
        pairs.into_iter().try_fold(Self::new(), |delta, pair| {
            let (name, value) = pair
                .split_once('=')
                .ok_or_else(|| PickerError::UnknownAttribute(pair.to_string()))?;
            Ok(delta.set(name.trim().parse()?, value.trim()))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn changes(&self) -> &[(AttributeName, Option<String>)] {
        &self.changes
    }
}

/// The current attribute values, as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    values: BTreeMap<AttributeName, String>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: AttributeName) -> Option<&str> {
        self.values.get(&name).map(String::as_str)
    }

    pub fn set(&mut self, name: AttributeName, value: impl Into<String>) {
        self.values.insert(name, value.into());
    }

    pub fn remove(&mut self, name: AttributeName) -> Option<String> {
        self.values.remove(&name)
    }

    /// Applies every change in order.
    pub fn apply(&mut self, delta: &AttributeDelta) {
        for (name, value) in delta.changes() {
            match value {
                Some(v) => self.set(*name, v.clone()),
                None => {
                    self.remove(*name);
                }
            }
        }
    }

    /// The raw value, treating an empty string as absent.
    fn present(&self, name: AttributeName) -> Option<&str> {
        self.get(name).map(str::trim).filter(|v| !v.is_empty())
    }

    /// Reads a finite decimal number, falling back to `default` when absent.
    pub fn read_f64(&self, name: AttributeName, default: f64) -> Result<f64, PickerError> {
        let Some(raw) = self.present(name) else {
            return Ok(default);
        };
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| invalid(name, raw))
    }

    /// Reads a non-negative integer, falling back to `default` when absent.
    pub fn read_usize(&self, name: AttributeName, default: usize) -> Result<usize, PickerError> {
        let Some(raw) = self.present(name) else {
            return Ok(default);
        };
        raw.parse::<usize>().map_err(|_| invalid(name, raw))
    }

    /// The validated layout described by `width`, `height` and `hueWidth`.
    pub fn layout(&self) -> Result<Layout, PickerError> {
        Layout::new(
            self.read_usize(AttributeName::Width, DEFAULT_WIDTH)?,
            self.read_usize(AttributeName::Height, DEFAULT_HEIGHT)?,
            self.read_usize(AttributeName::HueWidth, DEFAULT_HUE_WIDTH)?,
        )
    }

    /// The color described by `l`, `c` and `h`. Absent attributes keep the
    /// corresponding component of `last`. Hue is wrapped into `[0, 360)`.
    pub fn color(&self, last: OkLch) -> Result<OkLch, PickerError> {
        Ok(OkLch {
            l: self.read_f64(AttributeName::L, last.l)?,
            c: self.read_f64(AttributeName::C, last.c)?,
            h: normalize_hue(self.read_f64(AttributeName::H, last.h)?),
        })
    }
}

fn invalid(name: AttributeName, raw: &str) -> PickerError {
    PickerError::InvalidAttribute {
        name: name.to_string(),
        value: raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(AttributeName, &str)]) -> Attributes {
        let mut a = Attributes::new();
        for &(name, value) in pairs {
            a.set(name, value);
        }
        a
    }

    // -- AttributeName --

    #[test]
    fn names_round_trip_through_strings() {
        for name in AttributeName::ALL {
            assert_eq!(name.as_str().parse::<AttributeName>().unwrap(), name);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert!(matches!(
            "alpha".parse::<AttributeName>(),
            Err(PickerError::UnknownAttribute(n)) if n == "alpha"
        ));
    }

    #[test]
    fn hue_width_is_camel_case() {
        assert_eq!(AttributeName::HueWidth.to_string(), "hueWidth");
        assert!("huewidth".parse::<AttributeName>().is_err());
    }

    // -- read_f64 --

    #[test]
    fn read_f64_parses_decimal() {
        let a = attrs(&[(AttributeName::L, "0.625")]);
        assert_eq!(a.read_f64(AttributeName::L, 0.0).unwrap(), 0.625);
    }

    #[test]
    fn read_f64_defaults_when_absent_or_empty() {
        let a = attrs(&[(AttributeName::C, "")]);
        assert_eq!(a.read_f64(AttributeName::L, 0.3).unwrap(), 0.3);
        assert_eq!(a.read_f64(AttributeName::C, 0.1).unwrap(), 0.1);
    }

    #[test]
    fn read_f64_rejects_garbage_and_non_finite() {
        for bad in ["abc", "NaN", "inf", "0.5x"] {
            let a = attrs(&[(AttributeName::H, bad)]);
            let err = a.read_f64(AttributeName::H, 0.0).unwrap_err();
            let matches_input = matches!(
                &err,
                PickerError::InvalidAttribute { name, value } if name == "h" && value == bad
            );
            assert!(matches_input, "unexpected error for {bad}: {err}");
        }
    }

    // -- read_usize --

    #[test]
    fn read_usize_parses_integer() {
        let a = attrs(&[(AttributeName::Width, "320")]);
        assert_eq!(a.read_usize(AttributeName::Width, 0).unwrap(), 320);
    }

    #[test]
    fn read_usize_rejects_fractions_and_negatives() {
        for bad in ["2.5", "-1", "wide"] {
            let a = attrs(&[(AttributeName::Height, bad)]);
            assert!(a.read_usize(AttributeName::Height, 200).is_err(), "{bad}");
        }
    }

    // -- layout --

    #[test]
    fn layout_defaults_without_attributes() {
        let layout = Attributes::new().layout().unwrap();
        assert_eq!(layout, Layout::default());
        assert_eq!(layout.plane_size(), (200, 200));
    }

    #[test]
    fn layout_reads_all_three_attributes() {
        let a = attrs(&[
            (AttributeName::Width, "130"),
            (AttributeName::Height, "90"),
            (AttributeName::HueWidth, "10"),
        ]);
        let layout = a.layout().unwrap();
        assert_eq!(layout.plane_size(), (120, 90));
        assert_eq!(layout.hue_size(), (10, 90));
    }

    #[test]
    fn layout_propagates_validation_errors() {
        let a = attrs(&[(AttributeName::HueWidth, "300")]);
        assert!(matches!(a.layout(), Err(PickerError::InvalidLayout(_))));
    }

    // -- color --

    #[test]
    fn color_keeps_last_value_for_absent_components() {
        let a = attrs(&[(AttributeName::L, "0.4")]);
        let color = a.color(OkLch::new(0.9, 0.12, 45.0)).unwrap();
        assert_eq!(color, OkLch::new(0.4, 0.12, 45.0));
    }

    #[test]
    fn color_wraps_hue() {
        let a = attrs(&[(AttributeName::H, "-30")]);
        assert_eq!(a.color(OkLch::default()).unwrap().h, 330.0);
    }

    // -- delta --

    #[test]
    fn delta_applies_sets_and_removals_in_order() {
        let mut a = attrs(&[(AttributeName::C, "0.1")]);
        let delta = AttributeDelta::new()
            .set(AttributeName::L, "0.5")
            .remove(AttributeName::C)
            .set(AttributeName::L, "0.6");
        a.apply(&delta);
        assert_eq!(a.get(AttributeName::L), Some("0.6"));
        assert_eq!(a.get(AttributeName::C), None);
    }

    #[test]
    fn parse_pairs_reads_name_value_strings() {
        let delta = AttributeDelta::parse_pairs(["l=0.5", "hueWidth = 30"]).unwrap();
        assert_eq!(
            delta.changes(),
            &[
                (AttributeName::L, Some("0.5".to_string())),
                (AttributeName::HueWidth, Some("30".to_string())),
            ]
        );
    }

    #[test]
    fn parse_pairs_rejects_missing_equals_and_unknown_names() {
        assert!(AttributeDelta::parse_pairs(["l"]).is_err());
        assert!(AttributeDelta::parse_pairs(["alpha=1"]).is_err());
    }
}
