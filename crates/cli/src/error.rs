//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success (a rejected pick is a result, not an error)
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: picker error (bad dimensions, render failure)
//! - 11: I/O error (PNG write)
//! - 12: input error (malformed or unknown attribute, bad layout, bad hex)
//! - 13: serialization error

use oklch_picker_core::PickerError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// A picker-level error that is not the user's input.
    Picker(PickerError),
    /// An I/O error (file write, snapshot).
    Io(String),
    /// A user input error (attribute value, layout, color string).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Picker(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Picker(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<PickerError> for CliError {
    fn from(e: PickerError) -> Self {
        match e {
            PickerError::Io(msg) => CliError::Io(msg),
            e @ (PickerError::InvalidAttribute { .. }
            | PickerError::UnknownAttribute(_)
            | PickerError::InvalidLayout(_)
            | PickerError::InvalidColor(_)) => CliError::Input(e.to_string()),
            other => CliError::Picker(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picker_error_exit_code_is_10() {
        let err = CliError::from(PickerError::InvalidDimensions { width: 0, height: 0 });
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn io_error_exit_code_is_11() {
        let err = CliError::Io("write failed".into());
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn input_error_exit_code_is_12() {
        let err = CliError::Input("bad hue".into());
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn serialization_error_exit_code_is_13() {
        let err = CliError::Serialization("json fail".into());
        assert_eq!(err.exit_code(), 13);
    }

    #[test]
    fn from_picker_io_routes_to_cli_io() {
        let cli_err = CliError::from(PickerError::Io("disk full".into()));
        assert_eq!(cli_err.exit_code(), 11);
        assert!(cli_err.to_string().contains("disk full"));
    }

    #[test]
    fn from_picker_attribute_errors_route_to_input() {
        let malformed = CliError::from(PickerError::InvalidAttribute {
            name: "h".into(),
            value: "north".into(),
        });
        assert_eq!(malformed.exit_code(), 12);
        assert!(malformed.to_string().contains("north"));

        let unknown = CliError::from(PickerError::UnknownAttribute("alpha".into()));
        assert_eq!(unknown.exit_code(), 12);

        let layout = CliError::from(PickerError::InvalidLayout("hue strip too wide".into()));
        assert_eq!(layout.exit_code(), 12);
    }

    #[test]
    fn debug_names_the_variant() {
        let err = CliError::from(PickerError::InvalidLayout("too wide".into()));
        assert_eq!(format!("{err:?}"), r#"Input("invalid layout: too wide")"#);
    }

    #[test]
    fn from_serde_json_error_routes_to_serialization() {
        let bad_json = serde_json::from_str::<serde_json::Value>("{invalid");
        let cli_err = CliError::from(bad_json.unwrap_err());
        assert_eq!(cli_err.exit_code(), 13);
    }
}
