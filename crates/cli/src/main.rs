#![deny(unsafe_code)]
//! CLI binary for the OKLCh picker.
//!
//! Subcommands:
//! - `render` renders the widget for a color and writes a PNG
//! - `pick` presses the pointer on the plane or the hue strip and reports the result
//! - `sample` reports whether an OKLCh color is displayable in sRGB

mod error;

use clap::{Args, Parser, Subcommand, ValueEnum};
use error::CliError;
use oklch_picker::{PickerController, PointerEvent, PointerTarget};
use oklch_picker_core::color::{oklch_to_srgb, srgb_to_oklch};
use oklch_picker_core::math::to_rgb;
use oklch_picker_core::{AttributeDelta, Canvas, Layout, OkLch, PickerError, Rgba, Srgb};
use oklch_picker_render::{compose_side_by_side, MarkerStyle};
use oklch_picker_render::snapshot::write_png;
use std::path::PathBuf;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "oklch-picker", about = "OKLCh color picker CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log at debug level (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Widget geometry and starting color, shared by `render` and `pick`.
#[derive(Args)]
struct WidgetArgs {
    /// Lightness, 0..1.
    #[arg(long, default_value_t = 0.7)]
    l: f64,

    /// Chroma, 0..0.4.
    #[arg(long, default_value_t = 0.1)]
    c: f64,

    /// Hue in degrees; wrapped into [0, 360).
    #[arg(long, default_value_t = 180.0, allow_negative_numbers = true)]
    h: f64,

    /// Total widget width in pixels, hue strip included.
    #[arg(short = 'W', long, default_value_t = 220)]
    width: usize,

    /// Widget height in pixels.
    #[arg(short = 'H', long, default_value_t = 200)]
    height: usize,

    /// Hue strip width in pixels.
    #[arg(long, default_value_t = 20)]
    hue_width: usize,

    /// Extra attribute writes applied after setup, as `name=value`.
    #[arg(long = "attr", value_name = "NAME=VALUE")]
    attrs: Vec<String>,

    /// Draw a dark ring on light colors and a light ring on dark ones.
    #[arg(long)]
    invert_ring: bool,
}

impl WidgetArgs {
    fn marker_style(&self) -> MarkerStyle {
        let style = MarkerStyle::default();
        if !self.invert_ring {
            return style;
        }
        MarkerStyle {
            ring_high_lightness: Rgba::BLACK,
            ring_low_lightness: Rgba::WHITE,
            ..style
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Target {
    Plane,
    Hue,
}

impl From<Target> for PointerTarget {
    fn from(t: Target) -> Self {
        match t {
            Target::Plane => PointerTarget::Plane,
            Target::Hue => PointerTarget::Hue,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Render the picker for a color and write a PNG of both surfaces.
    Render {
        #[command(flatten)]
        widget: WidgetArgs,

        /// Output file path.
        #[arg(short, long, default_value = "picker.png")]
        output: PathBuf,
    },
    /// Press the pointer at a surface-local pixel and print the picked color.
    Pick {
        /// Surface that receives the press.
        target: Target,

        /// Horizontal offset in pixels.
        x: f64,

        /// Vertical offset in pixels.
        y: f64,

        #[command(flatten)]
        widget: WidgetArgs,
    },
    /// Report whether an OKLCh color can be shown in sRGB.
    Sample {
        #[arg(long, default_value_t = 0.7)]
        l: f64,

        #[arg(long, default_value_t = 0.1)]
        c: f64,

        #[arg(long, default_value_t = 180.0, allow_negative_numbers = true)]
        h: f64,

        /// Start from an sRGB hex color instead of --l/--c/--h.
        #[arg(long, conflicts_with_all = ["l", "c", "h"])]
        hex: Option<String>,
    },
}

fn build_picker(widget: &WidgetArgs) -> Result<PickerController<Canvas>, CliError> {
    let layout = Layout::new(widget.width, widget.height, widget.hue_width)?;
    let color = OkLch::new(widget.l, widget.c, widget.h);
    let (plane, hue) = (Canvas::new(1, 1)?, Canvas::new(1, 1)?);
    let mut picker = PickerController::initialize(layout, color, plane, hue)?;
    let delta = AttributeDelta::parse_pairs(widget.attrs.iter().map(String::as_str))?;
    if !delta.is_empty() {
        picker.apply_external_change(&delta)?;
    }
    if widget.invert_ring {
        picker.set_style(widget.marker_style());
    }
    Ok(picker)
}

fn color_json(color: OkLch) -> serde_json::Value {
    serde_json::json!({
        "l": color.l,
        "c": color.c,
        "h": color.h,
        "hex": to_rgb(color).map(Srgb::to_hex),
    })
}

fn describe(color: OkLch) -> String {
    let shown = match to_rgb(color) {
        Some(rgb) => rgb.to_hex(),
        None => format!("out of gamut, clamps to {}", oklch_to_srgb(color).to_hex()),
    };
    format!("oklch({} {} {}) {shown}", color.l, color.c, color.h)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Render { widget, output } => {
            let picker = build_picker(&widget)?;
            let Some((plane, hue)) = picker.surfaces() else {
                let detached = PickerError::InvalidLayout("picker is not attached".into());
                return Err(CliError::Picker(detached));
            };
            let image = compose_side_by_side(plane.buffer(), hue.buffer())?;
            write_png(&image, &output)?;
            debug!(frames = picker.frames(), "render complete");

            let color = picker.color();
            if cli.json {
                let info = serde_json::json!({
                    "color": color_json(color),
                    "width": image.width(),
                    "height": image.height(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} ({}x{}) -> {}",
                    describe(color),
                    image.width(),
                    image.height(),
                    output.display()
                );
            }
        }
        Command::Pick {
            target,
            x,
            y,
            widget,
        } => {
            let mut picker = build_picker(&widget)?;
            let change = picker.pointer(target.into(), PointerEvent::down(x, y));
            let picked = change.map(|c| OkLch::new(c.l, c.c, c.h));
            if cli.json {
                let info = serde_json::json!({
                    "accepted": picked.is_some(),
                    "color": color_json(picked.unwrap_or(picker.color())),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                match picked {
                    Some(color) => println!("{}", describe(color)),
                    None => println!("rejected: outside sRGB at hue {}", picker.color().h),
                }
            }
        }
        Command::Sample { l, c, h, hex } => {
            let color = match hex {
                Some(hex) => srgb_to_oklch(Srgb::from_hex(&hex)?),
                None => OkLch::new(l, c, h),
            };
            if cli.json {
                let info = serde_json::json!({
                    "displayable": to_rgb(color).is_some(),
                    "color": color_json(color),
                    "clamped_hex": oklch_to_srgb(color).to_hex(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("{}", describe(color));
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
