//! Thin command-line front-end for `fimd-core`: reads a raw grayscale
//! file and prints the detected marker and sun-pixel coordinates.

mod error;

use std::fs;
use std::process::ExitCode;

use clap::Parser;
use fimd_core::{logger, Caps, Detector, DetectorParams, FimdError, GrayImageView, Thresholds};

use error::CliError;

/// Fast isolated marker detector.
#[derive(Parser, Debug)]
#[command(name = "fimd", version, about)]
struct Args {
    /// Path to a raw 8-bit grayscale file, exactly width*height bytes.
    image: String,

    /// Image width in pixels.
    #[arg(long)]
    width: usize,

    /// Image height in pixels.
    #[arg(long)]
    height: usize,

    /// Bresenham circle radius (one of 2, 3, 4, 5).
    #[arg(long, default_value_t = 3)]
    radius: u32,

    /// Center brightness threshold (Tc).
    #[arg(long, default_value_t = Thresholds::default().center)]
    threshold_center: u8,

    /// Center-to-ring contrast threshold (Td).
    #[arg(long, default_value_t = Thresholds::default().diff)]
    threshold_diff: u8,

    /// Sun saturation threshold (Ts).
    #[arg(long, default_value_t = Thresholds::default().sun)]
    threshold_sun: u8,

    /// Maximum number of markers to report.
    #[arg(long, default_value_t = Caps::default().max_markers)]
    max_markers: usize,

    /// Maximum number of sun points to report.
    #[arg(long, default_value_t = Caps::default().max_sun_points)]
    max_sun_points: usize,

    /// Emit JSON instead of plain-text coordinates.
    #[arg(long)]
    json: bool,

    /// Enable debug logging.
    #[arg(long)]
    verbose: bool,
}

fn run(args: Args) -> Result<(), CliError> {
    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    let _ = logger::init_with_level(level);

    let thresholds = Thresholds::new(args.threshold_center, args.threshold_diff, args.threshold_sun)?;
    let caps = Caps {
        max_markers: args.max_markers,
        max_sun_points: args.max_sun_points,
    };
    let params = DetectorParams::new(args.width, args.height, args.radius, thresholds, caps)?;
    let detector = Detector::new(params);

    let mut buf = fs::read(&args.image).map_err(|source| CliError::Read {
        path: args.image.clone(),
        source,
    })?;
    GrayImageView::new(args.width, args.height, &buf).map_err(|err| match err {
        FimdError::BufferSizeMismatch { expected, actual } => CliError::SizeMismatch {
            path: args.image.clone(),
            expected,
            actual,
        },
        other => CliError::Detector(other),
    })?;

    let detections = detector.detect(&mut buf)?;

    if args.json {
        let out = serde_json::json!({
            "markers": detections.markers,
            "sun_points": detections.sun_pts,
        });
        println!("{out}");
    } else {
        for (x, y) in &detections.markers {
            println!("marker {x} {y}");
        }
        for (x, y) in &detections.sun_pts {
            println!("sun {x} {y}");
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("fimd: {err}");
            ExitCode::FAILURE
        }
    }
}
