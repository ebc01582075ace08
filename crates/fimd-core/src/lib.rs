//! Fast isolated marker detector (FIMD): a single-pass scan over an 8-bit
//! grayscale image that locates bright isolated point markers and
//! saturated "sun" pixels using a Bresenham circle of configurable
//! radius.
//!
//! The scan walks the image once, left to right, top to bottom. For
//! each candidate center it compares the center pixel against its
//! Bresenham-ring neighbors at the configured radius: a ring uniformly
//! dimmer than the center (by more than `diff`) makes the center a
//! marker candidate (reported at its brightest interior pixel); a
//! saturated center whose ring is also uniformly bright makes it a sun
//! candidate. Accepted candidates have their interior pixels zeroed in
//! place, which doubles as single-pass non-maximum suppression: a
//! second blob under the same peak will never re-trigger.
//!
//! ```
//! use fimd_core::{Caps, Detector, DetectorParams, Thresholds};
//!
//! let width = 32;
//! let height = 32;
//! let mut image = vec![0u8; width * height];
//! image[16 * width + 16] = 200;
//!
//! let params = DetectorParams::new(width, height, 3, Thresholds::default(), Caps::default())
//!     .expect("valid params");
//! let detector = Detector::new(params);
//! let detections = detector.detect(&mut image).expect("scan succeeds");
//! assert_eq!(detections.markers, vec![(16, 16)]);
//! ```

mod bresenham;
mod detector;
mod error;
mod image;
pub mod logger;
mod offsets;
mod params;
mod scan;

pub use bresenham::{tables_for, RadiusPoints};
pub use detector::Detector;
pub use error::FimdError;
pub use image::{GrayImage, GrayImageView};
pub use offsets::OffsetTable;
pub use params::{Caps, DetectorParams, Thresholds, SUPPORTED_RADII, TERM_SEQ};
pub use scan::{scan, Detections};
