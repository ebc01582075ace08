//! Configuration surface: thresholds, result caps, and per-call parameters.

use crate::error::FimdError;

/// Radii with a cached Bresenham boundary/interior table (see
/// [`crate::bresenham`]). Mirrors the original's `R = 2..5` support.
pub const SUPPORTED_RADII: &[u32] = &[2, 3, 4, 5];

/// Two-byte termination sentinel, written near the end of the scan
/// buffer to fuse bounds-checking with early termination. Tested and
/// written as two fixed bytes rather than a 16-bit integer so the
/// behavior does not depend on host endianness.
pub const TERM_SEQ: [u8; 2] = [0xFF, 0x00];

/// Brightness gates for the center/ring decision cascade.
///
/// `Tc` gates whether a pixel is bright enough to be considered at all,
/// `Td` gates the center-to-ring contrast required for a marker (or the
/// center-to-ring *similarity* required for a sun pixel), and `Ts` gates
/// how saturated a pixel must be to qualify as a sun candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Thresholds {
    pub center: u8,
    pub diff: u8,
    pub sun: u8,
}

impl Thresholds {
    pub fn new(center: u8, diff: u8, sun: u8) -> Result<Self, FimdError> {
        if center == 0 || diff == 0 {
            return Err(FimdError::InvalidThresholds {
                reason: "center and diff thresholds must be > 0".into(),
            });
        }
        if center > sun {
            return Err(FimdError::InvalidThresholds {
                reason: format!("center threshold {center} must be <= sun threshold {sun}"),
            });
        }
        Ok(Self { center, diff, sun })
    }
}

impl Default for Thresholds {
    /// Matches the original CPU reference's defaults
    /// (`FIMD_THRESHOLD_CENTER=120`, `FIMD_THRESHOLD_DIFF=60`, `FIMD_THRESHOLD_SUN=240`).
    fn default() -> Self {
        Self {
            center: 120,
            diff: 60,
            sun: 240,
        }
    }
}

/// Bounds on the number of detections a single scan will collect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Caps {
    pub max_markers: usize,
    pub max_sun_points: usize,
}

impl Default for Caps {
    fn default() -> Self {
        Self {
            max_markers: 300,
            max_sun_points: 50_000,
        }
    }
}

/// Full configuration for one [`crate::Detector`] instance.
///
/// A detector is specialized to a single `radius`; callers wanting
/// multi-radius behavior construct one `DetectorParams`/`Detector` per
/// radius and try them in a preferred order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DetectorParams {
    pub width: usize,
    pub height: usize,
    pub radius: u32,
    pub thresholds: Thresholds,
    pub caps: Caps,
}

impl DetectorParams {
    pub fn new(
        width: usize,
        height: usize,
        radius: u32,
        thresholds: Thresholds,
        caps: Caps,
    ) -> Result<Self, FimdError> {
        if !SUPPORTED_RADII.contains(&radius) {
            return Err(FimdError::InvalidRadius {
                radius,
                supported: SUPPORTED_RADII,
            });
        }
        let min_side = 2 * radius as usize + 1;
        if width < min_side || height < min_side || width * height < 2 {
            return Err(FimdError::InvalidDimensions {
                width,
                height,
                radius,
            });
        }
        Ok(Self {
            width,
            height,
            radius,
            thresholds,
            caps,
        })
    }
}
