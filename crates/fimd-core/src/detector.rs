//! Top-level [`Detector`]: ties parameters, cached per-radius geometry,
//! and the scan engine into the crate's public entry point.

use crate::error::FimdError;
use crate::image::GrayImageView;
use crate::params::{Caps, DetectorParams, Thresholds, TERM_SEQ};
use crate::scan::{self, Detections};

/// A detector specialized to one image size and one circle radius.
///
/// Construct with [`DetectorParams::new`] + [`Detector::new`], then call
/// [`Detector::detect`] (destructive, in place) or
/// [`Detector::detect_copy`] (non-destructive, allocates one scratch
/// buffer) once per image.
#[derive(Clone, Debug)]
pub struct Detector {
    params: DetectorParams,
}

impl Detector {
    pub fn new(params: DetectorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &DetectorParams {
        &self.params
    }

    pub fn width(&self) -> usize {
        self.params.width
    }

    pub fn height(&self) -> usize {
        self.params.height
    }

    pub fn radius(&self) -> u32 {
        self.params.radius
    }

    pub fn thresholds(&self) -> Thresholds {
        self.params.thresholds
    }

    pub fn caps(&self) -> Caps {
        self.params.caps
    }

    /// The two-byte termination sentinel this build writes into the scan
    /// buffer. Exposed for introspection, per the library API contract.
    pub fn termination_sequence(&self) -> [u8; 2] {
        TERM_SEQ
    }

    /// Runs one detection pass on `image` in place. `image` must be
    /// exactly `width * height` bytes; its interior pixels under every
    /// accepted candidate are zeroed (destructive non-maximum
    /// suppression) and its last two bytes are overwritten with the
    /// termination sentinel.
    pub fn detect(&self, image: &mut [u8]) -> Result<Detections, FimdError> {
        let (detections, _bytes_scanned) = scan::scan(
            image,
            self.params.width,
            self.params.height,
            self.params.radius,
            self.params.thresholds,
            self.params.caps,
        )?;
        Ok(detections)
    }

    /// Like [`Detector::detect`], but leaves the caller's buffer
    /// untouched: copies `image` into an owned scratch buffer first
    /// (scoped to this call) and runs the mutating scan on the copy.
    /// `image`'s dimensions must match this detector's `width`/`height`.
    pub fn detect_copy(&self, image: &GrayImageView<'_>) -> Result<Detections, FimdError> {
        if image.width != self.params.width || image.height != self.params.height {
            return Err(FimdError::BufferSizeMismatch {
                expected: self.params.width * self.params.height,
                actual: image.data.len(),
            });
        }
        let mut scratch = image.data.to_vec();
        self.detect(&mut scratch)
    }
}
