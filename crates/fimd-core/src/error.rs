//! Error types returned by [`crate::Detector`] construction and detection.

/// Errors returned by the fast isolated marker detector.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FimdError {
    /// `width`/`height` are too small to fit a single candidate center at
    /// the requested `radius` (need `width, height >= 2*radius + 1`).
    #[error("image {width}x{height} too small for radius {radius} (need >= {min}x{min})", min = 2 * radius + 1)]
    InvalidDimensions {
        width: usize,
        height: usize,
        radius: u32,
    },

    /// Threshold configuration violates `0 < center <= sun <= 255` or
    /// `0 < diff <= 255`.
    #[error("invalid thresholds: {reason}")]
    InvalidThresholds { reason: String },

    /// `radius` is not one of the radii this build supports.
    #[error("radius {radius} is not supported (supported: {supported:?})")]
    InvalidRadius {
        radius: u32,
        supported: &'static [u32],
    },

    /// Reserved for FFI callers translating a caught allocation failure
    /// into the C ABI's `-1` status code. `fimd-core` itself never
    /// constructs this variant: Rust's global allocator aborts the
    /// process on OOM rather than returning an error.
    #[error("allocation failed")]
    AllocationFailed,

    /// Supplied buffer length does not match `width * height`.
    #[error("buffer length {actual} does not match width*height ({expected})")]
    BufferSizeMismatch { expected: usize, actual: usize },
}
