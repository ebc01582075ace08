//! CLI-local error type, wrapping [`fimd_core::FimdError`] with the I/O and
//! argument-validation failures that only make sense at this boundary.

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("failed to read image file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("image file {path} is {actual} bytes, expected width*height = {expected}")]
    SizeMismatch {
        path: String,
        expected: usize,
        actual: usize,
    },

    #[error(transparent)]
    Detector(#[from] fimd_core::FimdError),
}
